//! Store directory subcommand.

use std::io::{self, Write};

use storecast_core::MessageBackend;

use crate::client::HttpBackend;
use crate::fmt::truncate;

/// List the store directory, name-ordered as the server returns it.
pub async fn list(backend: &HttpBackend) -> anyhow::Result<()> {
    let stores = backend.list_stores().await?;
    let mut out = io::stdout();
    if stores.is_empty() {
        writeln!(out, "No stores found.")?;
        return Ok(());
    }
    writeln!(out, "{:<24} {:<10} {:<36}", "NAME", "CODE", "ID")?;
    for store in &stores {
        writeln!(
            out,
            "{:<24} {:<10} {:<36}",
            truncate(&store.name, 24),
            store.code,
            store.id,
        )?;
    }
    writeln!(out, "\n{} store(s)", stores.len())?;
    Ok(())
}
