//! Auth subcommands: login, logout, status.
//!
//! User-facing output uses writeln! to stdout (this is a CLI binary, not debug output).

use std::io::{self, Write};

use dialoguer::{Input, Password};

use crate::client::{ClientConfig, HttpBackend};
use crate::config::{CliConfig, SessionConfig};
use crate::fmt::format_timestamp;

/// Log in to the server and store the session.
pub async fn login(
    config: &mut CliConfig,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let server_url = config.effective_server_url().to_string();
    let backend = HttpBackend::new(&ClientConfig {
        base_url: server_url.clone(),
        token: None,
    })?;
    let resp = backend
        .login(&email, &password)
        .await
        .map_err(|e| anyhow::anyhow!("Login failed: {e}"))?;

    config.server_url = Some(server_url);
    config.session = Some(SessionConfig {
        user_id: resp.user_id,
        email: resp.email,
        token: resp.token,
        expires_at: resp.expires_at,
    });
    config.save()?;

    let mut out = io::stdout();
    writeln!(out, "Logged in as {email}")?;
    Ok(())
}

/// Revoke the server session (best effort) and clear stored credentials.
pub async fn logout(config: &mut CliConfig) -> anyhow::Result<()> {
    if let Some(session) = &config.session {
        let backend = HttpBackend::new(&ClientConfig {
            base_url: config.effective_server_url().to_string(),
            token: Some(session.token.clone()),
        });
        if let Ok(backend) = backend {
            let _ = backend.logout().await;
        }
    }
    config.clear_session();
    config.save()?;
    let mut out = io::stdout();
    writeln!(out, "Logged out")?;
    Ok(())
}

/// Show current login status without touching the network.
pub fn status(config: &CliConfig) {
    let mut out = io::stdout();
    match &config.session {
        Some(session) => {
            let _ = writeln!(out, "Logged in as: {}", session.email);
            let _ = writeln!(out, "User ID: {}", session.user_id);
            let _ = writeln!(out, "Expires: {}", format_timestamp(session.expires_at));
            let _ = writeln!(out, "Server: {}", config.effective_server_url());
        }
        None => {
            let _ = writeln!(out, "Not logged in");
        }
    }
}
