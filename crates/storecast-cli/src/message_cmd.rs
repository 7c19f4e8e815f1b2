//! Message subcommands: list, view, send.
//!
//! User-facing output uses writeln! to stdout (this is a CLI binary, not debug output).

use std::io::{self, Write};

use dialoguer::Input;

use storecast_core::{
    BackendError, Message, MessageComposer, MessageDraft, Session, TargetingSelection,
};

use crate::client::HttpBackend;
use crate::fmt::{format_timestamp, short_id, target_summary, truncate, write_message_detail};

/// List messages, newest first.
pub async fn list(backend: &HttpBackend) -> anyhow::Result<()> {
    let messages = backend.list_messages().await?;
    let mut out = io::stdout();
    if messages.is_empty() {
        writeln!(out, "No messages found.")?;
        return Ok(());
    }
    writeln!(
        out,
        "{:<10} {:<40} {:<14} {:<16}",
        "ID", "TITLE", "TARGET", "CREATED"
    )?;
    for message in &messages {
        writeln!(
            out,
            "{:<10} {:<40} {:<14} {:<16}",
            short_id(&message.id),
            truncate(&message.title, 40),
            target_summary(message),
            format_timestamp(message.created_at),
        )?;
    }
    writeln!(out, "\n{} message(s)", messages.len())?;
    Ok(())
}

/// Show one message in full.
///
/// Accepts either a full id or an id prefix as shown in listings.
pub async fn view(backend: &HttpBackend, id: &str) -> anyhow::Result<()> {
    let mut out = io::stdout();
    match backend.get_message(id).await {
        Ok(message) => write_message_detail(&mut out, &message)?,
        Err(BackendError::Api { status: 404, .. }) => {
            let messages = backend.list_messages().await?;
            match match_prefix(id, &messages) {
                PrefixMatch::One(message) => write_message_detail(&mut out, message)?,
                PrefixMatch::None => writeln!(out, "Message {id} not found.")?,
                PrefixMatch::Many(n) => {
                    writeln!(out, "Message id {id} is ambiguous ({n} matches).")?;
                }
            }
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Compose and send a message. Title and body are prompted for when not
/// given as flags; targeting must have been chosen up front.
pub async fn send(
    backend: HttpBackend,
    session: &Session,
    title: Option<String>,
    body: Option<String>,
    targeting: Option<TargetingSelection>,
) -> anyhow::Result<()> {
    let title = match title {
        Some(title) => title,
        None => Input::new().with_prompt("Title").interact_text()?,
    };
    let body = match body {
        Some(body) => body,
        None => Input::new().with_prompt("Body").interact_text()?,
    };

    let composer = MessageComposer::new(backend);
    let directory = composer.load_directory().await;
    let draft = MessageDraft {
        title,
        body,
        targeting,
    };

    let mut out = io::stdout();
    if let Some(selection) = &draft.targeting {
        writeln!(out, "To: {}", selection.summary(&directory))?;
    }

    let message = composer.submit(session, &draft, &directory).await?;
    writeln!(
        out,
        "Message {} sent to {} store(s).",
        short_id(&message.id),
        message.stores.len(),
    )?;
    Ok(())
}

/// Outcome of resolving a user-typed id prefix against the message list.
enum PrefixMatch<'a> {
    None,
    One(&'a Message),
    Many(usize),
}

fn match_prefix<'a>(input: &str, messages: &'a [Message]) -> PrefixMatch<'a> {
    let hits: Vec<&'a Message> = messages
        .iter()
        .filter(|message| message.id.starts_with(input))
        .collect();
    if hits.len() == 1 {
        PrefixMatch::One(hits[0])
    } else if hits.is_empty() {
        PrefixMatch::None
    } else {
        PrefixMatch::Many(hits.len())
    }
}
