//! Output formatting helpers.

use std::io::{self, Write};

use chrono::DateTime;

use storecast_core::{Message, SelectionMode};

/// Render a unix timestamp as "YYYY-MM-DD HH:MM" (UTC).
pub fn format_timestamp(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0).map_or_else(
        || secs.to_string(),
        |dt| dt.format("%Y-%m-%d %H:%M").to_string(),
    )
}

/// First eight characters of an id, as shown in listings.
pub fn short_id(id: &str) -> &str {
    &id[..8.min(id.len())]
}

/// One-line target description for message listings, e.g. "manual (3)".
pub fn target_summary(message: &Message) -> String {
    format!(
        "{} ({})",
        message.store_selection_type,
        message.stores.len()
    )
}

pub fn write_message_detail(w: &mut impl Write, message: &Message) -> io::Result<()> {
    writeln!(w, "  ID:       {}", message.id)?;
    writeln!(w, "  Title:    {}", message.title)?;
    writeln!(w, "  Author:   {}", message.user_id)?;
    writeln!(w, "  Created:  {}", format_timestamp(message.created_at))?;
    writeln!(w, "  Target:   {}", message.store_selection_type)?;
    if message.store_selection_type == SelectionMode::All {
        writeln!(w, "  Stores:   All stores ({})", message.stores.len())?;
    } else if message.stores.is_empty() {
        writeln!(w, "  Stores:   (none)")?;
    } else {
        writeln!(w, "  Stores:")?;
        for descriptor in &message.stores {
            if descriptor.is_manual() {
                writeln!(w, "    {} ({}) [manual]", descriptor.name(), descriptor.code())?;
            } else {
                writeln!(w, "    {} ({})", descriptor.name(), descriptor.code())?;
            }
        }
    }
    writeln!(w)?;
    writeln!(w, "{}", message.body)?;
    Ok(())
}

pub fn truncate(s: &str, max: usize) -> String {
    let count = s.chars().count();
    if count <= max {
        s.to_string()
    } else {
        format!("{}…", s.chars().take(max - 1).collect::<String>())
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use storecast_core::{Store, StoreDescriptor};

    use super::*;

    fn message(mode: SelectionMode, stores: Vec<StoreDescriptor>) -> Message {
        Message {
            id: "0b1f4a7c-9d2e-4f16-8a63-2f90cc01de44".into(),
            title: "Holiday hours".into(),
            body: "Closing early on the 24th.".into(),
            user_id: "u1".into(),
            store_selection_type: mode,
            stores,
            created_at: 1_700_000_000,
        }
    }

    fn downtown() -> Store {
        Store {
            id: "st1".into(),
            name: "Downtown".into(),
            code: "DT001".into(),
            created_at: 1_700_000_000,
        }
    }

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactlyten", 10), "exactlyten");
    }

    #[test]
    fn truncate_shortens_with_ellipsis() {
        let out = truncate("a rather long message title", 10);
        assert_eq!(out.chars().count(), 10);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn timestamp_renders_utc_minutes() {
        assert_eq!(format_timestamp(1_700_000_000), "2023-11-14 22:13");
    }

    #[test]
    fn short_id_takes_an_eight_char_prefix() {
        assert_eq!(short_id("0b1f4a7c-9d2e-4f16-8a63-2f90cc01de44"), "0b1f4a7c");
        assert_eq!(short_id("m1"), "m1");
    }

    #[test]
    fn summary_shows_mode_and_count() {
        let msg = message(
            SelectionMode::Manual,
            vec![StoreDescriptor::manual("DT001"), StoreDescriptor::manual("ML002")],
        );
        assert_eq!(target_summary(&msg), "manual (2)");
    }

    #[test]
    fn detail_lists_stores_and_marks_manual_entries() {
        let msg = message(
            SelectionMode::Manual,
            vec![
                StoreDescriptor::resolved(&downtown()),
                StoreDescriptor::manual("XX009"),
            ],
        );
        let mut buf = Vec::new();
        write_message_detail(&mut buf, &msg).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("Downtown (DT001)"));
        assert!(!out.contains("Downtown (DT001) [manual]"));
        assert!(out.contains("Store XX009 (XX009) [manual]"));
        assert!(out.contains("Closing early on the 24th."));
    }

    #[test]
    fn detail_collapses_broadcast_to_a_count() {
        let msg = message(
            SelectionMode::All,
            vec![
                StoreDescriptor::resolved(&downtown()),
                StoreDescriptor::manual("XX009"),
            ],
        );
        let mut buf = Vec::new();
        write_message_detail(&mut buf, &msg).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("All stores (2)"));
        assert!(!out.contains("Downtown"));
    }

    #[test]
    fn detail_shows_none_for_an_empty_target_list() {
        let msg = message(SelectionMode::Select, Vec::new());
        let mut buf = Vec::new();
        write_message_detail(&mut buf, &msg).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("Stores:   (none)"));
    }
}
