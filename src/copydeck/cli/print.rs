use chrono::{DateTime, Utc};
use colored::Colorize;
use copydeck::api::{CmdMessage, MessageLevel};
use copydeck::config::CopydeckConfig;
use copydeck::model::{CopyStatus, PersistedRecord};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 16;
const TAG_WIDTH: usize = 20;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_records(records: &[PersistedRecord]) {
    for (i, record) in records.iter().enumerate() {
        let idx = format!("{:>3}. ", i + 1);
        let tag = format!(
            "{:?}/{:?}",
            record.content.category, record.content.status
        )
        .to_lowercase();
        let tag = format!("{:<width$}", tag, width = TAG_WIDTH);

        let title = if record.content.title.trim().is_empty() {
            "(untitled)".to_string()
        } else {
            record.content.title.clone()
        };
        let preview: String = record
            .content
            .body
            .chars()
            .take(60)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let line = if preview.is_empty() {
            title
        } else {
            format!("{} {}", title, preview)
        };

        let available = LINE_WIDTH.saturating_sub(idx.width() + TAG_WIDTH + TIME_WIDTH);
        let shown = truncate_to_width(&line, available);
        let padding = available.saturating_sub(shown.width());

        let tag_colored = match record.content.status {
            CopyStatus::Published => tag.green(),
            CopyStatus::Approved => tag.cyan(),
            CopyStatus::Archived => tag.dimmed(),
            CopyStatus::Draft | CopyStatus::Review => tag.normal(),
        };

        println!(
            "{}{}{}{}{}",
            idx.yellow(),
            tag_colored,
            shown,
            " ".repeat(padding),
            format_time_ago(record.updated_at).dimmed()
        );
    }
}

pub(super) fn print_config(config: &CopydeckConfig) {
    for key in CopydeckConfig::keys() {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key.bold(), value);
        }
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
