//! # Rendering
//!
//! Turns command results into terminal text. Layout math (widths, truncation, padding)
//! is Unicode-aware; colors come from `colored` and switch off on their own when stdout is
//! not a terminal or `NO_COLOR` is set.
//!
//! Functions here return strings so the output can be checked without a terminal.

use chrono::{DateTime, Utc};
use clipshelf::commands::{CmdMessage, MessageLevel};
use clipshelf::config::{Settings, KEYS};
use clipshelf::model::{ContentType, Entry};
use clipshelf::monitor::ChangeEvent;
use colored::Colorize;
use std::path::PathBuf;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const TIME_WIDTH: usize = 14;
const ID_WIDTH: usize = 6;
const KIND_WIDTH: usize = 8;

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        out.push_str(&format!("{}\n", line));
    }
    out
}

pub fn render_entry_list(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return "No entries found.\n".to_string();
    }

    let mut out = String::new();
    for entry in entries {
        out.push_str(&render_entry_line(entry));
        out.push('\n');
    }
    out
}

fn render_entry_line(entry: &Entry) -> String {
    let id = format!("{:>width$}. ", entry.id, width = ID_WIDTH - 2);
    let kind = format!("{:<width$}", kind_tag(entry.kind), width = KIND_WIDTH);

    let fixed_width = id.width() + kind.width() + TIME_WIDTH + 2;
    let available = LINE_WIDTH.saturating_sub(fixed_width);
    let preview = truncate_to_width(&entry.preview(LINE_WIDTH), available);
    let padding = available.saturating_sub(preview.width());

    let preview = match entry.kind {
        ContentType::Image => preview.italic(),
        _ => preview.normal(),
    };

    format!(
        "{}{}{}{}  {}",
        id.yellow(),
        kind.cyan(),
        preview,
        " ".repeat(padding),
        format_time_ago(entry.timestamp).dimmed()
    )
}

pub fn render_full_entry(entry: &Entry, blob: Option<&PathBuf>) -> String {
    let mut out = format!(
        "{} {} {}\n",
        format!("#{}", entry.id).yellow(),
        kind_tag(entry.kind).cyan(),
        entry
            .timestamp
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .dimmed()
    );
    out.push_str("--------------------------------\n");
    match blob {
        Some(path) => out.push_str(&format!("{}\n", path.display())),
        None => {
            out.push_str(&entry.content);
            if !entry.content.ends_with('\n') {
                out.push('\n');
            }
        }
    }
    out
}

pub fn render_settings(settings: &Settings) -> String {
    let mut out = String::new();
    for key in KEYS {
        if let Some(value) = settings.get(key) {
            out.push_str(&format!("{} = {}\n", key, value));
        }
    }
    out
}

pub fn render_paths(paths: &[(String, PathBuf)]) -> String {
    let mut out = String::new();
    for (label, path) in paths {
        out.push_str(&format!("{:<10}{}\n", label.bold(), path.display()));
    }
    out
}

pub fn render_change(event: &ChangeEvent) -> String {
    let marker = if event.added { "+".green() } else { "=".dimmed() };
    format!("{} {}", marker, render_entry_line(&event.entry))
}

fn kind_tag(kind: ContentType) -> String {
    format!("[{}]", kind)
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
