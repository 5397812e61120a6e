//! Log formatting and output with ANSI colors and text wrapping
//!
//! Handles:
//! - Colorized console output with tag and level formatting
//! - Text wrapping at word boundaries
//! - Dual output (console + file)
//! - Broken pipe handling for piped commands

use super::file::write_to_file;
use super::tags::LogTag;
use chrono::Local;
use colored::*;
use std::io::{stdout, ErrorKind, Write};

/// Log format widths for alignment
const TAG_WIDTH: usize = 10;
const LEVEL_WIDTH: usize = 8;

/// Maximum line length before wrapping
const MAX_LINE_LENGTH: usize = 145;

/// Format and output a log message
pub fn format_and_log(tag: LogTag, level: &str, message: &str) {
    let now = Local::now();
    let time = now.format("%H:%M:%S").to_string();

    let prefix = format!("{} ", time).dimmed().to_string();
    let tag_str = format_tag(&tag);
    let level_str = format_level(level);

    let base_line = format!("{}[{}] [{}] ", prefix, tag_str, level_str);
    let base_length = TAG_WIDTH + LEVEL_WIDTH + time.len() + 8;
    let available_space = MAX_LINE_LENGTH.saturating_sub(base_length).max(50);

    let message_chunks = wrap_text(message, available_space);

    // Print first line
    print_stdout_safe(&format!("{}{}", base_line, message_chunks[0]));

    // Write to file (uncolored)
    let timestamp = now.format("%Y-%m-%d %H:%M:%S").to_string();
    let tag_clean = tag.to_plain_string();
    write_to_file(&format!(
        "{} [{}] [{}] {}",
        timestamp, tag_clean, level, message_chunks[0]
    ));

    // Print continuation lines aligned past the prefix
    if message_chunks.len() > 1 {
        let continuation_prefix = " ".repeat(base_length);
        for chunk in &message_chunks[1..] {
            print_stdout_safe(&format!("{}{}", continuation_prefix, chunk));
            write_to_file(&format!("{} [{}] [{}] {}", timestamp, tag_clean, level, chunk));
        }
    }
}

/// Format a tag with appropriate color
fn format_tag(tag: &LogTag) -> ColoredString {
    let padded = format!("{:<width$}", tag.to_plain_string(), width = TAG_WIDTH);
    match tag {
        LogTag::System => padded.bright_yellow().bold(),
        LogTag::Config => padded.bright_white().bold(),
        LogTag::Api => padded.bright_blue().bold(),
        LogTag::Llm => padded.bright_magenta().bold(),
        LogTag::Audit => padded.bright_green().bold(),
        LogTag::Webserver => padded.bright_cyan().bold(),
    }
}

/// Format a level string with appropriate color
fn format_level(level: &str) -> ColoredString {
    let padded = format!("{:<width$}", level, width = LEVEL_WIDTH);
    match level {
        "ERROR" => padded.bright_red().bold(),
        "WARNING" => padded.yellow().bold(),
        "INFO" => padded.normal(),
        "DEBUG" => padded.bright_black(),
        _ => padded.dimmed(),
    }
}

/// Wrap text at word boundaries into chunks of at most `width` characters
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if text.len() <= width {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    if chunks.is_empty() {
        chunks.push(String::new());
    }

    chunks
}

/// Print to stdout, ignoring broken pipe errors (e.g. `etax-sahayak | head`)
fn print_stdout_safe(line: &str) {
    let mut out = stdout();
    if let Err(e) = writeln!(out, "{}", line) {
        if e.kind() != ErrorKind::BrokenPipe {
            eprintln!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_short() {
        assert_eq!(wrap_text("hello", 50), vec!["hello".to_string()]);
    }

    #[test]
    fn test_wrap_text_splits_at_words() {
        let chunks = wrap_text("one two three four five", 9);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.len() <= 9, "chunk too long: {:?}", chunk);
        }
    }
}
