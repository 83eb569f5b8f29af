//! Terminal output helpers.
//!
//! Human-readable lines by default; with JSON mode enabled every helper
//! emits one `{"type": ..., "payload": ...}` object per line instead, so
//! scripted callers never have to parse decorated text.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};

use owo_colors::OwoColorize;
use serde_json::json;

use crate::domain::SentimentLabel;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn emit_json_line(kind: &str, payload: serde_json::Value) {
    println!("{}", json!({ "type": kind, "payload": payload }));
}

/// Apply output settings from command-line flags.
pub fn configure(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

/// Print the application header with name and version.
pub fn header(version: &str) {
    if is_json() {
        emit_json_line("header", json!({ "app": "tokenpulse", "version": version }));
        return;
    }
    println!("{} {}", "tokenpulse".bold(), version.dimmed());
}

/// Print a section header.
pub fn section(title: &str) {
    if is_json() {
        emit_json_line("section", json!({ "title": title }));
        return;
    }
    println!();
    println!("{}", title.bold());
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    if is_json() {
        emit_json_line("field", json!({ "label": label, "value": value }));
        return;
    }
    println!("  {:<12} {}", label.dimmed(), value);
}

/// Print a success line.
pub fn success(message: &str) {
    if is_json() {
        emit_json_line("success", json!({ "message": message }));
        return;
    }
    println!("  {} {}", "✓".green(), message);
}

/// Print a warning line.
pub fn warning(message: &str) {
    if is_json() {
        emit_json_line("warning", json!({ "message": message }));
        return;
    }
    println!("  {} {}", "⚠".yellow(), message);
}

/// Print an error line to stderr.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json!({ "type": "error", "payload": { "message": message } }));
        return;
    }
    eprintln!("  {} {}", "×".red(), message);
}

/// Print a rendered table, indented to line up with fields.
pub fn table(rendered: &str) {
    for line in rendered.lines() {
        println!("  {line}");
    }
}

/// Print a JSON document as-is.
pub fn document(value: &serde_json::Value) {
    println!("{value}");
}

/// Format a signed percentage, green when rising and red when falling.
pub fn change(pct: f64) -> String {
    let text = format!("{pct:+.2}%");
    if is_json() {
        return text;
    }
    if pct > 0.0 {
        format!("{}", text.green())
    } else if pct < 0.0 {
        format!("{}", text.red())
    } else {
        text
    }
}

/// Format sentiment text in the colour of its label.
pub fn sentiment(label: SentimentLabel, text: &str) -> String {
    if is_json() {
        return text.to_string();
    }
    match label {
        SentimentLabel::Bullish => format!("{}", text.green()),
        SentimentLabel::Bearish => format!("{}", text.red()),
        SentimentLabel::Neutral => format!("{}", text.yellow()),
    }
}

/// Format a highlighted value in cyan.
pub fn highlight(value: impl Display) -> String {
    let value = value.to_string();
    if is_json() {
        return value;
    }
    format!("{}", value.cyan())
}
