//! Text rendering shared by line-oriented consumers
//!
//! A rendered line looks like
//! `2025-01-08 10:30:45.123 [io] Error: disk full (src/db.rs:42 -> Function: flush)`.

use super::entry::Entry;
use super::kind::Kind;
use std::fmt::Write;

/// Renders entries as single text lines, optionally colored
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer {
    color: bool,
}

impl TextRenderer {
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// Colors only take effect with the `console` feature.
    pub fn colored() -> Self {
        Self { color: true }
    }

    pub fn uses_color(&self) -> bool {
        self.color && cfg!(feature = "console")
    }

    pub fn render(&self, entry: &Entry) -> String {
        let mut line = String::with_capacity(entry.message.len() + 64);
        self.write_timestamp(&mut line, entry);
        self.write_header(&mut line, entry);
        line.push_str(&entry.message);
        self.write_context(&mut line, entry);
        line
    }

    fn write_timestamp(&self, out: &mut String, entry: &Entry) {
        if !entry.timestamp.is_empty() {
            out.push_str(&entry.timestamp);
            out.push(' ');
        }
    }

    fn write_header(&self, out: &mut String, entry: &Entry) {
        let header = format!("[{}] {}:", entry.context.category, kind_label(entry.kind));
        let _ = write!(out, "{} ", self.paint_kind(header, entry.kind));
    }

    fn write_context(&self, out: &mut String, entry: &Entry) {
        if entry.context.is_anonymous() {
            return;
        }
        let context = format!("({})", entry.context);
        let _ = write!(out, " {}", self.paint_dim(context));
    }

    #[cfg(feature = "console")]
    fn paint_kind(&self, text: String, kind: Kind) -> String {
        use colored::Colorize;
        if self.color {
            text.color(kind.color_code()).bold().to_string()
        } else {
            text
        }
    }

    #[cfg(not(feature = "console"))]
    fn paint_kind(&self, text: String, _kind: Kind) -> String {
        text
    }

    #[cfg(feature = "console")]
    fn paint_dim(&self, text: String) -> String {
        use colored::Colorize;
        if self.color {
            text.bright_black().to_string()
        } else {
            text
        }
    }

    #[cfg(not(feature = "console"))]
    fn paint_dim(&self, text: String) -> String {
        text
    }
}

fn kind_label(kind: Kind) -> &'static str {
    match kind {
        Kind::Error => "Error",
        Kind::Warning => "Warning",
        Kind::Info => "Info",
    }
}
