//! `SourceMap` — the read-only view the core holds onto the text of every
//! file it has loaded, so diagnostics can quote source lines and the
//! position subsystem can answer line/column queries.
//!
//! The core only ever reads through this; nothing here mutates file text.

use crate::position::{LineIndex, Span};
use rustc_hash::FxHashMap;
use std::sync::Arc;

struct FileEntry {
    text: Arc<str>,
    index: LineIndex,
}

#[derive(Default)]
pub struct SourceMap {
    files: FxHashMap<Arc<str>, FileEntry>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, filename: impl Into<Arc<str>>, text: impl Into<Arc<str>>) {
        let filename = filename.into();
        let text: Arc<str> = text.into();
        let index = LineIndex::build(&text);
        self.files.insert(filename, FileEntry { text, index });
    }

    pub fn has_file(&self, filename: &str) -> bool {
        self.files.contains_key(filename)
    }

    /// The full text of a span, or `""` if the file isn't known or the span
    /// falls outside its bounds.
    pub fn span_text(&self, span: &Span) -> &str {
        let Some(entry) = self.files.get(span.filename().as_ref()) else {
            return "";
        };
        let start = (span.start.offset as usize).min(entry.text.len());
        let end = (span.end.offset as usize).min(entry.text.len()).max(start);
        entry.text.get(start..end).unwrap_or("")
    }

    /// The full text of the line containing `offset` within `filename`.
    pub fn line_text(&self, filename: &str, line: u32) -> &str {
        let Some(entry) = self.files.get(filename) else {
            return "";
        };
        let Some(start) = entry.index.line_start(line) else {
            return "";
        };
        let end = entry.index.line_end(line, &entry.text);
        entry
            .text
            .get(start as usize..(end as usize).max(start as usize))
            .unwrap_or("")
            .trim_end_matches(['\n', '\r'])
    }

    pub fn line_column(&self, filename: &str, offset: u32) -> Option<(u32, u32)> {
        let entry = self.files.get(filename)?;
        Some(entry.index.line_column(offset, &entry.text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    #[test]
    fn span_text_extracts_slice() {
        let mut sm = SourceMap::new();
        sm.add_file("a.tu", "fn main() {}\n");
        let span = Span::new(
            Position::new("a.tu", 1, 1, 0),
            Position::new("a.tu", 1, 3, 2),
        );
        assert_eq!(sm.span_text(&span), "fn");
    }

    #[test]
    fn line_text_trims_newline() {
        let mut sm = SourceMap::new();
        sm.add_file("a.tu", "first\nsecond\n");
        assert_eq!(sm.line_text("a.tu", 2), "second");
    }

    #[test]
    fn unknown_file_returns_empty() {
        let sm = SourceMap::new();
        assert_eq!(sm.line_text("missing.tu", 1), "");
    }
}
