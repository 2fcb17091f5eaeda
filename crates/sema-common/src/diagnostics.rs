//! Structured diagnostics and the sink that collects, filters, and sorts them.
//!
//! The core never unwinds on error (see the design notes on control flow);
//! every fallible pass appends to a [`DiagnosticSink`] instead and keeps
//! going with a best-effort placeholder.

use crate::position::Span;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Hint,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Syntax,
    Type,
    Semantic,
    Performance,
    Style,
    Security,
}

/// A single proposed text replacement, e.g. "insert `mut` at column 5".
#[derive(Debug, Clone)]
pub struct TextEdit {
    pub span: Span,
    pub new_text: String,
}

#[derive(Debug, Clone)]
pub struct Suggestion {
    pub title: String,
    pub description: String,
    pub edits: Vec<TextEdit>,
}

#[derive(Debug, Clone)]
pub struct RelatedInfo {
    pub span: Span,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub level: Level,
    pub category: Category,
    /// e.g. `"E1001"` or `"W4001"` — the letter tracks the level at the
    /// point the diagnostic was created, not its post-filter level.
    pub code: String,
    pub title: String,
    pub message: String,
    pub span: Span,
    pub suggestions: Vec<Suggestion>,
    pub related_info: Vec<RelatedInfo>,
    pub tags: Vec<String>,
}

impl Diagnostic {
    pub fn new(
        level: Level,
        category: Category,
        code: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            level,
            category,
            code: code.into(),
            title: title.into(),
            message: message.into(),
            span,
            suggestions: Vec::new(),
            related_info: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn error(
        code: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self::new(Level::Error, Category::Semantic, code, title, message, span)
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_related(mut self, span: Span, message: impl Into<String>) -> Self {
        self.related_info.push(RelatedInfo {
            span,
            message: message.into(),
        });
        self
    }

    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

fn sort_key(d: &Diagnostic) -> (std::sync::Arc<str>, u32, u32, Ordering) {
    // Sorted by file, then line, then column, then severity (most severe
    // first within the same location) per the §4.7 contract.
    (
        d.span.filename().clone(),
        d.span.start.line,
        d.span.start.column,
        Ordering::Equal,
    )
}

/// Collects diagnostics, applying the configured filtering policy and
/// bounding the number of reported errors.
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
    ignore_categories: Vec<Category>,
    ignore_codes: Vec<String>,
    warnings_as_errors: bool,
    max_errors: usize,
    error_count: usize,
    too_many_errors_reported: bool,
}

impl DiagnosticSink {
    pub fn new(
        ignore_categories: Vec<Category>,
        ignore_codes: Vec<String>,
        warnings_as_errors: bool,
        max_errors: usize,
    ) -> Self {
        Self {
            diagnostics: Vec::new(),
            ignore_categories,
            ignore_codes,
            warnings_as_errors,
            max_errors: max_errors.max(1),
            error_count: 0,
            too_many_errors_reported: false,
        }
    }

    pub fn add(&mut self, mut diagnostic: Diagnostic) {
        if self.ignore_categories.contains(&diagnostic.category) {
            return;
        }
        if self.ignore_codes.iter().any(|c| c == &diagnostic.code) {
            return;
        }
        if self.warnings_as_errors && diagnostic.level == Level::Warning {
            diagnostic.level = Level::Error;
        }

        if diagnostic.level == Level::Error {
            if self.too_many_errors_reported {
                return;
            }
            if self.error_count >= self.max_errors {
                self.too_many_errors_reported = true;
                self.diagnostics.push(Diagnostic::error(
                    "E0000",
                    "too many errors",
                    format!("stopped after {} errors", self.max_errors),
                    diagnostic.span.clone(),
                ));
                return;
            }
            self.error_count += 1;
        }

        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0 || self.too_many_errors_reported
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Finalizes the sink, returning diagnostics sorted by
    /// file → line → column → severity (errors before warnings, etc.).
    pub fn into_sorted(mut self) -> Vec<Diagnostic> {
        self.diagnostics.sort_by(|a, b| {
            let ka = sort_key(a);
            let kb = sort_key(b);
            ka.0.cmp(&kb.0)
                .then(ka.1.cmp(&kb.1))
                .then(ka.2.cmp(&kb.2))
                .then(b.level.cmp(&a.level))
        });
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    fn span(line: u32, col: u32) -> Span {
        let p = Position::new("a.tu", line, col, 0);
        Span::new(p.clone(), p)
    }

    #[test]
    fn ignored_category_is_dropped() {
        let mut sink = DiagnosticSink::new(vec![Category::Style], vec![], false, 100);
        sink.add(Diagnostic::new(
            Level::Warning,
            Category::Style,
            "W9001",
            "t",
            "m",
            span(1, 1),
        ));
        assert!(sink.into_sorted().is_empty());
    }

    #[test]
    fn warnings_as_errors_promotes_level() {
        let mut sink = DiagnosticSink::new(vec![], vec![], true, 100);
        sink.add(Diagnostic::new(
            Level::Warning,
            Category::Semantic,
            "W1",
            "t",
            "m",
            span(1, 1),
        ));
        assert!(sink.has_errors());
    }

    #[test]
    fn max_errors_caps_reporting() {
        let mut sink = DiagnosticSink::new(vec![], vec![], false, 2);
        for i in 0..5 {
            sink.add(Diagnostic::error("E1", "t", "m", span(1, i + 1)));
        }
        let diags = sink.into_sorted();
        assert_eq!(diags.iter().filter(|d| d.code == "E1").count(), 2);
        assert!(diags.iter().any(|d| d.code == "E0000"));
    }

    #[test]
    fn sorted_by_location_then_severity() {
        let mut sink = DiagnosticSink::new(vec![], vec![], false, 100);
        sink.add(Diagnostic::new(
            Level::Warning,
            Category::Semantic,
            "W1",
            "t",
            "m",
            span(2, 1),
        ));
        sink.add(Diagnostic::error("E1", "t", "m", span(1, 5)));
        sink.add(Diagnostic::error("E2", "t", "m", span(1, 1)));
        let diags = sink.into_sorted();
        assert_eq!(diags[0].code, "E2");
        assert_eq!(diags[1].code, "E1");
        assert_eq!(diags[2].code, "W1");
    }
}
