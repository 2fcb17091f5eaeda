//! The single configuration struct threaded through every component.

use crate::diagnostics::Category;

#[derive(Debug, Clone)]
pub struct CoreOptions {
    pub strict_mode: bool,
    pub allow_shadowing: bool,
    pub case_sensitive: bool,
    pub ignore_categories: Vec<Category>,
    pub ignore_codes: Vec<String>,
    pub max_errors: usize,
    pub warnings_as_errors: bool,
    pub enable_performance: bool,
    pub enable_style: bool,
    pub enable_security: bool,
    pub search_paths: Vec<String>,
    /// File extensions tried, in order, when resolving a module path to a
    /// file on disk. Without the leading dot.
    pub extensions: Vec<String>,
}

impl Default for CoreOptions {
    fn default() -> Self {
        Self {
            strict_mode: false,
            allow_shadowing: true,
            case_sensitive: true,
            ignore_categories: Vec::new(),
            ignore_codes: Vec::new(),
            max_errors: 100,
            warnings_as_errors: false,
            enable_performance: false,
            enable_style: false,
            enable_security: false,
            search_paths: Vec::new(),
            extensions: vec!["src".to_string()],
        }
    }
}

impl CoreOptions {
    /// In strict mode, ambiguity warnings escalate to errors — mirrors how
    /// the diagnostic engine's `warnings_as_errors` flag works, but scoped
    /// to ambiguity diagnostics specifically.
    pub fn promote_ambiguity_to_error(&self) -> bool {
        self.strict_mode || self.warnings_as_errors
    }
}
