use sema_common::{Category, Diagnostic, Level, Span};
use sema_hir::ParseError;

#[derive(Debug, Clone)]
pub enum LoaderError {
    ModuleNotFound {
        path: String,
        search_paths: Vec<String>,
    },
    ParseFailure {
        path: String,
        inner: String,
    },
    CircularImport {
        cycle: Vec<String>,
    },
    VersionConflict {
        path: String,
        required: String,
        found: String,
    },
}

impl LoaderError {
    pub fn to_diagnostic(&self, span: Span) -> Diagnostic {
        match self {
            LoaderError::ModuleNotFound { path, search_paths } => Diagnostic::new(
                Level::Error,
                Category::Semantic,
                "E1101",
                "module not found",
                format!(
                    "could not resolve module `{path}` in search paths [{}]",
                    search_paths.join(", ")
                ),
                span,
            ),
            LoaderError::ParseFailure { path, inner } => Diagnostic::new(
                Level::Error,
                Category::Syntax,
                "E1102",
                "parse failure",
                format!("failed to parse module `{path}`: {inner}"),
                span,
            ),
            LoaderError::CircularImport { cycle } => Diagnostic::new(
                Level::Error,
                Category::Semantic,
                "E1103",
                "circular import",
                format!("circular dependency: {}", cycle.join(" -> ")),
                span,
            ),
            LoaderError::VersionConflict {
                path,
                required,
                found,
            } => Diagnostic::new(
                Level::Error,
                Category::Semantic,
                "E1104",
                "version conflict",
                format!(
                    "module `{path}` requires version `{required}` but found `{found}`"
                ),
                span,
            ),
        }
    }
}

impl From<&ParseError> for LoaderError {
    fn from(e: &ParseError) -> Self {
        LoaderError::ParseFailure {
            path: String::new(),
            inner: e.message.clone(),
        }
    }
}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoaderError::ModuleNotFound { path, .. } => write!(f, "module not found: {path}"),
            LoaderError::ParseFailure { path, inner } => {
                write!(f, "parse failure in {path}: {inner}")
            }
            LoaderError::CircularImport { cycle } => {
                write!(f, "circular import: {}", cycle.join(" -> "))
            }
            LoaderError::VersionConflict {
                path,
                required,
                found,
            } => write!(f, "version conflict for {path}: want {required}, got {found}"),
        }
    }
}
impl std::error::Error for LoaderError {}
