use sema_common::{Category, Diagnostic, Level, Span};

#[derive(Debug, Clone)]
pub enum ResolveError {
    UndefinedSymbol { name: String, span: Span },
    AmbiguousSymbol { name: String, span: Span },
    VisibilityViolation { name: String, source_module: String, span: Span },
    InvalidImport { path: String, item: Option<String>, span: Span },
}

impl ResolveError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResolveError::UndefinedSymbol { name, span } => Diagnostic::new(
                Level::Error,
                Category::Semantic,
                "E1301",
                "undefined symbol",
                format!("cannot find `{name}` in this scope"),
                span.clone(),
            ),
            ResolveError::AmbiguousSymbol { name, span } => Diagnostic::new(
                Level::Error,
                Category::Semantic,
                "E1302",
                "ambiguous symbol",
                format!("`{name}` resolves to more than one candidate"),
                span.clone(),
            ),
            ResolveError::VisibilityViolation {
                name,
                source_module,
                span,
            } => Diagnostic::new(
                Level::Error,
                Category::Semantic,
                "E1303",
                "visibility violation",
                format!("`{name}` is private to module `{source_module}`"),
                span.clone(),
            ),
            ResolveError::InvalidImport { path, item, span } => Diagnostic::new(
                Level::Error,
                Category::Semantic,
                "E1304",
                "invalid import",
                match item {
                    Some(item) => format!("module `{path}` has no exported item `{item}`"),
                    None => format!("module `{path}` could not be imported"),
                },
                span.clone(),
            ),
        }
    }
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_diagnostic().message)
    }
}

impl std::error::Error for ResolveError {}
