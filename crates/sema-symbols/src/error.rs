use crate::ids::ScopeId;
use sema_common::{Category, Diagnostic, Level, Span};

#[derive(Debug, Clone)]
pub enum SymbolError {
    DuplicateSymbol {
        name: String,
        previous_span: Span,
        redefinition_span: Span,
    },
    CircularImport {
        chain: Vec<String>,
        span: Span,
    },
    UnknownScope {
        scope_id: ScopeId,
    },
}

impl SymbolError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            SymbolError::DuplicateSymbol {
                name,
                previous_span,
                redefinition_span,
            } => Diagnostic::new(
                Level::Error,
                Category::Semantic,
                "E1201",
                "duplicate symbol",
                format!("symbol `{name}` is already defined in this scope"),
                redefinition_span.clone(),
            )
            .with_related(previous_span.clone(), format!("`{name}` first defined here")),
            SymbolError::CircularImport { chain, span } => Diagnostic::new(
                Level::Error,
                Category::Semantic,
                "E1202",
                "circular import",
                format!("circular import chain: {}", chain.join(" -> ")),
                span.clone(),
            ),
            SymbolError::UnknownScope { scope_id } => Diagnostic::new(
                Level::Error,
                Category::Semantic,
                "E1203",
                "unknown scope",
                format!("scope {scope_id:?} does not exist"),
                Span::synthetic("<scope>"),
            ),
        }
    }
}

impl std::fmt::Display for SymbolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolError::DuplicateSymbol { name, .. } => {
                write!(f, "duplicate symbol `{name}`")
            }
            SymbolError::CircularImport { chain, .. } => {
                write!(f, "circular import: {}", chain.join(" -> "))
            }
            SymbolError::UnknownScope { scope_id } => write!(f, "unknown scope {scope_id:?}"),
        }
    }
}

impl std::error::Error for SymbolError {}
