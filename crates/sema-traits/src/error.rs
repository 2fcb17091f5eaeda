use sema_common::{Category, Diagnostic, Level, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrowsViolationKind {
    ExtraException,
    MissingException,
    IncompatibleException,
    ConstraintViolation,
    NoThrowViolation,
    PurityViolation,
}

impl ThrowsViolationKind {
    fn describe(self) -> &'static str {
        match self {
            ThrowsViolationKind::ExtraException => "throws an exception type the trait does not declare",
            ThrowsViolationKind::MissingException => "does not throw an exception type the trait requires",
            ThrowsViolationKind::IncompatibleException => "throws an exception type incompatible with the trait's",
            ThrowsViolationKind::ConstraintViolation => "violates a throws constraint",
            ThrowsViolationKind::NoThrowViolation => "must be no-throw to satisfy the trait",
            ThrowsViolationKind::PurityViolation => "must be pure to satisfy the trait",
        }
    }
}

#[derive(Debug, Clone)]
pub enum TraitError {
    NoApplicableImpl {
        trait_name: Option<String>,
        target_type: String,
        span: Span,
    },
    AmbiguousImplementation {
        trait_name: Option<String>,
        target_type: String,
        candidate_modules: Vec<String>,
        span: Span,
    },
    ImplementationConflict {
        trait_name: String,
        missing_methods: Vec<String>,
        signature_mismatches: Vec<String>,
        span: Span,
    },
    ThrowsViolation {
        kind: ThrowsViolationKind,
        method: String,
        span: Span,
    },
}

impl TraitError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            TraitError::NoApplicableImpl { trait_name, target_type, span } => Diagnostic::new(
                Level::Error,
                Category::Semantic,
                "E1401",
                "no applicable implementation",
                match trait_name {
                    Some(tr) => format!("no implementation of `{tr}` applies to `{target_type}`"),
                    None => format!("no inherent implementation found for `{target_type}`"),
                },
                span.clone(),
            ),
            TraitError::AmbiguousImplementation {
                trait_name,
                target_type,
                candidate_modules,
                span,
            } => Diagnostic::new(
                Level::Error,
                Category::Semantic,
                "E1402",
                "ambiguous implementation",
                format!(
                    "multiple implementations of {} apply to `{target_type}` with equal priority: {}",
                    trait_name.as_deref().unwrap_or("<inherent>"),
                    candidate_modules.join(", ")
                ),
                span.clone(),
            ),
            TraitError::ImplementationConflict {
                trait_name,
                missing_methods,
                signature_mismatches,
                span,
            } => Diagnostic::new(
                Level::Error,
                Category::Semantic,
                "E1403",
                "implementation conflict",
                format!(
                    "implementation of `{trait_name}` is incomplete: missing [{}], mismatched [{}]",
                    missing_methods.join(", "),
                    signature_mismatches.join(", ")
                ),
                span.clone(),
            ),
            TraitError::ThrowsViolation { kind, method, span } => Diagnostic::new(
                Level::Error,
                Category::Semantic,
                "E1404",
                "throws violation",
                format!("method `{method}` {}", kind.describe()),
                span.clone(),
            ),
        }
    }
}

impl std::fmt::Display for TraitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_diagnostic().message)
    }
}

impl std::error::Error for TraitError {}
