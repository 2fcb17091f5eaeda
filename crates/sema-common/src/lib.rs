//! Foundational types shared by every crate in the sema compiler middle-end:
//! positions and spans, the diagnostic sink, run configuration, centralized
//! limits, and the monotonic id scheme used for HIR nodes, modules, scopes
//! and symbols.

pub mod config;
pub mod diagnostics;
pub mod ids;
pub mod limits;
pub mod position;
pub mod source_map;

pub use config::CoreOptions;
pub use diagnostics::{Category, Diagnostic, DiagnosticSink, Level, RelatedInfo, Suggestion, TextEdit};
pub use ids::{Id, IdGenerator};
pub use position::{LineIndex, Position, Span, Spanned};
pub use source_map::SourceMap;
