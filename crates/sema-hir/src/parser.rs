//! The boundary to the upstream parser.
//!
//! Lexing, parsing, and HIR construction from source bytes are explicitly
//! out of scope for the middle-end (see the specification's scope section);
//! this module only names the interface the core consumes.

use crate::ast::HirModule;
use crate::ids::NodeIdGenerator;
use sema_common::Span;

#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub span: Option<Span>,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
impl std::error::Error for ParseError {}

/// Implemented by whatever produces HIR from source text. The core is
/// generic over this so it never depends on a concrete lexer/parser crate.
pub trait HirParser {
    /// Parses one module's source bytes into HIR, allocating node ids from
    /// `node_ids` so ids stay unique across every module parsed with the
    /// same generator.
    fn parse_module(
        &self,
        path: &str,
        source: &str,
        node_ids: &NodeIdGenerator,
    ) -> Result<HirModule, ParseError>;
}
