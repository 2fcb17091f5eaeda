//! Library surface behind the `sema` binary: a [`HirParser`] that ingests
//! pre-parsed HIR as JSON (lexing and parsing source text is an upstream
//! collaborator's job, see [`sema_hir::parser`]) and a plain-text diagnostic
//! reporter.

pub mod args;
pub mod reporter;

use sema_hir::{HirModule, HirParser, NodeIdGenerator, ParseError};

/// Deserializes each module's HIR from a JSON document rather than lexing
/// source text. The ids embedded in the JSON are trusted to already be
/// unique across the whole program, the same way [`sema_hir::fixtures::FixtureParser`]
/// trusts its pre-built fixtures; `node_ids` is accepted only to satisfy the
/// [`HirParser`] interface.
#[derive(Default)]
pub struct JsonHirParser;

impl JsonHirParser {
    pub fn new() -> Self {
        Self
    }
}

impl HirParser for JsonHirParser {
    fn parse_module(
        &self,
        path: &str,
        source: &str,
        _node_ids: &NodeIdGenerator,
    ) -> Result<HirModule, ParseError> {
        serde_json::from_str::<HirModule>(source).map_err(|e| ParseError {
            message: format!("failed to parse HIR for module `{path}`: {e}"),
            span: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_json_with_a_parse_error() {
        let parser = JsonHirParser::new();
        let ids = NodeIdGenerator::new();
        let err = parser.parse_module("Main", "not json", &ids).unwrap_err();
        assert!(err.message.contains("Main"));
    }

    #[test]
    fn parses_a_minimal_module() {
        let hir = sema_hir::fixtures::module("Main", vec![], vec![], vec![]);
        let json = serde_json::to_string(&hir).unwrap();
        let parser = JsonHirParser::new();
        let ids = NodeIdGenerator::new();
        let parsed = parser.parse_module("Main", &json, &ids).unwrap();
        assert_eq!(parsed.path, "Main");
    }
}
