//! Hand-built HIR and a canned [`HirParser`] for tests across the sema
//! crates. Nothing here is a real lexer/parser — it just lets unit tests
//! exercise the core without one.

use crate::ast::{Block, Declaration, Export, HirModule, Import};
use crate::ids::NodeIdGenerator;
use crate::parser::{HirParser, ParseError};
use rustc_hash::FxHashMap;
use sema_common::Span;
use std::sync::Mutex;

pub fn dummy_span(filename: &str) -> Span {
    Span::synthetic(filename)
}

pub fn empty_block(node_ids: &NodeIdGenerator, filename: &str) -> Block {
    Block {
        id: node_ids.alloc(),
        stmts: Vec::new(),
        tail: None,
        span: dummy_span(filename),
    }
}

pub fn module(
    path: &str,
    imports: Vec<Import>,
    exports: Vec<Export>,
    declarations: Vec<Declaration>,
) -> HirModule {
    HirModule {
        path: path.to_string(),
        imports,
        exports,
        declarations: smallvec::SmallVec::from_vec(declarations),
        span: dummy_span(path),
    }
}

pub fn import(path: &str, filename: &str, node_ids: &NodeIdGenerator) -> Import {
    Import {
        id: node_ids.alloc(),
        path: path.to_string(),
        alias: None,
        items: None,
        span: dummy_span(filename),
    }
}

/// A parser stand-in backed by a fixed map of module path to pre-built HIR,
/// used by loader/resolver tests that need `resolve_modules` without real
/// files on disk.
#[derive(Default)]
pub struct FixtureParser {
    modules: Mutex<FxHashMap<String, HirModule>>,
}

impl FixtureParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module(self, path: impl Into<String>, module: HirModule) -> Self {
        self.modules.lock().unwrap().insert(path.into(), module);
        self
    }
}

impl HirParser for FixtureParser {
    fn parse_module(
        &self,
        path: &str,
        _source: &str,
        _node_ids: &NodeIdGenerator,
    ) -> Result<HirModule, ParseError> {
        self.modules
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| ParseError {
                message: format!("no fixture registered for module `{path}`"),
                span: None,
            })
    }
}
