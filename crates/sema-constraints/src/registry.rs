//! Index of trait declarations by name, built once from loaded modules.
//!
//! Projection resolution and where-clause validation both need to look up
//! "does this trait declare an associated type/method named X", which is
//! exactly the shape [`sema_traits::TraitResolver`] builds for impls; traits
//! themselves aren't indexed there; so this crate keeps its own copy.

use rustc_hash::FxHashMap;
use sema_hir::{Declaration, TraitDecl};
use sema_loader::Module;

pub struct TraitRegistry {
    traits: FxHashMap<String, TraitDecl>,
}

impl TraitRegistry {
    pub fn build(modules: &FxHashMap<String, Module>) -> Self {
        let mut traits = FxHashMap::default();
        let mut paths: Vec<&String> = modules.keys().collect();
        paths.sort();
        for path in paths {
            let Some(hir) = &modules[path].hir else { continue };
            for decl in &hir.declarations {
                if let Declaration::Trait(trait_decl) = decl {
                    traits.insert(trait_decl.name.clone(), trait_decl.clone());
                }
            }
        }
        Self { traits }
    }

    pub fn get(&self, name: &str) -> Option<&TraitDecl> {
        self.traits.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.traits.contains_key(name)
    }
}
