//! The per-file input the coordinator ingests (spec §6 "Input surface").
//!
//! `SemanticIndex` is produced upstream by a parser/extractor this crate
//! does not implement — "the crate consumes `SemanticIndex` values, it does
//! not produce them" (SPEC_FULL Non-goals). It is a plain data bag; all of
//! the interesting behavior lives in how the coordinator distributes its
//! fields across the registries.

use indexmap::IndexMap;

use crate::reference::CallReference;
use crate::scope::LexicalScope;
use crate::symbol::{Definition, TypeMembers};
use crate::types::{Language, LocationKey, ScopeId, SymbolId};

#[derive(Debug, Clone)]
pub struct SemanticIndex {
    pub language: Language,
    pub root_scope_id: ScopeId,
    pub scopes: Vec<LexicalScope>,
    pub definitions: Vec<Definition>,
    pub references: Vec<CallReference>,
    /// Explicit/inferred type bindings keyed by source location (spec §4.7).
    pub type_bindings: IndexMap<LocationKey, SymbolId>,
    /// Member maps for this file's type-like definitions, keyed by the
    /// type's own `SymbolId` (spec §4.7).
    pub type_members: IndexMap<SymbolId, TypeMembers>,
    /// Module specifiers from this file's `export * from "..."` statements
    /// (SPEC_FULL §A.8). These bind no name of their own, so they cannot be
    /// represented as a `Definition` the way named/default exports are.
    pub export_all_specifiers: Vec<String>,
}

impl SemanticIndex {
    pub fn new(language: Language, root_scope_id: ScopeId) -> Self {
        Self {
            language,
            root_scope_id,
            scopes: Vec::new(),
            definitions: Vec::new(),
            references: Vec::new(),
            type_bindings: IndexMap::new(),
            type_members: IndexMap::new(),
            export_all_specifiers: Vec::new(),
        }
    }

    pub fn with_scopes(mut self, scopes: Vec<LexicalScope>) -> Self {
        self.scopes = scopes;
        self
    }

    pub fn with_definitions(mut self, definitions: Vec<Definition>) -> Self {
        self.definitions = definitions;
        self
    }

    pub fn with_references(mut self, references: Vec<CallReference>) -> Self {
        self.references = references;
        self
    }

    pub fn with_type_bindings(mut self, bindings: IndexMap<LocationKey, SymbolId>) -> Self {
        self.type_bindings = bindings;
        self
    }

    pub fn with_type_members(mut self, members: IndexMap<SymbolId, TypeMembers>) -> Self {
        self.type_members = members;
        self
    }

    pub fn with_export_all_specifiers(mut self, specifiers: Vec<String>) -> Self {
        self.export_all_specifiers = specifiers;
        self
    }
}
