//! Declared/inferred type bindings and per-type member maps (spec §4.7).
//!
//! Two indices over the same conceptual data: `location_types` answers "what
//! type is bound at this source span" (the form the semantic index supplies
//! type bindings in), `symbol_types` answers "what type is bound to this
//! symbol" (what method-chain propagation needs at O(1) per hop). The
//! coordinator populates both from the same ingestion pass — spec §9 treats
//! the storage shape as an implementation choice as long as the semantics
//! match.

use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};

use crate::definition_registry::DefinitionRegistry;
use crate::symbol::TypeMembers;
use crate::types::{LocationKey, SymbolId};

#[derive(Debug, Default)]
pub struct TypeRegistry {
    location_types: IndexMap<LocationKey, SymbolId>,
    symbol_types: IndexMap<SymbolId, SymbolId>,
    members: IndexMap<SymbolId, TypeMembers>,
    by_file: IndexMap<PathBuf, (Vec<LocationKey>, Vec<SymbolId>)>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest the per-file type bindings and member maps supplied by the
    /// semantic index (spec §4.7 "Inputs it consumes").
    pub fn update_file(
        &mut self,
        file: PathBuf,
        location_types: IndexMap<LocationKey, SymbolId>,
        members: IndexMap<SymbolId, TypeMembers>,
    ) {
        self.remove_file(&file);

        let keys: Vec<LocationKey> = location_types.keys().cloned().collect();
        let member_ids: Vec<SymbolId> = members.keys().copied().collect();

        self.location_types.extend(location_types);
        self.members.extend(members);
        self.by_file.insert(file, (keys, member_ids));
    }

    pub fn remove_file(&mut self, file: &Path) {
        let Some((keys, member_ids)) = self.by_file.shift_remove(file) else {
            return;
        };
        for key in keys {
            self.location_types.shift_remove(&key);
        }
        for id in member_ids {
            self.members.shift_remove(&id);
        }
    }

    /// Record an inferred binding at a call/expression site — `let x = new
    /// T(args)`, a callable's known return type, `self`/`this` resolved to
    /// the enclosing class, or `super(...)` resolved to the nearest base.
    pub fn bind_location(&mut self, location: LocationKey, type_id: SymbolId) {
        self.location_types.insert(location, type_id);
    }

    /// Record the declared/inferred type of a symbol directly — used for
    /// the `self`/`cls`/`this`/`super` bindings in spec §4.7, which bind a
    /// pseudo-symbol to a type with no declaration site of their own, so
    /// they cannot go through [`Self::get_type_at_location`].
    pub fn bind_symbol_type(&mut self, symbol_id: SymbolId, type_id: SymbolId) {
        self.symbol_types.insert(symbol_id, type_id);
    }

    pub fn get_type_at_location(&self, location: &LocationKey) -> Option<SymbolId> {
        self.location_types.get(location).copied()
    }

    pub fn get_symbol_type(&self, symbol_id: SymbolId) -> Option<SymbolId> {
        self.symbol_types.get(&symbol_id).copied()
    }

    pub fn get_members(&self, type_id: SymbolId) -> Option<&TypeMembers> {
        self.members.get(&type_id)
    }

    /// Look up a method on `type_id`, walking `extends[]` when not found
    /// directly (spec §4.8 "walking `extends[]` if needed").
    pub fn resolve_method(&self, type_id: SymbolId, name: &str) -> Option<SymbolId> {
        self.resolve_member(type_id, name, |members| &members.methods)
    }

    /// Look up a property on `type_id`, walking `extends[]` when not found
    /// directly.
    pub fn resolve_property(&self, type_id: SymbolId, name: &str) -> Option<SymbolId> {
        self.resolve_member(type_id, name, |members| &members.properties)
    }

    fn resolve_member(
        &self,
        type_id: SymbolId,
        name: &str,
        pick: impl Fn(&TypeMembers) -> &IndexMap<String, SymbolId>,
    ) -> Option<SymbolId> {
        let mut visited = IndexSet::new();
        let mut current = type_id;
        loop {
            if !visited.insert(current) {
                return None;
            }
            let members = self.members.get(&current)?;
            if let Some(id) = pick(members).get(name) {
                return Some(*id);
            }
            current = *members.extends.first()?;
        }
    }

    /// The type bound to `symbol_id`: an explicit [`Self::bind_symbol_type`]
    /// binding if one exists, else whatever is bound at that symbol's own
    /// definition site. Most symbols (variables, properties) only ever go
    /// through the second path — `bind_symbol_type` exists for pseudo-symbols
    /// like `self` that have no declaration location of their own.
    pub fn type_of_symbol(&self, symbol_id: SymbolId, definitions: &DefinitionRegistry) -> Option<SymbolId> {
        if let Some(type_id) = self.symbol_types.get(&symbol_id) {
            return Some(*type_id);
        }
        let location = &definitions.get_by_id(symbol_id)?.location;
        self.get_type_at_location(&location.key())
    }

    /// Walk a property chain from `start_symbol`'s declared type, per spec
    /// §4.8 phase-2 "Method call": advance the current type one property at
    /// a time, and resolve the final segment as a method (falling back to a
    /// property) on the last type reached.
    pub fn resolve_member_chain(
        &self,
        start_symbol: SymbolId,
        chain: &[String],
        definitions: &DefinitionRegistry,
    ) -> Option<SymbolId> {
        let Some((last, head)) = chain.split_last() else {
            return None;
        };

        let mut current_type = self.type_of_symbol(start_symbol, definitions)?;
        for segment in head {
            let property_id = self.resolve_property(current_type, segment)?;
            current_type = self.type_of_symbol(property_id, definitions)?;
        }

        self.resolve_method(current_type, last)
            .or_else(|| self.resolve_property(current_type, last))
    }
}
