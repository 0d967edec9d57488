//! Index of all symbol definitions, by id, by file, and by scope (spec §4.3).

use indexmap::{IndexMap, IndexSet};

use crate::symbol::Definition;
use crate::types::{FileId, ScopeId, SymbolId};

#[derive(Debug, Default)]
pub struct DefinitionRegistry {
    by_id: IndexMap<SymbolId, Definition>,
    by_file: IndexMap<FileId, IndexSet<SymbolId>>,
    by_scope: IndexMap<ScopeId, IndexSet<SymbolId>>,
}

impl DefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every definition belonging to `file_id`.
    pub fn update_file(&mut self, file_id: FileId, defs: Vec<Definition>) {
        self.remove_file(file_id);

        let mut file_ids = IndexSet::new();
        for def in defs {
            file_ids.insert(def.id);
            self.by_scope
                .entry(def.defining_scope_id)
                .or_default()
                .insert(def.id);
            self.by_id.insert(def.id, def);
        }
        self.by_file.insert(file_id, file_ids);
    }

    pub fn remove_file(&mut self, file_id: FileId) {
        let Some(ids) = self.by_file.shift_remove(&file_id) else {
            return;
        };
        for id in ids {
            if let Some(def) = self.by_id.shift_remove(&id) {
                if let Some(scope_defs) = self.by_scope.get_mut(&def.defining_scope_id) {
                    scope_defs.shift_remove(&id);
                    if scope_defs.is_empty() {
                        self.by_scope.shift_remove(&def.defining_scope_id);
                    }
                }
            }
        }
    }

    pub fn get_by_id(&self, id: SymbolId) -> Option<&Definition> {
        self.by_id.get(&id)
    }

    pub fn get_file_definitions(&self, file_id: FileId) -> Vec<&Definition> {
        self.by_file
            .get(&file_id)
            .into_iter()
            .flat_map(|ids| ids.iter())
            .filter_map(|id| self.by_id.get(id))
            .collect()
    }

    /// `Name → SymbolId` for every definition owned directly by this scope
    /// (not inherited from an ancestor — that is the Resolution Registry's
    /// job in spec §4.8). Later definitions with the same name shadow
    /// earlier ones within the scope, matching insertion order.
    pub fn get_scope_definitions(&self, scope_id: ScopeId) -> IndexMap<String, SymbolId> {
        let mut out = IndexMap::new();
        if let Some(ids) = self.by_scope.get(&scope_id) {
            for id in ids {
                if let Some(def) = self.by_id.get(id) {
                    out.insert(def.name.clone(), def.id);
                }
            }
        }
        out
    }

    pub fn all_definitions(&self) -> impl Iterator<Item = &Definition> {
        self.by_id.values()
    }
}
