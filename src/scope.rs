//! Lexical scope trees (spec §4.4).
//!
//! Each file owns exactly one scope tree rooted at a `Module` scope. The
//! `ScopeRegistry` is the sole authority on lexical ancestry — "no
//! definitions are consulted to determine 'scope containment'" (spec §4.4).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::{FileId, Location, ScopeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScopeKind {
    Module,
    Function,
    Class,
    Block,
}

impl ScopeKind {
    /// Whether a call site inside this scope can be attributed to it as a
    /// "caller scope" for the call graph (spec GLOSSARY, "Caller Scope").
    ///
    /// Spec §4.4 names "function/method/constructor" as caller-eligible;
    /// this crate represents methods and constructors as `Function` scopes
    /// (the distinction between a free function, a method and a constructor
    /// is a property of the `Definition` that owns the scope, not of the
    /// scope kind itself).
    pub fn is_call_attributable(&self) -> bool {
        matches!(self, ScopeKind::Function)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexicalScope {
    pub id: ScopeId,
    pub kind: ScopeKind,
    pub file_id: FileId,
    pub parent_id: Option<ScopeId>,
    pub child_ids: Vec<ScopeId>,
    pub name: Option<String>,
    pub location: Location,
}

impl LexicalScope {
    pub fn new(
        id: ScopeId,
        kind: ScopeKind,
        file_id: FileId,
        parent_id: Option<ScopeId>,
        location: Location,
    ) -> Self {
        Self {
            id,
            kind,
            file_id,
            parent_id,
            child_ids: Vec::new(),
            name: None,
            location,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Holds every file's scope tree. Mutated only by the coordinator during
/// file ingestion/removal (spec §3 "Lifecycles").
#[derive(Debug, Default)]
pub struct ScopeRegistry {
    scopes: IndexMap<ScopeId, LexicalScope>,
    file_roots: IndexMap<FileId, ScopeId>,
    file_scopes: IndexMap<FileId, Vec<ScopeId>>,
}

impl ScopeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert every scope belonging to one file's tree. The first scope
    /// with `parent_id: None` becomes that file's root.
    pub fn update_file(&mut self, file_id: FileId, scopes: Vec<LexicalScope>) {
        self.remove_file(file_id);

        let mut ids = Vec::with_capacity(scopes.len());
        for scope in scopes {
            if scope.parent_id.is_none() {
                self.file_roots.insert(file_id, scope.id);
            }
            ids.push(scope.id);
            self.scopes.insert(scope.id, scope);
        }
        self.file_scopes.insert(file_id, ids);
    }

    pub fn remove_file(&mut self, file_id: FileId) {
        if let Some(ids) = self.file_scopes.shift_remove(&file_id) {
            for id in ids {
                self.scopes.shift_remove(&id);
            }
        }
        self.file_roots.shift_remove(&file_id);
    }

    pub fn get_scope(&self, id: ScopeId) -> Option<&LexicalScope> {
        self.scopes.get(&id)
    }

    pub fn get_file_root_scope(&self, file_id: FileId) -> Option<ScopeId> {
        self.file_roots.get(&file_id).copied()
    }

    pub fn get_file_scopes(&self, file_id: FileId) -> &[ScopeId] {
        self.file_scopes
            .get(&file_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn get_all_scopes(&self) -> impl Iterator<Item = &LexicalScope> {
        self.scopes.values()
    }

    /// Walk from `scope_id` up to (and including) the module root.
    pub fn ancestors(&self, scope_id: ScopeId) -> Vec<ScopeId> {
        let mut chain = Vec::new();
        let mut current = Some(scope_id);
        while let Some(id) = current {
            chain.push(id);
            current = self.scopes.get(&id).and_then(|s| s.parent_id);
        }
        chain
    }

    /// The nearest enclosing scope whose kind is call-attributable — the
    /// scope a call reference's `caller_scope_id` should point at (spec
    /// §4.4, §4.8 "enriched with `caller_scope_id`").
    pub fn find_enclosing_function_scope(&self, scope_id: ScopeId) -> Option<ScopeId> {
        let mut current = Some(scope_id);
        while let Some(id) = current {
            let scope = self.scopes.get(&id)?;
            if scope.kind.is_call_attributable() {
                return Some(id);
            }
            current = scope.parent_id;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> Location {
        Location::new("a.js", 1, 0, 10, 0)
    }

    fn scope(id: u32, kind: ScopeKind, parent: Option<u32>) -> LexicalScope {
        LexicalScope::new(
            ScopeId::new(id).unwrap(),
            kind,
            FileId::new(1).unwrap(),
            parent.map(|p| ScopeId::new(p).unwrap()),
            loc(),
        )
    }

    #[test]
    fn root_scope_is_the_parentless_one() {
        let mut reg = ScopeRegistry::new();
        let file = FileId::new(1).unwrap();
        reg.update_file(
            file,
            vec![
                scope(1, ScopeKind::Module, None),
                scope(2, ScopeKind::Function, Some(1)),
            ],
        );
        assert_eq!(
            reg.get_file_root_scope(file),
            Some(ScopeId::new(1).unwrap())
        );
    }

    #[test]
    fn find_enclosing_function_scope_skips_blocks() {
        let mut reg = ScopeRegistry::new();
        let file = FileId::new(1).unwrap();
        reg.update_file(
            file,
            vec![
                scope(1, ScopeKind::Module, None),
                scope(2, ScopeKind::Function, Some(1)),
                scope(3, ScopeKind::Block, Some(2)),
            ],
        );
        let enclosing = reg.find_enclosing_function_scope(ScopeId::new(3).unwrap());
        assert_eq!(enclosing, Some(ScopeId::new(2).unwrap()));
    }

    #[test]
    fn find_enclosing_function_scope_none_at_module_level() {
        let mut reg = ScopeRegistry::new();
        let file = FileId::new(1).unwrap();
        reg.update_file(file, vec![scope(1, ScopeKind::Module, None)]);
        assert_eq!(
            reg.find_enclosing_function_scope(ScopeId::new(1).unwrap()),
            None
        );
    }

    #[test]
    fn remove_file_drops_its_scopes() {
        let mut reg = ScopeRegistry::new();
        let file = FileId::new(1).unwrap();
        reg.update_file(file, vec![scope(1, ScopeKind::Module, None)]);
        reg.remove_file(file);
        assert!(reg.get_scope(ScopeId::new(1).unwrap()).is_none());
        assert!(reg.get_file_root_scope(file).is_none());
    }

    #[test]
    fn ancestors_walks_to_root() {
        let mut reg = ScopeRegistry::new();
        let file = FileId::new(1).unwrap();
        reg.update_file(
            file,
            vec![
                scope(1, ScopeKind::Module, None),
                scope(2, ScopeKind::Function, Some(1)),
                scope(3, ScopeKind::Block, Some(2)),
            ],
        );
        let chain = reg.ancestors(ScopeId::new(3).unwrap());
        assert_eq!(
            chain,
            vec![
                ScopeId::new(3).unwrap(),
                ScopeId::new(2).unwrap(),
                ScopeId::new(1).unwrap(),
            ]
        );
    }
}
