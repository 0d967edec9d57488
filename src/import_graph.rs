//! Per-scope import tracking and resolved source-file cache (spec §4.6).

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::filetree::FileTree;
use crate::resolvers::ModulePathResolver;
use crate::symbol::{Definition, DefinitionKind, ImportKind};
use crate::types::{ScopeId, SymbolId};

#[derive(Debug, Default)]
pub struct ImportGraph {
    by_scope: IndexMap<ScopeId, Vec<SymbolId>>,
    resolved_paths: IndexMap<SymbolId, PathBuf>,
    /// `import * as ns` targets — the file `ns` points to (spec §4.6).
    namespace_sources: IndexMap<SymbolId, PathBuf>,
    by_file: IndexMap<PathBuf, Vec<SymbolId>>,
}

impl ImportGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute every import's resolved source file for `file`, using
    /// `resolver` to map each import's specifier against `tree`.
    pub fn update_file(
        &mut self,
        file: PathBuf,
        defs: &[Definition],
        resolver: &dyn ModulePathResolver,
        tree: &FileTree,
    ) {
        self.remove_file(&file);

        let mut ids = Vec::new();
        for def in defs {
            if def.kind != DefinitionKind::Import {
                continue;
            }
            let Some(import) = &def.import else { continue };

            let resolved = resolver.resolve(&import.import_path, &file, tree);
            self.by_scope
                .entry(def.defining_scope_id)
                .or_default()
                .push(def.id);
            self.resolved_paths.insert(def.id, resolved.clone());
            if import.import_kind == ImportKind::Namespace {
                self.namespace_sources.insert(def.id, resolved);
            }
            ids.push(def.id);
        }
        self.by_file.insert(file, ids);
    }

    pub fn remove_file(&mut self, file: &Path) {
        let Some(ids) = self.by_file.shift_remove(file) else {
            return;
        };
        for id in ids {
            self.resolved_paths.shift_remove(&id);
            self.namespace_sources.shift_remove(&id);
            for scope_ids in self.by_scope.values_mut() {
                scope_ids.retain(|sid| *sid != id);
            }
        }
        self.by_scope.retain(|_, ids| !ids.is_empty());
    }

    pub fn get_scope_imports(&self, scope_id: ScopeId) -> &[SymbolId] {
        self.by_scope
            .get(&scope_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn get_resolved_import_path(&self, import_symbol_id: SymbolId) -> Option<&Path> {
        self.resolved_paths.get(&import_symbol_id).map(PathBuf::as_path)
    }

    pub fn get_namespace_source(&self, import_symbol_id: SymbolId) -> Option<&Path> {
        self.namespace_sources
            .get(&import_symbol_id)
            .map(PathBuf::as_path)
    }
}
