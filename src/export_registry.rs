//! Per-file export maps and the export-chain walker (spec §4.5).

use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};

use crate::error::{ResolverError, Result};
use crate::filetree::FileTree;
use crate::resolvers::ModulePathResolver;
use crate::symbol::{Definition, ImportKind};
use crate::types::SymbolId;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum VisitedKey {
    Default(PathBuf),
    Named(PathBuf, String, ImportKind),
}

#[derive(Debug, Clone)]
struct ReexportTarget {
    import_path: String,
    import_kind: ImportKind,
    /// `original_name || name` per spec §4.5.
    lookup_name: String,
}

#[derive(Debug, Default)]
pub struct ExportRegistry {
    named: IndexMap<PathBuf, IndexMap<String, SymbolId>>,
    default: IndexMap<PathBuf, SymbolId>,
    reexports: IndexMap<SymbolId, ReexportTarget>,
    /// `export * from "specifier"` source specifiers per barrel file
    /// (SPEC_FULL §A.8). Consulted only when a direct named lookup misses —
    /// no names are known ahead of time, so this can't populate `named`.
    export_all: IndexMap<PathBuf, Vec<String>>,
}

impl ExportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every export recorded for `file`. Returns `Err` only for the
    /// definition-level contract violations in spec §7: more than one
    /// default export, or a re-export definition missing its `import`
    /// details.
    pub fn update_file(
        &mut self,
        file: PathBuf,
        defs: &[Definition],
        export_all_specifiers: &[String],
    ) -> Result<()> {
        self.remove_file(&file);

        let default_ids: Vec<u32> = defs
            .iter()
            .filter(|d| d.export.as_ref().is_some_and(|e| e.is_default))
            .map(|d| d.id.value())
            .collect();
        if default_ids.len() > 1 {
            return Err(ResolverError::MultipleDefaultExports {
                file,
                ids: default_ids,
            });
        }

        let mut named = IndexMap::new();
        let mut default = None;
        let mut reexports = Vec::new();

        for def in defs {
            let Some(export) = &def.export else { continue };

            if export.is_default {
                default = Some(def.id);
            } else {
                named.insert(def.effective_export_name().to_string(), def.id);
            }

            if export.is_reexport {
                let Some(import) = &def.import else {
                    return Err(ResolverError::ImportKindMissingOnReExport {
                        file,
                        id: def.id.value(),
                    });
                };
                let lookup_name = import
                    .original_name
                    .clone()
                    .unwrap_or_else(|| def.name.clone());
                reexports.push((
                    def.id,
                    ReexportTarget {
                        import_path: import.import_path.clone(),
                        import_kind: import.import_kind,
                        lookup_name,
                    },
                ));
            }
        }

        for (id, target) in reexports {
            self.reexports.insert(id, target);
        }
        self.named.insert(file.clone(), named);
        if let Some(id) = default {
            self.default.insert(file.clone(), id);
        }
        if !export_all_specifiers.is_empty() {
            self.export_all.insert(file, export_all_specifiers.to_vec());
        }
        Ok(())
    }

    pub fn remove_file(&mut self, file: &Path) {
        if let Some(named) = self.named.shift_remove(file) {
            for id in named.values() {
                self.reexports.shift_remove(id);
            }
        }
        if let Some(id) = self.default.shift_remove(file) {
            self.reexports.shift_remove(&id);
        }
        self.export_all.shift_remove(file);
    }

    pub fn has_export(&self, file: &Path, name: &str, kind: ImportKind) -> bool {
        match kind {
            ImportKind::Default => self.default.contains_key(file),
            _ => self
                .named
                .get(file)
                .is_some_and(|m| m.contains_key(name)),
        }
    }

    /// Follow re-export chains to the originating `SymbolId`, per spec
    /// §4.5. `Ok(None)` means a cycle was detected (not an error); `Err`
    /// means the export genuinely does not exist anywhere in the chain.
    pub fn resolve_export_chain(
        &self,
        source_file: &Path,
        export_name: &str,
        import_kind: ImportKind,
        resolver: &dyn ModulePathResolver,
        tree: &FileTree,
    ) -> Result<Option<SymbolId>> {
        let mut visited = IndexSet::new();
        self.resolve_export_chain_inner(
            source_file,
            export_name,
            import_kind,
            resolver,
            tree,
            &mut visited,
        )
    }

    fn resolve_export_chain_inner(
        &self,
        source_file: &Path,
        export_name: &str,
        import_kind: ImportKind,
        resolver: &dyn ModulePathResolver,
        tree: &FileTree,
        visited: &mut IndexSet<VisitedKey>,
    ) -> Result<Option<SymbolId>> {
        let key = match import_kind {
            ImportKind::Default => VisitedKey::Default(source_file.to_path_buf()),
            _ => VisitedKey::Named(
                source_file.to_path_buf(),
                export_name.to_string(),
                import_kind,
            ),
        };
        if !visited.insert(key) {
            return Ok(None);
        }

        let symbol_id = match import_kind {
            ImportKind::Default => self.default.get(source_file).copied(),
            _ => self
                .named
                .get(source_file)
                .and_then(|m| m.get(export_name))
                .copied(),
        };

        let Some(symbol_id) = symbol_id else {
            if import_kind != ImportKind::Default {
                if let Some(found) = self.resolve_via_export_all(
                    source_file,
                    export_name,
                    import_kind,
                    resolver,
                    tree,
                    visited,
                ) {
                    return Ok(Some(found));
                }
            }
            return Err(ResolverError::ExportNotFound {
                file: source_file.to_path_buf(),
                name: export_name.to_string(),
                kind: import_kind,
            });
        };

        match self.reexports.get(&symbol_id) {
            Some(target) => {
                let next_file = resolver.resolve(&target.import_path, source_file, tree);
                self.resolve_export_chain_inner(
                    &next_file,
                    &target.lookup_name,
                    target.import_kind,
                    resolver,
                    tree,
                    visited,
                )
            }
            None => Ok(Some(symbol_id)),
        }
    }

    /// Barrel fallback: when `source_file` has no direct or re-exported
    /// binding for `export_name`, try each of its `export * from` sources in
    /// turn. Best-effort — a specifier that fails to resolve or whose
    /// source lacks the name is skipped rather than treated as an error.
    #[allow(clippy::too_many_arguments)]
    fn resolve_via_export_all(
        &self,
        source_file: &Path,
        export_name: &str,
        import_kind: ImportKind,
        resolver: &dyn ModulePathResolver,
        tree: &FileTree,
        visited: &mut IndexSet<VisitedKey>,
    ) -> Option<SymbolId> {
        let specifiers = self.export_all.get(source_file)?;
        for specifier in specifiers {
            let next_file = resolver.resolve(specifier, source_file, tree);
            if let Ok(Some(found)) = self.resolve_export_chain_inner(
                &next_file,
                export_name,
                import_kind,
                resolver,
                tree,
                visited,
            ) {
                return Some(found);
            }
        }
        None
    }
}
