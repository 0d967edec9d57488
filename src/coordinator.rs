//! The outer orchestration loop (spec §4.9).
//!
//! Owns one of each registry behind a single `parking_lot::RwLock`, the
//! concurrency primitive spec §5 calls for at "the coordinator boundary".
//! Nothing below this module knows about locking; `Coordinator` is the only
//! thing callers touch.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::config::ResolverConfig;
use crate::definition_registry::DefinitionRegistry;
use crate::error::Result;
use crate::export_registry::ExportRegistry;
use crate::filetree::FileTree;
use crate::import_graph::ImportGraph;
use crate::reference::CallReference;
use crate::resolution::ResolutionRegistry;
use crate::resolvers::{JavaScriptResolver, ModulePathResolver, PythonResolver, RustResolver, TypeScriptResolver};
use crate::scope::ScopeRegistry;
use crate::semantic_index::SemanticIndex;
use crate::symbol::{Definition, DefinitionKind, ImportKind};
use crate::type_registry::TypeRegistry;
use crate::types::{FileId, Language, ScopeId, SymbolId};

/// Per-file resolution counters, surfaced for tests and for an embedding
/// CLI's progress reporting (SPEC_FULL §A.8).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileUpdateSummary {
    pub calls_resolved: usize,
    pub calls_unresolved: usize,
    pub imports_unresolved: usize,
}

struct Resolvers {
    javascript: JavaScriptResolver,
    typescript: TypeScriptResolver,
    rust: RustResolver,
    python: PythonResolver,
}

impl Resolvers {
    fn new(config: ResolverConfig) -> Self {
        Self {
            javascript: JavaScriptResolver,
            typescript: TypeScriptResolver,
            rust: RustResolver,
            python: PythonResolver::new(config),
        }
    }

    fn for_language(&self, language: Language) -> &dyn ModulePathResolver {
        match language {
            Language::JavaScript => &self.javascript,
            Language::TypeScript => &self.typescript,
            Language::Rust => &self.rust,
            Language::Python => &self.python,
        }
    }
}

#[derive(Default)]
struct FileInterner {
    ids: IndexMap<PathBuf, FileId>,
    paths: IndexMap<FileId, PathBuf>,
    languages: IndexMap<FileId, Language>,
    next: u32,
}

impl FileInterner {
    fn intern(&mut self, path: &Path, language: Language) -> FileId {
        if let Some(id) = self.ids.get(path) {
            self.languages.insert(*id, language);
            return *id;
        }
        self.next += 1;
        let id = FileId::new(self.next).expect("interner counter starts at 1 and only grows");
        self.ids.insert(path.to_path_buf(), id);
        self.paths.insert(id, path.to_path_buf());
        self.languages.insert(id, language);
        id
    }

    fn get(&self, path: &Path) -> Option<FileId> {
        self.ids.get(path).copied()
    }

    fn language_of(&self, path: &Path) -> Option<Language> {
        self.get(path).and_then(|id| self.languages.get(&id).copied())
    }

    fn forget(&mut self, path: &Path) -> Option<FileId> {
        let id = self.ids.shift_remove(path)?;
        self.paths.shift_remove(&id);
        self.languages.shift_remove(&id);
        Some(id)
    }
}

struct State {
    tree: FileTree,
    scopes: ScopeRegistry,
    definitions: DefinitionRegistry,
    exports: ExportRegistry,
    imports: ImportGraph,
    types: TypeRegistry,
    resolution: ResolutionRegistry,
    resolvers: Resolvers,
    interner: FileInterner,
}

/// Owns the resolution pipeline end to end. Every public method takes
/// `&self` — mutation happens behind the internal lock, matching spec §5's
/// "registries expose no internal concurrency; the lock lives at the
/// coordinator boundary" framing.
pub struct Coordinator {
    state: RwLock<State>,
}

impl Coordinator {
    pub fn new(config: ResolverConfig) -> Self {
        let case_sensitive = config.case_sensitive_paths;
        Self {
            state: RwLock::new(State {
                tree: FileTree::with_case_sensitivity(case_sensitive),
                scopes: ScopeRegistry::new(),
                definitions: DefinitionRegistry::new(),
                exports: ExportRegistry::new(),
                imports: ImportGraph::new(),
                types: TypeRegistry::new(),
                resolution: ResolutionRegistry::new(),
                resolvers: Resolvers::new(config),
                interner: FileInterner::default(),
            }),
        }
    }

    pub fn register_file(&self, file_path: &Path) {
        let mut state = self.state.write();
        state.tree.add(file_path);
        tracing::debug!(file = %file_path.display(), "file registered");
    }

    pub fn deregister_file(&self, file_path: &Path) {
        let mut state = self.state.write();
        state.tree.remove(file_path);
        tracing::debug!(file = %file_path.display(), "file deregistered");
    }

    /// Ingest ordering per spec §4.9: Definition/Scope/Export/Import updates
    /// → Type update → Resolution phase 1 → reference preprocessing →
    /// Resolution phase 2.
    pub fn update_file_index(&self, file_path: &Path, index: SemanticIndex) -> Result<FileUpdateSummary> {
        let mut state = self.state.write();
        state.tree.add(file_path);

        let file_id = state.interner.intern(file_path, index.language);

        state.scopes.update_file(file_id, index.scopes);
        state.definitions.update_file(file_id, index.definitions.clone());
        state.exports.update_file(
            file_path.to_path_buf(),
            &index.definitions,
            &index.export_all_specifiers,
        )?;

        // Borrow-split: `state` sits behind a lock guard, so field access
        // goes through `DerefMut` and the borrow checker can't see that
        // `resolvers` is disjoint from the other fields unless we split
        // them out of a single `&mut *state` reborrow up front.
        let State {
            tree,
            scopes,
            definitions,
            exports,
            imports,
            types,
            resolution,
            resolvers,
            interner: _,
        } = &mut *state;

        let resolver = resolvers.for_language(index.language);
        imports.update_file(file_path.to_path_buf(), &index.definitions, resolver, tree);
        types.update_file(file_path.to_path_buf(), index.type_bindings, index.type_members);

        let resolver = resolvers.for_language(index.language);
        resolution.resolve_names(
            index.root_scope_id,
            scopes,
            definitions,
            imports,
            exports,
            resolver,
            tree,
        );

        let mut references = index.references;
        if index.language == Language::Python {
            resolution.preprocess_python_calls(&mut references, definitions);
        }

        resolution.resolve_calls(
            file_path.to_path_buf(),
            references,
            scopes,
            definitions,
            types,
            imports,
            exports,
            resolver,
            tree,
        );

        let summary = self.summarize(&state, file_path, &index.definitions);
        tracing::debug!(file = %file_path.display(), ?summary, "file indexed");
        Ok(summary)
    }

    fn summarize(&self, state: &State, file_path: &Path, definitions: &[Definition]) -> FileUpdateSummary {
        let calls = state.resolution.get_file_calls(file_path);
        let calls_resolved = calls.iter().filter(|c| c.is_resolved()).count();
        let calls_unresolved = calls.len() - calls_resolved;

        let imports_unresolved = definitions
            .iter()
            .filter(|d| d.kind == DefinitionKind::Import)
            .filter(|d| {
                state
                    .resolution
                    .resolve_name(d.defining_scope_id, &d.name)
                    .is_none()
            })
            .count();

        FileUpdateSummary {
            calls_resolved,
            calls_unresolved,
            imports_unresolved,
        }
    }

    /// Atomically detach a file's scopes, definitions, exports, imports,
    /// types and calls (spec §3 "Lifecycles").
    pub fn remove_file(&self, file_path: &Path) {
        let mut state = self.state.write();
        let Some(file_id) = state.interner.forget(file_path) else {
            state.tree.remove(file_path);
            return;
        };

        let scope_ids = state.scopes.get_file_scopes(file_id).to_vec();
        state.scopes.remove_file(file_id);
        state.definitions.remove_file(file_id);
        state.exports.remove_file(file_path);
        state.imports.remove_file(file_path);
        state.types.remove_file(file_path);
        state.resolution.remove_file(file_path, &scope_ids);
        state.tree.remove(file_path);
        tracing::debug!(file = %file_path.display(), "file removed");
    }

    pub fn resolve_name(&self, scope_id: ScopeId, name: &str) -> Option<SymbolId> {
        self.state.read().resolution.resolve_name(scope_id, name)
    }

    pub fn get_file_calls(&self, file_path: &Path) -> Vec<CallReference> {
        self.state.read().resolution.get_file_calls(file_path).to_vec()
    }

    pub fn get_calls_by_caller_scope(&self, scope_id: ScopeId) -> Vec<CallReference> {
        self.state
            .read()
            .resolution
            .get_calls_by_caller_scope(scope_id)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn get_all_referenced_symbols(&self) -> Vec<SymbolId> {
        self.state.read().resolution.get_all_referenced_symbols().collect()
    }

    pub fn get_definition(&self, symbol_id: SymbolId) -> Option<Definition> {
        self.state.read().definitions.get_by_id(symbol_id).cloned()
    }

    /// Resolves using the querying `file`'s own recorded language for every
    /// hop of the chain, including through re-exports in files of a
    /// different language (an intentional simplification — see DESIGN.md).
    pub fn resolve_export_chain(
        &self,
        file: &Path,
        name: &str,
        kind: ImportKind,
    ) -> Result<Option<SymbolId>> {
        let state = self.state.read();
        let language = state
            .interner
            .language_of(file)
            .unwrap_or(Language::JavaScript);
        let resolver = state.resolvers.for_language(language);
        state.exports.resolve_export_chain(file, name, kind, resolver, &state.tree)
    }
}
