//! Two-phase name-then-call resolution — the heart of the system (spec §4.8).

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::definition_registry::DefinitionRegistry;
use crate::export_registry::ExportRegistry;
use crate::filetree::FileTree;
use crate::import_graph::ImportGraph;
use crate::reference::{CallReference, CallType};
use crate::resolvers::ModulePathResolver;
use crate::scope::ScopeRegistry;
use crate::symbol::{DefinitionKind, ImportKind};
use crate::type_registry::TypeRegistry;
use crate::types::{ScopeId, SymbolId};

type ScopeMap = IndexMap<String, SymbolId>;

#[derive(Debug, Default)]
pub struct ResolutionRegistry {
    resolutions_by_scope: IndexMap<ScopeId, ScopeMap>,
    calls_by_file: IndexMap<PathBuf, Vec<CallReference>>,
    calls_by_caller_scope: IndexMap<ScopeId, Vec<(PathBuf, usize)>>,
    calls_by_target_symbol: IndexMap<SymbolId, Vec<(PathBuf, usize)>>,
}

impl ResolutionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Phase 1 (spec §4.8): walk the file's scope tree from its root,
    /// producing a complete `Name → SymbolId` map per scope via inherit →
    /// layer imports → layer locals → descend.
    pub fn resolve_names(
        &mut self,
        root_scope_id: ScopeId,
        scope_registry: &ScopeRegistry,
        definition_registry: &DefinitionRegistry,
        import_graph: &ImportGraph,
        export_registry: &ExportRegistry,
        resolver: &dyn ModulePathResolver,
        tree: &FileTree,
    ) {
        self.resolve_scope(
            root_scope_id,
            ScopeMap::new(),
            scope_registry,
            definition_registry,
            import_graph,
            export_registry,
            resolver,
            tree,
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn resolve_scope(
        &mut self,
        scope_id: ScopeId,
        parent_map: ScopeMap,
        scope_registry: &ScopeRegistry,
        definition_registry: &DefinitionRegistry,
        import_graph: &ImportGraph,
        export_registry: &ExportRegistry,
        resolver: &dyn ModulePathResolver,
        tree: &FileTree,
    ) {
        let mut map = parent_map;

        for import_id in import_graph.get_scope_imports(scope_id) {
            let Some(def) = definition_registry.get_by_id(*import_id) else {
                continue;
            };
            let Some(import) = &def.import else { continue };

            if import.import_kind == ImportKind::Namespace {
                map.insert(def.name.clone(), def.id);
                continue;
            }

            let Some(source_file) = import_graph.get_resolved_import_path(*import_id) else {
                continue;
            };
            let lookup_name = import.original_name.as_deref().unwrap_or(&def.name);

            if let Ok(Some(target)) = export_registry.resolve_export_chain(
                source_file,
                lookup_name,
                import.import_kind,
                resolver,
                tree,
            ) {
                map.insert(def.name.clone(), target);
            }
        }

        for (name, id) in definition_registry.get_scope_definitions(scope_id) {
            if definition_registry
                .get_by_id(id)
                .is_some_and(|d| d.kind == DefinitionKind::Import)
            {
                continue;
            }
            map.insert(name, id);
        }

        let child_ids = scope_registry
            .get_scope(scope_id)
            .map(|s| s.child_ids.clone())
            .unwrap_or_default();

        self.resolutions_by_scope.insert(scope_id, map.clone());

        for child_id in child_ids {
            self.resolve_scope(
                child_id,
                map.clone(),
                scope_registry,
                definition_registry,
                import_graph,
                export_registry,
                resolver,
                tree,
            );
        }
    }

    pub fn resolve_name(&self, scope_id: ScopeId, name: &str) -> Option<SymbolId> {
        self.resolutions_by_scope.get(&scope_id)?.get(name).copied()
    }

    /// Reference preprocessing (spec §4.8 interlude): Python's grammar
    /// cannot distinguish a constructor call from a function call, so any
    /// `call_type = function` reference whose name resolves to a class
    /// definition is rewritten to `constructor` before phase 2 runs.
    pub fn preprocess_python_calls(
        &self,
        calls: &mut [CallReference],
        definition_registry: &DefinitionRegistry,
    ) {
        for call in calls.iter_mut() {
            if call.call_type != CallType::Function {
                continue;
            }
            let Some(id) = self.resolve_name(call.reference.scope_id, &call.reference.name) else {
                continue;
            };
            if definition_registry
                .get_by_id(id)
                .is_some_and(|d| d.kind == DefinitionKind::Class)
            {
                call.promote_to_constructor();
            }
        }
    }

    /// Phase 2 (spec §4.8): resolve every call reference in `file` by
    /// dispatching on `call_type`, then index resolved calls by file, by
    /// caller scope, and by target symbol.
    #[allow(clippy::too_many_arguments)]
    pub fn resolve_calls(
        &mut self,
        file: PathBuf,
        mut calls: Vec<CallReference>,
        scope_registry: &ScopeRegistry,
        definition_registry: &DefinitionRegistry,
        type_registry: &TypeRegistry,
        import_graph: &ImportGraph,
        export_registry: &ExportRegistry,
        resolver: &dyn ModulePathResolver,
        tree: &FileTree,
    ) {
        for call in calls.iter_mut() {
            call.symbol_id = self.resolve_single_call(
                call,
                definition_registry,
                type_registry,
                import_graph,
                export_registry,
                resolver,
                tree,
            );
            call.caller_scope_id =
                scope_registry.find_enclosing_function_scope(call.reference.scope_id);
        }

        self.remove_calls_for_file(&file);

        for (index, call) in calls.iter().enumerate() {
            if !call.is_resolved() {
                continue;
            }
            if let Some(scope_id) = call.caller_scope_id {
                self.calls_by_caller_scope
                    .entry(scope_id)
                    .or_default()
                    .push((file.clone(), index));
            }
            if let Some(symbol_id) = call.symbol_id {
                self.calls_by_target_symbol
                    .entry(symbol_id)
                    .or_default()
                    .push((file.clone(), index));
            }
        }

        self.calls_by_file.insert(file, calls);
    }

    #[allow(clippy::too_many_arguments)]
    fn resolve_single_call(
        &self,
        call: &CallReference,
        definition_registry: &DefinitionRegistry,
        type_registry: &TypeRegistry,
        import_graph: &ImportGraph,
        export_registry: &ExportRegistry,
        resolver: &dyn ModulePathResolver,
        tree: &FileTree,
    ) -> Option<SymbolId> {
        let scope_id = call.reference.scope_id;
        match call.call_type {
            CallType::Function => match &call.context {
                Some(context) => {
                    let type_name = context.property_chain.first()?;
                    let type_id = self.resolve_name(scope_id, type_name)?;
                    type_registry.resolve_method(type_id, &call.reference.name)
                }
                None => self.resolve_name(scope_id, &call.reference.name),
            },
            CallType::Method => {
                let context = call.context.as_ref()?;
                let (head, rest) = context.property_chain.split_first()?;
                let head_symbol = self.resolve_name(scope_id, head)?;

                // `import * as ns` targets: `head` names the namespace import
                // itself, not a typed value, so the type registry's member
                // chain doesn't apply — the call dispatches through the
                // import graph to the target file's own exports instead
                // (spec §4.6/§4.8).
                if let Some(source_file) = import_graph.get_namespace_source(head_symbol) {
                    if rest.is_empty() {
                        return export_registry
                            .resolve_export_chain(
                                source_file,
                                &call.reference.name,
                                ImportKind::Named,
                                resolver,
                                tree,
                            )
                            .ok()
                            .flatten();
                    }
                    return None;
                }

                let mut full_chain = rest.to_vec();
                full_chain.push(call.reference.name.clone());
                type_registry.resolve_member_chain(head_symbol, &full_chain, definition_registry)
            }
            CallType::Constructor => self.resolve_name(scope_id, &call.reference.name),
            CallType::Super => None,
        }
    }

    fn remove_calls_for_file(&mut self, file: &Path) {
        if self.calls_by_file.shift_remove(file).is_none() {
            return;
        }
        for calls in self.calls_by_caller_scope.values_mut() {
            calls.retain(|(f, _)| f != file);
        }
        self.calls_by_caller_scope.retain(|_, v| !v.is_empty());
        for calls in self.calls_by_target_symbol.values_mut() {
            calls.retain(|(f, _)| f != file);
        }
        self.calls_by_target_symbol.retain(|_, v| !v.is_empty());
    }

    /// Drop every phase-1 resolution owned by `scope_ids` and every call
    /// recorded for `file` (spec §4.8 "Update discipline").
    pub fn remove_file(&mut self, file: &Path, scope_ids: &[ScopeId]) {
        for scope_id in scope_ids {
            self.resolutions_by_scope.shift_remove(scope_id);
        }
        self.remove_calls_for_file(file);
    }

    pub fn get_file_calls(&self, file: &Path) -> &[CallReference] {
        self.calls_by_file.get(file).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get_calls_by_caller_scope(&self, scope_id: ScopeId) -> Vec<&CallReference> {
        self.calls_by_caller_scope
            .get(&scope_id)
            .into_iter()
            .flatten()
            .filter_map(|(file, index)| self.calls_by_file.get(file).and_then(|c| c.get(*index)))
            .collect()
    }

    pub fn get_all_referenced_symbols(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.calls_by_target_symbol.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition_registry::DefinitionRegistry;
    use crate::resolvers::JavaScriptResolver;
    use crate::scope::{LexicalScope, ScopeKind};
    use crate::symbol::{Definition, ExportInfo, ImportDetails};
    use crate::types::{FileId, Location};

    fn loc(file: &str) -> Location {
        Location::new(file, 1, 0, 1, 5)
    }

    fn module_scope(id: u32, file: FileId) -> LexicalScope {
        LexicalScope::new(ScopeId::new(id).unwrap(), ScopeKind::Module, file, None, loc("x"))
    }

    #[test]
    fn direct_import_call_resolves_across_files() {
        let mut scopes = ScopeRegistry::new();
        let mut defs = DefinitionRegistry::new();
        let mut imports = ImportGraph::new();
        let mut exports = ExportRegistry::new();
        let mut tree = FileTree::new();
        tree.add(Path::new("utils.js"));
        tree.add(Path::new("main.js"));

        let utils_file = FileId::new(1).unwrap();
        let utils_scope = ScopeId::new(1).unwrap();
        scopes.update_file(utils_file, vec![module_scope(1, utils_file)]);
        let helper_id = SymbolId::new(1).unwrap();
        let helper_def = Definition::new(
            helper_id,
            "helper",
            DefinitionKind::Function,
            utils_scope,
            loc("utils.js"),
        )
        .exported(ExportInfo::named("helper"));
        defs.update_file(utils_file, vec![helper_def.clone()]);
        exports
            .update_file(PathBuf::from("utils.js"), &[helper_def], &[])
            .unwrap();

        let main_file = FileId::new(2).unwrap();
        let main_scope = ScopeId::new(2).unwrap();
        scopes.update_file(main_file, vec![module_scope(2, main_file)]);
        let import_id = SymbolId::new(2).unwrap();
        let import_def = Definition::new(
            import_id,
            "helper",
            DefinitionKind::Import,
            main_scope,
            loc("main.js"),
        )
        .with_import(ImportDetails {
            import_path: "./utils".to_string(),
            import_kind: ImportKind::Named,
            original_name: None,
        });
        defs.update_file(main_file, vec![import_def.clone()]);
        imports.update_file(
            PathBuf::from("main.js"),
            &[import_def],
            &JavaScriptResolver,
            &tree,
        );

        let mut reg = ResolutionRegistry::new();
        reg.resolve_names(
            main_scope,
            &scopes,
            &defs,
            &imports,
            &exports,
            &JavaScriptResolver,
            &tree,
        );

        assert_eq!(reg.resolve_name(main_scope, "helper"), Some(helper_id));

        let call = CallReference::new("helper", loc("main.js"), main_scope, CallType::Function);
        reg.resolve_calls(
            PathBuf::from("main.js"),
            vec![call],
            &scopes,
            &defs,
            &TypeRegistry::new(),
            &imports,
            &exports,
            &JavaScriptResolver,
            &tree,
        );

        let calls = reg.get_file_calls(Path::new("main.js"));
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].symbol_id, Some(helper_id));
    }

    #[test]
    fn namespace_import_method_dispatches_through_the_import_graph() {
        use crate::reference::CallContext;

        let mut scopes = ScopeRegistry::new();
        let mut defs = DefinitionRegistry::new();
        let mut imports = ImportGraph::new();
        let mut exports = ExportRegistry::new();
        let mut tree = FileTree::new();
        tree.add(Path::new("utils.js"));
        tree.add(Path::new("main.js"));

        let utils_file = FileId::new(1).unwrap();
        let utils_scope = ScopeId::new(1).unwrap();
        scopes.update_file(utils_file, vec![module_scope(1, utils_file)]);
        let helper_id = SymbolId::new(1).unwrap();
        let helper_def = Definition::new(
            helper_id,
            "helper",
            DefinitionKind::Function,
            utils_scope,
            loc("utils.js"),
        )
        .exported(ExportInfo::named("helper"));
        defs.update_file(utils_file, vec![helper_def.clone()]);
        exports
            .update_file(PathBuf::from("utils.js"), &[helper_def], &[])
            .unwrap();

        let main_file = FileId::new(2).unwrap();
        let main_scope = ScopeId::new(2).unwrap();
        scopes.update_file(main_file, vec![module_scope(2, main_file)]);
        let ns_id = SymbolId::new(2).unwrap();
        let ns_def = Definition::new(
            ns_id,
            "utils",
            DefinitionKind::Import,
            main_scope,
            loc("main.js"),
        )
        .with_import(ImportDetails {
            import_path: "./utils".to_string(),
            import_kind: ImportKind::Namespace,
            original_name: None,
        });
        defs.update_file(main_file, vec![ns_def.clone()]);
        imports.update_file(PathBuf::from("main.js"), &[ns_def], &JavaScriptResolver, &tree);

        let mut reg = ResolutionRegistry::new();
        reg.resolve_names(
            main_scope,
            &scopes,
            &defs,
            &imports,
            &exports,
            &JavaScriptResolver,
            &tree,
        );

        assert_eq!(reg.resolve_name(main_scope, "utils"), Some(ns_id));

        let call = CallReference::new("helper", loc("main.js"), main_scope, CallType::Method)
            .with_context(CallContext {
                receiver_location: loc("main.js"),
                property_chain: vec!["utils".to_string()],
            });
        reg.resolve_calls(
            PathBuf::from("main.js"),
            vec![call],
            &scopes,
            &defs,
            &TypeRegistry::new(),
            &imports,
            &exports,
            &JavaScriptResolver,
            &tree,
        );

        let calls = reg.get_file_calls(Path::new("main.js"));
        assert_eq!(calls[0].symbol_id, Some(helper_id));
    }

    #[test]
    fn local_definition_shadows_import_of_same_name() {
        let mut scopes = ScopeRegistry::new();
        let mut defs = DefinitionRegistry::new();
        let imports = ImportGraph::new();
        let exports = ExportRegistry::new();
        let tree = FileTree::new();

        let file = FileId::new(1).unwrap();
        let scope_id = ScopeId::new(1).unwrap();
        scopes.update_file(file, vec![module_scope(1, file)]);

        let local_id = SymbolId::new(1).unwrap();
        let local_def = Definition::new(
            local_id,
            "helper",
            DefinitionKind::Function,
            scope_id,
            loc("main.js"),
        );
        defs.update_file(file, vec![local_def]);

        let mut reg = ResolutionRegistry::new();
        reg.resolve_names(
            scope_id,
            &scopes,
            &defs,
            &imports,
            &exports,
            &JavaScriptResolver,
            &tree,
        );

        assert_eq!(reg.resolve_name(scope_id, "helper"), Some(local_id));
    }

    #[test]
    fn remove_file_drops_resolutions_and_calls() {
        let mut reg = ResolutionRegistry::new();
        let scopes = ScopeRegistry::new();
        let defs = DefinitionRegistry::new();
        let imports = ImportGraph::new();
        let exports = ExportRegistry::new();
        let tree = FileTree::new();
        let scope_id = ScopeId::new(1).unwrap();
        reg.resolve_calls(
            PathBuf::from("a.js"),
            vec![CallReference::new(
                "f",
                loc("a.js"),
                scope_id,
                CallType::Function,
            )],
            &scopes,
            &defs,
            &TypeRegistry::new(),
            &imports,
            &exports,
            &JavaScriptResolver,
            &tree,
        );
        reg.remove_file(Path::new("a.js"), &[scope_id]);
        assert!(reg.get_file_calls(Path::new("a.js")).is_empty());
        assert_eq!(reg.resolve_name(scope_id, "f"), None);
    }
}
