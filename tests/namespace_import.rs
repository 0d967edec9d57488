//! End-to-end: `import * as ns from "./utils"; ns.helper()` dispatches
//! through the import graph to the target file's own export, not through
//! the type registry (spec §4.6/§4.8).

use refresolve::{
    CallContext, CallReference, CallType, Coordinator, Definition, DefinitionKind, ExportInfo,
    FileId, ImportDetails, ImportKind, Language, LexicalScope, Location, ResolverConfig, ScopeId,
    ScopeKind, SemanticIndex, SymbolId,
};
use std::path::Path;

fn loc(file: &str) -> Location {
    Location::new(file, 1, 0, 1, 5)
}

fn module_scope(id: ScopeId) -> LexicalScope {
    LexicalScope::new(id, ScopeKind::Module, FileId::new(id.value()).unwrap(), None, loc("x"))
}

#[test]
fn namespace_import_member_call_resolves_to_the_source_files_export() {
    let coordinator = Coordinator::new(ResolverConfig::default());

    let utils_scope = ScopeId::new(1).unwrap();
    let helper_id = SymbolId::new(1).unwrap();
    let helper_def = Definition::new(
        helper_id,
        "helper",
        DefinitionKind::Function,
        utils_scope,
        loc("utils.js"),
    )
    .exported(ExportInfo::named("helper"));

    coordinator
        .update_file_index(
            Path::new("utils.js"),
            SemanticIndex::new(Language::JavaScript, utils_scope)
                .with_scopes(vec![module_scope(utils_scope)])
                .with_definitions(vec![helper_def]),
        )
        .unwrap();

    let main_scope = ScopeId::new(2).unwrap();
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
    let call = CallReference::new("helper", loc("main.js"), main_scope, CallType::Method)
        .with_context(CallContext {
            receiver_location: loc("main.js"),
            property_chain: vec!["utils".to_string()],
        });

    let summary = coordinator
        .update_file_index(
            Path::new("main.js"),
            SemanticIndex::new(Language::JavaScript, main_scope)
                .with_scopes(vec![module_scope(main_scope)])
                .with_definitions(vec![ns_def])
                .with_references(vec![call]),
        )
        .unwrap();

    assert_eq!(summary.calls_resolved, 1);
    let calls = coordinator.get_file_calls(Path::new("main.js"));
    assert_eq!(calls[0].symbol_id, Some(helper_id));
}
