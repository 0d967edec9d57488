//! End-to-end: a local definition shadows an imported name of the same
//! name, regardless of indexer insertion order (spec §8 scenario 5).

use refresolve::{
    CallReference, CallType, Coordinator, Definition, DefinitionKind, FileId, ImportDetails,
    ImportKind, Language, LexicalScope, Location, ResolverConfig, ScopeId, ScopeKind,
    SemanticIndex, SymbolId,
};
use std::path::Path;

fn loc(file: &str) -> Location {
    Location::new(file, 1, 0, 1, 5)
}

fn module_scope(id: ScopeId) -> LexicalScope {
    LexicalScope::new(id, ScopeKind::Module, FileId::new(id.value()).unwrap(), None, loc("x"))
}

#[test]
fn local_function_shadows_an_import_of_the_same_name() {
    let coordinator = Coordinator::new(ResolverConfig::default());

    let utils_scope = ScopeId::new(1).unwrap();
    let imported_helper_id = SymbolId::new(1).unwrap();
    coordinator
        .update_file_index(
            Path::new("utils.js"),
            SemanticIndex::new(Language::JavaScript, utils_scope)
                .with_scopes(vec![module_scope(utils_scope)])
                .with_definitions(vec![Definition::new(
                    imported_helper_id,
                    "helper",
                    DefinitionKind::Function,
                    utils_scope,
                    loc("utils.js"),
                )
                .exported(refresolve::ExportInfo::named("helper"))]),
        )
        .unwrap();

    let main_scope = ScopeId::new(2).unwrap();
    let import_id = SymbolId::new(2).unwrap();
    let local_id = SymbolId::new(3).unwrap();

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
    let local_def = Definition::new(
        local_id,
        "helper",
        DefinitionKind::Function,
        main_scope,
        loc("main.js"),
    );
    let call = CallReference::new("helper", loc("main.js"), main_scope, CallType::Function);

    coordinator
        .update_file_index(
            Path::new("main.js"),
            SemanticIndex::new(Language::JavaScript, main_scope)
                .with_scopes(vec![module_scope(main_scope)])
                .with_definitions(vec![import_def, local_def])
                .with_references(vec![call]),
        )
        .unwrap();

    assert_eq!(coordinator.resolve_name(main_scope, "helper"), Some(local_id));
    let calls = coordinator.get_file_calls(Path::new("main.js"));
    assert_eq!(calls[0].symbol_id, Some(local_id));
}
