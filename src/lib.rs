pub mod config;
pub mod coordinator;
pub mod definition_registry;
pub mod error;
pub mod export_registry;
pub mod filetree;
pub mod import_graph;
pub mod logging;
pub mod reference;
pub mod resolution;
pub mod resolvers;
pub mod scope;
pub mod semantic_index;
pub mod symbol;
pub mod type_registry;
pub mod types;

pub use config::ResolverConfig;
pub use coordinator::{Coordinator, FileUpdateSummary};
pub use definition_registry::DefinitionRegistry;
pub use error::{ResolverError, Result};
pub use export_registry::ExportRegistry;
pub use filetree::FileTree;
pub use import_graph::ImportGraph;
pub use reference::{CallContext, CallReference, CallType, ReferenceKind, SymbolReference};
pub use resolution::ResolutionRegistry;
pub use scope::{LexicalScope, ScopeKind, ScopeRegistry};
pub use semantic_index::SemanticIndex;
pub use symbol::{Definition, DefinitionKind, ExportInfo, ImportDetails, ImportKind, Signature, TypeMembers};
pub use type_registry::TypeRegistry;
pub use types::{FileId, Language, Location, LocationKey, ScopeId, SymbolId};
