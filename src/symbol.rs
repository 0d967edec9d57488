//! Symbol definitions: the tagged sum every registry ultimately points at.
//!
//! Spec §3 describes one polymorphic "Symbol Definition" entity with ten
//! variants and a handful of optional substructures depending on the
//! variant. Rather than modeling each variant as its own struct (which would
//! force every registry to match on a dozen types), this follows the
//! `codanna::symbol::Symbol` shape: one struct, a `DefinitionKind` tag, and
//! `Option<...>` fields for data that only some kinds carry — "Callers
//! branch on the tag; no virtual dispatch is required" (spec §9).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::{Location, ScopeId, SymbolId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefinitionKind {
    Function,
    Method,
    Class,
    Interface,
    Enum,
    TypeAlias,
    Namespace,
    Variable,
    Import,
    Property,
    Decorator,
}

/// How a definition is visible outside its file, per spec §3/§4.5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportInfo {
    /// The external name this symbol is exported under, if it differs from
    /// `Definition::name`. `None` means the effective export name is the
    /// definition's own name (spec GLOSSARY, "Effective Export Name").
    pub export_name: Option<String>,
    pub is_default: bool,
    /// Set when this definition is itself an `ImportDefinition` that was
    /// re-exported (`export { X } from "./y"`, `export { default } from "./y"`).
    pub is_reexport: bool,
}

impl ExportInfo {
    pub fn named(export_name: impl Into<String>) -> Self {
        Self {
            export_name: Some(export_name.into()),
            is_default: false,
            is_reexport: false,
        }
    }

    pub fn default_export() -> Self {
        Self {
            export_name: None,
            is_default: true,
            is_reexport: false,
        }
    }

    pub fn reexport(mut self) -> Self {
        self.is_reexport = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImportKind {
    Named,
    Default,
    Namespace,
}

/// Additional attributes carried only by `DefinitionKind::Import` definitions
/// (spec §3, "Import Definition (a Symbol Definition subkind)").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDetails {
    pub import_path: String,
    pub import_kind: ImportKind,
    /// The name the symbol had in the source module, for aliased imports
    /// (`import { core as publicCore }` → `original_name = Some("core")`).
    pub original_name: Option<String>,
}

/// Member map for a type-like definition (class/interface/enum), used by
/// the Type Registry to dispatch method/property lookups (spec §4.7).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeMembers {
    pub methods: IndexMap<String, SymbolId>,
    pub properties: IndexMap<String, SymbolId>,
    pub constructor: Option<SymbolId>,
    pub extends: Vec<SymbolId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Signature {
    pub parameters: Vec<String>,
    pub return_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Definition {
    pub id: SymbolId,
    pub name: String,
    pub kind: DefinitionKind,
    pub defining_scope_id: ScopeId,
    pub location: Location,
    pub is_exported: bool,
    pub export: Option<ExportInfo>,
    pub import: Option<ImportDetails>,
    pub signature: Option<Signature>,
    pub type_members: Option<TypeMembers>,
}

impl Definition {
    pub fn new(
        id: SymbolId,
        name: impl Into<String>,
        kind: DefinitionKind,
        defining_scope_id: ScopeId,
        location: Location,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            defining_scope_id,
            location,
            is_exported: false,
            export: None,
            import: None,
            signature: None,
            type_members: None,
        }
    }

    pub fn exported(mut self, export: ExportInfo) -> Self {
        self.is_exported = true;
        self.export = Some(export);
        self
    }

    pub fn with_import(mut self, import: ImportDetails) -> Self {
        self.import = Some(import);
        self
    }

    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signature = Some(signature);
        self
    }

    pub fn with_type_members(mut self, members: TypeMembers) -> Self {
        self.type_members = Some(members);
        self
    }

    /// The only name under which this symbol is externally visible
    /// (spec GLOSSARY, "Effective Export Name").
    pub fn effective_export_name(&self) -> &str {
        self.export
            .as_ref()
            .and_then(|e| e.export_name.as_deref())
            .unwrap_or(&self.name)
    }

    pub fn is_type_like(&self) -> bool {
        matches!(
            self.kind,
            DefinitionKind::Class | DefinitionKind::Interface | DefinitionKind::Enum
        )
    }
}
