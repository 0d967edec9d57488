//! Error types for the resolution core (spec §7).
//!
//! Per-reference failures (`UnresolvedMember`, a detected cycle) are never
//! represented here — they are control-flow outcomes (a skipped call, a
//! `None` return), not propagated errors. Only definition-level contract
//! violations and export lookups that name a nonexistent export surface as
//! `Err(ResolverError::...)`.

use std::path::PathBuf;

use thiserror::Error;

use crate::symbol::ImportKind;

#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("export '{name}' ({kind:?}) not found in '{file}'")]
    ExportNotFound {
        file: PathBuf,
        name: String,
        kind: ImportKind,
    },

    #[error("file '{file}' has more than one default export: {ids:?}")]
    MultipleDefaultExports { file: PathBuf, ids: Vec<u32> },

    #[error("import definition {id} in '{file}' is a re-export but carries no import_kind")]
    ImportKindMissingOnReExport { file: PathBuf, id: u32 },
}

pub type Result<T> = std::result::Result<T, ResolverError>;
