//! Opaque identifiers and location primitives shared by every registry.
//!
//! `SymbolId`, `FileId` and `ScopeId` are project-unique, stable within one
//! session, and cheap to copy — they are the only currency registries trade
//! in once a `SemanticIndex` has been ingested (spec §3, "Entities").

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolId(NonZeroU32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileId(NonZeroU32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScopeId(NonZeroU32);

macro_rules! opaque_id {
    ($ty:ty) => {
        impl $ty {
            pub fn new(value: u32) -> Option<Self> {
                NonZeroU32::new(value).map(Self)
            }

            pub fn value(&self) -> u32 {
                self.0.get()
            }
        }
    };
}

opaque_id!(SymbolId);
opaque_id!(FileId);
opaque_id!(ScopeId);

/// A span of source text, always qualified by the file it belongs to.
///
/// Mirrors spec §3: "Every `Location` carries
/// `{file_path, start_line, start_column, end_line, end_column}`".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file_path: PathBuf,
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl Location {
    pub fn new(
        file_path: impl Into<PathBuf>,
        start_line: u32,
        start_column: u32,
        end_line: u32,
        end_column: u32,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    /// Canonical key usable in a map, per spec §3: "A `LocationKey` is a
    /// canonical encoding of a `Location` usable as a map key."
    pub fn key(&self) -> LocationKey {
        LocationKey(format!(
            "{}:{}:{}:{}:{}",
            self.file_path.display(),
            self.start_line,
            self.start_column,
            self.end_line,
            self.end_column
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocationKey(String);

impl LocationKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The four languages the resolver understands module paths for (spec §4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Rust,
}

/// Normalize a file path into a workspace-relative, OS-agnostic form for use
/// as a `FileTree` key. Kept as a free function (not a method on `Path`)
/// because every resolver needs the same normalization before joining
/// relative specifiers.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.components().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_id_rejects_zero() {
        assert!(SymbolId::new(0).is_none());
        assert_eq!(SymbolId::new(7).unwrap().value(), 7);
    }

    #[test]
    fn location_key_is_stable_and_distinguishes_spans() {
        let a = Location::new("a.js", 1, 0, 1, 10);
        let b = Location::new("a.js", 1, 0, 1, 10);
        let c = Location::new("a.js", 2, 0, 2, 10);

        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), c.key());
    }

    #[test]
    fn location_key_distinguishes_files() {
        let a = Location::new("a.js", 1, 0, 1, 10);
        let b = Location::new("b.js", 1, 0, 1, 10);
        assert_ne!(a.key(), b.key());
    }
}
