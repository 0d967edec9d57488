//! Per-language module path resolvers (spec §4.2).
//!
//! Each resolver is a pure function of `(specifier, importing_file,
//! file_tree)` — "path resolution does not touch the filesystem and
//! therefore cannot block" (spec §5). The returned path is the *canonical*
//! resolved path regardless of whether it currently exists in the tree, so
//! that a later `register_file`/`update_file_index` call can retroactively
//! complete resolution on the next update (spec §7).

mod javascript;
mod python;
mod rust_lang;
mod typescript;

pub use javascript::JavaScriptResolver;
pub use python::PythonResolver;
pub use rust_lang::RustResolver;
pub use typescript::TypeScriptResolver;

use std::path::{Path, PathBuf};

use crate::filetree::FileTree;

/// `(specifier, importing_file, file_tree) → file_path`, per spec §4.2.
pub trait ModulePathResolver {
    fn resolve(&self, specifier: &str, importing_file: &Path, tree: &FileTree) -> PathBuf;
}

pub(crate) fn is_relative_specifier(specifier: &str) -> bool {
    specifier.starts_with("./") || specifier.starts_with("../")
}

/// Try each candidate path against the tree in order, returning the first
/// that exists; otherwise return `fallback`.
pub(crate) fn first_existing(
    tree: &FileTree,
    candidates: impl IntoIterator<Item = PathBuf>,
    fallback: PathBuf,
) -> PathBuf {
    for candidate in candidates {
        if tree.has_file(&candidate) {
            return candidate;
        }
    }
    fallback
}
