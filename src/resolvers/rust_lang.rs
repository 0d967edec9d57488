use std::path::{Path, PathBuf};

use crate::filetree::FileTree;

use super::ModulePathResolver;

/// Rust `use`-path resolution (spec §4.2, "Rust").
///
/// The first `::`-separated segment selects a base directory (`crate`,
/// `super`, `self`, or an opaque external crate); remaining segments walk
/// that base one `mod`/file step at a time.
#[derive(Debug, Default, Clone, Copy)]
pub struct RustResolver;

impl ModulePathResolver for RustResolver {
    fn resolve(&self, specifier: &str, importing_file: &Path, tree: &FileTree) -> PathBuf {
        let mut segments = specifier.split("::");
        let Some(first) = segments.next() else {
            return PathBuf::from(specifier);
        };

        let importing_dir = importing_file.parent().unwrap_or_else(|| Path::new(""));

        let base = match first {
            "crate" => crate_root(importing_file, tree),
            "super" => parent_module_dir(importing_file, importing_dir),
            "self" => importing_dir.to_path_buf(),
            _ => return PathBuf::from(specifier),
        };

        let rest: Vec<&str> = segments.collect();
        if rest.is_empty() {
            return base;
        }

        resolve_segments(&base, &rest, tree)
    }
}

/// Walk up from `importing_file` to the nearest ancestor directory holding
/// `lib.rs`, `main.rs`, or `Cargo.toml` (using `Cargo.toml`'s `src/`
/// subdirectory when present), per spec §4.2.
fn crate_root(importing_file: &Path, tree: &FileTree) -> PathBuf {
    let mut current = importing_file.parent().map(Path::to_path_buf);
    while let Some(dir) = current {
        if tree.has_file(&dir.join("lib.rs")) || tree.has_file(&dir.join("main.rs")) {
            return dir;
        }
        if tree.has_file(&dir.join("Cargo.toml")) {
            let src = dir.join("src");
            return if tree.is_directory(&src) { src } else { dir };
        }
        current = dir.parent().map(Path::to_path_buf);
    }
    importing_file.parent().unwrap_or_else(|| Path::new("")).to_path_buf()
}

/// The directory a `super::` path resolves relative to: the same directory
/// for an ordinary file, the grandparent directory for a `mod.rs` file
/// (spec §4.2: "same directory if the importing file is not `mod.rs`, else
/// the grandparent directory").
fn parent_module_dir(importing_file: &Path, importing_dir: &Path) -> PathBuf {
    let is_mod_rs = importing_file
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n == "mod.rs")
        .unwrap_or(false);

    if is_mod_rs {
        importing_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| importing_dir.to_path_buf())
    } else {
        importing_dir.to_path_buf()
    }
}

/// Walk `base/<part>.rs` then `base/<part>/mod.rs` for each segment. A
/// segment that names neither is treated as an item inside the last
/// resolved file rather than a further module step.
fn resolve_segments(base: &Path, segments: &[&str], tree: &FileTree) -> PathBuf {
    let mut current_dir = base.to_path_buf();
    let mut last_file: Option<PathBuf> = None;

    for part in segments {
        let as_file = current_dir.join(format!("{part}.rs"));
        let as_mod = current_dir.join(part).join("mod.rs");

        if tree.has_file(&as_file) {
            last_file = Some(as_file);
            current_dir = current_dir.join(part);
        } else if tree.has_file(&as_mod) {
            last_file = Some(as_mod);
            current_dir = current_dir.join(part);
        } else {
            return last_file.unwrap_or(as_file);
        }
    }

    last_file.unwrap_or(current_dir)
}
