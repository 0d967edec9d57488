use std::path::{Path, PathBuf};

use crate::filetree::{join_relative, FileTree};

use super::{first_existing, is_relative_specifier, ModulePathResolver};

/// TypeScript module resolution (spec §4.2, "TypeScript").
///
/// Same shape as [`crate::resolvers::JavaScriptResolver`], but `.ts`/`.tsx`
/// outrank `.js`/`.jsx`, and when no candidate exists and the specifier has
/// no recognizable TS/JS extension, `.ts` is appended as a last resort.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeScriptResolver;

const EXTENSIONS: [&str; 4] = ["ts", "tsx", "js", "jsx"];
const INDEX_EXTENSIONS: [&str; 3] = ["ts", "tsx", "js"];
const RECOGNIZED_EXTENSIONS: [&str; 4] = ["ts", "tsx", "js", "jsx"];

impl ModulePathResolver for TypeScriptResolver {
    fn resolve(&self, specifier: &str, importing_file: &Path, tree: &FileTree) -> PathBuf {
        if !is_relative_specifier(specifier) {
            return PathBuf::from(specifier);
        }

        let dir = importing_file.parent().unwrap_or_else(|| Path::new(""));
        let exact = join_relative(dir, specifier);

        let mut candidates = vec![exact.clone()];
        for ext in EXTENSIONS {
            candidates.push(with_extension(&exact, ext));
        }
        for ext in INDEX_EXTENSIONS {
            candidates.push(exact.join(format!("index.{ext}")));
        }

        let fallback = if has_recognized_extension(&exact) {
            exact
        } else {
            with_extension(&exact, "ts")
        };

        first_existing(tree, candidates, fallback)
    }
}

fn has_recognized_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| RECOGNIZED_EXTENSIONS.contains(&ext))
}

fn with_extension(path: &Path, ext: &str) -> PathBuf {
    let mut s = path.as_os_str().to_owned();
    s.push(".");
    s.push(ext);
    PathBuf::from(s)
}
