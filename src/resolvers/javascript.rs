use std::path::{Path, PathBuf};

use crate::filetree::{join_relative, FileTree};

use super::{first_existing, is_relative_specifier, ModulePathResolver};

/// JavaScript module resolution (spec §4.2, "JavaScript").
///
/// Relative specifiers are tried against: exact path; `path + .js/.mjs/.cjs`;
/// `path/index.{js,mjs,cjs}`, in that priority order. Bare specifiers are
/// returned unchanged — node_modules resolution is out of scope for the core.
#[derive(Debug, Default, Clone, Copy)]
pub struct JavaScriptResolver;

const EXTENSIONS: [&str; 3] = ["js", "mjs", "cjs"];

impl ModulePathResolver for JavaScriptResolver {
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
        for ext in EXTENSIONS {
            candidates.push(exact.join(format!("index.{ext}")));
        }

        first_existing(tree, candidates, exact)
    }
}

fn with_extension(path: &Path, ext: &str) -> PathBuf {
    let mut s = path.as_os_str().to_owned();
    s.push(".");
    s.push(ext);
    PathBuf::from(s)
}
