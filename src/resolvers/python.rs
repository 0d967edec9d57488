use std::path::{Path, PathBuf};

use crate::config::ResolverConfig;
use crate::filetree::FileTree;

use super::ModulePathResolver;

const PROJECT_MARKERS: [&str; 9] = [
    "setup.py",
    "pyproject.toml",
    ".git",
    "requirements.txt",
    "Pipfile",
    "tox.ini",
    "poetry.lock",
    "Pipfile.lock",
    ".python-version",
];

/// Python module resolution (spec §4.2, "Python").
///
/// Relative imports (`from . import x`, `from ..pkg import y`) are resolved
/// purely by dot-counting against the importing file's directory. Absolute
/// imports search the importing file's own directory first, then the
/// project root and a handful of its ancestors, mirroring CPython's
/// `sys.path[0]`-first behavior rather than a `PYTHONPATH` search.
#[derive(Debug, Clone)]
pub struct PythonResolver {
    config: ResolverConfig,
}

impl PythonResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Leading dots in a relative specifier, e.g. `"..pkg.mod"` → 2.
    fn leading_dots(specifier: &str) -> usize {
        specifier.chars().take_while(|c| *c == '.').count()
    }

    fn resolve_relative(&self, specifier: &str, importing_file: &Path, tree: &FileTree) -> PathBuf {
        let dots = Self::leading_dots(specifier);
        let rest = &specifier[dots..];

        let mut target_dir = importing_file
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .to_path_buf();
        for _ in 0..dots.saturating_sub(1) {
            target_dir.pop();
        }

        if rest.is_empty() {
            return target_dir.join("__init__.py");
        }

        let segments: Vec<&str> = rest.split('.').collect();
        let target = segments.iter().fold(target_dir, |acc, seg| acc.join(seg));

        candidates_for(&target)
            .into_iter()
            .find(|c| tree.has_file(c))
            .unwrap_or_else(|| with_py_extension(&target))
    }

    fn resolve_absolute(&self, specifier: &str, importing_file: &Path, tree: &FileTree) -> PathBuf {
        let segments: Vec<&str> = specifier.split('.').collect();
        let importing_dir = importing_file.parent().unwrap_or_else(|| Path::new(""));

        let local = join_segments(importing_dir, &segments);
        if let Some(found) = first_existing_module(tree, &local) {
            return found;
        }

        let project_root = self.project_root(importing_file, segments.first().copied(), tree);
        let rooted = join_segments(&project_root, &segments);
        if let Some(found) = first_existing_module(tree, &rooted) {
            return found;
        }

        let mut ancestor = project_root.clone();
        for _ in 0..self.config.python_ancestor_root_search_depth {
            if !ancestor.pop() {
                break;
            }
            let candidate = join_segments(&ancestor, &segments);
            if let Some(found) = first_existing_module(tree, &candidate) {
                return found;
            }
        }

        with_py_extension(&rooted)
    }

    /// The Python project root per spec §4.2: the topmost ancestor (file dir
    /// inclusive) that contains `__init__.py`'s parent, else a marker-file
    /// search, else the path-duplication heuristic keyed on the import
    /// path's first segment, else the file's own directory.
    fn project_root(
        &self,
        importing_file: &Path,
        first_segment: Option<&str>,
        tree: &FileTree,
    ) -> PathBuf {
        let importing_dir = importing_file
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .to_path_buf();

        if let Some(topmost) = self.topmost_init_ancestor(&importing_dir, tree) {
            let mut root = topmost;
            root.pop();
            return root;
        }

        if let Some(marker_dir) = self.find_marker_ancestor(&importing_dir, tree) {
            return marker_dir;
        }

        let basename = importing_dir.file_name().and_then(|n| n.to_str());
        if first_segment.is_some() && first_segment == basename {
            if let Some(parent) = parent_of(&importing_dir) {
                return parent;
            }
        }

        importing_dir
    }

    fn topmost_init_ancestor(&self, start_dir: &Path, tree: &FileTree) -> Option<PathBuf> {
        let mut topmost = None;
        let mut current = Some(start_dir.to_path_buf());
        while let Some(dir) = current {
            if tree.has_file(&dir.join("__init__.py")) {
                topmost = Some(dir.clone());
            }
            current = parent_of(&dir);
        }
        topmost
    }

    fn find_marker_ancestor(&self, start_dir: &Path, tree: &FileTree) -> Option<PathBuf> {
        let mut current = Some(start_dir.to_path_buf());
        for _ in 0..=self.config.python_project_marker_search_depth {
            let Some(dir) = current else { break };
            if PROJECT_MARKERS
                .iter()
                .any(|marker| tree.has_file(&dir.join(marker)) || tree.is_directory(&dir.join(marker)))
            {
                return Some(dir);
            }
            current = parent_of(&dir);
        }
        None
    }

    /// `from pkg import sub` resolution alongside a resolved package
    /// `__init__.py` (spec §4.2, "A secondary helper `resolve_submodule_path`").
    pub fn resolve_submodule_path(
        &self,
        source_file: &Path,
        name: &str,
        tree: &FileTree,
    ) -> PathBuf {
        let pkg_dir = source_file
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .to_path_buf();
        let target = pkg_dir.join(name);
        candidates_for(&target)
            .into_iter()
            .find(|c| tree.has_file(c))
            .unwrap_or_else(|| with_py_extension(&target))
    }
}

impl ModulePathResolver for PythonResolver {
    fn resolve(&self, specifier: &str, importing_file: &Path, tree: &FileTree) -> PathBuf {
        if specifier.starts_with('.') {
            self.resolve_relative(specifier, importing_file, tree)
        } else {
            self.resolve_absolute(specifier, importing_file, tree)
        }
    }
}

fn parent_of(dir: &Path) -> Option<PathBuf> {
    let parent = dir.parent()?;
    Some(parent.to_path_buf())
}

fn join_segments(base: &Path, segments: &[&str]) -> PathBuf {
    segments.iter().fold(base.to_path_buf(), |acc, seg| acc.join(seg))
}

fn candidates_for(target: &Path) -> Vec<PathBuf> {
    vec![with_py_extension(target), target.join("__init__.py")]
}

fn first_existing_module(tree: &FileTree, target: &Path) -> Option<PathBuf> {
    candidates_for(target).into_iter().find(|c| tree.has_file(c))
}

fn with_py_extension(path: &Path) -> PathBuf {
    let mut s = path.as_os_str().to_owned();
    s.push(".py");
    PathBuf::from(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> PythonResolver {
        PythonResolver::new(ResolverConfig::default())
    }

    #[test]
    fn single_dot_targets_same_directory() {
        let mut tree = FileTree::new();
        tree.add(Path::new("pkg/helper.py"));
        let resolved = resolver().resolve(".helper", Path::new("pkg/main.py"), &tree);
        assert_eq!(resolved, PathBuf::from("pkg/helper.py"));
    }

    #[test]
    fn double_dot_walks_up_one_level() {
        let mut tree = FileTree::new();
        tree.add(Path::new("shared.py"));
        let resolved = resolver().resolve("..shared", Path::new("pkg/sub/main.py"), &tree);
        assert_eq!(resolved, PathBuf::from("pkg/shared.py"));
    }

    #[test]
    fn bare_dot_resolves_to_package_init() {
        let mut tree = FileTree::new();
        tree.add(Path::new("pkg/__init__.py"));
        let resolved = resolver().resolve(".", Path::new("pkg/main.py"), &tree);
        assert_eq!(resolved, PathBuf::from("pkg/__init__.py"));
    }

    #[test]
    fn from_import_of_submodule_without_init_py() {
        let mut tree = FileTree::new();
        tree.add(Path::new("utils/helper.py"));
        let resolved = resolver().resolve("utils.helper", Path::new("main.py"), &tree);
        assert_eq!(resolved, PathBuf::from("utils/helper.py"));
    }

    #[test]
    fn absolute_import_prefers_local_directory_candidate() {
        let mut tree = FileTree::new();
        tree.add(Path::new("pkg/sibling.py"));
        tree.add(Path::new("sibling.py"));
        let resolved = resolver().resolve("sibling", Path::new("pkg/main.py"), &tree);
        assert_eq!(resolved, PathBuf::from("pkg/sibling.py"));
    }

    #[test]
    fn project_root_is_parent_of_topmost_init_py() {
        let mut tree = FileTree::new();
        tree.add(Path::new("proj/pkg/__init__.py"));
        tree.add(Path::new("proj/pkg/sub/__init__.py"));
        tree.add(Path::new("proj/other/target.py"));
        let root =
            resolver().project_root(Path::new("proj/pkg/sub/mod.py"), None, &tree);
        assert_eq!(root, PathBuf::from("proj"));
    }

    #[test]
    fn project_root_falls_back_to_marker_file() {
        let mut tree = FileTree::new();
        tree.add(Path::new("proj/pyproject.toml"));
        tree.add(Path::new("proj/app/main.py"));
        let root = resolver().project_root(Path::new("proj/app/main.py"), None, &tree);
        assert_eq!(root, PathBuf::from("proj"));
    }

    #[test]
    fn path_duplication_heuristic_returns_parent_when_segment_matches_dirname() {
        let tree = FileTree::new();
        let root = resolver().project_root(Path::new("utils/main.py"), Some("utils"), &tree);
        assert_eq!(root, PathBuf::from(""));
    }

    #[test]
    fn resolve_submodule_path_checks_py_then_init() {
        let mut tree = FileTree::new();
        tree.add(Path::new("pkg/sub/__init__.py"));
        let resolved =
            resolver().resolve_submodule_path(Path::new("pkg/__init__.py"), "sub", &tree);
        assert_eq!(resolved, PathBuf::from("pkg/sub/__init__.py"));
    }
}
