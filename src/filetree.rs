//! Virtualized directory tree (spec §4.1).
//!
//! A pure value tree with no filesystem access — "the single authority
//! consulted by path resolvers" (spec §4.2). Paths are handled OS-natively
//! via `std::path::Path`; no string-splitting on `/`.

use std::path::{Component, Path, PathBuf};

use indexmap::{IndexMap, IndexSet};

#[derive(Debug, Default, Clone)]
struct Folder {
    folders: IndexMap<String, Folder>,
    files: IndexSet<String>,
}

/// In-memory file tree. Mutated only by the coordinator on
/// `register_file`/`deregister_file` and `update_file_index`/`remove_file`
/// (spec §6).
#[derive(Debug)]
pub struct FileTree {
    root: Folder,
    case_sensitive: bool,
}

impl Default for FileTree {
    fn default() -> Self {
        Self::new()
    }
}

fn components(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

impl FileTree {
    /// Case-sensitive by default, independent of host platform (spec §A.4).
    pub fn new() -> Self {
        Self::with_case_sensitivity(true)
    }

    /// `case_sensitive = false` folds every path component to lowercase
    /// before it's stored or looked up, so `Utils.js` and `utils.js` name
    /// the same file (spec §A.4 `case_sensitive_paths`).
    pub fn with_case_sensitivity(case_sensitive: bool) -> Self {
        Self { root: Folder::default(), case_sensitive }
    }

    fn normalize(&self, component: &str) -> String {
        if self.case_sensitive {
            component.to_string()
        } else {
            component.to_lowercase()
        }
    }

    fn normalized_components(&self, path: &Path) -> Vec<String> {
        components(path).iter().map(|c| self.normalize(c)).collect()
    }

    pub fn add(&mut self, path: &Path) {
        let parts = self.normalized_components(path);
        let Some((file_name, dirs)) = parts.split_last() else {
            return;
        };

        let mut folder = &mut self.root;
        for dir in dirs {
            folder = folder.folders.entry(dir.clone()).or_default();
        }
        folder.files.insert(file_name.clone());
    }

    pub fn remove(&mut self, path: &Path) {
        let parts = self.normalized_components(path);
        let Some((file_name, dirs)) = parts.split_last() else {
            return;
        };

        let Some(folder) = Self::walk_mut(&mut self.root, dirs) else {
            return;
        };
        folder.files.shift_remove(file_name);
    }

    pub fn has_file(&self, path: &Path) -> bool {
        let parts = self.normalized_components(path);
        let Some((file_name, dirs)) = parts.split_last() else {
            return false;
        };
        Self::walk(&self.root, dirs)
            .map(|folder| folder.files.contains(file_name))
            .unwrap_or(false)
    }

    pub fn is_directory(&self, path: &Path) -> bool {
        let parts = self.normalized_components(path);
        Self::walk(&self.root, &parts).is_some()
    }

    /// Immediate child file and directory names of `path`, in insertion
    /// order. Empty if `path` is unknown or not a directory. Names come
    /// back lowercased when the tree is case-insensitive, since the
    /// original casing isn't retained.
    pub fn children(&self, path: &Path) -> (Vec<String>, Vec<String>) {
        let parts = self.normalized_components(path);
        match Self::walk(&self.root, &parts) {
            Some(folder) => (
                folder.folders.keys().cloned().collect(),
                folder.files.iter().cloned().collect(),
            ),
            None => (Vec::new(), Vec::new()),
        }
    }

    fn walk<'a>(mut folder: &'a Folder, dirs: &[String]) -> Option<&'a Folder> {
        for dir in dirs {
            folder = folder.folders.get(dir)?;
        }
        Some(folder)
    }

    fn walk_mut<'a>(mut folder: &'a mut Folder, dirs: &[String]) -> Option<&'a mut Folder> {
        for dir in dirs {
            folder = folder.folders.get_mut(dir)?;
        }
        Some(folder)
    }
}

pub fn join_relative(base_dir: &Path, specifier: &str) -> PathBuf {
    let mut result = base_dir.to_path_buf();
    for part in specifier.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                result.pop();
            }
            other => result.push(other),
        }
    }
    result
}
