//! Resolver algorithm tunables (spec §A.4).
//!
//! Loading these from a TOML file or CLI flags is an embedder's concern, not
//! this crate's — `ResolverConfig` only carries the defaults and derives
//! `serde` so an embedding CLI can layer `figment` (as `codanna` does) over
//! them without this crate taking on that dependency itself.

use serde::{Deserialize, Serialize};

fn default_marker_search_depth() -> u8 {
    3
}

fn default_ancestor_root_search_depth() -> u8 {
    3
}

fn default_case_sensitive_paths() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Levels to search upward for a Python project marker file, per spec
    /// §4.2 ("search up to 3 levels").
    #[serde(default = "default_marker_search_depth")]
    pub python_project_marker_search_depth: u8,

    /// Ancestor directories of the Python project root tried during
    /// absolute-import search, per spec §4.2 ("up to 3 ancestor
    /// directories of the project root").
    #[serde(default = "default_ancestor_root_search_depth")]
    pub python_ancestor_root_search_depth: u8,

    /// Whether the in-memory file tree treats path components
    /// case-sensitively. Defaults to `true`, independent of host platform.
    #[serde(default = "default_case_sensitive_paths")]
    pub case_sensitive_paths: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            python_project_marker_search_depth: default_marker_search_depth(),
            python_ancestor_root_search_depth: default_ancestor_root_search_depth(),
            case_sensitive_paths: default_case_sensitive_paths(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec_constants() {
        let config = ResolverConfig::default();
        assert_eq!(config.python_project_marker_search_depth, 3);
        assert_eq!(config.python_ancestor_root_search_depth, 3);
        assert!(config.case_sensitive_paths);
    }

    #[test]
    fn partial_json_fills_remaining_fields_with_defaults() {
        let json = serde_json::json!({ "python_project_marker_search_depth": 5 });
        let config: ResolverConfig =
            serde_json::from_value(json).expect("partial config deserializes with defaults");
        assert_eq!(config.python_project_marker_search_depth, 5);
        assert_eq!(config.python_ancestor_root_search_depth, 3);
    }
}
