//! Search index extraction for `codemap search`.

use anyhow::Result;
use std::path::PathBuf;

use codemap_core::{build_search_index, search_index_json, LinkConfig};

use crate::snapshot;

/// Options for search index extraction.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Path to the metadata snapshot.
    pub snapshot: PathBuf,

    /// Companion XML documentation file.
    pub docs: Option<PathBuf>,

    /// Include non-public declarations.
    pub all: bool,

    /// Framework tag for external documentation links.
    pub framework: Option<String>,

    /// Additional assemblies documented by this site.
    pub project_assemblies: Vec<String>,

    /// Pretty-print the output.
    pub pretty: bool,

    /// Output file, stdout when absent.
    pub output: Option<PathBuf>,
}

/// Build a search index from a metadata snapshot.
pub fn build_index(options: SearchOptions) -> Result<()> {
    let tree = snapshot::load_tree(&options.snapshot, options.docs.as_deref(), options.all)?;

    let mut config = LinkConfig::default();
    if let Some(framework) = options.framework {
        config.framework_tag = framework;
    }
    config.project_assemblies.extend(options.project_assemblies);

    let entries = build_search_index(&tree, config);
    let value = search_index_json(&entries);
    snapshot::write_output(&value, options.pretty, options.output.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use codemap_core::testutil;
    use std::fs;
    use tempfile::TempDir;

    fn options(snapshot: PathBuf, output: PathBuf) -> SearchOptions {
        SearchOptions {
            snapshot,
            docs: None,
            all: false,
            framework: None,
            project_assemblies: Vec::new(),
            pretty: false,
            output: Some(output),
        }
    }

    #[test]
    fn test_build_index_writes_entries() {
        let tmp = TempDir::new().unwrap();
        let snapshot = tmp.path().join("assembly.json");
        fs::write(&snapshot, testutil::snapshot_json().unwrap()).unwrap();
        let output = tmp.path().join("index.json");

        build_index(options(snapshot, output.clone())).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let entries = value.as_array().unwrap();
        assert!(entries.iter().any(|entry| entry["k"] == "namespace"));
        assert!(entries.iter().any(|entry| entry["n"] == "TestStruct"));
    }

    #[test]
    fn test_index_links_are_project_relative() {
        let tmp = TempDir::new().unwrap();
        let snapshot = tmp.path().join("assembly.json");
        fs::write(&snapshot, testutil::snapshot_json().unwrap()).unwrap();
        let output = tmp.path().join("index.json");

        build_index(options(snapshot, output.clone())).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let entries = value.as_array().unwrap();

        // The snapshot's own assembly counts as a project assembly.
        let test_struct = entries
            .iter()
            .find(|entry| entry["n"] == "TestStruct")
            .unwrap();
        assert_eq!(test_struct["l"], "CodeMap.Tests.TestStruct.html");
    }
}
