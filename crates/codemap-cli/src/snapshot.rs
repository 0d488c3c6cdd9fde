//! Snapshot loading shared by the CLI commands.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use codemap_core::{
    AccessFilter, AssemblyMetadata, DeclarationTree, DeclarationTreeBuilder, XmlDocs,
};

/// Read a metadata snapshot and build its declaration tree.
pub fn load_tree(snapshot: &Path, docs: Option<&Path>, all: bool) -> Result<DeclarationTree> {
    let text = fs::read_to_string(snapshot)
        .with_context(|| format!("Failed to read snapshot `{}`", snapshot.display()))?;
    let assembly: AssemblyMetadata = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse snapshot `{}`", snapshot.display()))?;

    let filter = if all {
        AccessFilter::All
    } else {
        AccessFilter::Public
    };
    let builder = DeclarationTreeBuilder::new(filter);

    let tree = match docs {
        Some(path) => {
            let xml = fs::read_to_string(path)
                .with_context(|| format!("Failed to read documentation `{}`", path.display()))?;
            let parsed = XmlDocs::parse(&xml)
                .with_context(|| format!("Failed to parse documentation `{}`", path.display()))?;
            builder.with_documentation(&parsed).build(&assembly)
        }
        None => builder.build(&assembly),
    };

    Ok(tree)
}

/// Write a rendered value to the output file, or stdout when absent.
pub fn write_output(value: &serde_json::Value, pretty: bool, output: Option<&Path>) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    } else {
        serde_json::to_string(value).context("Failed to serialize output")?
    };

    match output {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("Failed to write `{}`", path.display()))?,
        None => println!("{text}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use codemap_core::testutil;
    use tempfile::TempDir;

    #[test]
    fn test_load_tree_without_docs() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("assembly.json");
        fs::write(&path, testutil::snapshot_json().unwrap()).unwrap();

        let tree = load_tree(&path, None, false).unwrap();
        assert_eq!(tree.assembly().name, "CodeMap.Tests.Data");
    }

    #[test]
    fn test_load_tree_honors_all_filter() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("assembly.json");
        fs::write(&path, testutil::snapshot_json().unwrap()).unwrap();

        let public = load_tree(&path, None, false).unwrap();
        let all = load_tree(&path, None, true).unwrap();
        assert!(all.types().count() > public.types().count());
    }

    #[test]
    fn test_missing_snapshot_reports_path() {
        let error = load_tree(Path::new("no-such-snapshot.json"), None, false).unwrap_err();
        assert!(error.to_string().contains("no-such-snapshot.json"));
    }

    #[test]
    fn test_malformed_docs_reports_path() {
        let tmp = TempDir::new().unwrap();
        let snapshot = tmp.path().join("assembly.json");
        fs::write(&snapshot, testutil::snapshot_json().unwrap()).unwrap();
        let docs = tmp.path().join("broken.xml");
        fs::write(&docs, "<doc><members>").unwrap();

        let error = load_tree(&snapshot, Some(&docs), false).unwrap_err();
        assert!(error.to_string().contains("broken.xml"));
    }
}
