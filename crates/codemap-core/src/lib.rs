//! CodeMap Core - Documentation model for .NET assembly metadata
//!
//! This crate provides the core functionality:
//! - Metadata: Assembly snapshot model and access filtering
//! - References: Cross-assembly member references and their JSON form
//! - Docs: XML documentation parsing and doc-comment identifiers
//! - Declarations: The assembly declaration tree and its visitors
//! - Links: Resolution of member references to documentation URLs
//! - Additions: Post-build documentation merging
//! - Search: Search index extraction

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Metadata snapshot model - assembly, type, and member rows
pub mod metadata;

/// Member reference model - resolved references between declarations
pub mod references;

/// XML documentation - parsing and doc-comment identifiers
pub mod docs;

/// Declaration tree - the documented view of an assembly
pub mod declarations;

/// Link resolution - documentation URLs for member references
pub mod links;

/// Documentation additions - merging content into a built tree
pub mod additions;

/// Search index - flat entries for client-side search
pub mod search;

/// Test utilities - a sample snapshot shared by tests and benchmarks
pub mod testutil;

/// Convenience re-export of the tree builder
pub use declarations::DeclarationTreeBuilder;

/// Convenience re-export of the declaration tree
pub use declarations::{DeclarationTree, DeclarationVisitor};

/// Convenience re-export of the JSON renderer
pub use declarations::declaration_json;

/// Convenience re-export of the snapshot model
pub use metadata::{AccessFilter, AssemblyMetadata};

/// Convenience re-export of member references
pub use references::{MemberReference, MemberReferenceVisitor};

/// Convenience re-export of XML documentation
pub use docs::XmlDocs;

/// Convenience re-export of link resolution
pub use links::{LinkConfig, MemberLinkResolver};

/// Convenience re-export of documentation additions
pub use additions::{AssemblyDocumentationAddition, NamespaceDocumentationAddition};

/// Convenience re-export of search index extraction
pub use search::{build_search_index, search_index_json, SearchEntry};

#[cfg(test)]
mod tests {
    use super::*;
    use declarations::DeclarationId;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }

    /// Helper to build the sample tree and render its assembly JSON
    fn render_sample() -> serde_json::Value {
        let tree = testutil::sample_tree(AccessFilter::Public).unwrap();
        declaration_json(&tree, DeclarationId::Assembly)
    }

    #[test]
    fn test_snapshot_to_json_pipeline() {
        let json = render_sample();
        assert_eq!(json["kind"], "assembly");
        assert_eq!(json["name"], "CodeMap.Tests.Data");
        assert_eq!(json["version"], "1.2.3.4");

        let namespaces = json["namespaces"].as_array().unwrap();
        assert_eq!(namespaces.len(), 1);
        assert_eq!(namespaces[0]["name"], "CodeMap.Tests");
    }

    #[test]
    fn test_declared_types_cover_every_kind() {
        let json = render_sample();
        let types = json["namespaces"][0]["declaredTypes"].as_array().unwrap();

        let kinds: Vec<&str> = types
            .iter()
            .map(|ty| ty["kind"].as_str().unwrap())
            .collect();
        assert_eq!(
            kinds,
            ["enum", "delegate", "interface", "record", "class", "struct"]
        );
    }

    #[test]
    fn test_access_filter_admits_internal_types() {
        let public = testutil::sample_tree(AccessFilter::Public).unwrap();
        let all = testutil::sample_tree(AccessFilter::All).unwrap();
        assert_eq!(public.types().count() + 1, all.types().count());
    }

    #[test]
    fn test_documentation_reaches_rendered_members() {
        let json = render_sample();
        let types = json["namespaces"][0]["declaredTypes"].as_array().unwrap();
        let class = types
            .iter()
            .find(|ty| ty["name"] == "TestClass")
            .unwrap();

        let summary = class["summary"][0]["content"][0]["text"].as_str().unwrap();
        assert!(summary.starts_with("A generic class"));

        let method = class["members"]
            .as_array()
            .unwrap()
            .iter()
            .find(|member| member["name"] == "TestMethod")
            .unwrap();
        assert_eq!(method["exceptions"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_search_index_end_to_end() {
        let tree = testutil::sample_tree(AccessFilter::Public).unwrap();
        let entries = build_search_index(&tree, LinkConfig::default());

        assert!(entries.iter().any(|entry| entry.kind == "namespace"));
        assert!(entries
            .iter()
            .any(|entry| entry.path == "CodeMap.Tests.TestClass`1"));

        let json = search_index_json(&entries);
        assert_eq!(json.as_array().unwrap().len(), entries.len());
    }
}
