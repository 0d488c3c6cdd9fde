//! Search index generation
//!
//! Walks a declaration tree and produces one entry per namespace, type,
//! and member for client-side search: display name, kind, dotted path,
//! the first summary sentence, and a page link resolved through
//! [`MemberLinkResolver`]. Entries serialize with short keys to keep the
//! shipped index small.

use serde::Serialize;
use serde_json::{json, Value};

use crate::declarations::{
    AssemblyDeclaration, ClassDeclaration, ConstantDeclaration, ConstructorDeclaration,
    DeclarationId, DeclarationTree, DeclarationVisitor, DelegateDeclaration, EnumDeclaration,
    EventDeclaration, FieldDeclaration, InterfaceDeclaration, MemberId, MethodDeclaration,
    NamespaceDeclaration, NamespaceId, PropertyDeclaration, RecordDeclaration, StructDeclaration,
    TypeId,
};
use crate::docs::Documentation;
use crate::links::{LinkConfig, MemberLinkResolver};
use crate::references::MemberReference;

/// A single entry in the search index
#[derive(Debug, Clone, Serialize)]
pub struct SearchEntry {
    /// Display name, generic parameters and signatures annotated
    #[serde(rename = "n")]
    pub name: String,
    /// Declaration kind
    #[serde(rename = "k")]
    pub kind: &'static str,
    /// Dotted qualified path
    #[serde(rename = "p")]
    pub path: String,
    /// First summary sentence, empty without documentation
    #[serde(rename = "d")]
    pub description: String,
    /// Page address, when the entry has one
    #[serde(rename = "l", skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Collect search entries for every namespace, type, and member
///
/// The tree's own assembly always counts as a project assembly, so its
/// types link to relative pages whatever the configuration says.
#[must_use]
pub fn build_search_index(tree: &DeclarationTree, mut config: LinkConfig) -> Vec<SearchEntry> {
    let name = &tree.assembly().name;
    if !config.project_assemblies.iter().any(|existing| existing == name) {
        config.project_assemblies.push(name.clone());
    }

    let mut builder = SearchIndexBuilder::new(config);
    tree.accept(DeclarationId::Assembly, &mut builder);
    builder.into_entries()
}

/// Serialize entries with the short-key layout
#[must_use]
pub fn search_index_json(entries: &[SearchEntry]) -> Value {
    json!(entries)
}

/// Declaration visitor collecting search entries
///
/// The global namespace gets no entry of its own, but its types are still
/// indexed.
#[derive(Debug)]
pub struct SearchIndexBuilder {
    resolver: MemberLinkResolver,
    entries: Vec<SearchEntry>,
}

impl SearchIndexBuilder {
    /// Create a builder resolving links with the given configuration
    #[must_use]
    pub fn new(config: LinkConfig) -> Self {
        Self {
            resolver: MemberLinkResolver::new(config),
            entries: Vec::new(),
        }
    }

    /// The entries collected so far
    #[must_use]
    pub fn into_entries(self) -> Vec<SearchEntry> {
        self.entries
    }

    fn push_type(
        &mut self,
        tree: &DeclarationTree,
        id: TypeId,
        kind: &'static str,
        docs: &Documentation,
    ) {
        let link = self
            .resolver
            .resolve(&MemberReference::Type(tree.type_reference(id)));
        self.entries.push(SearchEntry {
            name: tree.simple_name(DeclarationId::Type(id)),
            kind,
            path: tree.full_name(DeclarationId::Type(id)),
            description: first_sentence(docs),
            link,
        });
    }

    fn push_member(
        &mut self,
        tree: &DeclarationTree,
        id: MemberId,
        kind: &'static str,
        docs: &Documentation,
    ) {
        let link = self.resolver.resolve(&tree.member_reference(id));
        self.entries.push(SearchEntry {
            name: tree.simple_name(DeclarationId::Member(id)),
            kind,
            path: tree.full_name(DeclarationId::Member(id)),
            description: first_sentence(docs),
            link,
        });
    }
}

impl DeclarationVisitor for SearchIndexBuilder {
    fn visit_assembly(&mut self, tree: &DeclarationTree, declaration: &AssemblyDeclaration) {
        for id in &declaration.namespaces {
            tree.accept(DeclarationId::Namespace(*id), self);
        }
    }

    fn visit_namespace(
        &mut self,
        tree: &DeclarationTree,
        id: NamespaceId,
        declaration: &NamespaceDeclaration,
    ) {
        if !declaration.is_global() {
            self.entries.push(SearchEntry {
                name: declaration.name.clone(),
                kind: "namespace",
                path: tree.full_name(DeclarationId::Namespace(id)),
                description: first_sentence(&declaration.docs),
                link: None,
            });
        }
        for ty in declaration.types.iter() {
            tree.accept(DeclarationId::Type(ty), self);
        }
    }

    fn visit_enum(&mut self, tree: &DeclarationTree, id: TypeId, declaration: &EnumDeclaration) {
        self.push_type(tree, id, "enum", &declaration.docs);
        for member in &declaration.members {
            tree.accept(DeclarationId::Member(*member), self);
        }
    }

    fn visit_delegate(
        &mut self,
        tree: &DeclarationTree,
        id: TypeId,
        declaration: &DelegateDeclaration,
    ) {
        self.push_type(tree, id, "delegate", &declaration.docs);
    }

    fn visit_interface(
        &mut self,
        tree: &DeclarationTree,
        id: TypeId,
        declaration: &InterfaceDeclaration,
    ) {
        self.push_type(tree, id, "interface", &declaration.docs);
        for member in declaration.members() {
            tree.accept(DeclarationId::Member(member), self);
        }
    }

    fn visit_class(&mut self, tree: &DeclarationTree, id: TypeId, declaration: &ClassDeclaration) {
        self.push_type(tree, id, "class", &declaration.docs);
        for member in declaration.members.iter() {
            tree.accept(DeclarationId::Member(member), self);
        }
        for nested in declaration.nested_types.iter() {
            tree.accept(DeclarationId::Type(nested), self);
        }
    }

    fn visit_struct(
        &mut self,
        tree: &DeclarationTree,
        id: TypeId,
        declaration: &StructDeclaration,
    ) {
        self.push_type(tree, id, "struct", &declaration.docs);
        for member in declaration.members.iter() {
            tree.accept(DeclarationId::Member(member), self);
        }
        for nested in declaration.nested_types.iter() {
            tree.accept(DeclarationId::Type(nested), self);
        }
    }

    fn visit_record(
        &mut self,
        tree: &DeclarationTree,
        id: TypeId,
        declaration: &RecordDeclaration,
    ) {
        self.push_type(tree, id, "record", &declaration.docs);
        for member in declaration.members.iter() {
            tree.accept(DeclarationId::Member(member), self);
        }
        for nested in declaration.nested_types.iter() {
            tree.accept(DeclarationId::Type(nested), self);
        }
    }

    fn visit_constant(
        &mut self,
        tree: &DeclarationTree,
        id: MemberId,
        declaration: &ConstantDeclaration,
    ) {
        self.push_member(tree, id, "constant", &declaration.docs);
    }

    fn visit_field(
        &mut self,
        tree: &DeclarationTree,
        id: MemberId,
        declaration: &FieldDeclaration,
    ) {
        self.push_member(tree, id, "field", &declaration.docs);
    }

    fn visit_constructor(
        &mut self,
        tree: &DeclarationTree,
        id: MemberId,
        declaration: &ConstructorDeclaration,
    ) {
        self.push_member(tree, id, "constructor", &declaration.docs);
    }

    fn visit_event(
        &mut self,
        tree: &DeclarationTree,
        id: MemberId,
        declaration: &EventDeclaration,
    ) {
        self.push_member(tree, id, "event", &declaration.docs);
    }

    fn visit_property(
        &mut self,
        tree: &DeclarationTree,
        id: MemberId,
        declaration: &PropertyDeclaration,
    ) {
        self.push_member(tree, id, "property", &declaration.docs);
    }

    fn visit_method(
        &mut self,
        tree: &DeclarationTree,
        id: MemberId,
        declaration: &MethodDeclaration,
    ) {
        self.push_member(tree, id, "method", &declaration.docs);
    }
}

fn first_sentence(docs: &Documentation) -> String {
    docs.first_summary_sentence().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declarations::DeclarationTreeBuilder;
    use crate::docs::XmlDocs;
    use crate::metadata::{
        AccessFilter, AccessModifier, AssemblyMetadata, AssemblyName, MemberKind, MemberMetadata,
        MetadataToken, TypeKind, TypeMetadata, TypeRef, Version,
    };

    fn sample_tree() -> DeclarationTree {
        let mut assembly = AssemblyMetadata::new(AssemblyName::new(
            "CodeMap.Tests.Data",
            Version::new(1, 2, 3, 4),
        ));

        let mut widget = TypeMetadata::new(
            MetadataToken(0x0200_0001),
            TypeKind::Class,
            "CodeMap.Tests",
            "Widget",
            AccessModifier::Public,
        );
        let mut run = MemberMetadata::new(
            MetadataToken(0x0600_0001),
            "Run",
            MemberKind::Method,
            AccessModifier::Public,
        );
        run.return_type = Some(TypeRef::Void);
        widget.members.push(run);

        let loose = TypeMetadata::new(
            MetadataToken(0x0200_0002),
            TypeKind::Struct,
            "",
            "Loose",
            AccessModifier::Public,
        );

        assembly.types = vec![widget, loose];

        let xml = r#"
            <doc>
              <members>
                <member name="T:CodeMap.Tests.Widget">
                  <summary>A widget. It runs.</summary>
                </member>
              </members>
            </doc>"#;
        let docs = XmlDocs::parse(xml).expect("sample docs parse");
        DeclarationTreeBuilder::new(AccessFilter::Public)
            .with_documentation(&docs)
            .build(&assembly)
    }

    fn entry<'a>(entries: &'a [SearchEntry], kind: &str, name: &str) -> &'a SearchEntry {
        entries
            .iter()
            .find(|entry| entry.kind == kind && entry.name == name)
            .unwrap_or_else(|| panic!("no {kind} entry named {name}"))
    }

    #[test]
    fn test_index_covers_namespaces_types_and_members() {
        let tree = sample_tree();
        let entries = build_search_index(&tree, LinkConfig::default());

        let namespace = entry(&entries, "namespace", "CodeMap.Tests");
        assert_eq!(namespace.path, "CodeMap.Tests");
        assert_eq!(namespace.link, None);

        let class = entry(&entries, "class", "Widget");
        assert_eq!(class.path, "CodeMap.Tests.Widget");
        assert_eq!(class.description, "A widget.");

        let method = entry(&entries, "method", "Run()");
        assert_eq!(method.path, "CodeMap.Tests.Widget.Run");
    }

    #[test]
    fn test_global_namespace_types_indexed_without_namespace_entry() {
        let tree = sample_tree();
        let entries = build_search_index(&tree, LinkConfig::default());

        assert!(!entries
            .iter()
            .any(|entry| entry.kind == "namespace" && entry.name.is_empty()));
        let loose = entry(&entries, "struct", "Loose");
        assert_eq!(loose.path, "Loose");
    }

    #[test]
    fn test_project_types_get_relative_links() {
        let tree = sample_tree();
        let entries = build_search_index(&tree, LinkConfig::default());

        let class = entry(&entries, "class", "Widget");
        assert_eq!(class.link.as_deref(), Some("CodeMap.Tests.Widget.html"));

        let method = entry(&entries, "method", "Run()");
        assert_eq!(method.link.as_deref(), Some("CodeMap.Tests.Widget.html#run"));
    }

    #[test]
    fn test_short_key_serialization() {
        let tree = sample_tree();
        let entries = build_search_index(&tree, LinkConfig::default());
        let value = search_index_json(&entries);

        let class = value
            .as_array()
            .expect("index array")
            .iter()
            .find(|entry| entry["n"] == "Widget")
            .expect("Widget entry");
        assert_eq!(class["k"], "class");
        assert_eq!(class["p"], "CodeMap.Tests.Widget");
        assert_eq!(class["d"], "A widget.");
        assert_eq!(class["l"], "CodeMap.Tests.Widget.html");

        let namespace = value
            .as_array()
            .expect("index array")
            .iter()
            .find(|entry| entry["n"] == "CodeMap.Tests")
            .expect("namespace entry");
        // Linkless entries omit the key entirely.
        assert!(namespace.get("l").is_none());
    }
}
