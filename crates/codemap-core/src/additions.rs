//! Documentation additions
//!
//! Additions supply documentation for assemblies and namespaces that have
//! none of their own, typically because XML doc comments cannot target
//! them. They run as a separate decoration pass after the tree is built:
//! [`DeclarationTree::apply_additions`] mutates documentation fields and
//! nothing else, and must complete before any visitor consumes the tree.

use crate::declarations::{AssemblyDeclaration, DeclarationTree, NamespaceDeclaration};
use crate::docs::{Block, Documentation, Example};
use crate::references::MemberReference;

/// Documentation overrides for an assembly
///
/// Content getters return `None` by default; only supplied sections
/// override what the tree already holds.
pub trait AssemblyDocumentationAddition {
    /// Whether this addition applies to the assembly
    fn applies_to(&self, assembly: &AssemblyDeclaration) -> bool;

    /// Replacement summary, when supplied
    fn summary(&self) -> Option<Vec<Block>> {
        None
    }

    /// Replacement remarks, when supplied
    fn remarks(&self) -> Option<Vec<Block>> {
        None
    }

    /// Replacement examples, when supplied
    fn examples(&self) -> Option<Vec<Example>> {
        None
    }

    /// Replacement related-members list, when supplied
    fn related_members(&self) -> Option<Vec<MemberReference>> {
        None
    }

    /// Namespace additions scoped to this addition
    fn namespace_additions(&self) -> Vec<&dyn NamespaceDocumentationAddition> {
        Vec::new()
    }
}

/// Documentation overrides for one namespace
pub trait NamespaceDocumentationAddition {
    /// Whether this addition applies to the namespace
    fn applies_to(&self, namespace: &NamespaceDeclaration) -> bool;

    /// Replacement summary, when supplied
    fn summary(&self) -> Option<Vec<Block>> {
        None
    }

    /// Replacement remarks, when supplied
    fn remarks(&self) -> Option<Vec<Block>> {
        None
    }

    /// Replacement examples, when supplied
    fn examples(&self) -> Option<Vec<Example>> {
        None
    }

    /// Replacement related-members list, when supplied
    fn related_members(&self) -> Option<Vec<MemberReference>> {
        None
    }
}

impl DeclarationTree {
    /// Apply the first addition whose predicate matches the assembly
    ///
    /// Later additions are ignored even when they also match. Within the
    /// winner, each content section overrides only when supplied; namespace
    /// additions follow the same first-match policy per namespace, scoped
    /// to the winner. An empty slice leaves the tree unchanged. Returns
    /// whether an addition matched.
    pub fn apply_additions(&mut self, additions: &[&dyn AssemblyDocumentationAddition]) -> bool {
        let Some(addition) = additions
            .iter()
            .find(|addition| addition.applies_to(&self.assembly))
        else {
            return false;
        };

        apply_sections(
            &mut self.assembly.docs,
            addition.summary(),
            addition.remarks(),
            addition.examples(),
            addition.related_members(),
        );

        let namespace_additions = addition.namespace_additions();
        for namespace in &mut self.namespaces {
            let Some(matching) = namespace_additions
                .iter()
                .find(|addition| addition.applies_to(namespace))
            else {
                continue;
            };
            apply_sections(
                &mut namespace.docs,
                matching.summary(),
                matching.remarks(),
                matching.examples(),
                matching.related_members(),
            );
        }
        true
    }
}

fn apply_sections(
    docs: &mut Documentation,
    summary: Option<Vec<Block>>,
    remarks: Option<Vec<Block>>,
    examples: Option<Vec<Example>>,
    related: Option<Vec<MemberReference>>,
) {
    if let Some(summary) = summary {
        docs.summary = summary;
    }
    if let Some(remarks) = remarks {
        docs.remarks = remarks;
    }
    if let Some(examples) = examples {
        docs.examples = examples;
    }
    if let Some(related) = related {
        docs.related = related;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declarations::DeclarationTreeBuilder;
    use crate::docs::Paragraph;
    use crate::metadata::{
        AccessFilter, AccessModifier, AssemblyMetadata, AssemblyName, MetadataToken, TypeKind,
        TypeMetadata, Version,
    };
    use crate::references::TypeReference;

    fn sample_tree() -> DeclarationTree {
        let mut assembly = AssemblyMetadata::new(AssemblyName::new(
            "CodeMap.Tests.Data",
            Version::new(1, 2, 3, 4),
        ));
        assembly.types = vec![
            TypeMetadata::new(
                MetadataToken(0x0200_0001),
                TypeKind::Class,
                "CodeMap.Tests",
                "Widget",
                AccessModifier::Public,
            ),
            TypeMetadata::new(
                MetadataToken(0x0200_0002),
                TypeKind::Struct,
                "CodeMap.Extras",
                "Gadget",
                AccessModifier::Public,
            ),
        ];
        DeclarationTreeBuilder::new(AccessFilter::Public).build(&assembly)
    }

    fn paragraph(text: &str) -> Vec<Block> {
        vec![Block::Paragraph(Paragraph::text(text))]
    }

    struct NamedAssemblyAddition {
        target: &'static str,
        summary: Option<&'static str>,
        remarks: Option<&'static str>,
        namespaces: Vec<NamedNamespaceAddition>,
    }

    impl NamedAssemblyAddition {
        fn matching(target: &'static str) -> Self {
            Self {
                target,
                summary: None,
                remarks: None,
                namespaces: Vec::new(),
            }
        }
    }

    impl AssemblyDocumentationAddition for NamedAssemblyAddition {
        fn applies_to(&self, assembly: &AssemblyDeclaration) -> bool {
            assembly.name == self.target
        }

        fn summary(&self) -> Option<Vec<Block>> {
            self.summary.map(paragraph)
        }

        fn remarks(&self) -> Option<Vec<Block>> {
            self.remarks.map(paragraph)
        }

        fn namespace_additions(&self) -> Vec<&dyn NamespaceDocumentationAddition> {
            self.namespaces
                .iter()
                .map(|addition| addition as &dyn NamespaceDocumentationAddition)
                .collect()
        }
    }

    struct NamedNamespaceAddition {
        target: &'static str,
        summary: &'static str,
    }

    impl NamespaceDocumentationAddition for NamedNamespaceAddition {
        fn applies_to(&self, namespace: &NamespaceDeclaration) -> bool {
            namespace.name == self.target
        }

        fn summary(&self) -> Option<Vec<Block>> {
            Some(paragraph(self.summary))
        }
    }

    #[test]
    fn test_first_matching_addition_wins() {
        let mut tree = sample_tree();
        let skipped = NamedAssemblyAddition {
            summary: Some("Wrong assembly."),
            ..NamedAssemblyAddition::matching("Other.Assembly")
        };
        let first = NamedAssemblyAddition {
            summary: Some("First match."),
            ..NamedAssemblyAddition::matching("CodeMap.Tests.Data")
        };
        let second = NamedAssemblyAddition {
            summary: Some("Second match."),
            ..NamedAssemblyAddition::matching("CodeMap.Tests.Data")
        };

        let applied = tree.apply_additions(&[&skipped, &first, &second]);
        assert!(applied);
        assert_eq!(
            tree.assembly().docs.first_summary_sentence().as_deref(),
            Some("First match.")
        );
    }

    #[test]
    fn test_unsupplied_sections_keep_prior_content() {
        let mut tree = sample_tree();
        let summary_only = NamedAssemblyAddition {
            summary: Some("A summary."),
            ..NamedAssemblyAddition::matching("CodeMap.Tests.Data")
        };
        tree.apply_additions(&[&summary_only]);

        let remarks_only = NamedAssemblyAddition {
            remarks: Some("Some remarks."),
            ..NamedAssemblyAddition::matching("CodeMap.Tests.Data")
        };
        tree.apply_additions(&[&remarks_only]);

        // The second pass set remarks without clearing the earlier summary.
        let docs = &tree.assembly().docs;
        assert_eq!(docs.first_summary_sentence().as_deref(), Some("A summary."));
        assert_eq!(docs.remarks, paragraph("Some remarks."));
    }

    #[test]
    fn test_no_match_leaves_tree_unchanged() {
        let mut tree = sample_tree();
        let addition = NamedAssemblyAddition {
            summary: Some("Wrong assembly."),
            ..NamedAssemblyAddition::matching("Other.Assembly")
        };

        let applied = tree.apply_additions(&[&addition]);
        assert!(!applied);
        assert!(tree.assembly().docs.is_empty());
    }

    #[test]
    fn test_empty_slice_applies_nothing() {
        let mut tree = sample_tree();
        assert!(!tree.apply_additions(&[]));
        assert!(tree.assembly().docs.is_empty());
    }

    #[test]
    fn test_namespace_additions_scoped_to_winner() {
        let mut tree = sample_tree();
        let addition = NamedAssemblyAddition {
            summary: Some("The assembly."),
            namespaces: vec![
                NamedNamespaceAddition {
                    target: "CodeMap.Tests",
                    summary: "The tests namespace.",
                },
                NamedNamespaceAddition {
                    target: "CodeMap.Tests",
                    summary: "A decoy that must not apply.",
                },
            ],
            ..NamedAssemblyAddition::matching("CodeMap.Tests.Data")
        };

        assert!(tree.apply_additions(&[&addition]));

        let mut summaries = tree.namespaces().map(|(_, namespace)| {
            (
                namespace.name.clone(),
                namespace.docs.first_summary_sentence(),
            )
        });
        assert_eq!(
            summaries.next(),
            Some((
                "CodeMap.Extras".to_string(),
                None,
            ))
        );
        assert_eq!(
            summaries.next(),
            Some((
                "CodeMap.Tests".to_string(),
                Some("The tests namespace.".to_string()),
            ))
        );
    }

    #[test]
    fn test_related_members_override() {
        let mut tree = sample_tree();

        struct RelatedAddition;
        impl AssemblyDocumentationAddition for RelatedAddition {
            fn applies_to(&self, assembly: &AssemblyDeclaration) -> bool {
                assembly.name == "CodeMap.Tests.Data"
            }

            fn related_members(&self) -> Option<Vec<MemberReference>> {
                Some(vec![MemberReference::Type(TypeReference::new(
                    "CodeMap.Tests",
                    "Widget",
                ))])
            }
        }

        assert!(tree.apply_additions(&[&RelatedAddition]));
        assert_eq!(tree.assembly().docs.related.len(), 1);
    }
}
