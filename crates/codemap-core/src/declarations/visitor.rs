//! Visitor protocol over declarations
//!
//! [`DeclarationTree::accept`] dispatches one id to exactly one handler and
//! never recurses on its own: a visitor that wants a namespace's types or a
//! class's members follows the child ids itself. Every handler receives the
//! owning tree so id back-references can be chased without extra state.

use super::nodes::{
    AssemblyDeclaration, ClassDeclaration, ConstantDeclaration, ConstructorDeclaration,
    DelegateDeclaration, EnumDeclaration, EventDeclaration, FieldDeclaration, InterfaceDeclaration,
    MemberDeclaration, MethodDeclaration, NamespaceDeclaration, PropertyDeclaration,
    RecordDeclaration, StructDeclaration, TypeDeclaration,
};
use super::{DeclarationId, DeclarationTree, MemberId, NamespaceId, TypeId};

/// Trait for consumers of declaration trees.
///
/// Implement the `visit_*` methods for the declaration kinds of interest;
/// the default implementations do nothing.
#[allow(unused_variables)]
pub trait DeclarationVisitor {
    /// Visit the assembly root.
    fn visit_assembly(&mut self, tree: &DeclarationTree, declaration: &AssemblyDeclaration) {}

    /// Visit a namespace declaration.
    fn visit_namespace(
        &mut self,
        tree: &DeclarationTree,
        id: NamespaceId,
        declaration: &NamespaceDeclaration,
    ) {
    }

    /// Visit an enum declaration.
    fn visit_enum(&mut self, tree: &DeclarationTree, id: TypeId, declaration: &EnumDeclaration) {}

    /// Visit a delegate declaration.
    fn visit_delegate(
        &mut self,
        tree: &DeclarationTree,
        id: TypeId,
        declaration: &DelegateDeclaration,
    ) {
    }

    /// Visit an interface declaration.
    fn visit_interface(
        &mut self,
        tree: &DeclarationTree,
        id: TypeId,
        declaration: &InterfaceDeclaration,
    ) {
    }

    /// Visit a class declaration.
    fn visit_class(&mut self, tree: &DeclarationTree, id: TypeId, declaration: &ClassDeclaration) {
    }

    /// Visit a struct declaration.
    fn visit_struct(
        &mut self,
        tree: &DeclarationTree,
        id: TypeId,
        declaration: &StructDeclaration,
    ) {
    }

    /// Visit a record declaration.
    fn visit_record(
        &mut self,
        tree: &DeclarationTree,
        id: TypeId,
        declaration: &RecordDeclaration,
    ) {
    }

    /// Visit a constant member.
    fn visit_constant(
        &mut self,
        tree: &DeclarationTree,
        id: MemberId,
        declaration: &ConstantDeclaration,
    ) {
    }

    /// Visit a field member.
    fn visit_field(&mut self, tree: &DeclarationTree, id: MemberId, declaration: &FieldDeclaration) {
    }

    /// Visit a constructor member.
    fn visit_constructor(
        &mut self,
        tree: &DeclarationTree,
        id: MemberId,
        declaration: &ConstructorDeclaration,
    ) {
    }

    /// Visit an event member.
    fn visit_event(&mut self, tree: &DeclarationTree, id: MemberId, declaration: &EventDeclaration) {
    }

    /// Visit a property member.
    fn visit_property(
        &mut self,
        tree: &DeclarationTree,
        id: MemberId,
        declaration: &PropertyDeclaration,
    ) {
    }

    /// Visit a method member.
    fn visit_method(
        &mut self,
        tree: &DeclarationTree,
        id: MemberId,
        declaration: &MethodDeclaration,
    ) {
    }
}

impl DeclarationTree {
    /// Dispatch a declaration to the matching visitor handler.
    ///
    /// Invokes precisely one handler exactly once.
    pub fn accept<V: DeclarationVisitor + ?Sized>(&self, id: DeclarationId, visitor: &mut V) {
        match id {
            DeclarationId::Assembly => visitor.visit_assembly(self, &self.assembly),
            DeclarationId::Namespace(namespace) => {
                visitor.visit_namespace(self, namespace, self.namespace(namespace));
            }
            DeclarationId::Type(ty) => match self.ty(ty) {
                TypeDeclaration::Enum(declaration) => visitor.visit_enum(self, ty, declaration),
                TypeDeclaration::Delegate(declaration) => {
                    visitor.visit_delegate(self, ty, declaration);
                }
                TypeDeclaration::Interface(declaration) => {
                    visitor.visit_interface(self, ty, declaration);
                }
                TypeDeclaration::Class(declaration) => visitor.visit_class(self, ty, declaration),
                TypeDeclaration::Struct(declaration) => {
                    visitor.visit_struct(self, ty, declaration);
                }
                TypeDeclaration::Record(declaration) => {
                    visitor.visit_record(self, ty, declaration);
                }
            },
            DeclarationId::Member(member) => match self.member(member) {
                MemberDeclaration::Constant(declaration) => {
                    visitor.visit_constant(self, member, declaration);
                }
                MemberDeclaration::Field(declaration) => {
                    visitor.visit_field(self, member, declaration);
                }
                MemberDeclaration::Constructor(declaration) => {
                    visitor.visit_constructor(self, member, declaration);
                }
                MemberDeclaration::Event(declaration) => {
                    visitor.visit_event(self, member, declaration);
                }
                MemberDeclaration::Property(declaration) => {
                    visitor.visit_property(self, member, declaration);
                }
                MemberDeclaration::Method(declaration) => {
                    visitor.visit_method(self, member, declaration);
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::nodes::{MemberBuckets, MemberModifiers, TypeBuckets};
    use super::super::DeclarationScope;
    use super::*;
    use crate::docs::Documentation;
    use crate::metadata::{AccessModifier, MetadataToken, Version};
    use crate::references::{MemberReference, TypeReference};

    fn sample_tree() -> DeclarationTree {
        let method = MethodDeclaration {
            name: "Run".to_string(),
            access: AccessModifier::Public,
            declaring_type: TypeId::new(0),
            token: MetadataToken(0x0600_0001),
            modifiers: MemberModifiers::default(),
            generic_parameters: Vec::new(),
            parameters: Vec::new(),
            return_type: MemberReference::Type(TypeReference::void()),
            attributes: Vec::new(),
            docs: Documentation::default(),
        };
        let class = ClassDeclaration {
            name: "Widget".to_string(),
            access: AccessModifier::Public,
            scope: DeclarationScope::Namespace(NamespaceId::new(0)),
            token: MetadataToken(0x0200_0001),
            generic_parameters: Vec::new(),
            base_class: None,
            interfaces: Vec::new(),
            is_abstract: false,
            is_sealed: false,
            is_static: false,
            members: MemberBuckets {
                methods: vec![MemberId::new(0)],
                ..MemberBuckets::default()
            },
            nested_types: TypeBuckets::default(),
            attributes: Vec::new(),
            docs: Documentation::default(),
        };
        let namespace = NamespaceDeclaration {
            name: "Tools".to_string(),
            types: TypeBuckets {
                classes: vec![TypeId::new(0)],
                ..TypeBuckets::default()
            },
            docs: Documentation::default(),
        };
        DeclarationTree {
            assembly: AssemblyDeclaration {
                name: "Tools".to_string(),
                version: Version::new(1, 0, 0, 0),
                culture: String::new(),
                public_key_token: None,
                attributes: Vec::new(),
                dependencies: Vec::new(),
                namespaces: vec![NamespaceId::new(0)],
                docs: Documentation::default(),
            },
            namespaces: vec![namespace],
            types: vec![TypeDeclaration::Class(class)],
            members: vec![MemberDeclaration::Method(method)],
        }
    }

    /// Counts handler invocations without following any child id.
    #[derive(Default)]
    struct CountingVisitor {
        assemblies: usize,
        namespaces: usize,
        classes: usize,
        methods: usize,
        total: usize,
    }

    impl DeclarationVisitor for CountingVisitor {
        fn visit_assembly(&mut self, _tree: &DeclarationTree, _declaration: &AssemblyDeclaration) {
            self.assemblies += 1;
            self.total += 1;
        }

        fn visit_namespace(
            &mut self,
            _tree: &DeclarationTree,
            _id: NamespaceId,
            _declaration: &NamespaceDeclaration,
        ) {
            self.namespaces += 1;
            self.total += 1;
        }

        fn visit_class(
            &mut self,
            _tree: &DeclarationTree,
            _id: TypeId,
            _declaration: &ClassDeclaration,
        ) {
            self.classes += 1;
            self.total += 1;
        }

        fn visit_method(
            &mut self,
            _tree: &DeclarationTree,
            _id: MemberId,
            _declaration: &MethodDeclaration,
        ) {
            self.methods += 1;
            self.total += 1;
        }
    }

    #[test]
    fn test_accept_dispatches_exactly_once() {
        let tree = sample_tree();
        let mut visitor = CountingVisitor::default();

        tree.accept(DeclarationId::Type(TypeId::new(0)), &mut visitor);

        // Only the class handler runs; members are not followed.
        assert_eq!(visitor.classes, 1);
        assert_eq!(visitor.methods, 0);
        assert_eq!(visitor.total, 1);
    }

    #[test]
    fn test_accept_covers_every_id_kind() {
        let tree = sample_tree();
        let mut visitor = CountingVisitor::default();

        tree.accept(DeclarationId::Assembly, &mut visitor);
        tree.accept(DeclarationId::Namespace(NamespaceId::new(0)), &mut visitor);
        tree.accept(DeclarationId::Type(TypeId::new(0)), &mut visitor);
        tree.accept(DeclarationId::Member(MemberId::new(0)), &mut visitor);

        assert_eq!(visitor.assemblies, 1);
        assert_eq!(visitor.namespaces, 1);
        assert_eq!(visitor.classes, 1);
        assert_eq!(visitor.methods, 1);
        assert_eq!(visitor.total, 4);
    }

    #[test]
    fn test_default_handlers_do_nothing() {
        struct Inert;
        impl DeclarationVisitor for Inert {}

        let tree = sample_tree();
        let mut visitor = Inert;
        tree.accept(DeclarationId::Assembly, &mut visitor);
    }

    #[test]
    fn test_tree_reference_views() {
        let tree = sample_tree();

        let reference = tree.type_reference(TypeId::new(0));
        assert_eq!(reference.name, "Widget");
        assert_eq!(reference.namespace, "Tools");
        assert!(reference.declaring_type.is_none());
        assert_eq!(
            reference.assembly.as_ref().map(|assembly| assembly.name.as_str()),
            Some("Tools")
        );

        match tree.member_reference(MemberId::new(0)) {
            MemberReference::Method(method) => {
                assert_eq!(method.name, "Run");
                assert_eq!(method.declaring_type.name, "Widget");
                assert!(method.parameter_types.is_empty());
            }
            other => panic!("expected a method reference, got {other:?}"),
        }
    }
}
