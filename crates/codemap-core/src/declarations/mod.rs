//! Declaration tree
//!
//! The declaration tree is the semantic model of one assembly: the metadata
//! snapshot resolved into per-kind declaration nodes with documentation
//! attached. Nodes live in arenas owned by [`DeclarationTree`] and point at
//! each other through [`NamespaceId`], [`TypeId`], and [`MemberId`], so a
//! member can name its declaring type without owning it. Trees are built by
//! [`DeclarationTreeBuilder`] and never mutated afterwards except by the
//! documentation addition pass.

mod builder;
mod json;
mod names;
mod nodes;
mod visitor;

pub use builder::DeclarationTreeBuilder;
pub use json::{declaration_json, DeclarationJsonWriter};
pub use names::{FullNameVisitor, SimpleNameVisitor};
pub use nodes::{
    AccessorData, AssemblyDeclaration, AttributeArgumentData, AttributeData, ClassDeclaration,
    ConstantDeclaration, ConstructorDeclaration, DelegateDeclaration, EnumDeclaration,
    EventDeclaration, FieldDeclaration, GenericParameterData, InterfaceDeclaration, MemberBuckets,
    MemberDeclaration, MemberModifiers, MethodDeclaration, NamedAttributeArgumentData,
    NamespaceDeclaration, ParameterData, PropertyDeclaration, RecordDeclaration, StructDeclaration,
    TypeBuckets, TypeDeclaration,
};
pub use visitor::DeclarationVisitor;

use crate::references::{
    AssemblyReference, ConstantReference, ConstructorReference, EventReference, FieldReference,
    GenericMethodParameterReference, GenericTypeParameterReference, MemberReference,
    MethodReference, PropertyReference, TypeReference,
};

/// Arena index of a namespace declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamespaceId(u32);

impl NamespaceId {
    pub(crate) fn new(value: u32) -> Self {
        Self(value)
    }

    /// Position in the owning tree's namespace arena
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Arena index of a type declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    pub(crate) fn new(value: u32) -> Self {
        Self(value)
    }

    /// Position in the owning tree's type arena
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Arena index of a member declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberId(u32);

impl MemberId {
    pub(crate) fn new(value: u32) -> Self {
        Self(value)
    }

    /// Position in the owning tree's member arena
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Any addressable declaration in a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationId {
    /// The assembly root
    Assembly,
    /// A namespace declaration
    Namespace(NamespaceId),
    /// A type declaration of any kind
    Type(TypeId),
    /// A member declaration of any kind
    Member(MemberId),
}

/// Where a type is declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationScope {
    /// Directly inside a namespace
    Namespace(NamespaceId),
    /// Nested inside another type
    Nested(TypeId),
}

/// One assembly resolved into declarations
///
/// Ids handed out by a tree are only meaningful against that same tree;
/// the accessors index the arenas directly.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationTree {
    pub(crate) assembly: AssemblyDeclaration,
    pub(crate) namespaces: Vec<NamespaceDeclaration>,
    pub(crate) types: Vec<TypeDeclaration>,
    pub(crate) members: Vec<MemberDeclaration>,
}

impl DeclarationTree {
    /// The assembly root declaration
    #[must_use]
    pub fn assembly(&self) -> &AssemblyDeclaration {
        &self.assembly
    }

    /// Look up a namespace declaration
    #[must_use]
    pub fn namespace(&self, id: NamespaceId) -> &NamespaceDeclaration {
        &self.namespaces[id.index()]
    }

    /// Look up a type declaration
    #[must_use]
    pub fn ty(&self, id: TypeId) -> &TypeDeclaration {
        &self.types[id.index()]
    }

    /// Look up a member declaration
    #[must_use]
    pub fn member(&self, id: MemberId) -> &MemberDeclaration {
        &self.members[id.index()]
    }

    /// All namespaces with their ids, in the assembly's sorted order
    pub fn namespaces(&self) -> impl Iterator<Item = (NamespaceId, &NamespaceDeclaration)> {
        (0u32..).map(NamespaceId::new).zip(&self.namespaces)
    }

    /// All types with their ids, in arena order
    pub fn types(&self) -> impl Iterator<Item = (TypeId, &TypeDeclaration)> {
        (0u32..).map(TypeId::new).zip(&self.types)
    }

    /// All members with their ids, in arena order
    pub fn members(&self) -> impl Iterator<Item = (MemberId, &MemberDeclaration)> {
        (0u32..).map(MemberId::new).zip(&self.members)
    }

    /// The namespace a type ultimately lives in, walking out of nesting
    #[must_use]
    pub fn namespace_of(&self, id: TypeId) -> NamespaceId {
        let mut current = id;
        loop {
            match self.ty(current).scope() {
                DeclarationScope::Namespace(namespace) => return namespace,
                DeclarationScope::Nested(declaring) => current = declaring,
            }
        }
    }

    /// Reference-model identity of the documented assembly
    #[must_use]
    pub fn assembly_reference(&self) -> AssemblyReference {
        self.assembly.reference()
    }

    /// The generic parameters a type declares itself, outer ones excluded
    ///
    /// Type rows carry every visible parameter; the declaring chain owns
    /// the leading ones.
    #[must_use]
    pub fn own_generic_parameters(&self, id: TypeId) -> &[GenericParameterData] {
        let declaration = self.ty(id);
        let visible = declaration.generic_parameters();
        let outer = match declaration.scope() {
            DeclarationScope::Nested(declaring) => self.ty(declaring).generic_parameters().len(),
            DeclarationScope::Namespace(_) => 0,
        };
        visible.get(outer..).unwrap_or(&[])
    }

    /// Reference-model view of a declared type, open generic form
    ///
    /// Generic parameters appear as generic-argument references at the level
    /// that declares them, and the declaring chain is materialized.
    #[must_use]
    pub fn type_reference(&self, id: TypeId) -> TypeReference {
        let declaration = self.ty(id);
        let namespace = &self.namespace(self.namespace_of(id)).name;
        let arguments: Vec<MemberReference> = self
            .own_generic_parameters(id)
            .iter()
            .map(|parameter| {
                MemberReference::GenericTypeParameter(GenericTypeParameterReference::new(
                    &parameter.name,
                ))
            })
            .collect();
        let mut reference = TypeReference::new(namespace, declaration.name())
            .with_generic_arguments(arguments)
            .with_assembly(self.assembly_reference());
        if let DeclarationScope::Nested(declaring) = declaration.scope() {
            reference = reference.with_declaring_type(self.type_reference(declaring));
        }
        reference
    }

    /// Reference-model view of a declared member
    #[must_use]
    pub fn member_reference(&self, id: MemberId) -> MemberReference {
        let declaration = self.member(id);
        let declaring_type = self.type_reference(declaration.declaring_type());
        match declaration {
            MemberDeclaration::Constant(constant) => {
                MemberReference::Constant(ConstantReference {
                    name: constant.name.clone(),
                    declaring_type,
                })
            }
            MemberDeclaration::Field(field) => MemberReference::Field(FieldReference {
                name: field.name.clone(),
                declaring_type,
            }),
            MemberDeclaration::Constructor(constructor) => {
                MemberReference::Constructor(ConstructorReference {
                    declaring_type,
                    parameter_types: parameter_types(&constructor.parameters),
                })
            }
            MemberDeclaration::Event(event) => MemberReference::Event(EventReference {
                name: event.name.clone(),
                declaring_type,
            }),
            MemberDeclaration::Property(property) => {
                MemberReference::Property(PropertyReference {
                    name: property.name.clone(),
                    declaring_type,
                    parameter_types: parameter_types(&property.parameters),
                })
            }
            MemberDeclaration::Method(method) => MemberReference::Method(MethodReference {
                name: method.name.clone(),
                declaring_type,
                generic_arguments: method
                    .generic_parameters
                    .iter()
                    .map(|parameter| {
                        MemberReference::GenericMethodParameter(
                            GenericMethodParameterReference::new(&parameter.name),
                        )
                    })
                    .collect(),
                parameter_types: parameter_types(&method.parameters),
            }),
        }
    }
}

fn parameter_types(parameters: &[ParameterData]) -> Vec<MemberReference> {
    parameters
        .iter()
        .map(|parameter| parameter.ty.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_indices() {
        assert_eq!(NamespaceId::new(7).index(), 7);
        assert_eq!(TypeId::new(3).index(), 3);
        assert_eq!(MemberId::new(0).index(), 0);
    }

    #[test]
    fn test_ids_are_ordered() {
        assert!(TypeId::new(1) < TypeId::new(2));
        assert_eq!(MemberId::new(4), MemberId::new(4));
    }
}
