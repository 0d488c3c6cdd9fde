//! Declaration node data
//!
//! One struct per declaration kind, grouped under the `TypeDeclaration` and
//! `MemberDeclaration` enums. Nodes refer to each other through arena ids,
//! never through owned subtrees, so declaring-type back-references and
//! self-referential generic constraints stay cheap and cycle-free at the
//! ownership level. Fields are public; mutation is still confined to the
//! addition pass because the tree hands out shared references only.

use crate::docs::{Block, Documentation};
use crate::metadata::{
    AccessModifier, AssemblyMetadata, AssemblyName, ConstantValue, GenericVariance, MemberKind,
    MemberMetadata, MetadataToken, ParameterPassing, TypeKind, TypeMetadata, Version,
};
use crate::references::{AssemblyReference, MemberReference, TypeReference};

use super::{DeclarationScope, MemberId, NamespaceId, TypeId};

/// An attribute applied to a declaration
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeData {
    /// The attribute type
    pub ty: TypeReference,
    /// Positional constructor arguments
    pub positional: Vec<AttributeArgumentData>,
    /// Named property/field arguments
    pub named: Vec<NamedAttributeArgumentData>,
}

/// A positional attribute argument
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeArgumentData {
    /// The argument value
    pub value: ConstantValue<MemberReference>,
    /// The declared argument type
    pub ty: MemberReference,
}

/// A named attribute argument
#[derive(Debug, Clone, PartialEq)]
pub struct NamedAttributeArgumentData {
    /// Property or field name
    pub name: String,
    /// The argument value
    pub value: ConstantValue<MemberReference>,
    /// The declared argument type
    pub ty: MemberReference,
}

/// A parameter of a method, constructor, delegate, or indexer
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterData {
    /// Parameter name
    pub name: String,
    /// Parameter type
    pub ty: MemberReference,
    /// Pass-by semantics
    pub passing: ParameterPassing,
    /// Attributes on the parameter
    pub attributes: Vec<AttributeData>,
    /// Default value; `Some(Null)` is a null default, `None` is no default
    pub default_value: Option<ConstantValue<MemberReference>>,
    /// Documentation from the matching `<param>` element
    pub description: Vec<Block>,
}

/// A generic parameter declared by a type or method
#[derive(Debug, Clone, PartialEq)]
pub struct GenericParameterData {
    /// Parameter name
    pub name: String,
    /// Zero-based declaration position
    pub position: u32,
    /// Declared variance
    pub variance: GenericVariance,
    /// `where T : class`
    pub has_reference_type_constraint: bool,
    /// `where T : struct`
    pub has_value_type_constraint: bool,
    /// `where T : new()`
    pub has_default_constructor_constraint: bool,
    /// Type constraints; may refer back to the owning type
    pub type_constraints: Vec<MemberReference>,
    /// Documentation from the matching `<typeparam>` element
    pub description: Vec<Block>,
}

/// Modifier flags shared by events, properties, and methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemberModifiers {
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_virtual: bool,
    pub is_override: bool,
    pub is_sealed: bool,
    pub is_shadowing: bool,
}

/// One accessor of a property
#[derive(Debug, Clone, PartialEq)]
pub struct AccessorData {
    /// Accessor access modifier, which may be tighter than the property's
    pub access: AccessModifier,
    /// Attributes on the accessor
    pub attributes: Vec<AttributeData>,
}

/// Member ids partitioned by kind, preserving declaration order per bucket
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberBuckets {
    pub constants: Vec<MemberId>,
    pub fields: Vec<MemberId>,
    pub constructors: Vec<MemberId>,
    pub events: Vec<MemberId>,
    pub properties: Vec<MemberId>,
    pub methods: Vec<MemberId>,
}

impl MemberBuckets {
    /// All members in canonical order: constants, fields, constructors,
    /// events, properties, methods
    pub fn iter(&self) -> impl Iterator<Item = MemberId> + '_ {
        self.constants
            .iter()
            .chain(&self.fields)
            .chain(&self.constructors)
            .chain(&self.events)
            .chain(&self.properties)
            .chain(&self.methods)
            .copied()
    }

    /// Total member count across buckets
    #[must_use]
    pub fn len(&self) -> usize {
        self.constants.len()
            + self.fields.len()
            + self.constructors.len()
            + self.events.len()
            + self.properties.len()
            + self.methods.len()
    }

    /// Whether every bucket is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Type ids partitioned by kind, preserving declaration order per bucket
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeBuckets {
    pub enums: Vec<TypeId>,
    pub delegates: Vec<TypeId>,
    pub interfaces: Vec<TypeId>,
    pub records: Vec<TypeId>,
    pub classes: Vec<TypeId>,
    pub structs: Vec<TypeId>,
}

impl TypeBuckets {
    /// All types in canonical order: enums, delegates, interfaces, records,
    /// classes, structs
    pub fn iter(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.enums
            .iter()
            .chain(&self.delegates)
            .chain(&self.interfaces)
            .chain(&self.records)
            .chain(&self.classes)
            .chain(&self.structs)
            .copied()
    }

    /// Total type count across buckets
    #[must_use]
    pub fn len(&self) -> usize {
        self.enums.len()
            + self.delegates.len()
            + self.interfaces.len()
            + self.records.len()
            + self.classes.len()
            + self.structs.len()
    }

    /// Whether every bucket is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The root declaration: one documented assembly
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyDeclaration {
    /// Simple assembly name
    pub name: String,
    /// Assembly version
    pub version: Version,
    /// Culture name, empty for the neutral culture
    pub culture: String,
    /// Public-key token as lowercase hex, if the assembly is signed
    pub public_key_token: Option<String>,
    /// Assembly-level attributes
    pub attributes: Vec<AttributeData>,
    /// Referenced assemblies
    pub dependencies: Vec<AssemblyReference>,
    /// Child namespaces, sorted by name with the global namespace first
    pub namespaces: Vec<NamespaceId>,
    /// Documentation, filled by the addition pass
    pub docs: Documentation,
}

impl AssemblyDeclaration {
    /// Reference-model identity of this assembly
    #[must_use]
    pub fn reference(&self) -> AssemblyReference {
        AssemblyReference {
            name: self.name.clone(),
            version: self.version,
            culture: self.culture.clone(),
            public_key_token: self.public_key_token.clone(),
        }
    }
}

// The declaration is interchangeable with the identity it was built from.
impl PartialEq<AssemblyName> for AssemblyDeclaration {
    fn eq(&self, other: &AssemblyName) -> bool {
        self.name == other.name
            && self.version == other.version
            && self.culture == other.culture
            && self.public_key_token == other.public_key_token
    }
}

impl PartialEq<AssemblyMetadata> for AssemblyDeclaration {
    fn eq(&self, other: &AssemblyMetadata) -> bool {
        *self == other.name
    }
}

/// A namespace and the types it declares
///
/// The global namespace is the sentinel with an empty name.
#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceDeclaration {
    /// Namespace name, empty for the global namespace
    pub name: String,
    /// Declared top-level types, partitioned by kind
    pub types: TypeBuckets,
    /// Documentation from an `N:` entry or the addition pass
    pub docs: Documentation,
}

impl NamespaceDeclaration {
    /// Whether this is the global namespace sentinel
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.name.is_empty()
    }

    /// Declared types in canonical bucket order
    pub fn declared_types(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.types.iter()
    }
}

/// An enum declaration
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDeclaration {
    /// Clean type name, arity stripped
    pub name: String,
    pub access: AccessModifier,
    /// Namespace or declaring type
    pub scope: DeclarationScope,
    pub token: MetadataToken,
    /// The underlying integral type
    pub underlying_type: MemberReference,
    /// Enum members, all constants, in declaration order
    pub members: Vec<MemberId>,
    pub attributes: Vec<AttributeData>,
    pub docs: Documentation,
}

/// A delegate declaration
#[derive(Debug, Clone, PartialEq)]
pub struct DelegateDeclaration {
    pub name: String,
    pub access: AccessModifier,
    pub scope: DeclarationScope,
    pub token: MetadataToken,
    pub generic_parameters: Vec<GenericParameterData>,
    /// Invocation parameters
    pub parameters: Vec<ParameterData>,
    /// Invocation return type
    pub return_type: MemberReference,
    pub attributes: Vec<AttributeData>,
    pub docs: Documentation,
}

/// An interface declaration
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDeclaration {
    pub name: String,
    pub access: AccessModifier,
    pub scope: DeclarationScope,
    pub token: MetadataToken,
    pub generic_parameters: Vec<GenericParameterData>,
    /// Directly extended interfaces
    pub base_interfaces: Vec<MemberReference>,
    pub events: Vec<MemberId>,
    pub properties: Vec<MemberId>,
    pub methods: Vec<MemberId>,
    pub attributes: Vec<AttributeData>,
    pub docs: Documentation,
}

impl InterfaceDeclaration {
    /// All members in canonical order: events, properties, methods
    pub fn members(&self) -> impl Iterator<Item = MemberId> + '_ {
        self.events
            .iter()
            .chain(&self.properties)
            .chain(&self.methods)
            .copied()
    }
}

/// A class declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDeclaration {
    pub name: String,
    pub access: AccessModifier,
    pub scope: DeclarationScope,
    pub token: MetadataToken,
    pub generic_parameters: Vec<GenericParameterData>,
    /// Base class, absent only for `System.Object` itself or when unknown
    pub base_class: Option<MemberReference>,
    /// Directly implemented interfaces
    pub interfaces: Vec<MemberReference>,
    pub is_abstract: bool,
    pub is_sealed: bool,
    pub is_static: bool,
    pub members: MemberBuckets,
    pub nested_types: TypeBuckets,
    pub attributes: Vec<AttributeData>,
    pub docs: Documentation,
}

/// A struct declaration
#[derive(Debug, Clone, PartialEq)]
pub struct StructDeclaration {
    pub name: String,
    pub access: AccessModifier,
    pub scope: DeclarationScope,
    pub token: MetadataToken,
    pub generic_parameters: Vec<GenericParameterData>,
    /// Directly implemented interfaces
    pub interfaces: Vec<MemberReference>,
    pub members: MemberBuckets,
    pub nested_types: TypeBuckets,
    pub attributes: Vec<AttributeData>,
    pub docs: Documentation,
}

/// A record declaration
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDeclaration {
    pub name: String,
    pub access: AccessModifier,
    pub scope: DeclarationScope,
    pub token: MetadataToken,
    pub generic_parameters: Vec<GenericParameterData>,
    /// Base record, absent for records rooted directly on `System.Object`
    pub base_record: Option<MemberReference>,
    /// Directly implemented interfaces
    pub interfaces: Vec<MemberReference>,
    pub is_abstract: bool,
    pub is_sealed: bool,
    pub members: MemberBuckets,
    pub nested_types: TypeBuckets,
    pub attributes: Vec<AttributeData>,
    pub docs: Documentation,
}

/// A type declaration of any kind
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDeclaration {
    Enum(EnumDeclaration),
    Delegate(DelegateDeclaration),
    Interface(InterfaceDeclaration),
    Class(ClassDeclaration),
    Struct(StructDeclaration),
    Record(RecordDeclaration),
}

impl TypeDeclaration {
    /// Clean type name, arity stripped
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            TypeDeclaration::Enum(declaration) => &declaration.name,
            TypeDeclaration::Delegate(declaration) => &declaration.name,
            TypeDeclaration::Interface(declaration) => &declaration.name,
            TypeDeclaration::Class(declaration) => &declaration.name,
            TypeDeclaration::Struct(declaration) => &declaration.name,
            TypeDeclaration::Record(declaration) => &declaration.name,
        }
    }

    /// Access modifier
    #[must_use]
    pub fn access(&self) -> AccessModifier {
        match self {
            TypeDeclaration::Enum(declaration) => declaration.access,
            TypeDeclaration::Delegate(declaration) => declaration.access,
            TypeDeclaration::Interface(declaration) => declaration.access,
            TypeDeclaration::Class(declaration) => declaration.access,
            TypeDeclaration::Struct(declaration) => declaration.access,
            TypeDeclaration::Record(declaration) => declaration.access,
        }
    }

    /// Namespace or declaring type
    #[must_use]
    pub fn scope(&self) -> DeclarationScope {
        match self {
            TypeDeclaration::Enum(declaration) => declaration.scope,
            TypeDeclaration::Delegate(declaration) => declaration.scope,
            TypeDeclaration::Interface(declaration) => declaration.scope,
            TypeDeclaration::Class(declaration) => declaration.scope,
            TypeDeclaration::Struct(declaration) => declaration.scope,
            TypeDeclaration::Record(declaration) => declaration.scope,
        }
    }

    /// Metadata token of the row this declaration was built from
    #[must_use]
    pub fn token(&self) -> MetadataToken {
        match self {
            TypeDeclaration::Enum(declaration) => declaration.token,
            TypeDeclaration::Delegate(declaration) => declaration.token,
            TypeDeclaration::Interface(declaration) => declaration.token,
            TypeDeclaration::Class(declaration) => declaration.token,
            TypeDeclaration::Struct(declaration) => declaration.token,
            TypeDeclaration::Record(declaration) => declaration.token,
        }
    }

    /// Type kind discriminator
    #[must_use]
    pub fn kind(&self) -> TypeKind {
        match self {
            TypeDeclaration::Enum(_) => TypeKind::Enum,
            TypeDeclaration::Delegate(_) => TypeKind::Delegate,
            TypeDeclaration::Interface(_) => TypeKind::Interface,
            TypeDeclaration::Class(_) => TypeKind::Class,
            TypeDeclaration::Struct(_) => TypeKind::Struct,
            TypeDeclaration::Record(_) => TypeKind::Record,
        }
    }

    /// Attributes on the type
    #[must_use]
    pub fn attributes(&self) -> &[AttributeData] {
        match self {
            TypeDeclaration::Enum(declaration) => &declaration.attributes,
            TypeDeclaration::Delegate(declaration) => &declaration.attributes,
            TypeDeclaration::Interface(declaration) => &declaration.attributes,
            TypeDeclaration::Class(declaration) => &declaration.attributes,
            TypeDeclaration::Struct(declaration) => &declaration.attributes,
            TypeDeclaration::Record(declaration) => &declaration.attributes,
        }
    }

    /// All generic parameters visible on the type, outer parameters included
    #[must_use]
    pub fn generic_parameters(&self) -> &[GenericParameterData] {
        match self {
            TypeDeclaration::Enum(_) => &[],
            TypeDeclaration::Delegate(declaration) => &declaration.generic_parameters,
            TypeDeclaration::Interface(declaration) => &declaration.generic_parameters,
            TypeDeclaration::Class(declaration) => &declaration.generic_parameters,
            TypeDeclaration::Struct(declaration) => &declaration.generic_parameters,
            TypeDeclaration::Record(declaration) => &declaration.generic_parameters,
        }
    }

    /// Documentation attached to the type
    #[must_use]
    pub fn docs(&self) -> &Documentation {
        match self {
            TypeDeclaration::Enum(declaration) => &declaration.docs,
            TypeDeclaration::Delegate(declaration) => &declaration.docs,
            TypeDeclaration::Interface(declaration) => &declaration.docs,
            TypeDeclaration::Class(declaration) => &declaration.docs,
            TypeDeclaration::Struct(declaration) => &declaration.docs,
            TypeDeclaration::Record(declaration) => &declaration.docs,
        }
    }

    /// Nested type buckets, for kinds that can declare nested types
    #[must_use]
    pub fn nested_types(&self) -> Option<&TypeBuckets> {
        match self {
            TypeDeclaration::Class(declaration) => Some(&declaration.nested_types),
            TypeDeclaration::Struct(declaration) => Some(&declaration.nested_types),
            TypeDeclaration::Record(declaration) => Some(&declaration.nested_types),
            _ => None,
        }
    }

    /// All member ids in canonical order
    #[must_use]
    pub fn member_ids(&self) -> Vec<MemberId> {
        match self {
            TypeDeclaration::Enum(declaration) => declaration.members.clone(),
            TypeDeclaration::Delegate(_) => Vec::new(),
            TypeDeclaration::Interface(declaration) => declaration.members().collect(),
            TypeDeclaration::Class(declaration) => declaration.members.iter().collect(),
            TypeDeclaration::Struct(declaration) => declaration.members.iter().collect(),
            TypeDeclaration::Record(declaration) => declaration.members.iter().collect(),
        }
    }
}

// Interchangeable with the row it was built from: same token, same name
// after arity stripping.
impl PartialEq<TypeMetadata> for TypeDeclaration {
    fn eq(&self, other: &TypeMetadata) -> bool {
        self.token() == other.token && self.name() == other.clean_name()
    }
}

/// A constant member
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantDeclaration {
    pub name: String,
    pub access: AccessModifier,
    /// The declaring type
    pub declaring_type: TypeId,
    pub token: MetadataToken,
    /// Declared constant type
    pub ty: MemberReference,
    /// The compile-time value
    pub value: ConstantValue<MemberReference>,
    /// Hides an inherited member of the same name
    pub is_shadowing: bool,
    pub attributes: Vec<AttributeData>,
    pub docs: Documentation,
}

/// A field member
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDeclaration {
    pub name: String,
    pub access: AccessModifier,
    pub declaring_type: TypeId,
    pub token: MetadataToken,
    /// Declared field type
    pub ty: MemberReference,
    pub is_static: bool,
    pub is_read_only: bool,
    pub is_shadowing: bool,
    pub attributes: Vec<AttributeData>,
    pub docs: Documentation,
}

/// A constructor member
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDeclaration {
    /// Display name, the declaring type's simple name
    pub name: String,
    pub access: AccessModifier,
    pub declaring_type: TypeId,
    pub token: MetadataToken,
    pub is_static: bool,
    pub parameters: Vec<ParameterData>,
    pub attributes: Vec<AttributeData>,
    pub docs: Documentation,
}

/// An event member
#[derive(Debug, Clone, PartialEq)]
pub struct EventDeclaration {
    pub name: String,
    pub access: AccessModifier,
    pub declaring_type: TypeId,
    pub token: MetadataToken,
    /// The delegate type of the event
    pub handler_type: MemberReference,
    pub modifiers: MemberModifiers,
    pub attributes: Vec<AttributeData>,
    pub docs: Documentation,
}

/// A property member
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDeclaration {
    pub name: String,
    pub access: AccessModifier,
    pub declaring_type: TypeId,
    pub token: MetadataToken,
    /// Declared property type
    pub ty: MemberReference,
    pub modifiers: MemberModifiers,
    /// Index parameters; empty for non-indexer properties
    pub parameters: Vec<ParameterData>,
    pub getter: Option<AccessorData>,
    pub setter: Option<AccessorData>,
    pub attributes: Vec<AttributeData>,
    pub docs: Documentation,
}

/// A method member
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDeclaration {
    pub name: String,
    pub access: AccessModifier,
    pub declaring_type: TypeId,
    pub token: MetadataToken,
    pub modifiers: MemberModifiers,
    pub generic_parameters: Vec<GenericParameterData>,
    pub parameters: Vec<ParameterData>,
    pub return_type: MemberReference,
    pub attributes: Vec<AttributeData>,
    pub docs: Documentation,
}

/// A member declaration of any kind
#[derive(Debug, Clone, PartialEq)]
pub enum MemberDeclaration {
    Constant(ConstantDeclaration),
    Field(FieldDeclaration),
    Constructor(ConstructorDeclaration),
    Event(EventDeclaration),
    Property(PropertyDeclaration),
    Method(MethodDeclaration),
}

impl MemberDeclaration {
    /// Member name; the declaring type's simple name for constructors
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            MemberDeclaration::Constant(declaration) => &declaration.name,
            MemberDeclaration::Field(declaration) => &declaration.name,
            MemberDeclaration::Constructor(declaration) => &declaration.name,
            MemberDeclaration::Event(declaration) => &declaration.name,
            MemberDeclaration::Property(declaration) => &declaration.name,
            MemberDeclaration::Method(declaration) => &declaration.name,
        }
    }

    /// Access modifier
    #[must_use]
    pub fn access(&self) -> AccessModifier {
        match self {
            MemberDeclaration::Constant(declaration) => declaration.access,
            MemberDeclaration::Field(declaration) => declaration.access,
            MemberDeclaration::Constructor(declaration) => declaration.access,
            MemberDeclaration::Event(declaration) => declaration.access,
            MemberDeclaration::Property(declaration) => declaration.access,
            MemberDeclaration::Method(declaration) => declaration.access,
        }
    }

    /// Id of the declaring type
    #[must_use]
    pub fn declaring_type(&self) -> TypeId {
        match self {
            MemberDeclaration::Constant(declaration) => declaration.declaring_type,
            MemberDeclaration::Field(declaration) => declaration.declaring_type,
            MemberDeclaration::Constructor(declaration) => declaration.declaring_type,
            MemberDeclaration::Event(declaration) => declaration.declaring_type,
            MemberDeclaration::Property(declaration) => declaration.declaring_type,
            MemberDeclaration::Method(declaration) => declaration.declaring_type,
        }
    }

    /// Metadata token of the row this declaration was built from
    #[must_use]
    pub fn token(&self) -> MetadataToken {
        match self {
            MemberDeclaration::Constant(declaration) => declaration.token,
            MemberDeclaration::Field(declaration) => declaration.token,
            MemberDeclaration::Constructor(declaration) => declaration.token,
            MemberDeclaration::Event(declaration) => declaration.token,
            MemberDeclaration::Property(declaration) => declaration.token,
            MemberDeclaration::Method(declaration) => declaration.token,
        }
    }

    /// Member kind discriminator
    #[must_use]
    pub fn kind(&self) -> MemberKind {
        match self {
            MemberDeclaration::Constant(_) => MemberKind::Constant,
            MemberDeclaration::Field(_) => MemberKind::Field,
            MemberDeclaration::Constructor(_) => MemberKind::Constructor,
            MemberDeclaration::Event(_) => MemberKind::Event,
            MemberDeclaration::Property(_) => MemberKind::Property,
            MemberDeclaration::Method(_) => MemberKind::Method,
        }
    }

    /// Attributes on the member
    #[must_use]
    pub fn attributes(&self) -> &[AttributeData] {
        match self {
            MemberDeclaration::Constant(declaration) => &declaration.attributes,
            MemberDeclaration::Field(declaration) => &declaration.attributes,
            MemberDeclaration::Constructor(declaration) => &declaration.attributes,
            MemberDeclaration::Event(declaration) => &declaration.attributes,
            MemberDeclaration::Property(declaration) => &declaration.attributes,
            MemberDeclaration::Method(declaration) => &declaration.attributes,
        }
    }

    /// Documentation attached to the member
    #[must_use]
    pub fn docs(&self) -> &Documentation {
        match self {
            MemberDeclaration::Constant(declaration) => &declaration.docs,
            MemberDeclaration::Field(declaration) => &declaration.docs,
            MemberDeclaration::Constructor(declaration) => &declaration.docs,
            MemberDeclaration::Event(declaration) => &declaration.docs,
            MemberDeclaration::Property(declaration) => &declaration.docs,
            MemberDeclaration::Method(declaration) => &declaration.docs,
        }
    }
}

// Interchangeable with the row it was built from. Constructors compare on
// token alone because their display name intentionally differs from the
// row's `.ctor`.
impl PartialEq<MemberMetadata> for MemberDeclaration {
    fn eq(&self, other: &MemberMetadata) -> bool {
        self.token() == other.token
            && (self.kind() == MemberKind::Constructor || self.name() == other.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_buckets_canonical_order() {
        let buckets = MemberBuckets {
            constants: vec![MemberId::new(0)],
            fields: vec![MemberId::new(1)],
            constructors: vec![MemberId::new(2)],
            events: vec![MemberId::new(3)],
            properties: vec![MemberId::new(4)],
            methods: vec![MemberId::new(5)],
        };
        let order: Vec<usize> = buckets.iter().map(MemberId::index).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(buckets.len(), 6);
        assert!(!buckets.is_empty());
    }

    #[test]
    fn test_type_buckets_canonical_order() {
        let buckets = TypeBuckets {
            enums: vec![TypeId::new(0)],
            delegates: vec![TypeId::new(1)],
            interfaces: vec![TypeId::new(2)],
            records: vec![TypeId::new(3)],
            classes: vec![TypeId::new(4)],
            structs: vec![TypeId::new(5)],
        };
        let order: Vec<usize> = buckets.iter().map(TypeId::index).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_empty_buckets() {
        assert!(MemberBuckets::default().is_empty());
        assert!(TypeBuckets::default().is_empty());
        assert_eq!(MemberBuckets::default().iter().count(), 0);
    }

    #[test]
    fn test_member_modifiers_default_is_all_clear() {
        let modifiers = MemberModifiers::default();
        assert!(!modifiers.is_static);
        assert!(!modifiers.is_abstract);
        assert!(!modifiers.is_virtual);
        assert!(!modifiers.is_override);
        assert!(!modifiers.is_sealed);
        assert!(!modifiers.is_shadowing);
    }
}
