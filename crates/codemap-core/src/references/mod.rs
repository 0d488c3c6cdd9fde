//! Lightweight references to types, members, and assemblies
//!
//! A reference identifies a type or member without carrying its declaration:
//! just enough identity (names, declaring type, signature types) to render a
//! cross-link or a display name. References form trees (an array of pointers
//! to a generic instantiation), never graphs, so they are plain owned values.

use std::fmt;

use crate::metadata::{AssemblyName, Version};

mod json;
mod visitor;

pub use json::{constant_json, reference_json, ReferenceJsonWriter};
pub use visitor::MemberReferenceVisitor;

/// A reference to a type, member, or assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberReference {
    /// A specific type
    Type(TypeReference),
    /// An array type
    Array(ArrayReference),
    /// An unmanaged pointer type
    Pointer(PointerReference),
    /// A by-reference type
    ByRef(ByRefReference),
    /// A generic parameter declared by a type
    GenericTypeParameter(GenericTypeParameterReference),
    /// A generic parameter declared by a method
    GenericMethodParameter(GenericMethodParameterReference),
    /// A constant declared by a type
    Constant(ConstantReference),
    /// A field declared by a type
    Field(FieldReference),
    /// A constructor declared by a type
    Constructor(ConstructorReference),
    /// An event declared by a type
    Event(EventReference),
    /// A property declared by a type
    Property(PropertyReference),
    /// A method declared by a type
    Method(MethodReference),
    /// An assembly
    Assembly(AssemblyReference),
}

/// Marker distinguishing the types with no ordinary identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialType {
    /// The void return type
    Void,
    /// The dynamic type
    Dynamic,
}

/// A reference to a specific type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeReference {
    /// Simple name without any arity backtick
    pub name: String,
    /// Namespace, empty for the global namespace
    pub namespace: String,
    /// Declaring type for nested types
    pub declaring_type: Option<Box<TypeReference>>,
    /// Generic arguments of this level only, not of the declaring chain
    pub generic_arguments: Vec<MemberReference>,
    /// Assembly the type lives in, when known
    pub assembly: Option<AssemblyReference>,
    /// Set for the void and dynamic pseudo-types
    pub special: Option<SpecialType>,
}

impl TypeReference {
    /// Create a plain type reference with no generic arguments
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            declaring_type: None,
            generic_arguments: Vec::new(),
            assembly: None,
            special: None,
        }
    }

    /// The void return type
    #[must_use]
    pub fn void() -> Self {
        Self {
            special: Some(SpecialType::Void),
            ..Self::new("System", "Void")
        }
    }

    /// The dynamic type
    #[must_use]
    pub fn dynamic() -> Self {
        Self {
            special: Some(SpecialType::Dynamic),
            ..Self::new("", "dynamic")
        }
    }

    /// Set the assembly
    #[must_use]
    pub fn with_assembly(mut self, assembly: AssemblyReference) -> Self {
        self.assembly = Some(assembly);
        self
    }

    /// Set the declaring type
    #[must_use]
    pub fn with_declaring_type(mut self, declaring: TypeReference) -> Self {
        self.declaring_type = Some(Box::new(declaring));
        self
    }

    /// Set the generic arguments
    #[must_use]
    pub fn with_generic_arguments(mut self, arguments: Vec<MemberReference>) -> Self {
        self.generic_arguments = arguments;
        self
    }

    /// Whether this is the void pseudo-type
    #[must_use]
    pub fn is_void(&self) -> bool {
        self.special == Some(SpecialType::Void)
    }

    /// Whether this is the dynamic pseudo-type
    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        self.special == Some(SpecialType::Dynamic)
    }

    /// Dotted full name: namespace, declaring chain, own name
    #[must_use]
    pub fn full_name(&self) -> String {
        let mut segments = Vec::new();
        self.collect_path(&mut segments);
        segments.join(".")
    }

    fn collect_path(&self, segments: &mut Vec<String>) {
        if let Some(declaring) = &self.declaring_type {
            declaring.collect_path(segments);
        } else if !self.namespace.is_empty() {
            segments.push(self.namespace.clone());
        }
        segments.push(self.name.clone());
    }
}

/// A reference to an array type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayReference {
    /// Number of dimensions, 1 for a vector
    pub rank: u32,
    /// Element type
    pub item: Box<MemberReference>,
}

impl ArrayReference {
    /// Create an array reference
    #[must_use]
    pub fn new(rank: u32, item: MemberReference) -> Self {
        Self {
            rank,
            item: Box::new(item),
        }
    }
}

/// A reference to an unmanaged pointer type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerReference {
    /// Pointed-to type
    pub referent: Box<MemberReference>,
}

impl PointerReference {
    /// Create a pointer reference
    #[must_use]
    pub fn new(referent: MemberReference) -> Self {
        Self {
            referent: Box::new(referent),
        }
    }
}

/// A reference to a by-reference type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByRefReference {
    /// Referred-to type
    pub referent: Box<MemberReference>,
}

impl ByRefReference {
    /// Create a by-reference reference
    #[must_use]
    pub fn new(referent: MemberReference) -> Self {
        Self {
            referent: Box::new(referent),
        }
    }
}

/// A reference to a generic parameter declared by a type
///
/// Carries the name only; generic parameters terminate reference recursion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericTypeParameterReference {
    /// Parameter name
    pub name: String,
}

impl GenericTypeParameterReference {
    /// Create a generic type parameter reference
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A reference to a generic parameter declared by a method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericMethodParameterReference {
    /// Parameter name
    pub name: String,
}

impl GenericMethodParameterReference {
    /// Create a generic method parameter reference
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A reference to a constant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantReference {
    /// Constant name
    pub name: String,
    /// Declaring type
    pub declaring_type: TypeReference,
}

/// A reference to a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReference {
    /// Field name
    pub name: String,
    /// Declaring type
    pub declaring_type: TypeReference,
}

/// A reference to a constructor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorReference {
    /// Declaring type; the constructor displays under this type's name
    pub declaring_type: TypeReference,
    /// Parameter types, in signature order
    pub parameter_types: Vec<MemberReference>,
}

/// A reference to an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventReference {
    /// Event name
    pub name: String,
    /// Declaring type
    pub declaring_type: TypeReference,
}

/// A reference to a property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyReference {
    /// Property name, `Item` for indexers
    pub name: String,
    /// Declaring type
    pub declaring_type: TypeReference,
    /// Index parameter types; empty for non-indexer properties
    pub parameter_types: Vec<MemberReference>,
}

/// A reference to a method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodReference {
    /// Method name
    pub name: String,
    /// Declaring type
    pub declaring_type: TypeReference,
    /// Generic arguments, empty for non-generic methods
    pub generic_arguments: Vec<MemberReference>,
    /// Parameter types, in signature order
    pub parameter_types: Vec<MemberReference>,
}

/// A reference to an assembly by its full identity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssemblyReference {
    /// Simple assembly name
    pub name: String,
    /// Assembly version
    pub version: Version,
    /// Culture name, empty for the neutral culture
    pub culture: String,
    /// Public-key token as lowercase hex, if the assembly is signed
    pub public_key_token: Option<String>,
}

impl AssemblyReference {
    /// Create an assembly reference with the neutral culture and no token
    #[must_use]
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
            culture: String::new(),
            public_key_token: None,
        }
    }
}

impl From<&AssemblyName> for AssemblyReference {
    fn from(name: &AssemblyName) -> Self {
        Self {
            name: name.name.clone(),
            version: name.version,
            culture: name.culture.clone(),
            public_key_token: name.public_key_token.clone(),
        }
    }
}

impl fmt::Display for AssemblyReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let culture = if self.culture.is_empty() {
            "neutral"
        } else {
            &self.culture
        };
        let token = self.public_key_token.as_deref().unwrap_or("null");
        write!(
            f,
            "{}, Version={}, Culture={}, PublicKeyToken={}",
            self.name, self.version, culture, token
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Version;

    fn int32() -> TypeReference {
        TypeReference::new("System", "Int32")
            .with_assembly(AssemblyReference::new("System.Runtime", Version::new(4, 2, 2, 0)))
    }

    #[test]
    fn test_full_name_of_plain_type() {
        assert_eq!(int32().full_name(), "System.Int32");
    }

    #[test]
    fn test_full_name_walks_declaring_chain() {
        let inner = TypeReference::new("", "Inner")
            .with_declaring_type(TypeReference::new("CodeMap.Tests", "Outer"));
        assert_eq!(inner.full_name(), "CodeMap.Tests.Outer.Inner");
    }

    #[test]
    fn test_void_and_dynamic_markers() {
        assert!(TypeReference::void().is_void());
        assert!(!TypeReference::void().is_dynamic());
        assert!(TypeReference::dynamic().is_dynamic());
        assert!(TypeReference::new("System", "Int32").special.is_none());
    }

    #[test]
    fn test_assembly_reference_from_name() {
        let name = crate::metadata::AssemblyName::new("CodeMap.Tests.Data", Version::new(1, 2, 3, 4))
            .with_public_key_token("b03f5f7f11d50a3a");
        let reference = AssemblyReference::from(&name);
        assert_eq!(reference.name, "CodeMap.Tests.Data");
        assert_eq!(reference.version, Version::new(1, 2, 3, 4));
        assert_eq!(reference.public_key_token.as_deref(), Some("b03f5f7f11d50a3a"));
    }

    #[test]
    fn test_array_of_array_nests() {
        let jagged = MemberReference::Array(ArrayReference::new(
            1,
            MemberReference::Array(ArrayReference::new(2, MemberReference::Type(int32()))),
        ));
        if let MemberReference::Array(outer) = &jagged {
            assert_eq!(outer.rank, 1);
            if let MemberReference::Array(inner) = outer.item.as_ref() {
                assert_eq!(inner.rank, 2);
            } else {
                panic!("expected nested array");
            }
        } else {
            panic!("expected array");
        }
    }
}
