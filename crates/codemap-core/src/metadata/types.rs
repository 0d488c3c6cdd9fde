//! Type and member rows of an assembly metadata snapshot

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{AccessModifier, AssemblyName, MetadataToken};

/// The kind of a type row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeKind {
    Enum,
    Delegate,
    Interface,
    Class,
    Struct,
    Record,
}

impl TypeKind {
    /// Stable lowercase name used in generated output
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Enum => "enum",
            TypeKind::Delegate => "delegate",
            TypeKind::Interface => "interface",
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
            TypeKind::Record => "record",
        }
    }
}

/// The kind of a member row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MemberKind {
    Constant,
    Field,
    Constructor,
    Event,
    Property,
    Method,
}

impl MemberKind {
    /// Stable lowercase name used in generated output
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MemberKind::Constant => "constant",
            MemberKind::Field => "field",
            MemberKind::Constructor => "constructor",
            MemberKind::Event => "event",
            MemberKind::Property => "property",
            MemberKind::Method => "method",
        }
    }
}

/// Variance of a generic parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GenericVariance {
    #[default]
    Invariant,
    /// Declared `out`
    Covariant,
    /// Declared `in`
    Contravariant,
}

/// How a parameter is passed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterPassing {
    /// Passed by value
    #[default]
    Value,
    /// Read-only by-reference input (`in`)
    In,
    /// By-reference input and output (`ref`)
    InOut,
    /// By-reference output only (`out`)
    Out,
}

impl ParameterPassing {
    /// Stable lowercase name used in generated output
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ParameterPassing::Value => "value",
            ParameterPassing::In => "in",
            ParameterPassing::InOut => "inOut",
            ParameterPassing::Out => "out",
        }
    }
}

/// A signature-style type designator
///
/// Type rows refer to other types through these: either by token into the
/// same snapshot (`Defined`) or by name into a dependency (`Named`), with
/// composite shapes layered on top. Names keep the raw reflection form, so
/// a generic type's name carries its arity backtick (`List`1`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TypeRef {
    /// A type declared in this snapshot
    Defined {
        token: MetadataToken,
        #[serde(default)]
        generic_arguments: Vec<TypeRef>,
    },
    /// A type from a dependency assembly
    Named {
        name: String,
        #[serde(default)]
        namespace: String,
        /// Raw names of the declaring types, outermost first
        #[serde(default)]
        declaring_path: Vec<String>,
        #[serde(default)]
        generic_arguments: Vec<TypeRef>,
        #[serde(default)]
        assembly: Option<AssemblyName>,
    },
    /// An array of some item type
    Array {
        rank: u32,
        item: Box<TypeRef>,
    },
    /// An unmanaged pointer
    Pointer { referent: Box<TypeRef> },
    /// A by-reference type (`ref` returns, `out` parameters)
    ByRef { referent: Box<TypeRef> },
    /// A generic parameter of the declaring type
    TypeParam { position: u32, name: String },
    /// A generic parameter of the declaring method
    MethodParam { position: u32, name: String },
    /// The void return type
    Void,
    /// The dynamic type
    Dynamic,
}

impl TypeRef {
    /// Create a reference to a dependency type with no generic arguments
    #[must_use]
    pub fn named(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        TypeRef::Named {
            name: name.into(),
            namespace: namespace.into(),
            declaring_path: Vec::new(),
            generic_arguments: Vec::new(),
            assembly: None,
        }
    }

    /// Create a reference to a snapshot type with no generic arguments
    #[must_use]
    pub fn defined(token: MetadataToken) -> Self {
        TypeRef::Defined {
            token,
            generic_arguments: Vec::new(),
        }
    }
}

/// A compile-time constant
///
/// `T` is the representation of `typeof(...)` literals: a [`TypeRef`] on the
/// snapshot side, a reference-model type on the declaration side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "kind",
    content = "value",
    rename_all = "camelCase",
    bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>")
)]
pub enum ConstantValue<T> {
    Null,
    Boolean(bool),
    Char(char),
    Integer(i64),
    UnsignedInteger(u64),
    Float(f64),
    String(String),
    /// A `typeof(...)` literal
    Type(T),
    /// An array literal, as used in attribute arguments
    Array(Vec<ConstantValue<T>>),
}

impl<T> ConstantValue<T> {
    /// Convert the type payloads while keeping every other literal intact
    pub fn map_type<U>(&self, convert: &impl Fn(&T) -> U) -> ConstantValue<U> {
        match self {
            ConstantValue::Null => ConstantValue::Null,
            ConstantValue::Boolean(value) => ConstantValue::Boolean(*value),
            ConstantValue::Char(value) => ConstantValue::Char(*value),
            ConstantValue::Integer(value) => ConstantValue::Integer(*value),
            ConstantValue::UnsignedInteger(value) => ConstantValue::UnsignedInteger(*value),
            ConstantValue::Float(value) => ConstantValue::Float(*value),
            ConstantValue::String(value) => ConstantValue::String(value.clone()),
            ConstantValue::Type(ty) => ConstantValue::Type(convert(ty)),
            ConstantValue::Array(items) => {
                ConstantValue::Array(items.iter().map(|item| item.map_type(convert)).collect())
            }
        }
    }
}

/// An attribute applied to an assembly, type, member, or parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeMetadata {
    /// The attribute type
    pub ty: TypeRef,
    /// Positional constructor arguments, in call order
    #[serde(default)]
    pub positional: Vec<AttributeArgumentMetadata>,
    /// Named property/field arguments, in declaration order
    #[serde(default)]
    pub named: Vec<NamedArgumentMetadata>,
}

impl AttributeMetadata {
    /// Create an attribute with no arguments
    #[must_use]
    pub fn new(ty: TypeRef) -> Self {
        Self {
            ty,
            positional: Vec::new(),
            named: Vec::new(),
        }
    }
}

/// A positional attribute argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeArgumentMetadata {
    /// The argument value
    pub value: ConstantValue<TypeRef>,
    /// The parameter type the value was bound to
    pub ty: TypeRef,
}

/// A named attribute argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedArgumentMetadata {
    /// The property or field name
    pub name: String,
    /// The argument value
    pub value: ConstantValue<TypeRef>,
    /// The property or field type
    pub ty: TypeRef,
}

/// A generic parameter declared by a type or method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericParameterMetadata {
    /// Parameter name
    pub name: String,
    /// Zero-based position in the parameter list
    pub position: u32,
    #[serde(default)]
    pub variance: GenericVariance,
    /// `class` constraint
    #[serde(default)]
    pub has_reference_type_constraint: bool,
    /// `struct` constraint
    #[serde(default)]
    pub has_value_type_constraint: bool,
    /// `new()` constraint
    #[serde(default)]
    pub has_default_constructor_constraint: bool,
    /// Type constraints, possibly referring back to the declaring type
    #[serde(default)]
    pub type_constraints: Vec<TypeRef>,
}

impl GenericParameterMetadata {
    /// Create an unconstrained, invariant generic parameter
    #[must_use]
    pub fn new(name: impl Into<String>, position: u32) -> Self {
        Self {
            name: name.into(),
            position,
            variance: GenericVariance::Invariant,
            has_reference_type_constraint: false,
            has_value_type_constraint: false,
            has_default_constructor_constraint: false,
            type_constraints: Vec::new(),
        }
    }
}

/// A parameter of a method, constructor, indexer, or delegate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterMetadata {
    /// Parameter name
    pub name: String,
    /// Parameter type
    pub ty: TypeRef,
    #[serde(default)]
    pub passing: ParameterPassing,
    #[serde(default)]
    pub attributes: Vec<AttributeMetadata>,
    /// Default value; `Some(Null)` is an explicit null default, `None` means
    /// the parameter has no default
    #[serde(default)]
    pub default_value: Option<ConstantValue<TypeRef>>,
}

impl ParameterMetadata {
    /// Create a by-value parameter with no attributes or default
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            passing: ParameterPassing::Value,
            attributes: Vec::new(),
            default_value: None,
        }
    }
}

/// A property accessor (getter or setter)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessorMetadata {
    /// Accessor accessibility, which may be narrower than the property's
    pub access: AccessModifier,
    #[serde(default)]
    pub attributes: Vec<AttributeMetadata>,
}

impl AccessorMetadata {
    /// Create an accessor with no attributes
    #[must_use]
    pub fn new(access: AccessModifier) -> Self {
        Self {
            access,
            attributes: Vec::new(),
        }
    }
}

/// One member row of a type
///
/// The row is shaped by its `kind`: constants carry `ty` and `value`, methods
/// carry `parameters`, `return_type`, and `generic_parameters`, properties
/// carry `ty`, accessors, and index `parameters`, and so on. Fields that do
/// not apply to a kind stay at their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberMetadata {
    /// Row token, unique within the snapshot
    pub token: MetadataToken,
    /// Member name; constructors use the reflection name `.ctor`
    pub name: String,
    pub kind: MemberKind,
    pub access: AccessModifier,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_virtual: bool,
    #[serde(default)]
    pub is_override: bool,
    #[serde(default)]
    pub is_sealed: bool,
    /// Declared with the `new` modifier, hiding an inherited member
    #[serde(default)]
    pub is_shadowing: bool,
    /// Read-only fields
    #[serde(default)]
    pub is_read_only: bool,
    #[serde(default)]
    pub attributes: Vec<AttributeMetadata>,
    /// Constant, field, event-handler, or property type
    #[serde(default)]
    pub ty: Option<TypeRef>,
    /// Constant value
    #[serde(default)]
    pub value: Option<ConstantValue<TypeRef>>,
    /// Constructor, method, or index parameters
    #[serde(default)]
    pub parameters: Vec<ParameterMetadata>,
    /// Method return type
    #[serde(default)]
    pub return_type: Option<TypeRef>,
    /// Method generic parameters
    #[serde(default)]
    pub generic_parameters: Vec<GenericParameterMetadata>,
    /// Property getter
    #[serde(default)]
    pub getter: Option<AccessorMetadata>,
    /// Property setter
    #[serde(default)]
    pub setter: Option<AccessorMetadata>,
}

impl MemberMetadata {
    /// Create a member row with every kind-specific field at its default
    #[must_use]
    pub fn new(
        token: MetadataToken,
        name: impl Into<String>,
        kind: MemberKind,
        access: AccessModifier,
    ) -> Self {
        Self {
            token,
            name: name.into(),
            kind,
            access,
            is_static: false,
            is_abstract: false,
            is_virtual: false,
            is_override: false,
            is_sealed: false,
            is_shadowing: false,
            is_read_only: false,
            attributes: Vec::new(),
            ty: None,
            value: None,
            parameters: Vec::new(),
            return_type: None,
            generic_parameters: Vec::new(),
            getter: None,
            setter: None,
        }
    }
}

/// One type row of a snapshot
///
/// Nested types appear as their own rows with `declaring_type` set; the
/// `types` table of a snapshot is flat. `name` keeps the raw reflection
/// form including the arity backtick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMetadata {
    /// Row token, unique within the snapshot
    pub token: MetadataToken,
    pub kind: TypeKind,
    /// Raw reflection name, e.g. `TestClass` or `TestClass`3`
    pub name: String,
    /// Namespace, empty for the global namespace
    #[serde(default)]
    pub namespace: String,
    pub access: AccessModifier,
    /// Token of the declaring type for nested types
    #[serde(default)]
    pub declaring_type: Option<MetadataToken>,
    /// Base class of classes and records
    #[serde(default)]
    pub base_type: Option<TypeRef>,
    /// Implemented (or, for interfaces, extended) interfaces
    #[serde(default)]
    pub interfaces: Vec<TypeRef>,
    /// Underlying integral type of enums
    #[serde(default)]
    pub underlying_type: Option<TypeRef>,
    /// Delegate return type
    #[serde(default)]
    pub return_type: Option<TypeRef>,
    /// Delegate parameters
    #[serde(default)]
    pub parameters: Vec<ParameterMetadata>,
    #[serde(default)]
    pub generic_parameters: Vec<GenericParameterMetadata>,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_sealed: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub attributes: Vec<AttributeMetadata>,
    /// Member rows in declaration order
    #[serde(default)]
    pub members: Vec<MemberMetadata>,
}

impl TypeMetadata {
    /// Create a type row with no members and every optional field empty
    #[must_use]
    pub fn new(
        token: MetadataToken,
        kind: TypeKind,
        namespace: impl Into<String>,
        name: impl Into<String>,
        access: AccessModifier,
    ) -> Self {
        Self {
            token,
            kind,
            name: name.into(),
            namespace: namespace.into(),
            access,
            declaring_type: None,
            base_type: None,
            interfaces: Vec::new(),
            underlying_type: None,
            return_type: None,
            parameters: Vec::new(),
            generic_parameters: Vec::new(),
            is_abstract: false,
            is_sealed: false,
            is_static: false,
            attributes: Vec::new(),
            members: Vec::new(),
        }
    }

    /// The name with any arity backtick suffix removed
    #[must_use]
    pub fn clean_name(&self) -> &str {
        match self.name.split_once('`') {
            Some((clean, _)) => clean,
            None => &self.name,
        }
    }

    /// Number of visible generic parameters, declaring types' included
    #[must_use]
    pub fn arity(&self) -> usize {
        self.generic_parameters.len()
    }
}

/// A complete assembly snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyMetadata {
    /// Assembly identity
    #[serde(flatten)]
    pub name: AssemblyName,
    #[serde(default)]
    pub attributes: Vec<AttributeMetadata>,
    /// Referenced assemblies
    #[serde(default)]
    pub dependencies: Vec<AssemblyName>,
    /// Type rows in declaration order, nested types included
    #[serde(default)]
    pub types: Vec<TypeMetadata>,
}

impl AssemblyMetadata {
    /// Create an empty snapshot for the given identity
    #[must_use]
    pub fn new(name: AssemblyName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            dependencies: Vec::new(),
            types: Vec::new(),
        }
    }
}

/// Token lookup over a snapshot's type rows
#[derive(Debug)]
pub struct TypeIndex<'a> {
    by_token: HashMap<MetadataToken, &'a TypeMetadata>,
}

impl<'a> TypeIndex<'a> {
    /// Index every type row of the snapshot by token
    #[must_use]
    pub fn new(assembly: &'a AssemblyMetadata) -> Self {
        let by_token = assembly.types.iter().map(|ty| (ty.token, ty)).collect();
        Self { by_token }
    }

    /// Look up a type row by token
    #[must_use]
    pub fn get(&self, token: MetadataToken) -> Option<&'a TypeMetadata> {
        self.by_token.get(&token).copied()
    }

    /// Raw dotted path of a type row: namespace, declaring chain, own name
    ///
    /// Names keep their arity backticks, so the result matches the path used
    /// in documentation ids (`Ns.Outer`1.Inner`). A declaring chain that
    /// cycles is cut at the first repeated token.
    #[must_use]
    pub fn raw_path(&self, ty: &TypeMetadata) -> String {
        let mut segments = Vec::new();
        let mut seen = vec![ty.token];
        let mut current = ty;
        segments.push(current.name.as_str());
        while let Some(declaring) = current.declaring_type.and_then(|token| self.get(token)) {
            if seen.contains(&declaring.token) {
                break;
            }
            seen.push(declaring.token);
            segments.push(declaring.name.as_str());
            current = declaring;
        }
        if !current.namespace.is_empty() {
            segments.push(current.namespace.as_str());
        }
        segments.reverse();
        segments.join(".")
    }
}
