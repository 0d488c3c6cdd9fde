//! Test fixtures
//!
//! This module provides a small but complete metadata snapshot with its
//! companion documentation file, shared by unit tests, integration tests,
//! and benchmarks. The snapshot covers every type kind and member kind the
//! declaration tree knows about.

use crate::declarations::{DeclarationTree, DeclarationTreeBuilder};
use crate::docs::XmlDocs;
use crate::metadata::{
    AccessFilter, AccessModifier, AccessorMetadata, AssemblyMetadata, AssemblyName,
    AttributeArgumentMetadata, AttributeMetadata, ConstantValue, GenericParameterMetadata,
    MemberKind, MemberMetadata, MetadataToken, ParameterMetadata, TypeKind, TypeMetadata, TypeRef,
    Version,
};

/// Result type for test helpers
pub type TestResult<T> = Result<T, String>;

/// A complete snapshot covering every type and member kind
///
/// The assembly is named `CodeMap.Tests.Data`, version `1.2.3.4`, and
/// declares an enum, a delegate, an interface, a generic class with a
/// nested type, a struct, a record, and one internal class that public
/// filtering drops.
#[must_use]
pub fn sample_assembly() -> AssemblyMetadata {
    let mut assembly = AssemblyMetadata::new(AssemblyName::new(
        "CodeMap.Tests.Data",
        Version::new(1, 2, 3, 4),
    ));
    assembly.attributes.push(title_attribute("Test data"));
    assembly.dependencies.push(system_runtime());
    assembly.types = vec![
        test_enum(),
        test_delegate(),
        test_interface(),
        test_class(),
        nested_test_class(),
        test_struct(),
        test_record(),
        internal_class(),
    ];
    assembly
}

/// Companion XML documentation for [`sample_assembly`]
#[must_use]
pub fn sample_docs_xml() -> &'static str {
    SAMPLE_DOCS
}

/// Build the sample declaration tree with documentation attached
///
/// # Errors
/// Returns error if the fixture documentation fails to parse
pub fn sample_tree(filter: AccessFilter) -> TestResult<DeclarationTree> {
    let docs =
        XmlDocs::parse(sample_docs_xml()).map_err(|error| format!("Doc parse error: {error}"))?;
    let assembly = sample_assembly();
    Ok(DeclarationTreeBuilder::new(filter)
        .with_documentation(&docs)
        .build(&assembly))
}

/// Serialize the sample snapshot as a JSON document
///
/// # Errors
/// Returns error if serialization fails
pub fn snapshot_json() -> TestResult<String> {
    serde_json::to_string_pretty(&sample_assembly())
        .map_err(|error| format!("Serialize error: {error}"))
}

fn system_runtime() -> AssemblyName {
    AssemblyName::new("System.Runtime", Version::new(4, 2, 2, 0))
        .with_public_key_token("b03f5f7f11d50a3a")
}

fn title_attribute(title: &str) -> AttributeMetadata {
    let mut attribute = AttributeMetadata::new(TypeRef::named(
        "System.Reflection",
        "AssemblyTitleAttribute",
    ));
    attribute.positional.push(AttributeArgumentMetadata {
        value: ConstantValue::String(title.to_string()),
        ty: TypeRef::named("System", "String"),
    });
    attribute
}

fn test_enum() -> TypeMetadata {
    let mut row = TypeMetadata::new(
        MetadataToken(0x0200_0001),
        TypeKind::Enum,
        "CodeMap.Tests",
        "TestEnum",
        AccessModifier::Public,
    );
    row.underlying_type = Some(TypeRef::named("System", "Byte"));
    row.attributes
        .push(AttributeMetadata::new(TypeRef::named("System", "FlagsAttribute")));
    for (index, name) in [(0u32, "TestMember1"), (1, "TestMember2"), (2, "TestMember3")] {
        let mut member = MemberMetadata::new(
            MetadataToken(0x0400_0001 + index),
            name,
            MemberKind::Constant,
            AccessModifier::Public,
        );
        member.ty = Some(TypeRef::defined(MetadataToken(0x0200_0001)));
        member.value = Some(ConstantValue::Integer(i64::from(index) + 1));
        row.members.push(member);
    }
    row
}

fn test_delegate() -> TypeMetadata {
    let mut row = TypeMetadata::new(
        MetadataToken(0x0200_0002),
        TypeKind::Delegate,
        "CodeMap.Tests",
        "TestDelegate",
        AccessModifier::Public,
    );
    row.parameters = vec![
        ParameterMetadata::new("value", TypeRef::named("System", "Int32")),
        ParameterMetadata::new("text", TypeRef::named("System", "String")),
    ];
    row.return_type = Some(TypeRef::named("System", "Boolean"));
    row
}

fn test_interface() -> TypeMetadata {
    let mut row = TypeMetadata::new(
        MetadataToken(0x0200_0003),
        TypeKind::Interface,
        "CodeMap.Tests",
        "ITestInterface",
        AccessModifier::Public,
    );
    row.interfaces = vec![TypeRef::named("System", "IDisposable")];

    let mut event = MemberMetadata::new(
        MetadataToken(0x0600_0030),
        "TestEvent",
        MemberKind::Event,
        AccessModifier::Public,
    );
    event.ty = Some(TypeRef::named("System", "EventHandler"));
    event.is_abstract = true;
    row.members.push(event);

    let mut property = MemberMetadata::new(
        MetadataToken(0x0600_0031),
        "TestProperty",
        MemberKind::Property,
        AccessModifier::Public,
    );
    property.ty = Some(TypeRef::named("System", "Int32"));
    property.is_abstract = true;
    property.getter = Some(AccessorMetadata::new(AccessModifier::Public));
    property.setter = Some(AccessorMetadata::new(AccessModifier::Public));
    row.members.push(property);

    let mut method = MemberMetadata::new(
        MetadataToken(0x0600_0032),
        "TestMethod",
        MemberKind::Method,
        AccessModifier::Public,
    );
    method.is_abstract = true;
    method.return_type = Some(TypeRef::Void);
    row.members.push(method);

    row
}

fn test_class() -> TypeMetadata {
    let mut row = TypeMetadata::new(
        MetadataToken(0x0200_0004),
        TypeKind::Class,
        "CodeMap.Tests",
        "TestClass`1",
        AccessModifier::Public,
    );
    row.generic_parameters = vec![GenericParameterMetadata::new("TParam", 0)];
    row.base_type = Some(TypeRef::named("System", "Object"));
    row.interfaces = vec![TypeRef::defined(MetadataToken(0x0200_0003))];

    let mut constant = MemberMetadata::new(
        MetadataToken(0x0400_0010),
        "TestConstant",
        MemberKind::Constant,
        AccessModifier::Public,
    );
    constant.ty = Some(TypeRef::named("System", "Double"));
    constant.value = Some(ConstantValue::Float(1.0));
    row.members.push(constant);

    let mut field = MemberMetadata::new(
        MetadataToken(0x0400_0011),
        "TestField",
        MemberKind::Field,
        AccessModifier::Public,
    );
    field.ty = Some(TypeRef::named("System", "Int32"));
    field.is_read_only = true;
    row.members.push(field);

    let mut ctor = MemberMetadata::new(
        MetadataToken(0x0600_0010),
        ".ctor",
        MemberKind::Constructor,
        AccessModifier::Public,
    );
    ctor.parameters = vec![ParameterMetadata::new(
        "value",
        TypeRef::TypeParam {
            position: 0,
            name: "TParam".to_string(),
        },
    )];
    row.members.push(ctor);

    let mut event = MemberMetadata::new(
        MetadataToken(0x0600_0011),
        "TestEvent",
        MemberKind::Event,
        AccessModifier::Public,
    );
    event.ty = Some(TypeRef::named("System", "EventHandler"));
    event.is_virtual = true;
    row.members.push(event);

    let mut property = MemberMetadata::new(
        MetadataToken(0x0600_0012),
        "TestProperty",
        MemberKind::Property,
        AccessModifier::Public,
    );
    property.ty = Some(TypeRef::named("System", "Int32"));
    property.getter = Some(AccessorMetadata::new(AccessModifier::Public));
    property.setter = Some(AccessorMetadata::new(AccessModifier::Family));
    row.members.push(property);

    let mut indexer = MemberMetadata::new(
        MetadataToken(0x0600_0013),
        "Item",
        MemberKind::Property,
        AccessModifier::Public,
    );
    indexer.ty = Some(TypeRef::named("System", "String"));
    indexer.parameters = vec![ParameterMetadata::new(
        "index",
        TypeRef::named("System", "Int32"),
    )];
    indexer.getter = Some(AccessorMetadata::new(AccessModifier::Public));
    row.members.push(indexer);

    let mut method = MemberMetadata::new(
        MetadataToken(0x0600_0014),
        "TestMethod",
        MemberKind::Method,
        AccessModifier::Public,
    );
    method.is_virtual = true;
    method.generic_parameters = vec![GenericParameterMetadata::new("TMethod", 0)];
    method.parameters = vec![
        ParameterMetadata::new(
            "arg",
            TypeRef::MethodParam {
                position: 0,
                name: "TMethod".to_string(),
            },
        ),
        ParameterMetadata::new(
            "values",
            TypeRef::Array {
                rank: 1,
                item: Box::new(TypeRef::TypeParam {
                    position: 0,
                    name: "TParam".to_string(),
                }),
            },
        ),
    ];
    method.return_type = Some(TypeRef::named("System", "Boolean"));
    row.members.push(method);

    row
}

fn nested_test_class() -> TypeMetadata {
    let mut row = TypeMetadata::new(
        MetadataToken(0x0200_0005),
        TypeKind::Class,
        "CodeMap.Tests",
        "NestedTestClass`1",
        AccessModifier::Public,
    );
    row.declaring_type = Some(MetadataToken(0x0200_0004));
    row.generic_parameters = vec![
        GenericParameterMetadata::new("TParam", 0),
        GenericParameterMetadata::new("TInner", 1),
    ];
    row
}

fn test_struct() -> TypeMetadata {
    let mut row = TypeMetadata::new(
        MetadataToken(0x0200_0006),
        TypeKind::Struct,
        "CodeMap.Tests",
        "TestStruct",
        AccessModifier::Public,
    );
    row.interfaces = vec![TypeRef::Named {
        name: "IEquatable`1".to_string(),
        namespace: "System".to_string(),
        declaring_path: Vec::new(),
        generic_arguments: vec![TypeRef::defined(MetadataToken(0x0200_0006))],
        assembly: Some(system_runtime()),
    }];

    let mut field = MemberMetadata::new(
        MetadataToken(0x0400_0020),
        "TestField",
        MemberKind::Field,
        AccessModifier::Public,
    );
    field.ty = Some(TypeRef::named("System", "Int32"));
    row.members.push(field);

    row
}

fn test_record() -> TypeMetadata {
    let mut row = TypeMetadata::new(
        MetadataToken(0x0200_0007),
        TypeKind::Record,
        "CodeMap.Tests",
        "TestRecord",
        AccessModifier::Public,
    );
    row.is_sealed = true;

    let mut property = MemberMetadata::new(
        MetadataToken(0x0600_0020),
        "Name",
        MemberKind::Property,
        AccessModifier::Public,
    );
    property.ty = Some(TypeRef::named("System", "String"));
    property.getter = Some(AccessorMetadata::new(AccessModifier::Public));
    row.members.push(property);

    row
}

fn internal_class() -> TypeMetadata {
    TypeMetadata::new(
        MetadataToken(0x0200_0008),
        TypeKind::Class,
        "CodeMap.Tests",
        "InternalClass",
        AccessModifier::Assembly,
    )
}

const SAMPLE_DOCS: &str = r#"<doc>
  <assembly>
    <name>CodeMap.Tests.Data</name>
  </assembly>
  <members>
    <member name="N:CodeMap.Tests">
      <summary>Types used to exercise documentation generation.</summary>
    </member>
    <member name="T:CodeMap.Tests.TestEnum">
      <summary>An enum with three members.</summary>
    </member>
    <member name="F:CodeMap.Tests.TestEnum.TestMember1">
      <summary>The first member.</summary>
    </member>
    <member name="T:CodeMap.Tests.TestDelegate">
      <summary>A delegate matching values against text.</summary>
      <param name="value">The value to match.</param>
      <param name="text">The text to match against.</param>
      <returns>Whether the value matches.</returns>
    </member>
    <member name="T:CodeMap.Tests.ITestInterface">
      <summary>An interface with one member of each permitted kind.</summary>
    </member>
    <member name="T:CodeMap.Tests.TestClass`1">
      <summary>A generic class exercising every member kind. See
        <see cref="T:CodeMap.Tests.ITestInterface"/> for its contract.</summary>
      <typeparam name="TParam">The element type.</typeparam>
      <remarks>
        <para>Used by tests only.</para>
        <code language="c#">var instance = new TestClass&lt;int&gt;(42);</code>
      </remarks>
      <example>Construct one with any value.</example>
      <seealso cref="T:CodeMap.Tests.TestStruct"/>
    </member>
    <member name="F:CodeMap.Tests.TestClass`1.TestConstant">
      <summary>A constant with value one.</summary>
    </member>
    <member name="M:CodeMap.Tests.TestClass`1.#ctor(`0)">
      <summary>Creates an instance holding a value.</summary>
      <param name="value">The value to hold.</param>
    </member>
    <member name="P:CodeMap.Tests.TestClass`1.TestProperty">
      <summary>A read-write property.</summary>
      <value>The stored number.</value>
    </member>
    <member name="M:CodeMap.Tests.TestClass`1.TestMethod``1(``0,`0[])">
      <summary>Matches an argument against stored values.</summary>
      <typeparam name="TMethod">The argument type.</typeparam>
      <param name="arg">The argument to match.</param>
      <param name="values">Candidate values.</param>
      <returns>Whether a candidate matched.</returns>
      <exception cref="T:System.ArgumentNullException">Thrown when values is null.</exception>
    </member>
    <member name="T:CodeMap.Tests.TestStruct">
      <summary>A struct with equality.</summary>
    </member>
    <member name="T:CodeMap.Tests.TestRecord">
      <summary>A sealed record.</summary>
    </member>
  </members>
</doc>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_assembly_round_trips_through_json() {
        let assembly = sample_assembly();
        let json = snapshot_json().unwrap();
        let parsed: AssemblyMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, assembly);
    }

    #[test]
    fn test_sample_tree_builds_with_docs() {
        let tree = sample_tree(AccessFilter::Public).unwrap();
        assert_eq!(tree.assembly().name, "CodeMap.Tests.Data");

        // Public filtering drops the internal class.
        assert_eq!(tree.types().count(), 7);

        let (_, class) = tree
            .types()
            .find(|(_, ty)| ty.name() == "TestClass")
            .unwrap();
        assert!(class.docs().first_summary_sentence().is_some());
    }

    #[test]
    fn test_sample_docs_cover_namespace() {
        let docs = XmlDocs::parse(sample_docs_xml()).unwrap();
        assert!(docs.get("N:CodeMap.Tests").is_some());
    }
}
