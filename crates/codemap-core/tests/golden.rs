//! Golden-file tests pinning the JSON layouts clients depend on

use codemap_core::declarations::DeclarationId;
use codemap_core::metadata::{AssemblyName, Version};
use codemap_core::references::{
    ArrayReference, AssemblyReference, ByRefReference, MethodReference, TypeReference,
    reference_json,
};
use codemap_core::testutil;
use codemap_core::{declaration_json, AccessFilter, MemberReference};
use serde_json::Value;

fn fixture(text: &str) -> Value {
    serde_json::from_str(text).unwrap()
}

fn int32() -> MemberReference {
    MemberReference::Type(TypeReference::new("System", "Int32"))
}

#[test]
fn test_specific_type_layout_is_stable() {
    let runtime =
        AssemblyName::new("System.Runtime", Version::new(4, 2, 2, 0)).with_public_key_token("b03f5f7f11d50a3a");
    let reference = MemberReference::Type(
        TypeReference::new("System", "Int32").with_assembly(AssemblyReference::from(&runtime)),
    );

    assert_eq!(
        reference_json(&reference),
        fixture(include_str!("fixtures/int32_reference.json"))
    );
}

#[test]
fn test_jagged_array_layout_is_stable() {
    // int[][,]: a vector whose items are two-dimensional arrays.
    let reference = MemberReference::Array(ArrayReference::new(
        1,
        MemberReference::Array(ArrayReference::new(2, int32())),
    ));

    assert_eq!(
        reference_json(&reference),
        fixture(include_str!("fixtures/jagged_array_reference.json"))
    );
}

#[test]
fn test_method_reference_layout_is_stable() {
    let reference = MemberReference::Method(MethodReference {
        name: "TryParse".to_string(),
        declaring_type: TypeReference::new("System", "Int32"),
        generic_arguments: Vec::new(),
        parameter_types: vec![
            MemberReference::Type(TypeReference::new("System", "String")),
            MemberReference::ByRef(ByRefReference::new(int32())),
        ],
    });

    assert_eq!(
        reference_json(&reference),
        fixture(include_str!("fixtures/try_parse_reference.json"))
    );
}

#[test]
fn test_rendered_assembly_survives_reserialization() {
    let tree = testutil::sample_tree(AccessFilter::Public).unwrap();
    let rendered = declaration_json(&tree, DeclarationId::Assembly);

    let text = serde_json::to_string(&rendered).unwrap();
    let reparsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(reparsed, rendered);
}
