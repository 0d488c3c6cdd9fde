//! JSON rendering of member references
//!
//! The layout is part of the output contract: every object carries a `kind`
//! discriminator, composite references wrap their referent and recurse, and
//! generic parameters terminate with a name. Consumers key templates off the
//! `kind` strings, so they are pinned by fixture tests.

use std::mem;

use serde_json::{json, Value};

use crate::metadata::ConstantValue;

use super::{
    ArrayReference, AssemblyReference, ByRefReference, ConstantReference, ConstructorReference,
    EventReference, FieldReference, GenericMethodParameterReference,
    GenericTypeParameterReference, MemberReference, MemberReferenceVisitor, MethodReference,
    PointerReference, PropertyReference, SpecialType, TypeReference,
};

/// Render a member reference as a JSON value
#[must_use]
pub fn reference_json(reference: &MemberReference) -> Value {
    let mut writer = ReferenceJsonWriter::new();
    reference.accept(&mut writer);
    writer.into_value()
}

/// Render a constant as its literal JSON value
///
/// `typeof(...)` literals render as the reference object of their type;
/// array literals render element-wise.
#[must_use]
pub fn constant_json(value: &ConstantValue<MemberReference>) -> Value {
    match value {
        ConstantValue::Null => Value::Null,
        ConstantValue::Boolean(value) => json!(value),
        ConstantValue::Char(value) => json!(value.to_string()),
        ConstantValue::Integer(value) => json!(value),
        ConstantValue::UnsignedInteger(value) => json!(value),
        ConstantValue::Float(value) => json!(value),
        ConstantValue::String(value) => json!(value),
        ConstantValue::Type(reference) => reference_json(reference),
        ConstantValue::Array(items) => Value::Array(items.iter().map(constant_json).collect()),
    }
}

/// Visitor that renders one member reference into a JSON value
#[derive(Debug, Default)]
pub struct ReferenceJsonWriter {
    value: Value,
}

impl ReferenceJsonWriter {
    /// Create a writer with no value rendered yet
    #[must_use]
    pub fn new() -> Self {
        Self { value: Value::Null }
    }

    /// Take the rendered value out of the writer
    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }
}

impl MemberReferenceVisitor for ReferenceJsonWriter {
    fn visit_type(&mut self, reference: &TypeReference) {
        self.value = type_value(reference);
    }

    fn visit_array(&mut self, reference: &ArrayReference) {
        reference.item.accept(self);
        let item = mem::take(&mut self.value);
        self.value = json!({
            "kind": "array",
            "rank": reference.rank,
            "itemType": item,
        });
    }

    fn visit_pointer(&mut self, reference: &PointerReference) {
        reference.referent.accept(self);
        let referent = mem::take(&mut self.value);
        self.value = json!({
            "kind": "pointer",
            "referentType": referent,
        });
    }

    fn visit_by_ref(&mut self, reference: &ByRefReference) {
        reference.referent.accept(self);
        let referent = mem::take(&mut self.value);
        self.value = json!({
            "kind": "byRef",
            "referentType": referent,
        });
    }

    fn visit_generic_type_parameter(&mut self, reference: &GenericTypeParameterReference) {
        self.value = json!({
            "kind": "genericTypeParameter",
            "name": reference.name,
        });
    }

    fn visit_generic_method_parameter(&mut self, reference: &GenericMethodParameterReference) {
        self.value = json!({
            "kind": "genericMethodParameter",
            "name": reference.name,
        });
    }

    fn visit_constant(&mut self, reference: &ConstantReference) {
        self.value = json!({
            "kind": "constant",
            "name": reference.name,
            "declaringType": type_value(&reference.declaring_type),
        });
    }

    fn visit_field(&mut self, reference: &FieldReference) {
        self.value = json!({
            "kind": "field",
            "name": reference.name,
            "declaringType": type_value(&reference.declaring_type),
        });
    }

    fn visit_constructor(&mut self, reference: &ConstructorReference) {
        self.value = json!({
            "kind": "constructor",
            "declaringType": type_value(&reference.declaring_type),
            "parameterTypes": reference_list(&reference.parameter_types),
        });
    }

    fn visit_event(&mut self, reference: &EventReference) {
        self.value = json!({
            "kind": "event",
            "name": reference.name,
            "declaringType": type_value(&reference.declaring_type),
        });
    }

    fn visit_property(&mut self, reference: &PropertyReference) {
        self.value = json!({
            "kind": "property",
            "name": reference.name,
            "declaringType": type_value(&reference.declaring_type),
            "parameterTypes": reference_list(&reference.parameter_types),
        });
    }

    fn visit_method(&mut self, reference: &MethodReference) {
        self.value = json!({
            "kind": "method",
            "name": reference.name,
            "declaringType": type_value(&reference.declaring_type),
            "genericArguments": reference_list(&reference.generic_arguments),
            "parameterTypes": reference_list(&reference.parameter_types),
        });
    }

    fn visit_assembly(&mut self, reference: &AssemblyReference) {
        self.value = json!({
            "kind": "assembly",
            "name": reference.name,
            "version": reference.version.to_string(),
            "culture": reference.culture,
            "publicKeyToken": reference.public_key_token,
        });
    }
}

fn reference_list(references: &[MemberReference]) -> Value {
    Value::Array(references.iter().map(reference_json).collect())
}

fn type_value(reference: &TypeReference) -> Value {
    match reference.special {
        Some(SpecialType::Void) => json!({
            "kind": "specific/void",
            "name": reference.name,
            "namespace": reference.namespace,
        }),
        Some(SpecialType::Dynamic) => json!({
            "kind": "specific/dynamic",
            "name": reference.name,
        }),
        None => json!({
            "kind": "specific",
            "name": reference.name,
            "namespace": reference.namespace,
            "declaringType": reference
                .declaring_type
                .as_deref()
                .map_or(Value::Null, type_value),
            "genericArguments": reference_list(&reference.generic_arguments),
            "assembly": reference.assembly.as_ref().map_or(Value::Null, assembly_value),
        }),
    }
}

fn assembly_value(reference: &AssemblyReference) -> Value {
    json!({
        "name": reference.name,
        "version": reference.version.to_string(),
        "culture": reference.culture,
        "publicKeyToken": reference.public_key_token,
    })
}
