//! JSON rendering of declaration trees
//!
//! [`DeclarationJsonWriter`] is a [`DeclarationVisitor`] that turns each
//! declaration into one JSON object with a `kind` discriminator and nested
//! arrays for children. The writer drives its own recursion: visiting a
//! namespace serializes its types, visiting a class serializes its members
//! and nested types. The layout is part of the output contract and pinned
//! by fixtures; changing it is a breaking change for consumers.

use std::mem;

use serde_json::{json, Value};

use crate::docs::{Block, Documentation, Inline};
use crate::references::{constant_json, reference_json, MemberReference};

use super::nodes::{
    AccessorData, AssemblyDeclaration, AttributeData, ClassDeclaration, ConstantDeclaration,
    ConstructorDeclaration, DelegateDeclaration, EnumDeclaration, EventDeclaration,
    FieldDeclaration, GenericParameterData, InterfaceDeclaration, MethodDeclaration,
    NamespaceDeclaration, ParameterData, PropertyDeclaration, RecordDeclaration,
    StructDeclaration, TypeBuckets,
};
use super::visitor::DeclarationVisitor;
use super::{DeclarationId, DeclarationTree, MemberId, NamespaceId, TypeId};

/// Serialize one declaration, recursively including its children
#[must_use]
pub fn declaration_json(tree: &DeclarationTree, id: DeclarationId) -> Value {
    let mut writer = DeclarationJsonWriter::new();
    tree.accept(id, &mut writer);
    writer.into_value()
}

/// Declaration visitor producing the JSON layout
#[derive(Debug, Default)]
pub struct DeclarationJsonWriter {
    value: Value,
}

impl DeclarationJsonWriter {
    /// Create a writer with no value
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The value produced by the last accepted declaration
    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }

    fn child_json(&mut self, tree: &DeclarationTree, id: DeclarationId) -> Value {
        tree.accept(id, self);
        mem::take(&mut self.value)
    }

    fn type_list(&mut self, tree: &DeclarationTree, buckets: &TypeBuckets) -> Value {
        Value::Array(
            buckets
                .iter()
                .map(|id| self.child_json(tree, DeclarationId::Type(id)))
                .collect(),
        )
    }

    fn member_list(
        &mut self,
        tree: &DeclarationTree,
        ids: impl Iterator<Item = MemberId>,
    ) -> Value {
        Value::Array(
            ids.map(|id| self.child_json(tree, DeclarationId::Member(id)))
                .collect(),
        )
    }
}

impl DeclarationVisitor for DeclarationJsonWriter {
    fn visit_assembly(&mut self, tree: &DeclarationTree, declaration: &AssemblyDeclaration) {
        let namespaces: Vec<Value> = declaration
            .namespaces
            .iter()
            .map(|id| self.child_json(tree, DeclarationId::Namespace(*id)))
            .collect();
        let dependencies: Vec<Value> = declaration
            .dependencies
            .iter()
            .map(|dependency| reference_json(&MemberReference::Assembly(dependency.clone())))
            .collect();
        let mut value = json!({
            "kind": "assembly",
            "name": declaration.name,
            "version": declaration.version,
            "culture": declaration.culture,
            "publicKeyToken": declaration.public_key_token,
            "attributes": attribute_list(&declaration.attributes),
            "dependencies": dependencies,
            "namespaces": namespaces,
        });
        attach_docs(&mut value, &declaration.docs);
        self.value = value;
    }

    fn visit_namespace(
        &mut self,
        tree: &DeclarationTree,
        _id: NamespaceId,
        declaration: &NamespaceDeclaration,
    ) {
        let types = self.type_list(tree, &declaration.types);
        let mut value = json!({
            "kind": "namespace",
            "name": declaration.name,
            "declaredTypes": types,
        });
        attach_docs(&mut value, &declaration.docs);
        self.value = value;
    }

    fn visit_enum(&mut self, tree: &DeclarationTree, _id: TypeId, declaration: &EnumDeclaration) {
        let members = self.member_list(tree, declaration.members.iter().copied());
        let mut value = json!({
            "kind": "enum",
            "name": declaration.name,
            "access": declaration.access,
            "underlyingType": reference_json(&declaration.underlying_type),
            "attributes": attribute_list(&declaration.attributes),
            "members": members,
        });
        attach_docs(&mut value, &declaration.docs);
        self.value = value;
    }

    fn visit_delegate(
        &mut self,
        tree: &DeclarationTree,
        id: TypeId,
        declaration: &DelegateDeclaration,
    ) {
        let mut value = json!({
            "kind": "delegate",
            "name": declaration.name,
            "access": declaration.access,
            "genericParameters": generic_parameter_list(tree.own_generic_parameters(id)),
            "parameters": parameter_array(&declaration.parameters),
            "returnType": reference_json(&declaration.return_type),
            "attributes": attribute_list(&declaration.attributes),
        });
        attach_docs(&mut value, &declaration.docs);
        self.value = value;
    }

    fn visit_interface(
        &mut self,
        tree: &DeclarationTree,
        id: TypeId,
        declaration: &InterfaceDeclaration,
    ) {
        let members = self.member_list(tree, declaration.members());
        let mut value = json!({
            "kind": "interface",
            "name": declaration.name,
            "access": declaration.access,
            "genericParameters": generic_parameter_list(tree.own_generic_parameters(id)),
            "baseInterfaces": reference_array(&declaration.base_interfaces),
            "attributes": attribute_list(&declaration.attributes),
            "members": members,
        });
        attach_docs(&mut value, &declaration.docs);
        self.value = value;
    }

    fn visit_class(&mut self, tree: &DeclarationTree, id: TypeId, declaration: &ClassDeclaration) {
        let members = self.member_list(tree, declaration.members.iter());
        let nested = self.type_list(tree, &declaration.nested_types);
        let mut value = json!({
            "kind": "class",
            "name": declaration.name,
            "access": declaration.access,
            "genericParameters": generic_parameter_list(tree.own_generic_parameters(id)),
            "baseClass": optional_reference(declaration.base_class.as_ref()),
            "interfaces": reference_array(&declaration.interfaces),
            "isAbstract": declaration.is_abstract,
            "isSealed": declaration.is_sealed,
            "isStatic": declaration.is_static,
            "attributes": attribute_list(&declaration.attributes),
            "members": members,
            "nestedTypes": nested,
        });
        attach_docs(&mut value, &declaration.docs);
        self.value = value;
    }

    fn visit_struct(
        &mut self,
        tree: &DeclarationTree,
        id: TypeId,
        declaration: &StructDeclaration,
    ) {
        let members = self.member_list(tree, declaration.members.iter());
        let nested = self.type_list(tree, &declaration.nested_types);
        let mut value = json!({
            "kind": "struct",
            "name": declaration.name,
            "access": declaration.access,
            "genericParameters": generic_parameter_list(tree.own_generic_parameters(id)),
            "interfaces": reference_array(&declaration.interfaces),
            "attributes": attribute_list(&declaration.attributes),
            "members": members,
            "nestedTypes": nested,
        });
        attach_docs(&mut value, &declaration.docs);
        self.value = value;
    }

    fn visit_record(
        &mut self,
        tree: &DeclarationTree,
        id: TypeId,
        declaration: &RecordDeclaration,
    ) {
        let members = self.member_list(tree, declaration.members.iter());
        let nested = self.type_list(tree, &declaration.nested_types);
        let mut value = json!({
            "kind": "record",
            "name": declaration.name,
            "access": declaration.access,
            "genericParameters": generic_parameter_list(tree.own_generic_parameters(id)),
            "baseRecord": optional_reference(declaration.base_record.as_ref()),
            "interfaces": reference_array(&declaration.interfaces),
            "isAbstract": declaration.is_abstract,
            "isSealed": declaration.is_sealed,
            "attributes": attribute_list(&declaration.attributes),
            "members": members,
            "nestedTypes": nested,
        });
        attach_docs(&mut value, &declaration.docs);
        self.value = value;
    }

    fn visit_constant(
        &mut self,
        _tree: &DeclarationTree,
        _id: MemberId,
        declaration: &ConstantDeclaration,
    ) {
        let mut value = json!({
            "kind": "constant",
            "name": declaration.name,
            "access": declaration.access,
            "type": reference_json(&declaration.ty),
            "value": constant_json(&declaration.value),
            "isShadowing": declaration.is_shadowing,
            "attributes": attribute_list(&declaration.attributes),
        });
        attach_docs(&mut value, &declaration.docs);
        self.value = value;
    }

    fn visit_field(
        &mut self,
        _tree: &DeclarationTree,
        _id: MemberId,
        declaration: &FieldDeclaration,
    ) {
        let mut value = json!({
            "kind": "field",
            "name": declaration.name,
            "access": declaration.access,
            "type": reference_json(&declaration.ty),
            "isStatic": declaration.is_static,
            "isReadOnly": declaration.is_read_only,
            "isShadowing": declaration.is_shadowing,
            "attributes": attribute_list(&declaration.attributes),
        });
        attach_docs(&mut value, &declaration.docs);
        self.value = value;
    }

    fn visit_constructor(
        &mut self,
        _tree: &DeclarationTree,
        _id: MemberId,
        declaration: &ConstructorDeclaration,
    ) {
        let mut value = json!({
            "kind": "constructor",
            "name": declaration.name,
            "access": declaration.access,
            "isStatic": declaration.is_static,
            "parameters": parameter_array(&declaration.parameters),
            "attributes": attribute_list(&declaration.attributes),
        });
        attach_docs(&mut value, &declaration.docs);
        self.value = value;
    }

    fn visit_event(
        &mut self,
        _tree: &DeclarationTree,
        _id: MemberId,
        declaration: &EventDeclaration,
    ) {
        let mut value = json!({
            "kind": "event",
            "name": declaration.name,
            "access": declaration.access,
            "handlerType": reference_json(&declaration.handler_type),
            "isStatic": declaration.modifiers.is_static,
            "isAbstract": declaration.modifiers.is_abstract,
            "isVirtual": declaration.modifiers.is_virtual,
            "isOverride": declaration.modifiers.is_override,
            "isSealed": declaration.modifiers.is_sealed,
            "isShadowing": declaration.modifiers.is_shadowing,
            "attributes": attribute_list(&declaration.attributes),
        });
        attach_docs(&mut value, &declaration.docs);
        self.value = value;
    }

    fn visit_property(
        &mut self,
        _tree: &DeclarationTree,
        _id: MemberId,
        declaration: &PropertyDeclaration,
    ) {
        let mut value = json!({
            "kind": "property",
            "name": declaration.name,
            "access": declaration.access,
            "type": reference_json(&declaration.ty),
            "isStatic": declaration.modifiers.is_static,
            "isAbstract": declaration.modifiers.is_abstract,
            "isVirtual": declaration.modifiers.is_virtual,
            "isOverride": declaration.modifiers.is_override,
            "isSealed": declaration.modifiers.is_sealed,
            "isShadowing": declaration.modifiers.is_shadowing,
            "parameters": parameter_array(&declaration.parameters),
            "getter": optional_accessor(declaration.getter.as_ref()),
            "setter": optional_accessor(declaration.setter.as_ref()),
            "attributes": attribute_list(&declaration.attributes),
        });
        attach_docs(&mut value, &declaration.docs);
        self.value = value;
    }

    fn visit_method(
        &mut self,
        _tree: &DeclarationTree,
        _id: MemberId,
        declaration: &MethodDeclaration,
    ) {
        let mut value = json!({
            "kind": "method",
            "name": declaration.name,
            "access": declaration.access,
            "isStatic": declaration.modifiers.is_static,
            "isAbstract": declaration.modifiers.is_abstract,
            "isVirtual": declaration.modifiers.is_virtual,
            "isOverride": declaration.modifiers.is_override,
            "isSealed": declaration.modifiers.is_sealed,
            "isShadowing": declaration.modifiers.is_shadowing,
            "genericParameters": generic_parameter_list(&declaration.generic_parameters),
            "parameters": parameter_array(&declaration.parameters),
            "returnType": reference_json(&declaration.return_type),
            "attributes": attribute_list(&declaration.attributes),
        });
        attach_docs(&mut value, &declaration.docs);
        self.value = value;
    }
}

fn optional_reference(reference: Option<&MemberReference>) -> Value {
    reference.map_or(Value::Null, reference_json)
}

fn reference_array(references: &[MemberReference]) -> Value {
    Value::Array(references.iter().map(reference_json).collect())
}

fn attribute_list(attributes: &[AttributeData]) -> Value {
    Value::Array(
        attributes
            .iter()
            .map(|attribute| {
                json!({
                    "type": reference_json(&MemberReference::Type(attribute.ty.clone())),
                    "positional": attribute
                        .positional
                        .iter()
                        .map(|argument| json!({
                            "value": constant_json(&argument.value),
                            "type": reference_json(&argument.ty),
                        }))
                        .collect::<Vec<_>>(),
                    "named": attribute
                        .named
                        .iter()
                        .map(|argument| json!({
                            "name": argument.name,
                            "value": constant_json(&argument.value),
                            "type": reference_json(&argument.ty),
                        }))
                        .collect::<Vec<_>>(),
                })
            })
            .collect(),
    )
}

fn generic_parameter_list(parameters: &[GenericParameterData]) -> Value {
    Value::Array(
        parameters
            .iter()
            .map(|parameter| {
                json!({
                    "name": parameter.name,
                    "position": parameter.position,
                    "variance": parameter.variance,
                    "hasReferenceTypeConstraint": parameter.has_reference_type_constraint,
                    "hasValueTypeConstraint": parameter.has_value_type_constraint,
                    "hasDefaultConstructorConstraint": parameter.has_default_constructor_constraint,
                    "typeConstraints": reference_array(&parameter.type_constraints),
                    "description": block_list(&parameter.description),
                })
            })
            .collect(),
    )
}

fn parameter_array(parameters: &[ParameterData]) -> Value {
    Value::Array(parameters.iter().map(parameter_json).collect())
}

fn parameter_json(parameter: &ParameterData) -> Value {
    let mut value = json!({
        "name": parameter.name,
        "type": reference_json(&parameter.ty),
        "passing": parameter.passing,
        "attributes": attribute_list(&parameter.attributes),
        "description": block_list(&parameter.description),
    });
    if let Some(default) = &parameter.default_value {
        if let Some(object) = value.as_object_mut() {
            object.insert("defaultValue".to_string(), constant_json(default));
        }
    }
    value
}

fn optional_accessor(accessor: Option<&AccessorData>) -> Value {
    accessor.map_or(Value::Null, |accessor| {
        json!({
            "access": accessor.access,
            "attributes": attribute_list(&accessor.attributes),
        })
    })
}

/// Insert documentation sections, each only when it has content
fn attach_docs(value: &mut Value, docs: &Documentation) {
    let Some(object) = value.as_object_mut() else {
        return;
    };
    if !docs.summary.is_empty() {
        object.insert("summary".to_string(), block_list(&docs.summary));
    }
    if !docs.remarks.is_empty() {
        object.insert("remarks".to_string(), block_list(&docs.remarks));
    }
    if !docs.examples.is_empty() {
        object.insert(
            "examples".to_string(),
            Value::Array(
                docs.examples
                    .iter()
                    .map(|example| block_list(&example.content))
                    .collect(),
            ),
        );
    }
    if !docs.returns.is_empty() {
        object.insert("returns".to_string(), block_list(&docs.returns));
    }
    if !docs.value.is_empty() {
        object.insert("value".to_string(), block_list(&docs.value));
    }
    if !docs.exceptions.is_empty() {
        object.insert(
            "exceptions".to_string(),
            Value::Array(
                docs.exceptions
                    .iter()
                    .map(|exception| {
                        json!({
                            "exception": reference_json(&exception.exception),
                            "description": block_list(&exception.description),
                        })
                    })
                    .collect(),
            ),
        );
    }
    if !docs.related.is_empty() {
        object.insert(
            "related".to_string(),
            Value::Array(docs.related.iter().map(reference_json).collect()),
        );
    }
}

fn block_list(blocks: &[Block]) -> Value {
    Value::Array(blocks.iter().map(block_json).collect())
}

fn block_json(block: &Block) -> Value {
    match block {
        Block::Paragraph(paragraph) => json!({
            "kind": "paragraph",
            "content": paragraph.content.iter().map(inline_json).collect::<Vec<_>>(),
        }),
        Block::Code(code) => json!({
            "kind": "code",
            "language": code.language,
            "text": code.text,
        }),
    }
}

fn inline_json(inline: &Inline) -> Value {
    match inline {
        Inline::Text(text) => json!({ "kind": "text", "text": text }),
        Inline::Link(link) => json!({
            "kind": "link",
            "target": link.target,
            "text": link.text,
        }),
    }
}
