//! Snapshot resolution
//!
//! [`DeclarationTreeBuilder`] turns a metadata snapshot into a declaration
//! tree in two sweeps. The first sweep decides which type rows the access
//! filter admits and hands out arena ids in row order; the second constructs
//! the declaration nodes, resolving every `TypeRef` into the reference model
//! and attaching documentation matched by documentation id. A nested type is
//! admitted only when its whole declaring chain is.

use std::collections::{BTreeSet, HashMap};

use crate::docs::{DocIdComposer, Documentation, MemberDocs, XmlDocs};
use crate::metadata::{
    AccessFilter, AccessorMetadata, AssemblyMetadata, AssemblyName, AttributeMetadata,
    ConstantValue, GenericParameterMetadata, MemberKind, MemberMetadata, MetadataToken,
    ParameterMetadata, TypeIndex, TypeKind, TypeMetadata, TypeRef,
};
use crate::references::{
    ArrayReference, AssemblyReference, ByRefReference, GenericMethodParameterReference,
    GenericTypeParameterReference, MemberReference, PointerReference, TypeReference,
};

use super::nodes::{
    AccessorData, AssemblyDeclaration, AttributeArgumentData, AttributeData, ClassDeclaration,
    ConstantDeclaration, ConstructorDeclaration, DelegateDeclaration, EnumDeclaration,
    EventDeclaration, FieldDeclaration, GenericParameterData, InterfaceDeclaration, MemberBuckets,
    MemberDeclaration, MemberModifiers, MethodDeclaration, NamedAttributeArgumentData,
    NamespaceDeclaration, ParameterData, PropertyDeclaration, RecordDeclaration, StructDeclaration,
    TypeBuckets, TypeDeclaration,
};
use super::{DeclarationScope, DeclarationTree, MemberId, NamespaceId, TypeId};

/// Builds declaration trees from metadata snapshots
///
/// The builder is reusable: one configured instance can resolve any number
/// of snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclarationTreeBuilder<'a> {
    filter: AccessFilter,
    docs: Option<&'a XmlDocs>,
}

impl<'a> DeclarationTreeBuilder<'a> {
    /// Create a builder with the given access filter and no documentation
    #[must_use]
    pub fn new(filter: AccessFilter) -> Self {
        Self { filter, docs: None }
    }

    /// Attach parsed documentation to match against declarations by id
    #[must_use]
    pub fn with_documentation(mut self, docs: &'a XmlDocs) -> Self {
        self.docs = Some(docs);
        self
    }

    /// Resolve a snapshot into a declaration tree
    #[must_use]
    pub fn build(&self, assembly: &AssemblyMetadata) -> DeclarationTree {
        BuildPass::new(self.filter, self.docs, assembly).run()
    }
}

/// One resolution run over a single snapshot
struct BuildPass<'a> {
    filter: AccessFilter,
    docs: Option<&'a XmlDocs>,
    assembly: &'a AssemblyMetadata,
    index: TypeIndex<'a>,
    /// Identity of the documented assembly, stamped on defined-type references
    project: AssemblyReference,
    /// Admitted type rows in row order; arena order matches
    admitted: Vec<&'a TypeMetadata>,
    type_ids: HashMap<MetadataToken, TypeId>,
    /// Admitted children per declaring token, in row order
    children: HashMap<MetadataToken, Vec<&'a TypeMetadata>>,
    /// Namespace names sorted with the global namespace first
    namespace_names: Vec<&'a str>,
    namespace_ids: HashMap<&'a str, NamespaceId>,
}

impl<'a> BuildPass<'a> {
    fn new(
        filter: AccessFilter,
        docs: Option<&'a XmlDocs>,
        assembly: &'a AssemblyMetadata,
    ) -> Self {
        let index = TypeIndex::new(assembly);

        let mut admitted = Vec::new();
        let mut type_ids = HashMap::new();
        let mut next = 0u32;
        for ty in &assembly.types {
            if admits_chain(filter, &index, ty) {
                type_ids.insert(ty.token, TypeId::new(next));
                next += 1;
                admitted.push(ty);
            }
        }

        let mut children: HashMap<MetadataToken, Vec<&'a TypeMetadata>> = HashMap::new();
        for ty in &admitted {
            if let Some(declaring) = ty.declaring_type {
                children.entry(declaring).or_default().push(ty);
            }
        }

        // The empty global namespace name sorts first on its own.
        let names: BTreeSet<&str> = admitted
            .iter()
            .filter(|ty| ty.declaring_type.is_none())
            .map(|ty| ty.namespace.as_str())
            .collect();
        let namespace_names: Vec<&str> = names.into_iter().collect();
        let mut namespace_ids = HashMap::new();
        let mut next = 0u32;
        for name in &namespace_names {
            namespace_ids.insert(*name, NamespaceId::new(next));
            next += 1;
        }

        Self {
            filter,
            docs,
            assembly,
            index,
            project: AssemblyReference::from(&assembly.name),
            admitted,
            type_ids,
            children,
            namespace_names,
            namespace_ids,
        }
    }

    fn run(&self) -> DeclarationTree {
        let composer = DocIdComposer::new(&self.index);

        let mut namespaces: Vec<NamespaceDeclaration> = self
            .namespace_names
            .iter()
            .map(|name| NamespaceDeclaration {
                name: (*name).to_string(),
                types: TypeBuckets::default(),
                docs: documentation(self.member_docs(&DocIdComposer::namespace_id(name))),
            })
            .collect();
        for row in &self.admitted {
            if row.declaring_type.is_none() {
                let namespace = self.namespace_ids[row.namespace.as_str()];
                push_type(
                    &mut namespaces[namespace.index()].types,
                    row.kind,
                    self.type_ids[&row.token],
                );
            }
        }

        let mut types = Vec::with_capacity(self.admitted.len());
        let mut members = Vec::new();
        let mut next_member = 0u32;
        for row in &self.admitted {
            let id = self.type_ids[&row.token];
            types.push(self.build_type(row, id, &composer, &mut members, &mut next_member));
        }

        let identity = &self.assembly.name;
        DeclarationTree {
            assembly: AssemblyDeclaration {
                name: identity.name.clone(),
                version: identity.version,
                culture: identity.culture.clone(),
                public_key_token: identity.public_key_token.clone(),
                attributes: self.attributes(&self.assembly.attributes),
                dependencies: self
                    .assembly
                    .dependencies
                    .iter()
                    .map(AssemblyReference::from)
                    .collect(),
                namespaces: (0u32..)
                    .map(NamespaceId::new)
                    .take(namespaces.len())
                    .collect(),
                docs: Documentation::default(),
            },
            namespaces,
            types,
            members,
        }
    }

    fn build_type(
        &self,
        row: &'a TypeMetadata,
        id: TypeId,
        composer: &DocIdComposer<'_>,
        arena: &mut Vec<MemberDeclaration>,
        next: &mut u32,
    ) -> TypeDeclaration {
        let docs = self.member_docs(&composer.type_id(row));
        let scope = self.scope_of(row);
        let attributes = self.attributes(&row.attributes);
        let generic_parameters = self.generic_parameters(&row.generic_parameters, docs);
        let documentation = documentation(docs);

        match row.kind {
            TypeKind::Enum => {
                let mut ids = Vec::new();
                for member in &row.members {
                    if member.kind != MemberKind::Constant || !self.filter.admits(member.access) {
                        continue;
                    }
                    ids.push(self.admit_member(row, member, id, composer, arena, next));
                }
                TypeDeclaration::Enum(EnumDeclaration {
                    name: row.clean_name().to_string(),
                    access: row.access,
                    scope,
                    token: row.token,
                    underlying_type: row.underlying_type.as_ref().map_or_else(
                        || MemberReference::Type(TypeReference::new("System", "Int32")),
                        |ty| self.reference(ty),
                    ),
                    members: ids,
                    attributes,
                    docs: documentation,
                })
            }
            TypeKind::Delegate => TypeDeclaration::Delegate(DelegateDeclaration {
                name: row.clean_name().to_string(),
                access: row.access,
                scope,
                token: row.token,
                generic_parameters,
                parameters: self.parameters(&row.parameters, docs),
                return_type: self.return_type(row.return_type.as_ref()),
                attributes,
                docs: documentation,
            }),
            TypeKind::Interface => {
                let mut events = Vec::new();
                let mut properties = Vec::new();
                let mut methods = Vec::new();
                for member in &row.members {
                    if !self.filter.admits(member.access) {
                        continue;
                    }
                    let bucket = match member.kind {
                        MemberKind::Event => &mut events,
                        MemberKind::Property => &mut properties,
                        MemberKind::Method => &mut methods,
                        _ => continue,
                    };
                    bucket.push(self.admit_member(row, member, id, composer, arena, next));
                }
                TypeDeclaration::Interface(InterfaceDeclaration {
                    name: row.clean_name().to_string(),
                    access: row.access,
                    scope,
                    token: row.token,
                    generic_parameters,
                    base_interfaces: self.references(&row.interfaces),
                    events,
                    properties,
                    methods,
                    attributes,
                    docs: documentation,
                })
            }
            TypeKind::Class => TypeDeclaration::Class(ClassDeclaration {
                name: row.clean_name().to_string(),
                access: row.access,
                scope,
                token: row.token,
                generic_parameters,
                base_class: row.base_type.as_ref().map(|ty| self.reference(ty)),
                interfaces: self.references(&row.interfaces),
                is_abstract: row.is_abstract,
                is_sealed: row.is_sealed,
                is_static: row.is_static,
                members: self.member_buckets(row, id, composer, arena, next),
                nested_types: self.nested_buckets(row),
                attributes,
                docs: documentation,
            }),
            TypeKind::Struct => TypeDeclaration::Struct(StructDeclaration {
                name: row.clean_name().to_string(),
                access: row.access,
                scope,
                token: row.token,
                generic_parameters,
                interfaces: self.references(&row.interfaces),
                members: self.member_buckets(row, id, composer, arena, next),
                nested_types: self.nested_buckets(row),
                attributes,
                docs: documentation,
            }),
            TypeKind::Record => TypeDeclaration::Record(RecordDeclaration {
                name: row.clean_name().to_string(),
                access: row.access,
                scope,
                token: row.token,
                generic_parameters,
                base_record: row.base_type.as_ref().map(|ty| self.reference(ty)),
                interfaces: self.references(&row.interfaces),
                is_abstract: row.is_abstract,
                is_sealed: row.is_sealed,
                members: self.member_buckets(row, id, composer, arena, next),
                nested_types: self.nested_buckets(row),
                attributes,
                docs: documentation,
            }),
        }
    }

    fn member_buckets(
        &self,
        row: &'a TypeMetadata,
        declaring: TypeId,
        composer: &DocIdComposer<'_>,
        arena: &mut Vec<MemberDeclaration>,
        next: &mut u32,
    ) -> MemberBuckets {
        let mut buckets = MemberBuckets::default();
        for member in &row.members {
            if !self.filter.admits(member.access) {
                continue;
            }
            let bucket = match member.kind {
                MemberKind::Constant => &mut buckets.constants,
                MemberKind::Field => &mut buckets.fields,
                MemberKind::Constructor => &mut buckets.constructors,
                MemberKind::Event => &mut buckets.events,
                MemberKind::Property => &mut buckets.properties,
                MemberKind::Method => &mut buckets.methods,
            };
            bucket.push(self.admit_member(row, member, declaring, composer, arena, next));
        }
        buckets
    }

    fn admit_member(
        &self,
        row: &'a TypeMetadata,
        member: &'a MemberMetadata,
        declaring: TypeId,
        composer: &DocIdComposer<'_>,
        arena: &mut Vec<MemberDeclaration>,
        next: &mut u32,
    ) -> MemberId {
        let docs = self.member_docs(&composer.member_id(row, member));
        let id = MemberId::new(*next);
        *next += 1;
        arena.push(self.build_member(row, member, declaring, docs));
        id
    }

    fn build_member(
        &self,
        row: &'a TypeMetadata,
        member: &'a MemberMetadata,
        declaring: TypeId,
        docs: Option<&MemberDocs>,
    ) -> MemberDeclaration {
        let modifiers = MemberModifiers {
            is_static: member.is_static,
            is_abstract: member.is_abstract,
            is_virtual: member.is_virtual,
            is_override: member.is_override,
            is_sealed: member.is_sealed,
            is_shadowing: member.is_shadowing,
        };
        match member.kind {
            MemberKind::Constant => MemberDeclaration::Constant(ConstantDeclaration {
                name: member.name.clone(),
                access: member.access,
                declaring_type: declaring,
                token: member.token,
                ty: self.member_type(member),
                value: member.value.as_ref().map_or(ConstantValue::Null, |value| {
                    value.map_type(&|ty| self.reference(ty))
                }),
                is_shadowing: member.is_shadowing,
                attributes: self.attributes(&member.attributes),
                docs: documentation(docs),
            }),
            MemberKind::Field => MemberDeclaration::Field(FieldDeclaration {
                name: member.name.clone(),
                access: member.access,
                declaring_type: declaring,
                token: member.token,
                ty: self.member_type(member),
                is_static: member.is_static,
                is_read_only: member.is_read_only,
                is_shadowing: member.is_shadowing,
                attributes: self.attributes(&member.attributes),
                docs: documentation(docs),
            }),
            MemberKind::Constructor => MemberDeclaration::Constructor(ConstructorDeclaration {
                // Constructors display under the declaring type's name,
                // not the reflection name `.ctor`.
                name: row.clean_name().to_string(),
                access: member.access,
                declaring_type: declaring,
                token: member.token,
                is_static: member.is_static,
                parameters: self.parameters(&member.parameters, docs),
                attributes: self.attributes(&member.attributes),
                docs: documentation(docs),
            }),
            MemberKind::Event => MemberDeclaration::Event(EventDeclaration {
                name: member.name.clone(),
                access: member.access,
                declaring_type: declaring,
                token: member.token,
                handler_type: self.member_type(member),
                modifiers,
                attributes: self.attributes(&member.attributes),
                docs: documentation(docs),
            }),
            MemberKind::Property => MemberDeclaration::Property(PropertyDeclaration {
                name: member.name.clone(),
                access: member.access,
                declaring_type: declaring,
                token: member.token,
                ty: self.member_type(member),
                modifiers,
                parameters: self.parameters(&member.parameters, docs),
                getter: member.getter.as_ref().map(|accessor| self.accessor(accessor)),
                setter: member.setter.as_ref().map(|accessor| self.accessor(accessor)),
                attributes: self.attributes(&member.attributes),
                docs: documentation(docs),
            }),
            MemberKind::Method => MemberDeclaration::Method(MethodDeclaration {
                name: member.name.clone(),
                access: member.access,
                declaring_type: declaring,
                token: member.token,
                modifiers,
                generic_parameters: self.generic_parameters(&member.generic_parameters, docs),
                parameters: self.parameters(&member.parameters, docs),
                return_type: self.return_type(member.return_type.as_ref()),
                attributes: self.attributes(&member.attributes),
                docs: documentation(docs),
            }),
        }
    }

    fn scope_of(&self, row: &TypeMetadata) -> DeclarationScope {
        match row.declaring_type.and_then(|token| self.type_ids.get(&token)) {
            Some(id) => DeclarationScope::Nested(*id),
            None => DeclarationScope::Namespace(self.namespace_ids[row.namespace.as_str()]),
        }
    }

    fn nested_buckets(&self, row: &TypeMetadata) -> TypeBuckets {
        let mut buckets = TypeBuckets::default();
        if let Some(children) = self.children.get(&row.token) {
            for child in children {
                push_type(&mut buckets, child.kind, self.type_ids[&child.token]);
            }
        }
        buckets
    }

    fn member_docs(&self, id: &str) -> Option<&'a MemberDocs> {
        self.docs.and_then(|docs| docs.get(id))
    }

    fn attributes(&self, rows: &[AttributeMetadata]) -> Vec<AttributeData> {
        rows.iter()
            .map(|row| AttributeData {
                ty: self.plain_type(&row.ty),
                positional: row
                    .positional
                    .iter()
                    .map(|argument| AttributeArgumentData {
                        value: argument.value.map_type(&|ty| self.reference(ty)),
                        ty: self.reference(&argument.ty),
                    })
                    .collect(),
                named: row
                    .named
                    .iter()
                    .map(|argument| NamedAttributeArgumentData {
                        name: argument.name.clone(),
                        value: argument.value.map_type(&|ty| self.reference(ty)),
                        ty: self.reference(&argument.ty),
                    })
                    .collect(),
            })
            .collect()
    }

    fn parameters(&self, rows: &[ParameterMetadata], docs: Option<&MemberDocs>) -> Vec<ParameterData> {
        rows.iter()
            .map(|row| ParameterData {
                name: row.name.clone(),
                ty: self.reference(&row.ty),
                passing: row.passing,
                attributes: self.attributes(&row.attributes),
                default_value: row
                    .default_value
                    .as_ref()
                    .map(|value| value.map_type(&|ty| self.reference(ty))),
                description: docs
                    .and_then(|docs| docs.params.get(&row.name))
                    .cloned()
                    .unwrap_or_default(),
            })
            .collect()
    }

    fn generic_parameters(
        &self,
        rows: &[GenericParameterMetadata],
        docs: Option<&MemberDocs>,
    ) -> Vec<GenericParameterData> {
        rows.iter()
            .map(|row| GenericParameterData {
                name: row.name.clone(),
                position: row.position,
                variance: row.variance,
                has_reference_type_constraint: row.has_reference_type_constraint,
                has_value_type_constraint: row.has_value_type_constraint,
                has_default_constructor_constraint: row.has_default_constructor_constraint,
                type_constraints: self.references(&row.type_constraints),
                description: docs
                    .and_then(|docs| docs.type_params.get(&row.name))
                    .cloned()
                    .unwrap_or_default(),
            })
            .collect()
    }

    fn accessor(&self, accessor: &AccessorMetadata) -> AccessorData {
        AccessorData {
            access: accessor.access,
            attributes: self.attributes(&accessor.attributes),
        }
    }

    fn member_type(&self, member: &MemberMetadata) -> MemberReference {
        member.ty.as_ref().map_or_else(
            || MemberReference::Type(TypeReference::new("System", "Object")),
            |ty| self.reference(ty),
        )
    }

    fn return_type(&self, ty: Option<&TypeRef>) -> MemberReference {
        ty.map_or_else(
            || MemberReference::Type(TypeReference::void()),
            |ty| self.reference(ty),
        )
    }

    fn references(&self, types: &[TypeRef]) -> Vec<MemberReference> {
        types.iter().map(|ty| self.reference(ty)).collect()
    }

    /// Resolve a signature designator into the reference model
    fn reference(&self, ty: &TypeRef) -> MemberReference {
        match ty {
            TypeRef::Defined {
                token,
                generic_arguments,
            } => MemberReference::Type(self.defined_reference(*token, generic_arguments)),
            TypeRef::Named {
                name,
                namespace,
                declaring_path,
                generic_arguments,
                assembly,
            } => MemberReference::Type(self.named_reference(
                name,
                namespace,
                declaring_path,
                generic_arguments,
                assembly.as_ref(),
            )),
            TypeRef::Array { rank, item } => {
                MemberReference::Array(ArrayReference::new(*rank, self.reference(item)))
            }
            TypeRef::Pointer { referent } => {
                MemberReference::Pointer(PointerReference::new(self.reference(referent)))
            }
            TypeRef::ByRef { referent } => {
                MemberReference::ByRef(ByRefReference::new(self.reference(referent)))
            }
            TypeRef::TypeParam { name, .. } => MemberReference::GenericTypeParameter(
                GenericTypeParameterReference::new(name),
            ),
            TypeRef::MethodParam { name, .. } => MemberReference::GenericMethodParameter(
                GenericMethodParameterReference::new(name),
            ),
            TypeRef::Void => MemberReference::Type(TypeReference::void()),
            TypeRef::Dynamic => MemberReference::Type(TypeReference::dynamic()),
        }
    }

    /// Resolve a plain type designator, used where only a type makes sense
    fn plain_type(&self, ty: &TypeRef) -> TypeReference {
        match self.reference(ty) {
            MemberReference::Type(reference) => reference,
            // Composite shapes cannot appear here in well-formed snapshots.
            _ => TypeReference::new(String::new(), String::new()),
        }
    }

    /// Resolve a snapshot type by token, distributing generic arguments
    /// across the declaring chain
    ///
    /// Each level of the chain takes as many arguments as it declares
    /// itself. An empty argument list yields the open form with the type's
    /// own parameters as arguments. An unknown token degrades to a bare
    /// reference named after the token.
    fn defined_reference(&self, token: MetadataToken, arguments: &[TypeRef]) -> TypeReference {
        let Some(row) = self.index.get(token) else {
            return TypeReference::new(String::new(), token.to_string());
        };

        let mut chain = vec![row];
        let mut current = row;
        while let Some(declaring) = current.declaring_type.and_then(|t| self.index.get(t)) {
            // A repeated token means the declaring chain cycles; stop there.
            if chain.iter().any(|level| level.token == declaring.token) {
                break;
            }
            chain.push(declaring);
            current = declaring;
        }
        chain.reverse();
        let namespace = &current.namespace;

        let converted: Vec<MemberReference> =
            arguments.iter().map(|argument| self.reference(argument)).collect();
        let mut reference: Option<TypeReference> = None;
        let mut outer = 0usize;
        for level in chain {
            let visible = level.generic_parameters.len();
            let own: Vec<MemberReference> = if converted.is_empty() {
                level
                    .generic_parameters
                    .get(outer..)
                    .unwrap_or(&[])
                    .iter()
                    .map(|parameter| {
                        MemberReference::GenericTypeParameter(GenericTypeParameterReference::new(
                            &parameter.name,
                        ))
                    })
                    .collect()
            } else {
                converted.get(outer..visible).unwrap_or(&[]).to_vec()
            };
            let mut built = TypeReference::new(namespace, level.clean_name())
                .with_generic_arguments(own)
                .with_assembly(self.project.clone());
            if let Some(declaring) = reference {
                built.declaring_type = Some(Box::new(declaring));
            }
            reference = Some(built);
            outer = visible;
        }
        reference.unwrap_or_else(|| TypeReference::new(String::new(), token.to_string()))
    }

    /// Resolve a dependency type from its raw name path
    ///
    /// Raw segment names carry their own arity, so arguments are consumed
    /// per segment as the chain is rebuilt.
    fn named_reference(
        &self,
        name: &str,
        namespace: &str,
        declaring_path: &[String],
        arguments: &[TypeRef],
        assembly: Option<&AssemblyName>,
    ) -> TypeReference {
        let assembly = assembly.map(AssemblyReference::from);
        let converted: Vec<MemberReference> =
            arguments.iter().map(|argument| self.reference(argument)).collect();

        let mut reference: Option<TypeReference> = None;
        let mut consumed = 0usize;
        for raw in declaring_path.iter().map(String::as_str).chain([name]) {
            let (clean, arity) = split_raw(raw);
            let own = converted
                .get(consumed..consumed + arity)
                .unwrap_or(&[])
                .to_vec();
            consumed += arity;
            let mut built = TypeReference::new(namespace, clean).with_generic_arguments(own);
            built.assembly = assembly.clone();
            if let Some(declaring) = reference {
                built.declaring_type = Some(Box::new(declaring));
            }
            reference = Some(built);
        }
        reference.unwrap_or_else(|| TypeReference::new(namespace, name))
    }
}

fn admits_chain(filter: AccessFilter, index: &TypeIndex<'_>, ty: &TypeMetadata) -> bool {
    if !filter.admits(ty.access) {
        return false;
    }
    let mut seen = vec![ty.token];
    let mut current = ty;
    while let Some(token) = current.declaring_type {
        // A cyclic chain never reaches a namespace and is dropped whole.
        if seen.contains(&token) {
            return false;
        }
        seen.push(token);
        match index.get(token) {
            Some(declaring) if filter.admits(declaring.access) => current = declaring,
            _ => return false,
        }
    }
    true
}

fn push_type(buckets: &mut TypeBuckets, kind: TypeKind, id: TypeId) {
    match kind {
        TypeKind::Enum => buckets.enums.push(id),
        TypeKind::Delegate => buckets.delegates.push(id),
        TypeKind::Interface => buckets.interfaces.push(id),
        TypeKind::Record => buckets.records.push(id),
        TypeKind::Class => buckets.classes.push(id),
        TypeKind::Struct => buckets.structs.push(id),
    }
}

fn documentation(docs: Option<&MemberDocs>) -> Documentation {
    docs.map(|docs| docs.docs.clone()).unwrap_or_default()
}

fn split_raw(raw: &str) -> (&str, usize) {
    match raw.split_once('`') {
        Some((clean, digits)) => (clean, digits.parse().unwrap_or(0)),
        None => (raw, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{AccessModifier, Version};

    fn token(value: u32) -> MetadataToken {
        MetadataToken(value)
    }

    fn sample_assembly() -> AssemblyMetadata {
        let mut assembly = AssemblyMetadata::new(AssemblyName::new(
            "CodeMap.Tests.Data",
            Version::new(1, 2, 3, 4),
        ));
        assembly
            .dependencies
            .push(AssemblyName::new("System.Runtime", Version::new(4, 2, 2, 0)));

        // public class TestClass<T> { ... } with a nested class
        let mut test_class = TypeMetadata::new(
            token(0x0200_0001),
            TypeKind::Class,
            "CodeMap.Tests",
            "TestClass`1",
            AccessModifier::Public,
        );
        test_class
            .generic_parameters
            .push(GenericParameterMetadata::new("T", 0));
        test_class.base_type = Some(TypeRef::named("System", "Object"));

        let mut constant = MemberMetadata::new(
            token(0x0400_0001),
            "Limit",
            MemberKind::Constant,
            AccessModifier::Public,
        );
        constant.ty = Some(TypeRef::named("System", "Int32"));
        constant.value = Some(ConstantValue::Integer(10));
        test_class.members.push(constant);

        let mut hidden_field = MemberMetadata::new(
            token(0x0400_0002),
            "state",
            MemberKind::Field,
            AccessModifier::Private,
        );
        hidden_field.ty = Some(TypeRef::named("System", "Int32"));
        test_class.members.push(hidden_field);

        let mut constructor = MemberMetadata::new(
            token(0x0600_0001),
            ".ctor",
            MemberKind::Constructor,
            AccessModifier::Public,
        );
        constructor.parameters.push(ParameterMetadata::new(
            "seed",
            TypeRef::named("System", "Int32"),
        ));
        test_class.members.push(constructor);

        let mut method = MemberMetadata::new(
            token(0x0600_0002),
            "Run",
            MemberKind::Method,
            AccessModifier::Public,
        );
        method.parameters.push(ParameterMetadata::new(
            "count",
            TypeRef::named("System", "Int32"),
        ));
        method.return_type = Some(TypeRef::Void);
        test_class.members.push(method);

        // public class Nested<TInner> inside TestClass<T>: the row carries
        // both visible parameters.
        let mut nested = TypeMetadata::new(
            token(0x0200_0002),
            TypeKind::Class,
            "CodeMap.Tests",
            "Nested`1",
            AccessModifier::Public,
        );
        nested.declaring_type = Some(token(0x0200_0001));
        nested
            .generic_parameters
            .push(GenericParameterMetadata::new("T", 0));
        nested
            .generic_parameters
            .push(GenericParameterMetadata::new("TInner", 1));

        let hidden = TypeMetadata::new(
            token(0x0200_0003),
            TypeKind::Class,
            "CodeMap.Tests",
            "Hidden",
            AccessModifier::Assembly,
        );

        let mut day = TypeMetadata::new(
            token(0x0200_0004),
            TypeKind::Enum,
            "Alpha",
            "Day",
            AccessModifier::Public,
        );
        day.underlying_type = Some(TypeRef::named("System", "Int32"));
        let mut monday = MemberMetadata::new(
            token(0x0400_0003),
            "Monday",
            MemberKind::Constant,
            AccessModifier::Public,
        );
        monday.ty = Some(TypeRef::defined(token(0x0200_0004)));
        monday.value = Some(ConstantValue::Integer(0));
        day.members.push(monday);

        let global = TypeMetadata::new(
            token(0x0200_0005),
            TypeKind::Struct,
            "",
            "Loose",
            AccessModifier::Public,
        );

        assembly.types = vec![test_class, nested, hidden, day, global];
        assembly
    }

    fn sample_docs() -> XmlDocs {
        let xml = r#"
            <doc>
              <members>
                <member name="T:CodeMap.Tests.TestClass`1">
                  <summary>A test class.</summary>
                  <typeparam name="T">Element type.</typeparam>
                </member>
                <member name="M:CodeMap.Tests.TestClass`1.Run(System.Int32)">
                  <summary>Runs the class.</summary>
                  <param name="count">How many times.</param>
                </member>
              </members>
            </doc>"#;
        XmlDocs::parse(xml).expect("sample docs parse")
    }

    #[test]
    fn test_public_filter_excludes_internal_types() {
        let assembly = sample_assembly();
        let tree = DeclarationTreeBuilder::new(AccessFilter::Public).build(&assembly);

        assert_eq!(tree.types().count(), 4);
        assert!(tree
            .types()
            .all(|(_, declaration)| declaration.name() != "Hidden"));

        let all = DeclarationTreeBuilder::new(AccessFilter::All).build(&assembly);
        assert_eq!(all.types().count(), 5);
    }

    #[test]
    fn test_namespaces_sorted_global_first() {
        let assembly = sample_assembly();
        let tree = DeclarationTreeBuilder::new(AccessFilter::Public).build(&assembly);

        let names: Vec<&str> = tree
            .namespaces()
            .map(|(_, namespace)| namespace.name.as_str())
            .collect();
        assert_eq!(names, vec!["", "Alpha", "CodeMap.Tests"]);
        assert!(tree.namespace(NamespaceId::new(0)).is_global());
        assert_eq!(tree.assembly().namespaces.len(), 3);
    }

    #[test]
    fn test_member_partition_and_filtering() {
        let assembly = sample_assembly();
        let tree = DeclarationTreeBuilder::new(AccessFilter::Public).build(&assembly);

        let (id, declaration) = tree
            .types()
            .find(|(_, declaration)| declaration.name() == "TestClass")
            .expect("TestClass admitted");
        let TypeDeclaration::Class(class) = declaration else {
            panic!("expected a class");
        };
        assert_eq!(class.members.constants.len(), 1);
        assert_eq!(class.members.fields.len(), 0);
        assert_eq!(class.members.constructors.len(), 1);
        assert_eq!(class.members.methods.len(), 1);
        assert_eq!(class.nested_types.classes.len(), 1);

        // The private field is absent from the arena entirely.
        assert!(tree
            .members()
            .all(|(_, member)| member.name() != "state"));

        let constructor = tree.member(class.members.constructors[0]);
        assert_eq!(constructor.name(), "TestClass");
        assert_eq!(constructor.declaring_type(), id);
    }

    #[test]
    fn test_nested_scope_and_own_generic_parameters() {
        let assembly = sample_assembly();
        let tree = DeclarationTreeBuilder::new(AccessFilter::Public).build(&assembly);

        let (outer_id, _) = tree
            .types()
            .find(|(_, declaration)| declaration.name() == "TestClass")
            .expect("outer admitted");
        let (nested_id, nested) = tree
            .types()
            .find(|(_, declaration)| declaration.name() == "Nested")
            .expect("nested admitted");

        assert_eq!(nested.scope(), DeclarationScope::Nested(outer_id));
        assert_eq!(tree.namespace_of(nested_id), tree.namespace_of(outer_id));
        assert_eq!(nested.generic_parameters().len(), 2);

        let own = tree.own_generic_parameters(nested_id);
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].name, "TInner");

        let reference = tree.type_reference(nested_id);
        assert_eq!(reference.name, "Nested");
        assert_eq!(reference.generic_arguments.len(), 1);
        let declaring = reference.declaring_type.as_deref().expect("declaring chain");
        assert_eq!(declaring.name, "TestClass");
        assert_eq!(declaring.generic_arguments.len(), 1);
    }

    fn cyclic_pair() -> (TypeMetadata, TypeMetadata) {
        let mut first = TypeMetadata::new(
            token(0x0200_0001),
            TypeKind::Class,
            "CodeMap.Tests",
            "First",
            AccessModifier::Public,
        );
        first.declaring_type = Some(token(0x0200_0002));
        let mut second = TypeMetadata::new(
            token(0x0200_0002),
            TypeKind::Class,
            "CodeMap.Tests",
            "Second",
            AccessModifier::Public,
        );
        second.declaring_type = Some(token(0x0200_0001));
        (first, second)
    }

    #[test]
    fn test_cyclic_declaring_chain_is_dropped() {
        let mut assembly = AssemblyMetadata::new(AssemblyName::new(
            "CodeMap.Tests.Data",
            Version::new(1, 0, 0, 0),
        ));
        let (first, second) = cyclic_pair();
        assembly.types = vec![first, second];

        let tree = DeclarationTreeBuilder::new(AccessFilter::Public).build(&assembly);

        // Neither row can reach a namespace, so nothing is declared.
        assert_eq!(tree.types().count(), 0);
        assert_eq!(tree.members().count(), 0);
        assert_eq!(tree.namespaces().count(), 0);
    }

    #[test]
    fn test_reference_into_declaring_cycle_terminates() {
        let mut assembly = AssemblyMetadata::new(AssemblyName::new(
            "CodeMap.Tests.Data",
            Version::new(1, 0, 0, 0),
        ));
        let (first, second) = cyclic_pair();
        let mut holder = TypeMetadata::new(
            token(0x0200_0003),
            TypeKind::Class,
            "CodeMap.Tests",
            "Holder",
            AccessModifier::Public,
        );
        let mut field = MemberMetadata::new(
            token(0x0400_0001),
            "Broken",
            MemberKind::Field,
            AccessModifier::Public,
        );
        field.ty = Some(TypeRef::defined(token(0x0200_0001)));
        holder.members.push(field);
        assembly.types = vec![first, second, holder];

        let tree = DeclarationTreeBuilder::new(AccessFilter::Public).build(&assembly);
        assert_eq!(tree.types().count(), 1);

        let (_, member) = tree.members().next().expect("field admitted");
        let MemberDeclaration::Field(field) = member else {
            panic!("expected a field");
        };
        // The chain is walked once and cut where it would repeat.
        let MemberReference::Type(reference) = &field.ty else {
            panic!("expected a type reference");
        };
        assert_eq!(reference.name, "First");
        let declaring = reference.declaring_type.as_deref().expect("declaring level");
        assert_eq!(declaring.name, "Second");
        assert!(declaring.declaring_type.is_none());
    }

    #[test]
    fn test_documentation_attachment() {
        let assembly = sample_assembly();
        let docs = sample_docs();
        let tree = DeclarationTreeBuilder::new(AccessFilter::Public)
            .with_documentation(&docs)
            .build(&assembly);

        let (_, declaration) = tree
            .types()
            .find(|(_, declaration)| declaration.name() == "TestClass")
            .expect("TestClass admitted");
        assert_eq!(
            declaration.docs().first_summary_sentence().as_deref(),
            Some("A test class.")
        );
        assert!(!declaration.generic_parameters()[0].description.is_empty());

        let (_, run) = tree
            .members()
            .find(|(_, member)| member.name() == "Run")
            .expect("Run admitted");
        let MemberDeclaration::Method(method) = run else {
            panic!("expected a method");
        };
        assert_eq!(
            method.docs.first_summary_sentence().as_deref(),
            Some("Runs the class.")
        );
        assert!(!method.parameters[0].description.is_empty());
    }

    #[test]
    fn test_enum_members_and_defined_references() {
        let assembly = sample_assembly();
        let tree = DeclarationTreeBuilder::new(AccessFilter::Public).build(&assembly);

        let (_, declaration) = tree
            .types()
            .find(|(_, declaration)| declaration.name() == "Day")
            .expect("Day admitted");
        let TypeDeclaration::Enum(day) = declaration else {
            panic!("expected an enum");
        };
        assert_eq!(day.members.len(), 1);

        let monday = tree.member(day.members[0]);
        let MemberDeclaration::Constant(constant) = monday else {
            panic!("expected a constant");
        };
        assert_eq!(constant.value, ConstantValue::Integer(0));
        // The constant's type resolves through the token back to Day itself.
        match &constant.ty {
            MemberReference::Type(reference) => {
                assert_eq!(reference.name, "Day");
                assert_eq!(
                    reference.assembly.as_ref().map(|a| a.name.as_str()),
                    Some("CodeMap.Tests.Data")
                );
            }
            other => panic!("expected a type reference, got {other:?}"),
        }
    }

    #[test]
    fn test_assembly_identity_and_dependencies() {
        let assembly = sample_assembly();
        let tree = DeclarationTreeBuilder::new(AccessFilter::Public).build(&assembly);

        assert_eq!(tree.assembly().name, "CodeMap.Tests.Data");
        assert_eq!(tree.assembly().version, Version::new(1, 2, 3, 4));
        assert!(*tree.assembly() == assembly.name);
        assert!(*tree.assembly() == assembly);
        assert_eq!(tree.assembly().dependencies.len(), 1);
        assert_eq!(tree.assembly().dependencies[0].name, "System.Runtime");
    }

    #[test]
    fn test_declaration_rows_compare_equal() {
        let assembly = sample_assembly();
        let tree = DeclarationTreeBuilder::new(AccessFilter::Public).build(&assembly);

        let (_, declaration) = tree
            .types()
            .find(|(_, declaration)| declaration.name() == "TestClass")
            .expect("TestClass admitted");
        assert!(*declaration == assembly.types[0]);

        let (_, run) = tree
            .members()
            .find(|(_, member)| member.name() == "Run")
            .expect("Run admitted");
        assert!(*run == assembly.types[0].members[3]);
    }

    #[test]
    fn test_named_reference_with_generic_arguments() {
        let mut assembly = sample_assembly();
        let mut list_field = MemberMetadata::new(
            token(0x0400_0010),
            "Items",
            MemberKind::Field,
            AccessModifier::Public,
        );
        list_field.ty = Some(TypeRef::Named {
            name: "List`1".to_string(),
            namespace: "System.Collections.Generic".to_string(),
            declaring_path: Vec::new(),
            generic_arguments: vec![TypeRef::named("System", "Int32")],
            assembly: Some(AssemblyName::new(
                "System.Runtime",
                Version::new(4, 2, 2, 0),
            )),
        });
        assembly.types[0].members.push(list_field);

        let tree = DeclarationTreeBuilder::new(AccessFilter::Public).build(&assembly);
        let (_, items) = tree
            .members()
            .find(|(_, member)| member.name() == "Items")
            .expect("Items admitted");
        let MemberDeclaration::Field(field) = items else {
            panic!("expected a field");
        };
        match &field.ty {
            MemberReference::Type(reference) => {
                assert_eq!(reference.name, "List");
                assert_eq!(reference.namespace, "System.Collections.Generic");
                assert_eq!(reference.generic_arguments.len(), 1);
                assert_eq!(
                    reference.assembly.as_ref().map(|a| a.name.as_str()),
                    Some("System.Runtime")
                );
            }
            other => panic!("expected a type reference, got {other:?}"),
        }
    }
}
