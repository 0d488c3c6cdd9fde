//! Name rendering visitors
//!
//! Two [`DeclarationVisitor`] implementations turn declarations into
//! strings: [`FullNameVisitor`] renders the dotted qualified name with
//! reflection-style arity backticks, [`SimpleNameVisitor`] renders the
//! display form with generic parameters and signature annotations. Both
//! are single-use; [`DeclarationTree::full_name`] and
//! [`DeclarationTree::simple_name`] wrap one dispatch each.

use crate::references::{MemberReference, TypeReference};

use super::nodes::{
    AssemblyDeclaration, ClassDeclaration, ConstantDeclaration, ConstructorDeclaration,
    DelegateDeclaration, EnumDeclaration, EventDeclaration, FieldDeclaration, GenericParameterData,
    InterfaceDeclaration, MethodDeclaration, NamespaceDeclaration, ParameterData,
    PropertyDeclaration, RecordDeclaration, StructDeclaration,
};
use super::visitor::DeclarationVisitor;
use super::{DeclarationId, DeclarationScope, DeclarationTree, MemberId, NamespaceId, TypeId};

impl DeclarationTree {
    /// Fully-qualified dotted name of any declaration
    #[must_use]
    pub fn full_name(&self, id: DeclarationId) -> String {
        let mut visitor = FullNameVisitor::new();
        self.accept(id, &mut visitor);
        visitor.into_name()
    }

    /// Display name with generic parameters and signature annotations
    #[must_use]
    pub fn simple_name(&self, id: DeclarationId) -> String {
        let mut visitor = SimpleNameVisitor::new();
        self.accept(id, &mut visitor);
        visitor.into_name()
    }
}

/// Renders dotted qualified names
///
/// Types keep their arity backticks (`TestClass`1.Nested`1`), members
/// append their display name to the declaring type's qualified name, and
/// the global namespace renders as the empty string.
#[derive(Debug, Default)]
pub struct FullNameVisitor {
    name: String,
}

impl FullNameVisitor {
    /// Create a visitor with an empty result
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The rendered name of the last accepted declaration
    #[must_use]
    pub fn into_name(self) -> String {
        self.name
    }
}

impl DeclarationVisitor for FullNameVisitor {
    fn visit_assembly(&mut self, _tree: &DeclarationTree, declaration: &AssemblyDeclaration) {
        self.name = declaration.name.clone();
    }

    fn visit_namespace(
        &mut self,
        _tree: &DeclarationTree,
        _id: NamespaceId,
        declaration: &NamespaceDeclaration,
    ) {
        self.name = declaration.name.clone();
    }

    fn visit_enum(&mut self, tree: &DeclarationTree, id: TypeId, _declaration: &EnumDeclaration) {
        self.name = qualified_type(tree, id);
    }

    fn visit_delegate(
        &mut self,
        tree: &DeclarationTree,
        id: TypeId,
        _declaration: &DelegateDeclaration,
    ) {
        self.name = qualified_type(tree, id);
    }

    fn visit_interface(
        &mut self,
        tree: &DeclarationTree,
        id: TypeId,
        _declaration: &InterfaceDeclaration,
    ) {
        self.name = qualified_type(tree, id);
    }

    fn visit_class(&mut self, tree: &DeclarationTree, id: TypeId, _declaration: &ClassDeclaration) {
        self.name = qualified_type(tree, id);
    }

    fn visit_struct(
        &mut self,
        tree: &DeclarationTree,
        id: TypeId,
        _declaration: &StructDeclaration,
    ) {
        self.name = qualified_type(tree, id);
    }

    fn visit_record(
        &mut self,
        tree: &DeclarationTree,
        id: TypeId,
        _declaration: &RecordDeclaration,
    ) {
        self.name = qualified_type(tree, id);
    }

    fn visit_constant(
        &mut self,
        tree: &DeclarationTree,
        _id: MemberId,
        declaration: &ConstantDeclaration,
    ) {
        self.name = member_path(tree, declaration.declaring_type, &declaration.name);
    }

    fn visit_field(
        &mut self,
        tree: &DeclarationTree,
        _id: MemberId,
        declaration: &FieldDeclaration,
    ) {
        self.name = member_path(tree, declaration.declaring_type, &declaration.name);
    }

    fn visit_constructor(
        &mut self,
        tree: &DeclarationTree,
        _id: MemberId,
        declaration: &ConstructorDeclaration,
    ) {
        self.name = member_path(tree, declaration.declaring_type, &declaration.name);
    }

    fn visit_event(
        &mut self,
        tree: &DeclarationTree,
        _id: MemberId,
        declaration: &EventDeclaration,
    ) {
        self.name = member_path(tree, declaration.declaring_type, &declaration.name);
    }

    fn visit_property(
        &mut self,
        tree: &DeclarationTree,
        _id: MemberId,
        declaration: &PropertyDeclaration,
    ) {
        self.name = member_path(tree, declaration.declaring_type, &declaration.name);
    }

    fn visit_method(
        &mut self,
        tree: &DeclarationTree,
        _id: MemberId,
        declaration: &MethodDeclaration,
    ) {
        self.name = member_path(tree, declaration.declaring_type, &declaration.name);
    }
}

/// Renders display names
///
/// Generic parameters appear in angle brackets, methods and constructors
/// carry their parameter type list, and indexers render as `Item[...]`.
#[derive(Debug, Default)]
pub struct SimpleNameVisitor {
    name: String,
}

impl SimpleNameVisitor {
    /// Create a visitor with an empty result
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The rendered name of the last accepted declaration
    #[must_use]
    pub fn into_name(self) -> String {
        self.name
    }
}

impl DeclarationVisitor for SimpleNameVisitor {
    fn visit_assembly(&mut self, _tree: &DeclarationTree, declaration: &AssemblyDeclaration) {
        self.name = declaration.name.clone();
    }

    fn visit_namespace(
        &mut self,
        _tree: &DeclarationTree,
        _id: NamespaceId,
        declaration: &NamespaceDeclaration,
    ) {
        self.name = declaration.name.clone();
    }

    fn visit_enum(&mut self, _tree: &DeclarationTree, _id: TypeId, declaration: &EnumDeclaration) {
        self.name = declaration.name.clone();
    }

    fn visit_delegate(
        &mut self,
        tree: &DeclarationTree,
        id: TypeId,
        declaration: &DelegateDeclaration,
    ) {
        self.name = format!(
            "{}{}",
            declaration.name,
            generic_suffix(tree.own_generic_parameters(id))
        );
    }

    fn visit_interface(
        &mut self,
        tree: &DeclarationTree,
        id: TypeId,
        declaration: &InterfaceDeclaration,
    ) {
        self.name = format!(
            "{}{}",
            declaration.name,
            generic_suffix(tree.own_generic_parameters(id))
        );
    }

    fn visit_class(&mut self, tree: &DeclarationTree, id: TypeId, declaration: &ClassDeclaration) {
        self.name = format!(
            "{}{}",
            declaration.name,
            generic_suffix(tree.own_generic_parameters(id))
        );
    }

    fn visit_struct(
        &mut self,
        tree: &DeclarationTree,
        id: TypeId,
        declaration: &StructDeclaration,
    ) {
        self.name = format!(
            "{}{}",
            declaration.name,
            generic_suffix(tree.own_generic_parameters(id))
        );
    }

    fn visit_record(
        &mut self,
        tree: &DeclarationTree,
        id: TypeId,
        declaration: &RecordDeclaration,
    ) {
        self.name = format!(
            "{}{}",
            declaration.name,
            generic_suffix(tree.own_generic_parameters(id))
        );
    }

    fn visit_constant(
        &mut self,
        _tree: &DeclarationTree,
        _id: MemberId,
        declaration: &ConstantDeclaration,
    ) {
        self.name = declaration.name.clone();
    }

    fn visit_field(
        &mut self,
        _tree: &DeclarationTree,
        _id: MemberId,
        declaration: &FieldDeclaration,
    ) {
        self.name = declaration.name.clone();
    }

    fn visit_constructor(
        &mut self,
        _tree: &DeclarationTree,
        _id: MemberId,
        declaration: &ConstructorDeclaration,
    ) {
        self.name = format!(
            "{}({})",
            declaration.name,
            parameter_list(&declaration.parameters)
        );
    }

    fn visit_event(
        &mut self,
        _tree: &DeclarationTree,
        _id: MemberId,
        declaration: &EventDeclaration,
    ) {
        self.name = declaration.name.clone();
    }

    fn visit_property(
        &mut self,
        _tree: &DeclarationTree,
        _id: MemberId,
        declaration: &PropertyDeclaration,
    ) {
        self.name = if declaration.parameters.is_empty() {
            declaration.name.clone()
        } else {
            format!(
                "{}[{}]",
                declaration.name,
                parameter_list(&declaration.parameters)
            )
        };
    }

    fn visit_method(
        &mut self,
        _tree: &DeclarationTree,
        _id: MemberId,
        declaration: &MethodDeclaration,
    ) {
        self.name = format!(
            "{}{}({})",
            declaration.name,
            generic_suffix(&declaration.generic_parameters),
            parameter_list(&declaration.parameters)
        );
    }
}

fn qualified_type(tree: &DeclarationTree, id: TypeId) -> String {
    let mut segments = Vec::new();
    let mut current = id;
    loop {
        let declaration = tree.ty(current);
        let own = tree.own_generic_parameters(current).len();
        if own == 0 {
            segments.push(declaration.name().to_string());
        } else {
            segments.push(format!("{}`{own}", declaration.name()));
        }
        match declaration.scope() {
            DeclarationScope::Nested(declaring) => current = declaring,
            DeclarationScope::Namespace(namespace) => {
                let name = &tree.namespace(namespace).name;
                if !name.is_empty() {
                    segments.push(name.clone());
                }
                break;
            }
        }
    }
    segments.reverse();
    segments.join(".")
}

fn member_path(tree: &DeclarationTree, declaring: TypeId, name: &str) -> String {
    format!("{}.{name}", qualified_type(tree, declaring))
}

fn generic_suffix(parameters: &[GenericParameterData]) -> String {
    if parameters.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = parameters
        .iter()
        .map(|parameter| parameter.name.as_str())
        .collect();
    format!("<{}>", names.join(", "))
}

fn parameter_list(parameters: &[ParameterData]) -> String {
    let types: Vec<String> = parameters
        .iter()
        .map(|parameter| reference_display(&parameter.ty))
        .collect();
    types.join(", ")
}

fn type_display(reference: &TypeReference) -> String {
    if reference.generic_arguments.is_empty() {
        return reference.name.clone();
    }
    let arguments: Vec<String> = reference
        .generic_arguments
        .iter()
        .map(reference_display)
        .collect();
    format!("{}<{}>", reference.name, arguments.join(", "))
}

fn reference_display(reference: &MemberReference) -> String {
    match reference {
        MemberReference::Type(ty) => type_display(ty),
        // Rank specifiers read outermost first, as in source order.
        MemberReference::Array(array) => {
            let mut suffixes = String::new();
            let mut current = array;
            loop {
                let commas = ",".repeat(current.rank.saturating_sub(1) as usize);
                suffixes.push_str(&format!("[{commas}]"));
                match &*current.item {
                    MemberReference::Array(inner) => current = inner,
                    item => return format!("{}{suffixes}", reference_display(item)),
                }
            }
        }
        MemberReference::Pointer(pointer) => {
            format!("{}*", reference_display(&pointer.referent))
        }
        // By-reference passing shows through the parameter, not the type.
        MemberReference::ByRef(by_ref) => reference_display(&by_ref.referent),
        MemberReference::GenericTypeParameter(parameter) => parameter.name.clone(),
        MemberReference::GenericMethodParameter(parameter) => parameter.name.clone(),
        MemberReference::Constant(constant) => constant.name.clone(),
        MemberReference::Field(field) => field.name.clone(),
        MemberReference::Constructor(constructor) => constructor.declaring_type.name.clone(),
        MemberReference::Event(event) => event.name.clone(),
        MemberReference::Property(property) => property.name.clone(),
        MemberReference::Method(method) => method.name.clone(),
        MemberReference::Assembly(assembly) => assembly.name.clone(),
    }
}
