//! Visitor protocol over member references
//!
//! [`MemberReference::accept`] dispatches to exactly one handler per call and
//! never recurses on its own: a visitor that wants the referent of an array
//! or the declaring type of a field follows those values itself. Visitors
//! are stateful single-use objects, not safe for concurrent reuse.

use super::{
    ArrayReference, AssemblyReference, ByRefReference, ConstantReference, ConstructorReference,
    EventReference, FieldReference, GenericMethodParameterReference,
    GenericTypeParameterReference, MemberReference, MethodReference, PointerReference,
    PropertyReference, TypeReference,
};

/// Trait for consumers of member references.
///
/// Implement the `visit_*` methods for the reference kinds of interest; the
/// default implementations do nothing.
#[allow(unused_variables)]
pub trait MemberReferenceVisitor {
    /// Visit a specific type reference, including void and dynamic.
    fn visit_type(&mut self, reference: &TypeReference) {}

    /// Visit an array type reference.
    fn visit_array(&mut self, reference: &ArrayReference) {}

    /// Visit a pointer type reference.
    fn visit_pointer(&mut self, reference: &PointerReference) {}

    /// Visit a by-reference type reference.
    fn visit_by_ref(&mut self, reference: &ByRefReference) {}

    /// Visit a generic parameter declared by a type.
    fn visit_generic_type_parameter(&mut self, reference: &GenericTypeParameterReference) {}

    /// Visit a generic parameter declared by a method.
    fn visit_generic_method_parameter(&mut self, reference: &GenericMethodParameterReference) {}

    /// Visit a constant reference.
    fn visit_constant(&mut self, reference: &ConstantReference) {}

    /// Visit a field reference.
    fn visit_field(&mut self, reference: &FieldReference) {}

    /// Visit a constructor reference.
    fn visit_constructor(&mut self, reference: &ConstructorReference) {}

    /// Visit an event reference.
    fn visit_event(&mut self, reference: &EventReference) {}

    /// Visit a property reference.
    fn visit_property(&mut self, reference: &PropertyReference) {}

    /// Visit a method reference.
    fn visit_method(&mut self, reference: &MethodReference) {}

    /// Visit an assembly reference.
    fn visit_assembly(&mut self, reference: &AssemblyReference) {}
}

impl MemberReference {
    /// Dispatch this reference to the matching visitor handler.
    ///
    /// Invokes precisely one handler exactly once.
    pub fn accept<V: MemberReferenceVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            MemberReference::Type(reference) => visitor.visit_type(reference),
            MemberReference::Array(reference) => visitor.visit_array(reference),
            MemberReference::Pointer(reference) => visitor.visit_pointer(reference),
            MemberReference::ByRef(reference) => visitor.visit_by_ref(reference),
            MemberReference::GenericTypeParameter(reference) => {
                visitor.visit_generic_type_parameter(reference);
            }
            MemberReference::GenericMethodParameter(reference) => {
                visitor.visit_generic_method_parameter(reference);
            }
            MemberReference::Constant(reference) => visitor.visit_constant(reference),
            MemberReference::Field(reference) => visitor.visit_field(reference),
            MemberReference::Constructor(reference) => visitor.visit_constructor(reference),
            MemberReference::Event(reference) => visitor.visit_event(reference),
            MemberReference::Property(reference) => visitor.visit_property(reference),
            MemberReference::Method(reference) => visitor.visit_method(reference),
            MemberReference::Assembly(reference) => visitor.visit_assembly(reference),
        }
    }
}
