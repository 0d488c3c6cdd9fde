//! Link resolution for member references
//!
//! [`MemberLinkResolver`] turns member references into documentation page
//! addresses. Types from project assemblies resolve to relative `.html`
//! pages and their members to `#fragment` anchors on the type page; other
//! types resolve to the Microsoft Docs URL pattern. Generic parameters and
//! assemblies have no page and resolve to no link.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::references::{
    ArrayReference, AssemblyReference, ByRefReference, ConstantReference, ConstructorReference,
    EventReference, FieldReference, GenericMethodParameterReference,
    GenericTypeParameterReference, MemberReference, MemberReferenceVisitor, MethodReference,
    PointerReference, PropertyReference, SpecialType, TypeReference,
};

/// Characters escaped in link paths and query values
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`');

/// Configuration for link resolution
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// Framework tag appended to external reference URLs
    pub framework_tag: String,
    /// Assemblies whose types link to project-relative pages
    pub project_assemblies: Vec<String>,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            framework_tag: "netstandard-2.1".to_string(),
            project_assemblies: Vec::new(),
        }
    }
}

/// Resolves member references to documentation page addresses
///
/// The resolver resets its state on every [`resolve`](Self::resolve) call,
/// so one instance can resolve any number of references in sequence.
#[derive(Debug, Default)]
pub struct MemberLinkResolver {
    config: LinkConfig,
    link: Option<String>,
}

impl MemberLinkResolver {
    /// Create a resolver with the given configuration
    #[must_use]
    pub fn new(config: LinkConfig) -> Self {
        Self { config, link: None }
    }

    /// Resolve a reference to a link target, if it has one
    pub fn resolve(&mut self, reference: &MemberReference) -> Option<String> {
        self.link = None;
        reference.accept(self);
        self.link.take()
    }

    fn is_project(&self, reference: &TypeReference) -> bool {
        reference.assembly.as_ref().is_some_and(|assembly| {
            self.config
                .project_assemblies
                .iter()
                .any(|name| name == &assembly.name)
        })
    }

    fn type_link(&self, reference: &TypeReference) -> String {
        let path = type_path(reference);
        if self.is_project(reference) {
            format!("{}.html", utf8_percent_encode(&path, SEGMENT))
        } else {
            self.external_url(&path)
        }
    }

    fn member_link(&self, declaring: &TypeReference, name: &str, arity: usize) -> String {
        if self.is_project(declaring) {
            let path = type_path(declaring);
            format!(
                "{}.html#{}",
                utf8_percent_encode(&path, SEGMENT),
                make_anchor(name)
            )
        } else {
            let mut path = type_path(declaring);
            path.push('.');
            path.push_str(name);
            if arity > 0 {
                path.push_str(&format!("-{arity}"));
            }
            self.external_url(&path)
        }
    }

    fn external_url(&self, path: &str) -> String {
        let path = path.to_lowercase();
        format!(
            "https://docs.microsoft.com/dotnet/api/{}?view={}",
            utf8_percent_encode(&path, SEGMENT),
            utf8_percent_encode(&self.config.framework_tag, SEGMENT),
        )
    }
}

impl MemberReferenceVisitor for MemberLinkResolver {
    fn visit_type(&mut self, reference: &TypeReference) {
        self.link = match reference.special {
            // void is a real page on the external site
            Some(SpecialType::Void) => Some(self.external_url(&type_path(reference))),
            Some(SpecialType::Dynamic) => None,
            None => Some(self.type_link(reference)),
        };
    }

    fn visit_array(&mut self, reference: &ArrayReference) {
        reference.item.accept(self);
    }

    fn visit_pointer(&mut self, reference: &PointerReference) {
        reference.referent.accept(self);
    }

    fn visit_by_ref(&mut self, reference: &ByRefReference) {
        reference.referent.accept(self);
    }

    fn visit_generic_type_parameter(&mut self, _reference: &GenericTypeParameterReference) {
        self.link = None;
    }

    fn visit_generic_method_parameter(&mut self, _reference: &GenericMethodParameterReference) {
        self.link = None;
    }

    fn visit_constant(&mut self, reference: &ConstantReference) {
        self.link = Some(self.member_link(&reference.declaring_type, &reference.name, 0));
    }

    fn visit_field(&mut self, reference: &FieldReference) {
        self.link = Some(self.member_link(&reference.declaring_type, &reference.name, 0));
    }

    fn visit_constructor(&mut self, reference: &ConstructorReference) {
        self.link = Some(self.member_link(&reference.declaring_type, "-ctor", 0));
    }

    fn visit_event(&mut self, reference: &EventReference) {
        self.link = Some(self.member_link(&reference.declaring_type, &reference.name, 0));
    }

    fn visit_property(&mut self, reference: &PropertyReference) {
        self.link = Some(self.member_link(&reference.declaring_type, &reference.name, 0));
    }

    fn visit_method(&mut self, reference: &MethodReference) {
        self.link = Some(self.member_link(
            &reference.declaring_type,
            &reference.name,
            reference.generic_arguments.len(),
        ));
    }

    fn visit_assembly(&mut self, _reference: &AssemblyReference) {
        self.link = None;
    }
}

/// Dotted path of a type with `-N` arity suffixes on generic levels
fn type_path(reference: &TypeReference) -> String {
    let mut segments = Vec::new();
    let mut current = reference;
    loop {
        let mut segment = current.name.clone();
        let arity = current.generic_arguments.len();
        if arity > 0 {
            segment.push_str(&format!("-{arity}"));
        }
        segments.push(segment);
        match current.declaring_type.as_deref() {
            Some(declaring) => current = declaring,
            None => break,
        }
    }
    if !current.namespace.is_empty() {
        segments.push(current.namespace.clone());
    }
    segments.reverse();
    segments.join(".")
}

/// Create an anchor ID from a member name
fn make_anchor(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect()
}
