//! Documentation id composition and cref parsing
//!
//! Doc ids follow the compiler's XML documentation conventions: a one-letter
//! prefix (`T:`, `F:`, `M:`, `P:`, `E:`, `N:`), the dotted raw path of the
//! declaring chain, `#ctor` for constructors, single-backtick markers for
//! type generic parameters and double-backtick markers for method generic
//! parameters, and parameter signatures with `{...}` instantiations, `[]`
//! array suffixes, `@` for by-reference and `*` for pointers.

use std::fmt::Write as _;

use crate::metadata::{MemberKind, MemberMetadata, TypeIndex, TypeMetadata, TypeRef};
use crate::references::{
    ArrayReference, ByRefReference, ConstructorReference, EventReference, FieldReference,
    GenericMethodParameterReference, GenericTypeParameterReference, MemberReference,
    MethodReference, PointerReference, PropertyReference, TypeReference,
};

/// Composes doc ids for the rows of one metadata snapshot
///
/// Ids for project types resolve their declaring chains through the snapshot
/// index, so nested types and generic arities come out exactly as the
/// compiler writes them into the documentation file.
#[derive(Debug)]
pub struct DocIdComposer<'a> {
    index: &'a TypeIndex<'a>,
}

impl<'a> DocIdComposer<'a> {
    /// Create a composer over a snapshot index
    #[must_use]
    pub fn new(index: &'a TypeIndex<'a>) -> Self {
        Self { index }
    }

    /// Doc id of a namespace
    #[must_use]
    pub fn namespace_id(namespace: &str) -> String {
        format!("N:{namespace}")
    }

    /// Doc id of a type row
    #[must_use]
    pub fn type_id(&self, ty: &TypeMetadata) -> String {
        format!("T:{}", self.index.raw_path(ty))
    }

    /// Doc id of a member row declared by `declaring`
    #[must_use]
    pub fn member_id(&self, declaring: &TypeMetadata, member: &MemberMetadata) -> String {
        let prefix = match member.kind {
            MemberKind::Constant | MemberKind::Field => 'F',
            MemberKind::Event => 'E',
            MemberKind::Property => 'P',
            MemberKind::Constructor | MemberKind::Method => 'M',
        };
        let mut id = format!("{prefix}:{}.", self.index.raw_path(declaring));
        if member.kind == MemberKind::Constructor {
            id.push_str(if member.is_static { "#cctor" } else { "#ctor" });
        } else {
            // explicit interface implementations carry dots in their names
            id.push_str(&member.name.replace('.', "#"));
        }
        if !member.generic_parameters.is_empty() {
            let _ = write!(id, "``{}", member.generic_parameters.len());
        }
        if !member.parameters.is_empty() {
            id.push('(');
            for (index, parameter) in member.parameters.iter().enumerate() {
                if index > 0 {
                    id.push(',');
                }
                id.push_str(&self.signature(&parameter.ty));
            }
            id.push(')');
        }
        if matches!(member.name.as_str(), "op_Implicit" | "op_Explicit") {
            if let Some(return_type) = &member.return_type {
                id.push('~');
                id.push_str(&self.signature(return_type));
            }
        }
        id
    }

    /// Parameter-position signature of a type designator
    fn signature(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Void => "System.Void".to_string(),
            TypeRef::Dynamic => "System.Object".to_string(),
            TypeRef::TypeParam { position, .. } => format!("`{position}"),
            TypeRef::MethodParam { position, .. } => format!("``{position}"),
            TypeRef::Pointer { referent } => format!("{}*", self.signature(referent)),
            TypeRef::ByRef { referent } => format!("{}@", self.signature(referent)),
            TypeRef::Array { .. } => {
                // suffixes read outermost first, matching source order
                let mut suffixes = String::new();
                let mut current = ty;
                while let TypeRef::Array { rank, item } = current {
                    suffixes.push_str(&array_suffix(*rank));
                    current = item;
                }
                format!("{}{suffixes}", self.signature(current))
            }
            TypeRef::Named {
                name,
                namespace,
                declaring_path,
                generic_arguments,
                ..
            } => {
                let mut segments: Vec<&str> =
                    declaring_path.iter().map(String::as_str).collect();
                segments.push(name);
                self.instantiate(namespace, &segments, generic_arguments)
            }
            TypeRef::Defined {
                token,
                generic_arguments,
            } => match self.index.get(*token) {
                Some(row) => {
                    let (namespace, segments) = self.defined_segments(row);
                    let segments: Vec<&str> =
                        segments.iter().map(String::as_str).collect();
                    self.instantiate(&namespace, &segments, generic_arguments)
                }
                None => token.to_string(),
            },
        }
    }

    /// Dotted path with per-segment `{...}` instantiations
    ///
    /// Each segment's backtick arity consumes that many arguments in order.
    /// Open types (no arguments at all) keep their raw backtick names.
    fn instantiate(&self, namespace: &str, segments: &[&str], arguments: &[TypeRef]) -> String {
        let mut out = String::new();
        if !namespace.is_empty() {
            out.push_str(namespace);
        }
        let mut next = 0;
        for raw in segments {
            if !out.is_empty() {
                out.push('.');
            }
            if arguments.is_empty() {
                out.push_str(raw);
                continue;
            }
            let (clean, arity) = split_arity(raw);
            out.push_str(clean);
            if arity > 0 {
                let end = (next + arity).min(arguments.len());
                out.push('{');
                for (index, argument) in arguments[next..end].iter().enumerate() {
                    if index > 0 {
                        out.push(',');
                    }
                    out.push_str(&self.signature(argument));
                }
                out.push('}');
                next = end;
            }
        }
        out
    }

    /// Namespace and raw segment names of a declared type, outermost first
    ///
    /// A declaring chain that cycles is cut at the first repeated token.
    fn defined_segments(&self, row: &TypeMetadata) -> (String, Vec<String>) {
        let mut segments = vec![row.name.clone()];
        let mut seen = vec![row.token];
        let mut current = row;
        while let Some(declaring) = current
            .declaring_type
            .and_then(|token| self.index.get(token))
        {
            if seen.contains(&declaring.token) {
                break;
            }
            seen.push(declaring.token);
            segments.push(declaring.name.clone());
            current = declaring;
        }
        segments.reverse();
        (current.namespace.clone(), segments)
    }
}

fn array_suffix(rank: u32) -> String {
    if rank <= 1 {
        "[]".to_string()
    } else {
        let dimensions = vec!["0:"; rank as usize];
        format!("[{}]", dimensions.join(","))
    }
}

fn split_arity(raw: &str) -> (&str, usize) {
    match raw.split_once('`') {
        Some((clean, digits)) => (clean, digits.parse().unwrap_or(0)),
        None => (raw, 0),
    }
}

/// Parse a cref attribute into a best-effort member reference
///
/// The parser never fails: unrecognized shapes degrade to a type reference
/// holding the literal text. Leading dotted segments are treated as the
/// namespace (a cref alone cannot distinguish nesting), generic arity
/// markers on method names are dropped, and `` `N ``/`` ``N `` parameter
/// markers keep their positional spelling as the parameter name.
#[must_use]
pub fn parse_cref(cref: &str) -> MemberReference {
    let Some((prefix, rest)) = cref.split_once(':') else {
        return MemberReference::Type(named_type(cref));
    };
    match prefix {
        "T" | "N" => MemberReference::Type(named_type(rest)),
        "F" => {
            let (declaring, name) = split_member(rest);
            MemberReference::Field(FieldReference {
                name,
                declaring_type: declaring,
            })
        }
        "E" => {
            let (declaring, name) = split_member(rest);
            MemberReference::Event(EventReference {
                name,
                declaring_type: declaring,
            })
        }
        "P" => {
            let (head, parameter_types) = split_signature(rest);
            let (declaring, name) = split_member(head);
            MemberReference::Property(PropertyReference {
                name,
                declaring_type: declaring,
                parameter_types,
            })
        }
        "M" => {
            let head = rest.split_once('~').map_or(rest, |(head, _)| head);
            let (head, parameter_types) = split_signature(head);
            let head = head.split_once("``").map_or(head, |(head, _)| head);
            let (declaring, name) = split_member(head);
            if name == "#ctor" || name == "#cctor" {
                MemberReference::Constructor(ConstructorReference {
                    declaring_type: declaring,
                    parameter_types,
                })
            } else {
                MemberReference::Method(MethodReference {
                    name: name.replace('#', "."),
                    declaring_type: declaring,
                    generic_arguments: Vec::new(),
                    parameter_types,
                })
            }
        }
        _ => MemberReference::Type(named_type(cref)),
    }
}

/// Split a member id into declaring type and member name
fn split_member(path: &str) -> (TypeReference, String) {
    match rsplit_top_level(path, '.') {
        Some((declaring, name)) => (named_type(declaring), name.to_string()),
        None => (TypeReference::new("", ""), path.to_string()),
    }
}

/// Split off a trailing parenthesized signature, parsing its entries
fn split_signature(text: &str) -> (&str, Vec<MemberReference>) {
    let Some(open) = find_top_level(text, '(') else {
        return (text, Vec::new());
    };
    let inner = text[open + 1..].strip_suffix(')').unwrap_or(&text[open + 1..]);
    let parameter_types = split_top_level(inner, ',')
        .into_iter()
        .map(signature_type)
        .collect();
    (&text[..open], parameter_types)
}

/// Parse one parameter-position signature
fn signature_type(text: &str) -> MemberReference {
    let text = text.trim();
    if let Some(inner) = text.strip_suffix('@') {
        return MemberReference::ByRef(ByRefReference::new(signature_type(inner)));
    }
    if let Some(inner) = text.strip_suffix('*') {
        return MemberReference::Pointer(PointerReference::new(signature_type(inner)));
    }
    if text.ends_with(']') {
        if let Some(open) = find_top_level(text, '[') {
            // suffixes read outermost first; rebuild from the innermost out
            let mut reference = signature_type(&text[..open]);
            for suffix in split_suffixes(&text[open..]).into_iter().rev() {
                let rank = u32::try_from(suffix.matches(',').count()).unwrap_or(0) + 1;
                reference = MemberReference::Array(ArrayReference::new(rank, reference));
            }
            return reference;
        }
    }
    if let Some(digits) = text.strip_prefix("``") {
        if digits.chars().all(|c| c.is_ascii_digit()) {
            return MemberReference::GenericMethodParameter(GenericMethodParameterReference::new(
                text,
            ));
        }
    }
    if let Some(digits) = text.strip_prefix('`') {
        if digits.chars().all(|c| c.is_ascii_digit()) {
            return MemberReference::GenericTypeParameter(GenericTypeParameterReference::new(text));
        }
    }
    MemberReference::Type(named_type(text))
}

/// Parse a dotted type path, handling `{...}` instantiations
fn named_type(text: &str) -> TypeReference {
    let Some(open) = find_top_level(text, '{') else {
        return dotted_type(text);
    };
    let Some(close) = matching_brace(text, open) else {
        return dotted_type(text);
    };
    let arguments = split_top_level(&text[open + 1..close], ',')
        .into_iter()
        .map(signature_type)
        .collect();
    let head = dotted_type(&text[..open]).with_generic_arguments(arguments);
    match text[close + 1..].strip_prefix('.') {
        // a nested type of an instantiated declaring type
        Some(tail) => {
            let mut inner = named_type(tail);
            inner.declaring_type = Some(Box::new(head));
            inner
        }
        None => head,
    }
}

fn dotted_type(path: &str) -> TypeReference {
    let (namespace, raw) = path.rsplit_once('.').unwrap_or(("", path));
    let (clean, _) = split_arity(raw);
    TypeReference::new(namespace, clean)
}

fn find_top_level(text: &str, needle: char) -> Option<usize> {
    let mut depth = 0u32;
    for (index, c) in text.char_indices() {
        match c {
            _ if c == needle && depth == 0 => return Some(index),
            '{' | '[' | '(' => depth += 1,
            '}' | ']' | ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}

fn matching_brace(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0u32;
    for (index, c) in text[open..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + index);
                }
            }
            _ => {}
        }
    }
    None
}

fn rsplit_top_level(text: &str, needle: char) -> Option<(&str, &str)> {
    let mut depth = 0u32;
    let mut split = None;
    for (index, c) in text.char_indices() {
        match c {
            _ if c == needle && depth == 0 => split = Some(index),
            '{' | '[' | '(' => depth += 1,
            '}' | ']' | ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    split.map(|index| (&text[..index], &text[index + 1..]))
}

fn split_top_level(text: &str, needle: char) -> Vec<&str> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let mut parts = Vec::new();
    let mut depth = 0u32;
    let mut start = 0;
    for (index, c) in text.char_indices() {
        match c {
            _ if c == needle && depth == 0 => {
                parts.push(&text[start..index]);
                start = index + 1;
            }
            '{' | '[' | '(' => depth += 1,
            '}' | ']' | ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

fn split_suffixes(text: &str) -> Vec<&str> {
    let mut suffixes = Vec::new();
    let mut start = 0;
    for (index, c) in text.char_indices() {
        if c == ']' {
            suffixes.push(&text[start..=index]);
            start = index + 1;
        }
    }
    suffixes
}
