//! Compiler documentation file parsing
//!
//! Reads the XML file the compiler writes next to an assembly and indexes
//! its `<member>` entries by doc id. Mixed content is walked through the
//! DOM; member selection goes through XPath. Unknown elements degrade to
//! their text so third-party tags never lose prose.

use std::collections::{BTreeMap, HashMap};
use std::mem;

use sxd_document::dom::{ChildOfElement, Element};
use sxd_document::parser;
use sxd_xpath::Value as XPathValue;
use thiserror::Error;

use super::content::{Block, CodeBlock, Documentation, Example, ExceptionDoc, Hyperlink, Inline, Paragraph};
use super::ids::parse_cref;

/// Failure while reading a documentation file
#[derive(Debug, Error)]
pub enum XmlDocError {
    /// The file is not well-formed XML
    #[error("malformed documentation XML: {0}")]
    Malformed(String),
    /// Member selection failed
    #[error("documentation query failed: {0}")]
    Query(String),
}

/// Parsed documentation for one member entry
///
/// Parameter and type-parameter descriptions stay in maps keyed by name;
/// tree construction distributes them onto the matching parameter entries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MemberDocs {
    /// Sections that attach to the declaration itself
    pub docs: Documentation,
    /// Parameter descriptions by parameter name
    pub params: BTreeMap<String, Vec<Block>>,
    /// Type-parameter descriptions by parameter name
    pub type_params: BTreeMap<String, Vec<Block>>,
}

/// All member entries of one documentation file, indexed by doc id
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlDocs {
    members: HashMap<String, MemberDocs>,
}

impl XmlDocs {
    /// Parse a documentation file
    ///
    /// A file without a `<members>` section parses to an empty index.
    ///
    /// # Errors
    ///
    /// Returns [`XmlDocError::Malformed`] when the text is not well-formed
    /// XML and [`XmlDocError::Query`] when member selection fails.
    pub fn parse(xml: &str) -> Result<Self, XmlDocError> {
        let package =
            parser::parse(xml).map_err(|error| XmlDocError::Malformed(format!("{error:?}")))?;
        let document = package.as_document();
        let value = sxd_xpath::evaluate_xpath(&document, "/doc/members/member")
            .map_err(|error| XmlDocError::Query(format!("{error:?}")))?;

        let mut members = HashMap::new();
        if let XPathValue::Nodeset(nodes) = value {
            for node in nodes.document_order() {
                let Some(element) = node.element() else {
                    continue;
                };
                let Some(name) = attr(element, "name") else {
                    continue;
                };
                members.insert(name, parse_member(element));
            }
        }
        Ok(Self { members })
    }

    /// Look up the entry for a doc id
    #[must_use]
    pub fn get(&self, doc_id: &str) -> Option<&MemberDocs> {
        self.members.get(doc_id)
    }

    /// Number of member entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the file held no member entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

fn parse_member(element: Element<'_>) -> MemberDocs {
    let mut member = MemberDocs::default();
    for child in element.children() {
        let ChildOfElement::Element(child) = child else {
            continue;
        };
        match child.name().local_part() {
            "summary" => member.docs.summary.extend(parse_blocks(child)),
            "remarks" => member.docs.remarks.extend(parse_blocks(child)),
            "example" => member.docs.examples.push(Example {
                content: parse_blocks(child),
            }),
            "returns" => member.docs.returns.extend(parse_blocks(child)),
            "value" => member.docs.value.extend(parse_blocks(child)),
            "param" => {
                if let Some(name) = attr(child, "name") {
                    member.params.insert(name, parse_blocks(child));
                }
            }
            "typeparam" => {
                if let Some(name) = attr(child, "name") {
                    member.type_params.insert(name, parse_blocks(child));
                }
            }
            "exception" => {
                if let Some(cref) = attr(child, "cref") {
                    member.docs.exceptions.push(ExceptionDoc {
                        exception: parse_cref(&cref),
                        description: parse_blocks(child),
                    });
                }
            }
            "seealso" => {
                if let Some(cref) = attr(child, "cref") {
                    member.docs.related.push(parse_cref(&cref));
                }
            }
            _ => {}
        }
    }
    member
}

/// Parse mixed content into blocks
///
/// Loose inline content between `<para>` and `<code>` elements forms its
/// own paragraphs, so sections written without explicit paragraph tags
/// still come out as one paragraph.
fn parse_blocks(element: Element<'_>) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current: Vec<Inline> = Vec::new();
    for child in element.children() {
        match child {
            ChildOfElement::Text(text) => push_text(&mut current, text.text()),
            ChildOfElement::Element(child) => match child.name().local_part() {
                "para" => {
                    push_paragraph(&mut blocks, mem::take(&mut current));
                    push_paragraph(&mut blocks, parse_inlines(child));
                }
                "code" => {
                    push_paragraph(&mut blocks, mem::take(&mut current));
                    blocks.push(Block::Code(parse_code(child)));
                }
                _ => push_inline(&mut current, child),
            },
            _ => {}
        }
    }
    push_paragraph(&mut blocks, current);
    blocks
}

fn parse_inlines(element: Element<'_>) -> Vec<Inline> {
    let mut inlines = Vec::new();
    for child in element.children() {
        match child {
            ChildOfElement::Text(text) => push_text(&mut inlines, text.text()),
            ChildOfElement::Element(child) => push_inline(&mut inlines, child),
            _ => {}
        }
    }
    inlines
}

fn push_inline(inlines: &mut Vec<Inline>, element: Element<'_>) {
    match element.name().local_part() {
        "see" | "seealso" => {
            if let Some(cref) = attr(element, "cref") {
                let text = non_empty(inner_text(element)).unwrap_or_else(|| cref_display(&cref));
                inlines.push(Inline::Link(Hyperlink::new(cref, text)));
            } else if let Some(href) = attr(element, "href") {
                let text = non_empty(inner_text(element)).unwrap_or_else(|| href.clone());
                inlines.push(Inline::Link(Hyperlink::new(href, text)));
            } else if let Some(word) = attr(element, "langword") {
                push_text(inlines, &word);
            }
        }
        "paramref" | "typeparamref" => {
            if let Some(name) = attr(element, "name") {
                push_text(inlines, &name);
            }
        }
        _ => {
            let text = inner_text(element);
            push_text(inlines, &text);
        }
    }
}

/// Append collapsed text, merging into a preceding text run
fn push_text(inlines: &mut Vec<Inline>, text: &str) {
    let collapsed = collapse_whitespace(text);
    if collapsed.is_empty() {
        return;
    }
    if let Some(Inline::Text(last)) = inlines.last_mut() {
        last.push_str(&collapsed);
    } else {
        inlines.push(Inline::Text(collapsed));
    }
}

/// Flush accumulated inline runs as a paragraph, if they hold any content
fn push_paragraph(blocks: &mut Vec<Block>, mut content: Vec<Inline>) {
    if let Some(Inline::Text(first)) = content.first_mut() {
        *first = first.trim_start().to_string();
    }
    if let Some(Inline::Text(last)) = content.last_mut() {
        *last = last.trim_end().to_string();
    }
    content.retain(|inline| !matches!(inline, Inline::Text(text) if text.is_empty()));

    let has_content = content.iter().any(|inline| match inline {
        Inline::Text(text) => !text.trim().is_empty(),
        Inline::Link(_) => true,
    });
    if has_content {
        blocks.push(Block::Paragraph(Paragraph::new(content)));
    }
}

fn parse_code(element: Element<'_>) -> CodeBlock {
    let mut text = String::new();
    for child in element.children() {
        if let ChildOfElement::Text(part) = child {
            text.push_str(part.text());
        }
    }
    let block = CodeBlock::new(dedent(&text));
    match attr(element, "language").or_else(|| attr(element, "lang")) {
        Some(language) => block.with_language(language),
        None => block,
    }
}

/// Strip the indentation the XML nesting forced onto a listing
///
/// The common indent is counted in characters, not bytes, so listings
/// indented with multi-byte whitespace dedent like any other.
fn dedent(text: &str) -> String {
    let text = text.strip_prefix("\r\n").or_else(|| text.strip_prefix('\n')).unwrap_or(text);
    let text = text.trim_end();
    let indent = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);
    text.lines()
        .map(|line| strip_indent(line, indent))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drop up to `indent` leading whitespace characters from one line
fn strip_indent(line: &str, indent: usize) -> &str {
    let mut rest = line.chars();
    for _ in 0..indent {
        match rest.next() {
            Some(c) if c.is_whitespace() => {}
            _ => return line.trim_start(),
        }
    }
    rest.as_str()
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
                in_space = true;
            }
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

fn inner_text(element: Element<'_>) -> String {
    let mut text = String::new();
    for child in element.children() {
        match child {
            ChildOfElement::Text(part) => text.push_str(part.text()),
            ChildOfElement::Element(child) => text.push_str(&inner_text(child)),
            _ => {}
        }
    }
    collapse_whitespace(&text).trim().to_string()
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Friendly display text of a cref: its last simple name
fn cref_display(cref: &str) -> String {
    let text = cref.split_once(':').map_or(cref, |(_, rest)| rest);
    let text = text.split_once('(').map_or(text, |(head, _)| head);
    let segment = text
        .rsplit('.')
        .find(|segment| !segment.is_empty() && *segment != "#ctor" && *segment != "#cctor")
        .unwrap_or(text);
    let clean = segment.split_once('`').map_or(segment, |(clean, _)| clean);
    clean.to_string()
}

fn attr(element: Element<'_>, name: &str) -> Option<String> {
    element
        .attribute(name)
        .map(|attribute| attribute.value().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::references::MemberReference;

    const SAMPLE: &str = r##"<?xml version="1.0"?>
<doc>
    <assembly>
        <name>CodeMap.Tests.Data</name>
    </assembly>
    <members>
        <member name="T:CodeMap.Tests.TestClass`3">
            <summary>A test class with <see cref="T:System.Int32"/> references. Second sentence.</summary>
            <remarks>
                <para>First paragraph.</para>
                <para>Second paragraph with <paramref name="value"/> and <see langword="null"/>.</para>
                <code language="c#">
                    var instance = new TestClass&lt;int, string, bool&gt;();
                    instance.Run();
                </code>
            </remarks>
            <example>
                <para>Typical usage:</para>
                <code>instance.TestMethod(42);</code>
            </example>
            <typeparam name="TParam1">The first type parameter.</typeparam>
            <seealso cref="T:System.String"/>
        </member>
        <member name="M:CodeMap.Tests.TestClass`3.TestMethod(System.Int32)">
            <summary>Runs the test method.</summary>
            <param name="value">The input value.</param>
            <returns>The processed result.</returns>
            <exception cref="T:System.ArgumentException">Thrown when the value is negative.</exception>
        </member>
    </members>
</doc>"##;

    #[test]
    fn test_parse_indexes_members_by_doc_id() {
        let docs = XmlDocs::parse(SAMPLE).unwrap();
        assert_eq!(docs.len(), 2);
        assert!(docs.get("T:CodeMap.Tests.TestClass`3").is_some());
        assert!(docs
            .get("M:CodeMap.Tests.TestClass`3.TestMethod(System.Int32)")
            .is_some());
        assert!(docs.get("T:Missing").is_none());
    }

    #[test]
    fn test_summary_mixes_text_and_links() {
        let docs = XmlDocs::parse(SAMPLE).unwrap();
        let entry = docs.get("T:CodeMap.Tests.TestClass`3").unwrap();

        let [Block::Paragraph(paragraph)] = entry.docs.summary.as_slice() else {
            panic!("expected a single summary paragraph");
        };
        assert_eq!(
            paragraph.content,
            vec![
                Inline::Text("A test class with ".to_string()),
                Inline::Link(Hyperlink::new("T:System.Int32", "Int32")),
                Inline::Text(" references. Second sentence.".to_string()),
            ]
        );
    }

    #[test]
    fn test_remarks_paragraphs_and_code() {
        let docs = XmlDocs::parse(SAMPLE).unwrap();
        let entry = docs.get("T:CodeMap.Tests.TestClass`3").unwrap();

        assert_eq!(entry.docs.remarks.len(), 3);
        assert_eq!(
            entry.docs.remarks[0],
            Block::Paragraph(Paragraph::text("First paragraph."))
        );
        assert_eq!(
            entry.docs.remarks[1],
            Block::Paragraph(Paragraph::text("Second paragraph with value and null."))
        );
        let Block::Code(code) = &entry.docs.remarks[2] else {
            panic!("expected a code block");
        };
        assert_eq!(code.language.as_deref(), Some("c#"));
        assert_eq!(
            code.text,
            "var instance = new TestClass<int, string, bool>();\ninstance.Run();"
        );
    }

    #[test]
    fn test_code_dedent_counts_mixed_width_whitespace() {
        // One line indented with a no-break space, the next with an ASCII
        // space: the common indent is one character on both.
        let xml = "<doc><members>\
                   <member name=\"T:CodeMap.Tests.Padded\">\
                   <remarks><code>\n\u{a0}first();\n second();</code></remarks>\
                   </member></members></doc>";
        let docs = XmlDocs::parse(xml).unwrap();
        let entry = docs.get("T:CodeMap.Tests.Padded").unwrap();

        let [Block::Code(code)] = entry.docs.remarks.as_slice() else {
            panic!("expected a single code block");
        };
        assert_eq!(code.text, "first();\nsecond();");
    }

    #[test]
    fn test_example_holds_prose_and_listing() {
        let docs = XmlDocs::parse(SAMPLE).unwrap();
        let entry = docs.get("T:CodeMap.Tests.TestClass`3").unwrap();

        let [example] = entry.docs.examples.as_slice() else {
            panic!("expected a single example");
        };
        assert_eq!(
            example.content[0],
            Block::Paragraph(Paragraph::text("Typical usage:"))
        );
        assert_eq!(
            example.content[1],
            Block::Code(CodeBlock::new("instance.TestMethod(42);"))
        );
    }

    #[test]
    fn test_parameter_and_type_parameter_maps() {
        let docs = XmlDocs::parse(SAMPLE).unwrap();

        let entry = docs.get("T:CodeMap.Tests.TestClass`3").unwrap();
        assert_eq!(
            entry.type_params.get("TParam1"),
            Some(&vec![Block::Paragraph(Paragraph::text(
                "The first type parameter."
            ))])
        );

        let entry = docs
            .get("M:CodeMap.Tests.TestClass`3.TestMethod(System.Int32)")
            .unwrap();
        assert_eq!(
            entry.params.get("value"),
            Some(&vec![Block::Paragraph(Paragraph::text("The input value."))])
        );
        assert_eq!(
            entry.docs.returns,
            vec![Block::Paragraph(Paragraph::text("The processed result."))]
        );
    }

    #[test]
    fn test_exception_and_seealso_entries() {
        let docs = XmlDocs::parse(SAMPLE).unwrap();

        let entry = docs
            .get("M:CodeMap.Tests.TestClass`3.TestMethod(System.Int32)")
            .unwrap();
        let [exception] = entry.docs.exceptions.as_slice() else {
            panic!("expected a single exception entry");
        };
        let MemberReference::Type(ty) = &exception.exception else {
            panic!("expected a type reference");
        };
        assert_eq!(ty.name, "ArgumentException");
        assert_eq!(
            exception.description,
            vec![Block::Paragraph(Paragraph::text(
                "Thrown when the value is negative."
            ))]
        );

        let entry = docs.get("T:CodeMap.Tests.TestClass`3").unwrap();
        let [MemberReference::Type(related)] = entry.docs.related.as_slice() else {
            panic!("expected a single related type");
        };
        assert_eq!(related.name, "String");
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let error = XmlDocs::parse("<doc><members>").unwrap_err();
        assert!(matches!(error, XmlDocError::Malformed(_)));
    }

    #[test]
    fn test_missing_members_section_parses_empty() {
        let docs = XmlDocs::parse("<doc/>").unwrap();
        assert!(docs.is_empty());
    }
}
