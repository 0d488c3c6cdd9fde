//! Content model for documentation text
//!
//! Documentation bodies are small trees: a sequence of blocks, where a block
//! is either a paragraph of inline runs or a code listing. Inline runs are
//! plain text or links. The model is deliberately flat; nothing in it nests
//! beyond one block level.

use crate::references::MemberReference;

/// One block of documentation content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A paragraph of inline runs
    Paragraph(Paragraph),
    /// A preformatted code listing
    Code(CodeBlock),
}

/// A paragraph of inline runs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Paragraph {
    /// Inline runs in display order
    pub content: Vec<Inline>,
}

impl Paragraph {
    /// Create a paragraph from inline runs
    #[must_use]
    pub fn new(content: Vec<Inline>) -> Self {
        Self { content }
    }

    /// Create a paragraph holding a single text run
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Inline::Text(text.into())],
        }
    }
}

/// A preformatted code listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Language hint, if the source declared one
    pub language: Option<String>,
    /// Listing text with original line breaks
    pub text: String,
}

impl CodeBlock {
    /// Create a listing without a language hint
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            language: None,
            text: text.into(),
        }
    }

    /// Attach a language hint
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// One inline run inside a paragraph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// Plain text
    Text(String),
    /// A link to a documented member or an external page
    Link(Hyperlink),
}

/// A link with display text
///
/// The target is either a doc id (for code references) or a URL. Link
/// builders resolve doc ids to page addresses as a later pass; the content
/// model keeps whatever the source said.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hyperlink {
    /// Doc id or URL
    pub target: String,
    /// Display text
    pub text: String,
}

impl Hyperlink {
    /// Create a link
    #[must_use]
    pub fn new(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            text: text.into(),
        }
    }
}

/// One usage example
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Example {
    /// Example body, typically prose followed by a listing
    pub content: Vec<Block>,
}

/// Documentation for one thrown exception
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionDoc {
    /// The exception type
    pub exception: MemberReference,
    /// Circumstances under which it is thrown
    pub description: Vec<Block>,
}

/// Documentation attached to a declaration
///
/// Every field may be empty; members without XML documentation carry the
/// default value. Parameter and type-parameter descriptions are not here,
/// they attach to the parameter entries themselves.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Documentation {
    /// Short description
    pub summary: Vec<Block>,
    /// Longer discussion
    pub remarks: Vec<Block>,
    /// Usage examples
    pub examples: Vec<Example>,
    /// Return value description, methods and delegates only
    pub returns: Vec<Block>,
    /// Stored value description, properties only
    pub value: Vec<Block>,
    /// Documented exceptions
    pub exceptions: Vec<ExceptionDoc>,
    /// Related members worth cross-referencing
    pub related: Vec<MemberReference>,
}

impl Documentation {
    /// Whether no section holds any content
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
            && self.remarks.is_empty()
            && self.examples.is_empty()
            && self.returns.is_empty()
            && self.value.is_empty()
            && self.exceptions.is_empty()
            && self.related.is_empty()
    }

    /// Plain text of the first summary sentence, if any
    ///
    /// Link display text counts as text. The sentence ends at the first
    /// period followed by whitespace or end of input.
    #[must_use]
    pub fn first_summary_sentence(&self) -> Option<String> {
        let text = self
            .summary
            .iter()
            .filter_map(|block| match block {
                Block::Paragraph(paragraph) => Some(paragraph),
                Block::Code(_) => None,
            })
            .flat_map(|paragraph| &paragraph.content)
            .map(|inline| match inline {
                Inline::Text(text) => text.as_str(),
                Inline::Link(link) => link.text.as_str(),
            })
            .collect::<String>();
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let mut end = text.len();
        for (index, _) in text.match_indices('.') {
            let rest = &text[index + 1..];
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                end = index + 1;
                break;
            }
        }
        Some(text[..end].to_string())
    }
}
