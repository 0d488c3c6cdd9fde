//! Documentation content, doc ids, and XML ingestion
//!
//! The content model carries summaries, remarks, examples, and exception
//! docs as small block trees. Doc ids bridge the gap between metadata rows
//! and the compiler's documentation file: ids are composed from the rows and
//! looked up in the parsed file during tree construction.

mod content;
mod ids;
mod xml;

pub use content::{
    Block, CodeBlock, Documentation, Example, ExceptionDoc, Hyperlink, Inline, Paragraph,
};
pub use ids::{parse_cref, DocIdComposer};
pub use xml::{MemberDocs, XmlDocError, XmlDocs};
