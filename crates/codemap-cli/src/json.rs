//! Documentation rendering for `codemap json`.

use anyhow::Result;
use std::path::PathBuf;

use codemap_core::declaration_json;
use codemap_core::declarations::DeclarationId;

use crate::snapshot;

/// Options for documentation rendering.
#[derive(Debug, Clone)]
pub struct JsonOptions {
    /// Path to the metadata snapshot.
    pub snapshot: PathBuf,

    /// Companion XML documentation file.
    pub docs: Option<PathBuf>,

    /// Include non-public declarations.
    pub all: bool,

    /// Pretty-print the output.
    pub pretty: bool,

    /// Output file, stdout when absent.
    pub output: Option<PathBuf>,
}

/// Render a metadata snapshot as documentation JSON.
pub fn render_json(options: JsonOptions) -> Result<()> {
    let tree = snapshot::load_tree(&options.snapshot, options.docs.as_deref(), options.all)?;
    let value = declaration_json(&tree, DeclarationId::Assembly);
    snapshot::write_output(&value, options.pretty, options.output.as_deref())
}
