//! CodeMap CLI - Command-line interface for the CodeMap documentation generator

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod json;
mod search;
mod snapshot;

#[derive(Parser)]
#[command(name = "codemap")]
#[command(version = codemap_core::VERSION)]
#[command(about = "Generate documentation data from assembly metadata snapshots", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a metadata snapshot as documentation JSON
    Json {
        /// Path to the metadata snapshot
        snapshot: PathBuf,

        /// Companion XML documentation file
        #[arg(long)]
        docs: Option<PathBuf>,

        /// Include non-public declarations
        #[arg(long)]
        all: bool,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build a search index from a metadata snapshot
    Search {
        /// Path to the metadata snapshot
        snapshot: PathBuf,

        /// Companion XML documentation file
        #[arg(long)]
        docs: Option<PathBuf>,

        /// Include non-public declarations
        #[arg(long)]
        all: bool,

        /// Framework tag used in external documentation links
        #[arg(long)]
        framework: Option<String>,

        /// Assembly documented by this site, in addition to the snapshot's own
        #[arg(long = "project-assembly")]
        project_assemblies: Vec<String>,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Json {
            snapshot,
            docs,
            all,
            pretty,
            output,
        } => {
            let options = json::JsonOptions {
                snapshot,
                docs,
                all,
                pretty,
                output,
            };
            json::render_json(options)
        }

        Commands::Search {
            snapshot,
            docs,
            all,
            framework,
            project_assemblies,
            pretty,
            output,
        } => {
            let options = search::SearchOptions {
                snapshot,
                docs,
                all,
                framework,
                project_assemblies,
                pretty,
                output,
            };
            search::build_index(options)
        }
    }
}
