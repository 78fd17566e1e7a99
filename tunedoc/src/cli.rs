//! Command-line interface definitions for tunedoc

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI structure for the tunedoc application
#[derive(Parser)]
#[command(name = "tunedoc")]
#[command(version)]
#[command(about = "Tuning guide content pipeline and renderer", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for tunedoc
#[derive(Subcommand)]
pub enum Commands {
    /// Ingest a guide from an automation request file
    Ingest {
        /// Path to the JSON request payload
        #[arg(short, long)]
        request: PathBuf,

        /// Guide store directory
        #[arg(long, default_value = "guides")]
        store: PathBuf,

        /// Site configuration file (built-in defaults when omitted)
        #[arg(long)]
        site: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show a stored guide's metadata, contents and sections
    Show {
        /// Guide id ({level}_{category}_{slug})
        id: String,

        /// Guide store directory
        #[arg(long, default_value = "guides")]
        store: PathBuf,

        /// Site configuration file (built-in defaults when omitted)
        #[arg(long)]
        site: Option<PathBuf>,
    },

    /// List all stored guides
    List {
        /// Guide store directory
        #[arg(long, default_value = "guides")]
        store: PathBuf,
    },

    /// Render a guide, or one of its sections, to an HTML page
    Render {
        /// Guide id ({level}_{category}_{slug})
        id: String,

        /// Render only this section (by its anchor id)
        #[arg(long)]
        section: Option<String>,

        /// Output HTML file
        #[arg(short, long, default_value = "guide.html")]
        output: PathBuf,

        /// Guide store directory
        #[arg(long, default_value = "guides")]
        store: PathBuf,

        /// Site configuration file (built-in defaults when omitted)
        #[arg(long)]
        site: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}
