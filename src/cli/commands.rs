//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// bookrack command-line interface
#[derive(Parser, Debug)]
#[command(name = "bookrack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Probe catalog reachability
    Check,

    /// Search the catalog and print results as JSON
    Search {
        /// Search query
        query: String,

        /// Maximum results
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Fetch one book's detail by slug (e.g. works-OL45804W)
    Show {
        /// Book slug
        slug: String,
    },
}
