//! CLI module
//!
//! Command-line interface for the book-discovery service.
//!
//! # Commands
//!
//! - `serve` - Run the HTTP API server
//! - `check` - Probe catalog reachability
//! - `search` - One-off catalog search, printed as JSON
//! - `show` - Fetch one book's detail by slug, printed as JSON

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands};
pub use runner::Runner;
pub use server::{build_router, serve, AppState};
