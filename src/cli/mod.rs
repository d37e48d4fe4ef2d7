//! CLI module - Command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod commands;

/// Mirror a Logseq graph's pages into a local search index for launchers
#[derive(Parser, Debug)]
#[command(name = "logseq-index")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress log output (errors are still printed)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit log lines as JSON on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Config file path (default: ~/.config/logseq-index/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rebuild the local store from the running Logseq app
    Build(commands::build::BuildArgs),

    /// Full-text search over page names
    Query(commands::query::QueryArgs),

    /// List pages carrying all of the given tags
    Tag(commands::tag::TagArgs),

    /// List known tags, optionally filtered by substring
    Tags(commands::tags::TagsArgs),
}
