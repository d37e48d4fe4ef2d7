//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - `run()` function to execute the command

use crate::app::AppContext;
use crate::cli::Commands;
use crate::error::Result;
use crate::output::ItemList;

pub mod build;
pub mod query;
pub mod tag;
pub mod tags;

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Build(args) => build::run(ctx, args),
        Commands::Query(args) => query::run(ctx, args),
        Commands::Tag(args) => tag::run(ctx, args),
        Commands::Tags(args) => tags::run(ctx, args),
    }
}

/// Print launcher items to stdout.
fn emit(items: &ItemList) -> Result<()> {
    println!("{}", items.to_json()?);
    Ok(())
}
