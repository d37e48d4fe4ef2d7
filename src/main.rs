//! logseq-index - Logseq page search for launchers
//!
//! Mirrors the page index of a running Logseq app into SQLite and answers
//! full-text and tag queries with launcher result JSON.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use logseq_index::Result;
use logseq_index::app::AppContext;
use logseq_index::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e.code();
            tracing::error!(code = %code, category = code.category(), "{e}");
            eprintln!("Error: {e}");
            eprintln!("Hint: {}", code.suggestion());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let ctx = AppContext::from_cli(cli)?;
    logseq_index::cli::commands::run(&ctx, &cli.command)
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,logseq_index=info",
        1 => "info,logseq_index=debug",
        2 => "debug,logseq_index=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // stdout carries launcher JSON, so logs always go to stderr.
    if cli.log_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
