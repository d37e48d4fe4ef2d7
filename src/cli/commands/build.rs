//! logseq-index build - Rebuild the store from the Logseq API

use clap::Args;
use tracing::info;

use crate::app::AppContext;
use crate::error::Result;
use crate::indexer::{self, BuildReport};
use crate::source::{LogseqApi, PageSource};

#[derive(Args, Debug)]
pub struct BuildArgs {}

pub fn run(ctx: &AppContext, _args: &BuildArgs) -> Result<()> {
    let token = ctx.config.require_token()?;
    let api = LogseqApi::from_config(&ctx.config.source, token)?;
    build_from(ctx, &api)?;
    Ok(())
}

/// Fetch a snapshot from `source`, then replace the store with it.
///
/// The snapshot is fetched before the old store is removed, so a failed
/// fetch leaves the previous store intact.
pub fn build_from(ctx: &AppContext, source: &dyn PageSource) -> Result<BuildReport> {
    let pages = source.fetch_pages()?;
    let mut store = ctx.reset_store()?;
    let report = indexer::index(&mut store, &pages)?;
    info!(
        pages = report.pages,
        tags = report.tags,
        path = %ctx.store_options.path.display(),
        "build complete"
    );
    Ok(report)
}
