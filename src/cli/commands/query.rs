//! logseq-index query - Full-text search over page names

use clap::Args;

use super::emit;
use crate::app::AppContext;
use crate::error::Result;
use crate::output::ItemList;
use crate::search;

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// FTS5 query (prefix `foo*`, phrases and AND/OR/NOT are supported)
    pub query: String,
}

pub fn run(ctx: &AppContext, args: &QueryArgs) -> Result<()> {
    emit(&execute(ctx, args)?)
}

pub fn execute(ctx: &AppContext, args: &QueryArgs) -> Result<ItemList> {
    let store = ctx.open_store()?;
    let pages = search::match_by_text(&store, &args.query)?;
    Ok(ctx.projector().project_pages(&pages))
}
