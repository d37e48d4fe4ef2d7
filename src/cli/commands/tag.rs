//! logseq-index tag - Pages carrying every given tag

use clap::Args;

use super::emit;
use crate::app::AppContext;
use crate::error::Result;
use crate::output::ItemList;
use crate::search;

#[derive(Args, Debug)]
pub struct TagArgs {
    /// Tags that must all be present
    #[arg(required = true, num_args = 1.., value_name = "TAG")]
    pub tags: Vec<String>,
}

pub fn run(ctx: &AppContext, args: &TagArgs) -> Result<()> {
    emit(&execute(ctx, args)?)
}

pub fn execute(ctx: &AppContext, args: &TagArgs) -> Result<ItemList> {
    let store = ctx.open_store()?;
    let pages = search::match_by_tags(&store, &args.tags)?;
    Ok(ctx.projector().project_pages(&pages))
}
