//! logseq-index tags - List known tags

use clap::Args;

use super::emit;
use crate::app::AppContext;
use crate::error::Result;
use crate::output::ItemList;
use crate::search;

#[derive(Args, Debug)]
pub struct TagsArgs {
    /// Only list tags containing this text
    pub filter: Option<String>,
}

pub fn run(ctx: &AppContext, args: &TagsArgs) -> Result<()> {
    emit(&execute(ctx, args)?)
}

pub fn execute(ctx: &AppContext, args: &TagsArgs) -> Result<ItemList> {
    let store = ctx.open_store()?;
    let tags = search::list_tags(&store, args.filter.as_deref())?;
    Ok(ctx.projector().project_tags(&tags))
}
