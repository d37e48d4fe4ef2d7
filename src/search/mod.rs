//! Query paths over the page store.
//!
//! - [`match_by_text`]: FTS5 match over page names
//! - [`match_by_tags`]: pages carrying every requested tag
//! - [`list_tags`]: the distinct tag universe

mod tags;
mod text;

use rusqlite::Row;

use crate::error::Result;
use crate::model::{Page, Properties};

pub use tags::{list_tags, match_by_tags};
pub use text::match_by_text;

/// Columns every page query selects, in [`page_from_row`] order.
const PAGE_COLUMNS: &str = "p.id, p.created_at, p.updated_at, p.uuid, p.journal, \
     p.original_name, p.properties";

/// Aggregated tag string; tags keep their insertion order.
const TAG_AGGREGATE: &str = "IFNULL(GROUP_CONCAT(t.tag, ' ' ORDER BY t.id), '')";

struct RawPage {
    page: Page,
    properties: Option<String>,
}

fn raw_page_from_row(row: &Row<'_>) -> rusqlite::Result<RawPage> {
    Ok(RawPage {
        page: Page {
            id: row.get(0)?,
            created_at: row.get::<_, Option<i64>>(1)?.unwrap_or_default(),
            updated_at: row.get::<_, Option<i64>>(2)?.unwrap_or_default(),
            uuid: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            journal: row.get::<_, Option<bool>>(4)?.unwrap_or_default(),
            original_name: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
            properties: None,
            tags: row.get(7)?,
        },
        properties: row.get(6)?,
    })
}

/// Decode the stored properties blob back into the page.
fn finish_page(raw: RawPage) -> Result<Page> {
    let RawPage {
        mut page,
        properties,
    } = raw;
    page.properties = match properties.as_deref() {
        None | Some("") => None,
        Some(blob) => serde_json::from_str::<Option<Properties>>(blob)?,
    };
    Ok(page)
}

fn collect_pages<I>(rows: I) -> Result<Vec<Page>>
where
    I: Iterator<Item = rusqlite::Result<RawPage>>,
{
    let mut pages = Vec::new();
    for row in rows {
        pages.push(finish_page(row?)?);
    }
    Ok(pages)
}
