//! Populate the store from a page snapshot.
//!
//! Each page is written in its own transaction: the page row, its tag rows
//! and its full-text entry either all land or none do. The first failure
//! aborts the build.

use rusqlite::params;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::model::Page;
use crate::storage::Store;

const INSERT_PAGE: &str = "INSERT OR REPLACE INTO pages \
     (id, created_at, updated_at, uuid, journal, original_name, properties) \
     VALUES (?, ?, ?, ?, ?, ?, ?)";

const CLEAR_TAGS: &str = "DELETE FROM tags WHERE page_id = ?";

const INSERT_TAG: &str = "INSERT INTO tags (page_id, tag) VALUES (?, ?)";

const INSERT_FTS: &str = "INSERT OR REPLACE INTO pages_fts (rowid, original_name) VALUES (?, ?)";

/// Counts from one indexing run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub pages: usize,
    pub tags: usize,
}

/// Index `pages` in input order.
pub fn index(store: &mut Store, pages: &[Page]) -> Result<BuildReport> {
    let mut report = BuildReport::default();
    for page in pages {
        report.tags += index_page(store, page)?;
        report.pages += 1;
    }
    info!(pages = report.pages, tags = report.tags, "indexed pages");
    Ok(report)
}

/// Write one page; returns the number of tag rows inserted.
fn index_page(store: &mut Store, page: &Page) -> Result<usize> {
    let tx = store.conn_mut().transaction()?;

    let properties = serde_json::to_string(&page.properties)?;
    tx.execute(
        INSERT_PAGE,
        params![
            page.id,
            page.created_at,
            page.updated_at,
            page.uuid,
            page.journal,
            page.original_name,
            properties,
        ],
    )?;
    let row_id = tx.last_insert_rowid();

    // A repeated id within one snapshot replaces the earlier page entirely.
    tx.execute(CLEAR_TAGS, [row_id])?;
    let tags = page.tag_values();
    {
        let mut stmt = tx.prepare_cached(INSERT_TAG)?;
        for tag in &tags {
            stmt.execute(params![row_id, tag])?;
        }
    }

    tx.execute(INSERT_FTS, params![row_id, page.original_name])?;
    tx.commit()?;

    debug!(
        id = page.id,
        row_id,
        name = %page.original_name,
        tags = tags.len(),
        "indexed page"
    );
    Ok(tags.len())
}
