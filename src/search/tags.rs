use rusqlite::ToSql;
use tracing::debug;

use super::{PAGE_COLUMNS, TAG_AGGREGATE, collect_pages, raw_page_from_row};
use crate::error::{LogseqError, Result};
use crate::model::Page;
use crate::storage::Store;

/// Pages carrying every tag in `tags`, ordered by page id.
///
/// A page qualifies when the number of distinct requested tags it carries
/// equals `tags.len()`. The request is not de-duplicated, so asking for the
/// same tag twice matches nothing. The returned tag string lists all of the
/// page's tags, not only the requested ones.
pub fn match_by_tags<S: AsRef<str>>(store: &Store, tags: &[S]) -> Result<Vec<Page>> {
    if tags.is_empty() {
        return Err(LogseqError::EmptyInput(
            "at least one tag is required".to_string(),
        ));
    }

    let placeholders = vec!["?"; tags.len()].join(", ");
    let sql = format!(
        "SELECT {PAGE_COLUMNS}, {TAG_AGGREGATE} AS tags
         FROM pages p
         LEFT JOIN tags t ON t.page_id = p.id
         WHERE p.id IN (
             SELECT page_id FROM tags
             WHERE tag IN ({placeholders})
             GROUP BY page_id
             HAVING COUNT(DISTINCT tag) = ?
         )
         GROUP BY p.id
         ORDER BY p.id"
    );

    let requested: Vec<&str> = tags.iter().map(AsRef::as_ref).collect();
    let required = i64::try_from(requested.len()).unwrap_or(i64::MAX);
    let mut args: Vec<&dyn ToSql> = requested.iter().map(|tag| tag as &dyn ToSql).collect();
    args.push(&required);
    debug!(tags = ?requested, required, "tag conjunction search");

    let mut stmt = store.conn().prepare(&sql)?;
    let rows = stmt.query_map(args.as_slice(), raw_page_from_row)?;
    let pages = collect_pages(rows)?;
    Ok(pages)
}

/// Distinct tags in ascending order, optionally limited to those containing
/// `filter`. Matching uses SQLite `LIKE`, so it ignores ASCII case.
pub fn list_tags(store: &Store, filter: Option<&str>) -> Result<Vec<String>> {
    let filter = filter.filter(|f| !f.is_empty());
    let conn = store.conn();

    let tags = match filter {
        None => {
            let mut stmt = conn.prepare("SELECT DISTINCT tag FROM tags ORDER BY tag")?;
            let tags = stmt
                .query_map([], |row| row.get(0))?
                .collect::<rusqlite::Result<Vec<String>>>()?;
            tags
        }
        Some(filter) => {
            let pattern = format!("%{}%", escape_like(filter));
            debug!(pattern = %pattern, "tag listing filter");
            let mut stmt = conn.prepare(
                "SELECT DISTINCT tag FROM tags WHERE tag LIKE ? ESCAPE '\\' ORDER BY tag",
            )?;
            let tags = stmt
                .query_map([pattern], |row| row.get(0))?
                .collect::<rusqlite::Result<Vec<String>>>()?;
            tags
        }
    };
    Ok(tags)
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
