use tracing::debug;

use super::{PAGE_COLUMNS, TAG_AGGREGATE, collect_pages, raw_page_from_row};
use crate::error::Result;
use crate::model::Page;
use crate::storage::Store;

/// Pages whose name matches `query` under FTS5 query syntax.
///
/// The query string reaches SQLite untouched, so phrase, prefix (`foo*`)
/// and boolean operators all work, and a malformed query is a database
/// error. Results come back best `bm25` score first, ties broken by page id.
pub fn match_by_text(store: &Store, query: &str) -> Result<Vec<Page>> {
    let sql = format!(
        "WITH hits AS MATERIALIZED (
             SELECT rowid AS page_id, bm25(pages_fts) AS score
             FROM pages_fts
             WHERE original_name MATCH ?1
         )
         SELECT {PAGE_COLUMNS}, {TAG_AGGREGATE} AS tags
         FROM hits
         JOIN pages p ON p.id = hits.page_id
         LEFT JOIN tags t ON t.page_id = p.id
         GROUP BY p.id
         ORDER BY hits.score, p.id"
    );
    debug!(query, "full-text search");

    let mut stmt = store.conn().prepare(&sql)?;
    let rows = stmt.query_map([query], raw_page_from_row)?;
    let pages = collect_pages(rows)?;
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::indexer;
    use crate::storage::Tokenizer;
    use crate::test_utils::fixtures::{page, page_with_properties, sample_pages};

    fn indexed(pages: &[Page]) -> Store {
        let mut store = Store::in_memory(Tokenizer::Unicode61).unwrap();
        indexer::index(&mut store, pages).unwrap();
        store
    }

    fn names(pages: &[Page]) -> Vec<&str> {
        pages.iter().map(|p| p.original_name.as_str()).collect()
    }

    #[test]
    fn matches_name_token_with_tags() {
        let store = indexed(&sample_pages());
        let results = match_by_text(&store, "Alpha").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 1);
        assert_eq!(results[0].tags, "work urgent");
        assert_eq!(results[0].uuid, sample_pages()[0].uuid);
    }

    #[test]
    fn untagged_page_has_empty_tag_string() {
        let store = indexed(&sample_pages());
        let results = match_by_text(&store, "shopping").unwrap();
        assert_eq!(names(&results), vec!["Shopping List"]);
        assert_eq!(results[0].tags, "");
    }

    #[test]
    fn no_match_returns_empty() {
        let store = indexed(&sample_pages());
        assert!(match_by_text(&store, "nonexistent").unwrap().is_empty());
    }

    #[test]
    fn prefix_queries_pass_through() {
        let store = indexed(&[page(1, "Rustacean Notes"), page(2, "Rust Book"), page(3, "Go")]);
        let results = match_by_text(&store, "rust*").unwrap();
        let mut ids: Vec<i64> = results.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn boolean_operators_pass_through() {
        let store = indexed(&[page(1, "alpha beta"), page(2, "alpha gamma"), page(3, "beta")]);
        let results = match_by_text(&store, "alpha AND beta").unwrap();
        assert_eq!(names(&results), vec!["alpha beta"]);
    }

    #[test]
    fn malformed_query_is_database_error() {
        let store = indexed(&sample_pages());
        let err = match_by_text(&store, "\"unterminated").unwrap_err();
        assert!(matches!(err, crate::LogseqError::Database(_)));
    }

    #[test]
    fn results_are_deterministic() {
        let pages: Vec<Page> = (1..=20)
            .map(|id| page(id, &format!("meeting notes {id}")))
            .collect();
        let store = indexed(&pages);
        let first = match_by_text(&store, "meeting").unwrap();
        assert_eq!(first.len(), 20);
        for _ in 0..5 {
            assert_eq!(match_by_text(&store, "meeting").unwrap(), first);
        }
    }

    #[test]
    fn properties_survive_the_query_path() {
        let properties = json!({"tags": ["x"], "rating": 3, "alias": ["other"]});
        let store = indexed(&[page_with_properties(4, "Rated Book", properties.clone())]);
        let results = match_by_text(&store, "rated").unwrap();
        assert_eq!(json!(results[0].properties.clone().unwrap()), properties);
    }

    #[test]
    fn cjk_substrings_need_a_cjk_aware_tokenizer() {
        let pages = [page(1, "工作日记"), page(2, "Work Log")];

        // unicode61 keeps the whole CJK run as one token.
        let store = indexed(&pages);
        assert!(match_by_text(&store, "日记").unwrap().is_empty());
        assert_eq!(names(&match_by_text(&store, "工作日记").unwrap()), vec!["工作日记"]);

        let mut trigram = Store::in_memory(Tokenizer::Trigram).unwrap();
        indexer::index(&mut trigram, &pages).unwrap();
        assert_eq!(names(&match_by_text(&trigram, "作日记").unwrap()), vec!["工作日记"]);
    }

    #[test]
    fn name_only_is_indexed() {
        let store = indexed(&[page_with_properties(
            1,
            "Plain",
            json!({"tags": ["hidden"]}),
        )]);
        assert!(match_by_text(&store, "hidden").unwrap().is_empty());
    }
}
