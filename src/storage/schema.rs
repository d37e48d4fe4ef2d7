//! Store schema: pages, tags and the full-text index over page names.

use std::fmt;
use std::str::FromStr;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Bumped whenever the DDL below changes; queries refuse older stores.
pub const SCHEMA_VERSION: u32 = 1;

const PAGES_AND_TAGS: &str = "
CREATE TABLE pages (
    id INTEGER NOT NULL PRIMARY KEY,
    created_at INTEGER,
    updated_at INTEGER,
    uuid TEXT,
    journal BOOLEAN,
    original_name TEXT,
    properties TEXT
);

CREATE TABLE tags (
    id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    page_id INTEGER NOT NULL,
    tag TEXT NOT NULL,
    FOREIGN KEY (page_id) REFERENCES pages (id) ON DELETE CASCADE
);

CREATE INDEX idx_tags_page_id ON tags (page_id);
CREATE INDEX idx_tags_tag ON tags (tag);
";

/// FTS5 tokenizer used for the page-name index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tokenizer {
    /// CJK-aware tokenizer from the `simple` SQLite extension.
    Simple,
    /// SQLite's built-in Unicode tokenizer.
    Unicode61,
    /// SQLite's built-in trigram tokenizer (substring matching).
    Trigram,
}

impl Tokenizer {
    /// Value of the FTS5 `tokenize` option.
    #[must_use]
    pub const fn fts5_option(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Unicode61 => "unicode61 remove_diacritics 2",
            Self::Trigram => "trigram",
        }
    }
}

impl fmt::Display for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Simple => "simple",
            Self::Unicode61 => "unicode61",
            Self::Trigram => "trigram",
        };
        f.write_str(name)
    }
}

impl FromStr for Tokenizer {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "unicode61" => Ok(Self::Unicode61),
            "trigram" => Ok(Self::Trigram),
            other => Err(format!(
                "unknown tokenizer {other} (expected simple|unicode61|trigram)"
            )),
        }
    }
}

/// Create every table on an empty database and stamp the schema version.
pub fn create(conn: &Connection, tokenizer: Tokenizer) -> Result<()> {
    conn.execute_batch(PAGES_AND_TAGS)?;
    conn.execute_batch(&fts_ddl(tokenizer))?;
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    Ok(())
}

/// Schema version stamped on an existing database.
pub fn version(conn: &Connection) -> Result<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

fn fts_ddl(tokenizer: Tokenizer) -> String {
    format!(
        "CREATE VIRTUAL TABLE pages_fts USING fts5(original_name, tokenize = '{}');",
        tokenizer.fts5_option()
    )
}
