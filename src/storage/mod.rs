//! Storage layer for logseq-index
//!
//! A single SQLite file holding pages, tags and an FTS5 index over page
//! names. The whole file is rebuilt on every `build`.

pub mod schema;
pub mod sqlite;

pub use schema::{SCHEMA_VERSION, Tokenizer};
pub use sqlite::{Store, StoreOptions};
