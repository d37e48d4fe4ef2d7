use serde_json::Value;
use tempfile::TempDir;

use crate::config::Config;
use crate::model::{Page, Properties};
use crate::storage::StoreOptions;

/// Deterministic UUID for a page id.
#[must_use]
pub fn uuid_for(id: i64) -> String {
    format!("00000000-0000-4000-8000-{id:012}")
}

/// A page without properties.
#[must_use]
pub fn page(id: i64, name: &str) -> Page {
    Page {
        id,
        created_at: 1_700_000_000_000 + id,
        updated_at: 1_700_000_100_000 + id,
        uuid: uuid_for(id),
        journal: false,
        original_name: name.to_string(),
        properties: None,
        tags: String::new(),
    }
}

/// A page whose properties are the given JSON object.
///
/// # Panics
///
/// Panics if `properties` is not a JSON object.
#[must_use]
pub fn page_with_properties(id: i64, name: &str, properties: Value) -> Page {
    let properties: Properties = match properties {
        Value::Object(map) => map,
        other => panic!("page properties must be an object, got {other}"),
    };
    Page {
        properties: Some(properties),
        ..page(id, name)
    }
}

/// The two-page graph used across scenario tests.
#[must_use]
pub fn sample_pages() -> Vec<Page> {
    vec![
        page_with_properties(
            1,
            "Project Alpha",
            serde_json::json!({"tags": ["work", "urgent"]}),
        ),
        page_with_properties(2, "Shopping List", serde_json::json!({})),
    ]
}

/// Test fixture providing an isolated store location.
pub struct StoreFixture {
    pub temp_dir: TempDir,
    pub options: StoreOptions,
}

impl StoreFixture {
    /// # Panics
    ///
    /// Panics if the temp directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let options = StoreOptions::at(temp_dir.path().join("pages.db"));
        Self { temp_dir, options }
    }

    /// Config pointing at this fixture's store, without the tokenizer library.
    #[must_use]
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.store.path = self.options.path.clone();
        config.store.load_extension = false;
        config
    }
}

impl Default for StoreFixture {
    fn default() -> Self {
        Self::new()
    }
}
