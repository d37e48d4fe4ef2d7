//! Launcher result items (Alfred script filter JSON).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::OutputConfig;
use crate::model::Page;

/// URL scheme registered by the Logseq desktop app.
pub const LINK_SCHEME: &str = "logseq";

/// One launcher row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputItem {
    pub uid: String,
    pub title: String,
    pub subtitle: String,
    pub arg: String,
    pub icon: String,
}

/// Top-level document printed to stdout.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemList {
    pub items: Vec<OutputItem>,
}

impl ItemList {
    /// Pretty JSON with two-space indentation.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Builds deep links into a Logseq graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBuilder {
    graph: String,
}

impl LinkBuilder {
    #[must_use]
    pub fn new(graph: impl Into<String>) -> Self {
        Self {
            graph: graph.into(),
        }
    }

    /// `logseq://graph/<graph>?page=<encoded name>`
    #[must_use]
    pub fn page_link(&self, page_name: &str) -> String {
        format!(
            "{LINK_SCHEME}://graph/{}?page={}",
            self.graph,
            urlencoding::encode(page_name)
        )
    }
}

/// Maps pages and tags to launcher items.
#[derive(Debug, Clone)]
pub struct Projector {
    links: LinkBuilder,
    icon: String,
}

impl Projector {
    #[must_use]
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            links: LinkBuilder::new(config.graph.clone()),
            icon: config.icon.clone(),
        }
    }

    /// The subtitle is the page's full tag string, so tag-search results show
    /// every tag on the page rather than only the requested ones.
    #[must_use]
    pub fn project_pages(&self, pages: &[Page]) -> ItemList {
        let items = pages
            .iter()
            .map(|page| OutputItem {
                uid: page.uuid.clone(),
                title: page.original_name.clone(),
                subtitle: page.tags.clone(),
                arg: self.links.page_link(&page.original_name),
                icon: self.icon.clone(),
            })
            .collect();
        ItemList { items }
    }

    /// Tags have no stable identity, so every item gets a fresh random uid.
    #[must_use]
    pub fn project_tags(&self, tags: &[String]) -> ItemList {
        let items = tags
            .iter()
            .map(|tag| OutputItem {
                uid: Uuid::new_v4().to_string(),
                title: tag.clone(),
                subtitle: String::new(),
                arg: tag.clone(),
                icon: self.icon.clone(),
            })
            .collect();
        ItemList { items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::page;

    fn projector() -> Projector {
        Projector::new(&OutputConfig::default())
    }

    #[test]
    fn page_item_fields() {
        let mut alpha = page(1, "Project Alpha");
        alpha.tags = "work urgent".to_string();
        let list = projector().project_pages(&[alpha.clone()]);
        assert_eq!(
            list.items,
            vec![OutputItem {
                uid: alpha.uuid,
                title: "Project Alpha".into(),
                subtitle: "work urgent".into(),
                arg: "logseq://graph/Logseq?page=Project%20Alpha".into(),
                icon: "icon.png".into(),
            }]
        );
    }

    #[test]
    fn graph_name_comes_from_config() {
        let config = OutputConfig {
            graph: "work-notes".into(),
            ..OutputConfig::default()
        };
        let list = Projector::new(&config).project_pages(&[page(1, "Inbox")]);
        assert_eq!(list.items[0].arg, "logseq://graph/work-notes?page=Inbox");
    }

    #[test]
    fn link_encodes_reserved_characters() {
        let links = LinkBuilder::new("Logseq");
        assert_eq!(
            links.page_link("a/b?c&d=e#f"),
            "logseq://graph/Logseq?page=a%2Fb%3Fc%26d%3De%23f"
        );
        assert_eq!(
            links.page_link("日记"),
            "logseq://graph/Logseq?page=%E6%97%A5%E8%AE%B0"
        );
    }

    #[test]
    fn tag_items_use_raw_tag_and_fresh_uids() {
        let tags = vec!["urgent".to_string(), "work".to_string()];
        let first = projector().project_tags(&tags);
        let second = projector().project_tags(&tags);
        assert_eq!(first.items.len(), 2);
        assert_eq!(first.items[0].title, "urgent");
        assert_eq!(first.items[0].arg, "urgent");
        assert_eq!(first.items[0].subtitle, "");
        assert_ne!(first.items[0].uid, first.items[1].uid);
        assert_ne!(first.items[0].uid, second.items[0].uid);
    }

    #[test]
    fn empty_results_serialize_as_empty_items() {
        let json = projector().project_pages(&[]).to_json().unwrap();
        assert_eq!(json, "{\n  \"items\": []\n}");
    }

    #[test]
    fn json_shape_matches_launcher_format() {
        let json = projector().project_pages(&[page(3, "Home")]).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let item = &value["items"][0];
        for key in ["uid", "title", "subtitle", "arg", "icon"] {
            assert!(item[key].is_string(), "{key} missing in {item}");
        }
    }
}
