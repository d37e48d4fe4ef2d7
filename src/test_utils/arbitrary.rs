use proptest::prelude::*;
use serde_json::{Map, Value};

use crate::model::{Page, Properties, TAGS_PROPERTY};
use crate::test_utils::fixtures::uuid_for;

/// Scalars that survive a JSON round trip unchanged (no floats).
pub fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-z0-9 _-]{0,12}".prop_map(Value::String),
        any::<i32>().prop_map(Value::from),
        any::<bool>().prop_map(Value::Bool),
        Just(Value::Null),
    ]
}

pub fn arb_json() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

/// A `tags` value: usually an array of scalars, sometimes something else.
pub fn arb_tags_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => prop::collection::vec(arb_scalar(), 0..5).prop_map(Value::Array),
        1 => arb_scalar(),
        1 => prop::collection::btree_map("[a-z]{1,6}", arb_scalar(), 0..3)
            .prop_map(|map| Value::Object(map.into_iter().collect())),
    ]
}

pub fn arb_properties() -> impl Strategy<Value = Option<Properties>> {
    let map = (
        prop::option::of(arb_tags_value()),
        prop::collection::btree_map("[a-s]{1,8}", arb_json(), 0..4),
    )
        .prop_map(|(tags, extra)| {
            let mut properties: Properties = Map::new();
            properties.extend(extra);
            if let Some(tags) = tags {
                properties.insert(TAGS_PROPERTY.to_string(), tags);
            }
            properties
        });
    prop::option::of(map)
}

/// Pages with distinct ids 1..=n.
pub fn arb_pages() -> impl Strategy<Value = Vec<Page>> {
    prop::collection::vec(
        ("[A-Za-z][A-Za-z ]{0,15}", any::<bool>(), arb_properties()),
        0..8,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .zip(1_i64..)
            .map(|((name, journal, properties), id)| Page {
                id,
                created_at: id * 1_000,
                updated_at: id * 2_000,
                uuid: uuid_for(id),
                journal,
                original_name: name,
                properties,
                tags: String::new(),
            })
            .collect()
    })
}
