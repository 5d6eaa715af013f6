// tests/mapping.rs
//! Mapping real-shaped wire documents into domain objects and back.

mod common;

use common::{block_json, database_json, page_json, DATABASE_ID, PAGE_ID};
use notionmap::{
    BlockContent, Color, Icon, KeyBy, Mapper, NotionError, Parent, Property, PropertyKind,
    PropertyValue, SchemaConfig,
};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_database_fixture_maps_every_column() {
    let database = Mapper::new().map_to_database(&database_json()).unwrap();

    assert_eq!(database.id, DATABASE_ID);
    assert_eq!(database.title(), "Team Tasks");
    assert_eq!(database.description(), "");
    assert_eq!(
        database.parent,
        Some(Parent::Page("98ad959b-2b6a-4774-80ee-00246fb0ea9b".to_string()))
    );
    assert!(matches!(&database.icon, Some(Icon::Emoji(_))));
    assert!(!database.has_transport());

    assert_eq!(
        database.properties.names(),
        vec![
            "Name", "Status", "Tags", "Priority", "Estimate", "Due", "Done", "Created", "Effort"
        ]
    );

    let effort = database.properties.get("Effort").unwrap();
    assert_eq!(effort.kind(), PropertyKind::Unsupported);
    assert_eq!(
        effort.config,
        SchemaConfig::Unsupported {
            kind: "rollup".to_string()
        }
    );

    let status = database.properties.get("Status").unwrap();
    match &status.config {
        SchemaConfig::Status { options, groups } => {
            assert_eq!(options.len(), 3);
            assert_eq!(groups[2].name, "Complete");
            assert_eq!(groups[2].option_ids, vec!["s3".to_string()]);
        }
        other => panic!("expected a status column, got {:?}", other),
    }
}

#[test]
fn test_lookup_by_name_and_id_is_the_same_property() {
    let database = Mapper::new().map_to_database(&database_json()).unwrap();

    let by_id = database.properties.get("7").unwrap();
    let by_name = database.properties.get("Estimate").unwrap();
    assert!(std::ptr::eq(by_id, by_name));

    assert!(matches!(
        database.properties.get("Missing"),
        Err(NotionError::PropertyNotFound(_))
    ));
}

#[test]
fn test_original_ids_snapshot_matches_schema() {
    let database = Mapper::new().map_to_database(&database_json()).unwrap();
    assert_eq!(database.original_property_ids().len(), 9);
    assert!(database.original_property_ids().contains("%40Q%5BM"));
}

#[test]
fn test_database_create_payload() {
    let database = Mapper::new().map_to_database(&database_json()).unwrap();
    let annotations = json!({
        "bold": false, "italic": false, "strikethrough": false,
        "underline": false, "code": false, "color": "default"
    });

    assert_eq!(
        database.serialize().unwrap(),
        json!({
            "is_inline": false,
            "archived": false,
            "properties": {
                "Tags": {
                    "multi_select": {"options": [
                        {"name": "backend", "color": "purple"},
                        {"name": "frontend", "color": "pink"}
                    ]},
                    "name": "Tags"
                },
                "Priority": {
                    "select": {"options": [
                        {"name": "High", "color": "red"},
                        {"name": "Low", "color": "gray"}
                    ]},
                    "name": "Priority"
                },
                "Estimate": {"number": {"format": "number"}, "name": "Estimate"},
                "Due": {"date": {}, "name": "Due"},
                "Done": {"checkbox": {}, "name": "Done"},
                "Name": {"title": {}, "name": "Name"}
            },
            "parent": {"type": "page_id", "page_id": "98ad959b-2b6a-4774-80ee-00246fb0ea9b"},
            "icon": {"type": "emoji", "emoji": "✅"},
            "cover": {"type": "external", "external": {"url": "https://images.example.com/cover.png"}},
            "title": [{"type": "text", "text": {"content": "Team Tasks"}, "annotations": annotations}],
            "description": []
        })
    );
}

#[test]
fn test_id_keyed_payload_addresses_persisted_columns_by_id() {
    let database = Mapper::new().map_to_database(&database_json()).unwrap();
    let payload = database.serialize_keyed(KeyBy::Id).unwrap();
    let properties = payload["properties"].as_object().unwrap();

    assert!(properties.contains_key("7"));
    assert!(properties.contains_key("title"));
    assert!(!properties.contains_key("Estimate"));
    assert_eq!(properties["title"], json!({"title": {}, "name": "Name"}));
}

#[test]
fn test_page_names_recovered_from_owning_database() {
    let mapper = Mapper::new();
    let database = mapper.map_to_database(&database_json()).unwrap();
    let page = mapper.map_to_page(&page_json(), Some(&database)).unwrap();

    assert_eq!(page.id, PAGE_ID);
    assert_eq!(page.database_id(), Some(DATABASE_ID));
    assert_eq!(page.title(), "Ship the codec");
    assert!(page.rich_title[0].annotations.bold);

    let priority = page.properties.get("Priority").unwrap();
    match &priority.value {
        PropertyValue::Select(Some(option)) => {
            assert_eq!(option.name, "High");
            assert_eq!(option.color, Color::Red);
        }
        other => panic!("expected a select value, got {:?}", other),
    }
    assert_eq!(
        page.properties.get("Estimate").unwrap().value,
        PropertyValue::Number(Some(3.0))
    );
    assert_eq!(
        page.properties.get("Effort").unwrap().value,
        PropertyValue::Unsupported {
            kind: "rollup".to_string()
        }
    );
}

#[test]
fn test_page_without_owner_keeps_names_empty() {
    let page = Mapper::new().map_to_page(&page_json(), None).unwrap();

    assert_eq!(page.title(), "Ship the codec");
    assert!(page.properties.names().iter().all(|name| name.is_empty()));
    assert_eq!(page.properties.get("title").unwrap().kind(), PropertyKind::Title);
}

#[test]
fn test_page_payload_skips_server_owned_values() {
    let mapper = Mapper::new();
    let database = mapper.map_to_database(&database_json()).unwrap();
    let page = mapper.map_to_page(&page_json(), Some(&database)).unwrap();

    let payload = page.serialize().unwrap();
    let properties = payload["properties"].as_object().unwrap();

    assert!(!properties.contains_key("Created"));
    assert!(!properties.contains_key("Effort"));
    assert_eq!(properties["Estimate"], json!({"number": 3.0}));
    assert_eq!(properties["Priority"], json!({"select": {"name": "High"}}));
    assert_eq!(properties["Tags"], json!({"multi_select": [{"name": "backend"}]}));
    assert_eq!(properties["Done"], json!({"checkbox": false}));
    assert_eq!(
        properties["Due"],
        json!({"date": {"start": "2024-06-01", "end": null, "time_zone": null}})
    );
    assert_eq!(properties["Name"]["title"].as_array().unwrap().len(), 2);
    assert_eq!(
        payload["parent"],
        json!({"type": "database_id", "database_id": DATABASE_ID})
    );
}

#[test]
fn test_block_fixture() {
    let block = Mapper::new().map_to_block(&block_json()).unwrap();

    assert_eq!(block.plain_text(), "Write the fixtures");
    assert!(!block.has_children);
    assert!(matches!(block.content, BlockContent::ToDo { checked: true, .. }));
    assert_eq!(block.parent, Some(Parent::Page(PAGE_ID.to_string())));
}

#[test]
fn test_missing_required_keys_are_malformed() {
    let mut raw = page_json();
    raw.as_object_mut().unwrap().remove("parent");

    match Mapper::new().map_to_page(&raw, None) {
        Err(NotionError::MalformedResponse(message)) => assert!(message.contains("parent")),
        other => panic!("expected a malformed response, got {:?}", other),
    }

    let mut raw = database_json();
    raw.as_object_mut().unwrap().remove("title");
    assert!(matches!(
        Mapper::new().map_to_database(&raw),
        Err(NotionError::MalformedResponse(_))
    ));
}
