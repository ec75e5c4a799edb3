//! Integration tests for loading schema documents from disk.

mod common;

use std::io::Write;

use schema_to_sql::prelude::*;

const PREVIOUS: &str = r#"{
  "models": [
    {
      "id": "m-users",
      "name": "users",
      "attributes": [
        { "id": 1, "name": "id", "type": "auto-generated" },
        { "id": 2, "name": "weddingDate", "type": "date", "defaultValue": null }
      ]
    }
  ]
}"#;

const CURRENT: &str = r#"{
  "models": [
    {
      "id": "m-users",
      "name": "users",
      "attributes": [
        { "id": 1, "name": "id", "type": "auto-generated" },
        { "id": 3, "name": "email", "type": "string", "isRequired": true, "isUnique": true, "max": 320 },
        { "id": 4, "name": "score", "type": "integer", "defaultValue": 10 }
      ]
    }
  ]
}"#;

fn write_document(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn load_documents_and_diff() {
    let previous_file = write_document(PREVIOUS);
    let current_file = write_document(CURRENT);

    let previous = Schema::from_path(previous_file.path()).unwrap();
    let current = Schema::from_path(current_file.path()).unwrap();

    let kinds: Vec<&str> = diff(&previous, &current).iter().map(SchemaOperation::kind).collect();
    assert_eq!(
        kinds,
        vec![
            "attribute-dropped",
            "attribute-added",
            "attribute-added",
            "unique-constraints-changed",
        ]
    );

    let sql = common::generate("pg", &current, Some(&previous));
    assert!(sql.starts_with("ALTER TABLE \"users\" DROP COLUMN \"weddingDate\";"));
    assert!(sql.contains("ADD COLUMN   \"email\" VARCHAR(320) NOT NULL  ;"));
    assert!(sql.contains("ADD COLUMN   \"score\" INTEGER DEFAULT 10  ;"));
}

#[test]
fn flags_default_to_false() {
    let schema = Schema::from_json(PREVIOUS).unwrap();
    let wedding = schema.models[0].get_attribute("weddingDate").unwrap();
    assert!(!wedding.is_required);
    assert!(!wedding.is_unique);
    assert!(wedding.default_value.is_none());
}

#[test]
fn unknown_type_loads_but_fails_to_render() {
    let json = r#"{"models":[{"id":1,"name":"shapes","attributes":[{"id":1,"name":"outline","type":"polygon"}]}]}"#;
    let schema = Schema::from_json(json).unwrap();
    assert!(matches!(
        generate_ddl(&["redshift"], &schema, None),
        Err(DdlError::UnsupportedType { .. })
    ));
}

#[test]
fn malformed_document_is_a_serialization_error() {
    assert!(matches!(
        Schema::from_json(r#"{"models": {}}"#),
        Err(DdlError::Serialization(_))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Schema::from_path(dir.path().join("absent.json")),
        Err(DdlError::Io(_))
    ));
}

#[test]
fn operations_serialize_with_type_and_params() {
    let previous = Schema::from_json(PREVIOUS).unwrap();
    let mut current = previous.clone();
    current.models[0].name = "people".to_string();

    let ops = diff(&previous, &current);
    let json = serde_json::to_value(&ops).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "type": "model-name-changed",
            "params": { "previousName": "users", "currentName": "people" }
        }])
    );
}
