//! Loading schemas from Table Schema JSON.

use pretty_assertions::assert_eq;
use serde_json::json;
use tableschema_core::{ConstraintKind, Schema, SchemaError};

const PEOPLE: &str = r#"{
    "fields": [
        {"name": "id", "type": "integer", "constraints": {"required": true, "unique": true}},
        {"name": "height", "type": "number", "decimalChar": ",", "groupChar": "."},
        {"name": "born", "type": "date", "format": "%d/%m/%Y"},
        {"name": "active", "type": "boolean", "trueValues": ["yes"], "falseValues": ["no"]},
        {"name": "status", "constraints": {"enum": ["new", "done"], "maxLength": 4}}
    ]
}"#;

#[test]
fn test_load_people_schema() {
    let schema = Schema::from_json_str(PEOPLE).unwrap();

    assert_eq!(schema.len(), 5);
    assert_eq!(
        schema.headers(),
        vec!["id", "height", "born", "active", "status"]
    );
    assert_eq!(schema.required_headers(), vec!["id"]);
}

#[test]
fn test_field_options() {
    let schema = Schema::from_json_str(PEOPLE).unwrap();

    let height = schema.field("height").unwrap();
    assert_eq!(height.decimal_char.as_deref(), Some(","));
    assert_eq!(height.group_char.as_deref(), Some("."));

    let born = schema.field("born").unwrap();
    assert_eq!(born.format, "%d/%m/%Y");

    let active = schema.field("active").unwrap();
    assert_eq!(active.true_values, Some(vec!["yes".to_string()]));
}

#[test]
fn test_defaults_applied() {
    let schema = Schema::from_json_str(PEOPLE).unwrap();
    let status = schema.field("status").unwrap();

    assert_eq!(status.field_type, "string");
    assert_eq!(status.format, "default");
    assert_eq!(
        status.constraints.declared(),
        vec![ConstraintKind::Enum, ConstraintKind::MaxLength]
    );
    assert_eq!(
        status.constraints.allowed_values,
        Some(vec![json!("new"), json!("done")])
    );
    assert_eq!(schema.missing_values().len(), 9);
}

#[test]
fn test_unique_flag() {
    let schema = Schema::from_json_str(PEOPLE).unwrap();

    assert!(schema.field("id").unwrap().is_unique());
    assert!(!schema.field("height").unwrap().is_unique());
}

#[test]
fn test_duplicate_field_rejected() {
    let result = Schema::from_json_str(
        r#"{"fields": [{"name": "a"}, {"name": "a", "type": "integer"}]}"#,
    );

    assert!(matches!(result, Err(SchemaError::DuplicateField(name)) if name == "a"));
}

#[test]
fn test_empty_fields_rejected() {
    assert!(matches!(
        Schema::from_json_str(r#"{"fields": []}"#),
        Err(SchemaError::NoFields)
    ));
}

#[test]
fn test_malformed_json() {
    assert!(matches!(
        Schema::from_json_str("{not json"),
        Err(SchemaError::Serialization(_))
    ));
}
