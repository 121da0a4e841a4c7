use std::ptr;

use beatline::{map_str_fields, Event, FieldValue, FieldsError};
use claim::*;
use once_cell::sync::Lazy;
use pretty_assertions::assert_eq;

use super::fixtures::*;

#[test]
fn test_map_fields_scenario() {
    Lazy::force(&beatline::logging::TEST_TRACING);
    let event = make_host_event("db1");

    let fields = assert_ok!(map_str_fields(&event));
    assert_eq!(fields.to_string(), r#"{"host":"db1"}"#);
    assert!(ptr::eq(fields, assert_ok!(event.fields.as_map())));
}

#[test]
fn test_non_map_fields_scenarios() {
    Lazy::force(&beatline::logging::TEST_TRACING);

    for (fields, expected) in [
        (FieldValue::from("not-a-map"), "MapStr required, but got string"),
        (FieldValue::Null, "MapStr required, but got null"),
        (FieldValue::from(3.5), "MapStr required, but got float"),
        (FieldValue::from(vec!["a", "b"]), "MapStr required, but got list"),
        (FieldValue::from(true), "MapStr required, but got bool"),
    ] {
        let event = Event::new(*DT_1, fields);
        let err = assert_err!(map_str_fields(&event));
        assert_matches!(err, FieldsError::TypeMismatch { .. });
        assert_eq!(err.to_string(), expected);
    }
}

#[test]
fn test_json_ingested_fields_checked() {
    Lazy::force(&beatline::logging::TEST_TRACING);

    let rep = format!(r#"{{"@timestamp":"{}","fields":"not-a-map"}}"#, *DT_1_STR);
    let event = assert_ok!(Event::from_json(&rep));
    assert_eq!(
        assert_err!(map_str_fields(&event)).to_string(),
        "MapStr required, but got string"
    );

    let rep = format!(r#"{{"@timestamp":"{}"}}"#, *DT_1_STR);
    let event = assert_ok!(Event::from_json(&rep));
    assert_eq!(
        assert_err!(map_str_fields(&event)).to_string(),
        "MapStr required, but got null"
    );
}
