use beatline::actions::{Action, ActionChain, AddFields, Disposition, Rename, RenamePair};
use beatline::metricsets::oracle::tablespace::{DATA_FILE_STATUS, SPACE_FREE_BYTES};
use beatline::metricsets::oracle::{Tablespace, TABLESPACE_FIELDS};
use beatline::metricsets::FieldTaxonomy;
use beatline::{map_str_fields, Event, FieldValue, FieldsError, MapStr};
use claim::*;
use once_cell::sync::Lazy;
use pretty_assertions::assert_eq;

use super::fixtures::*;

#[test]
fn test_tablespace_event_round_trip_through_json() {
    Lazy::force(&beatline::logging::TEST_TRACING);

    let expected = make_tablespace("SYSAUX", 3, 1_048_576_000, 62_914_560);
    let event = expected.clone().into_event(*DT_1);
    let rep = assert_ok!(event.to_json());

    let ingested = assert_ok!(Event::from_json(&rep));
    assert_eq!(ingested, event);

    let fields = assert_ok!(map_str_fields(&ingested));
    assert_ok!(Tablespace::conforms(fields));
    assert_eq!(fields.flatten().len(), TABLESPACE_FIELDS.len());
    assert_eq!(assert_ok!(Tablespace::try_from(fields)), expected);
}

#[test]
fn test_failed_rename_restores_tablespace_event() {
    Lazy::force(&beatline::logging::TEST_TRACING);

    let labels: MapStr = maplit::btreemap! { "env".to_string() => FieldValue::from("staging") }.into();
    let chain = ActionChain::default()
        .add_action(Rename::new(
            vec![
                RenamePair::new(SPACE_FREE_BYTES, "space.available.bytes"),
                RenamePair::new("missing", DATA_FILE_STATUS),
            ],
            false,
            true,
        ))
        .add_action(assert_ok!(AddFields::new("labels", labels, true)));

    let original = make_tablespace("USERS", 4, 5_242_880, 3_407_872).into_event(*DT_1);
    let mut event = original.clone();
    let err = assert_err!(chain.run(&mut event));
    assert_eq!(err.to_string(), "key not found: missing");

    let fields = assert_ok!(map_str_fields(&event));
    let mut expected = assert_ok!(map_str_fields(&original)).clone();
    assert_ok!(expected.put("error.message", "key not found: missing"));
    assert_eq!(fields, &expected);

    let taxonomy_err = assert_err!(Tablespace::conforms(fields));
    assert_eq!(
        taxonomy_err,
        FieldsError::UnknownField("error.message".to_string(), "oracle.tablespace")
    );
}

#[test]
fn test_lenient_rename_keeps_partial_progress() {
    Lazy::force(&beatline::logging::TEST_TRACING);

    let action = Rename::new(
        vec![
            RenamePair::new(SPACE_FREE_BYTES, "space.available.bytes"),
            RenamePair::new("missing", "elsewhere"),
        ],
        true,
        false,
    );

    let mut event = make_tablespace("USERS", 4, 5_242_880, 3_407_872).into_event(*DT_1);
    assert_eq!(assert_ok!(action.run(&mut event)), Disposition::Keep);

    let fields = assert_ok!(map_str_fields(&event));
    assert!(!fields.has_key(SPACE_FREE_BYTES));
    assert_eq!(
        assert_ok!(fields.get_value("space.available.bytes")),
        &FieldValue::Integer(3_407_872)
    );
    assert!(!fields.has_key("elsewhere"));
}
