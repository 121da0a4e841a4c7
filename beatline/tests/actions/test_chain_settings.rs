use beatline::actions::{Action, ActionChain, Disposition};
use beatline::metricsets::oracle::tablespace::{DATA_FILE_NAME, NAME, SPACE_USED_BYTES};
use beatline::settings::{ActionSettings, Settings};
use beatline::{map_str_fields, ActionError, FieldValue, MetricLabel, SettingsError};
use claim::*;
use config::{Config, FileFormat};
use once_cell::sync::Lazy;
use pretty_assertions::assert_eq;

use super::fixtures::*;

const CHAIN_RON: &str = r#"[
    rename((
        fields: [ (from: "name", to: "tablespace") ],
    )),
    drop_fields((
        fields: [ "/^data_file\\.size\\./", "data_file.name" ],
    )),
    add_fields((
        target: "service",
        fields: { "type": "oracle" },
    )),
]"#;

#[test]
fn test_chain_from_ron_settings() {
    Lazy::force(&beatline::logging::TEST_TRACING);

    let settings: Vec<ActionSettings> = assert_ok!(ron::from_str(CHAIN_RON));
    let chain = assert_ok!(ActionChain::from_settings(&settings));
    assert_eq!(chain.names(), vec!["rename", "drop_fields", "add_fields"]);

    let mut event = make_tablespace("USERS", 4, 5_242_880, 3_407_872).into_event(*DT_1);
    assert_eq!(assert_ok!(chain.run(&mut event)), Disposition::Keep);

    let fields = assert_ok!(map_str_fields(&event));
    assert!(!fields.has_key(NAME));
    assert!(!fields.has_key(DATA_FILE_NAME));
    assert!(!fields.has_key("data_file.size.bytes"));
    assert_eq!(assert_ok!(fields.get_value("tablespace")), &FieldValue::from("USERS"));
    assert_eq!(assert_ok!(fields.get_value("service.type")), &FieldValue::from("oracle"));
    assert_eq!(assert_ok!(fields.get_value(SPACE_USED_BYTES)), &FieldValue::Integer(1_835_008));
}

#[test]
fn test_chain_from_loaded_settings() {
    Lazy::force(&beatline::logging::TEST_TRACING);

    let rep = r#"
actions:
  - include_fields:
      fields: [name, space]
  - drop_event
modules:
  - module: oracle
    period: 1m
    metricsets: [tablespace]
"#;
    let config = assert_ok!(Config::builder()
        .add_source(config::File::from_str(rep, FileFormat::Yaml))
        .build());
    let settings = assert_ok!(Settings::from_config(config));
    let chain = assert_ok!(ActionChain::from_settings(&settings.actions));
    assert_eq!(chain.len(), 2);

    let mut event = make_tablespace("SYSTEM", 1, 1_024, 0).into_event(*DT_1);
    assert_eq!(assert_ok!(chain.run(&mut event)), Disposition::Drop);
    assert_eq!(
        assert_ok!(map_str_fields(&event)).keys().cloned().collect::<Vec<_>>(),
        vec!["name".to_string(), "space".to_string()]
    );
}

#[test]
fn test_invalid_pattern_rejected_when_building_chain() {
    Lazy::force(&beatline::logging::TEST_TRACING);

    let settings: Vec<ActionSettings> = assert_ok!(ron::from_str(r#"[ drop_fields(( fields: ["/([a-z/"] )) ]"#));
    let err = assert_err!(ActionChain::from_settings(&settings));
    assert_matches!(err, ActionError::InvalidPattern { .. });

    let err = SettingsError::from(err);
    assert_eq!(err.label().as_ref(), "settings::action::invalid_pattern");
}
