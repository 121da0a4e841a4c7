use serde::{Deserialize, Serialize};

use crate::actions::RenamePair;
use crate::model::MapStr;

/// One configured step of the action chain, keyed by action name; e.g., in YAML:
/// `- add_fields: { target: labels, fields: { env: production } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionSettings {
    AddFields(AddFieldsSettings),
    DropFields(DropFieldsSettings),
    IncludeFields(IncludeFieldsSettings),
    Rename(RenameSettings),
    DropEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddFieldsSettings {
    /// Dotted key under which the fields are merged. An empty target merges at the root. Defaults
    /// to "fields".
    #[serde(default = "AddFieldsSettings::default_target")]
    pub target: String,

    pub fields: MapStr,

    /// Whether added fields replace existing values. Defaults to true.
    #[serde(default = "default_true")]
    pub overwrite: bool,
}

impl AddFieldsSettings {
    pub fn default_target() -> String {
        "fields".to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropFieldsSettings {
    /// Dotted keys or `/regex/` patterns matched against flattened keys.
    pub fields: Vec<String>,

    #[serde(default)]
    pub ignore_missing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeFieldsSettings {
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameSettings {
    pub fields: Vec<RenamePair>,

    #[serde(default)]
    pub ignore_missing: bool,

    /// When set, the first failed rename reverts the event's fields and fails the event. Defaults
    /// to true.
    #[serde(default = "default_true")]
    pub fail_on_error: bool,
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use claim::*;
    use pretty_assertions::assert_eq;
    use serde_test::{assert_de_tokens, Token};

    use super::*;

    #[test]
    fn test_action_settings_defaults() {
        let actual: Vec<ActionSettings> = assert_ok!(serde_json::from_str(
            r##"[
                { "add_fields": { "fields": { "env": "production" } } },
                { "rename": { "fields": [ { "from": "tablespace", "to": "name" } ] } },
                { "drop_fields": { "fields": ["/^debug\\./", "host.ip"] } },
                "drop_event"
            ]"##
        ));

        let mut fields = MapStr::new();
        assert_ok!(fields.put("env", "production"));

        assert_eq!(
            actual,
            vec![
                ActionSettings::AddFields(AddFieldsSettings {
                    target: "fields".to_string(),
                    fields,
                    overwrite: true
                }),
                ActionSettings::Rename(RenameSettings {
                    fields: vec![RenamePair::new("tablespace", "name")],
                    ignore_missing: false,
                    fail_on_error: true,
                }),
                ActionSettings::DropFields(DropFieldsSettings {
                    fields: vec!["/^debug\\./".to_string(), "host.ip".to_string()],
                    ignore_missing: false,
                }),
                ActionSettings::DropEvent,
            ]
        );
    }

    #[test]
    fn test_include_fields_tokens() {
        let settings = ActionSettings::IncludeFields(IncludeFieldsSettings {
            fields: vec!["name".to_string(), "space".to_string()],
        });

        assert_de_tokens(
            &settings,
            &[
                Token::NewtypeVariant { name: "ActionSettings", variant: "include_fields" },
                Token::Struct { name: "IncludeFieldsSettings", len: 1 },
                Token::Str("fields"),
                Token::Seq { len: Some(2) },
                Token::Str("name"),
                Token::Str("space"),
                Token::SeqEnd,
                Token::StructEnd,
            ],
        );
    }
}
