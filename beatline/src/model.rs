use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod map_str;
mod value;

pub use map_str::MapStr;
pub use value::{FieldType, FieldValue};

/// A monitoring event record.
///
/// `fields` is a tagged [`FieldValue`] rather than a map so that events ingested from external
/// documents keep whatever shape they arrived with; [`crate::actions::map_str_fields`] narrows it
/// to a [`MapStr`] for field-level work. Events built in-process via [`Event::from_map`] are
/// correct by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "@timestamp")]
    pub timestamp: DateTime<Utc>,

    #[serde(rename = "@metadata", default, skip_serializing_if = "MapStr::is_empty")]
    pub meta: MapStr,

    #[serde(default)]
    pub fields: FieldValue,
}

impl Event {
    pub fn new(timestamp: DateTime<Utc>, fields: impl Into<FieldValue>) -> Self {
        Self { timestamp, meta: MapStr::default(), fields: fields.into() }
    }

    pub fn from_map(timestamp: DateTime<Utc>, fields: MapStr) -> Self {
        Self::new(timestamp, FieldValue::Map(fields))
    }

    pub fn with_meta(self, meta: MapStr) -> Self {
        Self { meta, ..self }
    }

    #[tracing::instrument(level = "trace", skip(rep))]
    pub fn from_json(rep: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(rep)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
