use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use super::MapStr;
use crate::error::FieldsError;

/// Runtime classification of a [`FieldValue`]. The display form is the type name reported in
/// field errors.
#[derive(Debug, Display, EnumIter, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    #[strum(serialize = "null")]
    Null,
    #[strum(serialize = "bool")]
    Boolean,
    #[strum(serialize = "integer")]
    Integer,
    #[strum(serialize = "float")]
    Float,
    #[strum(serialize = "string")]
    Text,
    #[strum(serialize = "list")]
    Seq,
    #[strum(serialize = "MapStr")]
    Map,
}

/// Value held in an event field. Serialized untagged, so the JSON form of an event field is the
/// plain JSON value.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Seq(Vec<FieldValue>),
    Map(MapStr),
}

impl FieldValue {
    pub const fn field_type(&self) -> FieldType {
        match self {
            Self::Null => FieldType::Null,
            Self::Boolean(_) => FieldType::Boolean,
            Self::Integer(_) => FieldType::Integer,
            Self::Float(_) => FieldType::Float,
            Self::Text(_) => FieldType::Text,
            Self::Seq(_) => FieldType::Seq,
            Self::Map(_) => FieldType::Map,
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_map(&self) -> Result<&MapStr, FieldsError> {
        match self {
            Self::Map(map) => Ok(map),
            other => Err(FieldsError::type_mismatch(FieldType::Map, other.field_type())),
        }
    }

    pub fn as_map_mut(&mut self) -> Result<&mut MapStr, FieldsError> {
        match self {
            Self::Map(map) => Ok(map),
            other => Err(FieldsError::type_mismatch(FieldType::Map, other.field_type())),
        }
    }

    pub fn as_str(&self) -> Result<&str, FieldsError> {
        match self {
            Self::Text(s) => Ok(s.as_str()),
            other => Err(FieldsError::type_mismatch(FieldType::Text, other.field_type())),
        }
    }

    pub fn as_i64(&self) -> Result<i64, FieldsError> {
        match self {
            Self::Integer(i) => Ok(*i),
            other => Err(FieldsError::type_mismatch(FieldType::Integer, other.field_type())),
        }
    }

    /// Integers widen to floats; nothing else converts.
    pub fn as_f64(&self) -> Result<f64, FieldsError> {
        match self {
            Self::Float(f) => Ok(*f),
            #[allow(clippy::cast_precision_loss)]
            Self::Integer(i) => Ok(*i as f64),
            other => Err(FieldsError::type_mismatch(FieldType::Float, other.field_type())),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Seq(_) | Self::Map(_) => {
                let rep = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                write!(f, "{rep}")
            },
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<MapStr> for FieldValue {
    fn from(value: MapStr) -> Self {
        Self::Map(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        Self::Seq(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
