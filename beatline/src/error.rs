use either::{Either, Left, Right};
use thiserror::Error;

use crate::model::FieldType;
use crate::SharedString;

/// Produces a stable, hierarchical label for an error, suitable for use as a metric label value.
pub trait MetricLabel {
    fn slug(&self) -> SharedString;

    fn next(&self) -> Either<SharedString, Box<&dyn MetricLabel>>;

    fn label(&self) -> SharedString {
        match self.next() {
            Left(leaf) => format!("{}::{}", self.slug(), leaf).into(),
            Right(inner) => format!("{}::{}", self.slug(), inner.label()).into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldsError {
    #[error("{expected} required, but got {actual}")]
    TypeMismatch { expected: FieldType, actual: FieldType },

    #[error("key not found: {0}")]
    KeyNotFound(String),

    #[error("target field {0} already exists, drop or rename this field first")]
    KeyExists(String),

    #[error("cannot traverse `{key}`: expected MapStr at `{segment}` but got {actual}")]
    PathConflict { key: String, segment: String, actual: FieldType },

    #[error("field {0} is not part of the {1} taxonomy")]
    UnknownField(String, &'static str),

    #[error("invalid value for field {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

impl FieldsError {
    pub const fn type_mismatch(expected: FieldType, actual: FieldType) -> Self {
        Self::TypeMismatch { expected, actual }
    }
}

impl MetricLabel for FieldsError {
    fn slug(&self) -> SharedString {
        "fields".into()
    }

    fn next(&self) -> Either<SharedString, Box<&dyn MetricLabel>> {
        match self {
            Self::TypeMismatch { .. } => Left("type_mismatch".into()),
            Self::KeyNotFound(_) => Left("key_not_found".into()),
            Self::KeyExists(_) => Left("key_exists".into()),
            Self::PathConflict { .. } => Left("path_conflict".into()),
            Self::UnknownField(..) => Left("unknown_field".into()),
            Self::InvalidValue { .. } => Left("invalid_value".into()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("{0}")]
    Fields(#[from] FieldsError),

    #[error("invalid field pattern {pattern}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl MetricLabel for ActionError {
    fn slug(&self) -> SharedString {
        "action".into()
    }

    fn next(&self) -> Either<SharedString, Box<&dyn MetricLabel>> {
        match self {
            Self::Fields(err) => Right(Box::new(err)),
            Self::InvalidPattern { .. } => Left("invalid_pattern".into()),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid period `{0}`: expected a duration such as \"60s\", \"5m\" or \"500ms\"")]
    InvalidPeriod(String),

    #[error("metricset {metricset} is not supported by the {module} module")]
    UnknownMetricSet { module: String, metricset: String },

    #[error("module {module} requires the {metricset} metricset")]
    MissingMetricSet { module: String, metricset: String },

    #[error("credentials require both access_key_id and secret_access_key")]
    IncompleteCredentials,

    #[error("{0}")]
    Action(#[from] ActionError),
}

const CONFIG_LABEL: &str = "config";

impl MetricLabel for SettingsError {
    fn slug(&self) -> SharedString {
        SharedString::Borrowed("settings")
    }

    fn next(&self) -> Either<SharedString, Box<&dyn MetricLabel>> {
        match self {
            Self::Config(_) => Left(CONFIG_LABEL.into()),
            Self::InvalidPeriod(_) => Left("period".into()),
            Self::UnknownMetricSet { .. } => Left("unknown_metricset".into()),
            Self::MissingMetricSet { .. } => Left("metricset".into()),
            Self::IncompleteCredentials => Left("credentials".into()),
            Self::Action(err) => Right(Box::new(err)),
        }
    }
}
