#![forbid(unsafe_code)]
#![warn(
    clippy::cargo,
    clippy::suspicious,
    // missing_docs,
    clippy::nursery,
    rust_2018_idioms
)]

pub mod actions;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod metricsets;
pub mod model;
pub mod settings;

pub use actions::{map_str_fields, map_str_fields_mut};
pub use error::{ActionError, FieldsError, MetricLabel, SettingsError};
pub use model::{Event, FieldType, FieldValue, MapStr};

pub type Result<T> = anyhow::Result<T>;

pub type SharedString = std::borrow::Cow<'static, str>;
