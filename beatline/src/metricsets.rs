use std::time::Duration;

use crate::error::{FieldsError, SettingsError};
use crate::model::MapStr;
use crate::settings::format_period;

pub mod aws;
pub mod oracle;

/// The documented set of dotted field keys a metricset emits.
pub trait FieldTaxonomy {
    const NAME: &'static str;

    fn fields() -> &'static [&'static str];

    /// Checks that every flattened key of `fields` belongs to the taxonomy. Missing keys are not
    /// an error here.
    fn conforms(fields: &MapStr) -> Result<(), FieldsError> {
        let known = Self::fields();
        match fields.flatten().into_iter().find(|(k, _)| !known.contains(&k.as_str())) {
            None => Ok(()),
            Some((unknown, _)) => Err(FieldsError::UnknownField(unknown, Self::NAME)),
        }
    }
}

pub(crate) fn check_period(period: Duration) -> Result<(), SettingsError> {
    if period.is_zero() {
        return Err(SettingsError::InvalidPeriod(format_period(period)));
    }
    Ok(())
}

/// A module needs at least one metricset, and only ones it supports.
pub(crate) fn check_metricsets(module: &str, supported: &[&str], configured: &[String]) -> Result<(), SettingsError> {
    if let Some(unknown) = configured.iter().find(|m| !supported.contains(&m.as_str())) {
        return Err(SettingsError::UnknownMetricSet {
            module: module.to_string(),
            metricset: unknown.clone(),
        });
    }

    if configured.is_empty() {
        return Err(SettingsError::MissingMetricSet {
            module: module.to_string(),
            metricset: supported.join(", "),
        });
    }

    Ok(())
}
