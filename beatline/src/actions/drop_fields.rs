use std::fmt;

use itertools::Itertools;
use regex::Regex;

use super::{map_str_fields_mut, Action, Disposition};
use crate::error::{ActionError, FieldsError};
use crate::model::{Event, MapStr};
use crate::settings::DropFieldsSettings;

pub const ACTION_LABEL: &str = "drop_fields";

/// A field selector: either a dotted key, or a `/regex/` matched against flattened keys.
#[derive(Clone)]
pub enum FieldMatcher {
    Key(String),
    Pattern(Regex),
}

impl FieldMatcher {
    pub fn parse(rep: &str) -> Result<Self, ActionError> {
        match rep.strip_prefix('/').and_then(|r| r.strip_suffix('/')) {
            Some(pattern) => Regex::new(pattern)
                .map(Self::Pattern)
                .map_err(|source| ActionError::InvalidPattern { pattern: rep.to_string(), source }),
            _ => Ok(Self::Key(rep.to_string())),
        }
    }

    const fn is_pattern(&self) -> bool {
        matches!(self, Self::Pattern(_))
    }

    fn matching_keys(&self, fields: &MapStr) -> Vec<String> {
        match self {
            Self::Key(key) => vec![key.clone()],
            Self::Pattern(regex) => fields
                .flatten()
                .into_iter()
                .map(|(k, _)| k)
                .filter(|k| regex.is_match(k))
                .collect(),
        }
    }
}

impl fmt::Debug for FieldMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "Key({key})"),
            Self::Pattern(regex) => write!(f, "Pattern(/{}/)", regex.as_str()),
        }
    }
}

impl PartialEq for FieldMatcher {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Key(lhs), Self::Key(rhs)) => lhs == rhs,
            (Self::Pattern(lhs), Self::Pattern(rhs)) => lhs.as_str() == rhs.as_str(),
            _ => false,
        }
    }
}

/// Removes the selected fields. Every selector is attempted; the first failure, if any, is
/// returned after all have run.
#[derive(Debug, Clone, PartialEq)]
pub struct DropFields {
    matchers: Vec<FieldMatcher>,
    ignore_missing: bool,
}

impl DropFields {
    pub fn new(fields: &[String], ignore_missing: bool) -> Result<Self, ActionError> {
        let matchers = fields
            .iter()
            .map(|f| FieldMatcher::parse(f))
            .collect::<Result<Vec<_>, ActionError>>()?;
        Ok(Self { matchers, ignore_missing })
    }

    pub fn from_settings(settings: &DropFieldsSettings) -> Result<Self, ActionError> {
        Self::new(&settings.fields, settings.ignore_missing)
    }
}

impl Action for DropFields {
    fn name(&self) -> &'static str {
        ACTION_LABEL
    }

    #[tracing::instrument(level = "trace", name = "DropFields::run", skip(self, event))]
    fn run(&self, event: &mut Event) -> Result<Disposition, ActionError> {
        let fields = map_str_fields_mut(event)?;

        // a key selected by more than one matcher is deleted once
        let selected: Vec<(String, bool)> = self
            .matchers
            .iter()
            .flat_map(|m| {
                let by_pattern = m.is_pattern();
                m.matching_keys(fields).into_iter().map(move |k| (k, by_pattern))
            })
            .unique_by(|(k, _)| k.clone())
            .collect();
        tracing::trace!(selected=%selected.iter().map(|(k, _)| k).join(", "), "dropping fields");

        let mut first_error = None;
        for (key, by_pattern) in selected {
            match fields.delete(key.as_str()) {
                Ok(_) => {},
                Err(FieldsError::KeyNotFound(_)) if by_pattern || self.ignore_missing => {},
                Err(err) => {
                    tracing::debug!(error=%err, %key, "failed to drop field");
                    first_error.get_or_insert(err);
                },
            }
        }

        match first_error {
            None => Ok(Disposition::Keep),
            Some(err) => Err(err.into()),
        }
    }
}
