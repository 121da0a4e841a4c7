use serde::{Deserialize, Serialize};

use super::{map_str_fields_mut, Action, Disposition};
use crate::error::{ActionError, FieldsError};
use crate::model::{Event, MapStr};
use crate::settings::RenameSettings;

pub const ACTION_LABEL: &str = "rename";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamePair {
    pub from: String,
    pub to: String,
}

impl RenamePair {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self { from: from.into(), to: to.into() }
    }
}

/// Moves field values to new keys, in order.
///
/// With `fail_on_error` the first failure restores the event's fields to their state before the
/// action ran and is returned; otherwise failures are logged and the remaining pairs still apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    fields: Vec<RenamePair>,
    ignore_missing: bool,
    fail_on_error: bool,
}

impl Rename {
    pub const fn new(fields: Vec<RenamePair>, ignore_missing: bool, fail_on_error: bool) -> Self {
        Self { fields, ignore_missing, fail_on_error }
    }

    pub fn from_settings(settings: &RenameSettings) -> Self {
        Self::new(settings.fields.clone(), settings.ignore_missing, settings.fail_on_error)
    }

    fn rename_field(&self, fields: &mut MapStr, pair: &RenamePair) -> Result<(), FieldsError> {
        if !fields.has_key(&pair.from) {
            return if self.ignore_missing {
                Ok(())
            } else {
                Err(FieldsError::KeyNotFound(pair.from.clone()))
            };
        }

        if fields.has_key(&pair.to) {
            return Err(FieldsError::KeyExists(pair.to.clone()));
        }

        let value = fields.delete(&pair.from)?;
        if let Err(err) = fields.put(&pair.to, value.clone()) {
            fields.put(&pair.from, value)?;
            return Err(err);
        }

        Ok(())
    }
}

impl Action for Rename {
    fn name(&self) -> &'static str {
        ACTION_LABEL
    }

    #[tracing::instrument(level = "trace", name = "Rename::run", skip(self, event))]
    fn run(&self, event: &mut Event) -> Result<Disposition, ActionError> {
        let fields = map_str_fields_mut(event)?;
        let backup = self.fail_on_error.then(|| fields.clone());

        for pair in self.fields.iter() {
            if let Err(err) = self.rename_field(fields, pair) {
                if let Some(backup) = backup {
                    *fields = backup;
                    return Err(err.into());
                }

                tracing::warn!(error=%err, from=%pair.from, to=%pair.to, "failed to rename field - skipping");
            }
        }

        Ok(Disposition::Keep)
    }
}
