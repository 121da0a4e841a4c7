use super::{map_str_fields_mut, Action, Disposition};
use crate::error::ActionError;
use crate::model::{Event, MapStr};
use crate::settings::IncludeFieldsSettings;

pub const ACTION_LABEL: &str = "include_fields";

/// Keeps only the listed dotted keys; listed keys absent from the event are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeFields {
    fields: Vec<String>,
}

impl IncludeFields {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { fields: fields.into_iter().map(Into::into).collect() }
    }

    pub fn from_settings(settings: &IncludeFieldsSettings) -> Self {
        Self::new(settings.fields.iter().cloned())
    }
}

impl Action for IncludeFields {
    fn name(&self) -> &'static str {
        ACTION_LABEL
    }

    #[tracing::instrument(level = "trace", name = "IncludeFields::run", skip(self, event))]
    fn run(&self, event: &mut Event) -> Result<Disposition, ActionError> {
        let fields = map_str_fields_mut(event)?;

        let mut kept = MapStr::new();
        for key in self.fields.iter() {
            if let Ok(value) = fields.get_value(key) {
                kept.put(key, value.clone())?;
            }
        }

        *fields = kept;
        Ok(Disposition::Keep)
    }
}
