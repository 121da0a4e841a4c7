use super::{map_str_fields_mut, Action, Disposition};
use crate::error::ActionError;
use crate::model::{Event, MapStr};
use crate::settings::AddFieldsSettings;

pub const ACTION_LABEL: &str = "add_fields";

/// Merges a fixed set of fields into each event, under `target` or at the root when `target` is
/// empty.
#[derive(Debug, Clone, PartialEq)]
pub struct AddFields {
    additions: MapStr,
    overwrite: bool,
}

impl AddFields {
    pub fn new(target: &str, fields: MapStr, overwrite: bool) -> Result<Self, ActionError> {
        let additions = if target.is_empty() {
            fields
        } else {
            let mut wrapped = MapStr::new();
            wrapped.put(target, fields)?;
            wrapped
        };

        Ok(Self { additions, overwrite })
    }

    pub fn from_settings(settings: &AddFieldsSettings) -> Result<Self, ActionError> {
        Self::new(settings.target.as_str(), settings.fields.clone(), settings.overwrite)
    }
}

impl Action for AddFields {
    fn name(&self) -> &'static str {
        ACTION_LABEL
    }

    #[tracing::instrument(level = "trace", name = "AddFields::run", skip(self, event))]
    fn run(&self, event: &mut Event) -> Result<Disposition, ActionError> {
        let fields = map_str_fields_mut(event)?;
        if self.overwrite {
            fields.deep_update(self.additions.clone());
        } else {
            fields.deep_update_no_overwrite(self.additions.clone());
        }

        Ok(Disposition::Keep)
    }
}
