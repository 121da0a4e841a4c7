use super::{
    map_str_fields_mut, track_action_error, Action, AddFields, Disposition, DropEvent, DropFields, IncludeFields,
    Rename, EVENTS_DROPPED, EVENTS_PROCESSED,
};
use crate::error::ActionError;
use crate::model::Event;
use crate::settings::ActionSettings;

pub const ACTION_LABEL: &str = "chain";

/// Field that receives the failure message when an action in the chain fails.
pub const ERROR_MESSAGE_FIELD: &str = "error.message";

/// Ordered actions applied to each event. Processing stops at the first action that drops the
/// event or fails.
#[derive(Debug, Default)]
pub struct ActionChain {
    pub actions: Vec<Box<dyn Action>>,
}

impl ActionChain {
    #[tracing::instrument(level = "debug", skip(settings))]
    pub fn from_settings(settings: &[ActionSettings]) -> Result<Self, ActionError> {
        let mut chain = Self::default();
        for s in settings {
            chain = match s {
                ActionSettings::AddFields(s) => chain.add_action(AddFields::from_settings(s)?),
                ActionSettings::DropFields(s) => chain.add_action(DropFields::from_settings(s)?),
                ActionSettings::IncludeFields(s) => chain.add_action(IncludeFields::from_settings(s)),
                ActionSettings::Rename(s) => chain.add_action(Rename::from_settings(s)),
                ActionSettings::DropEvent => chain.add_action(DropEvent),
            };
        }

        tracing::info!(actions=?chain.names(), "action chain assembled.");
        Ok(chain)
    }

    pub fn add_action(mut self, action: impl Action + 'static) -> Self {
        self.actions.push(Box::new(action));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.actions.iter().map(|a| a.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    fn annotate_failure(event: &mut Event, error: &ActionError) {
        if let Ok(fields) = map_str_fields_mut(event) {
            if let Err(err) = fields.put(ERROR_MESSAGE_FIELD, error.to_string()) {
                tracing::warn!(error=?err, "unable to annotate event with action failure");
            }
        }
    }
}

impl Action for ActionChain {
    fn name(&self) -> &'static str {
        ACTION_LABEL
    }

    /// On failure the event is annotated with the failure message under `error.message`, when its
    /// fields are a map, and the error is returned.
    fn run(&self, event: &mut Event) -> Result<Disposition, ActionError> {
        for action in self.actions.iter() {
            let span = tracing::debug_span!("actions::chain", action=%action.name());
            let outcome = span.in_scope(|| action.run(event));

            match outcome {
                Ok(Disposition::Keep) => {},
                Ok(Disposition::Drop) => {
                    tracing::debug!(action=%action.name(), "event dropped");
                    EVENTS_DROPPED.with_label_values(&[action.name()]).inc();
                    return Ok(Disposition::Drop);
                },
                Err(err) => {
                    tracing::error!(error=?err, action=%action.name(), "action failed to process event");
                    track_action_error(action.name(), &err);
                    Self::annotate_failure(event, &err);
                    return Err(err);
                },
            }
        }

        EVENTS_PROCESSED.inc();
        Ok(Disposition::Keep)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use claim::*;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::actions::{map_str_fields, RenamePair, ACTION_ERRORS};
    use crate::error::MetricLabel;
    use crate::model::{FieldValue, MapStr};

    fn event() -> Event {
        let mut fields = MapStr::new();
        assert_ok!(fields.put("tablespace", "USERS"));
        assert_ok!(fields.put("debug.trace", "..."));
        Event::from_map(Utc::now(), fields)
    }

    fn extras() -> MapStr {
        let mut extras = MapStr::new();
        assert_ok!(extras.put("env", "staging"));
        extras
    }

    #[test]
    fn test_chain_runs_in_order() {
        let chain = ActionChain::default()
            .add_action(Rename::new(vec![RenamePair::new("tablespace", "name")], false, true))
            .add_action(assert_ok!(DropFields::new(&["debug".to_string()], false)))
            .add_action(assert_ok!(AddFields::new("labels", extras(), true)));
        assert_eq!(chain.names(), vec!["rename", "drop_fields", "add_fields"]);

        let mut actual = event();
        assert_eq!(assert_ok!(chain.run(&mut actual)), Disposition::Keep);
        let fields = assert_ok!(map_str_fields(&actual));
        assert_eq!(
            fields.to_string(),
            r#"{"labels":{"env":"staging"},"name":"USERS"}"#
        );
    }

    #[test]
    fn test_chain_stops_at_drop() {
        let chain = ActionChain::default()
            .add_action(DropEvent)
            .add_action(assert_ok!(AddFields::new("labels", extras(), true)));

        let mut actual = event();
        assert_eq!(assert_ok!(chain.run(&mut actual)), Disposition::Drop);
        assert!(!assert_ok!(map_str_fields(&actual)).has_key("labels"));
    }

    #[test]
    fn test_chain_failure_annotates_event() {
        let chain = ActionChain::default()
            .add_action(Rename::new(vec![RenamePair::new("missing", "name")], false, true))
            .add_action(assert_ok!(AddFields::new("labels", extras(), true)));

        let before = ACTION_ERRORS
            .with_label_values(&["rename", "action::fields::key_not_found"])
            .get();

        let mut actual = event();
        let err = assert_err!(chain.run(&mut actual));
        assert_eq!(err.label().as_ref(), "action::fields::key_not_found");

        let fields = assert_ok!(map_str_fields(&actual));
        assert_eq!(
            assert_ok!(fields.get_value(ERROR_MESSAGE_FIELD)),
            &FieldValue::from("key not found: missing")
        );
        assert!(!fields.has_key("labels"));

        let after = ACTION_ERRORS
            .with_label_values(&["rename", "action::fields::key_not_found"])
            .get();
        assert!(before < after);
    }

    #[test]
    fn test_chain_with_non_map_fields() {
        let chain = ActionChain::default().add_action(IncludeFields::new(vec!["name"]));
        let mut actual = Event::new(Utc::now(), 17_i64);
        let err = assert_err!(chain.run(&mut actual));
        assert_eq!(err.to_string(), "MapStr required, but got integer");
        assert_eq!(actual.fields, FieldValue::Integer(17));
    }
}
