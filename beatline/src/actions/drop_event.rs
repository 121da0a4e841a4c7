use super::{Action, Disposition};
use crate::error::ActionError;
use crate::model::Event;

pub const ACTION_LABEL: &str = "drop_event";

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct DropEvent;

impl Action for DropEvent {
    fn name(&self) -> &'static str {
        ACTION_LABEL
    }

    fn run(&self, event: &mut Event) -> Result<Disposition, ActionError> {
        tracing::trace!(timestamp=%event.timestamp, "dropping event");
        Ok(Disposition::Drop)
    }
}
