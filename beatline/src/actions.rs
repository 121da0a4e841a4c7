use std::fmt::Debug;

use once_cell::sync::Lazy;
use prometheus::{IntCounter, IntCounterVec, Opts};

use crate::error::{ActionError, FieldsError, MetricLabel};
use crate::model::{Event, MapStr};

mod add_fields;
mod chain;
mod drop_event;
mod drop_fields;
mod include_fields;
mod rename;

pub use add_fields::AddFields;
pub use chain::ActionChain;
pub use drop_event::DropEvent;
pub use drop_fields::{DropFields, FieldMatcher};
pub use include_fields::IncludeFields;
pub use rename::{Rename, RenamePair};

/// Narrows the event's field container to its field map.
///
/// Returns the event's own map, untouched. Fails with [`FieldsError::TypeMismatch`] naming the
/// observed type when the container holds anything else.
pub fn map_str_fields(event: &Event) -> Result<&MapStr, FieldsError> {
    event.fields.as_map()
}

/// Mutable counterpart of [`map_str_fields`], used by actions that edit fields in place.
pub fn map_str_fields_mut(event: &mut Event) -> Result<&mut MapStr, FieldsError> {
    event.fields.as_map_mut()
}

/// Whether an event continues down the chain after an action has run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Disposition {
    Keep,
    Drop,
}

/// A step applied to each event.
///
/// On error the event remains with the caller; actions that support it leave the event as it was
/// before the action ran.
pub trait Action: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn run(&self, event: &mut Event) -> Result<Disposition, ActionError>;
}

pub static EVENTS_PROCESSED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "beatline_events_processed",
        "Number of events passed through the action chain",
    )
    .expect("failed creating beatline_events_processed metric")
});

pub static EVENTS_DROPPED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("beatline_events_dropped", "Number of events dropped by an action"),
        &["action"],
    )
    .expect("failed creating beatline_events_dropped metric")
});

pub static ACTION_ERRORS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("beatline_action_errors", "Number of events an action failed to process"),
        &["action", "error_type"],
    )
    .expect("failed creating beatline_action_errors metric")
});

#[inline]
pub(crate) fn track_action_error<E: MetricLabel>(action: &str, error: &E) {
    ACTION_ERRORS.with_label_values(&[action, error.label().as_ref()]).inc()
}
