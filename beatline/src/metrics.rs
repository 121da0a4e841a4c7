use prometheus::Registry;

use crate::actions;
use crate::Result;

#[tracing::instrument(level = "trace")]
pub fn register_metrics(registry: &Registry) -> Result<()> {
    registry.register(Box::new(actions::EVENTS_PROCESSED.clone()))?;
    registry.register(Box::new(actions::EVENTS_DROPPED.clone()))?;
    registry.register(Box::new(actions::ACTION_ERRORS.clone()))?;
    Ok(())
}
