//! Contract guards shared by the connector and the update orchestrator.

use crate::error::ConnectError;
use crate::host::ComponentRef;
use crate::value::{MapRef, Value};

/// Validate that a projector or factory returned a map of options.
///
/// `context` names the offending callback in the error message.
pub fn expect_map(context: &'static str, value: Value) -> Result<MapRef, ConnectError> {
    match value {
        Value::Map(map) => Ok(map),
        other => Err(ConnectError::InvalidReturnType {
            context,
            actual: other.type_name(),
        }),
    }
}

/// Fail if the component already carries the connection flag; set it
/// otherwise.
///
/// This is a one-time guard against wiring the same instance twice, not a
/// concurrency primitive. The flag is write-once and lives for the component's
/// lifetime.
pub fn ensure_not_connected(
    component: &ComponentRef,
    behavior: &str,
) -> Result<(), ConnectError> {
    if component.is_connected() {
        return Err(ConnectError::AlreadyConnected {
            behavior: behavior.to_string(),
        });
    }
    component.mark_connected();
    Ok(())
}
