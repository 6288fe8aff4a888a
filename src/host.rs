//! Host-framework boundary.
//!
//! The markup engine, event binding, and rendering all belong to the host
//! framework; this crate only needs a behavior registry plus a small
//! per-instance surface: lifecycle extension, event subscription, a
//! render-update primitive, and the write-once connection flag.

use std::rc::Rc;

use crate::connect::Behavior;
use crate::error::ConnectError;
use crate::value::OptMap;

/// A shared handle to a component instance.
pub type ComponentRef = Rc<dyn Component>;

/// A component-instance event handler.
pub type EventHandler = Rc<dyn Fn()>;

/// The hook bundle installed through [`Component::extend`].
///
/// Only initialization is needed here; teardown rides on a lifecycle event
/// instead (see the connector).
#[derive(Default)]
pub struct LifecycleHooks {
    /// Runs once when the component initializes, before first paint. An error
    /// means the component fails to initialize; no partial render is
    /// produced.
    pub on_init: Option<Box<dyn FnOnce() -> Result<(), ConnectError>>>,
}

/// The behavior-registration surface of the host framework.
pub trait HostFramework {
    /// Install a named reusable behavior that component instances can invoke.
    fn register_behavior(&self, name: &str, behavior: Behavior);
}

/// The per-instance surface this crate drives.
pub trait Component {
    /// Install lifecycle hooks on this instance.
    fn extend(&self, hooks: LifecycleHooks);

    /// Subscribe a handler to a named instance event.
    fn on(&self, event: &str, handler: EventHandler);

    /// Whether the instance has been mounted.
    fn is_mounted(&self) -> bool;

    /// Merge a patch into the instance's render state and schedule a
    /// re-render. Only valid once mounted.
    fn apply_update(&self, patch: OptMap);

    /// Merge a patch by direct assignment, without scheduling a re-render.
    /// Used before first mount.
    fn assign(&self, patch: OptMap);

    /// Whether the connect behavior has already run on this instance.
    fn is_connected(&self) -> bool;

    /// Set the write-once connection flag. Never cleared.
    fn mark_connected(&self);
}
