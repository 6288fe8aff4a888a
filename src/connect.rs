//! Connector entry point.
//!
//! Registers the connect behavior on the host framework and wires each
//! connecting component instance: one immediate update at initialization, a
//! store subscription released at teardown, and a manual-refresh event.

use std::rc::Rc;

use crate::dispatch::DispatchMapper;
use crate::error::ConnectError;
use crate::guard::ensure_not_connected;
use crate::host::{ComponentRef, HostFramework, LifecycleHooks};
use crate::options::{ConnectOptions, GlobalOptions, InstanceConfig, StateProjector};
use crate::store::Store;
use crate::update::{make_update_fn, UpdateFn};
use crate::value::Value;

/// What a component instance hands the behavior when it connects.
pub struct ConnectRequest {
    /// Projection from store state into render options. Absent means the
    /// connection never subscribes to the store.
    pub projector: Option<StateProjector>,
    /// Dispatch mapper in its dynamic form: a map of action creators, a
    /// factory function, or [`Value::Null`] for none.
    pub mapper: Value,
    /// Per-connection overrides.
    pub options: ConnectOptions,
}

impl ConnectRequest {
    /// A request with no projector, no mapper, and default options.
    pub fn empty() -> Self {
        Self {
            projector: None,
            mapper: Value::Null,
            options: ConnectOptions::default(),
        }
    }
}

/// The behavior function installed on the host framework's registry.
pub type Behavior = Rc<dyn Fn(&ComponentRef, ConnectRequest) -> Result<(), ConnectError>>;

/// Handle returned by [`register_connect_behavior`].
///
/// Names the installed behavior and can connect an instance directly, for
/// embedders (and tests) that bypass the host registry.
pub struct ConnectBehavior {
    name: String,
    behavior: Behavior,
}

impl ConnectBehavior {
    /// The name the behavior was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Connect a component instance through this behavior.
    pub fn connect(
        &self,
        component: &ComponentRef,
        request: ConnectRequest,
    ) -> Result<(), ConnectError> {
        (self.behavior)(component, request)
    }
}

/// Register the connect behavior on `host`, bound to `store`.
///
/// Every component instance that later invokes the behavior gets its own
/// resolved configuration and update function; the store itself is shared
/// across all of them.
pub fn register_connect_behavior(
    host: &dyn HostFramework,
    store: Rc<dyn Store>,
    options: GlobalOptions,
) -> ConnectBehavior {
    let global = Rc::new(options);
    let name = global.behavior_name.clone();

    let behavior: Behavior = {
        let global = global.clone();
        let name = name.clone();
        Rc::new(move |component: &ComponentRef, request: ConnectRequest| {
            ensure_not_connected(component, &name)?;

            let mapper = DispatchMapper::from_value(&request.mapper)?;
            let config = InstanceConfig::resolve(
                &global,
                request.options,
                store.clone(),
                request.projector,
                mapper,
                component.clone(),
            );
            let update = make_update_fn(config.clone());

            wire_lifecycle(config, update, global.teardown_event_name.clone());
            tracing::debug!(behavior = %name, "component connected");
            Ok(())
        })
    };

    host.register_behavior(&name, behavior.clone());
    tracing::debug!(behavior = %name, "connect behavior registered");
    ConnectBehavior { name, behavior }
}

/// Install the init hook that runs the first update and wires the store
/// subscription, teardown release, and manual-refresh event.
///
/// Everything happens inside the init hook so the first update (and its
/// subscription) lands at component initialization, before first paint, not
/// at connect time.
fn wire_lifecycle(config: Rc<InstanceConfig>, update: UpdateFn, teardown_event: String) {
    let component = config.component.clone();
    component.extend(LifecycleHooks {
        on_init: Some(Box::new(move || {
            update()?;

            if config.projector.is_some() {
                let listener = update.clone();
                let unsubscribe = Rc::new(config.store.subscribe(Rc::new(move || {
                    run_reporting(&listener, "store change");
                })));
                config.component.on(
                    &teardown_event,
                    Rc::new(move || {
                        unsubscribe.release();
                        tracing::debug!("store subscription released");
                    }),
                );
            }

            let refresher = update.clone();
            config.component.on(
                &config.refresh_event_name,
                Rc::new(move || {
                    run_reporting(&refresher, "manual refresh");
                }),
            );
            Ok(())
        })),
    });
}

/// Run the update inside a host-driven callback, where nothing can catch an
/// error; contract violations are reported instead of unwinding through the
/// host's dispatch loop.
fn run_reporting(update: &UpdateFn, trigger: &str) {
    if let Err(err) = update() {
        tracing::error!(%err, trigger, "derived-state recomputation failed");
    }
}
