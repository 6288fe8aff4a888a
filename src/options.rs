//! Configuration surface.
//!
//! `GlobalOptions` is resolved once per behavior registration;
//! `ConnectOptions` overrides it per connection. The two merge with the
//! instance references into an `InstanceConfig` that stays immutable for the
//! lifetime of the connection.

use std::rc::Rc;

use crate::dispatch::{AutoGuardOptions, DispatchFn, DispatchMapper};
use crate::host::ComponentRef;
use crate::memo::{MethodsCache, SingleSlotCache};
use crate::store::Store;
use crate::value::{MapRef, OptMap, Value};

/// Projects global store state (plus the component instance) into a flat
/// option mapping. Must return a [`Value::Map`].
pub type StateProjector = Rc<dyn Fn(&Value, &ComponentRef) -> Value>;

/// Merges newly computed options and methods into the component's observable
/// render state.
pub type UpdateCallback = Rc<dyn Fn(&ComponentRef, &OptMap, &MapRef)>;

/// Options resolved once per behavior registration.
pub struct GlobalOptions {
    /// Name the behavior is registered under on the host framework.
    pub behavior_name: String,
    /// Render-update callback used when a connection does not override it.
    pub on_update: UpdateCallback,
    /// Option name the implicit dispatch function is injected under when a
    /// connection supplies no dispatch mapper.
    pub implicit_dispatch_opt_name: String,
    /// Component event that forces a recomputation outside of store changes.
    pub refresh_event_name: String,
    /// Component event on which the store subscription is released.
    pub teardown_event_name: String,
    /// Disable the auto-guard heuristic for every connection.
    pub disable_prevent_update: bool,
    /// Memoizer override for built dispatch-method mappings. Shared by every
    /// connection of this registration; when absent, each connection gets its
    /// own [`SingleSlotCache`].
    pub methods_cache: Option<Rc<dyn MethodsCache>>,
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self {
            behavior_name: "reduxConnect".to_string(),
            on_update: Rc::new(default_on_update),
            implicit_dispatch_opt_name: "dispatch".to_string(),
            refresh_event_name: "redux-sync".to_string(),
            teardown_event_name: "before-unmount".to_string(),
            disable_prevent_update: false,
            methods_cache: None,
        }
    }
}

/// Per-connection overrides, all optional.
#[derive(Default)]
pub struct ConnectOptions {
    pub on_update: Option<UpdateCallback>,
    pub implicit_dispatch_opt_name: Option<String>,
    pub refresh_event_name: Option<String>,
    pub disable_prevent_update: Option<bool>,
    /// Method names exempted from the auto-guard heuristic.
    pub disable_prevent_update_for: Vec<String>,
}

/// The resolved configuration for one connection. Immutable after creation;
/// in particular the store reference never changes.
pub(crate) struct InstanceConfig {
    pub store: Rc<dyn Store>,
    pub projector: Option<StateProjector>,
    pub mapper: Option<DispatchMapper>,
    pub component: ComponentRef,
    pub on_update: UpdateCallback,
    pub implicit_dispatch_opt_name: String,
    pub refresh_event_name: String,
    pub guard: Rc<AutoGuardOptions>,
    pub cache: Rc<dyn MethodsCache>,
    /// Dispatch bound to the store, built once so its identity is stable for
    /// the whole connection.
    pub dispatch: DispatchFn,
}

impl InstanceConfig {
    pub(crate) fn resolve(
        global: &GlobalOptions,
        local: ConnectOptions,
        store: Rc<dyn Store>,
        projector: Option<StateProjector>,
        mapper: Option<DispatchMapper>,
        component: ComponentRef,
    ) -> Rc<Self> {
        let dispatch: DispatchFn = {
            let store = store.clone();
            Rc::new(move |action| store.dispatch(action))
        };
        let cache = global
            .methods_cache
            .clone()
            .unwrap_or_else(|| Rc::new(SingleSlotCache::new()));
        let guard = Rc::new(AutoGuardOptions {
            disable_prevent_update: local
                .disable_prevent_update
                .unwrap_or(global.disable_prevent_update),
            disable_prevent_update_for: local.disable_prevent_update_for,
        });
        Rc::new(Self {
            store,
            projector,
            mapper,
            component,
            on_update: local.on_update.unwrap_or_else(|| global.on_update.clone()),
            implicit_dispatch_opt_name: local
                .implicit_dispatch_opt_name
                .unwrap_or_else(|| global.implicit_dispatch_opt_name.clone()),
            refresh_event_name: local
                .refresh_event_name
                .unwrap_or_else(|| global.refresh_event_name.clone()),
            guard,
            cache,
            dispatch,
        })
    }
}

/// Default render-update delivery: one flat patch of state options plus
/// dispatch methods, applied through the render-update primitive once the
/// component is mounted, by direct assignment before that.
fn default_on_update(component: &ComponentRef, state_opts: &OptMap, methods: &MapRef) {
    let mut patch = state_opts.clone();
    for (name, method) in methods.borrow().iter() {
        patch.insert(name.clone(), method.clone());
    }
    if component.is_mounted() {
        component.apply_update(patch);
    } else {
        component.assign(patch);
    }
}
