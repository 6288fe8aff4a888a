//! Shared test fixtures: an in-memory store, a scriptable component, and a
//! host-framework registry.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Once;

use redux_connect::{
    Behavior, Component, ComponentRef, ConnectError, ConnectRequest, EventHandler, HostFramework,
    LifecycleHooks, Listener, OptMap, Store, Unsubscribe, Value,
};

/// Reducer-driven single-state-tree store with synchronous notification.
///
/// Thunk-style actions are supported the redux-thunk way: dispatching a
/// function invokes it and returns its result unchanged instead of reducing.
pub struct MemoryStore {
    state: RefCell<Value>,
    reducer: Box<dyn Fn(&Value, &Value) -> Value>,
    listeners: Rc<RefCell<Vec<(u64, Listener)>>>,
    next_listener_id: Cell<u64>,
    dispatched: RefCell<Vec<Value>>,
}

impl MemoryStore {
    pub fn new(initial: Value, reducer: impl Fn(&Value, &Value) -> Value + 'static) -> Rc<Self> {
        Rc::new(Self {
            state: RefCell::new(initial),
            reducer: Box::new(reducer),
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_listener_id: Cell::new(0),
            dispatched: RefCell::new(Vec::new()),
        })
    }

    /// A store whose reducer replaces the whole state with the action.
    pub fn replacing(initial: Value) -> Rc<Self> {
        Self::new(initial, |_, action| action.clone())
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn dispatched_actions(&self) -> Vec<Value> {
        self.dispatched.borrow().clone()
    }
}

impl Store for MemoryStore {
    fn get_state(&self) -> Value {
        self.state.borrow().clone()
    }

    fn dispatch(&self, action: Value) -> Value {
        if let Value::Func(thunk) = &action {
            return thunk(&[]);
        }
        self.dispatched.borrow_mut().push(action.clone());
        let next = (self.reducer)(&self.state.borrow(), &action);
        *self.state.borrow_mut() = next;
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener();
        }
        action
    }

    fn subscribe(&self, listener: Listener) -> Unsubscribe {
        let id = self.next_listener_id.get();
        self.next_listener_id.set(id + 1);
        self.listeners.borrow_mut().push((id, listener));
        let listeners = self.listeners.clone();
        Unsubscribe::new(move || {
            listeners.borrow_mut().retain(|(i, _)| *i != id);
        })
    }
}

/// A component instance with scriptable lifecycle: `initialize` runs the
/// installed init hooks, `mount` flips the mounted flag, `emit` fires an
/// instance event.
#[derive(Default)]
pub struct TestComponent {
    mounted: Cell<bool>,
    connected: Cell<bool>,
    render_state: RefCell<OptMap>,
    render_updates: Cell<u32>,
    handlers: RefCell<HashMap<String, Vec<EventHandler>>>,
    init_hooks: RefCell<Vec<Box<dyn FnOnce() -> Result<(), ConnectError>>>>,
}

impl TestComponent {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Run pending init hooks, the way the host framework would at component
    /// initialization.
    pub fn initialize(&self) -> Result<(), ConnectError> {
        let hooks: Vec<_> = self.init_hooks.borrow_mut().drain(..).collect();
        for hook in hooks {
            hook()?;
        }
        Ok(())
    }

    pub fn mount(&self) {
        self.mounted.set(true);
    }

    /// Fire an instance event.
    pub fn emit(&self, event: &str) {
        let handlers: Vec<EventHandler> = self
            .handlers
            .borrow()
            .get(event)
            .cloned()
            .unwrap_or_default();
        for handler in handlers {
            handler();
        }
    }

    /// A render-state option by name.
    pub fn opt(&self, name: &str) -> Option<Value> {
        self.render_state.borrow().get(name).cloned()
    }

    /// How many render updates (patch deliveries) this instance received.
    pub fn render_updates(&self) -> u32 {
        self.render_updates.get()
    }
}

impl Component for TestComponent {
    fn extend(&self, hooks: LifecycleHooks) {
        if let Some(on_init) = hooks.on_init {
            self.init_hooks.borrow_mut().push(on_init);
        }
    }

    fn on(&self, event: &str, handler: EventHandler) {
        self.handlers
            .borrow_mut()
            .entry(event.to_string())
            .or_default()
            .push(handler);
    }

    fn is_mounted(&self) -> bool {
        self.mounted.get()
    }

    fn apply_update(&self, patch: OptMap) {
        self.render_state.borrow_mut().extend(patch);
        self.render_updates.set(self.render_updates.get() + 1);
    }

    fn assign(&self, patch: OptMap) {
        self.render_state.borrow_mut().extend(patch);
        self.render_updates.set(self.render_updates.get() + 1);
    }

    fn is_connected(&self) -> bool {
        self.connected.get()
    }

    fn mark_connected(&self) {
        self.connected.set(true);
    }
}

/// Opt-in log output while debugging tests: `RUST_LOG=trace cargo test -- --nocapture`.
/// Installed once per test binary.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A host framework that just keeps a behavior registry.
#[derive(Default)]
pub struct TestHost {
    behaviors: RefCell<HashMap<String, Behavior>>,
}

impl TestHost {
    pub fn new() -> Self {
        init_tracing();
        Self::default()
    }

    pub fn has_behavior(&self, name: &str) -> bool {
        self.behaviors.borrow().contains_key(name)
    }

    /// Invoke a registered behavior on an instance, the way a component
    /// declaration would.
    pub fn invoke(
        &self,
        name: &str,
        component: &ComponentRef,
        request: ConnectRequest,
    ) -> Result<(), ConnectError> {
        let behavior = self
            .behaviors
            .borrow()
            .get(name)
            .cloned()
            .expect("behavior not registered");
        behavior(component, request)
    }
}

impl HostFramework for TestHost {
    fn register_behavior(&self, name: &str, behavior: Behavior) {
        self.behaviors
            .borrow_mut()
            .insert(name.to_string(), behavior);
    }
}

/// Build a map value from string entries.
pub fn state_of(entries: &[(&str, &str)]) -> Value {
    Value::map(
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), Value::str(*v))),
    )
}

/// Coerce a concrete test component into the trait-object handle.
pub fn as_component(component: &Rc<TestComponent>) -> ComponentRef {
    component.clone()
}
