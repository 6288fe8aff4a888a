//! Store boundary.
//!
//! The store is external and shared: many connections read it through
//! [`Store::get_state`] and write to it only through [`Store::dispatch`].
//! Subscription callbacks run synchronously inside the store's own notify
//! loop, one at a time, in subscription order.

use std::cell::RefCell;
use std::rc::Rc;

use crate::value::Value;

/// A store-change listener.
pub type Listener = Rc<dyn Fn()>;

/// The external single-state-tree store.
pub trait Store {
    /// Snapshot of the current state tree.
    fn get_state(&self) -> Value;

    /// Dispatch an action. The return value is passed through to whoever
    /// triggered the dispatch (thunk-style actions rely on this).
    fn dispatch(&self, action: Value) -> Value;

    /// Subscribe a listener to state changes. The returned handle releases
    /// the subscription.
    fn subscribe(&self, listener: Listener) -> Unsubscribe;
}

/// A one-shot subscription release handle.
///
/// [`release`](Unsubscribe::release) is idempotent: the underlying
/// unsubscribe action runs at most once, on the first call.
pub struct Unsubscribe {
    action: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl Unsubscribe {
    pub fn new(action: impl FnOnce() + 'static) -> Self {
        Self {
            action: RefCell::new(Some(Box::new(action))),
        }
    }

    /// Release the subscription. A no-op after the first call.
    pub fn release(&self) {
        if let Some(action) = self.action.borrow_mut().take() {
            action();
        }
    }
}
