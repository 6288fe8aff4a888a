//! Binds components of a behavior-based view framework to a redux-style
//! store.
//!
//! A connected component declares a projection from global state into its
//! render options and a mapping from action creators to dispatching methods;
//! this crate decides when a store change actually requires a re-render.
//!
//! # Architecture
//!
//! ```text
//! store change ──→ update fn ──→ project state ──→ diff ──→ render update
//!      ↑                              │
//!      └──────── dispatch method ←────┘
//! ```
//!
//! - **Store**: external single-state tree (`get_state`/`dispatch`/`subscribe`)
//! - **Projection**: flat option mapping recomputed on every trigger
//! - **Dispatch methods**: wrapper closures, memoized by mapper identity
//! - **Diff**: shallow equality on options, reference equality on methods
//!
//! Registration installs one named behavior on the host framework; each
//! component instance that invokes it gets its own configuration, update
//! function, subscription, and manual-refresh event.

pub mod connect;
pub mod dispatch;
pub mod error;
pub mod guard;
pub mod host;
pub mod memo;
pub mod options;
pub mod store;
mod update;
pub mod value;

pub use connect::{register_connect_behavior, Behavior, ConnectBehavior, ConnectRequest};
pub use dispatch::{DispatchFn, DispatchMapper, PREVENT_DEFAULT_MEMBER, PREVENT_UPDATE_MARKER};
pub use error::ConnectError;
pub use guard::{ensure_not_connected, expect_map};
pub use host::{Component, ComponentRef, EventHandler, HostFramework, LifecycleHooks};
pub use memo::{IdentityMemo, MethodsCache, SingleSlotCache};
pub use options::{ConnectOptions, GlobalOptions, StateProjector, UpdateCallback};
pub use store::{Listener, Store, Unsubscribe};
pub use value::{is_shallow_equal, FuncRef, MapRef, OptMap, Value};
