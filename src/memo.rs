//! Identity-keyed memoization for dispatch-method mappings.
//!
//! Rebuilding wrapper closures for an unchanged mapper on every store change
//! would defeat the orchestrator's cheap reference comparison, so the built
//! mapping is cached keyed by the mapper's identity. The cache holds the key
//! weakly: an entry never keeps its mapper alive.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::dispatch::DispatchMapper;
use crate::error::ConnectError;
use crate::value::{MapRef, OptMap, Value};

/// A single-slot cache keyed by the identity of an `Rc` argument.
///
/// The slot remembers the most recent `(key, value)` pair. A lookup hits only
/// when the stored weak key upgrades to the same allocation as the argument;
/// anything else rebuilds and replaces the slot. One slot is enough here
/// because each connection carries exactly one dispatch mapper.
pub struct IdentityMemo<K: ?Sized, V> {
    slot: RefCell<Option<(Weak<K>, V)>>,
}

impl<K: ?Sized, V: Clone> IdentityMemo<K, V> {
    pub fn new() -> Self {
        Self {
            slot: RefCell::new(None),
        }
    }

    /// Return the cached value for `key`, building and caching it if the slot
    /// holds a different (or dead) key. A failed build leaves the slot
    /// untouched.
    pub fn try_get_or_insert_with<E>(
        &self,
        key: &Rc<K>,
        build: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some((weak, cached)) = &*self.slot.borrow() {
            if let Some(live) = weak.upgrade() {
                if Rc::ptr_eq(&live, key) {
                    return Ok(cached.clone());
                }
            }
        }
        let value = build()?;
        *self.slot.borrow_mut() = Some((Rc::downgrade(key), value.clone()));
        Ok(value)
    }
}

impl<K: ?Sized, V: Clone> Default for IdentityMemo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// The memoization seam for built dispatch-method mappings.
///
/// The default is [`SingleSlotCache`], created per connection; a cache passed
/// through the global options is shared across every connection of that
/// registration and keeps whatever eviction policy its author gave it.
pub trait MethodsCache {
    /// Return the method mapping for `mapper`, building it at most once per
    /// cached identity.
    fn get_or_build(
        &self,
        mapper: &DispatchMapper,
        build: &dyn Fn() -> Result<MapRef, ConnectError>,
    ) -> Result<MapRef, ConnectError>;
}

/// Default [`MethodsCache`]: one identity slot per mapper form.
#[derive(Default)]
pub struct SingleSlotCache {
    by_mapping: IdentityMemo<RefCell<OptMap>, MapRef>,
    by_factory: IdentityMemo<dyn Fn(&[Value]) -> Value, MapRef>,
}

impl SingleSlotCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MethodsCache for SingleSlotCache {
    fn get_or_build(
        &self,
        mapper: &DispatchMapper,
        build: &dyn Fn() -> Result<MapRef, ConnectError>,
    ) -> Result<MapRef, ConnectError> {
        match mapper {
            DispatchMapper::Mapping(map) => self.by_mapping.try_get_or_insert_with(map, build),
            DispatchMapper::Factory(factory) => {
                self.by_factory.try_get_or_insert_with(factory, build)
            }
        }
    }
}
