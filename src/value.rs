//! Dynamic option values exchanged with the host framework.
//!
//! Render options cross a stringly-keyed framework boundary, so the values in
//! an option mapping are dynamically typed. Equality follows strict-equality
//! semantics: primitives compare by value, maps/lists/functions compare by
//! reference identity, never structurally.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::host::ComponentRef;

/// A flat mapping from option name to value.
pub type OptMap = HashMap<String, Value>;

/// A shared, mutable option mapping.
///
/// Method mappings are handed out as `MapRef` so that "did the methods
/// change?" is a cheap `Rc::ptr_eq`, and so the auto-guard can set its marker
/// on an event argument in place.
pub type MapRef = Rc<RefCell<OptMap>>;

/// A callable value: takes an argument slice, returns a value.
pub type FuncRef = Rc<dyn Fn(&[Value]) -> Value>;

/// A dynamically typed option value.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Compared by reference identity, not by contents.
    List(Rc<Vec<Value>>),
    /// Compared by reference identity, not by contents.
    Map(MapRef),
    /// Compared by reference identity.
    Func(FuncRef),
    /// A component reference as a first-class value. Lets a factory-form
    /// dispatch mapper receive the instance it is building methods for.
    Component(ComponentRef),
}

impl Value {
    /// Build a string value.
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Build a map value from key/value pairs.
    pub fn map<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        Value::Map(Rc::new(RefCell::new(entries.into_iter().collect())))
    }

    /// Build a callable value.
    pub fn func(f: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Value::Func(Rc::new(f))
    }

    /// The runtime kind, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Func(_) => "function",
            Value::Component(_) => "component",
        }
    }

    /// The inner map handle, if this is a map.
    pub fn as_map(&self) -> Option<&MapRef> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_func(&self) -> bool {
        matches!(self, Value::Func(_))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            // NaN != NaN, matching strict-equality semantics.
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Rc::ptr_eq(a, b),
            (Value::Func(a), Value::Func(b)) => Rc::ptr_eq(a, b),
            (Value::Component(a), Value::Component(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(v) => write!(f, "Bool({v})"),
            Value::Int(v) => write!(f, "Int({v})"),
            Value::Float(v) => write!(f, "Float({v})"),
            Value::Str(v) => write!(f, "Str({v:?})"),
            Value::List(v) => write!(f, "List(len={})", v.len()),
            Value::Map(v) => write!(f, "Map(len={})", v.borrow().len()),
            Value::Func(_) => write!(f, "Func(..)"),
            Value::Component(_) => write!(f, "Component(..)"),
        }
    }
}

/// Shallow, order-independent equality over two flat option mappings.
///
/// Equal iff every key present in either mapping is present in both with
/// strictly-equal values ([`Value`] equality). One level only; nested maps
/// compare by identity.
pub fn is_shallow_equal(a: &OptMap, b: &OptMap) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().all(|(key, value)| b.get(key) == Some(value))
}
