//! Dispatch-methods builder.
//!
//! Turns a dispatch mapper into a mapping of component methods that wrap
//! action creators with the store's dispatch. The mapper's form is resolved
//! once, at connect time, into a tagged variant; updates never re-inspect it.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ConnectError;
use crate::guard::expect_map;
use crate::host::ComponentRef;
use crate::value::{FuncRef, MapRef, OptMap, Value};

/// A dispatch function bound to one store.
pub type DispatchFn = Rc<dyn Fn(Value) -> Value>;

/// Marker set on event-like arguments to tell the host's event layer to skip
/// its automatic post-handler re-render.
pub const PREVENT_UPDATE_MARKER: &str = "preventUpdate";

/// The member whose presence (as a callable) duck-types an argument as a UI
/// event.
pub const PREVENT_DEFAULT_MEMBER: &str = "preventDefault";

/// A dispatch mapper, resolved from its dynamic form at connect time.
#[derive(Clone)]
pub enum DispatchMapper {
    /// A map of name -> action-creator function. Each entry is wrapped with
    /// dispatch and the auto-guard heuristic.
    Mapping(MapRef),
    /// A factory invoked once per build with `[Func(dispatch),
    /// Component(instance)]`. Its returned map is used as-is; the factory
    /// owns dispatch semantics entirely.
    Factory(FuncRef),
}

impl DispatchMapper {
    /// Resolve the dynamic mapper argument into its tagged form.
    ///
    /// `Null` means no mapper (the connection gets an implicit dispatch
    /// option instead). Map entries must all be functions; a bad entry fails
    /// here, at connect, rather than at first method call.
    pub fn from_value(mapper: &Value) -> Result<Option<Self>, ConnectError> {
        match mapper {
            Value::Null => Ok(None),
            Value::Map(map) => {
                let has_non_func = map.borrow().values().any(|entry| !entry.is_func());
                if has_non_func {
                    return Err(ConnectError::UnsupportedMapperType {
                        actual: "map with non-function entries",
                    });
                }
                Ok(Some(DispatchMapper::Mapping(map.clone())))
            }
            Value::Func(factory) => Ok(Some(DispatchMapper::Factory(factory.clone()))),
            other => Err(ConnectError::UnsupportedMapperType {
                actual: other.type_name(),
            }),
        }
    }
}

/// Auto-guard configuration resolved per connection.
pub(crate) struct AutoGuardOptions {
    pub disable_prevent_update: bool,
    pub disable_prevent_update_for: Vec<String>,
}

/// Build the method mapping for `mapper`.
///
/// Mapping form: each entry becomes a wrapper that applies the auto-guard
/// heuristic to its arguments, then returns `dispatch(creator(args))`
/// unchanged, so a thunk's dispatch result reaches the method's caller.
pub(crate) fn build_dispatch_methods(
    mapper: &DispatchMapper,
    dispatch: &DispatchFn,
    component: &ComponentRef,
    guard: &Rc<AutoGuardOptions>,
) -> Result<MapRef, ConnectError> {
    match mapper {
        DispatchMapper::Mapping(map) => {
            let mut methods = OptMap::new();
            for (name, entry) in map.borrow().iter() {
                let Value::Func(creator) = entry else {
                    // Entries were functions at connect time; a mutation since
                    // then broke the mapping contract.
                    return Err(ConnectError::UnsupportedMapperType {
                        actual: "map with non-function entries",
                    });
                };
                methods.insert(
                    name.clone(),
                    wrap_action_creator(name, creator, dispatch, guard),
                );
            }
            Ok(Rc::new(RefCell::new(methods)))
        }
        DispatchMapper::Factory(factory) => {
            let dispatch = dispatch.clone();
            let dispatch_value = Value::Func(Rc::new(move |args: &[Value]| {
                dispatch(args.first().cloned().unwrap_or(Value::Null))
            }));
            let result = factory(&[dispatch_value, Value::Component(component.clone())]);
            expect_map("dispatch mapper factory", result)
        }
    }
}

fn wrap_action_creator(
    name: &str,
    creator: &FuncRef,
    dispatch: &DispatchFn,
    guard: &Rc<AutoGuardOptions>,
) -> Value {
    let method_name = name.to_string();
    let creator = creator.clone();
    let dispatch = dispatch.clone();
    let guard = guard.clone();
    Value::Func(Rc::new(move |args: &[Value]| {
        prevent_update_if_needed(args, &method_name, &guard);
        dispatch(creator(args))
    }))
}

/// The auto-guard heuristic: a single map-typed argument exposing a callable
/// `preventDefault` member is treated as a UI event and gets the
/// `preventUpdate` marker, so the host skips its redundant post-handler
/// re-render. Best-effort duck typing, not a guarantee; the map check always
/// precedes any member access.
fn prevent_update_if_needed(args: &[Value], method: &str, guard: &AutoGuardOptions) {
    if guard.disable_prevent_update {
        return;
    }
    let [only_arg] = args else {
        return;
    };
    let Value::Map(event) = only_arg else {
        return;
    };
    let looks_like_event = event
        .borrow()
        .get(PREVENT_DEFAULT_MEMBER)
        .is_some_and(Value::is_func);
    if !looks_like_event {
        return;
    }
    if guard.disable_prevent_update_for.iter().any(|m| m == method) {
        return;
    }
    event
        .borrow_mut()
        .insert(PREVENT_UPDATE_MARKER.to_string(), Value::Bool(true));
    tracing::trace!(method, "marked event argument to skip the host re-render");
}
