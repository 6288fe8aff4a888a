//! Update orchestrator.
//!
//! Produces the per-connection update function: recompute the state
//! projection and dispatch methods, diff against the previous computation,
//! and deliver a render update only when something changed.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ConnectError;
use crate::guard::expect_map;
use crate::options::InstanceConfig;
use crate::value::{is_shallow_equal, MapRef, OptMap, Value};

/// The per-connection update function.
pub(crate) type UpdateFn = Rc<dyn Fn() -> Result<(), ConnectError>>;

/// Build the update function for one connection.
///
/// The closure owns the previous projection and previous method mapping;
/// both are replaced together, only after a render update went out. The
/// empty-methods sentinel and the implicit dispatch function are created here,
/// once, so both sides of the "did it change" comparisons are identity-stable
/// across invocations.
pub(crate) fn make_update_fn(config: Rc<InstanceConfig>) -> UpdateFn {
    let empty_methods: MapRef = Rc::new(RefCell::new(OptMap::new()));
    let implicit_dispatch = {
        let dispatch = config.dispatch.clone();
        Value::Func(Rc::new(move |args: &[Value]| {
            dispatch(args.first().cloned().unwrap_or(Value::Null))
        }))
    };
    let prev: RefCell<(OptMap, MapRef)> = RefCell::new((OptMap::new(), empty_methods.clone()));

    Rc::new(move || {
        let mut state_opts = match &config.projector {
            Some(project) => {
                let projected = project(&config.store.get_state(), &config.component);
                let map = expect_map("state projector", projected)?;
                let opts = map.borrow().clone();
                opts
            }
            None => OptMap::new(),
        };

        let methods = match &config.mapper {
            Some(mapper) => config.cache.get_or_build(mapper, &|| {
                crate::dispatch::build_dispatch_methods(
                    mapper,
                    &config.dispatch,
                    &config.component,
                    &config.guard,
                )
            })?,
            None => {
                // No explicit methods requested: hand the component the
                // store's dispatch directly, under the configured name.
                state_opts.insert(
                    config.implicit_dispatch_opt_name.clone(),
                    implicit_dispatch.clone(),
                );
                empty_methods.clone()
            }
        };

        let unchanged = {
            let previous = prev.borrow();
            is_shallow_equal(&state_opts, &previous.0) && Rc::ptr_eq(&methods, &previous.1)
        };
        if unchanged {
            tracing::trace!("derived options unchanged, skipping render update");
            return Ok(());
        }

        (config.on_update)(&config.component, &state_opts, &methods);
        // Commit both previous values together, never partially.
        *prev.borrow_mut() = (state_opts, methods);
        Ok(())
    })
}
