//! Builder API for ergonomic controller construction.
//!
//! This module provides fluent builders and macros for creating timed
//! controllers with minimal boilerplate while maintaining type safety.

pub mod controller;
pub mod definition;
pub mod error;
pub mod macros;

pub use controller::ControllerBuilder;
pub use definition::DefinitionBuilder;
pub use error::ConfigError;

use crate::controller::Controller;
use crate::core::{State, StateDefinition};
use std::time::Duration;

/// Create a controller whose states form a timed ring.
///
/// Each state dwells for its paired duration and then times out into the
/// next state in the list, wrapping from the last back to the first. Every
/// state's override successor is `override_target`. The first state in the
/// list is the initial state.
///
/// # Example
///
/// ```
/// use dwell::builder::cyclic_controller;
/// use dwell::state_enum;
/// use std::time::Duration;
///
/// state_enum! {
///     enum Light {
///         Red,
///         Green,
///         Yellow,
///     }
/// }
///
/// let controller = cyclic_controller(
///     vec![
///         (Light::Red, Duration::from_millis(5000)),
///         (Light::Green, Duration::from_millis(5000)),
///         (Light::Yellow, Duration::from_millis(2000)),
///     ],
///     Light::Red,
/// )
/// .unwrap();
///
/// assert_eq!(controller.current_state(), Light::Red);
/// ```
pub fn cyclic_controller<S>(
    states: Vec<(S, Duration)>,
    override_target: S,
) -> Result<Controller<S>, ConfigError>
where
    S: State + 'static,
{
    let initial = states
        .first()
        .map(|(state, _)| state.clone())
        .ok_or(ConfigError::NoDefinitions)?;

    let definitions: Vec<StateDefinition<S>> = states
        .iter()
        .enumerate()
        .map(|(index, (state, dwell))| {
            let next = states[(index + 1) % states.len()].0.clone();
            StateDefinition::new(state.clone(), *dwell, next, override_target.clone())
        })
        .collect();

    ControllerBuilder::new()
        .initial(initial)
        .definitions(definitions)
        .build()
}
