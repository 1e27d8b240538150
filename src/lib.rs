//! Dwell: a preemption-safe timed state machine library
//!
//! Dwell is built around a "pure core, imperative shell" split. State
//! definitions, the transition log, and the `State` trait are pure data with
//! no side effects; the controller is the shell that spawns Tokio timers and
//! serializes every mutation under one lock.
//!
//! Each state declares how long it dwells, which state a natural timeout
//! leads to, and which state an override leads to. Entering a state arms
//! exactly one timer toward its timeout successor; an override preempts that
//! timer and enters its target instead. A generation counter closes the race
//! between the two: a timer that fires after being superseded re-checks the
//! generation it captured and drops out silently.
//!
//! # Core Concepts
//!
//! - **State**: type-safe state identity via the `State` trait
//! - **StateDefinition**: dwell duration, timeout successor, override
//!   successor, optional entry action
//! - **Controller**: current state plus at most one pending timer
//! - **TransitionLog**: immutable record of every entry the controller made
//!
//! # Example
//!
//! ```rust
//! use dwell::builder::ControllerBuilder;
//! use dwell::core::StateDefinition;
//! use dwell::state_enum;
//! use std::time::Duration;
//!
//! state_enum! {
//!     enum Light {
//!         Red,
//!         Green,
//!         Yellow,
//!     }
//! }
//!
//! let controller = ControllerBuilder::new()
//!     .initial(Light::Red)
//!     .define(StateDefinition::new(
//!         Light::Red,
//!         Duration::from_millis(5000),
//!         Light::Green,
//!         Light::Red,
//!     ))
//!     .define(StateDefinition::new(
//!         Light::Green,
//!         Duration::from_millis(5000),
//!         Light::Yellow,
//!         Light::Red,
//!     ))
//!     .define(StateDefinition::new(
//!         Light::Yellow,
//!         Duration::from_millis(2000),
//!         Light::Red,
//!         Light::Red,
//!     ))
//!     .build()?;
//!
//! // Nothing runs until start() is called from inside a Tokio runtime.
//! assert_eq!(controller.current_state(), Light::Red);
//! assert!(controller.pending().is_none());
//! # Ok::<(), dwell::builder::ConfigError>(())
//! ```

pub mod builder;
pub mod controller;
pub mod core;

// Re-export commonly used types
pub use crate::builder::{ConfigError, ControllerBuilder, DefinitionBuilder};
pub use crate::controller::{ControlError, Controller, PendingTransition, SchedulerError};
pub use crate::core::{State, StateDefinition, TransitionCause, TransitionLog, TransitionRecord};
