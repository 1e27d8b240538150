//! Core timed state machine types and logic.
//!
//! This module contains the pure core of the controller:
//! - State identity via the `State` trait
//! - Per-state definitions (dwell, successor edges, entry action)
//! - Immutable transition records and the append-only log
//!
//! Nothing in this module schedules or mutates; the imperative shell lives
//! in [`crate::controller`].

mod definition;
mod log;
mod state;

pub use definition::{EntryAction, StateDefinition};
pub use log::{TransitionCause, TransitionLog, TransitionRecord};
pub use state::State;
