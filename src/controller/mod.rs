//! The timed controller and its scheduling machinery.
//!
//! This module is the imperative shell around the pure core: it owns the
//! current state, spawns the dwell timers, and serializes every mutation
//! under one lock.
//!
//! # Key Concepts
//!
//! - **Controller**: holds the current state and at most one pending timer
//! - **Generation counter**: every mutation increments it; a firing timer
//!   re-checks the generation it captured and drops out on mismatch
//! - **PendingTransition**: introspectable snapshot of the armed timer
//!
//! # Scheduling
//!
//! Timers are Tokio tasks spawned on the caller's runtime, resolved through
//! `Handle::try_current()` so entering a state outside a runtime is an error
//! rather than a panic. Every entry validates the states reachable from its
//! target before a timer is armed, so an elapsed timer never fires toward a
//! missing definition. `JoinHandle::abort()` on a superseded timer is a
//! best-effort optimization; the generation check is what carries
//! correctness.

mod error;
mod machine;
mod timer;

pub use error::{ControlError, SchedulerError};
pub use machine::{Controller, ObserverSink};
pub use timer::PendingTransition;
