//! Bookkeeping for the single pending dwell timer.

use crate::core::State;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Snapshot of the pending timed transition.
///
/// Returned by [`Controller::pending`](crate::controller::Controller::pending)
/// and [`Controller::cancel_pending`](crate::controller::Controller::cancel_pending).
/// The deadline is measured on the Tokio clock, so paused-clock tests observe
/// deterministic values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingTransition<S: State> {
    /// Generation the timer was armed under.
    pub generation: u64,

    /// State the controller will enter when the timer fires.
    pub target: S,

    /// Instant at which the timer fires.
    pub deadline: Instant,
}

/// A live dwell timer: the spawned task plus enough bookkeeping to describe it.
pub(crate) struct ArmedTimer<S: State> {
    pub(crate) generation: u64,
    pub(crate) target: S,
    pub(crate) deadline: Instant,
    pub(crate) task: JoinHandle<()>,
}

impl<S: State> ArmedTimer<S> {
    /// Describe the timer without exposing the task handle.
    pub(crate) fn snapshot(&self) -> PendingTransition<S> {
        PendingTransition {
            generation: self.generation,
            target: self.target.clone(),
            deadline: self.deadline,
        }
    }

    /// Ask the timer task to stop early.
    ///
    /// Abort is best effort: a task that already woke and is waiting on the
    /// controller lock still runs, so every firing re-checks its generation
    /// before acting.
    pub(crate) fn abort(&self) {
        self.task.abort();
    }
}
