//! Transition records and the append-only transition log.
//!
//! Every entry the controller performs is captured as an immutable record
//! carrying the previous state, the new state, a wall-clock timestamp, the
//! generation that produced it, and what caused it. The log is the pure
//! counterpart of the observer sink: recording returns a new log instead of
//! mutating in place.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What caused the controller to enter a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionCause {
    /// The controller entered its initial state via `start`.
    Start,
    /// A pending timer elapsed and fired the scheduled transition.
    Timeout,
    /// An override preempted the pending timer.
    Override,
    /// A caller drove `enter` directly.
    Manual,
}

/// Record of a single state entry.
///
/// Records are immutable values representing a move from one state to
/// another at a specific point in time. The `generation` is the value of the
/// controller's counter at the moment the entry was performed; the record
/// for `start` carries `from == to` since there is no prior state.
///
/// # Example
///
/// ```rust
/// use dwell::core::{State, TransitionCause, TransitionRecord};
/// use serde::{Deserialize, Serialize};
/// use chrono::Utc;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Light {
///     Red,
///     Green,
/// }
///
/// impl State for Light {
///     fn name(&self) -> &str {
///         match self {
///             Self::Red => "Red",
///             Self::Green => "Green",
///         }
///     }
/// }
///
/// let record = TransitionRecord {
///     from: Light::Red,
///     to: Light::Green,
///     timestamp: Utc::now(),
///     generation: 2,
///     cause: TransitionCause::Timeout,
/// };
/// assert_eq!(record.to, Light::Green);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionRecord<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// When the entry occurred
    pub timestamp: DateTime<Utc>,
    /// The controller generation that performed this entry
    pub generation: u64,
    /// What triggered this entry
    pub cause: TransitionCause,
}

/// Ordered log of state entries.
///
/// The log is immutable - `record` returns a new log with the entry
/// appended, leaving the original untouched.
///
/// # Example
///
/// ```rust
/// use dwell::core::{State, TransitionCause, TransitionLog, TransitionRecord};
/// use serde::{Deserialize, Serialize};
/// use chrono::Utc;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Light {
///     Red,
///     Green,
/// }
///
/// impl State for Light {
///     fn name(&self) -> &str {
///         match self {
///             Self::Red => "Red",
///             Self::Green => "Green",
///         }
///     }
/// }
///
/// let log = TransitionLog::new();
/// let log = log.record(TransitionRecord {
///     from: Light::Red,
///     to: Light::Green,
///     timestamp: Utc::now(),
///     generation: 1,
///     cause: TransitionCause::Timeout,
/// });
///
/// assert_eq!(log.transitions().len(), 1);
/// assert_eq!(log.get_path(), vec![&Light::Red, &Light::Green]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionLog<S: State> {
    transitions: Vec<TransitionRecord<S>>,
}

impl<S: State> Default for TransitionLog<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> TransitionLog<S> {
    /// Create a new empty log.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record an entry, returning a new log.
    ///
    /// This is a pure function - it does not mutate the existing log but
    /// returns a new one with the record appended.
    pub fn record(&self, record: TransitionRecord<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(record);
        Self { transitions }
    }

    /// Get the path of states traversed.
    ///
    /// Returns references to states in order: the `from` of the first record,
    /// then the `to` of every record.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for record in &self.transitions {
            path.push(&record.to);
        }
        path
    }

    /// Elapsed wall-clock time from the first to the last record, or `None`
    /// if the log is empty.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// All recorded entries in order.
    pub fn transitions(&self) -> &[TransitionRecord<S>] {
        &self.transitions
    }

    /// The most recent entry, if any.
    pub fn last(&self) -> Option<&TransitionRecord<S>> {
        self.transitions.last()
    }

    /// How many entries were caused by `cause`.
    pub fn count_by_cause(&self, cause: TransitionCause) -> usize {
        self.transitions.iter().filter(|r| r.cause == cause).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum Light {
        Red,
        Yellow,
        Green,
    }

    impl State for Light {
        fn name(&self) -> &str {
            match self {
                Self::Red => "Red",
                Self::Yellow => "Yellow",
                Self::Green => "Green",
            }
        }
    }

    fn record(
        from: Light,
        to: Light,
        generation: u64,
        cause: TransitionCause,
    ) -> TransitionRecord<Light> {
        TransitionRecord {
            from,
            to,
            timestamp: Utc::now(),
            generation,
            cause,
        }
    }

    #[test]
    fn new_log_is_empty() {
        let log: TransitionLog<Light> = TransitionLog::new();
        assert_eq!(log.transitions().len(), 0);
        assert!(log.get_path().is_empty());
        assert!(log.duration().is_none());
        assert!(log.last().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let log = TransitionLog::new();
        let next = log.record(record(Light::Red, Light::Green, 1, TransitionCause::Timeout));

        assert_eq!(log.transitions().len(), 0);
        assert_eq!(next.transitions().len(), 1);
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let log = TransitionLog::new()
            .record(record(Light::Red, Light::Green, 1, TransitionCause::Timeout))
            .record(record(Light::Green, Light::Yellow, 2, TransitionCause::Timeout))
            .record(record(Light::Yellow, Light::Red, 3, TransitionCause::Override));

        assert_eq!(
            log.get_path(),
            vec![&Light::Red, &Light::Green, &Light::Yellow, &Light::Red]
        );
    }

    #[test]
    fn duration_spans_first_to_last_record() {
        let start = Utc::now();
        let log = TransitionLog::new()
            .record(TransitionRecord {
                from: Light::Red,
                to: Light::Green,
                timestamp: start,
                generation: 1,
                cause: TransitionCause::Start,
            })
            .record(TransitionRecord {
                from: Light::Green,
                to: Light::Yellow,
                timestamp: start + chrono::Duration::milliseconds(250),
                generation: 2,
                cause: TransitionCause::Timeout,
            });

        assert_eq!(log.duration(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn single_record_has_duration_zero() {
        let log =
            TransitionLog::new().record(record(Light::Red, Light::Red, 1, TransitionCause::Start));
        assert_eq!(log.duration(), Some(Duration::ZERO));
    }

    #[test]
    fn count_by_cause_partitions_records() {
        let log = TransitionLog::new()
            .record(record(Light::Red, Light::Red, 1, TransitionCause::Start))
            .record(record(Light::Red, Light::Green, 2, TransitionCause::Timeout))
            .record(record(Light::Green, Light::Red, 3, TransitionCause::Override))
            .record(record(Light::Red, Light::Red, 4, TransitionCause::Override));

        assert_eq!(log.count_by_cause(TransitionCause::Start), 1);
        assert_eq!(log.count_by_cause(TransitionCause::Timeout), 1);
        assert_eq!(log.count_by_cause(TransitionCause::Override), 2);
        assert_eq!(log.count_by_cause(TransitionCause::Manual), 0);
    }

    #[test]
    fn generation_is_tracked_per_record() {
        let log = TransitionLog::new()
            .record(record(Light::Red, Light::Green, 7, TransitionCause::Timeout));
        assert_eq!(log.last().map(|r| r.generation), Some(7));
    }

    #[test]
    fn log_serializes_correctly() {
        let log = TransitionLog::new()
            .record(record(Light::Red, Light::Green, 1, TransitionCause::Timeout));

        let json = serde_json::to_string(&log).unwrap();
        let deserialized: TransitionLog<Light> = serde_json::from_str(&json).unwrap();

        assert_eq!(log.transitions().len(), deserialized.transitions().len());
        assert_eq!(deserialized.last().map(|r| r.cause), Some(TransitionCause::Timeout));
    }
}
