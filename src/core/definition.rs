//! Per-state definitions: dwell duration, successor edges, entry action.
//!
//! A definition is the immutable description of one state - how long the
//! controller dwells in it, where a natural timeout leads, where an override
//! leads, and what side effect to run on entry. Definitions carry no mutable
//! fields; the controller owns all runtime state.

use super::state::State;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Type alias for entry action callbacks.
///
/// The action receives the state being entered. It runs synchronously inside
/// the controller's critical section, so it must not call back into the
/// controller; forward through a channel if the receiver needs one.
pub type EntryAction<S> = Arc<dyn Fn(&S) + Send + Sync>;

/// Immutable description of one state in the controller's table.
///
/// Each state knows its own dwell duration and both successor edges: the
/// state a natural timeout leads to, and the state an override forces.
/// The dwell is fixed at construction and never changes at runtime.
///
/// # Example
///
/// ```rust
/// use dwell::core::{State, StateDefinition};
/// use serde::{Deserialize, Serialize};
/// use std::time::Duration;
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
/// let red = StateDefinition::new(
///     Light::Red,
///     Duration::from_millis(5000),
///     Light::Green,
///     Light::Red,
/// )
/// .with_entry_action(|state: &Light| println!("now in state {}", state.name()));
///
/// assert_eq!(red.state(), &Light::Red);
/// assert_eq!(red.dwell(), Duration::from_millis(5000));
/// assert_eq!(red.on_timeout(), &Light::Green);
/// assert_eq!(red.on_override(), &Light::Red);
/// ```
pub struct StateDefinition<S: State> {
    state: S,
    dwell: Duration,
    on_timeout: S,
    on_override: S,
    entry_action: Option<EntryAction<S>>,
}

impl<S: State> StateDefinition<S> {
    /// Create a definition with no entry action.
    ///
    /// `dwell` is the duration the controller holds `state` before the
    /// scheduled transition into `on_timeout` fires; `on_override` is the
    /// state an override forces from `state`.
    pub fn new(state: S, dwell: Duration, on_timeout: S, on_override: S) -> Self {
        Self {
            state,
            dwell,
            on_timeout,
            on_override,
            entry_action: None,
        }
    }

    /// Attach the entry action, replacing any previous one.
    pub fn with_entry_action<F>(self, action: F) -> Self
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        self.with_shared_entry_action(Arc::new(action))
    }

    /// Attach an already-shared entry action, replacing any previous one.
    pub fn with_shared_entry_action(mut self, action: EntryAction<S>) -> Self {
        self.entry_action = Some(action);
        self
    }

    /// The state this definition describes.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// How long the controller dwells in this state before the timeout
    /// transition fires. A lower bound, not an exact deadline.
    pub fn dwell(&self) -> Duration {
        self.dwell
    }

    /// Successor on natural timeout.
    pub fn on_timeout(&self) -> &S {
        &self.on_timeout
    }

    /// Successor forced by an override.
    pub fn on_override(&self) -> &S {
        &self.on_override
    }

    /// Whether an entry action is attached.
    pub fn has_entry_action(&self) -> bool {
        self.entry_action.is_some()
    }

    /// Run the entry action, if any, for this definition's state.
    pub fn run_entry_action(&self) {
        if let Some(action) = &self.entry_action {
            action(&self.state);
        }
    }
}

impl<S: State> Clone for StateDefinition<S> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            dwell: self.dwell,
            on_timeout: self.on_timeout.clone(),
            on_override: self.on_override.clone(),
            entry_action: self.entry_action.as_ref().map(Arc::clone),
        }
    }
}

impl<S: State> fmt::Debug for StateDefinition<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDefinition")
            .field("state", &self.state)
            .field("dwell", &self.dwell)
            .field("on_timeout", &self.on_timeout)
            .field("on_override", &self.on_override)
            .field("entry_action", &self.entry_action.is_some())
            .finish()
    }
}
