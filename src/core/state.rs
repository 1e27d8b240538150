//! Core State trait for timed state machine states.
//!
//! All controller states must implement this trait, which provides
//! pure methods for inspecting state identity without side effects.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for timed state machine states.
///
/// All methods are pure - no side effects. States are immutable identities
/// that key the controller's definition table; the timing and successor
/// attributes of a state live in its
/// [`StateDefinition`](crate::core::StateDefinition), not here.
///
/// # Required Traits
///
/// - `Clone`: States must be cloneable for records and timer tasks
/// - `Eq + Hash`: States must be usable as definition table keys
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: States must be serializable so transition
///   records can cross process boundaries (log shipping, test fixtures)
///
/// # Example
///
/// ```rust
/// use dwell::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Light {
///     Red,
///     Yellow,
///     Green,
/// }
///
/// impl State for Light {
///     fn name(&self) -> &str {
///         match self {
///             Self::Red => "Red",
///             Self::Yellow => "Yellow",
///             Self::Green => "Green",
///         }
///     }
/// }
///
/// assert_eq!(Light::Red.name(), "Red");
/// assert!(!Light::Red.is_final());
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    ///
    /// Returns a static string reference for zero-cost naming.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Entering a final state runs its entry action but never arms a
    /// successor timer, and overrides are rejected while the controller
    /// holds one. Cyclic tables such as a traffic light have none.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}
