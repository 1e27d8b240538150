//! Configuration errors for state tables and controller construction.

use thiserror::Error;

/// Errors raised when a state table is malformed.
///
/// All variants are fatal to the operation that produced them: a controller
/// is never constructed from an invalid table, and a rejected override
/// leaves the controller exactly where it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No state definitions provided. Define at least one state")]
    NoDefinitions,

    #[error("Definition state not specified. Call .state(state)")]
    MissingState,

    #[error("Dwell duration not specified. Call .dwell(duration)")]
    MissingDwell,

    #[error("Timeout successor not specified. Call .on_timeout(state)")]
    MissingTimeoutSuccessor,

    #[error("Override successor not specified. Call .on_override(state)")]
    MissingOverrideSuccessor,

    #[error("State '{name}' is defined more than once")]
    DuplicateDefinition { name: String },

    #[error("State '{from}' names successor '{missing}' which has no definition")]
    UndefinedSuccessor { from: String, missing: String },

    #[error("State '{name}' has no definition in the table")]
    UndefinedState { name: String },

    #[error("State '{name}' is final; no override is available from it")]
    FinalState { name: String },
}
