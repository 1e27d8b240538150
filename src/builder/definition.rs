//! Builder for constructing state definitions.

use crate::builder::error::ConfigError;
use crate::core::{EntryAction, State, StateDefinition};
use std::sync::Arc;
use std::time::Duration;

/// Builder for constructing per-state definitions with a fluent API.
pub struct DefinitionBuilder<S: State> {
    state: Option<S>,
    dwell: Option<Duration>,
    on_timeout: Option<S>,
    on_override: Option<S>,
    entry_action: Option<EntryAction<S>>,
}

impl<S: State> DefinitionBuilder<S> {
    /// Create a new definition builder.
    pub fn new() -> Self {
        Self {
            state: None,
            dwell: None,
            on_timeout: None,
            on_override: None,
            entry_action: None,
        }
    }

    /// Set the state this definition describes (required).
    pub fn state(mut self, state: S) -> Self {
        self.state = Some(state);
        self
    }

    /// Set the dwell duration (required).
    pub fn dwell(mut self, dwell: Duration) -> Self {
        self.dwell = Some(dwell);
        self
    }

    /// Set the successor on natural timeout (required).
    pub fn on_timeout(mut self, state: S) -> Self {
        self.on_timeout = Some(state);
        self
    }

    /// Set the successor an override forces (required).
    pub fn on_override(mut self, state: S) -> Self {
        self.on_override = Some(state);
        self
    }

    /// Attach an entry action (optional).
    pub fn entry_action<F>(mut self, action: F) -> Self
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        self.entry_action = Some(Arc::new(action));
        self
    }

    /// Build the definition.
    pub fn build(self) -> Result<StateDefinition<S>, ConfigError> {
        let state = self.state.ok_or(ConfigError::MissingState)?;
        let dwell = self.dwell.ok_or(ConfigError::MissingDwell)?;
        let on_timeout = self.on_timeout.ok_or(ConfigError::MissingTimeoutSuccessor)?;
        let on_override = self
            .on_override
            .ok_or(ConfigError::MissingOverrideSuccessor)?;

        let mut definition = StateDefinition::new(state, dwell, on_timeout, on_override);
        if let Some(action) = self.entry_action {
            definition = definition.with_shared_entry_action(action);
        }
        Ok(definition)
    }
}

impl<S: State> Default for DefinitionBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
