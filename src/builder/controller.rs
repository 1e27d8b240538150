//! Builder for constructing controllers.

use crate::builder::definition::DefinitionBuilder;
use crate::builder::error::ConfigError;
use crate::controller::{Controller, ObserverSink};
use crate::core::{State, StateDefinition, TransitionRecord};
use std::sync::Arc;

/// Builder for constructing a [`Controller`] with a fluent API.
///
/// `build` validates the table: the initial state and every state reachable
/// from it over both successor edges must have a definition, and no state
/// may be defined twice. No timer is armed until
/// [`Controller::start`] is called.
pub struct ControllerBuilder<S: State + 'static> {
    initial: Option<S>,
    definitions: Vec<StateDefinition<S>>,
    observer: Option<ObserverSink<S>>,
}

impl<S: State + 'static> ControllerBuilder<S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            definitions: Vec::new(),
            observer: None,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Add a pre-built definition.
    pub fn define(mut self, definition: StateDefinition<S>) -> Self {
        self.definitions.push(definition);
        self
    }

    /// Add a definition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn definition(mut self, builder: DefinitionBuilder<S>) -> Result<Self, ConfigError> {
        let definition = builder.build()?;
        self.definitions.push(definition);
        Ok(self)
    }

    /// Add multiple definitions at once.
    pub fn definitions(mut self, definitions: Vec<StateDefinition<S>>) -> Self {
        self.definitions.extend(definitions);
        self
    }

    /// Register the observation sink invoked on every entry (optional).
    ///
    /// The sink runs inside the controller's critical section and must not
    /// call back into the controller.
    pub fn observer<F>(mut self, sink: F) -> Self
    where
        F: Fn(&TransitionRecord<S>) + Send + Sync + 'static,
    {
        self.observer = Some(Arc::new(sink));
        self
    }

    /// Build the controller.
    /// Returns an error if required fields are missing or the table does not
    /// define every reachable state.
    pub fn build(self) -> Result<Controller<S>, ConfigError> {
        let initial = self.initial.ok_or(ConfigError::MissingInitialState)?;

        if self.definitions.is_empty() {
            return Err(ConfigError::NoDefinitions);
        }

        Controller::with_observer(initial, self.definitions, self.observer)
    }
}

impl<S: State + 'static> Default for ControllerBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
