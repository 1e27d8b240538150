//! Controller that drives timed transitions between defined states.

use crate::builder::error::ConfigError;
use crate::controller::error::{ControlError, SchedulerError};
use crate::controller::timer::{ArmedTimer, PendingTransition};
use crate::core::{State, StateDefinition, TransitionCause, TransitionLog, TransitionRecord};
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::mem;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::Instant;

/// Callback sink invoked with every transition record as it is logged.
pub type ObserverSink<S> = Arc<dyn Fn(&TransitionRecord<S>) + Send + Sync>;

/// Controller that owns the current state and the single pending dwell timer.
///
/// Entering a state runs its entry action, records the transition, and arms
/// one timer toward its timeout successor. An override cancels the pending
/// timer and enters the override target instead. Each mutation increments a
/// generation counter; a timer that fires for a superseded generation is a
/// silent no-op, so a late firing can never clobber a newer transition.
///
/// The controller is a shared handle: cloning it yields another handle to the
/// same machine, which is how the spawned timer tasks reach back in.
pub struct Controller<S: State + 'static> {
    shared: Arc<ControllerShared<S>>,
}

struct ControllerShared<S: State> {
    table: HashMap<S, StateDefinition<S>>,
    initial: S,
    observer: Option<ObserverSink<S>>,
    inner: Mutex<ControllerInner<S>>,
}

struct ControllerInner<S: State> {
    current: S,
    generation: u64,
    pending: Option<ArmedTimer<S>>,
    log: TransitionLog<S>,
}

impl<S: State + 'static> Controller<S> {
    /// Create a controller holding `initial`, with no timer armed.
    ///
    /// The table must define every state reachable from `initial` over both
    /// successor edges. No entry action runs until [`start`](Self::start).
    pub fn new(initial: S, definitions: Vec<StateDefinition<S>>) -> Result<Self, ConfigError> {
        Self::with_observer(initial, definitions, None)
    }

    pub(crate) fn with_observer(
        initial: S,
        definitions: Vec<StateDefinition<S>>,
        observer: Option<ObserverSink<S>>,
    ) -> Result<Self, ConfigError> {
        if definitions.is_empty() {
            return Err(ConfigError::NoDefinitions);
        }

        let mut table = HashMap::with_capacity(definitions.len());
        for definition in definitions {
            let name = definition.state().name().to_string();
            if table.insert(definition.state().clone(), definition).is_some() {
                return Err(ConfigError::DuplicateDefinition { name });
            }
        }

        validate_reachable(&initial, &table)?;

        Ok(Self {
            shared: Arc::new(ControllerShared {
                table,
                initial: initial.clone(),
                observer,
                inner: Mutex::new(ControllerInner {
                    current: initial,
                    generation: 0,
                    pending: None,
                    log: TransitionLog::new(),
                }),
            }),
        })
    }

    /// Enter the initial state, arming its dwell timer.
    ///
    /// Calling `start` on a running controller re-enters the initial state
    /// and supersedes whatever timer was pending.
    pub fn start(&self) -> Result<(), ControlError> {
        let initial = self.shared.initial.clone();
        let mut inner = self.lock();
        self.enter_locked(&mut inner, initial, TransitionCause::Start)
    }

    /// Enter `state` directly.
    ///
    /// Runs the state's entry action exactly once, notifies the observer,
    /// appends to the log, and arms one timer toward the state's timeout
    /// successor (none if the state is final). Any previously pending timer is
    /// superseded before the new one is installed.
    ///
    /// Every state reachable from `state` over both successor edges must be
    /// defined; a rejected entry leaves the controller untouched.
    pub fn enter(&self, state: S) -> Result<(), ControlError> {
        let mut inner = self.lock();
        self.enter_locked(&mut inner, state, TransitionCause::Manual)
    }

    /// Preempt the pending timer and enter `target` now.
    ///
    /// Two back-to-back overrides yield two sequential entries, each arming
    /// its own fresh timeout. Fails if the current state is final.
    pub fn override_to(&self, target: S) -> Result<(), ControlError> {
        let mut inner = self.lock();
        if inner.current.is_final() {
            return Err(ConfigError::FinalState {
                name: inner.current.name().to_string(),
            }
            .into());
        }
        self.enter_locked(&mut inner, target, TransitionCause::Override)
    }

    /// Preempt the pending timer and enter the current state's configured
    /// override successor.
    pub fn trigger_override(&self) -> Result<(), ControlError> {
        let mut inner = self.lock();
        if inner.current.is_final() {
            return Err(ConfigError::FinalState {
                name: inner.current.name().to_string(),
            }
            .into());
        }
        let target = self
            .shared
            .table
            .get(&inner.current)
            .ok_or_else(|| ConfigError::UndefinedState {
                name: inner.current.name().to_string(),
            })?
            .on_override()
            .clone();
        self.enter_locked(&mut inner, target, TransitionCause::Override)
    }

    /// Replace the pending timer with one that enters `successor` after
    /// `delay`, without leaving the current state.
    ///
    /// The successor is validated like an entry target: it and every state
    /// reachable from it must be defined. A zero delay is still delivered
    /// through the scheduler; the transition never runs synchronously on the
    /// caller's stack.
    pub fn schedule_next(&self, successor: S, delay: Duration) -> Result<(), ControlError> {
        validate_reachable(&successor, &self.shared.table)?;
        let handle = Handle::try_current().map_err(|_| SchedulerError::NoRuntime)?;

        let mut inner = self.lock();
        inner.generation += 1;
        let generation = inner.generation;
        if let Some(stale) = inner.pending.take() {
            stale.abort();
        }
        inner.pending = Some(self.arm(&handle, generation, delay, successor));
        Ok(())
    }

    /// Invalidate and abort the pending timer without transitioning.
    ///
    /// Returns a snapshot of the cancelled timer, or `None` if no timer was
    /// live. The controller then holds its current state until `start`,
    /// `enter`, or an override moves it again.
    pub fn cancel_pending(&self) -> Option<PendingTransition<S>> {
        let mut inner = self.lock();
        let cancelled = inner.pending.take()?;
        inner.generation += 1;
        let snapshot = cancelled.snapshot();
        cancelled.abort();
        Some(snapshot)
    }

    /// Get the current state (brief lock acquisition, no await points).
    pub fn current_state(&self) -> S {
        self.lock().current.clone()
    }

    /// Check if the controller sits in a final state.
    pub fn is_final(&self) -> bool {
        self.lock().current.is_final()
    }

    /// Get the generation of the most recent mutation.
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Snapshot the pending timed transition, if one is armed.
    pub fn pending(&self) -> Option<PendingTransition<S>> {
        self.lock().pending.as_ref().map(ArmedTimer::snapshot)
    }

    /// Get a copy of the transition log.
    pub fn log(&self) -> TransitionLog<S> {
        self.lock().log.clone()
    }

    /// Get the state the controller was constructed with.
    pub fn initial_state(&self) -> S {
        self.shared.initial.clone()
    }

    fn lock(&self) -> MutexGuard<'_, ControllerInner<S>> {
        self.shared
            .inner
            .lock()
            .expect("controller state lock poisoned")
    }

    /// The entry protocol. Runs with the lock held; callers pass the guard in.
    fn enter_locked(
        &self,
        inner: &mut ControllerInner<S>,
        target: S,
        cause: TransitionCause,
    ) -> Result<(), ControlError> {
        // Both checks run before anything mutates, so a rejected entry leaves
        // the controller exactly as it was. Validating everything reachable
        // from `target` now is what keeps timer firings infallible.
        validate_reachable(&target, &self.shared.table)?;
        let definition = &self.shared.table[&target];

        let handle = if target.is_final() {
            None
        } else {
            Some(Handle::try_current().map_err(|_| SchedulerError::NoRuntime)?)
        };

        inner.generation += 1;
        let generation = inner.generation;
        let from = mem::replace(&mut inner.current, target.clone());

        definition.run_entry_action();

        let record = TransitionRecord {
            from,
            to: target,
            timestamp: Utc::now(),
            generation,
            cause,
        };
        if let Some(observer) = &self.shared.observer {
            observer(&record);
        }
        inner.log = inner.log.record(record);

        if let Some(stale) = inner.pending.take() {
            stale.abort();
        }
        inner.pending = handle.map(|handle| {
            self.arm(
                &handle,
                generation,
                definition.dwell(),
                definition.on_timeout().clone(),
            )
        });

        Ok(())
    }

    /// Spawn the timer task for one dwell and return its bookkeeping.
    fn arm(&self, handle: &Handle, generation: u64, delay: Duration, target: S) -> ArmedTimer<S> {
        // A dwell too large for the clock saturates to the far future and
        // simply never elapses. ~30 years out; larger offsets overflow the
        // clock on some platforms.
        let deadline = Instant::now()
            .checked_add(delay)
            .unwrap_or_else(|| Instant::now() + Duration::from_secs(86400 * 365 * 30));
        let controller = self.clone();
        let fire_target = target.clone();
        let task = handle.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            controller.fire(generation, fire_target);
        });

        ArmedTimer {
            generation,
            target,
            deadline,
            task,
        }
    }

    /// Called by a timer task when its dwell elapses.
    ///
    /// The generation captured at arm time is re-checked under the lock; a
    /// superseded timer that lost the abort race drops out here instead.
    fn fire(&self, generation: u64, target: S) {
        let mut inner = self.lock();
        if inner.generation != generation {
            return;
        }
        // Every entry validates the states reachable from its target before a
        // timer is armed, and this task runs inside the runtime, so the entry
        // cannot fail here.
        let _ = self.enter_locked(&mut inner, target, TransitionCause::Timeout);
    }
}

impl<S: State + 'static> Clone for Controller<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

/// Walk both successor edges from `initial` and require a definition for
/// every state reached. Edges out of final states are never followed.
fn validate_reachable<S: State>(
    initial: &S,
    table: &HashMap<S, StateDefinition<S>>,
) -> Result<(), ConfigError> {
    if !table.contains_key(initial) {
        return Err(ConfigError::UndefinedState {
            name: initial.name().to_string(),
        });
    }

    let mut visited = HashSet::new();
    let mut frontier = vec![initial.clone()];
    while let Some(state) = frontier.pop() {
        if !visited.insert(state.clone()) {
            continue;
        }
        if state.is_final() {
            continue;
        }
        let definition = &table[&state];
        for successor in [definition.on_timeout(), definition.on_override()] {
            if !table.contains_key(successor) {
                return Err(ConfigError::UndefinedSuccessor {
                    from: state.name().to_string(),
                    missing: successor.name().to_string(),
                });
            }
            frontier.push(successor.clone());
        }
    }
    Ok(())
}
