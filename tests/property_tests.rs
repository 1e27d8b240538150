//! Property-based tests for the timed controller and core types.
//!
//! These tests use proptest to verify the generation and logging invariants
//! hold across many randomly generated operation sequences. Controller cases
//! run on a paused-clock Tokio runtime, so no case ever waits on the wall
//! clock.

use chrono::Utc;
use dwell::builder::cyclic_controller;
use dwell::core::{State, TransitionCause, TransitionLog, TransitionRecord};
use dwell::Controller;
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
enum Signal {
    Red,
    Green,
    Yellow,
}

impl State for Signal {
    fn name(&self) -> &str {
        match self {
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Yellow => "Yellow",
        }
    }
}

/// One externally triggered controller operation.
#[derive(Clone, Debug)]
enum Op {
    Override(Signal),
    TriggerOverride,
    Schedule(Signal, u64),
    Cancel,
    Enter(Signal),
}

fn paused_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap()
}

fn signal_controller() -> Controller<Signal> {
    cyclic_controller(
        vec![
            (Signal::Red, Duration::from_millis(5000)),
            (Signal::Green, Duration::from_millis(5000)),
            (Signal::Yellow, Duration::from_millis(2000)),
        ],
        Signal::Red,
    )
    .unwrap()
}

fn timeout_successor(state: &Signal) -> Signal {
    match state {
        Signal::Red => Signal::Green,
        Signal::Green => Signal::Yellow,
        Signal::Yellow => Signal::Red,
    }
}

fn apply(controller: &Controller<Signal>, op: &Op) {
    match op {
        Op::Override(target) => controller.override_to(target.clone()).unwrap(),
        Op::TriggerOverride => controller.trigger_override().unwrap(),
        Op::Schedule(successor, millis) => controller
            .schedule_next(successor.clone(), Duration::from_millis(*millis))
            .unwrap(),
        Op::Cancel => {
            controller.cancel_pending();
        }
        Op::Enter(state) => controller.enter(state.clone()).unwrap(),
    }
}

prop_compose! {
    fn arbitrary_signal()(variant in 0..3u8) -> Signal {
        match variant {
            0 => Signal::Red,
            1 => Signal::Green,
            _ => Signal::Yellow,
        }
    }
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arbitrary_signal().prop_map(Op::Override),
        Just(Op::TriggerOverride),
        (arbitrary_signal(), 0..200u64)
            .prop_map(|(successor, millis)| Op::Schedule(successor, millis)),
        Just(Op::Cancel),
        arbitrary_signal().prop_map(Op::Enter),
    ]
}

/// Ops whose armed timers always follow the table's timeout edge.
fn arbitrary_entry_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arbitrary_signal().prop_map(Op::Override),
        Just(Op::TriggerOverride),
        Just(Op::Cancel),
        arbitrary_signal().prop_map(Op::Enter),
    ]
}

fn arbitrary_cause() -> impl Strategy<Value = TransitionCause> {
    prop_oneof![
        Just(TransitionCause::Start),
        Just(TransitionCause::Timeout),
        Just(TransitionCause::Override),
        Just(TransitionCause::Manual),
    ]
}

proptest! {
    #[test]
    fn pending_generation_matches_controller_generation(
        ops in prop::collection::vec(arbitrary_op(), 0..20)
    ) {
        let runtime = paused_runtime();
        let _guard = runtime.enter();

        let controller = signal_controller();
        controller.start().unwrap();

        for op in &ops {
            apply(&controller, op);
        }

        if let Some(pending) = controller.pending() {
            prop_assert_eq!(pending.generation, controller.generation());
        }
    }

    #[test]
    fn generation_counts_every_mutation(
        ops in prop::collection::vec(arbitrary_op(), 0..20)
    ) {
        let runtime = paused_runtime();
        let _guard = runtime.enter();

        let controller = signal_controller();
        controller.start().unwrap();
        let mut expected = 1u64;

        for op in &ops {
            let had_pending = controller.pending().is_some();
            apply(&controller, op);
            expected += match op {
                Op::Cancel if !had_pending => 0,
                _ => 1,
            };
        }

        prop_assert_eq!(controller.generation(), expected);
    }

    #[test]
    fn log_appends_one_record_per_entry(
        ops in prop::collection::vec(arbitrary_op(), 0..20)
    ) {
        let runtime = paused_runtime();
        let _guard = runtime.enter();

        let controller = signal_controller();
        controller.start().unwrap();

        for op in &ops {
            apply(&controller, op);
        }

        let entries = 1 + ops
            .iter()
            .filter(|op| matches!(op, Op::Override(_) | Op::TriggerOverride | Op::Enter(_)))
            .count();

        let log = controller.log();
        prop_assert_eq!(log.transitions().len(), entries);
        prop_assert_eq!(&log.last().unwrap().to, &controller.current_state());
    }

    #[test]
    fn record_generations_increase_monotonically(
        ops in prop::collection::vec(arbitrary_op(), 0..20)
    ) {
        let runtime = paused_runtime();
        let _guard = runtime.enter();

        let controller = signal_controller();
        controller.start().unwrap();

        for op in &ops {
            apply(&controller, op);
        }

        let log = controller.log();
        for pair in log.transitions().windows(2) {
            prop_assert!(pair[0].generation < pair[1].generation);
        }
    }

    #[test]
    fn timeout_records_always_follow_the_table_edge(
        ops in prop::collection::vec(arbitrary_entry_op(), 0..12)
    ) {
        let runtime = paused_runtime();
        let controller = runtime.block_on(async {
            let controller = signal_controller();
            controller.start().unwrap();

            for op in &ops {
                apply(&controller, op);
            }

            // Long enough for several laps; every firing that survives the
            // generation check must follow its from-state's timeout edge.
            tokio::time::sleep(Duration::from_secs(60)).await;
            controller
        });

        for record in controller.log().transitions() {
            if record.cause == TransitionCause::Timeout {
                prop_assert_eq!(&record.to, &timeout_successor(&record.from));
            }
        }
    }

    #[test]
    fn log_forms_a_connected_chain(
        ops in prop::collection::vec(arbitrary_op(), 0..20)
    ) {
        let runtime = paused_runtime();
        let controller = runtime.block_on(async {
            let controller = signal_controller();
            controller.start().unwrap();

            for op in &ops {
                apply(&controller, op);
            }

            tokio::time::sleep(Duration::from_secs(30)).await;
            controller
        });

        let log = controller.log();
        let records = log.transitions();
        prop_assert_eq!(&records[0].from, &Signal::Red);
        for pair in records.windows(2) {
            prop_assert_eq!(&pair[1].from, &pair[0].to);
        }
    }

    #[test]
    fn cyclic_tables_always_validate(
        states in prop::sample::subsequence(
            vec![Signal::Red, Signal::Green, Signal::Yellow],
            1..=3,
        ),
        dwell_millis in 0..10_000u64
    ) {
        let first = states[0].clone();
        let ring: Vec<_> = states
            .iter()
            .map(|state| (state.clone(), Duration::from_millis(dwell_millis)))
            .collect();

        let controller = cyclic_controller(ring, first.clone());

        prop_assert!(controller.is_ok());
        prop_assert_eq!(controller.unwrap().current_state(), first);
    }

    #[test]
    fn rings_missing_their_override_target_never_validate(
        states in prop::sample::subsequence(
            vec![Signal::Red, Signal::Green],
            1..=2,
        )
    ) {
        let ring: Vec<_> = states
            .iter()
            .map(|state| (state.clone(), Duration::from_millis(100)))
            .collect();

        let controller = cyclic_controller(ring, Signal::Yellow);

        prop_assert!(controller.is_err());
    }

    #[test]
    fn state_roundtrip_serialization(state in arbitrary_signal()) {
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: Signal = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(state, deserialized);
    }

    #[test]
    fn log_roundtrip_serialization(
        entries in prop::collection::vec((arbitrary_signal(), arbitrary_cause()), 0..5)
    ) {
        let mut log = TransitionLog::new();
        let mut previous = Signal::Red;

        for (generation, (to, cause)) in entries.iter().enumerate() {
            let record = TransitionRecord {
                from: previous.clone(),
                to: to.clone(),
                timestamp: Utc::now(),
                generation: generation as u64 + 1,
                cause: *cause,
            };
            log = log.record(record);
            previous = to.clone();
        }

        let json = serde_json::to_string(&log).unwrap();
        let deserialized: TransitionLog<Signal> = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(log.transitions().len(), deserialized.transitions().len());
        prop_assert_eq!(log.get_path(), deserialized.get_path());
    }
}
