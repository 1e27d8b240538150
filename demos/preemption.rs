//! Preemption mechanics: inspecting, replacing, and cancelling the pending
//! timer while the controller holds a state.
//!
//! Run with: `cargo run --example preemption`

use dwell::builder::cyclic_controller;
use dwell::state_enum;
use std::time::Duration;

state_enum! {
    pub enum Phase {
        Idle,
        Active,
        Cooldown,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let controller = cyclic_controller(
        vec![
            (Phase::Idle, Duration::from_millis(400)),
            (Phase::Active, Duration::from_millis(300)),
            (Phase::Cooldown, Duration::from_millis(200)),
        ],
        Phase::Idle,
    )?;

    controller.start()?;
    let pending = controller.pending().expect("timer armed on start");
    println!(
        "holding {:?}, timer {} -> {:?}",
        controller.current_state(),
        pending.generation,
        pending.target
    );

    // Replace the armed successor without leaving Idle.
    controller.schedule_next(Phase::Cooldown, Duration::from_millis(100))?;
    let pending = controller.pending().expect("replacement timer armed");
    println!(
        "rescheduled: timer {} -> {:?}",
        pending.generation, pending.target
    );

    tokio::time::sleep(Duration::from_millis(150)).await;
    println!(
        "after the replacement fired: {:?}",
        controller.current_state()
    );

    // Freeze the machine: invalidate the pending transition outright.
    if let Some(cancelled) = controller.cancel_pending() {
        println!(
            "cancelled timer {} -> {:?}",
            cancelled.generation, cancelled.target
        );
    }
    tokio::time::sleep(Duration::from_millis(500)).await;
    println!("still holding {:?}", controller.current_state());

    // Overrides work from a halted state; the cycle resumes.
    controller.trigger_override()?;
    println!("resumed at {:?}", controller.current_state());

    println!("Transitions:");
    for record in controller.log().transitions() {
        println!(
            "  {:?} -> {:?} ({:?}, generation {})",
            record.from, record.to, record.cause, record.generation
        );
    }

    Ok(())
}
