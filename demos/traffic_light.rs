//! Traffic light simulation driven by the timed controller.
//!
//! Each light prints its entry message, dwells, and times out into the next
//! light. Two seconds in, an emergency override preempts whatever timer is
//! pending and forces the light back to red.
//!
//! Run with: `cargo run --example traffic_light`

use dwell::builder::{ControllerBuilder, DefinitionBuilder};
use dwell::state_enum;
use std::time::Duration;

state_enum! {
    pub enum Light {
        Red,
        Green,
        Yellow,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let controller = ControllerBuilder::new()
        .initial(Light::Red)
        .definition(
            DefinitionBuilder::new()
                .state(Light::Red)
                .dwell(Duration::from_millis(5000))
                .on_timeout(Light::Green)
                .on_override(Light::Red)
                .entry_action(|_| println!("Red Light - Vehicles must stop.")),
        )?
        .definition(
            DefinitionBuilder::new()
                .state(Light::Green)
                .dwell(Duration::from_millis(5000))
                .on_timeout(Light::Yellow)
                .on_override(Light::Red)
                .entry_action(|_| println!("Green Light - Vehicles can go.")),
        )?
        .definition(
            DefinitionBuilder::new()
                .state(Light::Yellow)
                .dwell(Duration::from_millis(2000))
                .on_timeout(Light::Red)
                .on_override(Light::Red)
                .entry_action(|_| println!("Yellow Light - Prepare to stop.")),
        )?
        .build()?;

    println!("Traffic Light Simulation:");
    controller.start()?;

    // Let the red phase run for a bit before the emergency preempts it.
    tokio::time::sleep(Duration::from_millis(2000)).await;

    println!("Emergency Override - Immediate transition to Red Light.");
    controller.trigger_override()?;

    // The override restarted red's dwell; watch one full natural cycle.
    tokio::time::sleep(Duration::from_millis(12_500)).await;

    println!("Light is now: {:?}", controller.current_state());
    println!("Transitions:");
    for record in controller.log().transitions() {
        println!(
            "  {:?} -> {:?} ({:?}, generation {})",
            record.from, record.to, record.cause, record.generation
        );
    }

    Ok(())
}
