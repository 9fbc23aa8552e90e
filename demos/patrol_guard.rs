//! Patrol Guard
//!
//! A guard that idles until it spots the player, patrols while the player is
//! in view, and falls back to idle from any state once the player is gone.
//!
//! Key concepts:
//! - States keyed by a `state_id!` enum
//! - Guarded transitions evaluated on every `update`
//! - An any-transition that takes precedence over per-state transitions
//! - Checkpointing the machine's position
//!
//! Run with: cargo run --example patrol_guard

use std::cell::Cell;
use std::rc::Rc;
use tickkit::core::{PredicateExt, State};
use tickkit::{state_id, StateMachineBuilder};

state_id! {
    enum GuardState {
        Idle,
        Patrol,
    }
}

struct Idle;

impl State for Idle {
    fn enter(&mut self) {
        println!("  [Idle] settling down");
    }

    fn update(&mut self) {}

    fn fixed_update(&mut self) {}

    fn exit(&mut self) {
        println!("  [Idle] getting up");
    }
}

#[derive(Default)]
struct Patrol {
    steps: u32,
}

impl State for Patrol {
    fn enter(&mut self) {
        self.steps = 0;
        println!("  [Patrol] starting route");
    }

    fn update(&mut self) {}

    fn fixed_update(&mut self) {
        self.steps += 1;
    }

    fn exit(&mut self) {
        println!("  [Patrol] walked {} steps", self.steps);
    }
}

fn main() {
    println!("=== Patrol Guard Example ===\n");

    let player_visible = Rc::new(Cell::new(false));
    let spotted = Rc::clone(&player_visible);
    let gone = Rc::clone(&player_visible);

    let mut guard = StateMachineBuilder::new()
        .state(GuardState::Idle, Idle)
        .state(GuardState::Patrol, Patrol::default())
        .transition(GuardState::Idle, GuardState::Patrol, move || spotted.get())
        .any_transition(GuardState::Idle, (move || gone.get()).not())
        .on_state_changed(|state: &GuardState| println!("  -> now {:?}", state))
        .initial(GuardState::Idle)
        .build()
        .unwrap();

    let visibility = [false, true, true, true, false, false];
    for (frame, visible) in visibility.into_iter().enumerate() {
        println!("Frame {}: player visible = {}", frame, visible);
        player_visible.set(visible);
        guard.update();
        guard.fixed_update();
        guard.fixed_update();
    }

    println!("\nPath: {:?}", guard.history().path());
    println!("Entries: {:?}", guard.metadata().entries);

    let checkpoint = guard.checkpoint().to_json_pretty().unwrap();
    println!("\nCheckpoint:\n{}", checkpoint);

    println!("\n=== Example Complete ===");
}
