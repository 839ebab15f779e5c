//! Turn Sequencer module
//!
//! Очередь снарядов уровня: по одному подаётся на anchor (ease-in-out tween),
//! ждёт запуска, после destroy delay удаляется, пауза, следующий.
//! Когда очередь исчерпана и цели остались → `LossTriggered`.

use bevy::prelude::*;

pub mod events;
pub mod state;
pub mod systems;
pub mod tween;

#[cfg(test)]
mod sequencer_tests;

pub use events::{LossTriggered, ProjectileAssigned};
pub use state::{QueuedProjectile, SequencerPhase, TurnSequencer};
pub use systems::advance_turn_sequencer;
pub use tween::{ease_in_out, Countdown, TransitionTween, TweenStatus};

use crate::SimulationSet;

pub struct SequencerPlugin;

impl Plugin for SequencerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ProjectileAssigned>()
            .add_event::<LossTriggered>()
            .init_resource::<TurnSequencer>();

        app.add_systems(
            FixedUpdate,
            advance_turn_sequencer.in_set(SimulationSet::Sequencer),
        );
    }
}
