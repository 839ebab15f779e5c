//! Session Progress Tracker module
//!
//! ECS ответственность:
//! - census целей (через тик после старта уровня)
//! - счёт: cumulative (через уровни) + level score
//! - исход уровня: победа (все цели / таймер), проигрыш (штраф + slow-motion)
//! - переход на следующий уровень после delay, конец игры на последнем
//! - HUD тексты, пауза

use bevy::prelude::*;

pub mod events;
pub mod hud;
pub mod pause;
pub mod state;
pub mod systems;


pub use events::{GameFinished, LevelCompleted, PauseToggled, SessionLost};
pub use hud::{banner_text, update_hud, Hud};
pub use pause::{toggle_pause, PauseState};
pub use state::{CensusState, CompletionReason, LevelProgress, Outcome, SessionState};
pub use systems::{
    advance_level_flow, capture_target_census, handle_loss, sync_projectiles_remaining,
    tick_level_timer, track_destroyed_targets,
};

use crate::sequencer::Countdown;
use crate::SimulationSet;

/// Что происходит после исхода уровня
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub enum LevelFlow {
    #[default]
    Playing,
    /// Победа, ждём delay перед загрузкой `next`
    Advancing { next: usize, countdown: Countdown },
    /// Последний уровень пройден
    Finished,
}

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LevelCompleted>()
            .add_event::<SessionLost>()
            .add_event::<GameFinished>()
            .add_event::<PauseToggled>()
            .init_resource::<SessionState>()
            .init_resource::<LevelProgress>()
            .init_resource::<LevelFlow>()
            .init_resource::<Hud>()
            .init_resource::<PauseState>()
            .register_type::<SessionState>()
            .register_type::<LevelProgress>();

        app.add_systems(
            FixedUpdate,
            (
                sync_projectiles_remaining,
                track_destroyed_targets,
                capture_target_census,
                tick_level_timer,
                handle_loss,
                advance_level_flow,
            )
                .chain()
                .in_set(SimulationSet::Session),
        );
        app.add_systems(FixedUpdate, update_hud.in_set(SimulationSet::Presentation));

        // Пауза останавливает FixedUpdate, поэтому toggle живёт в Update
        app.add_systems(Update, toggle_pause);
    }
}
