//! Level module
//!
//! Каталог уровней (serde JSON или встроенный demo), спавн раскладки,
//! загрузка по `LoadLevelRequested` с очисткой прошлого уровня.

use bevy::prelude::*;

pub mod events;
pub mod layout;
pub mod spawn;
pub mod systems;


pub use events::{LevelStarted, LoadLevelRequested};
pub use layout::{BandSpec, CameraSpec, LevelCatalog, LevelLayout, PoseSpec, TargetSpec};
pub use spawn::{spawn_level, SpawnedLevel};
pub use systems::load_requested_level;

use crate::SimulationSet;

/// Компонент-маркер: entity принадлежит текущему уровню (удаляется при загрузке)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct LevelEntity;

/// Новая игра: сброс cumulative score + первый уровень
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct NewGameRequested;

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LoadLevelRequested>()
            .add_event::<LevelStarted>()
            .add_event::<NewGameRequested>()
            .register_type::<LevelEntity>();

        // Хост может положить свой каталог до plugin'а
        if !app.world().contains_resource::<LevelCatalog>() {
            app.insert_resource(LevelCatalog::demo());
        }

        app.add_systems(
            FixedUpdate,
            load_requested_level.in_set(SimulationSet::Level),
        );
    }
}
