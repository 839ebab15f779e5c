//! Level системы: загрузка уровня по запросу

use bevy::prelude::*;

use super::{
    spawn_level, LevelCatalog, LevelEntity, LevelStarted, LoadLevelRequested, NewGameRequested,
};
use crate::config::GameConfig;
use crate::launch::DragState;
use crate::sequencer::TurnSequencer;
use crate::session::{LevelFlow, LevelProgress, SessionState};

/// Система: LoadLevelRequested / NewGameRequested → пересборка уровня
///
/// 1. Despawn всех LevelEntity прошлого уровня
/// 2. Spawn раскладки из каталога
/// 3. Сброс sequencer, session (cumulative score сохраняется), flow, скорости времени
///
/// Из нескольких запросов за тик берётся последний.
pub fn load_requested_level(
    mut commands: Commands,
    mut new_games: EventReader<NewGameRequested>,
    mut requests: EventReader<LoadLevelRequested>,
    catalog: Res<LevelCatalog>,
    config: Res<GameConfig>,
    existing: Query<Entity, With<LevelEntity>>,
    mut sequencer: ResMut<TurnSequencer>,
    mut session: ResMut<SessionState>,
    mut progress: ResMut<LevelProgress>,
    mut flow: ResMut<LevelFlow>,
    mut drag: ResMut<DragState>,
    mut virtual_time: ResMut<Time<Virtual>>,
    mut started: EventWriter<LevelStarted>,
) {
    let new_game = new_games.read().count() > 0;
    let index = match requests.read().last() {
        Some(request) => request.index,
        None if new_game => 0,
        None => return,
    };

    let Some(layout) = catalog.get(index) else {
        crate::logger::log_error(&format!(
            "LoadLevelRequested: level {} not in catalog ({} levels)",
            index,
            catalog.len()
        ));
        return;
    };

    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }

    let spawned = spawn_level(&mut commands, layout, &config);

    let max_projectiles = layout
        .max_projectiles
        .unwrap_or(config.sequencer.max_projectiles);
    sequencer.configure(spawned.anchor, spawned.projectiles.clone(), max_projectiles);

    if new_game {
        session.new_game();
    }
    session.begin_level(
        sequencer.remaining(),
        layout.time_limit.or(config.session.level_time_limit),
    );

    *progress = LevelProgress {
        current: index,
        count: catalog.len(),
    };
    *flow = LevelFlow::Playing;
    drag.active = None;
    virtual_time.set_relative_speed(1.0);

    crate::logger::log_info(&format!(
        "🗺️ Level {} '{}' loaded: {} projectiles, {} targets",
        index,
        layout.name,
        spawned.projectiles.len(),
        spawned.targets.len()
    ));
    started.write(LevelStarted {
        index,
        targets: spawned.targets.len(),
        projectiles: spawned.projectiles.len(),
    });
}
