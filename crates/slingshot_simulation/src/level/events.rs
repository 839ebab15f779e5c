//! Level события

use bevy::prelude::*;

/// Загрузить уровень `index` из `LevelCatalog`
///
/// Шлёт хост (старт игры) или session flow (переход после победы).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadLevelRequested {
    pub index: usize,
}

/// Уровень заспавнен, sequencer и session сброшены
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelStarted {
    pub index: usize,
    pub targets: usize,
    pub projectiles: usize,
}
