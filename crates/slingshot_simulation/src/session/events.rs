//! Session события

use bevy::prelude::*;

use super::CompletionReason;

/// Уровень выигран
#[derive(Event, Debug, Clone, Copy)]
pub struct LevelCompleted {
    pub level: usize,
    pub reason: CompletionReason,
    pub level_score: u32,
    pub total_score: u32,
}

/// Уровень проигран, штраф уже списан
#[derive(Event, Debug, Clone, Copy)]
pub struct SessionLost {
    pub level: usize,
    pub penalty: u32,
    pub total_score: u32,
}

/// Последний уровень пройден
#[derive(Event, Debug, Clone, Copy)]
pub struct GameFinished {
    pub final_score: u32,
}

/// Запрос хоста: пауза / продолжить
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct PauseToggled;
