//! Session state: счёт, цели, таймер, исход уровня

use bevy::prelude::*;

/// Исход уровня. InProgress → Won | Lost, ровно один переход за уровень.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum Outcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

/// Подсчёт целей откладывается на тик после старта уровня
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum CensusState {
    Pending { frames: u32 },
    Captured,
}

impl Default for CensusState {
    fn default() -> Self {
        CensusState::Pending { frames: 1 }
    }
}

/// Почему уровень выигран
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum CompletionReason {
    AllTargetsDestroyed,
    TimeExpired,
}

/// Прогресс сессии (resource)
///
/// `total_score` переживает смену уровней, остальное сбрасывается
/// в `begin_level`. Полный сброс: `new_game`.
#[derive(Resource, Debug, Clone, Default, Reflect)]
#[reflect(Resource)]
pub struct SessionState {
    /// None до census
    pub total_targets: Option<u32>,
    pub destroyed_targets: u32,
    pub total_score: u32,
    pub level_score: u32,
    pub projectiles_remaining: usize,
    /// None: уровень без таймера
    pub time_remaining: Option<f32>,
    pub outcome: Outcome,
    pub census: CensusState,
}

impl SessionState {
    pub fn new_game(&mut self) {
        *self = Self::default();
    }

    /// Новый уровень: всё кроме cumulative score с нуля
    pub fn begin_level(&mut self, projectiles: usize, time_limit: Option<f32>) {
        let total_score = self.total_score;
        *self = Self {
            total_score,
            projectiles_remaining: projectiles,
            time_remaining: time_limit.map(|limit| limit.max(0.0)),
            ..Self::default()
        };
    }

    /// Census: живые цели + уже разрушенные до подсчёта.
    ///
    /// Some(reason): все цели разрушены ещё до census, уровень выигран.
    pub fn capture_total(&mut self, alive: u32) -> Option<CompletionReason> {
        self.total_targets = Some(alive + self.destroyed_targets);
        self.census = CensusState::Captured;

        if self.is_in_progress() && self.all_targets_destroyed() {
            self.outcome = Outcome::Won;
            return Some(CompletionReason::AllTargetsDestroyed);
        }
        None
    }

    pub fn all_targets_destroyed(&self) -> bool {
        match self.total_targets {
            Some(total) => total > 0 && self.destroyed_targets >= total,
            None => false,
        }
    }

    pub fn remaining_targets(&self) -> u32 {
        self.total_targets
            .unwrap_or(0)
            .saturating_sub(self.destroyed_targets)
    }

    pub fn is_in_progress(&self) -> bool {
        self.outcome == Outcome::InProgress
    }

    /// Разрушение цели. Some(reason): уровень только что выигран.
    ///
    /// После победы разрушения больше не считаются.
    pub fn record_destroyed(&mut self, score_value: u32) -> Option<CompletionReason> {
        if self.outcome == Outcome::Won {
            return None;
        }

        self.destroyed_targets += 1;
        self.total_score = self.total_score.saturating_add(score_value);
        self.level_score = self.level_score.saturating_add(score_value);

        if self.is_in_progress() && self.all_targets_destroyed() {
            self.outcome = Outcome::Won;
            return Some(CompletionReason::AllTargetsDestroyed);
        }
        None
    }

    /// Таймер уровня. Some(reason): время вышло, уровень выигран.
    pub fn tick_timer(&mut self, dt: f32) -> Option<CompletionReason> {
        if !self.is_in_progress() {
            return None;
        }
        let remaining = self.time_remaining.as_mut()?;

        *remaining = (*remaining - dt).max(0.0);
        if *remaining <= 0.0 {
            self.outcome = Outcome::Won;
            return Some(CompletionReason::TimeExpired);
        }
        None
    }

    /// Проигрыш: штраф (не ниже нуля). false: исход уже решён.
    pub fn apply_loss(&mut self, penalty: u32) -> bool {
        if !self.is_in_progress() || self.all_targets_destroyed() {
            return false;
        }

        self.total_score = self.total_score.saturating_sub(penalty);
        self.outcome = Outcome::Lost;
        true
    }
}

/// Позиция в каталоге уровней
#[derive(Resource, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Resource)]
pub struct LevelProgress {
    pub current: usize,
    pub count: usize,
}

impl LevelProgress {
    pub fn is_final(&self) -> bool {
        self.current + 1 >= self.count
    }

    pub fn next(&self) -> Option<usize> {
        if self.is_final() {
            None
        } else {
            Some(self.current + 1)
        }
    }
}
