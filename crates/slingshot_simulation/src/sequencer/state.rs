//! Turn Sequencer state: очередь снарядов + конечный автомат хода

use bevy::prelude::*;

use super::tween::{Countdown, TransitionTween};

/// Снаряд в очереди и его rest поза (запоминается при загрузке уровня)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct QueuedProjectile {
    pub entity: Entity,
    pub rest: Transform,
}

/// Фаза хода
///
/// Idle → Transitioning → Aiming → Launched → Cooldown → Idle | GameOver
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub enum SequencerPhase {
    /// Предыдущий снаряд разрешён, можно подавать следующий
    #[default]
    Idle,
    /// Снаряд едет от rest к anchor
    Transitioning {
        projectile: Entity,
        tween: TransitionTween,
    },
    /// Снаряд на anchor, ждём запуска
    Aiming { projectile: Entity },
    /// Снаряд летит, ждём destroy delay
    Launched {
        projectile: Entity,
        destroy: Countdown,
    },
    /// Снаряд удалён, пауза перед следующим
    Cooldown { next_spawn: Countdown },
    /// Очередь исчерпана (или уровень закончен)
    GameOver,
}

/// Turn Sequencer (resource, один на уровень)
///
/// Инвариант: активен (Transitioning/Aiming/Launched) не больше одного снаряда.
#[derive(Resource, Debug, Clone, Default)]
pub struct TurnSequencer {
    pub anchor: Option<Entity>,
    pub queue: Vec<QueuedProjectile>,
    pub max_projectiles: usize,
    /// Индекс следующего снаряда; увеличивается в момент назначения на anchor
    pub next_index: usize,
    pub phase: SequencerPhase,
}

impl TurnSequencer {
    /// Новая очередь для уровня, состояние с нуля
    pub fn configure(
        &mut self,
        anchor: Entity,
        queue: Vec<QueuedProjectile>,
        max_projectiles: usize,
    ) {
        self.anchor = Some(anchor);
        self.queue = queue;
        self.max_projectiles = max_projectiles;
        self.next_index = 0;
        self.phase = SequencerPhase::Idle;
    }

    pub fn is_configured(&self) -> bool {
        self.anchor.is_some() && !self.queue.is_empty()
    }

    /// Сколько снарядов реально доступно: min(max_projectiles, длина очереди)
    pub fn limit(&self) -> usize {
        self.max_projectiles.min(self.queue.len())
    }

    pub fn remaining(&self) -> usize {
        self.limit().saturating_sub(self.next_index)
    }

    pub fn is_exhausted(&self) -> bool {
        self.next_index >= self.limit()
    }

    /// Снаряд, который сейчас ведёт sequencer
    pub fn current_projectile(&self) -> Option<Entity> {
        match self.phase {
            SequencerPhase::Transitioning { projectile, .. }
            | SequencerPhase::Aiming { projectile }
            | SequencerPhase::Launched { projectile, .. } => Some(projectile),
            SequencerPhase::Idle | SequencerPhase::Cooldown { .. } | SequencerPhase::GameOver => {
                None
            }
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == SequencerPhase::GameOver
    }
}
