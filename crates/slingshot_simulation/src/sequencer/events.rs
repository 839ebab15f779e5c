//! Sequencer события

use bevy::prelude::*;

/// Снаряд назначен на anchor (начался transition)
///
/// Камера переключается на него, HUD обновляет счётчик.
#[derive(Event, Debug, Clone, Copy)]
pub struct ProjectileAssigned {
    pub projectile: Entity,
    pub remaining: usize,
}

/// Очередь исчерпана, а цели ещё остались → проигрыш
#[derive(Event, Debug, Clone, Copy)]
pub struct LossTriggered {
    pub remaining_targets: u32,
}
