//! Damage события

use bevy::prelude::*;

use super::HitKind;

/// Событие: цель получила урон
///
/// `play_cue` уже учитывает cooldown, хост просто проигрывает звук.
#[derive(Event, Debug, Clone, Copy)]
pub struct TargetHit {
    pub target: Entity,
    pub other: Entity,
    pub kind: HitKind,
    pub damage: f32,
    pub remaining_health: f32,
    pub play_cue: bool,
}

/// Событие: цель разрушена (ровно одно на цель)
///
/// Хост спавнит VFX в `position`, session начисляет `score_value`.
#[derive(Event, Debug, Clone, Copy)]
pub struct TargetDestroyed {
    pub target: Entity,
    pub score_value: u32,
    pub position: Vec3,
}
