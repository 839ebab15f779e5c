//! Target компоненты: health, tuning урона, cue cooldown

use bevy::prelude::*;

use crate::config::DamageConfig;
use crate::physics::{BodyKind, TargetVolume};

/// Тип попадания: снаряд (direct) или всё остальное (indirect)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum HitKind {
    Direct,
    Indirect,
}

impl HitKind {
    /// Классификация по тегу второго тела. Без тега → indirect.
    pub fn from_body_kind(kind: Option<&BodyKind>) -> Self {
        match kind {
            Some(BodyKind::Projectile) => HitKind::Direct,
            Some(BodyKind::Debris) | Some(BodyKind::Scenery) | None => HitKind::Indirect,
        }
    }
}

/// Параметры пересчёта impulse → damage (копия DamageConfig при спавне)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct DamageTuning {
    pub min_impact: f32,
    pub impulse_to_damage: f32,
    pub indirect_multiplier: f32,
    pub hit_cue_cooldown: f32,
}

impl Default for DamageTuning {
    fn default() -> Self {
        Self::from(&DamageConfig::default())
    }
}

impl From<&DamageConfig> for DamageTuning {
    fn from(config: &DamageConfig) -> Self {
        Self {
            min_impact: config.min_impact_for_damage,
            impulse_to_damage: config.impulse_to_damage,
            indirect_multiplier: config.indirect_multiplier,
            hit_cue_cooldown: config.hit_cue_cooldown,
        }
    }
}

/// Результат применения урона к цели
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    /// Цель уже разрушена или урон нулевой
    Ignored,
    Damaged { remaining: f32 },
    /// Health упал до нуля (ровно один раз за жизнь цели)
    Destroyed,
}

/// Разрушаемая цель («свинья»)
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Transform, TargetVolume)]
pub struct Target {
    pub health: f32,
    pub max_health: f32,
    pub score_value: u32,
    pub tuning: DamageTuning,
    /// Время (elapsed secs), раньше которого hit cue не проигрывается
    pub next_cue_time: f32,
    pub destroyed: bool,
}

impl Default for Target {
    fn default() -> Self {
        Self::from_config(&DamageConfig::default())
    }
}

impl Target {
    pub fn from_config(config: &DamageConfig) -> Self {
        Self {
            health: config.max_health,
            max_health: config.max_health,
            score_value: config.score_value,
            tuning: DamageTuning::from(config),
            next_cue_time: 0.0,
            destroyed: false,
        }
    }

    pub fn with_health(mut self, health: f32) -> Self {
        self.health = health;
        self.max_health = health;
        self
    }

    pub fn with_score(mut self, score_value: u32) -> Self {
        self.score_value = score_value;
        self
    }

    pub fn health_percent(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    pub fn apply_damage(&mut self, damage: f32) -> HitOutcome {
        if self.destroyed || damage <= 0.0 {
            return HitOutcome::Ignored;
        }

        self.health -= damage;
        if self.health <= 0.0 {
            self.health = 0.0;
            self.destroyed = true;
            HitOutcome::Destroyed
        } else {
            HitOutcome::Damaged {
                remaining: self.health,
            }
        }
    }

    /// Rate limit hit cue: true не чаще раза в `hit_cue_cooldown`
    pub fn take_cue(&mut self, now: f32) -> bool {
        if now < self.next_cue_time {
            return false;
        }
        self.next_cue_time = now + self.tuning.hit_cue_cooldown;
        true
    }
}

/// Impulse → damage
///
/// Ниже порога `min_impact` урона нет; indirect попадания ослаблены.
pub fn compute_damage(impulse: f32, kind: HitKind, tuning: &DamageTuning) -> f32 {
    if impulse < tuning.min_impact {
        return 0.0;
    }

    let multiplier = match kind {
        HitKind::Direct => 1.0,
        HitKind::Indirect => tuning.indirect_multiplier,
    };
    impulse * tuning.impulse_to_damage * multiplier
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_below_threshold_is_zero() {
        let tuning = DamageTuning::default();
        assert_eq!(compute_damage(1.5, HitKind::Direct, &tuning), 0.0);
        assert_eq!(compute_damage(1.99, HitKind::Indirect, &tuning), 0.0);
    }

    #[test]
    fn test_direct_hit_full_damage() {
        let tuning = DamageTuning::default();
        assert_eq!(compute_damage(2.0, HitKind::Direct, &tuning), 2.0);
        assert_eq!(compute_damage(8.0, HitKind::Direct, &tuning), 8.0);
    }

    #[test]
    fn test_indirect_hit_halved() {
        let tuning = DamageTuning::default();
        assert_eq!(compute_damage(6.0, HitKind::Indirect, &tuning), 3.0);
    }

    #[test]
    fn test_hit_kind_from_tag() {
        assert_eq!(HitKind::from_body_kind(Some(&BodyKind::Projectile)), HitKind::Direct);
        assert_eq!(HitKind::from_body_kind(Some(&BodyKind::Debris)), HitKind::Indirect);
        assert_eq!(HitKind::from_body_kind(None), HitKind::Indirect);
    }

    #[test]
    fn test_destroyed_exactly_once() {
        let mut target = Target::default();

        assert_eq!(target.apply_damage(4.0), HitOutcome::Damaged { remaining: 6.0 });
        assert_eq!(target.apply_damage(7.0), HitOutcome::Destroyed);
        assert!(target.destroyed);
        assert_eq!(target.health, 0.0);

        assert_eq!(target.apply_damage(5.0), HitOutcome::Ignored);
    }

    #[test]
    fn test_cue_rate_limited() {
        let mut target = Target::default();

        assert!(target.take_cue(1.0));
        assert!(!target.take_cue(1.05));
        assert!(target.take_cue(1.15));
        assert!(!target.take_cue(1.2));
    }

    #[test]
    fn test_health_percent() {
        let mut target = Target::default().with_health(20.0);
        target.apply_damage(5.0);
        assert!((target.health_percent() - 0.75).abs() < 1e-6);
    }
}
