//! Damage/Target module
//!
//! ECS ответственность:
//! - Target health и tuning урона
//! - ContactImpulse (от physics bridge) → damage → TargetHit / TargetDestroyed
//!
//! Хост: звук hit cue, VFX разрушения.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;

#[cfg(test)]
mod damage_tests;

pub use components::{compute_damage, DamageTuning, HitKind, HitOutcome, Target};
pub use events::{TargetDestroyed, TargetHit};
pub use systems::apply_contact_damage;

use crate::SimulationSet;

pub struct DamagePlugin;

impl Plugin for DamagePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TargetHit>()
            .add_event::<TargetDestroyed>()
            .register_type::<Target>();

        app.add_systems(
            FixedUpdate,
            apply_contact_damage.in_set(SimulationSet::Damage),
        );
    }
}
