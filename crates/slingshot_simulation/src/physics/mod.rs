//! Physics bridge module
//!
//! Физика внешняя: движок интегрирует тела и детектит коллизии.
//! ECS ответственность:
//! - данные тел (`PhysicsBody`, `BodyKind`, `TargetVolume`)
//! - приём контактов от bridge (`ContactImpulse`)
//! - downward probe для trajectory preview
//!
//! `ReferencePhysicsPlugin`: минимальный integrator для headless/тестов.

use bevy::prelude::*;

pub mod body;
pub mod probe;
pub mod reference;

pub use body::{BodyKind, BodyMode, PhysicsBody, TargetVolume};
pub use probe::probe_down;
pub use reference::{step_body, ReferencePhysicsPlugin};

/// Событие от physics bridge: контакт с целью (enter и sustained)
///
/// `impulse`: модуль contact impulse за physics step.
#[derive(Event, Debug, Clone, Copy)]
pub struct ContactImpulse {
    pub target: Entity,
    pub other: Entity,
    pub impulse: f32,
}

/// Регистрирует типы physics bridge (без integrator'а)
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ContactImpulse>()
            .register_type::<PhysicsBody>()
            .register_type::<BodyKind>()
            .register_type::<TargetVolume>();
    }
}
