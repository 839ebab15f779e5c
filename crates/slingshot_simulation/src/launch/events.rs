//! Launch события: pointer input от хоста → ECS, запуск → sequencer

use bevy::prelude::*;

/// Pointer input от хоста
///
/// Хост делает screen → world проекцию сам и присылает луч.
#[derive(Event, Debug, Clone, Copy)]
pub enum AimInput {
    /// Pointer down на снаряде
    Press { projectile: Entity },
    /// Pointer move во время drag (world-space луч из камеры)
    Drag { ray: Ray3d },
    /// Pointer up
    Release,
}

/// Снаряд отпущен: velocity передана физике
#[derive(Event, Debug, Clone, Copy)]
pub struct ProjectileLaunched {
    pub projectile: Entity,
    pub velocity: Vec3,
}
