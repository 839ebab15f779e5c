//! Физические данные тел: то, что заполняет/читает physics bridge хоста.

use bevy::prelude::*;

/// Режим тела: кинематика (позицию ставит симуляция) или динамика (двигает физика)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum BodyMode {
    #[default]
    Kinematic,
    Dynamic,
}

/// Rigid body снаряда/обломка
///
/// Инвариант: Kinematic → Dynamic ровно один раз (`launch`), обратно: только
/// `reset_kinematic` при повторной установке на anchor до запуска.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody {
    pub velocity: Vec3,
    pub mode: BodyMode,
    /// Масса (kg), reference integrator считает impulse = mass × speed
    pub mass: f32,
    /// Радиус для contact detection
    pub radius: f32,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self::kinematic(1.0, 0.25)
    }
}

impl PhysicsBody {
    pub fn kinematic(mass: f32, radius: f32) -> Self {
        Self {
            velocity: Vec3::ZERO,
            mode: BodyMode::Kinematic,
            mass,
            radius,
        }
    }

    pub fn dynamic(velocity: Vec3, mass: f32, radius: f32) -> Self {
        Self {
            velocity,
            mode: BodyMode::Dynamic,
            mass,
            radius,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        self.mode == BodyMode::Dynamic
    }

    /// Передать тело физике с начальной скоростью.
    ///
    /// Возвращает false если тело уже динамическое (повторный launch игнорируется).
    pub fn launch(&mut self, velocity: Vec3) -> bool {
        if self.is_dynamic() {
            return false;
        }
        self.mode = BodyMode::Dynamic;
        self.velocity = velocity;
        true
    }

    pub fn reset_kinematic(&mut self) {
        self.mode = BodyMode::Kinematic;
        self.velocity = Vec3::ZERO;
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Тег тела, выставляется при спавне.
///
/// Damage model классифицирует попадание по тегу (direct = Projectile),
/// вместо поиска компонентов на каждом contact.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub enum BodyKind {
    Projectile,
    Debris,
    Scenery,
}

/// Axis-aligned объём цели (half extents вокруг Transform.translation)
///
/// Используется trajectory probe и reference contact detection.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct TargetVolume {
    pub half_extents: Vec3,
}

impl Default for TargetVolume {
    fn default() -> Self {
        Self {
            half_extents: Vec3::splat(0.5),
        }
    }
}

impl TargetVolume {
    pub fn new(half_extents: Vec3) -> Self {
        Self {
            half_extents: half_extents.abs(),
        }
    }

    pub fn min(&self, center: Vec3) -> Vec3 {
        center - self.half_extents
    }

    pub fn max(&self, center: Vec3) -> Vec3 {
        center + self.half_extents
    }

    /// Точка (со сферой радиуса `margin`) пересекает объём
    pub fn contains(&self, center: Vec3, point: Vec3, margin: f32) -> bool {
        let min = self.min(center) - Vec3::splat(margin);
        let max = self.max(center) + Vec3::splat(margin);
        point.cmpge(min).all() && point.cmple(max).all()
    }
}
