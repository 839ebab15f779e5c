//! Launch компоненты: anchor, снаряд, параметры запуска, trajectory preview

use bevy::prelude::*;

use crate::config::LaunchConfig;

/// Точка запуска (рогатка). Позиция и ориентация: из Transform.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct LaunchAnchor;

/// Фаза снаряда в очереди
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum ProjectilePhase {
    /// Лежит на rest позиции, ждёт очереди
    #[default]
    Queued,
    /// Sequencer тянет его к anchor
    Transitioning,
    /// На anchor, можно хватать
    Ready,
    /// Игрок тянет
    Dragging,
    /// Отпущен, движение у физики
    Launched,
}

/// Снаряд («птица»)
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Transform, TrajectoryPreview)]
pub struct Projectile {
    pub phase: ProjectilePhase,
    /// Позиция anchor, к которой снаряд привязан после transition
    pub start_position: Vec3,
}

impl Projectile {
    pub fn is_draggable(&self) -> bool {
        matches!(self.phase, ProjectilePhase::Ready | ProjectilePhase::Dragging)
    }

    pub fn is_launched(&self) -> bool {
        self.phase == ProjectilePhase::Launched
    }
}

/// Параметры launch на конкретном снаряде (копия LaunchConfig при спавне)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct LaunchParams {
    pub launch_power: f32,
    pub min_angle: f32,
    pub max_angle: f32,
    pub max_drag_distance: f32,
    pub max_launch_speed: f32,
}

impl Default for LaunchParams {
    fn default() -> Self {
        Self::from(&LaunchConfig::default())
    }
}

impl From<&LaunchConfig> for LaunchParams {
    fn from(config: &LaunchConfig) -> Self {
        Self {
            launch_power: config.launch_power,
            min_angle: config.min_angle,
            max_angle: config.max_angle,
            max_drag_distance: config.max_drag_distance,
            max_launch_speed: config.max_launch_speed,
        }
    }
}

/// Цвет trajectory line (renderer читает `rgba`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum TrajectoryTint {
    #[default]
    Clear,
    Hit,
}

impl TrajectoryTint {
    pub fn rgba(&self) -> [f32; 4] {
        match self {
            TrajectoryTint::Clear => [1.0, 1.0, 1.0, 1.0],
            TrajectoryTint::Hit => [1.0, 0.0, 0.0, 1.0],
        }
    }
}

/// Предсказанная траектория (только визуал, на геймплей не влияет)
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct TrajectoryPreview {
    pub visible: bool,
    pub points: Vec<Vec3>,
    pub will_hit: bool,
    pub tint: TrajectoryTint,
}

impl TrajectoryPreview {
    pub fn hide(&mut self) {
        self.visible = false;
        self.points.clear();
        self.will_hit = false;
        self.tint = TrajectoryTint::Clear;
    }
}

/// Какой снаряд сейчас тянут (не больше одного)
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct DragState {
    pub active: Option<Entity>,
}
