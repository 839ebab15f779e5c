//! Launch математика: pull → velocity, closed-form траектория
//!
//! Чистые функции без ECS, используются системами launch и тестами.

use bevy::prelude::*;

use super::LaunchParams;
use crate::physics::{probe_down, TargetVolume};

/// Ограничить drag offset радиусом `max_drag_distance`
pub fn clamp_pull(offset: Vec3, max_drag_distance: f32) -> Vec3 {
    offset.clamp_length_max(max_drag_distance.max(0.0))
}

/// Velocity запуска из вектора натяжения (anchor − текущая позиция снаряда)
///
/// - speed = clamp(|pull| × launch_power, 0, max_launch_speed)
/// - angle = lerp(min_angle, max_angle, clamp01(|pull| / max_drag))
/// - горизонталь = flatten(pull).normalize, вертикаль = +Y
///
/// Нулевой pull → `Vec3::ZERO` (запуска нет).
pub fn calculate_launch_velocity(pull: Vec3, params: &LaunchParams) -> Vec3 {
    let pull_distance = pull.length();
    if pull_distance <= f32::EPSILON {
        return Vec3::ZERO;
    }

    let speed = (pull_distance * params.launch_power).clamp(0.0, params.max_launch_speed);

    let t = if params.max_drag_distance > 0.0 {
        (pull_distance / params.max_drag_distance).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let angle = (params.min_angle + (params.max_angle - params.min_angle) * t).to_radians();

    let flat_direction = Vec3::new(pull.x, 0.0, pull.z).normalize_or_zero();

    flat_direction * (speed * angle.cos()) + Vec3::Y * (speed * angle.sin())
}

/// Позиция на траектории в момент `t`: start + v·t + ½·g·t²
pub fn position_at(start: Vec3, velocity: Vec3, gravity: Vec3, t: f32) -> Vec3 {
    start + velocity * t + 0.5 * gravity * t * t
}

/// Polyline предсказанной траектории: `points` точек с шагом `time_step`.
///
/// Точка 0 всегда равна `start`.
pub fn predict_trajectory(
    start: Vec3,
    velocity: Vec3,
    gravity: Vec3,
    points: usize,
    time_step: f32,
) -> Vec<Vec3> {
    (0..points)
        .map(|i| {
            if i == 0 {
                start
            } else {
                position_at(start, velocity, gravity, i as f32 * time_step)
            }
        })
        .collect()
}

/// Хоть одна точка траектории задевает target volume коротким probe вниз.
///
/// Только для preview: на запуск не влияет.
pub fn probe_trajectory(
    points: &[Vec3],
    volumes: &[(Vec3, &TargetVolume)],
    probe_distance: f32,
) -> bool {
    points
        .iter()
        .any(|point| probe_down(*point, probe_distance, volumes.iter().copied()))
}
