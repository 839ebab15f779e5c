//! Tuning конфигурация (serde, JSON)
//!
//! Default значения = тюнинг прототипа. Все секции `#[serde(default)]`,
//! поэтому JSON может переопределять только часть полей.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Вся конфигурация симуляции (resource)
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub launch: LaunchConfig,
    pub sequencer: SequencerConfig,
    pub damage: DamageConfig,
    pub session: SessionConfig,
    pub camera: CameraConfig,
    pub ability: AbilityConfig,
    pub physics: PhysicsConfig,
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Parse)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

/// Launch Controller: drag → velocity → trajectory preview
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LaunchConfig {
    /// Множитель pull distance → speed
    pub launch_power: f32,
    /// Угол при минимальном натяжении (градусы)
    pub min_angle: f32,
    /// Угол при полном натяжении (градусы)
    pub max_angle: f32,
    pub max_drag_distance: f32,
    pub max_launch_speed: f32,
    /// Количество точек в trajectory polyline
    pub line_points: usize,
    /// Шаг по времени между точками (секунды)
    pub time_between_points: f32,
    /// Длина downward probe из каждой точки
    pub probe_distance: f32,
    /// Длительность возврата резинок рогатки в rest (секунды)
    pub band_reset_duration: f32,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            launch_power: 45.0,
            min_angle: 8.0,
            max_angle: 45.0,
            max_drag_distance: 5.0,
            max_launch_speed: 40.0,
            line_points: 30,
            time_between_points: 0.1,
            probe_distance: 0.5,
            band_reset_duration: 0.15,
        }
    }
}

/// Turn Sequencer тайминги
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SequencerConfig {
    /// Rest → anchor tween (секунды)
    pub transition_duration: f32,
    /// Верхняя граница очереди (обрезается по количеству снарядов в уровне)
    pub max_projectiles: usize,
    /// Запуск → удаление снаряда
    pub destroy_delay: f32,
    /// Удаление → следующий снаряд
    pub next_spawn_delay: f32,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            transition_duration: 1.0,
            max_projectiles: 3,
            destroy_delay: 5.0,
            next_spawn_delay: 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DamageConfig {
    pub max_health: f32,
    /// Impulse ниже порога урона не наносит
    pub min_impact_for_damage: f32,
    pub impulse_to_damage: f32,
    /// Множитель для непрямых попаданий (обломки, другие тела)
    pub indirect_multiplier: f32,
    pub score_value: u32,
    /// Rate limit hit cue (звук), секунды
    pub hit_cue_cooldown: f32,
}

impl Default for DamageConfig {
    fn default() -> Self {
        Self {
            max_health: 10.0,
            min_impact_for_damage: 2.0,
            impulse_to_damage: 1.0,
            indirect_multiplier: 0.5,
            score_value: 100,
            hit_cue_cooldown: 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    pub delay_before_next_level: f32,
    pub loss_penalty: u32,
    /// Slow-motion после проигрыша
    pub loss_time_scale: f32,
    /// Таймер уровня по умолчанию (None = без таймера). LevelLayout может переопределить.
    pub level_time_limit: Option<f32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            delay_before_next_level: 2.0,
            loss_penalty: 200,
            loss_time_scale: 0.4,
            level_time_limit: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub follow_offset: [f32; 3],
    pub follow_smooth_time: f32,
    pub look_at_smoothness: f32,
    pub return_smooth_time: f32,
    pub return_look_smoothness: f32,
    pub return_delay: f32,
    /// Скорость снаряда, ниже которой он считается остановившимся
    pub min_velocity_threshold: f32,
    /// Высота, ниже которой снаряд считается на земле
    pub ground_height: f32,
    pub snap_distance: f32,
    pub snap_velocity: f32,
    pub shake_duration: f32,
    pub shake_magnitude: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            follow_offset: [0.0, 5.0, -8.0],
            follow_smooth_time: 0.3,
            look_at_smoothness: 8.0,
            return_smooth_time: 1.5,
            return_look_smoothness: 5.0,
            return_delay: 0.5,
            min_velocity_threshold: 0.5,
            ground_height: 2.0,
            snap_distance: 0.05,
            snap_velocity: 0.01,
            shake_duration: 0.25,
            shake_magnitude: 0.2,
        }
    }
}

impl CameraConfig {
    pub fn follow_offset(&self) -> Vec3 {
        Vec3::from_array(self.follow_offset)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AbilityConfig {
    /// Разлёт осколков по yaw (градусы)
    pub spread_angle: f32,
    pub fragment_lifetime: f32,
    /// Ниже этой скорости split использует fallback_speed вдоль forward
    pub min_split_speed: f32,
    pub fallback_speed: f32,
}

impl Default for AbilityConfig {
    fn default() -> Self {
        Self {
            spread_angle: 15.0,
            fragment_lifetime: 4.0,
            min_split_speed: 1.0,
            fallback_speed: 15.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: [f32; 3],
    /// Reference integrator: плоскость земли
    pub ground_height: f32,
    pub projectile_mass: f32,
    pub projectile_radius: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.81, 0.0],
            ground_height: 0.0,
            projectile_mass: 1.0,
            projectile_radius: 0.25,
        }
    }
}

impl PhysicsConfig {
    pub fn gravity(&self) -> Vec3 {
        Vec3::from_array(self.gravity)
    }
}

/// Ошибки загрузки конфигурации
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[source] serde_json::Error),
}
