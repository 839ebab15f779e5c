//! Level layouts (serde, JSON) и каталог уровней

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::ConfigError;

/// Поза: позиция + поворот вокруг Y (градусы)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseSpec {
    pub position: [f32; 3],
    pub yaw_degrees: f32,
}

impl PoseSpec {
    pub fn at(position: [f32; 3]) -> Self {
        Self {
            position,
            yaw_degrees: 0.0,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(Vec3::from_array(self.position))
            .with_rotation(Quat::from_rotation_y(self.yaw_degrees.to_radians()))
    }
}

/// Цель уровня. None → значение из DamageConfig.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetSpec {
    pub position: [f32; 3],
    pub half_extents: [f32; 3],
    pub health: Option<f32>,
    pub score_value: Option<u32>,
}

impl Default for TargetSpec {
    fn default() -> Self {
        Self {
            position: [0.0, 0.5, 20.0],
            half_extents: [0.5, 0.5, 0.5],
            health: None,
            score_value: None,
        }
    }
}

/// Точки крепления резинок; rest None → середина
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandSpec {
    pub left: [f32; 3],
    pub right: [f32; 3],
    #[serde(default)]
    pub rest: Option<[f32; 3]>,
}

/// Поза камеры прицеливания
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraSpec {
    pub position: [f32; 3],
    pub look_at: [f32; 3],
}

/// Раскладка одного уровня
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelLayout {
    pub name: String,
    pub anchor: PoseSpec,
    /// Rest позы снарядов, в порядке очереди
    pub projectiles: Vec<PoseSpec>,
    pub targets: Vec<TargetSpec>,
    pub bands: Option<BandSpec>,
    pub camera: Option<CameraSpec>,
    /// None → `SessionConfig::level_time_limit`
    pub time_limit: Option<f32>,
    /// None → `SequencerConfig::max_projectiles`
    pub max_projectiles: Option<usize>,
    pub split_ability: bool,
}

/// Упорядоченный список уровней (resource)
#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelCatalog {
    pub levels: Vec<LevelLayout>,
}

impl LevelCatalog {
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

    pub fn get(&self, index: usize) -> Option<&LevelLayout> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Встроенные три уровня прототипа
    pub fn demo() -> Self {
        let anchor = PoseSpec::at([0.0, 1.0, 0.0]);
        let bands = Some(BandSpec {
            left: [-0.4, 1.2, 0.0],
            right: [0.4, 1.2, 0.0],
            rest: None,
        });
        let camera = Some(CameraSpec {
            position: [0.0, 4.0, -10.0],
            look_at: [0.0, 1.0, 12.0],
        });
        let queue = |count: usize| -> Vec<PoseSpec> {
            (0..count)
                .map(|i| PoseSpec::at([-1.5 - i as f32, 0.25, -1.0]))
                .collect()
        };
        let target = |x: f32, y: f32, z: f32| TargetSpec {
            position: [x, y, z],
            ..TargetSpec::default()
        };

        Self {
            levels: vec![
                LevelLayout {
                    name: "Meadow".to_string(),
                    anchor,
                    projectiles: queue(3),
                    targets: vec![target(0.0, 0.5, 20.0), target(1.5, 0.5, 21.0)],
                    bands,
                    camera,
                    ..default()
                },
                LevelLayout {
                    name: "Tower".to_string(),
                    anchor,
                    projectiles: queue(3),
                    targets: vec![
                        target(-1.0, 0.5, 22.0),
                        target(1.0, 0.5, 22.0),
                        target(0.0, 1.5, 22.0),
                    ],
                    bands,
                    camera,
                    split_ability: true,
                    ..default()
                },
                LevelLayout {
                    name: "Fortress".to_string(),
                    anchor,
                    projectiles: queue(4),
                    targets: vec![
                        TargetSpec {
                            health: Some(15.0),
                            score_value: Some(150),
                            ..target(0.0, 0.5, 25.0)
                        },
                        target(-2.0, 0.5, 24.0),
                        target(2.0, 0.5, 24.0),
                    ],
                    bands,
                    camera,
                    time_limit: Some(90.0),
                    max_projectiles: Some(4),
                    split_ability: true,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalog() {
        let catalog = LevelCatalog::demo();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.levels.iter().all(|level| !level.targets.is_empty()));
        assert!(catalog.get(3).is_none());
    }

    #[test]
    fn test_layout_from_partial_json() {
        let catalog = LevelCatalog::from_json_str(
            r#"{
                "levels": [{
                    "name": "Test",
                    "anchor": { "position": [0.0, 1.0, 0.0] },
                    "projectiles": [{ "position": [-2.0, 0.25, 0.0] }],
                    "targets": [{ "position": [0.0, 0.5, 10.0], "health": 4.0 }],
                    "time_limit": 30.0
                }]
            }"#,
        )
        .unwrap();

        let level = catalog.get(0).unwrap();
        assert_eq!(level.projectiles.len(), 1);
        assert_eq!(level.targets[0].health, Some(4.0));
        assert_eq!(level.targets[0].half_extents, [0.5, 0.5, 0.5]);
        assert_eq!(level.time_limit, Some(30.0));
        assert!(level.bands.is_none());
        assert!(!level.split_ability);
    }

    #[test]
    fn test_pose_yaw() {
        let pose = PoseSpec {
            position: [1.0, 2.0, 3.0],
            yaw_degrees: 90.0,
        };
        let transform = pose.transform();
        assert_eq!(transform.translation, Vec3::new(1.0, 2.0, 3.0));
        assert!((transform.forward().as_vec3() - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_invalid_catalog_json() {
        assert!(matches!(
            LevelCatalog::from_json_str("[1, 2").unwrap_err(),
            ConfigError::Parse(_)
        ));
    }
}
