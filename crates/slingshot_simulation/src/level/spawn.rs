//! Спавн уровня из LevelLayout

use bevy::prelude::*;

use super::{LevelEntity, LevelLayout};
use crate::ability::SplitAbility;
use crate::camera::{CameraShake, SlingshotCamera};
use crate::config::GameConfig;
use crate::damage::Target;
use crate::launch::{LaunchAnchor, LaunchParams, Projectile, SlingshotBands};
use crate::physics::{BodyKind, PhysicsBody, TargetVolume};
use crate::sequencer::QueuedProjectile;

/// Что заспавнено (ids валидны сразу, Commands применятся позже)
#[derive(Debug, Clone)]
pub struct SpawnedLevel {
    pub anchor: Entity,
    pub projectiles: Vec<QueuedProjectile>,
    pub targets: Vec<Entity>,
    pub camera: Option<Entity>,
    pub bands: Option<Entity>,
}

pub fn spawn_level(commands: &mut Commands, layout: &LevelLayout, config: &GameConfig) -> SpawnedLevel {
    let anchor = commands
        .spawn((
            LaunchAnchor,
            layout.anchor.transform(),
            LevelEntity,
            Name::new("LaunchAnchor"),
        ))
        .id();

    let mut spawned = SpawnedLevel {
        anchor,
        projectiles: Vec::with_capacity(layout.projectiles.len()),
        targets: Vec::with_capacity(layout.targets.len()),
        camera: None,
        bands: None,
    };

    for (index, pose) in layout.projectiles.iter().enumerate() {
        let rest = pose.transform();
        let mut entity = commands.spawn((
            Projectile::default(),
            rest,
            PhysicsBody::kinematic(config.physics.projectile_mass, config.physics.projectile_radius),
            LaunchParams::from(&config.launch),
            BodyKind::Projectile,
            LevelEntity,
            Name::new(format!("Projectile {}", index)),
        ));
        if layout.split_ability {
            entity.insert(SplitAbility {
                used: false,
                spread_angle: config.ability.spread_angle,
            });
        }

        spawned.projectiles.push(QueuedProjectile {
            entity: entity.id(),
            rest,
        });
    }

    for (index, spec) in layout.targets.iter().enumerate() {
        let mut target = Target::from_config(&config.damage);
        if let Some(health) = spec.health {
            target = target.with_health(health);
        }
        if let Some(score_value) = spec.score_value {
            target = target.with_score(score_value);
        }

        let entity = commands
            .spawn((
                target,
                Transform::from_translation(Vec3::from_array(spec.position)),
                TargetVolume::new(Vec3::from_array(spec.half_extents)),
                BodyKind::Debris,
                LevelEntity,
                Name::new(format!("Target {}", index)),
            ))
            .id();
        spawned.targets.push(entity);
    }

    if let Some(camera) = layout.camera {
        let position = Vec3::from_array(camera.position);
        let look_at = Vec3::from_array(camera.look_at);
        spawned.camera = Some(
            commands
                .spawn((
                    SlingshotCamera::new(position, look_at),
                    CameraShake::default(),
                    Transform::from_translation(position).looking_at(look_at, Vec3::Y),
                    LevelEntity,
                    Name::new("SlingshotCamera"),
                ))
                .id(),
        );
    }

    if let Some(bands) = layout.bands {
        spawned.bands = Some(
            commands
                .spawn((
                    SlingshotBands::new(
                        Vec3::from_array(bands.left),
                        Vec3::from_array(bands.right),
                        bands.rest.map(Vec3::from_array),
                    ),
                    LevelEntity,
                    Name::new("SlingshotBands"),
                ))
                .id(),
        );
    }

    spawned
}
