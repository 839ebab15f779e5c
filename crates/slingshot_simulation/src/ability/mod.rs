//! Split ability
//!
//! Летящий снаряд с `SplitAbility` по `AbilityRequested` делится на три
//! фрагмента веером (yaw −spread, 0, +spread) с той же скоростью.
//! Фрагменты живут `fragment_lifetime`, оригинал удаляется. Один раз.

use bevy::prelude::*;

use crate::config::{AbilityConfig, GameConfig};
use crate::launch::Projectile;
use crate::level::LevelEntity;
use crate::physics::{BodyKind, PhysicsBody};
use crate::SimulationSet;

/// Способность «разделиться» на снаряде
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct SplitAbility {
    pub used: bool,
    /// Градусы
    pub spread_angle: f32,
}

impl Default for SplitAbility {
    fn default() -> Self {
        Self {
            used: false,
            spread_angle: AbilityConfig::default().spread_angle,
        }
    }
}

/// Фрагмент разделившегося снаряда
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Fragment {
    pub parent: Entity,
}

/// Компонент-маркер: деспавн entity после указанного времени
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct DespawnAfter {
    /// Время деспавна (в секундах от старта, `Time::elapsed_secs`)
    pub despawn_time: f32,
}

/// Запрос игрока (tap во время полёта)
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct AbilityRequested;

/// Снаряд разделился
#[derive(Event, Debug, Clone, Copy)]
pub struct ProjectileSplit {
    pub projectile: Entity,
    pub fragments: [Entity; 3],
}

/// Скорости трёх фрагментов: левый, центр, правый
///
/// Слишком медленный снаряд (< `min_split_speed`) делится вдоль `forward`
/// с `fallback_speed`.
pub fn split_velocities(
    velocity: Vec3,
    forward: Vec3,
    spread_angle: f32,
    config: &AbilityConfig,
) -> [Vec3; 3] {
    let velocity = if velocity.length() < config.min_split_speed {
        forward.normalize_or_zero() * config.fallback_speed
    } else {
        velocity
    };

    let speed = velocity.length();
    let direction = velocity.normalize_or_zero();
    let spread = spread_angle.to_radians();

    [
        Quat::from_rotation_y(-spread) * direction * speed,
        direction * speed,
        Quat::from_rotation_y(spread) * direction * speed,
    ]
}

/// Система: AbilityRequested → split всех летящих снарядов со способностью
pub fn use_split_ability(
    mut commands: Commands,
    mut requests: EventReader<AbilityRequested>,
    mut projectiles: Query<(Entity, &Transform, &PhysicsBody, &mut SplitAbility), With<Projectile>>,
    config: Res<GameConfig>,
    time: Res<Time>,
    mut splits: EventWriter<ProjectileSplit>,
) {
    if requests.read().count() == 0 {
        return;
    }

    let despawn_time = time.elapsed_secs() + config.ability.fragment_lifetime;

    for (entity, transform, body, mut ability) in projectiles.iter_mut() {
        if ability.used || !body.is_dynamic() {
            continue;
        }
        ability.used = true;

        let velocities = split_velocities(
            body.velocity,
            transform.forward().as_vec3(),
            ability.spread_angle,
            &config.ability,
        );

        let fragments = velocities.map(|velocity| {
            commands
                .spawn((
                    Fragment { parent: entity },
                    Transform::from_translation(transform.translation),
                    PhysicsBody::dynamic(velocity, body.mass, body.radius),
                    BodyKind::Projectile,
                    DespawnAfter { despawn_time },
                    LevelEntity,
                ))
                .id()
        });

        commands.entity(entity).despawn();

        crate::logger::log_info(&format!(
            "✨ Projectile {:?} split into {:?}",
            entity, fragments
        ));
        splits.write(ProjectileSplit {
            projectile: entity,
            fragments,
        });
    }
}

/// Система: деспавн entities с истёкшим DespawnAfter
pub fn despawn_after_timeout(
    mut commands: Commands,
    query: Query<(Entity, &DespawnAfter)>,
    time: Res<Time>,
) {
    let current_time = time.elapsed_secs();

    for (entity, despawn_after) in query.iter() {
        if current_time >= despawn_after.despawn_time {
            crate::logger::log(&format!("⚰️ Despawning entity {:?} (timeout)", entity));
            commands.entity(entity).despawn();
        }
    }
}

pub struct AbilityPlugin;

impl Plugin for AbilityPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AbilityRequested>()
            .add_event::<ProjectileSplit>()
            .register_type::<SplitAbility>()
            .register_type::<Fragment>();

        app.add_systems(FixedUpdate, use_split_ability.in_set(SimulationSet::Input));
        app.add_systems(
            FixedUpdate,
            despawn_after_timeout.in_set(SimulationSet::Sequencer),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::ecs::system::RunSystemOnce;

    use super::*;

    fn setup(velocity: Option<Vec3>) -> (World, Entity) {
        let mut world = World::new();
        world.init_resource::<Events<AbilityRequested>>();
        world.init_resource::<Events<ProjectileSplit>>();
        world.init_resource::<Time>();
        world.insert_resource(GameConfig::default());

        let body = match velocity {
            Some(velocity) => PhysicsBody::dynamic(velocity, 1.0, 0.25),
            None => PhysicsBody::default(),
        };
        let projectile = world
            .spawn((
                Projectile::default(),
                Transform::from_xyz(0.0, 3.0, 5.0),
                body,
                SplitAbility::default(),
            ))
            .id();

        (world, projectile)
    }

    fn request(world: &mut World) -> Vec<ProjectileSplit> {
        world.send_event(AbilityRequested);
        world.run_system_once(use_split_ability).unwrap();
        world.resource_mut::<Events<AbilityRequested>>().clear();
        world.resource_mut::<Events<ProjectileSplit>>().drain().collect()
    }

    #[test]
    fn test_split_velocities_fan() {
        let config = AbilityConfig::default();
        let velocity = Vec3::new(0.0, 0.0, 20.0);

        let [left, center, right] = split_velocities(velocity, Vec3::NEG_Z, 15.0, &config);

        assert_eq!(center, velocity);
        assert!((left.length() - 20.0).abs() < 1e-4);
        assert!((right.length() - 20.0).abs() < 1e-4);
        assert!((left.angle_between(center).to_degrees() - 15.0).abs() < 1e-3);
        assert!((right.angle_between(center).to_degrees() - 15.0).abs() < 1e-3);
        assert!((left.x + right.x).abs() < 1e-4);
    }

    #[test]
    fn test_slow_projectile_uses_forward() {
        let config = AbilityConfig::default();

        let [_, center, _] = split_velocities(Vec3::new(0.2, 0.0, 0.0), Vec3::NEG_Z, 15.0, &config);

        assert!((center - Vec3::new(0.0, 0.0, -15.0)).length() < 1e-4);
    }

    #[test]
    fn test_split_spawns_three_fragments_once() {
        let (mut world, projectile) = setup(Some(Vec3::new(0.0, 2.0, 15.0)));

        let splits = request(&mut world);
        assert_eq!(splits.len(), 1);
        assert_eq!(splits[0].projectile, projectile);
        assert!(world.get::<Projectile>(projectile).is_none());

        for fragment in splits[0].fragments {
            assert_eq!(world.get::<Fragment>(fragment).unwrap().parent, projectile);
            assert_eq!(*world.get::<BodyKind>(fragment).unwrap(), BodyKind::Projectile);
            assert!(world.get::<PhysicsBody>(fragment).unwrap().is_dynamic());
            assert!(world.get::<LevelEntity>(fragment).is_some());
        }

        assert!(request(&mut world).is_empty());
    }

    #[test]
    fn test_no_split_before_launch() {
        let (mut world, projectile) = setup(None);

        assert!(request(&mut world).is_empty());
        assert!(!world.get::<SplitAbility>(projectile).unwrap().used);
    }

    #[test]
    fn test_fragments_despawn_after_lifetime() {
        let (mut world, _) = setup(Some(Vec3::new(0.0, 2.0, 15.0)));
        let fragments = request(&mut world)[0].fragments;

        world
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(3.9));
        world.run_system_once(despawn_after_timeout).unwrap();
        assert!(world.get::<Fragment>(fragments[0]).is_some());

        world
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(0.2));
        world.run_system_once(despawn_after_timeout).unwrap();
        for fragment in fragments {
            assert!(world.get::<Fragment>(fragment).is_none());
        }
    }
}
