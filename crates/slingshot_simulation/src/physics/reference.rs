//! Reference physics для headless прогонов
//!
//! В игре тела двигает физика движка, а bridge шлёт `ContactImpulse`.
//! Здесь: минимальная замена: semi-implicit Euler + плоскость земли +
//! AABB контакты с target volumes. Подключается явно (`ReferencePhysicsPlugin`).

use bevy::prelude::*;

use super::{ContactImpulse, PhysicsBody, TargetVolume};
use crate::config::GameConfig;
use crate::SimulationSet;

pub struct ReferencePhysicsPlugin;

impl Plugin for ReferencePhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (integrate_dynamic_bodies, detect_volume_contacts)
                .chain()
                .in_set(SimulationSet::Physics),
        );
    }
}

/// Один шаг semi-implicit Euler: v += g·dt, x += v·dt
///
/// Касание земли гасит скорость (снаряд «лёг»).
pub fn step_body(
    position: Vec3,
    body: &mut PhysicsBody,
    gravity: Vec3,
    ground_height: f32,
    dt: f32,
) -> Vec3 {
    body.velocity += gravity * dt;
    let mut next = position + body.velocity * dt;

    let floor = ground_height + body.radius;
    if next.y < floor {
        next.y = floor;
        body.velocity = Vec3::ZERO;
    }

    next
}

/// Система: интеграция динамических тел (FixedUpdate)
pub fn integrate_dynamic_bodies(
    mut bodies: Query<(&mut Transform, &mut PhysicsBody)>,
    config: Res<GameConfig>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    let gravity = config.physics.gravity();
    let ground = config.physics.ground_height;

    for (mut transform, mut body) in bodies.iter_mut() {
        if !body.is_dynamic() {
            continue;
        }
        transform.translation = step_body(transform.translation, &mut body, gravity, ground, dt);
    }
}

/// Система: динамическое тело внутри target volume → ContactImpulse
///
/// Impulse = mass × speed на момент контакта, после контакта тело теряет скорость.
/// Пока тело остаётся внутри, каждый тик даёт sustained contact с малым impulse.
pub fn detect_volume_contacts(
    mut bodies: Query<(Entity, &Transform, &mut PhysicsBody)>,
    volumes: Query<(Entity, &Transform, &TargetVolume)>,
    mut contacts: EventWriter<ContactImpulse>,
) {
    for (body_entity, body_transform, mut body) in bodies.iter_mut() {
        if !body.is_dynamic() {
            continue;
        }

        let position = body_transform.translation;
        for (target, target_transform, volume) in volumes.iter() {
            if target == body_entity {
                continue;
            }
            if !volume.contains(target_transform.translation, position, body.radius) {
                continue;
            }

            let impulse = body.mass * body.speed();
            contacts.write(ContactImpulse {
                target,
                other: body_entity,
                impulse,
            });
            body.velocity = Vec3::ZERO;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_body_applies_gravity() {
        let mut body = PhysicsBody::dynamic(Vec3::new(10.0, 0.0, 0.0), 1.0, 0.25);
        let gravity = Vec3::new(0.0, -10.0, 0.0);

        let next = step_body(Vec3::new(0.0, 10.0, 0.0), &mut body, gravity, 0.0, 0.1);

        assert!((body.velocity.y + 1.0).abs() < 1e-5);
        assert!((next.x - 1.0).abs() < 1e-5);
        assert!((next.y - 9.9).abs() < 1e-5);
    }

    #[test]
    fn test_step_body_stops_on_ground() {
        let mut body = PhysicsBody::dynamic(Vec3::new(5.0, -20.0, 0.0), 1.0, 0.25);

        let next = step_body(Vec3::new(0.0, 0.5, 0.0), &mut body, Vec3::ZERO, 0.0, 0.1);

        assert_eq!(next.y, 0.25);
        assert_eq!(body.velocity, Vec3::ZERO);
    }
}
