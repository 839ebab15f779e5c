//! Camera shake при разрушении цели

use bevy::prelude::*;
use rand::Rng;

use super::SlingshotCamera;
use crate::config::GameConfig;
use crate::damage::TargetDestroyed;
use crate::DeterministicRng;

/// Тряска камеры: случайный offset внутри сферы `magnitude`, пока `remaining > 0`
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CameraShake {
    pub remaining: f32,
    pub magnitude: f32,
    pub offset: Vec3,
}

impl CameraShake {
    pub fn start(&mut self, duration: f32, magnitude: f32) {
        self.remaining = duration.max(0.0);
        self.magnitude = magnitude.max(0.0);
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Следующий offset; после окончания: ноль
    pub fn tick(&mut self, dt: f32, rng: &mut impl Rng) -> Vec3 {
        if !self.is_active() {
            self.offset = Vec3::ZERO;
            return self.offset;
        }

        self.offset = random_in_unit_sphere(rng) * self.magnitude;
        self.remaining -= dt;
        self.offset
    }
}

/// Равномерная точка внутри единичной сферы (rejection sampling)
pub fn random_in_unit_sphere(rng: &mut impl Rng) -> Vec3 {
    loop {
        let point = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        if point.length_squared() <= 1.0 {
            return point;
        }
    }
}

/// Система: TargetDestroyed → тряска всех камер
pub fn trigger_camera_shake(
    mut destroyed: EventReader<TargetDestroyed>,
    mut shakes: Query<&mut CameraShake>,
    config: Res<GameConfig>,
) {
    if destroyed.read().count() == 0 {
        return;
    }

    for mut shake in shakes.iter_mut() {
        shake.start(config.camera.shake_duration, config.camera.shake_magnitude);
    }
}

/// Система: логическая поза + shake offset → Transform
pub fn apply_camera_pose(
    mut cameras: Query<(&SlingshotCamera, Option<&mut CameraShake>, &mut Transform)>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();

    for (camera, shake, mut transform) in cameras.iter_mut() {
        let offset = match shake {
            Some(mut shake) => shake.tick(dt, &mut rng.rng),
            None => Vec3::ZERO,
        };

        transform.translation = camera.position + offset;
        transform.rotation = camera.rotation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_shake_offset_within_magnitude() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut shake = CameraShake::default();
        shake.start(0.25, 0.2);

        for _ in 0..10 {
            let offset = shake.tick(1.0 / 60.0, &mut rng);
            assert!(offset.length() <= 0.2 + 1e-6);
        }
    }

    #[test]
    fn test_shake_stops_after_duration() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut shake = CameraShake::default();
        shake.start(0.1, 0.2);

        shake.tick(0.05, &mut rng);
        shake.tick(0.06, &mut rng);

        assert!(!shake.is_active());
        assert_eq!(shake.tick(0.05, &mut rng), Vec3::ZERO);
    }

    #[test]
    fn test_same_seed_same_shake() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..5 {
            assert_eq!(random_in_unit_sphere(&mut a), random_in_unit_sphere(&mut b));
        }
    }
}
