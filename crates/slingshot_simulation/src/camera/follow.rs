//! Slingshot камера: Fixed → Following → Returning → Fixed

use bevy::prelude::*;

use crate::config::GameConfig;
use crate::physics::PhysicsBody;
use crate::sequencer::ProjectileAssigned;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum CameraState {
    /// Держит позу прицеливания
    #[default]
    Fixed,
    /// Летит за снарядом
    Following,
    /// Возвращается в позу прицеливания
    Returning,
}

/// Камера рогатки
///
/// `position`/`rotation`: логическая поза без shake. Итоговый Transform
/// собирает `apply_camera_pose`.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct SlingshotCamera {
    pub home_position: Vec3,
    pub home_look_at: Vec3,
    pub state: CameraState,
    pub subject: Option<Entity>,
    pub position: Vec3,
    pub rotation: Quat,
    pub damp_velocity: Vec3,
    /// Some: снаряд остановился, отсчитываем return delay
    pub return_timer: Option<f32>,
}

impl SlingshotCamera {
    pub fn new(home_position: Vec3, home_look_at: Vec3) -> Self {
        Self {
            home_position,
            home_look_at,
            state: CameraState::Fixed,
            subject: None,
            position: home_position,
            rotation: look_rotation(home_position, home_look_at),
            damp_velocity: Vec3::ZERO,
            return_timer: None,
        }
    }

    pub fn home_rotation(&self) -> Quat {
        look_rotation(self.home_position, self.home_look_at)
    }

    /// Новый снаряд: сброс в Fixed
    pub fn set_subject(&mut self, subject: Entity) {
        self.subject = Some(subject);
        self.state = CameraState::Fixed;
        self.damp_velocity = Vec3::ZERO;
        self.return_timer = None;
    }

    fn snap_home(&mut self) {
        self.position = self.home_position;
        self.rotation = self.home_rotation();
        self.damp_velocity = Vec3::ZERO;
    }
}

/// Вращение «смотреть из `from` на `to`»
pub fn look_rotation(from: Vec3, to: Vec3) -> Quat {
    Transform::from_translation(from)
        .looking_at(to, Vec3::Y)
        .rotation
}

/// Critically damped сглаживание к цели (SmoothDamp)
///
/// `velocity`: состояние между вызовами. Не перелетает цель.
pub fn smooth_damp(
    current: Vec3,
    target: Vec3,
    velocity: &mut Vec3,
    smooth_time: f32,
    dt: f32,
) -> Vec3 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(0.0001);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    // Перелёт через цель → встаём ровно в цель
    if (target - current).dot(output - target) > 0.0 {
        output = target;
        *velocity = Vec3::ZERO;
    }

    output
}

fn turn_towards(rotation: Quat, from: Vec3, to: Vec3, smoothness: f32, dt: f32) -> Quat {
    if (to - from).length_squared() <= 0.001 {
        return rotation;
    }
    rotation.slerp(look_rotation(from, to), (smoothness * dt).clamp(0.0, 1.0))
}

/// Система: ProjectileAssigned → камера переключается на новый снаряд
pub fn follow_assigned_projectile(
    mut assigned: EventReader<ProjectileAssigned>,
    mut cameras: Query<&mut SlingshotCamera>,
) {
    for event in assigned.read() {
        for mut camera in cameras.iter_mut() {
            camera.set_subject(event.projectile);
            crate::logger::log(&format!("Camera subject: {:?}", event.projectile));
        }
    }
}

/// Система: конечный автомат камеры
pub fn drive_slingshot_camera(
    mut cameras: Query<&mut SlingshotCamera>,
    subjects: Query<(&Transform, &PhysicsBody)>,
    config: Res<GameConfig>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();
    let settings = &config.camera;

    for mut camera in cameras.iter_mut() {
        let subject = camera.subject.and_then(|entity| subjects.get(entity).ok());

        match camera.state {
            CameraState::Fixed => {
                camera.snap_home();

                if let Some((_, body)) = subject {
                    if body.is_dynamic() && body.speed() > settings.min_velocity_threshold {
                        camera.state = CameraState::Following;
                        crate::logger::log("Camera: following projectile");
                    }
                }
            }

            CameraState::Following => {
                let Some((transform, body)) = subject else {
                    // Снаряд удалён в полёте
                    camera.state = CameraState::Returning;
                    camera.return_timer = None;
                    continue;
                };

                let subject_position = transform.translation;
                let goal = subject_position + settings.follow_offset();
                let mut velocity = camera.damp_velocity;
                camera.position = smooth_damp(
                    camera.position,
                    goal,
                    &mut velocity,
                    settings.follow_smooth_time,
                    dt,
                );
                camera.damp_velocity = velocity;
                camera.rotation = turn_towards(
                    camera.rotation,
                    camera.position,
                    subject_position,
                    settings.look_at_smoothness,
                    dt,
                );

                let stopped = body.speed() < settings.min_velocity_threshold;
                let grounded = subject_position.y < settings.ground_height;
                if (stopped || grounded) && camera.return_timer.is_none() {
                    camera.return_timer = Some(0.0);
                }

                if let Some(elapsed) = camera.return_timer {
                    let elapsed = elapsed + dt;
                    if elapsed >= settings.return_delay {
                        camera.state = CameraState::Returning;
                        camera.return_timer = None;
                        crate::logger::log("Camera: returning");
                    } else {
                        camera.return_timer = Some(elapsed);
                    }
                }
            }

            CameraState::Returning => {
                let home = camera.home_position;
                let look_at = camera.home_look_at;
                let mut velocity = camera.damp_velocity;
                camera.position = smooth_damp(
                    camera.position,
                    home,
                    &mut velocity,
                    settings.return_smooth_time,
                    dt,
                );
                camera.damp_velocity = velocity;
                camera.rotation = turn_towards(
                    camera.rotation,
                    camera.position,
                    look_at,
                    settings.return_look_smoothness,
                    dt,
                );

                if camera.position.distance(home) < settings.snap_distance
                    && camera.damp_velocity.length() < settings.snap_velocity
                {
                    camera.snap_home();
                    camera.state = CameraState::Fixed;
                    crate::logger::log("Camera: back on the slingshot");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_damp_converges_without_overshoot() {
        let target = Vec3::new(10.0, 0.0, 0.0);
        let mut position = Vec3::ZERO;
        let mut velocity = Vec3::ZERO;

        for _ in 0..600 {
            position = smooth_damp(position, target, &mut velocity, 0.3, 1.0 / 60.0);
            assert!(position.x <= target.x + 1e-5);
        }

        assert!(position.distance(target) < 1e-3);
    }

    #[test]
    fn test_smooth_damp_zero_dt_keeps_position() {
        let mut velocity = Vec3::ONE;
        let position = smooth_damp(Vec3::ZERO, Vec3::X, &mut velocity, 0.3, 0.0);
        assert_eq!(position, Vec3::ZERO);
        assert_eq!(velocity, Vec3::ONE);
    }

    #[test]
    fn test_home_rotation_looks_at_point() {
        let camera = SlingshotCamera::new(Vec3::new(0.0, 5.0, -10.0), Vec3::new(0.0, 0.0, 10.0));
        let forward = camera.rotation * Vec3::NEG_Z;
        let expected = (camera.home_look_at - camera.home_position).normalize();
        assert!(forward.distance(expected) < 1e-4);
    }

    #[test]
    fn test_set_subject_resets_to_fixed() {
        let mut camera = SlingshotCamera::new(Vec3::ZERO, Vec3::Z);
        camera.state = CameraState::Following;
        camera.damp_velocity = Vec3::ONE;
        camera.return_timer = Some(0.2);

        camera.set_subject(Entity::PLACEHOLDER);

        assert_eq!(camera.state, CameraState::Fixed);
        assert_eq!(camera.damp_velocity, Vec3::ZERO);
        assert_eq!(camera.return_timer, None);
    }
}
