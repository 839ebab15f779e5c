//! Таймеры и tween'ы, продвигаемые внешним tick(dt)

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum TweenStatus {
    Running,
    Finished,
}

/// Ease-in-out с нулевыми касательными на концах: 3t² − 2t³
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Перенос позы: lerp позиции + slerp вращения по ease-in-out кривой
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct TransitionTween {
    pub from_position: Vec3,
    pub from_rotation: Quat,
    pub to_position: Vec3,
    pub to_rotation: Quat,
    pub duration: f32,
    pub elapsed: f32,
}

impl TransitionTween {
    pub fn new(from: &Transform, to: &Transform, duration: f32) -> Self {
        Self {
            from_position: from.translation,
            from_rotation: from.rotation,
            to_position: to.translation,
            to_rotation: to.rotation,
            duration,
            elapsed: 0.0,
        }
    }

    pub fn tick(&mut self, dt: f32) -> TweenStatus {
        self.elapsed += dt.max(0.0);
        if self.is_finished() {
            TweenStatus::Finished
        } else {
            TweenStatus::Running
        }
    }

    pub fn is_finished(&self) -> bool {
        self.duration <= 0.0 || self.elapsed >= self.duration
    }

    /// Текущая поза. После завершения: ровно конечная (snap).
    pub fn sample(&self) -> (Vec3, Quat) {
        if self.is_finished() {
            return (self.to_position, self.to_rotation);
        }

        let t = ease_in_out(self.elapsed / self.duration);
        (
            self.from_position.lerp(self.to_position, t),
            self.from_rotation.slerp(self.to_rotation, t),
        )
    }
}

/// Обратный отсчёт (задержки sequencer'а)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Countdown {
    pub remaining: f32,
}

impl Countdown {
    pub fn new(seconds: f32) -> Self {
        Self {
            remaining: seconds.max(0.0),
        }
    }

    pub fn tick(&mut self, dt: f32) -> TweenStatus {
        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
        if self.remaining <= 0.0 {
            TweenStatus::Finished
        } else {
            TweenStatus::Running
        }
    }
}
