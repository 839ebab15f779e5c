//! Резинки рогатки: точки polyline для renderer'а + animation cues.

use bevy::prelude::*;

use super::{DragState, Projectile};
use crate::config::GameConfig;

/// Animation cue для аниматора рогатки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum BandAnimation {
    Idle,
    Tension,
    Release,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct BandCue {
    pub bands: Entity,
    pub animation: BandAnimation,
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
struct BandReset {
    from: Vec3,
    elapsed: f32,
    duration: f32,
}

/// Две резинки: left/right anchor → общая end point
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct SlingshotBands {
    pub left_anchor: Vec3,
    pub right_anchor: Vec3,
    pub rest: Vec3,
    pub end_point: Vec3,
    /// Polyline рисуется с press до конца возврата в rest
    pub visible: bool,
    stretched: bool,
    tension_triggered: bool,
    reset: Option<BandReset>,
}

impl SlingshotBands {
    /// `rest` по умолчанию: середина между anchor'ами
    pub fn new(left_anchor: Vec3, right_anchor: Vec3, rest: Option<Vec3>) -> Self {
        let rest = rest.unwrap_or((left_anchor + right_anchor) / 2.0);
        Self {
            left_anchor,
            right_anchor,
            rest,
            end_point: rest,
            visible: false,
            stretched: false,
            tension_triggered: false,
            reset: None,
        }
    }

    pub fn is_stretched(&self) -> bool {
        self.stretched
    }

    pub fn is_resetting(&self) -> bool {
        self.reset.is_some()
    }

    /// Натянуть к точке снаряда. Tension cue: один раз за drag.
    pub fn stretch(&mut self, point: Vec3) -> Option<BandAnimation> {
        self.visible = true;
        self.stretched = true;
        self.reset = None;
        self.end_point = point;

        if self.tension_triggered {
            return None;
        }
        self.tension_triggered = true;
        Some(BandAnimation::Tension)
    }

    /// Начать плавный возврат в rest. Без натяжения: ничего.
    pub fn begin_reset(&mut self, duration: f32) -> Option<BandAnimation> {
        if !self.stretched || self.reset.is_some() {
            return None;
        }
        self.reset = Some(BandReset {
            from: self.end_point,
            elapsed: 0.0,
            duration,
        });
        Some(BandAnimation::Release)
    }

    /// Шаг возврата. По завершении: snap в rest, резинки скрыты, Idle cue.
    pub fn tick(&mut self, dt: f32) -> Option<BandAnimation> {
        let reset = self.reset.as_mut()?;
        reset.elapsed += dt;

        if reset.duration > 0.0 && reset.elapsed < reset.duration {
            let t = reset.elapsed / reset.duration;
            self.end_point = reset.from.lerp(self.rest, t);
            return None;
        }

        self.snap_to_rest();
        self.visible = false;
        Some(BandAnimation::Idle)
    }

    pub fn snap_to_rest(&mut self) {
        self.end_point = self.rest;
        self.stretched = false;
        self.tension_triggered = false;
        self.reset = None;
    }

    /// Polyline для каждой резинки: [anchor, end_point]
    pub fn segments(&self) -> [[Vec3; 2]; 2] {
        [
            [self.left_anchor, self.end_point],
            [self.right_anchor, self.end_point],
        ]
    }
}

/// Система: резинки следуют за снарядом во время drag, после release: возврат
pub fn drive_slingshot_bands(
    drag: Res<DragState>,
    config: Res<GameConfig>,
    time: Res<Time>,
    projectiles: Query<&Transform, With<Projectile>>,
    mut bands: Query<(Entity, &mut SlingshotBands)>,
    mut cues: EventWriter<BandCue>,
) {
    let dragged = drag
        .active
        .and_then(|entity| projectiles.get(entity).ok())
        .map(|transform| transform.translation);

    for (entity, mut band) in bands.iter_mut() {
        let cue = match dragged {
            Some(point) => band.stretch(point),
            None => band
                .begin_reset(config.launch.band_reset_duration)
                .or_else(|| band.tick(time.delta_secs())),
        };

        if let Some(animation) = cue {
            cues.write(BandCue {
                bands: entity,
                animation,
            });
        }
    }
}
