//! Launch системы: drag-to-aim, release, trajectory preview

use bevy::prelude::*;

use super::trajectory::{
    calculate_launch_velocity, clamp_pull, predict_trajectory, probe_trajectory,
};
use super::{
    AimInput, DragState, LaunchParams, Projectile, ProjectileLaunched, ProjectilePhase,
    TrajectoryPreview, TrajectoryTint,
};
use crate::config::GameConfig;
use crate::physics::{PhysicsBody, TargetVolume};

type AimQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static mut Projectile,
        &'static mut Transform,
        &'static mut PhysicsBody,
        &'static LaunchParams,
        &'static mut TrajectoryPreview,
    ),
>;

/// Система: обработка AimInput (press / drag / release)
///
/// Порядок событий внутри тика сохраняется. Одновременно тянется не больше
/// одного снаряда (`DragState`).
pub fn handle_aim_input(
    mut inputs: EventReader<AimInput>,
    mut drag: ResMut<DragState>,
    mut projectiles: AimQuery,
    mut launched: EventWriter<ProjectileLaunched>,
) {
    for input in inputs.read() {
        match *input {
            AimInput::Press { projectile } => begin_drag(projectile, &mut drag, &mut projectiles),
            AimInput::Drag { ray } => drag_to(ray, &mut drag, &mut projectiles),
            AimInput::Release => {
                if let Some(event) = release(&mut drag, &mut projectiles) {
                    launched.write(event);
                }
            }
        }
    }
}

fn begin_drag(entity: Entity, drag: &mut DragState, projectiles: &mut AimQuery) {
    if drag.active.is_some() {
        crate::logger::log(&format!("Press on {:?} ignored: already dragging", entity));
        return;
    }

    let Ok((mut projectile, _, _, _, mut preview)) = projectiles.get_mut(entity) else {
        crate::logger::log_warning(&format!("AimInput::Press: {:?} is not a projectile", entity));
        return;
    };

    if projectile.phase != ProjectilePhase::Ready {
        crate::logger::log(&format!(
            "Press on {:?} ignored: phase {:?}",
            entity, projectile.phase
        ));
        return;
    }

    projectile.phase = ProjectilePhase::Dragging;
    preview.visible = true;
    drag.active = Some(entity);
}

fn drag_to(ray: Ray3d, drag: &mut DragState, projectiles: &mut AimQuery) {
    let Some(entity) = drag.active else {
        return;
    };

    let Ok((projectile, mut transform, _, params, _)) = projectiles.get_mut(entity) else {
        crate::logger::log_warning(&format!("Dragged projectile {:?} disappeared", entity));
        drag.active = None;
        return;
    };

    // Pointer ray → горизонтальная плоскость через anchor
    let anchor = projectile.start_position;
    let plane = InfinitePlane3d { normal: Dir3::Y };
    let Some(distance) = ray.intersect_plane(anchor, plane) else {
        return;
    };

    let offset = clamp_pull(ray.get_point(distance) - anchor, params.max_drag_distance);
    transform.translation = anchor + offset;
}

fn release(drag: &mut DragState, projectiles: &mut AimQuery) -> Option<ProjectileLaunched> {
    let entity = drag.active.take()?;

    let Ok((mut projectile, mut transform, mut body, params, mut preview)) =
        projectiles.get_mut(entity)
    else {
        crate::logger::log_warning(&format!("Released projectile {:?} disappeared", entity));
        return None;
    };

    preview.hide();

    let pull = projectile.start_position - transform.translation;
    let velocity = calculate_launch_velocity(pull, params);

    if velocity == Vec3::ZERO {
        // Нулевое натяжение: запуска нет, снаряд снова ждёт на anchor
        transform.translation = projectile.start_position;
        projectile.phase = ProjectilePhase::Ready;
        crate::logger::log(&format!("Projectile {:?} released without pull", entity));
        return None;
    }

    if !body.launch(velocity) {
        crate::logger::log_warning(&format!("Projectile {:?} is already dynamic", entity));
        return None;
    }

    projectile.phase = ProjectilePhase::Launched;
    crate::logger::log_info(&format!(
        "🚀 Projectile {:?} launched: speed {:.1}, velocity {:?}",
        entity,
        velocity.length(),
        velocity
    ));

    Some(ProjectileLaunched {
        projectile: entity,
        velocity,
    })
}

/// Система: пересчёт trajectory preview для снаряда, который тянут
///
/// Точки: closed-form траектория, на каждой точке короткий probe вниз
/// против target volumes. Попадание → красная линия.
pub fn update_trajectory_preview(
    drag: Res<DragState>,
    config: Res<GameConfig>,
    mut projectiles: Query<(&Transform, &Projectile, &LaunchParams, &mut TrajectoryPreview)>,
    volumes: Query<(&Transform, &TargetVolume), Without<Projectile>>,
) {
    let Some(entity) = drag.active else {
        return;
    };
    let Ok((transform, projectile, params, mut preview)) = projectiles.get_mut(entity) else {
        return;
    };

    let position = transform.translation;
    let velocity = calculate_launch_velocity(projectile.start_position - position, params);
    let points = predict_trajectory(
        position,
        velocity,
        config.physics.gravity(),
        config.launch.line_points,
        config.launch.time_between_points,
    );

    let volumes: Vec<_> = volumes
        .iter()
        .map(|(t, volume)| (t.translation, volume))
        .collect();
    let will_hit = probe_trajectory(&points, &volumes, config.launch.probe_distance);

    preview.visible = true;
    preview.points = points;
    preview.will_hit = will_hit;
    preview.tint = if will_hit {
        TrajectoryTint::Hit
    } else {
        TrajectoryTint::Clear
    };
}
