//! Launch Controller module
//!
//! ECS ответственность:
//! - drag-to-aim: pointer ray → горизонтальная плоскость anchor → clamp по радиусу
//! - release: pull → velocity, снаряд переходит в Dynamic (дальше: физика)
//! - trajectory preview (closed-form) + probe попадания в цели
//! - резинки рогатки (точки + animation cues)
//!
//! Хост: pointer events, screen → world ray, рендер линий.

use bevy::prelude::*;

pub mod bands;
pub mod components;
pub mod events;
pub mod systems;
pub mod trajectory;


pub use bands::{drive_slingshot_bands, BandAnimation, BandCue, SlingshotBands};
pub use components::{
    DragState, LaunchAnchor, LaunchParams, Projectile, ProjectilePhase, TrajectoryPreview,
    TrajectoryTint,
};
pub use events::{AimInput, ProjectileLaunched};
pub use systems::{handle_aim_input, update_trajectory_preview};
pub use trajectory::{
    calculate_launch_velocity, clamp_pull, position_at, predict_trajectory, probe_trajectory,
};

use crate::SimulationSet;

pub struct LaunchPlugin;

impl Plugin for LaunchPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AimInput>()
            .add_event::<ProjectileLaunched>()
            .add_event::<BandCue>()
            .init_resource::<DragState>()
            .register_type::<Projectile>()
            .register_type::<LaunchParams>()
            .register_type::<TrajectoryPreview>();

        app.add_systems(
            FixedUpdate,
            (handle_aim_input, update_trajectory_preview)
                .chain()
                .in_set(SimulationSet::Input),
        );
        app.add_systems(
            FixedUpdate,
            drive_slingshot_bands.in_set(SimulationSet::Presentation),
        );
    }
}
