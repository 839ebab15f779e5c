//! Camera module
//!
//! Логика камеры рогатки без рендера: хост копирует Transform камеры.
//! - follow: Fixed → Following → Returning → Fixed (SmoothDamp + slerp)
//! - shake: случайный offset при разрушении цели (DeterministicRng)

use bevy::prelude::*;

pub mod follow;
pub mod shake;


pub use follow::{
    drive_slingshot_camera, follow_assigned_projectile, look_rotation, smooth_damp,
    CameraState, SlingshotCamera,
};
pub use shake::{apply_camera_pose, random_in_unit_sphere, trigger_camera_shake, CameraShake};

use crate::SimulationSet;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<SlingshotCamera>()
            .register_type::<CameraShake>();

        app.add_systems(
            FixedUpdate,
            (
                follow_assigned_projectile,
                drive_slingshot_camera,
                trigger_camera_shake,
                apply_camera_pose,
            )
                .chain()
                .in_set(SimulationSet::Presentation),
        );
    }
}
