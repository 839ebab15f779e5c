//! Пауза: останавливает virtual time (FixedUpdate перестаёт тикать)

use bevy::prelude::*;

use super::PauseToggled;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PauseState {
    pub paused: bool,
}

/// Система (Update): PauseToggled → pause / resume
///
/// Resume возвращает нормальную скорость, в том числе после slow-motion.
pub fn toggle_pause(
    mut toggles: EventReader<PauseToggled>,
    mut pause: ResMut<PauseState>,
    mut virtual_time: ResMut<Time<Virtual>>,
) {
    for _ in toggles.read() {
        if pause.paused {
            virtual_time.unpause();
            virtual_time.set_relative_speed(1.0);
            pause.paused = false;
            crate::logger::log_info("▶️ Resumed");
        } else {
            virtual_time.pause();
            pause.paused = true;
            crate::logger::log_info("⏸️ Paused");
        }
    }
}
