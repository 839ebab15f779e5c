//! Короткий downward probe против target volumes (для trajectory preview)

use bevy::prelude::*;

use super::TargetVolume;

/// Луч из `origin` вниз длиной `distance` задевает хотя бы один объём.
///
/// Отрезок [origin.y - distance, origin.y] должен перекрыть объём по Y,
/// а XZ точки лежать внутри объёма. Старт внутри объёма тоже считается попаданием.
pub fn probe_down<'a>(
    origin: Vec3,
    distance: f32,
    volumes: impl IntoIterator<Item = (Vec3, &'a TargetVolume)>,
) -> bool {
    if distance < 0.0 {
        return false;
    }

    volumes.into_iter().any(|(center, volume)| {
        let min = volume.min(center);
        let max = volume.max(center);

        let inside_xz =
            origin.x >= min.x && origin.x <= max.x && origin.z >= min.z && origin.z <= max.z;
        let bottom = origin.y - distance;

        inside_xz && origin.y >= min.y && bottom <= max.y
    })
}
