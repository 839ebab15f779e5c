//! Damage система: ContactImpulse → урон целям

use bevy::prelude::*;

use super::{compute_damage, HitKind, HitOutcome, Target, TargetDestroyed, TargetHit};
use crate::physics::{BodyKind, ContactImpulse};

/// Система: apply damage от ContactImpulse событий
///
/// 1. Классифицируем попадание по `BodyKind` второго тела
/// 2. impulse → damage (порог + indirect множитель)
/// 3. TargetHit (cue с cooldown), при health ≤ 0 → TargetDestroyed + despawn
///
/// Разрушенная цель игнорирует последующие контакты, в том числе
/// пришедшие в том же тике.
pub fn apply_contact_damage(
    mut commands: Commands,
    mut contacts: EventReader<ContactImpulse>,
    mut targets: Query<(&mut Target, &Transform)>,
    kinds: Query<&BodyKind>,
    time: Res<Time>,
    mut hits: EventWriter<TargetHit>,
    mut destroyed: EventWriter<TargetDestroyed>,
) {
    let now = time.elapsed_secs();

    for contact in contacts.read() {
        let Ok((mut target, transform)) = targets.get_mut(contact.target) else {
            // Контакт с не-целью (или цель уже despawned)
            continue;
        };
        if target.destroyed {
            continue;
        }

        let kind = HitKind::from_body_kind(kinds.get(contact.other).ok());
        let damage = compute_damage(contact.impulse, kind, &target.tuning);

        match target.apply_damage(damage) {
            HitOutcome::Ignored => {}
            HitOutcome::Damaged { remaining } => {
                let play_cue = target.take_cue(now);
                hits.write(TargetHit {
                    target: contact.target,
                    other: contact.other,
                    kind,
                    damage,
                    remaining_health: remaining,
                    play_cue,
                });
            }
            HitOutcome::Destroyed => {
                let play_cue = target.take_cue(now);
                hits.write(TargetHit {
                    target: contact.target,
                    other: contact.other,
                    kind,
                    damage,
                    remaining_health: 0.0,
                    play_cue,
                });
                destroyed.write(TargetDestroyed {
                    target: contact.target,
                    score_value: target.score_value,
                    position: transform.translation,
                });

                crate::logger::log_info(&format!(
                    "💥 Target {:?} destroyed by {:?} ({:?} hit, {:.1} damage)",
                    contact.target, contact.other, kind, damage
                ));

                if let Ok(mut entity) = commands.get_entity(contact.target) {
                    entity.despawn();
                }
            }
        }
    }
}
