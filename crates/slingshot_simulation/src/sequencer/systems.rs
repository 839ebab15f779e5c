//! Turn Sequencer система

use bevy::prelude::*;

use super::tween::{Countdown, TransitionTween, TweenStatus};
use super::{LossTriggered, ProjectileAssigned, SequencerPhase, TurnSequencer};
use crate::config::GameConfig;
use crate::launch::{LaunchAnchor, Projectile, ProjectileLaunched, ProjectilePhase};
use crate::physics::PhysicsBody;
use crate::session::{Outcome, SessionState};

type AnchorQuery<'w, 's> =
    Query<'w, 's, &'static Transform, (With<LaunchAnchor>, Without<Projectile>)>;

type QueuedQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static mut Transform,
        &'static mut Projectile,
        &'static mut PhysicsBody,
    ),
    Without<LaunchAnchor>,
>;

/// Система: один шаг конечного автомата хода
///
/// Idle → Transitioning → Aiming → Launched → Cooldown → Idle,
/// либо GameOver когда очередь исчерпана.
pub fn advance_turn_sequencer(
    mut commands: Commands,
    mut sequencer: ResMut<TurnSequencer>,
    session: Res<SessionState>,
    config: Res<GameConfig>,
    time: Res<Time>,
    mut launches: EventReader<ProjectileLaunched>,
    mut assigned: EventWriter<ProjectileAssigned>,
    mut losses: EventWriter<LossTriggered>,
    anchors: AnchorQuery,
    mut projectiles: QueuedQuery,
) {
    let dt = time.delta_secs();
    let launched: Vec<Entity> = launches.read().map(|event| event.projectile).collect();

    if !sequencer.is_configured() {
        return;
    }

    let phase = sequencer.phase;
    let next = match phase {
        SequencerPhase::Idle => assign_next(
            &mut sequencer,
            &session,
            &config,
            &anchors,
            &mut projectiles,
            &mut assigned,
            &mut losses,
        ),

        SequencerPhase::Transitioning {
            projectile,
            mut tween,
        } => {
            match projectiles.get_mut(projectile) {
                Ok((mut transform, mut state, mut body)) => {
                    let status = tween.tick(dt);
                    let (position, rotation) = tween.sample();
                    transform.translation = position;
                    transform.rotation = rotation;

                    match status {
                        TweenStatus::Running => SequencerPhase::Transitioning { projectile, tween },
                        TweenStatus::Finished => {
                            state.phase = ProjectilePhase::Ready;
                            state.start_position = position;
                            body.reset_kinematic();
                            crate::logger::log(&format!(
                                "Projectile {:?} ready on anchor",
                                projectile
                            ));
                            SequencerPhase::Aiming { projectile }
                        }
                    }
                }
                Err(_) => {
                    crate::logger::log_warning(&format!(
                        "Projectile {:?} vanished during transition",
                        projectile
                    ));
                    SequencerPhase::Idle
                }
            }
        }

        SequencerPhase::Aiming { projectile } => {
            if launched.contains(&projectile) {
                SequencerPhase::Launched {
                    projectile,
                    destroy: Countdown::new(config.sequencer.destroy_delay),
                }
            } else if projectiles.get(projectile).is_err() {
                crate::logger::log_warning(&format!(
                    "Projectile {:?} vanished before launch",
                    projectile
                ));
                SequencerPhase::Idle
            } else {
                SequencerPhase::Aiming { projectile }
            }
        }

        SequencerPhase::Launched {
            projectile,
            mut destroy,
        } => match destroy.tick(dt) {
            TweenStatus::Running => SequencerPhase::Launched {
                projectile,
                destroy,
            },
            TweenStatus::Finished => {
                if let Ok(mut entity) = commands.get_entity(projectile) {
                    entity.despawn();
                    crate::logger::log(&format!("Projectile {:?} retired", projectile));
                }
                SequencerPhase::Cooldown {
                    next_spawn: Countdown::new(config.sequencer.next_spawn_delay),
                }
            }
        },

        SequencerPhase::Cooldown { mut next_spawn } => match next_spawn.tick(dt) {
            TweenStatus::Running => SequencerPhase::Cooldown { next_spawn },
            TweenStatus::Finished => SequencerPhase::Idle,
        },

        SequencerPhase::GameOver => SequencerPhase::GameOver,
    };

    sequencer.phase = next;
}

/// Idle: подать следующий снаряд на anchor (или закончить очередь)
fn assign_next(
    sequencer: &mut TurnSequencer,
    session: &SessionState,
    config: &GameConfig,
    anchors: &AnchorQuery,
    projectiles: &mut QueuedQuery,
    assigned: &mut EventWriter<ProjectileAssigned>,
    losses: &mut EventWriter<LossTriggered>,
) -> SequencerPhase {
    if session.outcome != Outcome::InProgress {
        return SequencerPhase::Idle;
    }

    if sequencer.is_exhausted() {
        crate::logger::log_info("No more projectiles available");
        if !session.all_targets_destroyed() {
            losses.write(LossTriggered {
                remaining_targets: session.remaining_targets(),
            });
        }
        return SequencerPhase::GameOver;
    }

    let Some(anchor) = sequencer.anchor.and_then(|anchor| anchors.get(anchor).ok()) else {
        crate::logger::log_error("TurnSequencer: launch anchor is missing");
        return SequencerPhase::Idle;
    };

    let entry = sequencer.queue[sequencer.next_index];
    sequencer.next_index += 1;

    let Ok((_, mut projectile, mut body)) = projectiles.get_mut(entry.entity) else {
        crate::logger::log_warning(&format!(
            "Queued projectile {:?} is missing, skipping",
            entry.entity
        ));
        return SequencerPhase::Idle;
    };

    projectile.phase = ProjectilePhase::Transitioning;
    body.reset_kinematic();

    let remaining = sequencer.remaining();
    crate::logger::log_info(&format!(
        "Projectile {:?} assigned to anchor ({} left)",
        entry.entity, remaining
    ));
    assigned.write(ProjectileAssigned {
        projectile: entry.entity,
        remaining,
    });

    SequencerPhase::Transitioning {
        projectile: entry.entity,
        tween: TransitionTween::new(&entry.rest, anchor, config.sequencer.transition_duration),
    }
}
