//! Session системы: census, счёт, таймер, проигрыш, переход уровней

use bevy::prelude::*;

use super::{
    CensusState, GameFinished, LevelCompleted, LevelFlow, LevelProgress, SessionLost,
    SessionState,
};
use crate::config::GameConfig;
use crate::damage::{Target, TargetDestroyed};
use crate::level::LoadLevelRequested;
use crate::sequencer::{Countdown, LossTriggered, TurnSequencer, TweenStatus};

/// Система: счётчик оставшихся снарядов из sequencer'а
pub fn sync_projectiles_remaining(sequencer: Res<TurnSequencer>, mut session: ResMut<SessionState>) {
    let remaining = sequencer.remaining();
    if session.projectiles_remaining != remaining {
        session.projectiles_remaining = remaining;
    }
}

/// Система: подсчёт целей через тик после старта уровня
///
/// К этому моменту все цели уровня гарантированно заспавнены. Идёт после
/// `track_destroyed_targets`: цель, разрушенная в тик census, уже учтена
/// в `destroyed_targets`.
pub fn capture_target_census(
    mut session: ResMut<SessionState>,
    targets: Query<&Target>,
    progress: Res<LevelProgress>,
    mut completed: EventWriter<LevelCompleted>,
) {
    match session.census {
        CensusState::Captured => {}
        CensusState::Pending { frames } if frames > 0 => {
            session.census = CensusState::Pending { frames: frames - 1 };
        }
        CensusState::Pending { .. } => {
            let alive = targets.iter().filter(|target| !target.destroyed).count() as u32;
            let reason = session.capture_total(alive);
            crate::logger::log_info(&format!(
                "Census: {} targets",
                session.total_targets.unwrap_or(0)
            ));

            if let Some(reason) = reason {
                crate::logger::log_info(&format!(
                    "🏆 Level {} complete before census: +{} points (total {})",
                    progress.current, session.level_score, session.total_score
                ));
                completed.write(LevelCompleted {
                    level: progress.current,
                    reason,
                    level_score: session.level_score,
                    total_score: session.total_score,
                });
            }
        }
    }
}

/// Система: TargetDestroyed → счёт; последняя цель → победа
pub fn track_destroyed_targets(
    mut destroyed: EventReader<TargetDestroyed>,
    mut session: ResMut<SessionState>,
    progress: Res<LevelProgress>,
    mut completed: EventWriter<LevelCompleted>,
) {
    for event in destroyed.read() {
        let Some(reason) = session.record_destroyed(event.score_value) else {
            continue;
        };

        crate::logger::log_info(&format!(
            "🏆 Level {} complete: +{} points (total {})",
            progress.current, session.level_score, session.total_score
        ));
        completed.write(LevelCompleted {
            level: progress.current,
            reason,
            level_score: session.level_score,
            total_score: session.total_score,
        });
    }
}

/// Система: таймер уровня (если задан)
pub fn tick_level_timer(
    mut session: ResMut<SessionState>,
    progress: Res<LevelProgress>,
    time: Res<Time>,
    mut completed: EventWriter<LevelCompleted>,
) {
    let Some(reason) = session.tick_timer(time.delta_secs()) else {
        return;
    };

    crate::logger::log_info(&format!(
        "⏰ Level {} time is up: +{} points (total {})",
        progress.current, session.level_score, session.total_score
    ));
    completed.write(LevelCompleted {
        level: progress.current,
        reason,
        level_score: session.level_score,
        total_score: session.total_score,
    });
}

/// Система: LossTriggered → штраф, slow-motion
pub fn handle_loss(
    mut losses: EventReader<LossTriggered>,
    mut session: ResMut<SessionState>,
    progress: Res<LevelProgress>,
    config: Res<GameConfig>,
    mut virtual_time: ResMut<Time<Virtual>>,
    mut lost: EventWriter<SessionLost>,
) {
    for loss in losses.read() {
        let penalty = config.session.loss_penalty;
        if !session.apply_loss(penalty) {
            continue;
        }

        virtual_time.set_relative_speed(config.session.loss_time_scale);

        crate::logger::log_info(&format!(
            "💀 Level {} lost ({} targets left): -{} points, total {}",
            progress.current, loss.remaining_targets, penalty, session.total_score
        ));
        lost.write(SessionLost {
            level: progress.current,
            penalty,
            total_score: session.total_score,
        });
    }
}

/// Система: после победы либо конец игры, либо следующий уровень через delay
pub fn advance_level_flow(
    mut flow: ResMut<LevelFlow>,
    mut completed: EventReader<LevelCompleted>,
    session: Res<SessionState>,
    progress: Res<LevelProgress>,
    config: Res<GameConfig>,
    time: Res<Time>,
    mut finished: EventWriter<GameFinished>,
    mut requests: EventWriter<LoadLevelRequested>,
) {
    for _ in completed.read() {
        if *flow != LevelFlow::Playing {
            continue;
        }

        *flow = match progress.next() {
            Some(next) => LevelFlow::Advancing {
                next,
                countdown: Countdown::new(config.session.delay_before_next_level),
            },
            None => {
                crate::logger::log_info(&format!(
                    "🎉 All levels complete! Final score: {}",
                    session.total_score
                ));
                finished.write(GameFinished {
                    final_score: session.total_score,
                });
                LevelFlow::Finished
            }
        };
    }

    if let LevelFlow::Advancing {
        next,
        mut countdown,
    } = *flow
    {
        *flow = match countdown.tick(time.delta_secs()) {
            TweenStatus::Running => LevelFlow::Advancing { next, countdown },
            TweenStatus::Finished => {
                requests.write(LoadLevelRequested { index: next });
                LevelFlow::Playing
            }
        };
    }
}
