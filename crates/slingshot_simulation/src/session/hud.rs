//! HUD text model
//!
//! Хост только копирует строки в UI; форматирование здесь.

use bevy::prelude::*;

use super::{LevelProgress, Outcome, SessionState};
use crate::config::GameConfig;

/// Тексты HUD (resource, обновляется каждый тик)
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct Hud {
    pub birds_left: String,
    pub score: String,
    /// None: у уровня нет таймера
    pub time: Option<String>,
    /// Win/lose баннер, None пока уровень идёт
    pub banner: Option<String>,
}

impl Hud {
    pub fn from_session(session: &SessionState, progress: &LevelProgress, penalty: u32) -> Self {
        Self {
            birds_left: format!("Birds Left: {}", session.projectiles_remaining),
            score: format!("Score: {}", session.total_score),
            time: session
                .time_remaining
                .map(|seconds| format!("Time: {}", seconds.ceil() as u32)),
            banner: banner_text(session, progress, penalty),
        }
    }
}

pub fn banner_text(session: &SessionState, progress: &LevelProgress, penalty: u32) -> Option<String> {
    match session.outcome {
        Outcome::InProgress => None,
        Outcome::Won if progress.is_final() => Some(format!(
            "ALL LEVELS COMPLETE!\nYOU WIN!\n\nFINAL SCORE: {}",
            session.total_score
        )),
        Outcome::Won => Some(format!("LEVEL COMPLETE!\n+{} points", session.level_score)),
        Outcome::Lost => Some(format!(
            "YOU LOSE!\n-{} POINTS\nTOTAL SCORE: {}",
            penalty, session.total_score
        )),
    }
}

/// Система: пересборка HUD при изменении session
pub fn update_hud(
    session: Res<SessionState>,
    progress: Res<LevelProgress>,
    config: Res<GameConfig>,
    mut hud: ResMut<Hud>,
) {
    let next = Hud::from_session(&session, &progress, config.session.loss_penalty);
    if *hud != next {
        *hud = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(outcome: Outcome) -> SessionState {
        SessionState {
            total_score: 450,
            level_score: 200,
            projectiles_remaining: 2,
            outcome,
            ..default()
        }
    }

    #[test]
    fn test_hud_counters() {
        let mut state = session(Outcome::InProgress);
        state.time_remaining = Some(12.3);

        let hud = Hud::from_session(&state, &LevelProgress { current: 0, count: 3 }, 200);

        assert_eq!(hud.birds_left, "Birds Left: 2");
        assert_eq!(hud.score, "Score: 450");
        assert_eq!(hud.time.as_deref(), Some("Time: 13"));
        assert_eq!(hud.banner, None);
    }

    #[test]
    fn test_level_complete_banner() {
        let progress = LevelProgress { current: 0, count: 3 };
        assert_eq!(
            banner_text(&session(Outcome::Won), &progress, 200).as_deref(),
            Some("LEVEL COMPLETE!\n+200 points")
        );
    }

    #[test]
    fn test_final_win_banner() {
        let progress = LevelProgress { current: 2, count: 3 };
        assert_eq!(
            banner_text(&session(Outcome::Won), &progress, 200).as_deref(),
            Some("ALL LEVELS COMPLETE!\nYOU WIN!\n\nFINAL SCORE: 450")
        );
    }

    #[test]
    fn test_loss_banner() {
        let progress = LevelProgress { current: 0, count: 3 };
        assert_eq!(
            banner_text(&session(Outcome::Lost), &progress, 200).as_deref(),
            Some("YOU LOSE!\n-200 POINTS\nTOTAL SCORE: 450")
        );
    }
}
