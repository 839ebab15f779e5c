//! Headless прогон Slingshot симуляции
//!
//! Reference physics + автопилот, который целится в ближайшую цель.
//!
//! Аргументы: см. `--help`.

use std::error::Error;
use std::path::PathBuf;

use bevy::prelude::*;
use clap::Parser as _;
use slingshot_simulation::launch::{
    calculate_launch_velocity, predict_trajectory, LaunchParams, ProjectilePhase,
};
use slingshot_simulation::session::LevelFlow;
use slingshot_simulation::{
    create_headless_app, log_info, logger, AimInput, GameConfig, Hud, LevelCatalog,
    NewGameRequested, Outcome, Projectile, ReferencePhysicsPlugin, SessionState,
    SimulationPlugin, Target,
};

#[derive(clap::Parser, Debug)]
#[command(about = "Headless slingshot simulation with an aiming autopilot")]
struct Options {
    /// JSON tuning (GameConfig)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON level catalog, по умолчанию встроенный demo
    #[arg(long)]
    levels: Option<PathBuf>,

    #[arg(long, default_value_t = 60 * 180)]
    ticks: u32,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(long, value_parser = parse_log_level, default_value = "info")]
    log_level: logger::LogLevel,
}

fn parse_log_level(value: &str) -> Result<logger::LogLevel, String> {
    logger::LogLevel::parse(value).ok_or_else(|| format!("unknown log level: {}", value))
}

/// Pull (смещение от anchor), при котором траектория проходит ближе всего к цели
fn aim_at(anchor: Vec3, target: Vec3, config: &GameConfig) -> Vec3 {
    let params = LaunchParams::from(&config.launch);
    let flat = Vec3::new(target.x - anchor.x, 0.0, target.z - anchor.z).normalize_or_zero();
    if flat == Vec3::ZERO {
        return Vec3::ZERO;
    }

    let mut best = (f32::MAX, Vec3::ZERO);
    let steps = (params.max_drag_distance / 0.01) as u32;
    for step in 1..=steps {
        let offset = -flat * (step as f32 * 0.01);
        let start = anchor + offset;
        let velocity = calculate_launch_velocity(anchor - start, &params);
        let miss = predict_trajectory(start, velocity, config.physics.gravity(), 120, 0.02)
            .into_iter()
            .map(|point| point.distance(target))
            .fold(f32::MAX, f32::min);
        if miss < best.0 {
            best = (miss, offset);
        }
    }

    best.1
}

/// Автопилот: снаряд на anchor → press, drag, release в одном тике
fn autopilot(world: &mut World) {
    let ready = world
        .query::<(Entity, &Projectile)>()
        .iter(world)
        .find(|(_, projectile)| projectile.phase == ProjectilePhase::Ready)
        .map(|(entity, projectile)| (entity, projectile.start_position));
    let Some((projectile, anchor)) = ready else {
        return;
    };

    let target = world
        .query::<(&Transform, &Target)>()
        .iter(world)
        .filter(|(_, target)| !target.destroyed)
        .map(|(transform, _)| transform.translation)
        .min_by(|a, b| a.distance(anchor).total_cmp(&b.distance(anchor)));
    let Some(target) = target else {
        return;
    };

    let offset = aim_at(anchor, target, world.resource::<GameConfig>());
    let ray = Ray3d {
        origin: anchor + offset + Vec3::Y * 10.0,
        direction: Dir3::NEG_Y,
    };

    world.send_event(AimInput::Press { projectile });
    world.send_event(AimInput::Drag { ray });
    world.send_event(AimInput::Release);
}

fn main() -> Result<(), Box<dyn Error>> {
    let options = Options::parse();

    let mut app = create_headless_app(options.seed);
    logger::set_log_level(options.log_level);

    if let Some(path) = &options.config {
        app.insert_resource(GameConfig::load(path)?);
    }
    if let Some(path) = &options.levels {
        app.insert_resource(LevelCatalog::load(path)?);
    }

    app.add_plugins((SimulationPlugin, ReferencePhysicsPlugin));
    app.world_mut().send_event(NewGameRequested);

    log_info(&format!(
        "Starting slingshot headless simulation (seed: {})",
        options.seed
    ));

    let mut last_hud = Hud::default();
    for tick in 0..options.ticks {
        app.update();
        autopilot(app.world_mut());

        let hud = app.world().resource::<Hud>().clone();
        if hud != last_hud {
            log_info(&format!(
                "Tick {}: {} | {} | {}",
                tick,
                hud.birds_left,
                hud.score,
                hud.time.as_deref().unwrap_or("-")
            ));
            if let Some(banner) = &hud.banner {
                log_info(&banner.replace('\n', " "));
            }
            last_hud = hud;
        }

        let finished = *app.world().resource::<LevelFlow>() == LevelFlow::Finished;
        let lost = app.world().resource::<SessionState>().outcome == Outcome::Lost;
        if finished || lost {
            break;
        }
    }

    let session = app.world().resource::<SessionState>();
    log_info(&format!(
        "Simulation complete: outcome {:?}, total score {}",
        session.outcome, session.total_score
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn test_cli_definition_is_valid() {
        Options::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let options = Options::try_parse_from(["slingshot_simulation"]).unwrap();
        assert_eq!(options.ticks, 60 * 180);
        assert_eq!(options.seed, 42);
        assert_eq!(options.log_level, logger::LogLevel::Info);
        assert!(options.config.is_none());
    }

    #[test]
    fn test_flags_parse() {
        let options = Options::try_parse_from([
            "slingshot_simulation",
            "--levels",
            "levels.json",
            "--seed",
            "7",
            "--log-level",
            "warn",
        ])
        .unwrap();
        assert_eq!(options.levels, Some(PathBuf::from("levels.json")));
        assert_eq!(options.seed, 7);
        assert_eq!(options.log_level, logger::LogLevel::Warning);
    }

    #[test]
    fn test_bad_values_rejected() {
        assert!(Options::try_parse_from(["slingshot_simulation", "--log-level", "loud"]).is_err());
        assert!(Options::try_parse_from(["slingshot_simulation", "--seed"]).is_err());
    }
}
