//! Slingshot Simulation Core
//!
//! ECS-симуляция рогатки на Bevy 0.16 (headless, fixed tick 60Hz).
//!
//! Хост (движок) отвечает за рендер, ввод, физику и звук:
//! - шлёт `AimInput`, `AbilityRequested`, `PauseToggled`, `ContactImpulse`
//! - читает Transform'ы, `TrajectoryPreview`, `Hud`, cue события
//!
//! Порядок внутри тика (FixedUpdate): см. `SimulationSet`.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ability;
pub mod camera;
pub mod config;
pub mod damage;
pub mod launch;
pub mod level;
pub mod logger;
pub mod physics;
pub mod sequencer;
pub mod session;

// Re-export для удобства хоста
pub use ability::{AbilityPlugin, AbilityRequested, SplitAbility};
pub use camera::{CameraPlugin, CameraShake, SlingshotCamera};
pub use config::{ConfigError, GameConfig};
pub use damage::{DamagePlugin, Target, TargetDestroyed, TargetHit};
pub use launch::{AimInput, LaunchAnchor, LaunchPlugin, Projectile, ProjectileLaunched};
pub use level::{LevelCatalog, LevelPlugin, LoadLevelRequested, NewGameRequested};
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel};
pub use physics::{ContactImpulse, PhysicsBody, PhysicsPlugin, ReferencePhysicsPlugin};
pub use sequencer::{SequencerPlugin, TurnSequencer};
pub use session::{Hud, Outcome, PauseToggled, SessionPlugin, SessionState};

/// Шаги симуляционного тика (FixedUpdate, строго по порядку)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Загрузка уровня
    Level,
    /// Drag / release / ability
    Input,
    /// Очередь снарядов
    Sequencer,
    /// Reference physics (если подключена)
    Physics,
    /// ContactImpulse → урон
    Damage,
    /// Счёт, исход уровня
    Session,
    /// Камера, резинки, HUD
    Presentation,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::Level,
                SimulationSet::Input,
                SimulationSet::Sequencer,
                SimulationSet::Physics,
                SimulationSet::Damage,
                SimulationSet::Session,
                SimulationSet::Presentation,
            )
                .chain(),
        );

        // Детерминистичный RNG (seed по умолчанию, если хост не положил свой)
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .init_resource::<GameConfig>()
            // Подсистемы
            .add_plugins((
                PhysicsPlugin,
                LaunchPlugin,
                SequencerPlugin,
                DamagePlugin,
                SessionPlugin,
                CameraPlugin,
                AbilityPlugin,
                LevelPlugin,
            ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время двигается ровно на 1/60 сек за `app.update()`, поэтому один
/// update = один FixedUpdate тик (пока время не замедлено или на паузе).
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)) // 60Hz FixedUpdate
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / 60.0,
        )));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
