//! chuunibyou Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: melee combo state machine персонажа.
//!
//! Граница ответственности:
//! - ECS = combo rules (action tree, input buffer, chaining windows)
//! - Host = raw input polling, animation, physics/locomotion

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

// Публичные модули
pub mod combo;
pub mod config;
pub mod input;
pub mod logger;
pub mod player;

// Re-export базовых типов для удобства
pub use combo::{
    ActionCue, ActionType, ComboCue, ComboInput, ComboManager, ComboPlugin, ComboResetIntent,
    ComboRoster, ComboSnapshot, ComboStatus,
};
pub use config::{ButtonBinding, ComboConfig};
pub use input::{ButtonMasher, InputBindings, PlayerButtonPressed};
pub use player::{spawn_combo_fighter, spawn_player_fighter, ComboFighter, Player};

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<ComboConfig>()
            .cloned()
            .unwrap_or_default();

        app
            // Fixed timestep из конфига (60Hz по умолчанию)
            .insert_resource(Time::<Fixed>::from_duration(config.tick_duration()))
            .insert_resource(config)
            .add_plugins(ComboPlugin);

        // Детерминистичный RNG (seed по умолчанию), если host не поставил свой
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
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

/// Создаёт minimal Bevy App для headless симуляции (config по умолчанию)
pub fn create_headless_app(seed: u64) -> App {
    create_headless_app_with_config(seed, ComboConfig::default())
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время двигается вручную: каждый `app.update()` = один fixed tick
/// (`config.tick_duration()`), независимо от wall clock. Первый update только
/// стартует часы. `SimulationPlugin` потом берёт тот же config.
pub fn create_headless_app_with_config(seed: u64, config: ComboConfig) -> App {
    let mut app = App::new();
    logger::init_logger();

    let step = config.tick_duration();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_duration(step))
        .insert_resource(TimeUpdateStrategy::ManualDuration(step))
        .insert_resource(config);

    app
}

/// Snapshot одного fighter'а для отчётов и determinism проверок
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FighterSnapshot {
    pub entity_index: u32,
    /// Roster, из которого собран менеджер (None у менеджеров без `ComboFighter`)
    pub roster: Option<ComboRoster>,
    pub combo: ComboSnapshot,
}

/// Snapshot всех combo менеджеров, отсортированный по Entity index
pub fn combo_snapshot(world: &mut World) -> Vec<FighterSnapshot> {
    let mut query = world.query::<(Entity, &ComboManager, Option<&ComboFighter>)>();
    let mut snapshots: Vec<_> = query
        .iter(world)
        .map(|(entity, manager, fighter)| FighterSnapshot {
            entity_index: entity.index(),
            roster: fighter.map(|fighter| fighter.roster),
            combo: manager.snapshot(),
        })
        .collect();

    // Сортируем по Entity ID для детерминизма
    snapshots.sort_by_key(|snapshot| snapshot.entity_index);
    snapshots
}
