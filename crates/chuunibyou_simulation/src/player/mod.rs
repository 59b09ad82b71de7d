//! Спавн fighter'ов (combo manager + markers).

use bevy::prelude::*;

mod player;

pub use player::{ComboFighter, Player};

use crate::combo::{ComboManager, ComboRoster};
use crate::config::ComboConfig;

/// Собрать свежий менеджер для `roster`.
///
/// Roster, не прошедший регистрацию, означает ошибку в определениях комбо:
/// логируем и роняем старт вместо наполовину собранного дерева.
pub fn build_combo_manager(roster: ComboRoster, config: &ComboConfig) -> ComboManager {
    match roster.build(config) {
        Ok(tree) => ComboManager::new(tree),
        Err(err) => {
            crate::logger::log_error(&format!("Combo roster {:?} is malformed: {}", roster, err));
            panic!("combo roster {:?} is malformed: {}", roster, err);
        }
    }
}

/// Fighter, которым управляют напрямую через `ComboInput` (AI, тесты, replay)
pub fn spawn_combo_fighter(
    commands: &mut Commands,
    roster: ComboRoster,
    config: &ComboConfig,
) -> Entity {
    commands
        .spawn((build_combo_manager(roster, config), ComboFighter { roster }))
        .id()
}

/// Fighter, который также получает `PlayerButtonPressed` от игрока
pub fn spawn_player_fighter(
    commands: &mut Commands,
    roster: ComboRoster,
    config: &ComboConfig,
) -> Entity {
    let entity = spawn_combo_fighter(commands, roster, config);
    commands.entity(entity).insert(Player);
    entity
}
