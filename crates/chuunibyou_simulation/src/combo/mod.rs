//! Melee combo система: action tree + state machine на каждого fighter'а.
//!
//! # Архитектура
//!
//! ```text
//! PlayerButtonPressed (input layer)
//!   ↓ route_player_buttons (InputBindings)
//! ComboInput { entity, action }
//!   ↓ apply_combo_inputs
//! ComboManager::do_action → ActionNode::begin
//!   ↓ tick_combo_managers (каждый fixed step)
//! ComboManager::tick → шаг завершён → окно chaining → reset по истечении
//!   ↓ emit_combo_cues
//! ComboCue (presentation layer)
//! ```
//!
//! Дерево строится один раз на fighter'а из `ComboRoster`,
//! после этого его структура не меняется.

use bevy::prelude::*;

pub mod action_type;
pub mod actions;
pub mod manager;
pub mod roster;
pub mod systems;
pub mod tree;

#[cfg(test)]
mod manager_tests;

pub use action_type::{ActionType, UnknownActionType};
pub use actions::{ActionCue, ComboAction, ComboStep, EmptyAction, PauseAction, TimedStrikeAction};
pub use manager::{ActionOutcome, ComboManager, ComboSnapshot, ComboStatus, TickOutcome};
pub use roster::ComboRoster;
pub use systems::{ComboCue, ComboInput, ComboResetIntent};
pub use tree::{ActionNode, ActionTree, NodeId, RegistrationError};

/// Окно chaining для шагов без своего значения (секунды)
pub const DEFAULT_INPUT_WINDOW: f32 = 0.5;

/// Допуск таймеров (секунды), намного меньше одного тика
///
/// Сумма f32 delta (0.1 × 5) может дать 0.50000001, без допуска
/// таймер сработал бы на тик позже.
pub const TIMER_EPSILON: f32 = 1e-4;

/// Истёк ли countdown с остатком `remaining`.
///
/// Единое правило для всех таймеров combo (шаги и окно chaining).
pub fn timer_expired(remaining: f32) -> bool {
    remaining <= TIMER_EPSILON
}

/// Combo Plugin
///
/// Регистрирует combo системы в FixedUpdate.
///
/// Порядок выполнения:
/// 1. bind_combo_owners — owner back-reference для новых менеджеров
/// 2. route_player_buttons — кнопки → ComboInput
/// 3. apply_combo_inputs — ComboInput → do_action
/// 4. apply_combo_resets — ComboResetIntent → reset
/// 5. tick_combo_managers — таймеры шагов и окна
/// 6. emit_combo_cues — cues → presentation
pub struct ComboPlugin;

impl Plugin for ComboPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ComboInput>()
            .add_event::<ComboResetIntent>()
            .add_event::<ComboCue>()
            .add_event::<crate::input::PlayerButtonPressed>()
            .init_resource::<crate::config::ComboConfig>();

        // Bindings из конфига, если host не поставил свои
        if !app.world().contains_resource::<crate::input::InputBindings>() {
            let config = app.world().resource::<crate::config::ComboConfig>();
            let bindings = crate::input::build_input_bindings(config);
            app.insert_resource(bindings);
        }

        app.add_systems(
            FixedUpdate,
            (
                systems::bind_combo_owners,
                crate::input::route_player_buttons,
                systems::apply_combo_inputs,
                systems::apply_combo_resets,
                systems::tick_combo_managers,
                systems::emit_combo_cues,
            )
                .chain(), // Последовательное выполнение для детерминизма
        );
    }
}
