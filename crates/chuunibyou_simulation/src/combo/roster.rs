//! Combo rosters: фиксированные наборы комбо, из которых собирается fighter.

use serde::{Deserialize, Serialize};

use super::action_type::ActionType::{self, HeavyAttack, LightAttack};
use super::actions::{EmptyAction, PauseAction, TimedStrikeAction};
use super::tree::{ActionTree, RegistrationError};
use crate::config::ComboConfig;

/// Animator trigger каждой лёгкой атаки
pub const LIGHT_ATTACK_TRIGGER: &str = "LightAttack";
/// Animator bool, поднятый пока атака активна
pub const ATTACKING_FLAG: &str = "Attacking";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComboRoster {
    /// Четыре лёгкие атаки подряд
    UnityChan,
    /// Маленький ветвящийся набор (light/heavy развилки)
    Sandbox,
}

impl ComboRoster {
    pub fn build(self, config: &ComboConfig) -> Result<ActionTree, RegistrationError> {
        match self {
            ComboRoster::UnityChan => unity_chan_tree(config),
            ComboRoster::Sandbox => sandbox_tree(config),
        }
    }
}

fn light_strike(name: &str, config: &ComboConfig) -> TimedStrikeAction {
    TimedStrikeAction::new(
        name,
        config.light_strike_duration,
        config.light_strike_input_window,
    )
    .with_trigger(LIGHT_ATTACK_TRIGGER)
    .with_active_flag(ATTACKING_FLAG)
}

/// `[L]`, `[L, L]`, `[L, L, L]`, `[L, L, L, L]`.
pub fn unity_chan_tree(config: &ComboConfig) -> Result<ActionTree, RegistrationError> {
    let mut tree = ActionTree::new();
    let mut path: Vec<ActionType> = Vec::new();

    for step in 1..=4 {
        path.push(LightAttack);
        tree.register_combo(light_strike(&format!("UnityChan_Light{}", step), config), &path)?;
    }

    Ok(tree)
}

pub fn sandbox_tree(config: &ComboConfig) -> Result<ActionTree, RegistrationError> {
    let mut tree = ActionTree::new();

    tree.register_combo(light_strike("Sandbox_Light", config), &[LightAttack])?;
    tree.register_combo(
        EmptyAction {
            input_window: config.default_input_window,
        },
        &[LightAttack, LightAttack],
    )?;
    tree.register_combo(
        PauseAction::new(config.pause_delay, config.pause_input_window),
        &[LightAttack, HeavyAttack],
    )?;
    tree.register_combo(
        PauseAction::new(config.pause_delay, config.pause_input_window),
        &[HeavyAttack],
    )?;

    Ok(tree)
}
