//! Fighter marker components
//!
//! Отмечает entity которым управляет игрок через input (в отличие от scripted/AI).

use bevy::prelude::*;

use crate::combo::ComboRoster;

/// Marker component для player-controlled fighter
///
/// `route_player_buttons` шлёт `ComboInput` только entity с этим компонентом.
/// Fighters без него получают `ComboInput` напрямую (AI, тесты, replay).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Roster, из которого собран `ComboManager` fighter'а
///
/// Попадает в `FighterSnapshot` (отчёты headless runner'а, determinism traces).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboFighter {
    pub roster: ComboRoster,
}
