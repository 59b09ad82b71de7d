//! Simulation tuning (tick rate, button bindings, combo step timings).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::combo::{ActionType, DEFAULT_INPUT_WINDOW};

/// Одна привязка кнопки к combo input'у (как в config файле)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonBinding {
    pub button: String,
    /// Имя `ActionType` (`LightAttack`, `HeavyAttack`)
    pub action: String,
}

impl ButtonBinding {
    pub fn new(button: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            button: button.into(),
            action: action.into(),
        }
    }
}

/// Параметры combo симуляции
///
/// Вставляется как Resource; roster'ы читают тайминги отсюда при сборке дерева,
/// `ComboPlugin` строит из `button_bindings` таблицу `InputBindings`.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboConfig {
    /// Частота fixed тика (Hz). Единственный источник шага симуляции.
    pub fixed_hz: f64,
    /// Кнопка → combo input
    pub button_bindings: Vec<ButtonBinding>,
    /// Окно chaining для шагов без своего (секунды)
    pub default_input_window: f32,
    /// Pause шаг: сколько ничего не делает (секунды)
    pub pause_delay: f32,
    /// Pause шаг: окно chaining (секунды)
    pub pause_input_window: f32,
    /// Light strike: длительность замаха (секунды)
    pub light_strike_duration: f32,
    /// Light strike: окно chaining (секунды)
    pub light_strike_input_window: f32,
}

impl Default for ComboConfig {
    fn default() -> Self {
        // Имена кнопок совпадают с именами action (Unity Input Manager axes)
        let button_bindings = ActionType::ALL
            .into_iter()
            .map(|action| ButtonBinding::new(action.button_name(), action.button_name()))
            .collect();

        Self {
            fixed_hz: 60.0,
            button_bindings,
            default_input_window: DEFAULT_INPUT_WINDOW,
            pause_delay: 2.0,
            pause_input_window: 1.0,
            light_strike_duration: 0.3,
            light_strike_input_window: 0.5,
        }
    }
}

impl ComboConfig {
    /// Длительность одного fixed тика.
    ///
    /// И `Time<Fixed>`, и manual clock headless App берут шаг отсюда,
    /// поэтому один `app.update()` == ровно один fixed tick.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fixed_hz)
    }

    /// Секунды на fixed tick (то же значение, что видят combo systems)
    pub fn tick_delta(&self) -> f32 {
        self.tick_duration().as_secs_f32()
    }

    /// Сколько fixed тиков покрывают `seconds` (для отчётов headless runner'а)
    pub fn ticks_for(&self, seconds: f32) -> u32 {
        if seconds <= 0.0 {
            return 0;
        }
        (seconds / self.tick_delta() - crate::combo::TIMER_EPSILON).ceil() as u32
    }
}
