//! Варианты combo шагов (поведение за каждым узлом action tree).
//!
//! # Lifecycle
//!
//! ```text
//! ComboManager::do_action → ActionNode::begin → ComboStep::on_begin
//!   ↓ (каждый fixed tick пока RunningCombo)
//! ActionNode::tick → ComboStep::on_tick(delta) == true → is_done
//!   ↓
//! ComboManager::tick видит is_done → ComboStep::on_end
//! ```
//!
//! Варианты stateful и переиспользуются: один и тот же instance
//! представляет свой шаг при каждом входе комбо в него, поэтому
//! `on_begin` обязан заново взводить все таймеры.

use serde::{Deserialize, Serialize};

use super::{timer_expired, DEFAULT_INPUT_WINDOW};

// ============================================================================
// Presentation cues
// ============================================================================

/// Изменение animator параметра, запрошенное hook'ом шага.
///
/// Combo machine только буферизует cues; presentation layer читает их
/// из `ComboCue` событий.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionCue {
    /// Animator trigger
    Trigger { name: String },
    /// Animator bool параметр
    Bool { name: String, value: bool },
}

// ============================================================================
// Capability interface
// ============================================================================

/// Hooks combo шага.
///
/// Завершение решается только в `on_tick`:
/// возвращает `true`, когда условие шага выполнено.
pub trait ComboStep {
    fn on_begin(&mut self, cues: &mut Vec<ActionCue>);

    fn on_tick(&mut self, delta: f32) -> bool;

    fn on_end(&mut self, _cues: &mut Vec<ActionCue>) {}

    /// Сколько секунд у игрока на следующий input после завершения шага.
    fn next_input_window(&self) -> f32;
}

// ============================================================================
// Variants
// ============================================================================

/// No-op шаг. Завершается на первом тике.
///
/// Также служит synthetic root каждого дерева.
#[derive(Debug, Clone, PartialEq)]
pub struct EmptyAction {
    pub input_window: f32,
}

impl Default for EmptyAction {
    fn default() -> Self {
        Self {
            input_window: DEFAULT_INPUT_WINDOW,
        }
    }
}

impl ComboStep for EmptyAction {
    fn on_begin(&mut self, _cues: &mut Vec<ActionCue>) {}

    fn on_tick(&mut self, _delta: f32) -> bool {
        true
    }

    fn next_input_window(&self) -> f32 {
        self.input_window
    }
}

/// Placeholder шаг: ничего не делает `delay` секунд.
#[derive(Debug, Clone, PartialEq)]
pub struct PauseAction {
    pub delay: f32,
    pub input_window: f32,
    remaining: f32,
}

impl PauseAction {
    pub fn new(delay: f32, input_window: f32) -> Self {
        Self {
            delay,
            input_window,
            remaining: delay,
        }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

impl ComboStep for PauseAction {
    fn on_begin(&mut self, _cues: &mut Vec<ActionCue>) {
        self.remaining = self.delay;
        crate::logger::log(&format!("⏸️ Pause action begin ({:.2}s)", self.delay));
    }

    fn on_tick(&mut self, delta: f32) -> bool {
        self.remaining -= delta;
        if timer_expired(self.remaining) {
            crate::logger::log("⏸️ Pause action delay expired");
            return true;
        }
        false
    }

    fn on_end(&mut self, _cues: &mut Vec<ActionCue>) {
        crate::logger::log("⏸️ Pause action end");
    }

    fn next_input_window(&self) -> f32 {
        self.input_window
    }
}

/// Атака фиксированной длительности (например UnityChan Light 1).
///
/// Завершается когда `elapsed` дошёл до `duration`. Опционально
/// стреляет animator trigger на begin и держит bool "attacking" пока активна.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedStrikeAction {
    pub name: String,
    pub duration: f32,
    pub input_window: f32,
    pub trigger: Option<String>,
    pub active_flag: Option<String>,
    elapsed: f32,
}

impl TimedStrikeAction {
    pub fn new(name: impl Into<String>, duration: f32, input_window: f32) -> Self {
        Self {
            name: name.into(),
            duration,
            input_window,
            trigger: None,
            active_flag: None,
            elapsed: 0.0,
        }
    }

    pub fn with_trigger(mut self, trigger: impl Into<String>) -> Self {
        self.trigger = Some(trigger.into());
        self
    }

    pub fn with_active_flag(mut self, flag: impl Into<String>) -> Self {
        self.active_flag = Some(flag.into());
        self
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl ComboStep for TimedStrikeAction {
    fn on_begin(&mut self, cues: &mut Vec<ActionCue>) {
        self.elapsed = 0.0;

        if let Some(trigger) = &self.trigger {
            cues.push(ActionCue::Trigger {
                name: trigger.clone(),
            });
        }
        if let Some(flag) = &self.active_flag {
            cues.push(ActionCue::Bool {
                name: flag.clone(),
                value: true,
            });
        }
    }

    fn on_tick(&mut self, delta: f32) -> bool {
        self.elapsed += delta;
        timer_expired(self.duration - self.elapsed)
    }

    fn on_end(&mut self, cues: &mut Vec<ActionCue>) {
        if let Some(flag) = &self.active_flag {
            cues.push(ActionCue::Bool {
                name: flag.clone(),
                value: false,
            });
        }
    }

    fn next_input_window(&self) -> f32 {
        self.input_window
    }
}

// ============================================================================
// Closed set
// ============================================================================

/// Все шаги, которые может держать узел.
#[derive(Debug, Clone, PartialEq)]
pub enum ComboAction {
    Empty(EmptyAction),
    Pause(PauseAction),
    TimedStrike(TimedStrikeAction),
}

impl ComboAction {
    /// Короткая метка для логов
    pub fn label(&self) -> &str {
        match self {
            ComboAction::Empty(_) => "Empty",
            ComboAction::Pause(_) => "Pause",
            ComboAction::TimedStrike(strike) => &strike.name,
        }
    }

    fn step_mut(&mut self) -> &mut dyn ComboStep {
        match self {
            ComboAction::Empty(action) => action,
            ComboAction::Pause(action) => action,
            ComboAction::TimedStrike(action) => action,
        }
    }

    fn step(&self) -> &dyn ComboStep {
        match self {
            ComboAction::Empty(action) => action,
            ComboAction::Pause(action) => action,
            ComboAction::TimedStrike(action) => action,
        }
    }
}

impl Default for ComboAction {
    fn default() -> Self {
        ComboAction::Empty(EmptyAction::default())
    }
}

impl ComboStep for ComboAction {
    fn on_begin(&mut self, cues: &mut Vec<ActionCue>) {
        self.step_mut().on_begin(cues);
    }

    fn on_tick(&mut self, delta: f32) -> bool {
        self.step_mut().on_tick(delta)
    }

    fn on_end(&mut self, cues: &mut Vec<ActionCue>) {
        self.step_mut().on_end(cues);
    }

    fn next_input_window(&self) -> f32 {
        self.step().next_input_window()
    }
}

impl From<EmptyAction> for ComboAction {
    fn from(action: EmptyAction) -> Self {
        ComboAction::Empty(action)
    }
}

impl From<PauseAction> for ComboAction {
    fn from(action: PauseAction) -> Self {
        ComboAction::Pause(action)
    }
}

impl From<TimedStrikeAction> for ComboAction {
    fn from(action: TimedStrikeAction) -> Self {
        ComboAction::TimedStrike(action)
    }
}
