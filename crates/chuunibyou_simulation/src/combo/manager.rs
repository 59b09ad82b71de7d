//! Combo state machine: ведёт указатель по action tree на каждый input
//! и закрывает окно chaining по fixed тикам.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::action_type::{format_path, ActionType};
use super::actions::ActionCue;
use super::timer_expired;
use super::tree::{ActionTree, NodeId};

/// Derived combo состояние. Не хранится, всегда вычисляется из менеджера.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComboStatus {
    /// Комбо не идёт
    Idle,
    /// Шаг завершён, окно chaining открыто
    WaitingForNextComboInput,
    /// Текущий шаг ещё не сообщил о завершении
    RunningCombo,
}

/// Что `do_action` сделал с input'ом
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Перешли в successor узел и запустили его
    Advanced(NodeId),
    /// Шаг ещё идёт, input отброшен
    DroppedBusy,
    /// Нет successor для input'а, комбо сброшено
    Rejected,
}

/// Что сделал fixed tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    Idle,
    /// Текущий шаг ещё идёт
    Running,
    /// Шаг завершился, окно только что открылось
    StepFinished { window: f32 },
    /// Ждём следующий input
    Waiting { remaining: f32 },
    /// Окно истекло, комбо сброшено
    WindowExpired,
}

/// Serializable срез менеджера (отчёты, determinism проверки)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboSnapshot {
    pub status: ComboStatus,
    pub input_buffer: Vec<ActionType>,
    pub pending_window: f32,
}

/// Combo state machine fighter'а
///
/// Полностью владеет своим [`ActionTree`]: таймеры узлов per-instance,
/// два fighter'а никогда не делят одно дерево.
///
/// Инвариант: путь от root до `current` == `input_buffer`.
#[derive(Component, Debug, Clone)]
pub struct ComboManager {
    tree: ActionTree,
    current: NodeId,
    is_busy: bool,
    input_buffer: Vec<ActionType>,
    /// Countdown пока `WaitingForNextComboInput` (секунды)
    pending_window: f32,
    /// Cues от hooks узлов, забирает `emit_combo_cues`
    cues: Vec<ActionCue>,
}

impl ComboManager {
    pub fn new(tree: ActionTree) -> Self {
        Self {
            tree,
            current: NodeId::ROOT,
            is_busy: false,
            input_buffer: Vec::new(),
            pending_window: 0.0,
            cues: Vec::new(),
        }
    }

    pub fn status(&self) -> ComboStatus {
        if self.is_busy {
            ComboStatus::RunningCombo
        } else if !self.input_buffer.is_empty() {
            ComboStatus::WaitingForNextComboInput
        } else {
            ComboStatus::Idle
        }
    }

    /// Подать один input.
    ///
    /// Пока шаг идёт, input'ы отбрасываются. Input без successor из текущего
    /// узла сбрасывает комбо (в том числе из состояния ожидания).
    pub fn do_action(&mut self, action: ActionType) -> ActionOutcome {
        if self.is_busy {
            crate::logger::log(&format!(
                "🚫 Combo: {} dropped, step still running (owner: {:?})",
                action,
                self.tree.owner()
            ));
            return ActionOutcome::DroppedBusy;
        }

        let Some(next) = self.tree.node(self.current).next(action) else {
            crate::logger::log(&format!(
                "↩️ Combo: no follow-up for {} after [{}], reset (owner: {:?})",
                action,
                format_path(&self.input_buffer),
                self.tree.owner()
            ));
            self.reset();
            return ActionOutcome::Rejected;
        };

        self.input_buffer.push(action);
        self.current = next;
        self.is_busy = true;
        self.tree.node_mut(next).begin(&mut self.cues);

        crate::logger::log(&format!(
            "⚔️ Combo: [{}] begin {} (owner: {:?})",
            format_path(&self.input_buffer),
            self.tree.node(next).action().label(),
            self.tree.owner()
        ));

        ActionOutcome::Advanced(next)
    }

    /// Продвинуть один fixed step длиной `delta` секунд.
    pub fn tick(&mut self, delta: f32) -> TickOutcome {
        match self.status() {
            ComboStatus::RunningCombo => {
                let node = self.tree.node_mut(self.current);
                node.tick(delta);
                if !node.is_done() {
                    return TickOutcome::Running;
                }

                node.end(&mut self.cues);
                let window = node.next_input_window();
                self.is_busy = false;
                self.pending_window = window;

                crate::logger::log(&format!(
                    "✅ Combo: [{}] done, window {:.2}s (owner: {:?})",
                    format_path(&self.input_buffer),
                    window,
                    self.tree.owner()
                ));

                TickOutcome::StepFinished { window }
            }
            ComboStatus::WaitingForNextComboInput => {
                self.pending_window -= delta;
                if timer_expired(self.pending_window) {
                    crate::logger::log(&format!(
                        "⌛ Combo: window expired after [{}], reset (owner: {:?})",
                        format_path(&self.input_buffer),
                        self.tree.owner()
                    ));
                    self.reset();
                    return TickOutcome::WindowExpired;
                }
                TickOutcome::Waiting {
                    remaining: self.pending_window,
                }
            }
            ComboStatus::Idle => TickOutcome::Idle,
        }
    }

    /// Принудительно вернуть machine в Idle.
    pub fn reset(&mut self) {
        self.current = NodeId::ROOT;
        self.input_buffer.clear();
        self.is_busy = false;
        self.pending_window = 0.0;
    }

    pub fn input_buffer(&self) -> &[ActionType] {
        &self.input_buffer
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    pub fn is_busy(&self) -> bool {
        self.is_busy
    }

    pub fn pending_window(&self) -> f32 {
        self.pending_window
    }

    pub fn tree(&self) -> &ActionTree {
        &self.tree
    }

    pub fn bind_owner(&mut self, owner: Entity) {
        self.tree.bind_owner(owner);
    }

    /// Забрать все cues с прошлого drain.
    pub fn drain_cues(&mut self) -> Vec<ActionCue> {
        std::mem::take(&mut self.cues)
    }

    pub fn snapshot(&self) -> ComboSnapshot {
        ComboSnapshot {
            status: self.status(),
            input_buffer: self.input_buffer.clone(),
            pending_window: self.pending_window,
        }
    }
}
