//! Типы input'а (метки рёбер action tree).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Дискретная категория атакующего input'а игрока.
///
/// Набор закрытый и маленький: у каждого `ActionNode` по одному successor
/// слоту на вариант, индекс через [`ActionType::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    LightAttack,
    HeavyAttack,
}

impl ActionType {
    /// Число successor слотов у узла
    pub const COUNT: usize = 2;

    pub const ALL: [ActionType; Self::COUNT] = [ActionType::LightAttack, ActionType::HeavyAttack];

    /// Индекс слота в successor таблице узла
    pub fn index(self) -> usize {
        match self {
            ActionType::LightAttack => 0,
            ActionType::HeavyAttack => 1,
        }
    }

    /// Имя кнопки / action в config и input layer
    pub fn button_name(self) -> &'static str {
        match self {
            ActionType::LightAttack => "LightAttack",
            ActionType::HeavyAttack => "HeavyAttack",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.button_name())
    }
}

/// Имя action в config, которому не соответствует ни один `ActionType`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action type: {0}")]
pub struct UnknownActionType(pub String);

impl FromStr for ActionType {
    type Err = UnknownActionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionType::ALL
            .into_iter()
            .find(|action| action.button_name() == s)
            .ok_or_else(|| UnknownActionType(s.to_string()))
    }
}

/// Форматирует путь как `LightAttack, LightAttack, HeavyAttack` (для логов и ошибок).
pub fn format_path(path: &[ActionType]) -> String {
    path.iter()
        .map(|action| action.button_name())
        .collect::<Vec<_>>()
        .join(", ")
}
