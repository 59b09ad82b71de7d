//! Player input routing: имена кнопок → combo inputs.
//!
//! Raw polling остаётся в host (движок / headless runner). Host сообщает
//! каждую нажатую кнопку один раз за fixed step через `PlayerButtonPressed`;
//! здесь привязаны только атакующие кнопки. Движение (Jump, Dash, оси)
//! принадлежит locomotion layer.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::combo::{ActionType, ComboInput, ComboManager, UnknownActionType};
use crate::config::ComboConfig;
use crate::player::Player;

pub mod scripted;

pub use scripted::{mash_buttons, ButtonMasher};

/// Кнопка нажата в этом step (host → ECS)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PlayerButtonPressed {
    pub button: String,
}

impl PlayerButtonPressed {
    pub fn new(button: impl Into<String>) -> Self {
        Self {
            button: button.into(),
        }
    }
}

/// Имя кнопки → combo input
#[derive(Resource, Debug, Clone)]
pub struct InputBindings {
    bindings: HashMap<String, ActionType>,
}

impl InputBindings {
    /// Разобрать `button_bindings` из конфига.
    ///
    /// Неизвестное имя action считается ошибкой, кнопка не пропускается молча.
    pub fn from_config(config: &ComboConfig) -> Result<Self, UnknownActionType> {
        let bindings = config
            .button_bindings
            .iter()
            .map(|binding| {
                binding
                    .action
                    .parse::<ActionType>()
                    .map(|action| (binding.button.clone(), action))
            })
            .collect::<Result<HashMap<_, _>, _>>()?;

        Ok(Self { bindings })
    }

    pub fn action_for(&self, button: &str) -> Option<ActionType> {
        self.bindings.get(button).copied()
    }
}

/// Собрать `InputBindings` при старте App.
///
/// Битый конфиг биндингов означает ошибку сборки игры: логируем и падаем сразу,
/// как и с битым roster'ом.
pub fn build_input_bindings(config: &ComboConfig) -> InputBindings {
    match InputBindings::from_config(config) {
        Ok(bindings) => bindings,
        Err(err) => {
            crate::logger::log_error(&format!("Input bindings are malformed: {}", err));
            panic!("input bindings are malformed: {}", err);
        }
    }
}

/// System: привязанные нажатия → `ComboInput` каждому player fighter'у
pub fn route_player_buttons(
    mut presses: EventReader<PlayerButtonPressed>,
    bindings: Res<InputBindings>,
    players: Query<Entity, (With<Player>, With<ComboManager>)>,
    mut combo_inputs: EventWriter<ComboInput>,
) {
    for press in presses.read() {
        let Some(action) = bindings.action_for(&press.button) else {
            crate::logger::log(&format!("🎮 Button '{}' is not a combo input", press.button));
            continue;
        };

        for entity in players.iter() {
            combo_inputs.write(ComboInput { entity, action });
        }
    }
}
