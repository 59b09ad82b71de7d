//! Combo systems (FixedUpdate).

use bevy::prelude::*;

use super::action_type::ActionType;
use super::actions::ActionCue;
use super::manager::ComboManager;

/// Input layer → combo: одно нажатие атаки для одного fighter'а
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ComboInput {
    pub entity: Entity,
    pub action: ActionType,
}

/// Принудительно вернуть комбо fighter'а в Idle (stagger, death, cutscene)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ComboResetIntent {
    pub entity: Entity,
}

/// Combo → presentation layer: animator cue из hook'а шага
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ComboCue {
    pub entity: Entity,
    pub cue: ActionCue,
}

/// System: записать owner entity в только что заспавненные менеджеры
pub fn bind_combo_owners(mut query: Query<(Entity, &mut ComboManager), Added<ComboManager>>) {
    for (entity, mut manager) in query.iter_mut() {
        manager.bind_owner(entity);
    }
}

/// System: подать `ComboInput` события в менеджеры
pub fn apply_combo_inputs(
    mut inputs: EventReader<ComboInput>,
    mut managers: Query<&mut ComboManager>,
) {
    for input in inputs.read() {
        let Ok(mut manager) = managers.get_mut(input.entity) else {
            crate::logger::log_warning(&format!(
                "ComboInput for entity {:?} without ComboManager",
                input.entity
            ));
            continue;
        };

        manager.do_action(input.action);
    }
}

/// System: применить `ComboResetIntent`
pub fn apply_combo_resets(
    mut resets: EventReader<ComboResetIntent>,
    mut managers: Query<&mut ComboManager>,
) {
    for intent in resets.read() {
        if let Ok(mut manager) = managers.get_mut(intent.entity) {
            manager.reset();
        }
    }
}

/// System: продвинуть таймеры шагов и окна chaining
pub fn tick_combo_managers(mut query: Query<&mut ComboManager>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for mut manager in query.iter_mut() {
        manager.tick(delta);
    }
}

/// System: опубликовать cues, накопленные hooks за тик
pub fn emit_combo_cues(
    mut query: Query<(Entity, &mut ComboManager)>,
    mut cue_events: EventWriter<ComboCue>,
) {
    for (entity, mut manager) in query.iter_mut() {
        for cue in manager.drain_cues() {
            cue_events.write(ComboCue { entity, cue });
        }
    }
}
