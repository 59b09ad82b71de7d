//! Scripted источник кнопок для headless прогонов (seeded, детерминированный).

use bevy::prelude::*;
use rand::Rng;

use super::PlayerButtonPressed;
use crate::DeterministicRng;

/// Нажимает случайную кнопку из `buttons` с вероятностью `press_chance` за fixed step.
#[derive(Resource, Debug, Clone)]
pub struct ButtonMasher {
    pub press_chance: f64,
    pub buttons: Vec<String>,
}

impl Default for ButtonMasher {
    fn default() -> Self {
        Self {
            press_chance: 0.1,
            // "Jump" не combo input — проверяем что роутинг его игнорирует
            buttons: vec![
                "LightAttack".to_string(),
                "LightAttack".to_string(),
                "HeavyAttack".to_string(),
                "Jump".to_string(),
            ],
        }
    }
}

impl ButtonMasher {
    pub fn next_press(&self, rng: &mut impl Rng) -> Option<PlayerButtonPressed> {
        if self.buttons.is_empty() || !rng.gen_bool(self.press_chance) {
            return None;
        }
        let button = &self.buttons[rng.gen_range(0..self.buttons.len())];
        Some(PlayerButtonPressed::new(button.clone()))
    }
}

/// System: scripted нажатия. Должна идти до `route_player_buttons`.
pub fn mash_buttons(
    masher: Res<ButtonMasher>,
    mut rng: ResMut<DeterministicRng>,
    mut presses: EventWriter<PlayerButtonPressed>,
) {
    if let Some(press) = masher.next_press(&mut rng.rng) {
        presses.write(press);
    }
}
