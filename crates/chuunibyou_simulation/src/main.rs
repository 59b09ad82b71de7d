//! Headless симуляция combo системы
//!
//! Запускает Bevy App без рендера: один player fighter, seeded button masher.

use bevy::prelude::*;
use chuunibyou_simulation::input::{mash_buttons, route_player_buttons};
use chuunibyou_simulation::{
    combo_snapshot, create_headless_app, logger, spawn_player_fighter, ButtonMasher, ComboConfig,
    ComboRoster, SimulationPlugin,
};

fn main() {
    let seed = 42;
    println!("Starting chuunibyou headless combo simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    logger::set_log_level(logger::LogLevel::Info);

    app.add_plugins(SimulationPlugin)
        .init_resource::<ButtonMasher>()
        .add_systems(FixedUpdate, mash_buttons.before(route_player_buttons));

    let config = app.world().resource::<ComboConfig>().clone();
    spawn_player_fighter(&mut app.world_mut().commands(), ComboRoster::UnityChan, &config);
    println!(
        "Fixed step: {:.4}s ({} Hz)",
        config.tick_delta(),
        config.fixed_hz
    );

    // Запускаем 1000 тиков симуляции
    for tick in 0..1000 {
        app.update();

        if tick % 100 == 0 {
            for fighter in combo_snapshot(app.world_mut()) {
                let combo = &fighter.combo;
                println!(
                    "Tick {}: fighter {} ({:?}) {:?} buffer={:?} window={:.2}s (~{} ticks)",
                    tick,
                    fighter.entity_index,
                    fighter.roster,
                    combo.status,
                    combo.input_buffer,
                    combo.pending_window,
                    config.ticks_for(combo.pending_window)
                );
            }
        }
    }

    println!("Simulation complete!");
}
