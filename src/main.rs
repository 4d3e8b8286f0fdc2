use bevy::prelude::*;

mod setup;

use decorgen::decor::DecorationPlugin;
use decorgen::decor::plugin::DecorationsGenerated;

fn main() {
    App::new()
        // core engine plugins; nearest sampling keeps tile edges crisp
        .add_plugins(DefaultPlugins.set(ImagePlugin::default_nearest()))
        .insert_resource(ClearColor(Color::srgb(0.55, 0.75, 0.95)))
        // catalog + generation + spawning
        .add_plugins(DecorationPlugin)
        // camera, tile map, first generation request
        .add_systems(Startup, setup::setup)
        .add_systems(Update, log_generation_reports)
        .run();
}

fn log_generation_reports(mut evr: EventReader<DecorationsGenerated>) {
    for ev in evr.read() {
        for d in &ev.report.definitions {
            info!("pass {}: {:<12} {:>4} placed / {:>5} tried", ev.pass, d.name, d.accepted, d.attempts);
        }
    }
}
