use std::path::Path;

use bevy::prelude::*;
use funnel_core::SimConfig;
use funnel_render::plugin::FunnelRenderPlugin;
use funnel_sim::SimulationClock;
use funnel_sim::pipeline::SimulationPlugin;

fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::load(Path::new(&path))?,
        None => SimConfig::default(),
    };
    let g = config.funnel;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Banking Funnel: Compound Interest".into(),
                resolution: (g.canvas_width, g.canvas_height).into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb_u8(15, 15, 35)))
        .insert_resource(SimulationClock::new(config))
        .add_plugins(SimulationPlugin)
        .add_plugins(FunnelRenderPlugin)
        .run();

    Ok(())
}
