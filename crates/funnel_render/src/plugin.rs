use bevy::prelude::*;

use super::apples;
use super::camera;
use super::ui;
use super::walls;

/// Draws the funnel, the agents and the HUD from the simulation's exposed state
pub struct FunnelRenderPlugin;

impl Plugin for FunnelRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ui::HudThrottle>()
            .init_resource::<apples::ApplePool>()
            .add_systems(
                Startup,
                (
                    camera::spawn_camera,
                    camera::spawn_backdrop,
                    apples::init_apple_assets,
                    ui::spawn_hud,
                    ui::spawn_legend,
                ),
            )
            .add_systems(
                Update,
                (
                    walls::draw_funnel,
                    apples::sync_apple_visuals,
                    ui::update_hud,
                    ui::sim_control_system,
                ),
            );
    }
}
