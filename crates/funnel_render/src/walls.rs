use bevy::prelude::*;
use funnel_sim::SimulationClock;

use super::camera::to_world;

const FUNNEL_CLR: Color = Color::srgb(100.0 / 255.0, 200.0 / 255.0, 255.0 / 255.0);

/// Throat bar thickness in pixels
const THROAT_BAR: f32 = 8.0;

/// Funnel walls, drawn from the same bounds the simulation clamps agents against
pub fn draw_funnel(mut gizmos: Gizmos, clock: Res<SimulationClock>) {
    let funnel = clock.population().funnel();
    let g = funnel.geometry;

    let (top_l, top_r) = funnel.bounds(g.top);
    let (bot_l, bot_r) = funnel.bounds(g.bottom);

    gizmos.line_2d(
        to_world(&g, [top_l, g.top]),
        to_world(&g, [bot_l, g.bottom]),
        FUNNEL_CLR,
    );
    gizmos.line_2d(
        to_world(&g, [top_r, g.top]),
        to_world(&g, [bot_r, g.bottom]),
        FUNNEL_CLR,
    );

    // Throat: a short bar across the narrow end
    let mut y = g.bottom;
    while y <= g.bottom + THROAT_BAR {
        gizmos.line_2d(to_world(&g, [bot_l, y]), to_world(&g, [bot_r, y]), FUNNEL_CLR);
        y += 2.0;
    }
}
