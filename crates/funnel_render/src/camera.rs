use bevy::prelude::*;
use bevy::color::ColorToComponents;
use funnel_core::FunnelGeometry;
use funnel_sim::SimulationClock;

/// Gradient colors, top and bottom of the canvas
const BG_TOP: Color = Color::srgb(15.0 / 255.0, 15.0 / 255.0, 35.0 / 255.0);
const BG_BOT: Color = Color::srgb(35.0 / 255.0, 35.0 / 255.0, 75.0 / 255.0);

/// Convert a simulation position (origin top-left, y down) into 2D world space
/// (origin at the canvas center, y up). The default 2D camera maps one unit to one pixel.
pub fn to_world(geometry: &FunnelGeometry, position: [f32; 2]) -> Vec2 {
    Vec2::new(
        position[0] - geometry.canvas_width / 2.0,
        geometry.canvas_height / 2.0 - position[1],
    )
}

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Full-canvas quad with a vertical color gradient behind everything else
pub fn spawn_backdrop(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    clock: Res<SimulationClock>,
) {
    let g = clock.config().funnel;
    let top = LinearRgba::from(BG_TOP).to_f32_array();
    let bot = LinearRgba::from(BG_BOT).to_f32_array();

    // Rectangle vertices: top-right, top-left, bottom-left, bottom-right
    let mesh = Mesh::from(Rectangle::new(g.canvas_width, g.canvas_height))
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, vec![top, top, bot, bot]);

    commands.spawn((
        Mesh2d(meshes.add(mesh)),
        MeshMaterial2d(materials.add(ColorMaterial::from(Color::WHITE))),
        Transform::from_xyz(0.0, 0.0, -10.0),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_world_corners() {
        let g = FunnelGeometry::default();
        assert_eq!(to_world(&g, [0.0, 0.0]), Vec2::new(-350.0, 500.0));
        assert_eq!(to_world(&g, [700.0, 1000.0]), Vec2::new(350.0, -500.0));
        assert_eq!(to_world(&g, [350.0, 500.0]), Vec2::ZERO);
    }
}
