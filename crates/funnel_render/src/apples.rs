use bevy::prelude::*;
use funnel_core::AgentKind;
use funnel_sim::SimulationClock;
use funnel_sim::pipeline::LatestFrame;

use super::camera::to_world;

/// Marker for an agent's circle; `index` is the agent's slot in the population
#[derive(Component)]
pub struct AppleMarker {
    pub index: usize,
}

/// Shared mesh and per-kind materials
#[derive(Resource)]
pub struct AppleAssets {
    mesh: Handle<Mesh>,
    principal: Handle<ColorMaterial>,
    credit: Handle<ColorMaterial>,
}

impl AppleAssets {
    fn material(&self, kind: AgentKind) -> Handle<ColorMaterial> {
        match kind {
            AgentKind::Principal => self.principal.clone(),
            AgentKind::Credit => self.credit.clone(),
        }
    }
}

/// Number of marker entities currently spawned (indices 0..count)
#[derive(Resource, Default)]
pub struct ApplePool {
    pub count: usize,
}

fn kind_color(kind: AgentKind) -> Color {
    let c = kind.color();
    Color::srgba(c[0], c[1], c[2], c[3])
}

/// Credit markers are drawn above principal markers
fn kind_depth(kind: AgentKind) -> f32 {
    match kind {
        AgentKind::Principal => 1.0,
        AgentKind::Credit => 2.0,
    }
}

pub fn init_apple_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    clock: Res<SimulationClock>,
) {
    let radius = clock.config().funnel.marker_radius;
    commands.insert_resource(AppleAssets {
        mesh: meshes.add(Circle::new(radius)),
        principal: materials.add(ColorMaterial::from(kind_color(AgentKind::Principal))),
        credit: materials.add(ColorMaterial::from(kind_color(AgentKind::Credit))),
    });
}

/// Keep one marker per live agent and move markers to their agent's position.
/// A slot's kind never changes (principal agents first, credit after), so
/// materials are only assigned at spawn. Frames that reset are skipped.
pub fn sync_apple_visuals(
    mut commands: Commands,
    assets: Res<AppleAssets>,
    clock: Res<SimulationClock>,
    latest: Res<LatestFrame>,
    mut pool: ResMut<ApplePool>,
    mut query: Query<(Entity, &AppleMarker, &mut Transform)>,
) {
    if latest.0.is_some_and(|report| report.reset) {
        return;
    }

    let agents = clock.population().agents();
    let geometry = clock.config().funnel;

    for (entity, marker, mut transform) in query.iter_mut() {
        match agents.get(marker.index) {
            Some(agent) => {
                let pos = to_world(&geometry, agent.position);
                transform.translation = pos.extend(kind_depth(agent.kind));
            }
            None => commands.entity(entity).despawn(),
        }
    }
    pool.count = pool.count.min(agents.len());

    for (index, agent) in agents.iter().enumerate().skip(pool.count) {
        let pos = to_world(&geometry, agent.position);
        commands.spawn((
            Mesh2d(assets.mesh.clone()),
            MeshMaterial2d(assets.material(agent.kind)),
            Transform::from_translation(pos.extend(kind_depth(agent.kind))),
            AppleMarker { index },
        ));
    }
    if agents.len() > pool.count {
        debug!("Spawned {} apple markers", agents.len() - pool.count);
    }
    pool.count = agents.len();
}
