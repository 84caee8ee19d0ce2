use bevy::prelude::*;
use funnel_core::TICK_RATE_HZ;

use super::clock::{FrameReport, SimulationClock};
use super::state::SimState;

/// Bevy plugin for the simulation pipeline.
/// Expects a `SimulationClock` resource to be inserted before it is added.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let hz = app
            .world()
            .get_resource::<SimulationClock>()
            .map_or(TICK_RATE_HZ, |clock| clock.config().tick_rate_hz);
        info!("Simulation ticking at {:.0} Hz", hz);

        app.insert_resource(Time::<Fixed>::from_hz(hz))
            .init_resource::<SimSpeed>()
            .init_resource::<LatestFrame>()
            .init_state::<SimState>()
            .add_systems(
                FixedUpdate,
                simulation_tick.run_if(in_state(SimState::Running)),
            );
    }
}

/// Core ticks per scheduled tick
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimSpeed(pub u32);

impl Default for SimSpeed {
    fn default() -> Self {
        Self(1)
    }
}

/// Most recent frame report, for the display
#[derive(Resource, Debug, Default)]
pub struct LatestFrame(pub Option<FrameReport>);

/// Main simulation tick: advances the wealth model by `SimSpeed` frames
pub fn simulation_tick(
    mut clock: ResMut<SimulationClock>,
    speed: Res<SimSpeed>,
    mut latest: ResMut<LatestFrame>,
) {
    for _ in 0..speed.0.max(1) {
        latest.0 = Some(clock.tick());
    }
}
