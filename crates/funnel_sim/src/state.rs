use bevy::prelude::*;

/// Whether the scheduler is feeding ticks to the simulation
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SimState {
    #[default]
    Running,
    Paused,
}
