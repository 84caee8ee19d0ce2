pub mod clock;
pub mod concentration;
pub mod pipeline;
pub mod population;
pub mod state;

pub use clock::{ClockPhase, FrameReport, SimulationClock};
pub use concentration::{ConcentrationStats, ConcentrationTracker};
pub use population::Population;
