pub mod config;
pub mod constants;
pub mod types;

pub use config::{ConfigError, FunnelGeometry, SimConfig};
pub use constants::*;
pub use types::*;
