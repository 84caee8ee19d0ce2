use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::*;

/// Errors raised while loading or checking a configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Simulation configuration. Fixed once the simulation is constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of principal agents alive at the start of every cycle
    pub agent_count: usize,
    /// Starting balance of every agent; also the interest needed to mint one credit agent
    pub start_balance: f64,
    /// Annual compound rate on deposits, in percent
    pub interest_pct: f64,
    /// Credit rate = interest_pct * credit_multiplier
    pub credit_multiplier: f64,
    /// Target scheduler rate (ticks per real second)
    pub tick_rate_hz: f64,
    /// Simulation frames per simulated year
    pub frames_per_year: u32,
    /// Elite fraction of the configured population (0.01 = top 1%)
    pub top_percentile: f64,
    /// Reset once the amplified elite share reaches this value
    pub reset_threshold: f64,
    /// Factor applied to the raw top-percentile share before comparing against the threshold
    pub elite_amplification: f64,
    /// Start balances needed to rise through the whole funnel travel
    pub wealth_scale: f64,
    /// Exponential smoothing factor for vertical motion
    pub smoothing: f32,
    /// Random seed for deterministic placement
    pub seed: u64,
    pub funnel: FunnelGeometry,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            agent_count: NUM_AGENTS,
            start_balance: START_BALANCE,
            interest_pct: INTEREST_PCT,
            credit_multiplier: CREDIT_MULT,
            tick_rate_hz: TICK_RATE_HZ,
            frames_per_year: TICK_RATE_HZ as u32 * YEARS_PER_SECOND,
            top_percentile: TOP_PERCENTILE,
            reset_threshold: RESET_AT_SHARE,
            elite_amplification: ELITE_AMPLIFICATION,
            wealth_scale: WEALTH_SCALE,
            smoothing: SMOOTHING,
            seed: 42,
            funnel: FunnelGeometry::default(),
        }
    }
}

/// Funnel layout in screen pixels (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct FunnelGeometry {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Inset of the left wall from the canvas edge at the mouth
    pub mouth_left: f32,
    /// Inset of the right wall from the canvas edge at the mouth
    pub mouth_right: f32,
    pub top: f32,
    pub bottom: f32,
    pub throat_width: f32,
    /// Vertical distance covered by `wealth_scale` start balances
    pub travel: f32,
    /// Display radius of an agent marker; keeps markers inside the walls
    pub marker_radius: f32,
    pub spawn_jitter: f32,
    pub initial_margin: f32,
}

impl Default for FunnelGeometry {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            mouth_left: FUNNEL_LEFT,
            mouth_right: FUNNEL_RIGHT,
            top: FUNNEL_TOP,
            bottom: FUNNEL_BOTTOM,
            throat_width: THROAT_WIDTH,
            travel: WEALTH_TRAVEL,
            marker_radius: APPLE_RADIUS,
            spawn_jitter: SPAWN_JITTER,
            initial_margin: INITIAL_SPREAD_MARGIN,
        }
    }
}

impl FunnelGeometry {
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn mouth_width(&self) -> f32 {
        self.canvas_width - self.mouth_left - self.mouth_right
    }

    pub fn center_x(&self) -> f32 {
        self.canvas_width / 2.0
    }
}

impl SimConfig {
    /// Principal wealth at the start of a cycle
    pub fn initial_principal_total(&self) -> f64 {
        self.agent_count as f64 * self.start_balance
    }

    /// Number of agents counted as the elite: max(1, floor(N * top_percentile))
    pub fn elite_count(&self) -> usize {
        ((self.agent_count as f64 * self.top_percentile).floor() as usize).max(1)
    }

    /// Annual credit rate in percent
    pub fn credit_pct(&self) -> f64 {
        self.interest_pct * self.credit_multiplier
    }

    /// Read a JSON config file. Missing fields fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that break the preconditions the simulation relies on:
    /// a non-empty population, positive wealth and rates, a non-degenerate funnel that
    /// can hold one marker at its throat.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.agent_count == 0 {
            return invalid("agent_count must be at least 1");
        }
        if !(self.start_balance > 0.0) {
            return invalid("start_balance must be positive");
        }
        if !(self.interest_pct > 0.0) || !(self.credit_multiplier > 0.0) {
            return invalid("interest_pct and credit_multiplier must be positive");
        }
        if self.frames_per_year == 0 || !(self.tick_rate_hz > 0.0) {
            return invalid("frames_per_year and tick_rate_hz must be positive");
        }
        if !(self.top_percentile > 0.0 && self.top_percentile <= 1.0) {
            return invalid("top_percentile must be in (0, 1]");
        }
        if !(self.reset_threshold > 0.0) || !(self.elite_amplification > 0.0) {
            return invalid("reset_threshold and elite_amplification must be positive");
        }
        if !(self.wealth_scale > 0.0) {
            return invalid("wealth_scale must be positive");
        }
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return invalid("smoothing must be in (0, 1]");
        }

        let f = &self.funnel;
        if !(f.bottom > f.top) {
            return invalid("funnel bottom must lie below its top");
        }
        if !(f.travel > 0.0) {
            return invalid("funnel travel must be positive");
        }
        if !(f.marker_radius >= 0.0 && f.spawn_jitter >= 0.0 && f.initial_margin >= 0.0) {
            return invalid("marker_radius, spawn_jitter and initial_margin must not be negative");
        }
        if f.throat_width < 2.0 * f.marker_radius {
            return invalid("funnel throat must fit one marker");
        }
        if f.mouth_width() < f.throat_width {
            return invalid("funnel mouth must be at least as wide as its throat");
        }
        Ok(())
    }
}
