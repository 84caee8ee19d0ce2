use funnel_core::{AgentKind, SimConfig};

/// Per-frame growth rate `r` such that `(1 + r)^frames_per_year == 1 + annual_pct / 100`
pub fn per_frame_rate(annual_pct: f64, frames_per_year: u32) -> f64 {
    (1.0 + annual_pct / 100.0).powf(1.0 / frames_per_year as f64) - 1.0
}

/// Per-frame compounding rates for both kinds of money
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateModel {
    pub principal: f64,
    pub credit: f64,
}

impl RateModel {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            principal: per_frame_rate(config.interest_pct, config.frames_per_year),
            credit: per_frame_rate(config.credit_pct(), config.frames_per_year),
        }
    }

    pub fn rate_for(&self, kind: AgentKind) -> f64 {
        match kind {
            AgentKind::Principal => self.principal,
            AgentKind::Credit => self.credit,
        }
    }
}
