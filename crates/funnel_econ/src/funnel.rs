use funnel_core::{FunnelGeometry, SimConfig};
use rand::Rng;

/// Maps wealth onto the funnel and keeps agent positions inside its walls.
///
/// Preconditions (checked by `SimConfig::validate`): `bottom > top`, `travel > 0`,
/// the throat fits one marker, the mouth is at least as wide as the throat, and the
/// marker radius and spawn offsets are not negative.
/// Under those, `left(y) <= right(y)` for every `y` and no division by zero occurs.
#[derive(Debug, Clone, Copy)]
pub struct Funnel {
    pub geometry: FunnelGeometry,
    start_balance: f64,
    wealth_scale: f64,
    smoothing: f32,
}

impl Funnel {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            geometry: config.funnel,
            start_balance: config.start_balance,
            wealth_scale: config.wealth_scale,
            smoothing: config.smoothing,
        }
    }

    pub fn start_balance(&self) -> f64 {
        self.start_balance
    }

    /// Left and right wall positions at height `y`.
    /// The full mouth at `top`, narrowing linearly to the throat at `bottom`.
    /// Heights outside the funnel use the nearest end.
    pub fn bounds(&self, y: f32) -> (f32, f32) {
        let g = &self.geometry;
        let t = ((y - g.top) / g.height()).clamp(0.0, 1.0);
        let throat_left = g.center_x() - g.throat_width / 2.0;
        let throat_right = g.center_x() + g.throat_width / 2.0;
        let left = g.mouth_left * (1.0 - t) + throat_left * t;
        let right = (g.canvas_width - g.mouth_right) * (1.0 - t) + throat_right * t;
        (left, right)
    }

    /// Height an agent with this much wealth settles towards. More wealth sits higher.
    pub fn target_y(&self, wealth: f64) -> f32 {
        let g = &self.geometry;
        let rise = (wealth / (self.start_balance * self.wealth_scale)) as f32 * g.travel;
        (g.bottom - rise).clamp(g.top, g.bottom)
    }

    /// Keep `x` at least one marker radius inside the walls at height `y`
    pub fn clamp_x(&self, x: f32, y: f32) -> f32 {
        let (left, right) = self.bounds(y);
        let r = self.geometry.marker_radius;
        x.max(left + r).min(right - r)
    }

    /// Move a position one smoothing step towards the height for `wealth`, then clamp it
    pub fn follow(&self, position: &mut [f32; 2], wealth: f64) {
        let target = self.target_y(wealth);
        position[1] += (target - position[1]) * self.smoothing;
        position[0] = self.clamp_x(position[0], position[1]);
    }

    /// Fresh position for a (re)spawned agent.
    /// Scattered over the whole funnel for the first placement of a principal agent,
    /// otherwise at the bottom opening with a little vertical jitter.
    pub fn spawn_position(&self, scatter: bool, rng: &mut impl Rng) -> [f32; 2] {
        let g = &self.geometry;
        let y = if scatter {
            let lo = (g.top + g.initial_margin).min(g.bottom);
            rng.gen_range(lo..=g.bottom)
        } else {
            g.bottom + rng.gen_range(-g.spawn_jitter..=g.spawn_jitter)
        };

        let (left, right) = self.bounds(y);
        let r = g.marker_radius;
        let (lo, hi) = (left + r, (right - r).max(left + r));
        [rng.gen_range(lo..=hi), y]
    }
}
