use funnel_core::AgentKind;
use rand::Rng;

use crate::funnel::Funnel;
use crate::rates::RateModel;

/// One unit of money moving through the funnel
#[derive(Debug, Clone)]
pub struct Agent {
    pub kind: AgentKind,
    /// Always positive: starts at the start balance and only compounds upward
    pub wealth: f64,
    /// Screen position [x, y]; y follows wealth, x only moves when the walls push it
    pub position: [f32; 2],
}

impl Agent {
    /// Create an agent at the start balance. Principal agents are scattered over the
    /// funnel; credit agents enter at the bottom.
    pub fn new(kind: AgentKind, funnel: &Funnel, rng: &mut impl Rng) -> Self {
        let mut agent = Self {
            kind,
            wealth: funnel.start_balance(),
            position: [0.0, 0.0],
        };
        agent.reset(funnel, true, rng);
        agent
    }

    /// Back to the start balance with a fresh position.
    /// Only the initial placement of a principal agent scatters it over the funnel.
    pub fn reset(&mut self, funnel: &Funnel, initial: bool, rng: &mut impl Rng) {
        self.wealth = funnel.start_balance();
        self.position = funnel.spawn_position(initial && self.kind.is_principal(), rng);
    }

    /// One compounding step, then one smoothing step towards the new height.
    /// Returns the interest a principal agent earned this frame (zero for credit),
    /// which the caller sums into the credit buffer.
    pub fn update(&mut self, rates: &RateModel, funnel: &Funnel) -> f64 {
        let old = self.wealth;
        self.wealth *= 1.0 + rates.rate_for(self.kind);
        debug_assert!(self.wealth > 0.0);

        funnel.follow(&mut self.position, self.wealth);

        match self.kind {
            AgentKind::Principal => self.wealth - old,
            AgentKind::Credit => 0.0,
        }
    }
}
