/// What kind of money an agent represents. Fixed for the agent's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentKind {
    /// Original depositor funds, compounding at the base rate
    Principal,
    /// Credit money minted from accrued deposit interest, compounding at the amplified rate
    Credit,
}

impl AgentKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Principal => "Depositor Principal",
            Self::Credit => "Bank Credit/Debt",
        }
    }

    /// Marker color [r, g, b, a]
    pub fn color(&self) -> [f32; 4] {
        match self {
            Self::Principal => [230.0 / 255.0, 60.0 / 255.0, 60.0 / 255.0, 1.0], // Red
            Self::Credit => [1.0, 180.0 / 255.0, 0.0, 1.0],                     // Orange
        }
    }

    pub fn is_principal(&self) -> bool {
        matches!(self, Self::Principal)
    }
}
