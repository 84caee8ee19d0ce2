use funnel_core::{AgentKind, SimConfig};
use funnel_econ::{Agent, Funnel, RateModel};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// All live agents plus the interest waiting to become credit money.
///
/// The first `principal_count` agents are always the principal agents; credit agents
/// are appended after them and dropped again on reset.
#[derive(Debug, Clone)]
pub struct Population {
    agents: Vec<Agent>,
    principal_count: usize,
    /// Interest earned by principal agents that has not yet minted a credit agent
    credit_buffer: f64,
    /// Credit agents minted since the last reset
    spawned_since_reset: usize,
    /// Total principal interest accrued since the last reset
    interest_since_reset: f64,
    rates: RateModel,
    funnel: Funnel,
    rng: ChaCha8Rng,
}

impl Population {
    pub fn new(config: &SimConfig) -> Self {
        let rates = RateModel::new(config);
        let funnel = Funnel::new(config);
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        let agents = (0..config.agent_count)
            .map(|_| Agent::new(AgentKind::Principal, &funnel, &mut rng))
            .collect();

        Self {
            agents,
            principal_count: config.agent_count,
            credit_buffer: 0.0,
            spawned_since_reset: 0,
            interest_since_reset: 0.0,
            rates,
            funnel,
            rng,
        }
    }

    /// Advance every agent one frame, then mint one credit agent per start balance
    /// of buffered interest. Agents minted here are not updated until the next frame.
    /// Returns how many credit agents were minted.
    pub fn update(&mut self) -> usize {
        let accrued: f64 = self
            .agents
            .iter_mut()
            .map(|a| a.update(&self.rates, &self.funnel))
            .sum();
        self.credit_buffer += accrued;
        self.interest_since_reset += accrued;

        let unit = self.funnel.start_balance();
        let mut spawned = 0;
        while self.credit_buffer >= unit {
            self.agents
                .push(Agent::new(AgentKind::Credit, &self.funnel, &mut self.rng));
            self.credit_buffer -= unit;
            spawned += 1;
        }
        self.spawned_since_reset += spawned;
        spawned
    }

    /// Drop every credit agent, send the principal agents back to the bottom at the
    /// start balance, and clear the buffer.
    pub fn reset_all(&mut self) {
        self.agents.truncate(self.principal_count);
        for agent in &mut self.agents {
            agent.reset(&self.funnel, false, &mut self.rng);
        }
        self.credit_buffer = 0.0;
        self.spawned_since_reset = 0;
        self.interest_since_reset = 0.0;
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn principal_count(&self) -> usize {
        self.principal_count
    }

    pub fn credit_count(&self) -> usize {
        self.agents.len() - self.principal_count
    }

    pub fn credit_buffer(&self) -> f64 {
        self.credit_buffer
    }

    pub fn spawned_since_reset(&self) -> usize {
        self.spawned_since_reset
    }

    pub fn interest_since_reset(&self) -> f64 {
        self.interest_since_reset
    }

    pub fn funnel(&self) -> &Funnel {
        &self.funnel
    }

    pub fn rates(&self) -> &RateModel {
        &self.rates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_starts_with_principal_only() {
        let pop = Population::new(&SimConfig::default());
        assert!(!pop.is_empty());
        assert_eq!(pop.len(), 500);
        assert_eq!(pop.credit_count(), 0);
        assert_eq!(pop.credit_buffer(), 0.0);
        assert!(pop.agents().iter().all(|a| a.kind == AgentKind::Principal && a.wealth == 100.0));
    }

    #[test]
    fn test_credit_conservation() {
        let pop_config = SimConfig::default();
        let mut pop = Population::new(&pop_config);

        let mut principal_before: f64 = pop.agents().iter().map(|a| a.wealth).sum();
        let mut deltas = 0.0;
        for _ in 0..600 {
            pop.update();
            let principal_now: f64 = pop
                .agents()
                .iter()
                .filter(|a| a.kind == AgentKind::Principal)
                .map(|a| a.wealth)
                .sum();
            deltas += principal_now - principal_before;
            principal_before = principal_now;
        }

        let minted = pop.spawned_since_reset() as f64 * pop_config.start_balance;
        assert!(pop.spawned_since_reset() > 0);
        assert_relative_eq!(minted + pop.credit_buffer(), deltas, max_relative = 1e-9);
        assert_relative_eq!(pop.interest_since_reset(), deltas, max_relative = 1e-9);
        assert!(pop.credit_buffer() >= 0.0 && pop.credit_buffer() < pop_config.start_balance);
    }

    #[test]
    fn test_counts_monotone_between_resets() {
        let mut pop = Population::new(&SimConfig::default());
        let mut credits = 0;
        for _ in 0..1000 {
            pop.update();
            assert!(pop.credit_count() >= credits);
            credits = pop.credit_count();
            let principals = pop
                .agents()
                .iter()
                .filter(|a| a.kind == AgentKind::Principal)
                .count();
            assert_eq!(principals, 500);
        }
        assert_eq!(credits, pop.spawned_since_reset());
    }

    #[test]
    fn test_multiple_spawns_in_one_frame() {
        // A large population earns several start balances of interest per frame
        let config = SimConfig {
            agent_count: 10_000,
            interest_pct: 60.0,
            ..SimConfig::default()
        };
        let mut pop = Population::new(&config);
        let spawned = pop.update();
        assert!(spawned > 1, "expected several credit agents, got {spawned}");
        assert_eq!(pop.credit_count(), spawned);
        assert!(pop.credit_buffer() < config.start_balance);
    }

    #[test]
    fn test_spawned_agents_not_updated_same_frame() {
        let mut pop = Population::new(&SimConfig {
            agent_count: 10_000,
            interest_pct: 60.0,
            ..SimConfig::default()
        });
        pop.update();
        assert!(pop
            .agents()
            .iter()
            .filter(|a| a.kind == AgentKind::Credit)
            .all(|a| a.wealth == 100.0));
    }

    #[test]
    fn test_reset_invariant() {
        let mut pop = Population::new(&SimConfig::default());
        for _ in 0..500 {
            pop.update();
        }
        assert!(pop.credit_count() > 0);

        pop.reset_all();
        assert_eq!(pop.len(), 500);
        assert_eq!(pop.credit_count(), 0);
        assert_eq!(pop.credit_buffer(), 0.0);
        assert_eq!(pop.spawned_since_reset(), 0);
        assert!(pop.agents().iter().all(|a| a.wealth == 100.0));
        assert!(pop.agents().iter().all(|a| a.kind == AgentKind::Principal));
    }

    #[test]
    fn test_credit_conservation_after_reset() {
        let config = SimConfig::default();
        let mut pop = Population::new(&config);
        for _ in 0..300 {
            pop.update();
        }
        pop.reset_all();
        assert_eq!(pop.interest_since_reset(), 0.0);

        // Every principal agent starts the new cycle at the start balance
        pop.update();
        let first_frame = 500.0 * config.start_balance * pop.rates().principal;
        assert_relative_eq!(pop.interest_since_reset(), first_frame, max_relative = 1e-9);

        let principal_sum = |pop: &Population| -> f64 {
            pop.agents()
                .iter()
                .filter(|a| a.kind == AgentKind::Principal)
                .map(|a| a.wealth)
                .sum()
        };
        let mut principal_before = principal_sum(&pop);
        let mut deltas = first_frame;
        for _ in 0..600 {
            pop.update();
            let principal_now = principal_sum(&pop);
            deltas += principal_now - principal_before;
            principal_before = principal_now;
        }

        let minted = pop.spawned_since_reset() as f64 * config.start_balance;
        assert!(pop.spawned_since_reset() > 0);
        assert_eq!(pop.credit_count(), pop.spawned_since_reset());
        assert_relative_eq!(pop.interest_since_reset(), deltas, max_relative = 1e-9);
        assert_relative_eq!(
            minted + pop.credit_buffer(),
            pop.interest_since_reset(),
            max_relative = 1e-9
        );
    }
}
