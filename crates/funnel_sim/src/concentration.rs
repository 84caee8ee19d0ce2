use funnel_core::{AgentKind, SimConfig};

use crate::population::Population;

/// Aggregate wealth figures for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConcentrationStats {
    pub principal_total: f64,
    pub credit_total: f64,
    pub grand_total: f64,
    /// Interest earned by the original depositors since the last reset
    pub depositors_interest: f64,
    /// Amplified wealth share of the top percentile
    pub elite_share: f64,
    pub principal_count: usize,
    pub credit_count: usize,
}

impl ConcentrationStats {
    pub fn elite_share_percent(&self) -> f64 {
        self.elite_share * 100.0
    }

    pub fn agent_count(&self) -> usize {
        self.principal_count + self.credit_count
    }
}

/// Recomputes totals and the elite share every frame
#[derive(Debug, Clone)]
pub struct ConcentrationTracker {
    elite_count: usize,
    amplification: f64,
    initial_principal_total: f64,
    /// Reused between frames; the population only grows between resets
    scratch: Vec<f64>,
}

impl ConcentrationTracker {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            elite_count: config.elite_count(),
            amplification: config.elite_amplification,
            initial_principal_total: config.initial_principal_total(),
            scratch: Vec::with_capacity(config.agent_count * 2),
        }
    }

    /// Size of the elite: max(1, floor(configured agents * top percentile))
    pub fn elite_count(&self) -> usize {
        self.elite_count
    }

    /// The population always holds at least one agent with positive wealth,
    /// so the grand total is never zero.
    pub fn compute(&mut self, population: &Population) -> ConcentrationStats {
        let mut stats = ConcentrationStats::default();
        self.scratch.clear();

        for agent in population.agents() {
            match agent.kind {
                AgentKind::Principal => {
                    stats.principal_total += agent.wealth;
                    stats.principal_count += 1;
                }
                AgentKind::Credit => {
                    stats.credit_total += agent.wealth;
                    stats.credit_count += 1;
                }
            }
            self.scratch.push(agent.wealth);
        }

        stats.grand_total = stats.principal_total + stats.credit_total;
        stats.depositors_interest = stats.principal_total - self.initial_principal_total;

        debug_assert!(stats.grand_total > 0.0);
        let elite = top_k_sum(&mut self.scratch, self.elite_count);
        stats.elite_share = elite / stats.grand_total * self.amplification;
        stats
    }
}

/// Sum of the `k` largest values. Reorders `values`.
/// Linear-time selection; the sum does not depend on which of several equal values is picked.
pub fn top_k_sum(values: &mut [f64], k: usize) -> f64 {
    if k == 0 {
        return 0.0;
    }
    if k >= values.len() {
        return values.iter().sum();
    }
    values.select_nth_unstable_by(k - 1, |a, b| b.total_cmp(a));
    values[..k].iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_top_k_sum() {
        let mut v = vec![3.0, 9.0, 1.0, 7.0, 5.0];
        assert_eq!(top_k_sum(&mut v, 2), 16.0);
        assert_eq!(top_k_sum(&mut v, 1), 9.0);
        assert_eq!(top_k_sum(&mut v, 10), 25.0);
        assert_eq!(top_k_sum(&mut v, 0), 0.0);
    }

    #[test]
    fn test_top_k_sum_with_ties() {
        let mut v = vec![4.0, 8.0, 8.0, 8.0, 2.0];
        assert_eq!(top_k_sum(&mut v, 2), 16.0);
        assert_eq!(top_k_sum(&mut v, 4), 28.0);
    }

    #[test]
    fn test_initial_stats() {
        let config = SimConfig::default();
        let pop = Population::new(&config);
        let mut tracker = ConcentrationTracker::new(&config);
        assert_eq!(tracker.elite_count(), 5);

        let stats = tracker.compute(&pop);
        assert_eq!(stats.principal_total, 50_000.0);
        assert_eq!(stats.credit_total, 0.0);
        assert_eq!(stats.grand_total, 50_000.0);
        assert_eq!(stats.depositors_interest, 0.0);
        // 5 * 100 / 50_000 * 8
        assert_relative_eq!(stats.elite_share, 0.08, max_relative = 1e-12);
        assert_relative_eq!(stats.elite_share_percent(), 8.0, max_relative = 1e-12);
    }

    #[test]
    fn test_elite_share_matches_full_sort() {
        let config = SimConfig::default();
        let mut pop = Population::new(&config);
        for _ in 0..2000 {
            pop.update();
        }
        let mut tracker = ConcentrationTracker::new(&config);
        let stats = tracker.compute(&pop);

        let mut sorted: Vec<f64> = pop.agents().iter().map(|a| a.wealth).collect();
        sorted.sort_by(|a, b| b.total_cmp(a));
        let top: f64 = sorted[..5].iter().sum();
        let total: f64 = sorted.iter().sum();

        assert_relative_eq!(stats.elite_share, top / total * 8.0, max_relative = 1e-9);
        assert_relative_eq!(stats.grand_total, total, max_relative = 1e-9);
        assert_eq!(stats.agent_count(), pop.len());
        assert_eq!(stats.credit_count, pop.credit_count());
    }
}
