use bevy::prelude::*;
use funnel_core::SimConfig;

use crate::concentration::{ConcentrationStats, ConcentrationTracker};
use crate::population::Population;

/// Clock phases. `Resetting` only lasts for the frame that triggers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockPhase {
    Running,
    Resetting,
}

/// What the display sees after one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Frame index within the current cycle
    pub frame: u64,
    pub elapsed_years: f64,
    /// Cycle the frame belongs to (1-based, increments on every reset)
    pub cycle: u32,
    pub stats: ConcentrationStats,
    /// The population was reset this frame; the agent state is not worth drawing
    pub reset: bool,
}

/// Drives the wealth model one frame at a time and restarts it when the elite
/// share crosses the configured threshold.
#[derive(Resource)]
pub struct SimulationClock {
    config: SimConfig,
    population: Population,
    tracker: ConcentrationTracker,
    frame: u64,
    cycle: u32,
    phase: ClockPhase,
}

impl SimulationClock {
    pub fn new(config: SimConfig) -> Self {
        let population = Population::new(&config);
        let tracker = ConcentrationTracker::new(&config);
        Self {
            config,
            population,
            tracker,
            frame: 0,
            cycle: 1,
            phase: ClockPhase::Running,
        }
    }

    /// Advance one frame: grow all agents and mint credit, measure concentration,
    /// then either count the frame or reset.
    pub fn tick(&mut self) -> FrameReport {
        self.population.update();
        let stats = self.tracker.compute(&self.population);
        self.phase = self.next_phase(&stats);

        let report = FrameReport {
            frame: self.frame,
            elapsed_years: self.elapsed_years(),
            cycle: self.cycle,
            stats,
            reset: self.phase == ClockPhase::Resetting,
        };

        match self.phase {
            ClockPhase::Running => {
                self.frame += 1;
            }
            ClockPhase::Resetting => {
                info!(
                    "Elite share {:.1}% reached {:.1}% after {:.1} years ({} agents), starting cycle {}",
                    stats.elite_share_percent(),
                    self.config.reset_threshold * 100.0,
                    self.elapsed_years(),
                    stats.agent_count(),
                    self.cycle + 1
                );
                self.population.reset_all();
                self.frame = 0;
                self.cycle += 1;
                self.phase = ClockPhase::Running;
            }
        }

        report
    }

    fn next_phase(&self, stats: &ConcentrationStats) -> ClockPhase {
        if stats.elite_share >= self.config.reset_threshold {
            ClockPhase::Resetting
        } else {
            ClockPhase::Running
        }
    }

    pub fn elapsed_years(&self) -> f64 {
        self.frame as f64 / self.config.frames_per_year as f64
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    pub fn phase(&self) -> ClockPhase {
        self.phase
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Aggregates for the current state without advancing
    pub fn stats(&mut self) -> ConcentrationStats {
        self.tracker.compute(&self.population)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_initial_state() {
        let clock = SimulationClock::new(SimConfig::default());
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.cycle(), 1);
        assert_eq!(clock.phase(), ClockPhase::Running);
        assert_eq!(clock.population().len(), 500);
        assert_eq!(clock.population().credit_count(), 0);
    }

    #[test]
    fn test_one_simulated_year() {
        let mut clock = SimulationClock::new(SimConfig::default());
        let mut last = None;
        for _ in 0..240 {
            let report = clock.tick();
            assert!(!report.reset);
            last = Some(report);
        }
        let report = last.unwrap();

        assert_eq!(clock.frame(), 240);
        assert_relative_eq!(clock.elapsed_years(), 1.0);
        assert_eq!(report.frame, 239);

        let stats = report.stats;
        assert_relative_eq!(stats.principal_total, 53_000.0, max_relative = 1e-9);
        assert_relative_eq!(stats.depositors_interest, 3_000.0, max_relative = 1e-6);
        assert!(clock.population().credit_count() >= 1);
        assert!(stats.credit_total > 0.0);
        assert_relative_eq!(
            stats.grand_total,
            stats.principal_total + stats.credit_total,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_reset_when_threshold_crossed() {
        // The starting elite share is 5 * 100 / 50_000 * 8 = 0.08
        let config = SimConfig {
            reset_threshold: 0.05,
            ..SimConfig::default()
        };
        let mut clock = SimulationClock::new(config);

        let report = clock.tick();
        assert!(report.reset);
        assert_eq!(report.cycle, 1);
        assert!(report.stats.elite_share >= 0.05);

        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.cycle(), 2);
        assert_eq!(clock.phase(), ClockPhase::Running);
        assert_eq!(clock.population().credit_buffer(), 0.0);
        assert!(clock.population().agents().iter().all(|a| a.wealth == 100.0));
    }

    #[test]
    fn test_reset_discards_credit_agents() {
        let mut clock = SimulationClock::new(SimConfig {
            reset_threshold: 0.0801,
            ..SimConfig::default()
        });

        let mut reset_seen = false;
        for _ in 0..20_000 {
            let before = clock.population().credit_count();
            let report = clock.tick();
            if report.reset {
                assert!(before > 0 || report.stats.credit_count > 0);
                assert_eq!(clock.population().len(), 500);
                assert_eq!(clock.frame(), 0);
                reset_seen = true;
                break;
            }
        }
        assert!(reset_seen);
    }

    #[test]
    fn test_stats_does_not_advance() {
        let mut clock = SimulationClock::new(SimConfig::default());
        let stats = clock.stats();
        assert_eq!(clock.frame(), 0);
        assert_eq!(stats.principal_total, 50_000.0);
    }
}
