//! Headless run of a single simulation.
//! Logs one line of aggregates per simulated year, plus every reset.
//!
//! Usage: simulate [config.json] [--years N]

use std::path::PathBuf;

use anyhow::{Context, bail};
use bevy::log::info;
use funnel_core::SimConfig;
use funnel_sim::SimulationClock;
use tracing_subscriber::EnvFilter;

const DEFAULT_YEARS: f64 = 50.0;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut years = DEFAULT_YEARS;
    let mut config_path: Option<PathBuf> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--years" => {
                let value = args.next().context("--years needs a value")?;
                years = value
                    .parse()
                    .with_context(|| format!("invalid --years value: {value}"))?;
            }
            flag if flag.starts_with("--") => bail!("unknown flag: {flag}"),
            path => config_path = Some(PathBuf::from(path)),
        }
    }
    if !(years > 0.0) {
        bail!("--years must be positive");
    }

    let config = match config_path {
        Some(path) => SimConfig::load(&path)?,
        None => SimConfig::default(),
    };
    let frames_per_year = config.frames_per_year as u64;
    let total_frames = (years * frames_per_year as f64).round() as u64;

    info!(
        "Simulating {:.1} years ({} frames): {} agents, {:.1}%/yr deposits, {:.1}%/yr credit, reset at {:.0}%",
        years,
        total_frames,
        config.agent_count,
        config.interest_pct,
        config.credit_pct(),
        config.reset_threshold * 100.0
    );

    let mut clock = SimulationClock::new(config);
    let mut resets = 0u32;

    for _ in 0..total_frames {
        let report = clock.tick();
        if report.reset {
            resets += 1;
            continue;
        }
        if (report.frame + 1) % frames_per_year == 0 {
            let s = report.stats;
            info!(
                "cycle {:>3} | year {:>6.1} | deposits {:>14.0} | credit {:>16.0} | interest {:>14.0} | elite {:>5.1}% | agents {:>7}",
                report.cycle,
                (report.frame + 1) as f64 / frames_per_year as f64,
                s.principal_total,
                s.credit_total,
                s.depositors_interest,
                s.elite_share_percent(),
                s.agent_count()
            );
        }
    }

    info!(
        "Done: {} frames, {} resets, final cycle {}",
        total_frames,
        resets,
        clock.cycle()
    );
    Ok(())
}
