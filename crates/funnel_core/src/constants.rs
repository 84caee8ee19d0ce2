// Defaults for the wealth model and its funnel layout.
// Layout values are in screen pixels: origin at the top-left corner, y grows downward.

/// Starting balance of every agent, and the amount of accrued interest that mints one credit agent
pub const START_BALANCE: f64 = 100.0;

/// Number of principal agents at the start of every cycle
pub const NUM_AGENTS: usize = 500;

/// Annual compound interest on deposits (percent)
pub const INTEREST_PCT: f64 = 6.0;

/// Credit compounds this many times faster than deposits (6% -> 18%/yr)
pub const CREDIT_MULT: f64 = 3.0;

/// Scheduler ticks per real second
pub const TICK_RATE_HZ: f64 = 60.0;

/// Simulated years that pass per real second
pub const YEARS_PER_SECOND: u32 = 4;

/// Fraction of the configured population counted as the elite
pub const TOP_PERCENTILE: f64 = 0.01;

/// Restart once the (amplified) elite share reaches this value
pub const RESET_AT_SHARE: f64 = 0.50;

/// Amplification applied to the raw top-percentile wealth fraction
pub const ELITE_AMPLIFICATION: f64 = 8.0;

/// Multiple of the start balance needed to travel the full funnel height
pub const WEALTH_SCALE: f64 = 25.0;

/// Fraction of the gap to the target height closed each frame
pub const SMOOTHING: f32 = 0.08;

pub const CANVAS_WIDTH: f32 = 700.0;
pub const CANVAS_HEIGHT: f32 = 1000.0;

/// Horizontal insets of the funnel mouth from the canvas edges
pub const FUNNEL_LEFT: f32 = 130.0;
pub const FUNNEL_RIGHT: f32 = 130.0;

/// Vertical extent of the funnel
pub const FUNNEL_TOP: f32 = 110.0;
pub const FUNNEL_BOTTOM: f32 = CANVAS_HEIGHT - 50.0;

pub const THROAT_WIDTH: f32 = 160.0;

/// Pixels of vertical travel that correspond to `WEALTH_SCALE` start balances
pub const WEALTH_TRAVEL: f32 = CANVAS_HEIGHT - 180.0;

/// Display radius of one agent marker
pub const APPLE_RADIUS: f32 = 12.0;

/// Vertical jitter around the funnel bottom for newly minted agents
pub const SPAWN_JITTER: f32 = 20.0;

/// Initial principal agents are scattered from this far below the top down to the bottom
pub const INITIAL_SPREAD_MARGIN: f32 = 30.0;
