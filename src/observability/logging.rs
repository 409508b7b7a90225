//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Select the minimum severity from the environment
//!
//! # Design Decisions
//! - The debug flag wins over the environment variable
//! - `ROUTEWIRE_LOG_LEVEL` holds a plain level name; richer filtering can
//!   still be expressed through it as an env-filter directive

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Environment variable selecting the minimum diagnostic severity.
pub const LOG_LEVEL_ENV: &str = "ROUTEWIRE_LOG_LEVEL";

/// Initialize the global subscriber. Consulted once per process; further
/// calls are no-ops.
pub fn init(debug: bool) {
    let level = if debug {
        "debug".to_string()
    } else {
        std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| "info".to_string())
    };
    let filter = EnvFilter::try_new(format!("routewire={level}"))
        .unwrap_or_else(|_| EnvFilter::new("routewire=info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
