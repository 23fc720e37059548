//! NPC simulation demo binary.
//!
//! Composition root: reads configuration, sets up logging, builds the demo
//! scenario and runs it for a fixed number of steps.
//!
//! # Environment
//!
//! - `SIM_CONFIG` - Optional TOML file with [`RuntimeConfig`] values
//! - `SIM_STEPS` - Number of steps to simulate (default: 120)
//! - `SIM_LOG_DIR` - Also write logs to `<dir>/npc-sim.log`
//! - `RUST_LOG` - Log filter (default: `info`)
//! - `SIM_TILE_SIZE`, `SIM_DETECTION_THRESHOLD`, `SIM_SEARCH_TIMEOUT`,
//!   `SIM_STEP_SECONDS` - Overrides applied on top of the file
//!
//! # Examples
//!
//! ```bash
//! RUST_LOG=runtime=debug SIM_STEPS=60 cargo run -p npc-sim
//! ```
mod logging;
mod scenario;

use std::env;

use anyhow::{Context, Result};
use runtime::RuntimeConfig;
use scenario::Scenario;

const DEFAULT_STEPS: u64 = 120;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let _log_guard = logging::init()?;

    let config = load_config()?;
    let steps = read_env::<u64>("SIM_STEPS").unwrap_or(DEFAULT_STEPS);
    tracing::info!(
        steps,
        step_seconds = config.step_seconds,
        tile_size = config.game.tile_size,
        "starting simulation"
    );

    let mut scenario = Scenario::demo(config)?;
    for _ in 0..steps {
        scenario.step();
    }
    scenario.log_summary();

    Ok(())
}

fn load_config() -> Result<RuntimeConfig> {
    let mut config = match env::var_os("SIM_CONFIG") {
        Some(path) => RuntimeConfig::load(&path)
            .with_context(|| format!("loading {}", path.to_string_lossy()))?,
        None => RuntimeConfig::default(),
    };
    config.apply_env();
    config.validate()?;
    Ok(config)
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
