/// Tracing setup.  The terminal is the render target, so log lines go to a
/// file instead of stdout.

use std::fs::File;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::GameConfig;
use crate::error::{GameError, Result};

pub fn init(config: &GameConfig) -> Result<()> {
    let file = File::create(&config.log_file)?;
    let filter = EnvFilter::try_new(&config.log_filter)
        .map_err(|e| GameError::Logging(format!("bad filter {:?}: {}", config.log_filter, e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| GameError::Logging(e.to_string()))?;

    Ok(())
}
