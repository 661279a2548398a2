use thiserror::Error;

/// Everything that can stop the game from starting or keep the terminal
/// loop from running.  Per-frame entity logic never fails.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Level parse error on line {line}: {reason}")]
    LevelParse { line: usize, reason: String },

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid setting {field}: {reason}")]
    InvalidSetting { field: &'static str, reason: String },

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
