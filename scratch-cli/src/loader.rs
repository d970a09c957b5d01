//! Configuration loading from the filesystem
use scratch_game::{ConfigError, ConfigLoader, GameConfig};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Reads a JSON configuration document from disk on every load.
#[derive(Debug, Clone)]
pub struct JsonFileLoader {
    path: PathBuf,
}

impl JsonFileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigLoader for JsonFileLoader {
    type Error = LoadError;

    fn load_config(&self) -> Result<GameConfig, Self::Error> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })?;
        let config = GameConfig::from_json(&text)?;
        log::debug!(
            "loaded {}x{} configuration from {}",
            config.columns,
            config.rows,
            self.path.display()
        );
        Ok(config)
    }
}
