//! Reading and writing the TOML configuration file.
//!
//! # Configuration File Format
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//!
//! [storage]
//! path = "./books.json"
//! seed = true
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```

use std::path::Path;

use super::{Config, StorageConfig};

impl Config {
    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), ConfigFileError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigFileError::Serialize(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
    }

    /// Starter configuration written by `webstore init-config`
    pub fn starter() -> Self {
        Self {
            storage: StorageConfig {
                path: Some("./books.json".into()),
                seed: true,
            },
            ..Self::default()
        }
    }
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}
