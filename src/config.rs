//! Application configuration.
//!
//! Everything has a default, so the file browser runs without any
//! configuration at all. A JSON file may override any subset, e.g.
//!
//! ```json
//! {
//!     "server": { "addr": "127.0.0.1:8000" },
//!     "volumes": { "base": "/srv", "candidates": ["public", "media"] }
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::browser::Volumes;
use crate::server::{Error, ServerConfig};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Listening socket and connection limits.
    pub server: ServerConfig,
    /// Roots offered by the browser.
    pub volumes: Volumes,
}

impl Config {
    /// Parse a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a JSON configuration file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let text = tokio::fs::read_to_string(path).await?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config.server.addr.port(), crate::server::DEFAULT_PORT);
        assert_eq!(config.server.max_connections, 1024);
        assert_eq!(config.volumes.candidates, Volumes::default().candidates);
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_json(
            r#"{
                "server": { "addr": "127.0.0.1:8000", "max_connections": 4 },
                "volumes": { "base": "/srv", "candidates": ["public"] }
            }"#,
        )
        .unwrap();

        assert_eq!(config.server.addr, "127.0.0.1:8000".parse::<std::net::SocketAddr>().unwrap());
        assert_eq!(config.server.max_connections, 4);
        assert_eq!(config.server.read_buffer_size, 8192);
        assert_eq!(config.volumes.base, Path::new("/srv"));
        assert_eq!(config.volumes.candidates, vec!["public".to_string()]);
    }

    #[test]
    fn test_invalid_json_is_a_config_error() {
        let result = Config::from_json(r#"{ "server": { "addr": 5 } }"#);
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dirserver.json");
        std::fs::write(&path, r#"{ "server": { "addr": "0.0.0.0:9000" } }"#).unwrap();

        let config = Config::load(&path).await.unwrap();
        assert_eq!(config.server.addr.port(), 9000);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(dir.path().join("absent.json")).await;
        assert!(matches!(result, Err(Error::IoError(_))));
    }
}
