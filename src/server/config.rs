//! Server configuration.

use std::net::SocketAddr;

use serde::Deserialize;

/// Port the file browser listens on unless configured otherwise.
pub const DEFAULT_PORT: u16 = 1688;

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// The address to bind to.
    pub addr: SocketAddr,
    /// The maximum number of concurrent connections.
    pub max_connections: usize,
    /// The read buffer size.
    pub read_buffer_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            max_connections: 1024,
            read_buffer_size: 8192,
        }
    }
}
