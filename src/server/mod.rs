//! HTTP server for the file browser.
//!
//! A small tokio accept loop with a connection limit, graceful Ctrl+C
//! shutdown, subtree route patterns and responses that stream files
//! straight from disk.

mod response;
mod config;
mod error;
mod handler;
mod http_server;

// Re-export public items
pub use response::{Body, HttpResponse, StatusCode};
pub use config::{ServerConfig, DEFAULT_PORT};
pub use error::{Error, NOT_FOUND_BODY};
pub use handler::Route;
pub use http_server::{HttpServer, MAX_HEAD_SIZE};
