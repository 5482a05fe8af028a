//! A minimal HTTP file browser.
//!
//! The crate exposes the host filesystem over HTTP: the root page lists
//! the available filesystem roots, directories render as HTML pages of
//! links, and files are streamed as downloads.
//!
//! It is built from three layers:
//!
//! - [`parser`]: an HTTP/1.x request parser
//! - [`server`]: a tokio HTTP server with subtree routing and streamed responses
//! - [`browser`]: the request-path-to-filesystem router and listing renderer
//!
//! # Examples
//!
//! Serving the default roots on port 1688:
//!
//! ```no_run
//! use dirserver_rs::{Browser, HttpServer, ServerConfig, Volumes};
//!
//! # async fn run() -> Result<(), dirserver_rs::ServerError> {
//! let server = HttpServer::new(ServerConfig::default());
//! Browser::new(Volumes::default()).mount(&server).await;
//! server.start().await
//! # }
//! ```
//!
//! Classifying a request path without a server:
//!
//! ```
//! use dirserver_rs::{Browser, Target};
//!
//! # async fn run() {
//! let browser = Browser::default();
//! assert_eq!(browser.classify("/").await, Target::RootList);
//! # }
//! ```

pub mod browser;
pub mod config;
pub mod parser;
pub mod server;

// Re-export commonly used items for convenience
pub use browser::{Browser, Error as BrowseError, Location, Target, Volumes};
pub use config::Config;
pub use parser::{Error as ParserError, HttpRequest, HttpVersion, Method, parse_request};
pub use server::{Error as ServerError, HttpResponse, HttpServer, ServerConfig, StatusCode};
