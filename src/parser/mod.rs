//! HTTP request parser.
//!
//! Parses the request line and header section of an HTTP/1.x request.
//! Request bodies are never consumed: every route served by this crate is
//! a plain `GET`/`HEAD`.

mod request;
mod method;
mod version;
mod error;
mod tests;

// Re-export public items
pub use request::HttpRequest;
pub use method::Method;
pub use version::HttpVersion;
pub use error::Error;

// Re-export the parse_request function
pub use request::parse_request;
