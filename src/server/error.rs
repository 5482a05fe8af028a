//! Error types for the HTTP server.

use thiserror::Error;

use crate::parser::{Error as ParserError, Method};
use crate::server::response::{HttpResponse, StatusCode};

/// Body of every `404` response. The missing path is logged, not echoed.
pub const NOT_FOUND_BODY: &str = "404 page not found";

/// Errors that can occur during HTTP server operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Error parsing an HTTP request.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParserError),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Requested resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Requested resource exists but may not be read.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Method not allowed for the requested resource.
    #[error("Method {0} not allowed for path: {1}")]
    MethodNotAllowed(Method, String),

    /// Internal server error. The message is sent to the client verbatim.
    #[error("{0}")]
    InternalError(String),

    /// The configuration file could not be parsed.
    #[error("Configuration error: {0}")]
    ConfigError(#[from] serde_json::Error),
}

impl Error {
    /// The status code a client sees for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::ParseError(_) => StatusCode::BadRequest,
            Error::NotFound(_) => StatusCode::NotFound,
            Error::Forbidden(_) => StatusCode::Forbidden,
            Error::MethodNotAllowed(_, _) => StatusCode::MethodNotAllowed,
            Error::IoError(_) | Error::InternalError(_) | Error::ConfigError(_) => {
                StatusCode::InternalServerError
            }
        }
    }

    /// Render the error as a plain-text response.
    pub fn to_response(&self) -> HttpResponse {
        let body = match self {
            Error::ParseError(e) => format!("Error parsing request: {e}"),
            Error::NotFound(_) => NOT_FOUND_BODY.to_string(),
            other => other.to_string(),
        };

        HttpResponse::new(self.status())
            .with_content_type("text/plain; charset=utf-8")
            .with_body_string(body)
    }

    /// Whether the error is an ordinary client-side outcome rather than a fault.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status().as_u16())
    }
}
