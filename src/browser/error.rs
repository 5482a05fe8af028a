//! Error types for the file browser.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::server::Error as ServerError;

/// Errors raised while resolving or serving a browser request.
#[derive(Debug, Error)]
pub enum Error {
    /// The request path does not name anything on the filesystem.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A directory could not be read.
    #[error("Error: {source}")]
    List { path: PathBuf, source: io::Error },

    /// A file could not be opened for download.
    #[error("Error: {source}")]
    Open { path: PathBuf, source: io::Error },
}

impl From<Error> for ServerError {
    fn from(e: Error) -> Self {
        match e {
            Error::NotFound(path) => ServerError::NotFound(path),
            Error::List { .. } => ServerError::InternalError(e.to_string()),
            Error::Open { ref path, ref source } => match source.kind() {
                io::ErrorKind::NotFound => ServerError::NotFound(path.display().to_string()),
                io::ErrorKind::PermissionDenied => ServerError::Forbidden(path.display().to_string()),
                _ => ServerError::InternalError(e.to_string()),
            },
        }
    }
}
