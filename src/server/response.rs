//! HTTP response types and utilities.

use std::collections::BTreeMap;

use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::server::error::Error;

/// HTTP status codes with their standard reason phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok = 200,
    BadRequest = 400,
    Forbidden = 403,
    NotFound = 404,
    MethodNotAllowed = 405,
    InternalServerError = 500,
    ServiceUnavailable = 503,
}

impl StatusCode {
    /// Get the reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::ServiceUnavailable => "Service Unavailable",
        }
    }

    /// The numeric status code.
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }
}

/// The payload of a response.
#[derive(Debug, Default)]
pub enum Body {
    /// No payload.
    #[default]
    Empty,
    /// An in-memory payload.
    Bytes(Vec<u8>),
    /// An open file, copied to the socket when the response is written.
    File(File),
}

/// Represents an HTTP response.
///
/// Headers are kept ordered by name, so serializing the same response
/// twice yields the same bytes.
#[derive(Debug)]
pub struct HttpResponse {
    /// The HTTP status code
    pub status: StatusCode,
    /// The HTTP headers
    pub headers: BTreeMap<String, String>,
    /// The response body
    pub body: Body,
}

impl HttpResponse {
    /// Create a new HTTP response with the given status code.
    pub fn new(status: StatusCode) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Server".to_string(), "dirserver-rs".to_string());
        headers.insert("Connection".to_string(), "close".to_string());
        headers.insert("Content-Length".to_string(), "0".to_string());

        Self {
            status,
            headers,
            body: Body::Empty,
        }
    }

    /// Set the response body with a string.
    pub fn with_body_string(self, body: impl Into<String>) -> Self {
        self.with_body_bytes(body.into().into_bytes())
    }

    /// Set the response body with bytes.
    pub fn with_body_bytes(mut self, body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        let content_length = body.len().to_string();
        self.body = Body::Bytes(body);
        self.with_header("Content-Length", content_length)
    }

    /// Stream an open file of `len` bytes as the response body.
    pub fn with_body_file(mut self, file: File, len: u64) -> Self {
        self.body = Body::File(file);
        self.with_header("Content-Length", len.to_string())
    }

    /// Add or replace a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the content type.
    pub fn with_content_type(self, content_type: impl Into<String>) -> Self {
        self.with_header("Content-Type", content_type)
    }

    /// Get a header value by its exact name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Serialize the status line and headers, including the blank separator line.
    pub fn head_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();

        let status_line = format!("HTTP/1.1 {} {}\r\n", self.status.as_u16(), self.status.reason_phrase());
        bytes.extend_from_slice(status_line.as_bytes());

        for (name, value) in &self.headers {
            let header_line = format!("{name}: {value}\r\n");
            bytes.extend_from_slice(header_line.as_bytes());
        }

        bytes.extend_from_slice(b"\r\n");
        bytes
    }

    /// Convert an in-memory response to bytes.
    ///
    /// File bodies are not read here; only their head is returned.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.head_bytes();
        if let Body::Bytes(body) = &self.body {
            bytes.extend_from_slice(body);
        }
        bytes
    }

    /// Write the response to `socket`, streaming file bodies.
    ///
    /// When `include_body` is false (a `HEAD` request) only the head is sent.
    pub async fn write_to<W>(self, socket: &mut W, include_body: bool) -> Result<(), Error>
    where
        W: AsyncWrite + Unpin,
    {
        socket.write_all(&self.head_bytes()).await?;

        if include_body {
            match self.body {
                Body::Empty => {}
                Body::Bytes(body) => socket.write_all(&body).await?,
                Body::File(mut file) => {
                    tokio::io::copy(&mut file, socket).await?;
                }
            }
        }

        socket.flush().await?;
        Ok(())
    }
}
