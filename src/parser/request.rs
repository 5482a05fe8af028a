//! HTTP request parsing and representation.

use std::collections::HashMap;
use std::str::FromStr;

use crate::parser::error::Error;
use crate::parser::method::Method;
use crate::parser::version::HttpVersion;

/// Represents an HTTP request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// The HTTP method (GET, HEAD, etc.)
    pub method: Method,
    /// The request target exactly as it appeared on the request line
    pub target: String,
    /// The percent-decoded path, without the query string
    pub path: String,
    /// The raw query string, if the target had one
    pub query: Option<String>,
    /// The HTTP version
    pub version: HttpVersion,
    /// The HTTP headers
    pub headers: HashMap<String, String>,
}

impl HttpRequest {
    /// Create a new HTTP request from a raw request target.
    ///
    /// The target is split into path and query, and the path is percent-decoded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the target is not in origin form
    /// (does not start with `/`) or if the decoded path is not valid UTF-8.
    pub fn new(
        method: Method,
        target: impl Into<String>,
        version: HttpVersion,
        headers: HashMap<String, String>,
    ) -> Result<Self, Error> {
        let target = target.into();
        if !target.starts_with('/') {
            return Err(Error::InvalidPath(target));
        }

        let (raw_path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (target.as_str(), None),
        };

        let path = urlencoding::decode(raw_path)
            .map_err(|_| Error::InvalidPath(target.clone()))?
            .into_owned();

        Ok(Self {
            method,
            path,
            query,
            target,
            version,
            headers,
        })
    }

    /// Get a header value.
    ///
    /// Header names are matched case-insensitively.
    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                Some(v)
            } else {
                None
            }
        })
    }

    /// Check if a header exists.
    pub fn has_header(&self, name: &str) -> bool {
        self.get_header(name).is_some()
    }
}

/// Locate the end of the header section, so a request body (if any) never
/// has to be valid UTF-8.
fn head_of(input: &[u8]) -> &[u8] {
    input
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .map(|pos| &input[..pos])
        .unwrap_or(input)
}

/// Parse an HTTP request from a byte slice.
///
/// # Arguments
///
/// * `input` - A byte slice containing the HTTP request to parse
///
/// # Returns
///
/// The parsed HTTP request, or an error if the request is invalid
pub fn parse_request(input: &[u8]) -> Result<HttpRequest, Error> {
    let head = match std::str::from_utf8(head_of(input)) {
        Ok(s) => s,
        Err(_) => return Err(Error::MalformedRequestLine("Invalid UTF-8".to_string())),
    };

    let mut lines = head.lines();

    // Parse the request line
    let request_line = match lines.next() {
        Some(line) if !line.trim().is_empty() => line,
        _ => return Err(Error::EmptyRequest),
    };

    // Split the request line into method, target, and version
    let parts: Vec<&str> = request_line.split_whitespace().collect();
    let [method, target, version] = parts.as_slice() else {
        return Err(Error::MalformedRequestLine(request_line.to_string()));
    };

    let method = Method::from_str(method)?;
    let version = HttpVersion::from_str(version)?;

    // Parse the headers
    let mut headers = HashMap::new();
    for line in lines {
        // Empty line indicates the end of headers
        if line.is_empty() {
            break;
        }

        let Some((name, value)) = line.split_once(':') else {
            return Err(Error::InvalidHeaderFormat(line.to_string()));
        };

        headers.insert(name.trim().to_string(), value.trim().to_string());
    }

    // Check for required headers
    if version.requires_host() && !headers.keys().any(|k| k.eq_ignore_ascii_case("Host")) {
        return Err(Error::MissingHeader("Host".to_string()));
    }

    HttpRequest::new(method, *target, version, headers)
}
