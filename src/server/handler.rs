//! HTTP request handlers and routing.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::parser::{HttpRequest, Method};
use crate::server::{HttpResponse, Error};

/// Type alias for a boxed future that returns a Result<HttpResponse, Error>.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<HttpResponse, Error>> + Send>>;

/// Type alias for a handler function that takes an HttpRequest and returns a HandlerFuture.
pub type HandlerFn = Arc<dyn Fn(HttpRequest) -> HandlerFuture + Send + Sync>;

/// Represents a route in the HTTP server.
///
/// A pattern ending in `/` matches its whole subtree (`/` matches every
/// path); any other pattern matches one path exactly.
pub struct Route {
    /// The path pattern to match.
    pub pattern: String,
    /// The HTTP methods to match.
    pub methods: Vec<Method>,
    /// The handler function.
    pub handler: HandlerFn,
}

impl Route {
    /// Whether this route's pattern covers `path`.
    pub fn matches(&self, path: &str) -> bool {
        if self.pattern.ends_with('/') {
            path.starts_with(&self.pattern)
        } else {
            path == self.pattern
        }
    }

    /// Whether this route accepts `method`.
    pub fn allows(&self, method: Method) -> bool {
        self.methods.contains(&method)
    }
}

/// Routes registered under the longest pattern that matches `path`.
///
/// Several routes may share a pattern with different methods; all of them
/// are returned so the caller can pick by method or report what is allowed.
pub fn matching_routes<'a>(routes: &'a [Route], path: &str) -> Vec<&'a Route> {
    let Some(longest) = routes
        .iter()
        .filter(|route| route.matches(path))
        .map(|route| route.pattern.len())
        .max()
    else {
        return Vec::new();
    };

    routes
        .iter()
        .filter(|route| route.pattern.len() == longest && route.matches(path))
        .collect()
}
