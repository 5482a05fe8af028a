//! HTTP server implementation.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{RwLock, Semaphore, mpsc};
use tokio::task::JoinSet;
use tokio::signal;
use log::{debug, info, warn, error};

use crate::parser::{Error as ParserError, HttpRequest, Method, parse_request};
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::handler::{HandlerFuture, Route, matching_routes};
use crate::server::response::{HttpResponse, StatusCode};

/// Largest request head accepted before answering `400 Bad Request`.
pub const MAX_HEAD_SIZE: usize = 64 * 1024;

/// Whether `buf` holds a blank line ending the header section.
fn head_complete(buf: &[u8]) -> bool {
    buf.windows(4).any(|w| w == b"\r\n\r\n") || buf.windows(2).any(|w| w == b"\n\n")
}

/// An HTTP server.
pub struct HttpServer {
    /// The server configuration.
    pub config: ServerConfig,
    /// The routes.
    pub routes: Arc<RwLock<Vec<Route>>>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            routes: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Add a route to the server.
    ///
    /// See [`Route`] for how `pattern` is matched against request paths.
    pub async fn add_route<F, Fut>(&self, pattern: impl Into<String>, methods: Vec<Method>, handler: F)
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        let handler = Arc::new(move |req: HttpRequest| -> HandlerFuture { Box::pin(handler(req)) });

        let route = Route {
            pattern: pattern.into(),
            methods,
            handler,
        };

        self.routes.write().await.push(route);
    }

    /// Display the server banner and registered endpoints.
    async fn display_server_info(&self) {
        let banner = include_str!("../banner.txt");
        info!("\n{banner}");

        let routes = self.routes.read().await;
        info!("Registered endpoints:");
        for route in routes.iter() {
            let methods = route.methods.iter()
                .map(|m| m.as_str())
                .collect::<Vec<&str>>()
                .join(", ");
            info!("  {methods} {}", route.pattern);
        }
    }

    /// Set up the TCP listener.
    async fn setup_listener(&self) -> Result<TcpListener, Error> {
        let listener = TcpListener::bind(&self.config.addr).await?;
        info!("Server listening on http://{addr}", addr = self.config.addr);
        Ok(listener)
    }

    /// Set up a Ctrl+C handler for graceful shutdown.
    fn setup_ctrl_c_handler(shutdown_tx: mpsc::Sender<()>, tasks: &mut JoinSet<()>) {
        tasks.spawn(async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received Ctrl+C, initiating graceful shutdown");
                    let _ = shutdown_tx.send(()).await;
                }
                Err(e) => {
                    error!("Error setting up Ctrl+C handler: {e}");
                }
            }
        });
    }

    /// Handle a new connection.
    async fn handle_new_connection(
        mut socket: TcpStream,
        addr: SocketAddr,
        semaphore: Arc<Semaphore>,
        routes: Arc<RwLock<Vec<Route>>>,
        read_buffer_size: usize,
        tasks: &mut JoinSet<()>,
    ) {
        let permit = match semaphore.try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                warn!("Connection limit reached, rejecting connection from {addr}");
                let response = HttpResponse::new(StatusCode::ServiceUnavailable)
                    .with_content_type("text/plain")
                    .with_body_string("Server is at capacity, please try again later");
                let _ = response.write_to(&mut socket, true).await;
                return;
            }
        };

        tasks.spawn(async move {
            // The permit is dropped when the task completes, releasing the semaphore slot
            let _permit = permit;

            // A failed connection only ever affects its own client.
            match Self::handle_connection(&mut socket, routes, read_buffer_size).await {
                Ok(()) => {}
                Err(e) if e.is_client_error() => debug!("{addr}: {e}"),
                Err(e) => error!("Error handling connection from {addr}: {e}"),
            }
        });
    }

    /// Handle connection errors.
    async fn handle_connection_error(e: std::io::Error) -> bool {
        error!("Error accepting connection: {e}");

        if e.kind() == std::io::ErrorKind::BrokenPipe {
            error!("Critical error accepting connection, shutting down");
            return true;
        }

        // Usually descriptor exhaustion; back off before accepting again
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
        false
    }

    /// Perform graceful shutdown.
    async fn perform_shutdown(tasks: &mut JoinSet<()>) {
        info!("Waiting for {len} active connections to complete...", len = tasks.len());
        let shutdown_timeout = tokio::time::Duration::from_secs(30);
        let drained = tokio::time::timeout(shutdown_timeout, async {
            while let Some(res) = tasks.join_next().await {
                if let Err(e) = res {
                    error!("Task failed during shutdown: {e}");
                }
            }
        }).await;

        if drained.is_err() {
            warn!("Shutdown timeout elapsed, aborting {len} connections", len = tasks.len());
            tasks.abort_all();
        }

        info!("Server shutdown complete");
    }

    /// Start the server and listen for incoming connections.
    ///
    /// Returns an error only if the listening socket cannot be bound.
    pub async fn start(&self) -> Result<(), Error> {
        self.display_server_info().await;

        let listener = self.setup_listener().await?;

        let semaphore = Arc::new(Semaphore::new(self.config.max_connections));
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        // Use JoinSet to keep track of all spawned tasks
        let mut tasks = JoinSet::new();

        // The loop keeps its own sender so the channel never closes on its own
        Self::setup_ctrl_c_handler(shutdown_tx.clone(), &mut tasks);

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("Shutting down server...");
                    break;
                }

                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((socket, addr)) => {
                            Self::handle_new_connection(
                                socket,
                                addr,
                                semaphore.clone(),
                                self.routes.clone(),
                                self.config.read_buffer_size,
                                &mut tasks
                            ).await;
                        },
                        Err(e) => {
                            if Self::handle_connection_error(e).await {
                                break;
                            }
                        }
                    }
                }
            }

            // Reap finished connections so the set does not grow unbounded
            while tasks.try_join_next().is_some() {}
        }

        Self::perform_shutdown(&mut tasks).await;

        Ok(())
    }

    /// Read from `socket` in `chunk_size` pieces until the header section is
    /// complete, the peer stops sending, or more than [`MAX_HEAD_SIZE`] bytes
    /// have arrived.
    async fn read_head(
        socket: &mut (impl AsyncRead + Unpin),
        chunk_size: usize,
    ) -> Result<Vec<u8>, Error> {
        let mut head = Vec::new();
        let mut chunk = vec![0; chunk_size.max(1)];

        loop {
            let n = socket.read(&mut chunk).await?;
            if n == 0 {
                break;
            }
            head.extend_from_slice(&chunk[..n]);

            if head_complete(&head) || head.len() > MAX_HEAD_SIZE {
                break;
            }
        }

        Ok(head)
    }

    /// Handle a single connection: read one request, answer it, and return.
    ///
    /// Every outcome, including failures, is answered with a response before
    /// the error (if any) is returned to the caller for logging.
    pub async fn handle_connection(
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
        routes: Arc<RwLock<Vec<Route>>>,
        read_buffer_size: usize,
    ) -> Result<(), Error> {
        let head = Self::read_head(socket, read_buffer_size).await?;
        if head.is_empty() {
            return Ok(()); // Connection closed
        }

        let within_limit = &head[..head.len().min(MAX_HEAD_SIZE)];
        let parsed = if !head_complete(within_limit) && head.len() > MAX_HEAD_SIZE {
            Err(ParserError::HeadTooLarge(MAX_HEAD_SIZE))
        } else {
            parse_request(&head)
        };

        let request = match parsed {
            Ok(req) => req,
            Err(e) => {
                let e = Error::ParseError(e);
                e.to_response().write_to(socket, true).await?;
                return Err(e);
            }
        };

        let include_body = request.method.expects_body();
        let method = request.method;
        let path = request.path.clone();

        let routes_guard = routes.read().await;
        let candidates = matching_routes(&routes_guard, &request.path);

        if candidates.is_empty() {
            info!("{method} {path} -> 404 (no route)");
            let e = Error::NotFound(path);
            e.to_response().write_to(socket, include_body).await?;
            return Err(e);
        }

        let Some(route) = candidates.iter().find(|route| route.allows(method)) else {
            let allowed_methods: Vec<&str> = candidates
                .iter()
                .flat_map(|route| route.methods.iter().map(|m| m.as_str()))
                .collect();

            let e = Error::MethodNotAllowed(method, path);
            e.to_response()
                .with_header("Allow", allowed_methods.join(", "))
                .write_to(socket, include_body)
                .await?;
            return Err(e);
        };

        let handler = route.handler.clone();
        drop(routes_guard);

        let response = match handler(request).await {
            Ok(resp) => resp,
            Err(e) => {
                // The client only sees a generic body; the detail stays here
                info!("{method} {path} -> {status}: {e}", status = e.status().as_u16());
                e.to_response().write_to(socket, include_body).await?;
                return Err(e);
            }
        };

        info!("{method} {path} -> {status}", status = response.status.as_u16());
        response.write_to(socket, include_body).await
    }
}
