//! HTTP server implementation.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::{JoinError, JoinSet};
use tokio::signal;
use tokio::time::timeout;
use log::{info, warn, error};

use crate::parser::{parse_request, Error as ParserError};
use crate::router::{Dispatcher, RouterEvent};
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::reader::read_request;
use crate::server::response::{HttpResponse, StatusCode};

/// An HTTP server answering one request per connection.
pub struct HttpServer {
    /// The server configuration.
    pub config: ServerConfig,
    /// The dispatcher shared by every connection.
    pub dispatcher: Arc<Dispatcher>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig, dispatcher: Dispatcher) -> Self {
        Self {
            config,
            dispatcher: Arc::new(dispatcher),
        }
    }

    /// Log the registered endpoints and CORS setup.
    fn display_server_info(&self) {
        let table = self.dispatcher.table();
        info!("Registered endpoints:");
        for route in table.routes() {
            info!("  {} {}", route.method, route.path);
        }

        let default_policy = table.cors().default_policy().header_values();
        info!("{} CORS policies registered", table.cors().len());
        info!("  * => Origins : {}", default_policy.allow_origin);
        info!("  * => Methods : {}", default_policy.allow_methods);
        info!("  * => Headers : {}", default_policy.allow_headers);
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
        mut socket: tokio::net::TcpStream,
        addr: SocketAddr,
        semaphore: Arc<Semaphore>,
        dispatcher: Arc<Dispatcher>,
        config: Arc<ServerConfig>,
        tasks: &mut JoinSet<()>,
    ) {
        // Try to acquire a permit from the semaphore
        let permit = match semaphore.try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                warn!("Connection limit reached, rejecting connection from {addr}");
                let response = HttpResponse::new(StatusCode::ServiceUnavailable)
                    .with_body_string("Server is at capacity, please try again later");
                let _ = socket.write_all(&response.to_bytes()).await;
                return;
            }
        };

        tasks.spawn(async move {
            // The permit is dropped when the task completes, releasing the semaphore slot
            let _permit = permit;

            if let Err(e) = Self::handle_connection(&mut socket, dispatcher, &config).await {
                warn!("Error handling connection from {addr}: {e}");
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

        // For other errors, wait a bit before retrying
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
        false
    }

    /// Drop the entries of connection tasks that have already finished,
    /// returning how many were reaped.
    pub(crate) fn reap_finished(tasks: &mut JoinSet<()>) -> usize {
        let mut reaped = 0;
        while let Some(res) = tasks.try_join_next() {
            Self::log_task_outcome(res);
            reaped += 1;
        }
        reaped
    }

    fn log_task_outcome(res: Result<(), JoinError>) {
        if let Err(e) = res {
            error!("Connection task failed: {e}");
        }
    }

    /// Perform graceful shutdown.
    async fn perform_shutdown(tasks: &mut JoinSet<()>) {
        info!("Waiting for {len} active connections to complete...", len = tasks.len());
        let shutdown_timeout = tokio::time::Duration::from_secs(30);
        let _ = tokio::time::timeout(shutdown_timeout, async {
            while let Some(res) = tasks.join_next().await {
                if let Err(e) = res {
                    error!("Task failed during shutdown: {e}");
                }
            }
        }).await;

        info!("Server shutdown complete");
    }

    /// Start the server and listen for incoming connections.
    pub async fn start(&self) -> Result<(), Error> {
        self.display_server_info();

        let listener = self.setup_listener().await?;

        // Create a semaphore to limit concurrent connections
        let semaphore = Arc::new(Semaphore::new(self.config.max_connections));
        let config = Arc::new(self.config.clone());

        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        // Use JoinSet to keep track of all spawned tasks
        let mut tasks = JoinSet::new();

        Self::setup_ctrl_c_handler(shutdown_tx, &mut tasks);

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("Shutting down server...");
                    break;
                }

                Some(res) = tasks.join_next() => {
                    Self::log_task_outcome(res);
                }

                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((socket, addr)) => {
                            Self::reap_finished(&mut tasks);
                            Self::handle_new_connection(
                                socket,
                                addr,
                                semaphore.clone(),
                                self.dispatcher.clone(),
                                config.clone(),
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
        }

        Self::perform_shutdown(&mut tasks).await;

        Ok(())
    }

    /// Handle a single connection: read, parse, dispatch, reply.
    ///
    /// Hook and handler failures, panics included, are contained here and
    /// answered with a 500 that carries no internal detail. Only transport
    /// and request-framing problems are returned as errors.
    pub async fn handle_connection(
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
        dispatcher: Arc<Dispatcher>,
        config: &ServerConfig,
    ) -> Result<(), Error> {
        let raw = match timeout(config.request_timeout, read_request(socket, config)).await {
            Err(_) => {
                warn!("Timed out reading request after {:?}", config.request_timeout);
                let response = HttpResponse::new(StatusCode::RequestTimeout)
                    .with_body_string("Timed out reading the request");
                socket.write_all(&response.to_bytes()).await?;
                return Ok(());
            }
            Ok(Err(Error::ParseError(e))) => {
                Self::refuse_unreadable(socket, &e).await?;
                return Err(Error::ParseError(e));
            }
            Ok(result) => result?,
        };

        if raw.is_empty() {
            return Ok(()); // Connection closed
        }

        let request = match parse_request(&raw) {
            Ok(req) => req,
            Err(e) => {
                Self::refuse_unreadable(socket, &e).await?;
                return Err(Error::ParseError(e));
            }
        };

        let path = request.base_path.clone();
        let task_dispatcher = Arc::clone(&dispatcher);
        let mut dispatched = tokio::spawn(async move { task_dispatcher.dispatch(request).await });

        let failure = match timeout(config.request_timeout, &mut dispatched).await {
            Ok(Ok(Ok(response))) => {
                socket.write_all(&response.to_bytes()).await?;
                return Ok(());
            }
            Ok(Ok(Err(e))) => e.to_string(),
            Ok(Err(join_error)) if join_error.is_panic() => "handler panicked".to_string(),
            Ok(Err(join_error)) => join_error.to_string(),
            Err(_) => {
                dispatched.abort();
                warn!("Timed out dispatching {path} after {:?}", config.request_timeout);
                let response = HttpResponse::new(StatusCode::ServiceUnavailable)
                    .with_body_string("The request could not be completed in time");
                socket.write_all(&response.to_bytes()).await?;
                return Ok(());
            }
        };

        dispatcher.table().observer().on_event(&RouterEvent::InternalError {
            path: &path,
            message: &failure,
        });
        let response = HttpResponse::new(StatusCode::InternalServerError)
            .with_body_string("An error occurred while processing your request.");
        socket.write_all(&response.to_bytes()).await?;

        Ok(())
    }

    /// Answer a request that could not be read or parsed.
    async fn refuse_unreadable(
        socket: &mut (impl AsyncWrite + Unpin),
        e: &ParserError,
    ) -> Result<(), Error> {
        let status = match e {
            ParserError::BodyTooLarge { .. } => StatusCode::PayloadTooLarge,
            _ => StatusCode::BadRequest,
        };
        let response = HttpResponse::new(status)
            .with_body_string(format!("Error parsing request: {e}"));
        socket.write_all(&response.to_bytes()).await?;
        Ok(())
    }
}
