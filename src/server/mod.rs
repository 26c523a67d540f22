//! HTTP server implementation for microrest-rs.
//!
//! This module owns the transport: it accepts connections, reads one
//! bounded request from each, hands it to a [`Dispatcher`](crate::router::Dispatcher)
//! and writes the serialized response back before closing.

mod response;
mod config;
mod error;
mod http_server;
mod reader;

// Re-export public items
pub use response::{HttpResponse, StatusCode};
pub use config::{ServerConfig, ServerSettings};
pub use error::Error;
pub use http_server::HttpServer;
pub use reader::read_request;
