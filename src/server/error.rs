//! Error types for the HTTP server.

use thiserror::Error;

use crate::parser::Error as ParserError;
use crate::router::RegistrationError;

/// Errors that can occur during HTTP server operation.
///
/// Handlers and hooks return this type as well; any error they produce
/// reaches the client as a bare 500.
#[derive(Debug, Error)]
pub enum Error {
    /// Error reading or parsing an HTTP request.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParserError),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Internal server error.
    #[error("Internal server error: {0}")]
    InternalError(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The settings could not be loaded or resolved.
    #[error("Invalid settings: {0}")]
    Settings(String),

    /// Route registration failed.
    #[error("Registration error: {0}")]
    Registration(#[from] RegistrationError),
}
