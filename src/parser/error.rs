//! Error types for the HTTP parser.

use thiserror::Error;

/// Errors that can occur while reading or parsing an HTTP request.
///
/// An unrecognised method is not an error: it parses to
/// [`Method::UNKNOWN`](crate::parser::Method::UNKNOWN).
#[derive(Debug, Error)]
pub enum Error {
    /// The request is empty.
    #[error("Empty request")]
    EmptyRequest,

    /// The request line is malformed (fewer than three tokens, bad encoding, ...).
    #[error("Malformed request line: {0}")]
    MalformedRequestLine(String),

    /// The header block did not end within the configured limit.
    #[error("Header section exceeds {0} bytes")]
    HeadersTooLarge(usize),

    /// The declared body is larger than the configured limit.
    #[error("Body of {length} bytes exceeds the {limit} byte limit")]
    BodyTooLarge { length: usize, limit: usize },

    /// The Content-Length header is not a valid length.
    #[error("Invalid Content-Length: {0}")]
    InvalidContentLength(String),

    /// The peer closed the connection before the declared body arrived.
    #[error("Connection closed after {received} of {expected} body bytes")]
    IncompleteBody { expected: usize, received: usize },
}
