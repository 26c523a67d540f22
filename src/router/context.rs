//! Per-request context handed to hooks and handlers.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::parser::{Method, RequestMessage};

/// Request-scoped view of a [`RequestMessage`].
///
/// Query parameter keys are stored lower-cased and every lookup lower-cases
/// its argument, so lookups ignore case. Cloning is cheap: the message is
/// shared.
#[derive(Debug, Clone)]
pub struct RequestContext {
    params: HashMap<String, String>,
    message: Arc<RequestMessage>,
}

impl RequestContext {
    /// Derive a context from a parsed message.
    pub fn new(message: Arc<RequestMessage>) -> Self {
        Self {
            params: parse_query(&message.query_string),
            message,
        }
    }

    /// Get a raw query parameter value.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Check if a query parameter exists.
    pub fn contains_param(&self, name: &str) -> bool {
        self.params.contains_key(&name.to_lowercase())
    }

    /// All query parameters, keys lower-cased.
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// The raw request body.
    pub fn body(&self) -> &str {
        &self.message.body
    }

    pub fn method(&self) -> Method {
        self.message.method
    }

    /// The base path the request was routed on.
    pub fn path(&self) -> &str {
        &self.message.base_path
    }

    /// The underlying message.
    pub fn message(&self) -> &RequestMessage {
        &self.message
    }
}

impl fmt::Display for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} | {} | {} parameter(s)]",
            self.message.method,
            self.message.target,
            self.params.len()
        )
    }
}

/// Split a query string into lower-cased keys and raw values.
///
/// Pieces without `=` become keys with an empty value; a repeated key keeps
/// its last value.
fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter(|piece| !piece.is_empty())
        .map(|piece| match piece.split_once('=') {
            Some((k, v)) => (k.to_lowercase(), v.to_string()),
            None => (piece.to_lowercase(), String::new()),
        })
        .collect()
}
