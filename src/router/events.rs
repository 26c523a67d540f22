//! Structured router events and the observer that receives them.

use log::{debug, error, info};

use crate::parser::Method;
use crate::router::params::ParamType;

/// Something the router did, reported as data.
#[derive(Debug, Clone, PartialEq)]
pub enum RouterEvent<'a> {
    /// A route was added to the table.
    RouteRegistered { method: Method, path: &'a str, params: usize, is_async: bool },
    /// A request matched a route.
    EndpointMatched { method: Method, path: &'a str },
    /// No route has the requested path.
    NotFound { method: Method, path: &'a str },
    /// The path exists but not for the requested method.
    BadMethod { path: &'a str, expected: Method, got: Method },
    /// A required parameter was missing.
    BadParameters { path: &'a str, declared: usize, required: usize },
    /// A parameter value did not convert to its declared type.
    BadParameterType { path: &'a str, name: &'a str, expected: ParamType },
    /// A hook or handler failed.
    InternalError { path: &'a str, message: &'a str },
}

/// Receives every [`RouterEvent`].
///
/// Implementations are shared across connections and must not block.
pub trait RouterObserver: Send + Sync {
    fn on_event(&self, event: &RouterEvent<'_>);
}

/// Forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl RouterObserver for LogObserver {
    fn on_event(&self, event: &RouterEvent<'_>) {
        match event {
            RouterEvent::RouteRegistered { method, path, params, is_async } => {
                let kind = if *is_async { "async" } else { "sync" };
                info!("Registered endpoint {method} {path} ({params} parameter(s), {kind})");
            }
            RouterEvent::EndpointMatched { method, path } => debug!("[200] {method} {path}"),
            RouterEvent::NotFound { method, path } => debug!("[404] {method} {path}"),
            RouterEvent::BadMethod { path, expected, got } => {
                debug!("[405] {path} (expected {expected}, got {got})");
            }
            RouterEvent::BadParameters { path, declared, required } => {
                debug!("[400] {path} (expected {declared} parameter(s), {required} required)");
            }
            RouterEvent::BadParameterType { path, name, expected } => {
                debug!("[400] {path} (parameter <{name}> is not of type {expected})");
            }
            RouterEvent::InternalError { path, message } => {
                error!("[500] {path}: {message}");
            }
        }
    }
}
