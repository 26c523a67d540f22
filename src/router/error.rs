//! Error types for route registration.

use thiserror::Error;

use crate::parser::Method;
use crate::router::params::ParamType;

/// Errors that abort building a route table.
///
/// Registration is all-or-nothing: the first violation stops the build and
/// no table is produced.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// A module prefix or endpoint path failed normalization.
    #[error("The path '{path}' is invalid: {reason}")]
    InvalidPath { path: String, reason: String },

    /// The same (method, path) pair was registered twice.
    #[error("Endpoint {method} {path} is already registered")]
    DuplicateRoute { method: Method, path: String },

    /// Two parameters of one route share a name (ignoring case).
    #[error("Parameter '{name}' is declared twice on {path}")]
    DuplicateParameter { path: String, name: String },

    /// A declared default does not match the parameter's declared type.
    #[error("Default for parameter '{name}' on {path} is not of type {expected}")]
    InvalidDefault { path: String, name: String, expected: ParamType },

    /// More than one CORS policy claims the all-endpoints scope.
    #[error("A CORS policy for all endpoints is already registered")]
    DuplicateDefaultPolicy,

    /// More than one CORS policy targets the same path.
    #[error("A CORS policy for {0} is already registered")]
    DuplicatePolicy(String),
}
