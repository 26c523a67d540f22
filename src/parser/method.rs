//! HTTP request methods.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer};

/// HTTP request methods recognised by the router.
///
/// Tokens are matched case-insensitively. Anything else maps to
/// [`Method::UNKNOWN`] rather than failing the parse, so an unsupported
/// method still reaches the dispatcher and is answered with a 404 or 405.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET method: Requests a representation of the specified resource.
    GET,
    /// POST method: Submits data to be processed to the identified resource.
    POST,
    /// PUT method: Replaces all current representations of the target resource with the request payload.
    PUT,
    /// DELETE method: Deletes the specified resource.
    DELETE,
    /// HEAD method: Same as GET but only transfers the status line and header section.
    HEAD,
    /// OPTIONS method: Describes the communication options for the target resource.
    OPTIONS,
    /// PATCH method: Applies partial modifications to a resource.
    PATCH,
    /// CONNECT method: Establishes a tunnel to the server identified by the target resource.
    CONNECT,
    /// TRACE method: Performs a message loop-back test along the path to the target resource.
    TRACE,
    /// Sentinel for any token outside the known set.
    UNKNOWN,
}

impl Method {
    /// Every method a route can be registered for.
    pub const KNOWN: [Method; 9] = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::HEAD,
        Method::OPTIONS,
        Method::PATCH,
        Method::CONNECT,
        Method::TRACE,
    ];

    /// Match a request-line token against the known methods, ignoring case.
    pub fn from_token(token: &str) -> Self {
        Self::KNOWN
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(token))
            .unwrap_or(Method::UNKNOWN)
    }

    /// The canonical upper-case token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
            Method::CONNECT => "CONNECT",
            Method::TRACE => "TRACE",
            Method::UNKNOWN => "UNKNOWN",
        }
    }
}

impl FromStr for Method {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Method::from_token(s))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Settings files name methods as strings; the sentinel is not a valid choice there.
impl<'de> Deserialize<'de> for Method {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        match Method::from_token(&token) {
            Method::UNKNOWN => Err(de::Error::custom(format!("unknown HTTP method: {token}"))),
            method => Ok(method),
        }
    }
}
