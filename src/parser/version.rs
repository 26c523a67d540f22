//! Request-line protocol tokens.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Protocol version named on a request line.
///
/// Responses are always framed as HTTP/1.1 with `Connection: close`, whatever
/// the client announced, so an unrecognised token is kept verbatim in
/// [`HttpVersion::Other`] instead of failing the parse.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HttpVersion {
    Http10,
    #[default]
    Http11,
    Http20,
    Other(String),
}

// Recognised tokens, compared case-insensitively
const TOKENS: [(&str, HttpVersion); 4] = [
    ("HTTP/1.0", HttpVersion::Http10),
    ("HTTP/1.1", HttpVersion::Http11),
    ("HTTP/2", HttpVersion::Http20),
    ("HTTP/2.0", HttpVersion::Http20),
];

impl HttpVersion {
    pub fn from_token(token: &str) -> Self {
        TOKENS
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(token))
            .map(|(_, version)| version.clone())
            .unwrap_or_else(|| HttpVersion::Other(token.to_string()))
    }

    /// Canonical request-line token, or the token as received.
    pub fn as_str(&self) -> &str {
        match self {
            HttpVersion::Http10 => "HTTP/1.0",
            HttpVersion::Http11 => "HTTP/1.1",
            HttpVersion::Http20 => "HTTP/2",
            HttpVersion::Other(token) => token,
        }
    }
}

impl FromStr for HttpVersion {
    type Err = Infallible;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_token(token))
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
