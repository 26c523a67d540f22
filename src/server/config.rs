//! Server configuration and the settings file it is loaded from.

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::router::CorsPolicy;
use crate::server::error::Error;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The address to bind to.
    pub addr: SocketAddr,
    /// The maximum number of concurrent connections.
    pub max_connections: usize,
    /// The size of each socket read.
    pub read_buffer_size: usize,
    /// The largest accepted request line plus header block.
    pub max_header_size: usize,
    /// The largest accepted Content-Length.
    pub max_body_size: usize,
    /// Budget for reading a request, and again for dispatching it.
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            max_connections: 1024,
            read_buffer_size: 8192,
            max_header_size: 8 * 1024,
            max_body_size: 1024 * 1024,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ServerConfig {
    /// Resolve the settings' host and port, keeping every other default.
    pub fn from_settings(settings: &ServerSettings) -> Result<Self, Error> {
        let addr = (settings.host.as_str(), settings.port)
            .to_socket_addrs()
            .map_err(|e| Error::Settings(format!("cannot resolve {}: {e}", settings.host)))?
            .next()
            .ok_or_else(|| Error::Settings(format!("no address for {}", settings.host)))?;

        Ok(Self {
            addr,
            ..Self::default()
        })
    }
}

/// Settings read once before the accept loop starts.
///
/// ```json
/// {
///     "host": "127.0.0.1",
///     "port": 8080,
///     "cors_policies": [
///         { "origins": ["https://example.com"] },
///         { "endpoint": "/users/profile", "methods": ["GET"] }
///     ]
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub cors_policies: Vec<CorsPolicy>,
}

impl ServerSettings {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            cors_policies: Vec::new(),
        }
    }

    /// Parse settings from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
