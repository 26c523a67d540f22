//! HTTP parser module.
//!
//! This module turns the raw bytes of one connection read into a
//! [`RequestMessage`].

mod request;
mod method;
mod version;
mod error;
mod tests;

// Re-export public items
pub use request::{Header, RequestMessage};
pub use method::Method;
pub use version::HttpVersion;
pub use error::Error;

// Re-export the parse_request function
pub use request::parse_request;

pub(crate) use request::{declared_content_length, find_header_end};
