//! A minimal REST request router over raw sockets.
//!
//! This library accepts HTTP/1.x connections, parses each request, routes it to a
//! handler registered under a module prefix, binds typed query parameters and answers
//! with a serialized response carrying CORS headers.
//!
//! # Features
//!
//! - Parse HTTP requests from byte slices, with percent-decoded targets
//! - Modules of endpoints registered once into an immutable route table
//! - Typed query parameters with optional defaults
//! - Per-path CORS policies with an all-endpoints fallback
//! - Synchronous and asynchronous handlers, plus per-module hooks
//! - A tokio server with connection limits, read bounds and timeouts
//!
//! # Examples
//!
//! ## Parsing a request
//!
//! ```
//! use microrest_rs::{parse_request, Method};
//!
//! let request_bytes = b"GET /users/profile?id=7 HTTP/1.1\r\nHost: example.com\r\n\r\n";
//!
//! match parse_request(request_bytes) {
//!     Ok(request) => {
//!         assert_eq!(request.method, Method::GET);
//!         assert_eq!(request.base_path, "/users/profile");
//!         assert_eq!(request.query_string, "id=7");
//!     },
//!     Err(err) => {
//!         println!("Error parsing request: {}", err);
//!     }
//! }
//! ```
//!
//! ## Error handling
//!
//! ```
//! use microrest_rs::{parse_request, ParserError};
//!
//! let invalid_request = b"GET\r\n\r\n";
//!
//! match parse_request(invalid_request) {
//!     Ok(_) => println!("Request parsed successfully"),
//!     Err(ParserError::MalformedRequestLine(line)) => println!("Malformed request line: {}", line),
//!     Err(err) => println!("Other error: {}", err),
//! }
//! ```
//!
//! ## Dispatching
//!
//! ```
//! use std::sync::Arc;
//! use microrest_rs::{parse_request, HttpResponse, Method, StatusCode};
//! use microrest_rs::router::{CorsPolicy, Dispatcher, Endpoint, Module, RouteTable};
//!
//! # tokio_test_block(async {
//! let ping = Module::new("ping").endpoint(Endpoint::new(Method::GET, "now", |_, _| {
//!     HttpResponse::new(StatusCode::Ok).with_json("pong")
//! }));
//!
//! let table = RouteTable::builder()
//!     .module(ping)
//!     .unwrap()
//!     .cors_policy(CorsPolicy::all_endpoints().allow_origin("https://example.com"))
//!     .unwrap()
//!     .build();
//! let dispatcher = Dispatcher::new(Arc::new(table));
//!
//! let request = parse_request(b"GET /ping/now HTTP/1.1\r\n\r\n").unwrap();
//! let response = dispatcher.dispatch(request).await.unwrap();
//! assert_eq!(response.body, r#"{"message":"pong"}"#);
//! assert_eq!(response.header("Access-Control-Allow-Origin"), Some("https://example.com"));
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```
//!
//! See the `demos` directory for a complete server.

// Export the parser module
pub mod parser;

// Export the router module
pub mod router;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use parser::{Error as ParserError, Header, HttpVersion, Method, RequestMessage, parse_request};
pub use router::{
    BoundParams, CorsPolicy, Dispatcher, Endpoint, Hook, Module, ParamSpec, ParamType,
    RegistrationError, RequestContext, RouteTable,
};
pub use server::{
    Error as ServerError, HttpResponse, HttpServer, ServerConfig, ServerSettings, StatusCode,
};
