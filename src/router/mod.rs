//! Request routing.
//!
//! Modules of endpoints are registered once into an immutable
//! [`RouteTable`]; a [`Dispatcher`] then answers each parsed request from it.
//!
//! ```
//! use std::sync::Arc;
//! use microrest_rs::{HttpResponse, Method, StatusCode};
//! use microrest_rs::router::{Dispatcher, Endpoint, Module, ParamSpec, ParamType, RouteTable};
//!
//! let users = Module::new("users").endpoint(
//!     Endpoint::new(Method::GET, "profile", |_ctx, params| {
//!         let id: i64 = params.get("id").unwrap_or_default();
//!         Ok(HttpResponse::new(StatusCode::Ok).with_body_string(format!("user {id}")))
//!     })
//!     .param(ParamSpec::optional("id", ParamType::Int).with_default(-1i64)),
//! );
//!
//! let table = RouteTable::builder().module(users).unwrap().build();
//! let dispatcher = Dispatcher::new(Arc::new(table));
//! assert_eq!(dispatcher.table().len(), 1);
//! ```

mod context;
mod cors;
mod dispatcher;
mod error;
mod events;
mod module;
mod params;
mod path;
mod table;

// Re-export public items
pub use context::RequestContext;
pub use cors::{CorsHeaders, CorsPolicies, CorsPolicy, CorsScope};
pub use dispatcher::{Dispatcher, RouteMatch};
pub use error::RegistrationError;
pub use events::{LogObserver, RouterEvent, RouterObserver};
pub use module::{
    AsyncHandlerFn, Endpoint, HandlerFuture, HandlerResult, Hook, HookResult, Module, RouteHandler,
    SyncHandlerFn,
};
pub use params::{bind, BindError, BoundParams, FromParamValue, ParamSpec, ParamType, ParamValue};
pub use path::{normalize_path, normalize_sub_path};
pub use table::{Route, RouteTable, RouteTableBuilder};
