//! Per-request dispatch: route lookup, hooks, parameter binding, handler
//! invocation and CORS annotation.

use std::sync::Arc;

use crate::parser::{Method, RequestMessage};
use crate::router::context::RequestContext;
use crate::router::events::RouterEvent;
use crate::router::params::{bind, BindError};
use crate::router::table::{Route, RouteTable};
use crate::server::{Error, HttpResponse, StatusCode};

/// Outcome of looking a request up in the route table.
#[derive(Debug, Clone, Copy)]
pub enum RouteMatch<'a> {
    /// No route has the requested path.
    NotFound,
    /// The path exists, but not for the requested method. Holds the first
    /// route seen at that path.
    MethodMismatch(&'a Route),
    /// Path and method both match.
    Found(&'a Route),
}

/// Turns parsed requests into responses using a shared, immutable route table.
///
/// Routing failures (404, 405, 400) are answered directly. Errors returned by
/// hooks or handlers are propagated untouched for the connection boundary to
/// turn into a 500.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    table: Arc<RouteTable>,
}

impl Dispatcher {
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Find the route for an exact base path and method.
    ///
    /// A path match with the wrong method is remembered, but scanning goes on
    /// since another variant of the same path may accept the method.
    pub fn lookup(&self, path: &str, method: Method) -> RouteMatch<'_> {
        let mut state = RouteMatch::NotFound;
        for route in self.table.routes().iter().filter(|r| r.path == path) {
            if route.method == method {
                return RouteMatch::Found(route);
            }
            if let RouteMatch::NotFound = state {
                state = RouteMatch::MethodMismatch(route);
            }
        }
        state
    }

    /// Dispatch one request.
    pub async fn dispatch(&self, message: RequestMessage) -> Result<HttpResponse, Error> {
        let observer = self.table.observer();
        let message = Arc::new(message);
        let path = message.base_path.as_str();

        let route = match self.lookup(path, message.method) {
            RouteMatch::NotFound => {
                observer.on_event(&RouterEvent::NotFound { method: message.method, path });
                return Ok(not_found(path));
            }
            RouteMatch::MethodMismatch(route) => {
                observer.on_event(&RouterEvent::BadMethod {
                    path,
                    expected: route.method,
                    got: message.method,
                });
                return Ok(bad_method(route.method, message.method, &self.table.methods_for(path)));
            }
            RouteMatch::Found(route) => route,
        };

        observer.on_event(&RouterEvent::EndpointMatched { method: route.method, path });

        let ctx = RequestContext::new(Arc::clone(&message));
        for hook in route.hooks.iter() {
            hook.run(&ctx, &message)?;
        }

        let params = match bind(&route.params, &ctx) {
            Ok(params) => params,
            Err(BindError::MissingRequired { declared, required }) => {
                observer.on_event(&RouterEvent::BadParameters { path, declared, required });
                return Ok(bad_parameters(declared, required));
            }
            Err(BindError::TypeConversion { name, expected }) => {
                observer.on_event(&RouterEvent::BadParameterType {
                    path,
                    name: &name,
                    expected,
                });
                return Ok(HttpResponse::new(StatusCode::BadRequest).with_body_string(format!(
                    "Cannot get parameter of type '{expected}' for <{name}>"
                )));
            }
        };

        let response = route.handler.call(ctx, params).await?;

        let cors = self.table.cors().resolve(&route.path).header_values();
        Ok(cors.apply(response))
    }
}

fn not_found(path: &str) -> HttpResponse {
    HttpResponse::new(StatusCode::NotFound).with_body_string(format!("Endpoint ({path}) not found."))
}

fn bad_method(expected: Method, got: Method, allowed: &[Method]) -> HttpResponse {
    let allow = allowed.iter().map(Method::as_str).collect::<Vec<_>>().join(", ");
    HttpResponse::new(StatusCode::MethodNotAllowed)
        .with_header("Allow", allow)
        .with_body_string(format!("Method is incorrect. Expected '{expected}' but got '{got}'"))
}

fn bad_parameters(declared: usize, required: usize) -> HttpResponse {
    HttpResponse::new(StatusCode::BadRequest).with_body_string(format!(
        "Bad parameters: expected {declared} parameter(s) ({required} of which are required)."
    ))
}
