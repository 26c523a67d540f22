//! Declarative module descriptors: endpoints, handlers and lifecycle hooks.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::parser::{Method, RequestMessage};
use crate::router::context::RequestContext;
use crate::router::params::{BoundParams, ParamSpec};
use crate::server::{Error, HttpResponse};

/// What every handler produces.
pub type HandlerResult = Result<HttpResponse, Error>;

/// Type alias for a boxed future that returns a [`HandlerResult`].
pub type HandlerFuture = Pin<Box<dyn Future<Output = HandlerResult> + Send>>;

/// A synchronous handler.
pub type SyncHandlerFn = Arc<dyn Fn(RequestContext, BoundParams) -> HandlerResult + Send + Sync>;

/// An asynchronous handler.
pub type AsyncHandlerFn = Arc<dyn Fn(RequestContext, BoundParams) -> HandlerFuture + Send + Sync>;

/// A handler bound once at registration.
///
/// Both shapes receive the request context followed by the bound
/// parameters and must produce an [`HttpResponse`]; anything else does not
/// type-check, so a wrong return shape can never be discovered mid-dispatch.
#[derive(Clone)]
pub enum RouteHandler {
    Sync(SyncHandlerFn),
    Async(AsyncHandlerFn),
}

impl RouteHandler {
    pub fn is_async(&self) -> bool {
        matches!(self, RouteHandler::Async(_))
    }

    /// Invoke the handler, awaiting it when asynchronous.
    pub(crate) async fn call(&self, ctx: RequestContext, params: BoundParams) -> HandlerResult {
        match self {
            RouteHandler::Sync(f) => f(ctx, params),
            RouteHandler::Async(f) => f(ctx, params).await,
        }
    }
}

impl fmt::Debug for RouteHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteHandler::Sync(_) => f.write_str("RouteHandler::Sync"),
            RouteHandler::Async(_) => f.write_str("RouteHandler::Async"),
        }
    }
}

/// What a lifecycle hook returns. The `Ok` value carries nothing.
pub type HookResult = Result<(), Error>;

type PlainHookFn = Arc<dyn Fn() -> HookResult + Send + Sync>;
type ContextHookFn = Arc<dyn Fn(&RequestContext) -> HookResult + Send + Sync>;
type MessageHookFn = Arc<dyn Fn(&RequestMessage) -> HookResult + Send + Sync>;
type BothHookFn = Arc<dyn Fn(&RequestContext, &RequestMessage) -> HookResult + Send + Sync>;

/// A side-effecting callback run whenever one of its module's routes is reached.
///
/// A hook takes no argument, the request context, the raw message, or both.
/// Those are the only shapes that can be constructed.
#[derive(Clone)]
pub enum Hook {
    Plain(PlainHookFn),
    Context(ContextHookFn),
    Message(MessageHookFn),
    Both(BothHookFn),
}

impl Hook {
    pub fn plain<F>(f: F) -> Self
    where
        F: Fn() -> HookResult + Send + Sync + 'static,
    {
        Hook::Plain(Arc::new(f))
    }

    pub fn context<F>(f: F) -> Self
    where
        F: Fn(&RequestContext) -> HookResult + Send + Sync + 'static,
    {
        Hook::Context(Arc::new(f))
    }

    pub fn message<F>(f: F) -> Self
    where
        F: Fn(&RequestMessage) -> HookResult + Send + Sync + 'static,
    {
        Hook::Message(Arc::new(f))
    }

    pub fn both<F>(f: F) -> Self
    where
        F: Fn(&RequestContext, &RequestMessage) -> HookResult + Send + Sync + 'static,
    {
        Hook::Both(Arc::new(f))
    }

    pub fn wants_context(&self) -> bool {
        matches!(self, Hook::Context(_) | Hook::Both(_))
    }

    pub fn wants_message(&self) -> bool {
        matches!(self, Hook::Message(_) | Hook::Both(_))
    }

    pub(crate) fn run(&self, ctx: &RequestContext, message: &RequestMessage) -> HookResult {
        match self {
            Hook::Plain(f) => f(),
            Hook::Context(f) => f(ctx),
            Hook::Message(f) => f(message),
            Hook::Both(f) => f(ctx, message),
        }
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("context", &self.wants_context())
            .field("message", &self.wants_message())
            .finish()
    }
}

/// One (method, sub-path) binding declared by a module.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub method: Method,
    /// Sub-path as declared, normalized at registration
    pub path: String,
    pub handler: RouteHandler,
    pub params: Vec<ParamSpec>,
}

impl Endpoint {
    /// Declare an endpoint served by a synchronous handler.
    pub fn new<F>(method: Method, path: impl Into<String>, handler: F) -> Self
    where
        F: Fn(RequestContext, BoundParams) -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            method,
            path: path.into(),
            handler: RouteHandler::Sync(Arc::new(handler)),
            params: Vec::new(),
        }
    }

    /// Declare an endpoint served by an asynchronous handler.
    pub fn new_async<F, Fut>(method: Method, path: impl Into<String>, handler: F) -> Self
    where
        F: Fn(RequestContext, BoundParams) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        let handler: AsyncHandlerFn = Arc::new(move |ctx: RequestContext, params: BoundParams| -> HandlerFuture {
            Box::pin(handler(ctx, params))
        });
        Self {
            method,
            path: path.into(),
            handler: RouteHandler::Async(handler),
            params: Vec::new(),
        }
    }

    /// Declare the next query parameter. Order of calls is argument order.
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }
}

/// A group of endpoints sharing a path prefix and lifecycle hooks.
#[derive(Debug, Clone)]
pub struct Module {
    /// Prefix as declared, normalized at registration
    pub prefix: String,
    pub endpoints: Vec<Endpoint>,
    pub hooks: Vec<Hook>,
}

impl Module {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            endpoints: Vec::new(),
            hooks: Vec::new(),
        }
    }

    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    /// Run `hook` each time one of this module's routes is matched.
    /// Hooks run in the order they are added.
    pub fn on_endpoint_reached(mut self, hook: Hook) -> Self {
        self.hooks.push(hook);
        self
    }
}
