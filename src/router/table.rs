//! The route table and its registration phase.

use std::fmt;
use std::sync::Arc;

use log::warn;

use crate::parser::Method;
use crate::router::cors::{CorsPolicies, CorsPolicy};
use crate::router::error::RegistrationError;
use crate::router::events::{LogObserver, RouterEvent, RouterObserver};
use crate::router::module::{Hook, Module, RouteHandler};
use crate::router::params::ParamSpec;
use crate::router::path::{join, normalize_path, normalize_sub_path};

/// A registered (method, full path) binding.
#[derive(Debug, Clone)]
pub struct Route {
    /// Normalized full path, e.g. `/users/profile`
    pub path: String,
    pub method: Method,
    pub handler: RouteHandler,
    pub params: Vec<ParamSpec>,
    /// Hooks of the owning module, in registration order
    pub hooks: Arc<[Hook]>,
}

impl Route {
    pub fn is_async(&self) -> bool {
        self.handler.is_async()
    }

    pub fn required_params(&self) -> usize {
        self.params.iter().filter(|p| !p.optional).count()
    }
}

/// Routes and CORS policies, built once and never mutated afterwards.
pub struct RouteTable {
    routes: Vec<Route>,
    cors: CorsPolicies,
    observer: Arc<dyn RouterObserver>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::new()
    }

    /// Routes in registration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn cors(&self) -> &CorsPolicies {
        &self.cors
    }

    pub fn observer(&self) -> &dyn RouterObserver {
        self.observer.as_ref()
    }

    /// Methods registered for an exact path, in registration order.
    pub fn methods_for(&self, path: &str) -> Vec<Method> {
        self.routes
            .iter()
            .filter(|r| r.path == path)
            .map(|r| r.method)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("routes", &self.routes)
            .field("cors", &self.cors)
            .finish()
    }
}

/// Collects modules and CORS policies, validating each as it is added.
///
/// Any violation returns an error and drops the builder, so a table is only
/// ever produced from a fully valid registration.
pub struct RouteTableBuilder {
    routes: Vec<Route>,
    cors: CorsPolicies,
    observer: Arc<dyn RouterObserver>,
}

impl Default for RouteTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTableBuilder {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            cors: CorsPolicies::new(),
            observer: Arc::new(LogObserver),
        }
    }

    /// Replace the observer receiving registration and dispatch events.
    pub fn observer(mut self, observer: Arc<dyn RouterObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Register every endpoint of a module under its prefix.
    pub fn module(mut self, module: Module) -> Result<Self, RegistrationError> {
        let prefix = normalize_path(&module.prefix)?;
        let hooks: Arc<[Hook]> = module.hooks.into();

        let mut added: Vec<Route> = Vec::with_capacity(module.endpoints.len());
        for endpoint in module.endpoints {
            let path = join(&prefix, &normalize_sub_path(&endpoint.path)?);

            let taken = self
                .routes
                .iter()
                .chain(added.iter())
                .any(|r: &Route| r.path == path && r.method == endpoint.method);
            if taken {
                return Err(RegistrationError::DuplicateRoute {
                    method: endpoint.method,
                    path,
                });
            }

            validate_params(&path, &endpoint.params)?;

            added.push(Route {
                path,
                method: endpoint.method,
                handler: endpoint.handler,
                params: endpoint.params,
                hooks: Arc::clone(&hooks),
            });
        }

        for route in &added {
            self.observer.on_event(&RouterEvent::RouteRegistered {
                method: route.method,
                path: &route.path,
                params: route.params.len(),
                is_async: route.is_async(),
            });
        }
        self.routes.extend(added);
        Ok(self)
    }

    pub fn cors_policy(mut self, policy: CorsPolicy) -> Result<Self, RegistrationError> {
        self.cors.add(policy)?;
        Ok(self)
    }

    pub fn cors_policies(
        self,
        policies: impl IntoIterator<Item = CorsPolicy>,
    ) -> Result<Self, RegistrationError> {
        policies.into_iter().try_fold(self, Self::cors_policy)
    }

    /// Freeze the table. CORS policies naming a path with no registered route
    /// are kept but reported, since they can never apply.
    pub fn build(self) -> RouteTable {
        for path in self.cors.scoped_paths() {
            if !self.routes.iter().any(|r| r.path == path) {
                warn!("CORS policy for {path} matches no registered endpoint");
            }
        }
        RouteTable {
            routes: self.routes,
            cors: self.cors,
            observer: self.observer,
        }
    }
}

fn validate_params(path: &str, params: &[ParamSpec]) -> Result<(), RegistrationError> {
    for (idx, spec) in params.iter().enumerate() {
        if params[..idx].iter().any(|p| p.name == spec.name) {
            return Err(RegistrationError::DuplicateParameter {
                path: path.to_string(),
                name: spec.name.clone(),
            });
        }
        if spec.default.param_type() != spec.param_type {
            return Err(RegistrationError::InvalidDefault {
                path: path.to_string(),
                name: spec.name.clone(),
                expected: spec.param_type,
            });
        }
    }
    Ok(())
}
