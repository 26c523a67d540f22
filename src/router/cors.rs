//! Cross-origin policies and their resolution per route.

use serde::Deserialize;

use crate::parser::Method;
use crate::router::error::RegistrationError;
use crate::router::path::normalize_sub_path;
use crate::server::HttpResponse;

/// Which routes a policy applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsScope {
    AllEndpoints,
    Path(String),
}

/// A cross-origin policy. An empty list allows everything for that dimension.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawCorsPolicy")]
pub struct CorsPolicy {
    pub scope: CorsScope,
    pub origins: Vec<String>,
    pub methods: Vec<Method>,
    pub headers: Vec<String>,
}

/// Policy applied when nothing was registered for a path and no
/// all-endpoints policy exists.
static WILDCARD: CorsPolicy = CorsPolicy {
    scope: CorsScope::AllEndpoints,
    origins: Vec::new(),
    methods: Vec::new(),
    headers: Vec::new(),
};

// Settings-file shape of a policy
#[derive(Deserialize)]
struct RawCorsPolicy {
    #[serde(default)]
    endpoint: String,
    #[serde(default)]
    origins: Vec<String>,
    #[serde(default)]
    methods: Vec<Method>,
    #[serde(default)]
    headers: Vec<String>,
}

impl From<RawCorsPolicy> for CorsPolicy {
    fn from(raw: RawCorsPolicy) -> Self {
        Self {
            origins: raw.origins,
            methods: raw.methods,
            headers: raw.headers,
            ..CorsPolicy::for_path(&raw.endpoint)
        }
    }
}

impl CorsPolicy {
    /// A wildcard policy covering every route.
    pub fn all_endpoints() -> Self {
        WILDCARD.clone()
    }

    /// A wildcard policy for one route path.
    ///
    /// An empty path or `/` means all endpoints; a missing leading slash is added.
    pub fn for_path(path: &str) -> Self {
        let scope = match path {
            "" | "/" => CorsScope::AllEndpoints,
            p if p.starts_with('/') => CorsScope::Path(p.to_string()),
            p => CorsScope::Path(format!("/{p}")),
        };
        Self {
            scope,
            ..Self::all_endpoints()
        }
    }

    pub fn allow_origin(mut self, origin: impl Into<String>) -> Self {
        self.origins.push(origin.into());
        self
    }

    pub fn allow_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    pub fn allow_header(mut self, header: impl Into<String>) -> Self {
        self.headers.push(header.into());
        self
    }

    pub fn is_all_endpoints(&self) -> bool {
        self.scope == CorsScope::AllEndpoints
    }

    /// Render the three response header values.
    pub fn header_values(&self) -> CorsHeaders {
        CorsHeaders {
            allow_origin: join_or_wildcard(self.origins.iter().map(String::as_str)),
            allow_methods: join_or_wildcard(self.methods.iter().map(Method::as_str)),
            allow_headers: join_or_wildcard(self.headers.iter().map(String::as_str)),
        }
    }
}

fn join_or_wildcard<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let joined = values.collect::<Vec<_>>().join(",");
    if joined.is_empty() {
        "*".to_string()
    } else {
        joined
    }
}

/// Rendered CORS header values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsHeaders {
    pub allow_origin: String,
    pub allow_methods: String,
    pub allow_headers: String,
}

impl CorsHeaders {
    /// Stamp the values onto a response, overwriting any previous ones.
    pub fn apply(self, response: HttpResponse) -> HttpResponse {
        response
            .with_header("Access-Control-Allow-Origin", self.allow_origin)
            .with_header("Access-Control-Allow-Methods", self.allow_methods)
            .with_header("Access-Control-Allow-Headers", self.allow_headers)
    }
}

/// The registered policy set. Read-only once the route table is built.
#[derive(Debug, Clone, Default)]
pub struct CorsPolicies {
    policies: Vec<CorsPolicy>,
    default: Option<usize>,
}

impl CorsPolicies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a policy.
    ///
    /// At most one policy may cover all endpoints, and at most one may
    /// target any given path. Policy paths are normalized like endpoint
    /// paths, so `users/profile/` targets `/users/profile`.
    pub fn add(&mut self, policy: CorsPolicy) -> Result<(), RegistrationError> {
        match &policy.scope {
            CorsScope::AllEndpoints if self.default.is_some() => {
                return Err(RegistrationError::DuplicateDefaultPolicy);
            }
            CorsScope::AllEndpoints => self.default = Some(self.policies.len()),
            CorsScope::Path(path) => {
                let path = format!("/{}", normalize_sub_path(path)?);
                let scope = CorsScope::Path(path.clone());
                if self.policies.iter().any(|p| p.scope == scope) {
                    return Err(RegistrationError::DuplicatePolicy(path));
                }
                self.policies.push(CorsPolicy { scope, ..policy });
                return Ok(());
            }
        }
        self.policies.push(policy);
        Ok(())
    }

    /// The all-endpoints policy, or the implicit wildcard.
    pub fn default_policy(&self) -> &CorsPolicy {
        self.default
            .map(|idx| &self.policies[idx])
            .unwrap_or(&WILDCARD)
    }

    /// The effective policy for a route path: an exact-path policy first,
    /// then the all-endpoints policy, then the implicit wildcard.
    pub fn resolve(&self, path: &str) -> &CorsPolicy {
        self.policies
            .iter()
            .find(|p| matches!(&p.scope, CorsScope::Path(scoped) if scoped == path))
            .unwrap_or_else(|| self.default_policy())
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Paths of the per-path policies, in registration order.
    pub fn scoped_paths(&self) -> impl Iterator<Item = &str> {
        self.policies.iter().filter_map(|p| match &p.scope {
            CorsScope::Path(path) => Some(path.as_str()),
            CorsScope::AllEndpoints => None,
        })
    }
}
