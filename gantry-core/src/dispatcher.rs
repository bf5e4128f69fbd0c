// Per-request dispatch: LOOKUP -> BIND -> INVOKE -> RESPOND
//
// The dispatcher only reads the two startup-built tables and allocates
// per-request data, so it is safe under concurrent invocation. Every
// failure terminates in a plain-text diagnostic response; nothing
// propagates out to the hosting transport.

use crate::binding::ParameterBinding;
use crate::component::{ParamSpec, RouteDecl};
use crate::error::Error;
use crate::http::{HttpRequest, HttpResponse};
use crate::registry::BeanRegistry;
use crate::router::{normalize_path, RouteTable};
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves incoming requests against the startup-built registry and route
/// table.
pub struct Dispatcher {
    registry: Arc<BeanRegistry>,
    routes: Arc<RouteTable>,
    /// Deployment prefix stripped from request paths before lookup.
    context_path: String,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<BeanRegistry>,
        routes: Arc<RouteTable>,
        context_path: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            routes,
            context_path: context_path.into(),
        }
    }

    /// Dispatch one request. On failure the response carries the error's
    /// status code and a plain-text body naming the error class and, where
    /// available, the underlying cause.
    pub fn dispatch(&self, request: &HttpRequest, response: &mut HttpResponse) {
        if let Err(err) = self.try_dispatch(request, response) {
            warn!(path = %request.path, error = %err, "Request failed");
            response.set_status(err.status_code());
            response.write(&err.to_string());
        }
    }

    fn try_dispatch(
        &self,
        request: &HttpRequest,
        response: &mut HttpResponse,
    ) -> Result<(), Error> {
        let path = self.route_path(&request.path);
        let route = self
            .routes
            .lookup(&path)
            .ok_or_else(|| Error::RouteNotFound(path.clone()))?;
        let bean = self.registry.get(&route.bean_name).ok_or_else(|| {
            Error::Invocation(format!(
                "no bean '{}' backing route '{}'",
                route.bean_name, path
            ))
        })?;

        let mut binding = bind_parameters(route.decl, request)?;

        debug!(
            path = %path,
            handler = route.decl.handler_name,
            group = route.group,
            "Invoking handler"
        );
        (route.decl.invoke)(&bean.instance, request, response, &mut binding).map_err(
            |err| match err {
                // A binding error from inside the handle means the declared
                // parameter plan and the handle's take calls disagree; it
                // stays a 400 like any other binding failure. Handler logic
                // reports its own failures through other variants, which
                // become 500s below.
                err @ Error::ParameterBinding(_) => err,
                other => Error::Invocation(other.to_string()),
            },
        )
    }

    /// Strip the deployment prefix once and normalize separators.
    fn route_path(&self, raw: &str) -> String {
        let stripped = if self.context_path.is_empty() {
            raw
        } else {
            raw.strip_prefix(self.context_path.as_str()).unwrap_or(raw)
        };
        normalize_path(stripped)
    }
}

/// Resolve the declared parameter list into an ordered argument sequence.
fn bind_parameters(decl: &RouteDecl, request: &HttpRequest) -> Result<ParameterBinding, Error> {
    let mut binding = ParameterBinding::new();
    for spec in decl.params {
        match spec {
            ParamSpec::Request | ParamSpec::Response => binding.push_context(),
            ParamSpec::Bound {
                name,
                type_name,
                construct,
            } => {
                let raw = request.first_param(name).ok_or_else(|| {
                    Error::ParameterBinding(format!(
                        "missing request field '{name}' for {type_name} parameter"
                    ))
                })?;
                let value = construct(raw).map_err(|err| match err {
                    err @ Error::ParameterBinding(_) => err,
                    other => Error::ParameterBinding(other.to_string()),
                })?;
                binding.push_value(value);
            }
        }
    }
    Ok(binding)
}
