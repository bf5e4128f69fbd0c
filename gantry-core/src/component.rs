// Component descriptors: the marker metadata read by the startup pipeline
//
// Runtime type discovery is replaced with descriptor literals. Each
// component declares its markers (handler-group prefix and route list,
// service name and capabilities, injectable fields) in a
// `ComponentDescriptor` written next to the type definition, either
// submitted to the process-wide catalog with `register_component!` or
// assembled into an explicit catalog.

use crate::binding::ParameterBinding;
use crate::error::Error;
use crate::http::{HttpRequest, HttpResponse};
use crate::registry::RegisteredBean;
use std::any::Any;
use std::sync::{Arc, OnceLock};

/// A registry-managed component instance, type-erased.
pub type BeanRef = Arc<dyn Any + Send + Sync>;

/// Method handle invoked by the dispatcher with the owning bean instance
/// and the per-request argument bindings.
pub type MethodHandle =
    fn(&BeanRef, &HttpRequest, &mut HttpResponse, &mut ParameterBinding) -> Result<(), Error>;

/// A discovered component: its fully-qualified name plus the markers
/// present on it.
pub struct ComponentDescriptor {
    /// Author-declared fully-qualified type name,
    /// e.g. `"demo::web::GreetingController"`.
    pub type_name: &'static str,
    pub kind: ComponentKind,
    /// Zero-argument constructor.
    pub factory: fn() -> Result<BeanRef, Error>,
    /// Fields to populate during the injection pass.
    pub injects: &'static [InjectionPoint],
}

impl ComponentDescriptor {
    /// Package portion of the fully-qualified name.
    pub fn package(&self) -> &'static str {
        self.type_name
            .rsplit_once("::")
            .map(|(package, _)| package)
            .unwrap_or("")
    }

    /// Simple (unqualified) type name.
    pub fn simple_name(&self) -> &'static str {
        self.type_name
            .rsplit("::")
            .next()
            .unwrap_or(self.type_name)
    }
}

impl std::fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("type_name", &self.type_name)
            .field(
                "kind",
                &match self.kind {
                    ComponentKind::HandlerGroup { .. } => "handler-group",
                    ComponentKind::Service { .. } => "service",
                },
            )
            .finish()
    }
}

/// The marker present on a component type. Types without a marker simply
/// declare no descriptor and are never discovered.
pub enum ComponentKind {
    /// A type hosting route-bound methods, with an optional class-level
    /// path prefix.
    HandlerGroup {
        prefix: &'static str,
        routes: &'static [RouteDecl],
    },
    /// A plain service, with an optional explicit bean name and the
    /// capabilities (interfaces) it implements.
    Service {
        name: &'static str,
        capabilities: &'static [Capability],
    },
}

/// A capability implemented by a service: a qualified name plus a cast
/// producing the type-erased `Arc<dyn Trait>` view of the bean.
#[derive(Clone, Copy)]
pub struct Capability {
    pub name: &'static str,
    pub cast: fn(&BeanRef) -> Option<Box<dyn Any + Send + Sync>>,
}

/// A field marked for injection.
#[derive(Clone, Copy)]
pub struct InjectionPoint {
    pub field: &'static str,
    /// Explicit target bean name; empty resolves by the declared type name.
    pub name: &'static str,
    /// Qualified name of the field's declared type.
    pub type_name: &'static str,
    /// Writes the resolved dependency reference into the field.
    pub assign: fn(&BeanRef, &RegisteredBean) -> Result<(), Error>,
}

impl InjectionPoint {
    /// Bean name this point resolves against: the explicit name when
    /// present, otherwise the declared type name.
    pub fn target_bean_name(&self) -> &'static str {
        let explicit = self.name.trim();
        if explicit.is_empty() {
            self.type_name
        } else {
            explicit
        }
    }
}

/// A route marker on a method: path suffix, declared parameter plan, and
/// the handle the dispatcher invokes.
#[derive(Clone, Copy)]
pub struct RouteDecl {
    pub path: &'static str,
    pub handler_name: &'static str,
    pub params: &'static [ParamSpec],
    pub invoke: MethodHandle,
}

/// One entry of a method's declared parameter list.
#[derive(Clone, Copy)]
pub enum ParamSpec {
    /// Bind the inbound request context.
    Request,
    /// Bind the outbound response context.
    Response,
    /// Bind from a named request field: the first value of that field is
    /// passed to `construct` (single-string-argument construction).
    Bound {
        name: &'static str,
        type_name: &'static str,
        construct: fn(&str) -> Result<Box<dyn Any + Send>, Error>,
    },
}

/// A write-once injected field. The zero value is empty; the injector
/// writes the resolved reference exactly once at startup.
pub struct Inject<T: ?Sized>(OnceLock<Arc<T>>);

impl<T: ?Sized> Inject<T> {
    pub const fn empty() -> Self {
        Self(OnceLock::new())
    }

    /// The resolved dependency, or `None` when the injector left the field
    /// at its zero value (weak binding).
    pub fn get(&self) -> Option<&Arc<T>> {
        self.0.get()
    }

    /// Write the dependency reference. Only the first write takes effect;
    /// returns whether this call performed it.
    pub fn set(&self, value: Arc<T>) -> bool {
        self.0.set(value).is_ok()
    }

    pub fn is_bound(&self) -> bool {
        self.0.get().is_some()
    }
}

impl<T: ?Sized> Default for Inject<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: ?Sized> std::fmt::Debug for Inject<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_bound() {
            write!(f, "Inject(bound)")
        } else {
            write!(f, "Inject(empty)")
        }
    }
}

// Descriptors submitted with `register_component!` are collected here
inventory::collect!(ComponentDescriptor);

/// Submit a component descriptor to the process-wide catalog.
///
/// ```ignore
/// register_component! {
///     ComponentDescriptor {
///         type_name: "demo::web::GreetingController",
///         kind: ComponentKind::HandlerGroup { prefix: "/test", routes: ROUTES },
///         factory: new_greeting_controller,
///         injects: &[],
///     }
/// }
/// ```
#[macro_export]
macro_rules! register_component {
    ($descriptor:expr) => {
        $crate::inventory::submit! { $descriptor }
    };
}
