// Shared fixtures: a greeting service behind a trait, a handler group
// wired to it, plus a few deliberately broken components.
#![allow(dead_code)]

use gantry::prelude::*;
use std::any::Any;
use std::sync::Arc;

pub trait Greeter: Send + Sync {
    fn greet(&self, name: &str) -> String;
}

#[derive(Default)]
pub struct GreetingService;

impl Greeter for GreetingService {
    fn greet(&self, name: &str) -> String {
        format!("Hello {name} !")
    }
}

fn new_greeting_service() -> Result<BeanRef, Error> {
    Ok(Arc::new(GreetingService))
}

fn as_greeter(bean: &BeanRef) -> Option<Box<dyn Any + Send + Sync>> {
    let service = bean.clone().downcast::<GreetingService>().ok()?;
    Some(Box::new(service as Arc<dyn Greeter>))
}

pub static GREETING_SERVICE: ComponentDescriptor = ComponentDescriptor {
    type_name: "demo::service::GreetingService",
    kind: ComponentKind::Service {
        name: "",
        capabilities: &[Capability {
            name: "demo::service::Greeter",
            cast: as_greeter,
        }],
    },
    factory: new_greeting_service,
    injects: &[],
};

#[derive(Default)]
pub struct GreetingController {
    pub greeter: Inject<dyn Greeter>,
}

fn new_greeting_controller() -> Result<BeanRef, Error> {
    Ok(Arc::new(GreetingController::default()))
}

fn wire_greeter(bean: &BeanRef, dep: &RegisteredBean) -> Result<(), Error> {
    let controller = bean
        .clone()
        .downcast::<GreetingController>()
        .map_err(|_| Error::DependencyInjection("expected GreetingController".into()))?;
    let greeter = dep.as_capability::<dyn Greeter>().ok_or_else(|| {
        Error::DependencyInjection("bean does not expose demo::service::Greeter".into())
    })?;
    controller.greeter.set(greeter);
    Ok(())
}

fn invoke_query(
    bean: &BeanRef,
    _req: &HttpRequest,
    resp: &mut HttpResponse,
    binding: &mut ParameterBinding,
) -> Result<(), Error> {
    let controller = bean
        .downcast_ref::<GreetingController>()
        .ok_or_else(|| Error::Internal("expected GreetingController".into()))?;
    let greeter = controller
        .greeter
        .get()
        .ok_or_else(|| Error::Internal("greeter not wired".into()))?;
    let name: String = binding.take(2)?;
    resp.write(&greeter.greet(&name));
    Ok(())
}

fn invoke_add(
    _bean: &BeanRef,
    _req: &HttpRequest,
    resp: &mut HttpResponse,
    binding: &mut ParameterBinding,
) -> Result<(), Error> {
    let a: i64 = binding.take(1)?;
    let b: i64 = binding.take(2)?;
    resp.write(&format!("{a} + {b} = {}", a + b));
    Ok(())
}

fn invoke_remove(
    _bean: &BeanRef,
    _req: &HttpRequest,
    resp: &mut HttpResponse,
    binding: &mut ParameterBinding,
) -> Result<(), Error> {
    let id: i64 = binding.take(1)?;
    resp.write(&format!("removed {id}"));
    Ok(())
}

pub static GREETING_CONTROLLER: ComponentDescriptor = ComponentDescriptor {
    type_name: "demo::web::GreetingController",
    kind: ComponentKind::HandlerGroup {
        prefix: "/test",
        routes: &[
            RouteDecl {
                path: "/query",
                handler_name: "query",
                params: &[
                    ParamSpec::Request,
                    ParamSpec::Response,
                    ParamSpec::Bound {
                        name: "name",
                        type_name: "String",
                        construct: bind_value::<String>,
                    },
                ],
                invoke: invoke_query,
            },
            RouteDecl {
                path: "/add",
                handler_name: "add",
                params: &[
                    ParamSpec::Response,
                    ParamSpec::Bound {
                        name: "a",
                        type_name: "i64",
                        construct: bind_value::<i64>,
                    },
                    ParamSpec::Bound {
                        name: "b",
                        type_name: "i64",
                        construct: bind_value::<i64>,
                    },
                ],
                invoke: invoke_add,
            },
            RouteDecl {
                path: "/remove",
                handler_name: "remove",
                params: &[
                    ParamSpec::Response,
                    ParamSpec::Bound {
                        name: "id",
                        type_name: "i64",
                        construct: bind_value::<i64>,
                    },
                ],
                invoke: invoke_remove,
            },
        ],
    },
    factory: new_greeting_controller,
    injects: &[InjectionPoint {
        field: "greeter",
        name: "",
        type_name: "demo::service::Greeter",
        assign: wire_greeter,
    }],
};

// Two handler groups in different packages sharing a simple type name;
// both resolve to the bean name "statusController".
#[derive(Default)]
pub struct AlphaStatus;

#[derive(Default)]
pub struct BetaStatus;

fn new_alpha_status() -> Result<BeanRef, Error> {
    Ok(Arc::new(AlphaStatus))
}

fn new_beta_status() -> Result<BeanRef, Error> {
    Ok(Arc::new(BetaStatus))
}

pub static ALPHA_STATUS: ComponentDescriptor = ComponentDescriptor {
    type_name: "demo::alpha::StatusController",
    kind: ComponentKind::HandlerGroup {
        prefix: "/alpha",
        routes: &[],
    },
    factory: new_alpha_status,
    injects: &[],
};

pub static BETA_STATUS: ComponentDescriptor = ComponentDescriptor {
    type_name: "demo::beta::StatusController",
    kind: ComponentKind::HandlerGroup {
        prefix: "/beta",
        routes: &[],
    },
    factory: new_beta_status,
    injects: &[],
};

fn failing_factory() -> Result<BeanRef, Error> {
    Err(Error::Instantiation("no zero-argument constructor".into()))
}

pub static BROKEN_SERVICE: ComponentDescriptor = ComponentDescriptor {
    type_name: "demo::service::BrokenService",
    kind: ComponentKind::Service {
        name: "",
        capabilities: &[],
    },
    factory: failing_factory,
    injects: &[],
};

/// Catalog holding the well-behaved fixtures.
pub fn catalog() -> ComponentCatalog {
    ComponentCatalog::with_descriptors(vec![&GREETING_SERVICE, &GREETING_CONTROLLER])
}

/// Bootstrap a fully wired application over the fixture catalog.
pub fn boot(context_path: &str) -> Application {
    let options = BootOptions {
        scan_package: Some("demo".to_string()),
        context_path: context_path.to_string(),
    };
    Application::bootstrap(&catalog(), options).expect("bootstrap failed")
}
