// Minimal gantry application: one service behind a trait, one handler
// group wired to it, startup driven by demos/demo.properties.
//
// Try it:
//   cargo run --example hello
//   curl 'http://localhost:3000/test/query?name=Ann'
//   curl 'http://localhost:3000/test/add?a=3&b=4'
//   curl 'http://localhost:3000/test/remove?id=7'

use gantry::logging::LogConfig;
use gantry::prelude::*;

mod service {
    use gantry::prelude::*;
    use gantry::register_component;
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

    register_component! {
        ComponentDescriptor {
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
        }
    }
}

mod web {
    use super::service::Greeter;
    use gantry::prelude::*;
    use gantry::register_component;
    use std::sync::Arc;

    #[derive(Default)]
    pub struct GreetingController {
        greeter: Inject<dyn Greeter>,
    }

    impl GreetingController {
        fn query(&self, resp: &mut HttpResponse, name: String) -> Result<(), Error> {
            let greeter = self
                .greeter
                .get()
                .ok_or_else(|| Error::Internal("greeter not wired".into()))?;
            resp.write(&greeter.greet(&name));
            Ok(())
        }

        fn add(&self, resp: &mut HttpResponse, a: i64, b: i64) {
            resp.write(&format!("{a} + {b} = {}", a + b));
        }

        fn remove(&self, resp: &mut HttpResponse, id: i64) {
            resp.write(&format!("removed {id}"));
        }
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
        let name: String = binding.take(2)?;
        controller.query(resp, name)
    }

    fn invoke_add(
        bean: &BeanRef,
        _req: &HttpRequest,
        resp: &mut HttpResponse,
        binding: &mut ParameterBinding,
    ) -> Result<(), Error> {
        let controller = bean
            .downcast_ref::<GreetingController>()
            .ok_or_else(|| Error::Internal("expected GreetingController".into()))?;
        let a: i64 = binding.take(1)?;
        let b: i64 = binding.take(2)?;
        controller.add(resp, a, b);
        Ok(())
    }

    fn invoke_remove(
        bean: &BeanRef,
        _req: &HttpRequest,
        resp: &mut HttpResponse,
        binding: &mut ParameterBinding,
    ) -> Result<(), Error> {
        let controller = bean
            .downcast_ref::<GreetingController>()
            .ok_or_else(|| Error::Internal("expected GreetingController".into()))?;
        let id: i64 = binding.take(1)?;
        controller.remove(resp, id);
        Ok(())
    }

    register_component! {
        ComponentDescriptor {
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
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    LogConfig::default().init();

    let settings = Settings::load_or_default("demos/demo.properties");
    let mut options = settings.boot_options();
    if options.scan_package.is_none() {
        options.scan_package = Some("demo".to_string());
    }

    let app = Application::bootstrap(&ComponentCatalog::global(), options)?;
    app.listen(3000).await
}
