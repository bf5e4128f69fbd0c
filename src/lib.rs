//! Gantry is a lightweight dependency injection container and HTTP request
//! dispatcher. Components register themselves at compile time, the container
//! scans, instantiates and wires them at startup, and a route table maps
//! request paths onto handler methods.
//!
//! # Quick start
//!
//! ```no_run
//! use gantry::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), gantry::Error> {
//!     let options = BootOptions {
//!         scan_package: Some("demo".to_string()),
//!         ..Default::default()
//!     };
//!     let app = Application::bootstrap(&ComponentCatalog::global(), options)?;
//!     app.listen(3000).await
//! }
//! ```

pub use gantry_core::*;

pub use gantry_core::register_component;

#[cfg(feature = "config")]
pub use gantry_config as config;

pub mod prelude {
    pub use gantry_core::{
        bind_value, Application, BeanRef, BeanRegistry, BootOptions, Capability,
        ComponentCatalog, ComponentDescriptor, ComponentKind, Dispatcher, Error, HttpRequest,
        HttpResponse, Inject, InjectionPoint, ParamSpec, ParameterBinding, RegisteredBean,
        RouteDecl, RouteTable,
    };

    #[cfg(feature = "config")]
    pub use gantry_config::Settings;
}
