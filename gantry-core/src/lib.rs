// Core library for the Gantry container
// This crate contains the startup pipeline (catalog scan, bean
// instantiation, dependency injection, route table construction) and the
// per-request dispatcher, plus the transport adapter that hosts them.

pub mod application;
pub mod binding;
pub mod catalog;
pub mod component;
pub mod dispatcher;
pub mod error;
pub mod http;
pub mod injector;
pub mod logging;
pub mod registry;
pub mod router;

// Re-export commonly used types
pub use application::*;
pub use binding::*;
pub use catalog::*;
pub use component::*;
pub use dispatcher::*;
pub use error::*;
pub use http::*;
pub use injector::*;
pub use registry::*;
pub use router::*;

// Re-exported so `register_component!` expansions resolve without a direct
// dependency in the caller's crate.
pub use inventory;
