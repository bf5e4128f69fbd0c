// Configuration management for Gantry containers
//
// The container reads one flat key-value resource at startup. Recognized
// keys: `scanPackage` (root namespace to scan) and `contextPath`
// (deployment prefix). Nested JSON/TOML documents are flattened with
// dot-joined keys.

pub mod error;
pub mod loader;
pub mod settings;

pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use settings::{Settings, CONTEXT_PATH_KEY, SCAN_PACKAGE_KEY};
