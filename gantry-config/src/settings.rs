// Application settings resolved from a loaded configuration map

use crate::{ConfigLoader, Result};
use gantry_core::BootOptions;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Key naming the package root the container scans for components.
pub const SCAN_PACKAGE_KEY: &str = "scanPackage";

/// Key naming the path prefix stripped from every incoming request.
pub const CONTEXT_PATH_KEY: &str = "contextPath";

/// Flat key-value settings backing container startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    values: HashMap<String, String>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Load settings from a file, detecting the format from the extension.
    pub fn load(path: &str) -> Result<Self> {
        let values = ConfigLoader::auto(path)?.load_file(path)?;
        Ok(Self { values })
    }

    /// Load settings, falling back to an empty set when the file is missing
    /// or malformed. The container still starts and serves 404s.
    pub fn load_or_default(path: &str) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(path, %err, "configuration unavailable, starting with defaults");
                Self::new()
            }
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Scan root, if one is configured and non-blank.
    pub fn scan_package(&self) -> Option<&str> {
        self.get(SCAN_PACKAGE_KEY)
            .map(str::trim)
            .filter(|root| !root.is_empty())
    }

    /// Context path prefix, defaulting to the empty string.
    pub fn context_path(&self) -> &str {
        self.get(CONTEXT_PATH_KEY).unwrap_or("")
    }

    /// Translate settings into the options the application boots with.
    pub fn boot_options(&self) -> BootOptions {
        BootOptions {
            scan_package: self.scan_package().map(str::to_string),
            context_path: self.context_path().to_string(),
        }
    }
}
