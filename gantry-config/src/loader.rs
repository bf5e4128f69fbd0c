// Configuration file loaders

use crate::{ConfigError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileFormat {
    Properties,
    Json,
    Toml,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "properties" | "conf" | "env" => Some(FileFormat::Properties),
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }
}

/// Loader producing the flat string key to string value map the container
/// consumes.
pub struct ConfigLoader {
    format: FileFormat,
}

impl ConfigLoader {
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }

    /// Auto-detect format from file extension
    pub fn auto(path: &str) -> Result<Self> {
        let ext = Path::new(path)
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigError::LoadError("no file extension found".to_string()))?;

        let format = FileFormat::from_extension(ext)
            .ok_or_else(|| ConfigError::LoadError(format!("unsupported format: {ext}")))?;

        Ok(Self::new(format))
    }

    /// Load configuration from file
    pub fn load_file(&self, path: &str) -> Result<HashMap<String, String>> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadError(format!("failed to read {path}: {e}")))?;
        self.parse(&content)
    }

    /// Parse configuration from string
    pub fn parse(&self, content: &str) -> Result<HashMap<String, String>> {
        match self.format {
            FileFormat::Properties => Ok(parse_properties(content)),
            FileFormat::Json => parse_json(content),
            FileFormat::Toml => parse_toml(content),
        }
    }
}

fn parse_properties(content: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim().trim_matches('"').trim_matches('\'');
            map.insert(key.to_string(), value.to_string());
        }
    }
    map
}

fn parse_json(content: &str) -> Result<HashMap<String, String>> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {e}")))?;
    let mut map = HashMap::new();
    flatten_value("", &value, &mut map);
    Ok(map)
}

fn parse_toml(content: &str) -> Result<HashMap<String, String>> {
    let toml_value: toml::Value =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(format!("TOML parse error: {e}")))?;

    // Convert through JSON so both formats flatten identically
    let json = serde_json::to_value(&toml_value)
        .map_err(|e| ConfigError::ParseError(format!("TOML to JSON conversion error: {e}")))?;
    let mut map = HashMap::new();
    flatten_value("", &json, &mut map);
    Ok(map)
}

/// Flatten nested objects with dot-joined keys; scalar leaves become
/// strings, arrays keep their JSON text.
fn flatten_value(prefix: &str, value: &Value, out: &mut HashMap<String, String>) {
    match value {
        Value::Object(fields) => {
            for (key, nested) in fields {
                let flat_key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_value(&flat_key, nested, out);
            }
        }
        Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        Value::Null => {
            out.insert(prefix.to_string(), String::new());
        }
        other => {
            out.insert(prefix.to_string(), other.to_string());
        }
    }
}
