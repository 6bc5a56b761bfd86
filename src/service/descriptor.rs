//! Per-service descriptor file

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, warn};

/// Contents of a service descriptor. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceFile {
    /// Build context, relative to the repository root
    pub context: Option<String>,

    /// Dockerfile name inside the service directory
    pub dockerfile: Option<String>,

    pub platforms: Vec<String>,

    /// Dockerfile `ARG`s whose defaults feed the tag templates
    pub version_args: Vec<String>,

    pub tag_templates: Vec<String>,
}

impl ServiceFile {
    /// Read each key on its own. A key of the wrong type is logged and left
    /// at its default without affecting the others.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            warn!("Ignoring descriptor that is not a JSON object");
            return Self::default();
        };

        Self {
            context: string_key(object, "context"),
            dockerfile: string_key(object, "dockerfile"),
            platforms: string_list_key(object, "platforms"),
            version_args: string_list_key(object, "versionArgs"),
            tag_templates: string_list_key(object, "tagTemplates"),
        }
    }
}

fn string_key(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => {
            warn!("Ignoring descriptor key {:?}: expected a string, got {}", key, other);
            None
        }
    }
}

fn string_list_key(object: &Map<String, Value>, key: &str) -> Vec<String> {
    match object.get(key) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                other => {
                    warn!("Ignoring non-string entry {} in {:?}", other, key);
                    None
                }
            })
            .collect(),
        Some(other) => {
            warn!("Ignoring descriptor key {:?}: expected a list, got {}", key, other);
            Vec::new()
        }
    }
}

/// Load the descriptor `file_name` from `service_dir`.
///
/// Returns `Ok(None)` when the file does not exist. Malformed JSON is an
/// error; keys of the wrong type fall back to their defaults.
pub fn load_descriptor(service_dir: &Path, file_name: &str) -> Result<Option<ServiceFile>> {
    let path = service_dir.join(file_name);
    if !path.is_file() {
        debug!("No descriptor at {}", path.display());
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(Some(ServiceFile::from_value(&value)))
}
