//! Service discovery across the repository root

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use super::descriptor::{load_descriptor, ServiceFile};
use crate::config::Config;
use crate::constants;

/// One entry of the build matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Base name of the service directory
    pub name: String,
    /// Service directory, relative to the repository root
    pub dir: String,
    pub context: String,
    pub dockerfile: String,
    pub platforms: Vec<String>,
}

impl Service {
    /// Resolve a descriptor's optional keys against their defaults
    pub fn from_descriptor(
        name: &str,
        dir: &str,
        file: &ServiceFile,
        default_platforms: &[String],
    ) -> Self {
        let dockerfile = file
            .dockerfile
            .as_deref()
            .unwrap_or(constants::service::DEFAULT_DOCKERFILE);

        let platforms = if file.platforms.is_empty() {
            default_platforms.to_vec()
        } else {
            file.platforms.clone()
        };

        Self {
            name: name.to_string(),
            dir: dir.to_string(),
            context: file.context.clone().unwrap_or_else(|| dir.to_string()),
            dockerfile: format!("{}/{}", dir, dockerfile),
            platforms,
        }
    }

    /// First path segment of the service directory
    pub fn top_level_dir(&self) -> &str {
        self.dir.split('/').next().unwrap_or(&self.dir)
    }
}

/// Find every directory directly under `root` that holds a descriptor,
/// sorted by name.
pub fn discover_services(root: &Path, config: &Config) -> Result<Vec<Service>> {
    let entries = std::fs::read_dir(root)
        .with_context(|| format!("Failed to read directory: {}", root.display()))?;

    let mut services = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            debug!("Skipping non UTF-8 directory {}", path.display());
            continue;
        };

        if let Some(file) = load_descriptor(&path, &config.descriptor_file)? {
            debug!("Found service {}", name);
            services.push(Service::from_descriptor(
                name,
                name,
                &file,
                &config.default_platforms,
            ));
        }
    }

    services.sort_by(|a, b| a.name.cmp(&b.name));
    info!("Discovered {} service(s)", services.len());
    Ok(services)
}
