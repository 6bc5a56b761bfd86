//! Extra image tags rendered from Dockerfile build arguments
//!
//! A service opts in by listing `tagTemplates` in its descriptor, e.g.
//! `"v{VERSION}"`, together with the `versionArgs` whose `ARG` defaults
//! fill the placeholders.

use anyhow::Result;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{info, warn};

use crate::constants;
use crate::service::load_descriptor;

pub mod dockerfile;

pub use dockerfile::{parse_build_args, read_build_args};


static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^{}]+\}").expect("valid regex"));

/// Substitute the `args` that have a value into `template`.
///
/// Returns `None` if any placeholder is left unresolved.
pub fn render_template(
    template: &str,
    args: &[String],
    values: &HashMap<String, String>,
) -> Option<String> {
    let mut rendered = template.to_string();
    for arg in args {
        if let Some(value) = values.get(arg) {
            rendered = rendered.replace(&format!("{{{}}}", arg), value);
        }
    }

    if PLACEHOLDER_RE.is_match(&rendered) {
        None
    } else {
        Some(rendered)
    }
}

/// Render `image:tag` for every template that resolves, in template order
pub fn render_image_tags(
    image: &str,
    templates: &[String],
    args: &[String],
    values: &HashMap<String, String>,
) -> Vec<String> {
    templates
        .iter()
        .filter_map(|template| match render_template(template, args, values) {
            Some(tag) => Some(format!("{}:{}", image, tag)),
            None => {
                warn!("Skipping tag template {:?}: unresolved placeholder", template);
                None
            }
        })
        .collect()
}

/// Extra tags for the service in `service_dir`.
///
/// `dockerfile` defaults to the one named by the descriptor. A service
/// without a descriptor or without templates gets no tags.
pub fn render_tags(
    service_dir: &Path,
    dockerfile: Option<&Path>,
    image: &str,
    descriptor_file: &str,
) -> Result<Vec<String>> {
    let Some(file) = load_descriptor(service_dir, descriptor_file)? else {
        info!("No descriptor in {}, no extra tags", service_dir.display());
        return Ok(Vec::new());
    };

    if file.tag_templates.is_empty() {
        info!("No tag templates declared for {}", service_dir.display());
        return Ok(Vec::new());
    }

    let dockerfile = match dockerfile {
        Some(path) => path.to_path_buf(),
        None => service_dir.join(
            file.dockerfile
                .as_deref()
                .unwrap_or(constants::service::DEFAULT_DOCKERFILE),
        ),
    };

    let values = read_build_args(&dockerfile, &file.version_args)?;
    let tags = render_image_tags(image, &file.tag_templates, &file.version_args, &values);

    info!("Rendered {} extra tag(s)", tags.len());
    Ok(tags)
}
