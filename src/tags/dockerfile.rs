//! `ARG` defaults declared in a Dockerfile

use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info};

/// `ARG NAME=value` with an optional trailing comment
static ARG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*ARG\s+([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(.+?)\s*(?:#.*)?$")
        .expect("valid regex")
});

/// Strip surrounding single or double quotes
fn unquote(raw: &str) -> &str {
    raw.trim().trim_matches('"').trim_matches('\'')
}

/// Collect the defaults of the `wanted` build arguments. Later declarations
/// overwrite earlier ones; empty values are skipped.
pub fn parse_build_args(content: &str, wanted: &[String]) -> HashMap<String, String> {
    let mut values = HashMap::new();

    for line in content.lines() {
        let Some(caps) = ARG_RE.captures(line) else {
            continue;
        };

        let name = &caps[1];
        if !wanted.iter().any(|w| w == name) {
            continue;
        }

        let value = unquote(&caps[2]);
        if value.is_empty() {
            debug!("ARG {} has an empty default, ignoring", name);
            continue;
        }

        debug!("ARG {}={}", name, value);
        values.insert(name.to_string(), value.to_string());
    }

    values
}

/// Read `path` and parse its build arguments. A missing Dockerfile yields
/// no values.
pub fn read_build_args(path: &Path, wanted: &[String]) -> Result<HashMap<String, String>> {
    if !path.is_file() {
        info!("Dockerfile not found at {}, no build args", path.display());
        return Ok(HashMap::new());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read Dockerfile: {}", path.display()))?;
    Ok(parse_build_args(&content, wanted))
}
