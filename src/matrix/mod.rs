//! Build matrix selection
//!
//! Maps the files changed since a base revision onto the services that own
//! them. Whenever change detection comes up empty or imprecise the whole
//! service list is built instead.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{info, warn};

use crate::constants;
use crate::git::ChangeSource;
use crate::service::Service;

#[cfg(test)]
mod tests;

/// The `matrix` output: services to build under `include`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matrix {
    pub include: Vec<Service>,
}

/// Result of a matrix run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixOutput {
    pub matrix: Matrix,
    pub has_work: bool,
}

impl MatrixOutput {
    pub fn new(include: Vec<Service>) -> Self {
        let has_work = !include.is_empty();
        Self {
            matrix: Matrix { include },
            has_work,
        }
    }
}

/// Whether `base` leaves nothing to diff against
pub fn is_full_rebuild(base: Option<&str>) -> bool {
    match base {
        None => true,
        Some(rev) => rev.is_empty() || rev == constants::git::ZERO_SHA,
    }
}

/// First path segment of each path, minus the ignored top-level entries
pub fn top_level_dirs<I, S>(paths: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    paths
        .into_iter()
        .filter_map(|path| {
            path.as_ref()
                .split('/')
                .next()
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
        })
        .filter(|segment| !constants::git::IGNORED_TOP_LEVEL.contains(&segment.as_str()))
        .collect()
}

/// Top-level directories changed between `base` and `head`.
///
/// A missing or all-zero base, or a diff that cannot be computed, marks
/// every tracked top-level directory as changed.
pub fn changed_dirs(
    source: &dyn ChangeSource,
    base: Option<&str>,
    head: &str,
) -> Result<BTreeSet<String>> {
    let base = match base {
        Some(rev) if !is_full_rebuild(Some(rev)) => rev,
        _ => {
            info!("No base revision, treating every tracked directory as changed");
            return all_tracked_dirs(source);
        }
    };

    if let Err(e) = source.fetch(base) {
        warn!("Failed to fetch base revision {}: {:#}", base, e);
    }

    match source.changed_files(base, head) {
        Ok(files) => {
            let dirs = top_level_dirs(&files);
            info!(
                "{} file(s) changed since {} across {:?}",
                files.len(),
                base,
                dirs
            );
            Ok(dirs)
        }
        Err(e) => {
            warn!(
                "Failed to diff {}..{}: {:#}. Falling back to a full rebuild",
                base, head, e
            );
            all_tracked_dirs(source)
        }
    }
}

fn all_tracked_dirs(source: &dyn ChangeSource) -> Result<BTreeSet<String>> {
    let files = source.tracked_files()?;
    Ok(top_level_dirs(&files))
}

/// Services whose name or top-level directory is in `changed`.
///
/// Falls back to every service when `changed` is empty or matches nothing.
pub fn select_services(services: &[Service], changed: &BTreeSet<String>) -> Vec<Service> {
    if changed.is_empty() {
        info!("No changed directories detected, building all services");
        return services.to_vec();
    }

    let selected: Vec<Service> = services
        .iter()
        .filter(|s| changed.contains(&s.name) || changed.contains(s.top_level_dir()))
        .cloned()
        .collect();

    if selected.is_empty() {
        info!("No service matched the changed directories, building all services");
        return services.to_vec();
    }

    selected
}

/// Compute the matrix for `services`
pub fn build_matrix(
    services: &[Service],
    source: &dyn ChangeSource,
    base: Option<&str>,
    head: &str,
) -> Result<MatrixOutput> {
    if services.is_empty() {
        info!("No services found, nothing to build");
        return Ok(MatrixOutput::new(Vec::new()));
    }

    let changed = changed_dirs(source, base, head)?;
    let selected = select_services(services, &changed);

    info!(
        "Selected {} of {} service(s): {}",
        selected.len(),
        services.len(),
        selected
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(MatrixOutput::new(selected))
}
