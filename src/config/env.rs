//! CI environment captured once at startup
//!
//! Components never read process environment directly; they receive a
//! [`CiEnv`] so tests can build one from a plain map.

use std::path::PathBuf;

use crate::constants::env;

/// Values the workflow passes in through the environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CiEnv {
    /// Append-only step output file
    pub output_path: Option<PathBuf>,
    /// Event that triggered the run (`push`, `pull_request`, ...)
    pub event_name: Option<String>,
    pub pr_base_sha: Option<String>,
    pub before_sha: Option<String>,
}

impl CiEnv {
    /// Capture the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            output_path: get(env::OUTPUT).map(PathBuf::from),
            event_name: get(env::EVENT_NAME),
            pr_base_sha: get(env::PR_BASE_SHA),
            before_sha: get(env::BEFORE_SHA),
        }
    }

    pub fn is_pull_request(&self) -> bool {
        self.event_name.as_deref() == Some("pull_request")
    }

    /// Revision to diff against, selected by event type
    pub fn base_revision(&self) -> Option<&str> {
        let base = if self.is_pull_request() {
            self.pr_base_sha.as_deref()
        } else {
            self.before_sha.as_deref()
        };
        base.map(str::trim)
    }
}
