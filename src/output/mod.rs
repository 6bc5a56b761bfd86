//! Step output sink
//!
//! Outputs are appended to the file named by `GITHUB_OUTPUT` as
//! `key=value` lines, or `key<<EOF` blocks for multi-line values. Without
//! a sink the same text goes to stdout.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::output::DELIMITER;

#[cfg(test)]
mod tests;

pub struct OutputSink {
    path: Option<PathBuf>,
}

impl OutputSink {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write a single-line output
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.append(&format_line(key, value))
    }

    /// Write `lines` joined by newlines. An empty list writes `key=`.
    pub fn set_lines(&self, key: &str, lines: &[String]) -> Result<()> {
        self.append(&format_lines(key, lines))
    }

    fn append(&self, text: &str) -> Result<()> {
        match &self.path {
            Some(path) => {
                debug!("Appending to {}: {}", path.display(), text.trim_end());
                let mut file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("Failed to open output file: {}", path.display()))?;
                file.write_all(text.as_bytes())
                    .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(text.as_bytes())
                    .context("Failed to write to stdout")?;
            }
        }
        Ok(())
    }
}

pub fn format_line(key: &str, value: &str) -> String {
    format!("{}={}\n", key, value)
}

pub fn format_lines(key: &str, lines: &[String]) -> String {
    if lines.is_empty() {
        return format_line(key, "");
    }
    format!(
        "{key}<<{delim}\n{body}\n{delim}\n",
        key = key,
        delim = DELIMITER,
        body = lines.join("\n")
    )
}
