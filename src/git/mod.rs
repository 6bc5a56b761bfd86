use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;


/// Where the set of changed files comes from
pub trait ChangeSource {
    /// Make `revision` available locally
    fn fetch(&self, revision: &str) -> Result<()>;

    /// Paths changed on `head` since it diverged from `base`
    fn changed_files(&self, base: &str, head: &str) -> Result<Vec<String>>;

    /// Every path under version control
    fn tracked_files(&self) -> Result<Vec<String>>;
}

/// [`ChangeSource`] backed by the `git` executable
pub struct Git {
    root: PathBuf,
    remote: String,
}

impl Git {
    pub fn new(root: impl AsRef<Path>, remote: &str) -> Result<Self> {
        which::which("git")
            .context("The `git` command is required but not available on your system")?;

        Ok(Self {
            root: root.as_ref().to_path_buf(),
            remote: remote.to_string(),
        })
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new("git");
        cmd.arg("-C").arg(&self.root).args(args);

        debug!("Running command: {:?}", cmd);
        let output = cmd.output().context("Failed to execute git")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!("git {} failed: {}", args.join(" "), stderr.trim());
            anyhow::bail!("git {} failed: {}", args.join(" "), stderr.trim());
        }

        String::from_utf8(output.stdout).context("git produced non UTF-8 output")
    }
}

impl ChangeSource for Git {
    fn fetch(&self, revision: &str) -> Result<()> {
        self.run(&["fetch", "--no-tags", "--depth=1", self.remote.as_str(), revision])?;
        Ok(())
    }

    fn changed_files(&self, base: &str, head: &str) -> Result<Vec<String>> {
        let range = format!("{}...{}", base, head);
        let stdout = self.run(&["diff", "--name-only", range.as_str()])?;
        Ok(parse_paths(&stdout))
    }

    fn tracked_files(&self) -> Result<Vec<String>> {
        let stdout = self.run(&["ls-files"])?;
        Ok(parse_paths(&stdout))
    }
}

/// One path per non-empty line
pub fn parse_paths(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
