/// Platform constants for container images
pub mod platform {
    /// Linux AMD64 platform identifier
    pub const LINUX_AMD64: &str = "linux/amd64";
}

/// Service descriptor constants
pub mod service {
    /// File that marks a directory as a buildable service
    pub const DESCRIPTOR_FILE: &str = "service.json";

    /// Dockerfile name used when the descriptor does not override it
    pub const DEFAULT_DOCKERFILE: &str = "Dockerfile";
}

/// Git constants
pub mod git {
    /// Revision reported by CI when no previous commit exists
    pub const ZERO_SHA: &str = "0000000000000000000000000000000000000000";

    /// Revision diffed against when none is given
    pub const DEFAULT_HEAD: &str = "HEAD";

    /// Remote fetched from when none is configured
    pub const DEFAULT_REMOTE: &str = "origin";

    /// Top-level entries that never count as a change.
    /// Matched exactly and case-sensitively.
    pub const IGNORED_TOP_LEVEL: &[&str] = &["README", "README.md"];
}

/// CI environment variable names
pub mod env {
    /// Append-only file receiving step outputs
    pub const OUTPUT: &str = "GITHUB_OUTPUT";

    /// Name of the event that triggered the workflow
    pub const EVENT_NAME: &str = "EVENT_NAME";

    /// Base commit of a pull request
    pub const PR_BASE_SHA: &str = "PR_BASE_SHA";

    /// Commit the branch pointed at before a push
    pub const BEFORE_SHA: &str = "BEFORE_SHA";
}

/// Step output keys
pub mod output {
    pub const MATRIX: &str = "matrix";
    pub const HAS_WORK: &str = "has_work";
    pub const EXTRA_TAGS: &str = "extra_tags";

    /// Heredoc marker for multi-line values
    pub const DELIMITER: &str = "EOF";
}
