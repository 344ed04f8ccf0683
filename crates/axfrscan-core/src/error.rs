use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for axfrscan operations
pub type Result<T> = std::result::Result<T, AxfrError>;

/// Errors that stop a scan before it starts.
///
/// Per-query failures never surface here; they are folded into the
/// scan as "no result for this pair".
#[derive(Error, Debug)]
pub enum AxfrError {
    /// A required external tool could not be executed
    #[error("required tool '{tool}' not found: {hint}")]
    MissingTool {
        /// Name of the binary that was looked for
        tool: String,
        /// Installation hint shown to the user
        hint: String,
    },

    /// The target list file does not exist or cannot be read
    #[error("target file not found: {}", path.display())]
    TargetFile {
        /// Path supplied by the user
        path: PathBuf,
    },

    /// No target was supplied at all
    #[error("no targets supplied")]
    NoTargets,

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// DNS query failed in a way that cannot be skipped
    #[error("DNS query failed: {0}")]
    Dns(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AxfrError {
    /// Returns true if showing usage text would help the user
    #[must_use]
    pub const fn wants_usage(&self) -> bool {
        matches!(self, Self::NoTargets)
    }
}
