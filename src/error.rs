//! Error contract shared by every capability port.

use std::io;
use std::path::{Path, PathBuf};

/// Failure of a capability call.
///
/// Filesystem failures are [`RuntimeError::Io`] and subprocess start failures
/// are [`RuntimeError::Exec`]. A child that runs and exits non-zero is not an
/// error.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// A filesystem operation failed.
    #[error("{op} {}: {source}", path.display())]
    Io {
        /// Operation name (`read_file`, `mkdir`, ...).
        op: String,
        /// Path the operation was applied to.
        path: PathBuf,
        /// Underlying platform error.
        source: io::Error,
    },

    /// A subprocess could not be started.
    #[error("failed to start `{program}`: {source}")]
    Exec {
        /// Program that was requested.
        program: String,
        /// Underlying platform error.
        source: io::Error,
    },

    /// A cassette could not be loaded, written, or decoded.
    #[error("cassette: {0}")]
    Cassette(String),
}

impl RuntimeError {
    /// Builds an [`RuntimeError::Io`] for `op` on `path`.
    pub fn io(op: impl Into<String>, path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            op: op.into(),
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Builds an [`RuntimeError::Exec`] for `program`.
    pub fn exec(program: impl Into<String>, source: io::Error) -> Self {
        Self::Exec {
            program: program.into(),
            source,
        }
    }

    /// Returns `true` for filesystem failures.
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns `true` for subprocess start failures.
    #[must_use]
    pub fn is_exec(&self) -> bool {
        matches!(self, Self::Exec { .. })
    }
}
