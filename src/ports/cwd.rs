//! Working-directory port.

use std::path::PathBuf;

use crate::error::RuntimeError;

/// Reports the process working directory.
pub trait WorkingDirectory: Send + Sync {
    /// Returns the current working directory at call time.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Io`] if the platform cannot report it, for
    /// example when the directory has been deleted.
    fn cwd(&self) -> Result<PathBuf, RuntimeError>;
}
