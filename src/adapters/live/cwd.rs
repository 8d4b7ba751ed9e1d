//! Live working-directory adapter.

use std::path::PathBuf;

use crate::error::RuntimeError;
use crate::ports::cwd::WorkingDirectory;

/// Reports the real working directory of this process.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveWorkingDirectory;

impl WorkingDirectory for LiveWorkingDirectory {
    fn cwd(&self) -> Result<PathBuf, RuntimeError> {
        std::env::current_dir()
            .map_err(|source| RuntimeError::io("cwd", ".", source))
    }
}
