//! Process execution port for running external programs.

use std::path::PathBuf;

use bytes::Bytes;

use super::PortFuture;
use crate::error::RuntimeError;

/// Outcome of a subprocess that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    /// Exit code, or `1` when the process ended without one (e.g. a signal).
    pub exit_code: i32,
    /// Captured standard output; `None` when nothing was written.
    pub stdout: Option<Bytes>,
    /// Captured standard error; `None` when nothing was written.
    pub stderr: Option<Bytes>,
}

impl RunResult {
    /// Returns `true` when the exit code is zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Options for [`ProcessRunner::exec`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOptions {
    /// Working directory for the child; the current directory when unset.
    pub cwd: Option<PathBuf>,
}

impl ExecOptions {
    /// Options running the child in `cwd`.
    pub fn in_dir(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(cwd.into()),
        }
    }
}

/// Runs external programs and buffers their output.
pub trait ProcessRunner: Send + Sync {
    /// Runs `command[0]` with `command[1..]` as arguments, without a shell,
    /// and waits for it to exit.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Exec`] if the command is empty or the process
    /// cannot be started. A non-zero exit code is returned as a normal result.
    fn exec<'a>(
        &'a self,
        command: &'a [String],
        options: ExecOptions,
    ) -> PortFuture<'a, Result<RunResult, RuntimeError>>;
}
