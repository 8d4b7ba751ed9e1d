//! Replaying adapter for the `WorkingDirectory` port.

use std::path::PathBuf;
use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::RuntimeError;
use crate::ports::cwd::WorkingDirectory;

/// Replays recorded working-directory queries from a cassette.
pub struct ReplayingWorkingDirectory {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingWorkingDirectory {
    /// Creates a new replaying working directory from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self {
            replayer: Mutex::new(replayer),
        }
    }
}

impl WorkingDirectory for ReplayingWorkingDirectory {
    fn cwd(&self) -> Result<PathBuf, RuntimeError> {
        replay_result(next_output(&self.replayer, "cwd", "cwd"), "cwd::cwd")
    }
}
