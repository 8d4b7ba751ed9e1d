//! Replaying adapter for the `ProcessRunner` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::recorded::RecordedRun;
use crate::cassette::replayer::CassetteReplayer;
use crate::error::RuntimeError;
use crate::ports::exec::{ExecOptions, ProcessRunner, RunResult};
use crate::ports::PortFuture;

/// Replays recorded subprocess results from a cassette.
pub struct ReplayingProcessRunner {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingProcessRunner {
    /// Creates a new replaying process runner from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self {
            replayer: Mutex::new(replayer),
        }
    }
}

impl ProcessRunner for ReplayingProcessRunner {
    fn exec<'a>(
        &'a self,
        _command: &'a [String],
        _options: ExecOptions,
    ) -> PortFuture<'a, Result<RunResult, RuntimeError>> {
        let output = next_output(&self.replayer, "exec", "exec");
        Box::pin(async move {
            let recorded: RecordedRun = replay_result(output, "exec::exec")?;
            RunResult::try_from(recorded)
        })
    }
}
