//! Recording adapter for the `ProcessRunner` port.

use serde::Serialize;

use super::record_result;
use crate::cassette::recorded::{encode_path, RecordedRun};
use crate::cassette::session::SharedRecorder;
use crate::error::RuntimeError;
use crate::ports::exec::{ExecOptions, ProcessRunner, RunResult};
use crate::ports::PortFuture;

/// Records subprocess runs while delegating to an inner implementation.
pub struct RecordingProcessRunner {
    inner: Box<dyn ProcessRunner>,
    recorder: SharedRecorder,
}

impl RecordingProcessRunner {
    /// Creates a new recording process runner wrapping the given implementation.
    pub fn new(inner: Box<dyn ProcessRunner>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct CommandInput<'a> {
    command: &'a [String],
    cwd: Option<String>,
}

impl ProcessRunner for RecordingProcessRunner {
    fn exec<'a>(
        &'a self,
        command: &'a [String],
        options: ExecOptions,
    ) -> PortFuture<'a, Result<RunResult, RuntimeError>> {
        Box::pin(async move {
            let input = CommandInput {
                command,
                cwd: options.cwd.as_deref().map(encode_path),
            };
            let result = self.inner.exec(command, options).await;
            let recorded = result.as_ref().map(RecordedRun::from);
            record_result(&self.recorder, "exec", "exec", &input, recorded);
            result
        })
    }
}
