//! Recording adapter for the `WorkingDirectory` port.

use std::path::PathBuf;

use super::record_result;
use crate::cassette::recorded::encode_path;
use crate::cassette::session::SharedRecorder;
use crate::error::RuntimeError;
use crate::ports::cwd::WorkingDirectory;

/// Records working-directory queries while delegating to an inner implementation.
pub struct RecordingWorkingDirectory {
    inner: Box<dyn WorkingDirectory>,
    recorder: SharedRecorder,
}

impl RecordingWorkingDirectory {
    /// Creates a new recording working directory wrapping the given implementation.
    pub fn new(inner: Box<dyn WorkingDirectory>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl WorkingDirectory for RecordingWorkingDirectory {
    fn cwd(&self) -> Result<PathBuf, RuntimeError> {
        let result = self.inner.cwd();
        let recorded = result.as_ref().map(|path| encode_path(path));
        record_result(&self.recorder, "cwd", "cwd", &(), recorded);
        result
    }
}
