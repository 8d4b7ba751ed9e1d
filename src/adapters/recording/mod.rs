//! Recording adapters that capture interactions to cassettes.

pub mod cwd;
pub mod env;
pub mod exec;
pub mod filesystem;

pub use cwd::RecordingWorkingDirectory;
pub use env::RecordingEnvironment;
pub use exec::RecordingProcessRunner;
pub use filesystem::RecordingFileSystem;

use serde::Serialize;

use crate::cassette::recorded::RecordedError;
use crate::cassette::session::SharedRecorder;
use crate::error::RuntimeError;

/// Record an interaction whose output is stored as-is.
///
/// Mirror of `replaying::next_output`.
pub(crate) fn record_interaction<I, O>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize + ?Sized,
    O: Serialize + ?Sized,
{
    let input_json = serde_json::to_value(input).expect("failed to serialize recording input");
    let output_json =
        serde_json::to_value(output).expect("failed to serialize recording output");

    let mut guard = recorder.lock().expect("recorder lock poisoned");
    guard.record(port, method, input_json, output_json);
}

/// Record a fallible interaction as `{"Ok": value}` or `{"Err": RecordedError}`.
///
/// Mirror of `replaying::replay_result`. Callers map the success value to
/// its recorded form first (e.g. bytes to base64).
pub(crate) fn record_result<T, I>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    result: Result<T, &RuntimeError>,
) where
    T: Serialize,
    I: Serialize + ?Sized,
{
    let recorded: Result<T, RecordedError> = result.map_err(RecordedError::from);
    record_interaction(recorder, port, method, input, &recorded);
}
