//! Replaying adapters that serve recorded interactions.

pub mod cwd;
pub mod env;
pub mod exec;
pub mod filesystem;

pub use cwd::ReplayingWorkingDirectory;
pub use env::ReplayingEnvironment;
pub use exec::ReplayingProcessRunner;
pub use filesystem::ReplayingFileSystem;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::recorded::RecordedError;
use crate::cassette::replayer::CassetteReplayer;
use crate::error::RuntimeError;

/// Take the recorded output of the next `port`/`method` interaction.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    guard.next_interaction(port, method).output
}

/// Decode an output written by `recording::record_result`.
///
/// A malformed output is reported as [`RuntimeError::Cassette`].
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
    context: &str,
) -> Result<T, RuntimeError> {
    let recorded: Result<T, RecordedError> = serde_json::from_value(output)
        .map_err(|e| RuntimeError::Cassette(format!("{context}: malformed recorded output: {e}")))?;
    recorded.map_err(RuntimeError::from)
}

/// Decode an output written by `recording::record_interaction`.
///
/// # Panics
///
/// Panics if the output does not have the expected shape; the methods
/// using this have no error channel.
pub(crate) fn replay_value<T: DeserializeOwned>(output: serde_json::Value, context: &str) -> T {
    serde_json::from_value(output)
        .unwrap_or_else(|e| panic!("{context}: malformed recorded output: {e}"))
}
