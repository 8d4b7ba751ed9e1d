//! Serde mirrors for values that do not serialize cleanly on their own.
//!
//! Byte buffers are stored as base64 strings, paths as lossy UTF-8 strings
//! and errors as [`RecordedError`].
//! Fallible results use serde's `{"Ok": ..}` / `{"Err": ..}` encoding.

use std::io;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::RuntimeError;
use crate::ports::exec::RunResult;

/// Encodes bytes for storage in a cassette.
#[must_use]
pub fn encode_bytes(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decodes bytes stored by [`encode_bytes`].
///
/// # Errors
///
/// Returns [`RuntimeError::Cassette`] if `encoded` is not valid base64.
pub fn decode_bytes(encoded: &str) -> Result<Bytes, RuntimeError> {
    STANDARD
        .decode(encoded)
        .map(Bytes::from)
        .map_err(|e| RuntimeError::Cassette(format!("invalid base64 payload: {e}")))
}

/// Encodes a path for storage in a cassette.
///
/// Non-UTF-8 components are replaced with U+FFFD so recording never fails.
#[must_use]
pub fn encode_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// [`io::ErrorKind`] as stored in a cassette.
///
/// Kinds without a variant here are recorded as [`RecordedErrorKind::Other`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordedErrorKind {
    /// [`io::ErrorKind::NotFound`].
    NotFound,
    /// [`io::ErrorKind::PermissionDenied`].
    PermissionDenied,
    /// [`io::ErrorKind::AlreadyExists`].
    AlreadyExists,
    /// [`io::ErrorKind::InvalidInput`].
    InvalidInput,
    /// [`io::ErrorKind::InvalidData`].
    InvalidData,
    /// [`io::ErrorKind::Interrupted`].
    Interrupted,
    /// [`io::ErrorKind::UnexpectedEof`].
    UnexpectedEof,
    /// [`io::ErrorKind::Unsupported`].
    Unsupported,
    /// Any other kind.
    #[default]
    Other,
}

impl From<io::ErrorKind> for RecordedErrorKind {
    fn from(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::NotFound => Self::NotFound,
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            io::ErrorKind::AlreadyExists => Self::AlreadyExists,
            io::ErrorKind::InvalidInput => Self::InvalidInput,
            io::ErrorKind::InvalidData => Self::InvalidData,
            io::ErrorKind::Interrupted => Self::Interrupted,
            io::ErrorKind::UnexpectedEof => Self::UnexpectedEof,
            io::ErrorKind::Unsupported => Self::Unsupported,
            _ => Self::Other,
        }
    }
}

impl From<RecordedErrorKind> for io::ErrorKind {
    fn from(kind: RecordedErrorKind) -> Self {
        match kind {
            RecordedErrorKind::NotFound => Self::NotFound,
            RecordedErrorKind::PermissionDenied => Self::PermissionDenied,
            RecordedErrorKind::AlreadyExists => Self::AlreadyExists,
            RecordedErrorKind::InvalidInput => Self::InvalidInput,
            RecordedErrorKind::InvalidData => Self::InvalidData,
            RecordedErrorKind::Interrupted => Self::Interrupted,
            RecordedErrorKind::UnexpectedEof => Self::UnexpectedEof,
            RecordedErrorKind::Unsupported => Self::Unsupported,
            RecordedErrorKind::Other => Self::Other,
        }
    }
}

/// A [`RuntimeError`] as stored in a cassette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordedError {
    /// Recorded [`RuntimeError::Io`].
    Io {
        /// Operation name.
        op: String,
        /// Path the operation was applied to, as lossy UTF-8.
        path: String,
        /// Platform error kind.
        #[serde(default)]
        error_kind: RecordedErrorKind,
        /// Rendered platform error.
        message: String,
    },
    /// Recorded [`RuntimeError::Exec`].
    Exec {
        /// Program that failed to start.
        program: String,
        /// Platform error kind.
        #[serde(default)]
        error_kind: RecordedErrorKind,
        /// Rendered platform error.
        message: String,
    },
    /// Recorded [`RuntimeError::Cassette`].
    Cassette {
        /// Error message.
        message: String,
    },
}

impl From<&RuntimeError> for RecordedError {
    fn from(err: &RuntimeError) -> Self {
        match err {
            RuntimeError::Io { op, path, source } => Self::Io {
                op: op.clone(),
                path: encode_path(path),
                error_kind: source.kind().into(),
                message: source.to_string(),
            },
            RuntimeError::Exec { program, source } => Self::Exec {
                program: program.clone(),
                error_kind: source.kind().into(),
                message: source.to_string(),
            },
            RuntimeError::Cassette(message) => Self::Cassette {
                message: message.clone(),
            },
        }
    }
}

impl From<RecordedError> for RuntimeError {
    fn from(recorded: RecordedError) -> Self {
        match recorded {
            RecordedError::Io {
                op,
                path,
                error_kind,
                message,
            } => Self::Io {
                op,
                path: PathBuf::from(path),
                source: io::Error::new(error_kind.into(), message),
            },
            RecordedError::Exec {
                program,
                error_kind,
                message,
            } => Self::Exec {
                program,
                source: io::Error::new(error_kind.into(), message),
            },
            RecordedError::Cassette { message } => Self::Cassette(message),
        }
    }
}

/// A [`RunResult`] as stored in a cassette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedRun {
    /// Exit code.
    pub exit_code: i32,
    /// Base64 standard output, if any.
    pub stdout: Option<String>,
    /// Base64 standard error, if any.
    pub stderr: Option<String>,
}

impl From<&RunResult> for RecordedRun {
    fn from(run: &RunResult) -> Self {
        Self {
            exit_code: run.exit_code,
            stdout: run.stdout.as_deref().map(encode_bytes),
            stderr: run.stderr.as_deref().map(encode_bytes),
        }
    }
}

impl TryFrom<RecordedRun> for RunResult {
    type Error = RuntimeError;

    fn try_from(recorded: RecordedRun) -> Result<Self, Self::Error> {
        Ok(Self {
            exit_code: recorded.exit_code,
            stdout: recorded.stdout.as_deref().map(decode_bytes).transpose()?,
            stderr: recorded.stderr.as_deref().map(decode_bytes).transpose()?,
        })
    }
}
