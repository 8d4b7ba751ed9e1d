//! Recording session managing per-port cassette recorders.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;
use crate::error::RuntimeError;

/// Recorder shared between a recording adapter and its session.
pub type SharedRecorder = Arc<Mutex<CassetteRecorder>>;

/// Owns one `CassetteRecorder` per port for a recording session.
///
/// Every port writes `<port>.cassette.yaml` into the session directory,
/// which is the layout [`CassetteConfig::from_session_dir`] reads back.
///
/// [`CassetteConfig::from_session_dir`]: super::config::CassetteConfig::from_session_dir
pub struct RecordingSession {
    /// Recorder for filesystem interactions.
    pub fs: SharedRecorder,
    /// Recorder for environment interactions.
    pub env: SharedRecorder,
    /// Recorder for process execution interactions.
    pub exec: SharedRecorder,
    /// Recorder for working-directory interactions.
    pub cwd: SharedRecorder,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Create a session writing into `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if `output_dir` already exists or cannot be created.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self, RuntimeError> {
        let output_dir = output_dir.into();
        if let Some(parent) = output_dir.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|source| RuntimeError::io("create_cassette_dir", parent, source))?;
        }
        std::fs::create_dir(&output_dir).map_err(|source| {
            if source.kind() == io::ErrorKind::AlreadyExists {
                RuntimeError::Cassette(format!(
                    "cassette directory already exists: {}",
                    output_dir.display()
                ))
            } else {
                RuntimeError::io("create_cassette_dir", &output_dir, source)
            }
        })?;

        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let make_recorder = |port: &str| -> SharedRecorder {
            let path = output_dir.join(format!("{port}.cassette.yaml"));
            let name = format!("{timestamp}-{port}");
            Arc::new(Mutex::new(CassetteRecorder::new(path, name)))
        };

        Ok(Self {
            fs: make_recorder("fs"),
            env: make_recorder("env"),
            exec: make_recorder("exec"),
            cwd: make_recorder("cwd"),
            output_dir,
        })
    }

    /// Directory the cassettes are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write every port's cassette and return the session directory.
    ///
    /// Adapters holding the recorders must be dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if a recorder is still shared or a file cannot be written.
    pub fn finish(self) -> Result<PathBuf, RuntimeError> {
        fn finish_one(recorder: SharedRecorder, port: &str) -> Result<(), RuntimeError> {
            let recorder = Arc::try_unwrap(recorder)
                .map_err(|_| {
                    RuntimeError::Cassette(format!("recording adapter for {port} is still alive"))
                })?
                .into_inner()
                .map_err(|e| {
                    RuntimeError::Cassette(format!("recorder for {port} poisoned: {e}"))
                })?;
            recorder.finish()?;
            Ok(())
        }

        finish_one(self.fs, "fs")?;
        finish_one(self.env, "env")?;
        finish_one(self.exec, "exec")?;
        finish_one(self.cwd, "cwd")?;

        tracing::info!(dir = %self.output_dir.display(), "recording saved");
        Ok(self.output_dir)
    }
}
