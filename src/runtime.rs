//! Host runtime bundling one trait object per capability port.

use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::adapters::live::{
    LiveEnvironment, LiveFileSystem, LiveProcessRunner, LiveWorkingDirectory,
};
use crate::adapters::recording::{
    RecordingEnvironment, RecordingFileSystem, RecordingProcessRunner, RecordingWorkingDirectory,
};
use crate::adapters::replaying::{
    ReplayingEnvironment, ReplayingFileSystem, ReplayingProcessRunner, ReplayingWorkingDirectory,
};
use crate::cassette::config::CassetteConfig;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::RuntimeConfig;
use crate::error::RuntimeError;
use crate::ports::{
    Environment, ExecOptions, FileSystem, MkdirOptions, PortFuture, ProcessRunner, RunResult,
    Stat, TempFileOptions, WorkingDirectory,
};

/// The capability interface handed to a rendering engine.
///
/// Each field provides one host capability. Constructors wire up live,
/// recording, or replaying adapters.
pub struct HostRuntime {
    /// Filesystem access.
    pub fs: Box<dyn FileSystem>,
    /// Environment variable lookup.
    pub env: Box<dyn Environment>,
    /// Subprocess execution.
    pub exec: Box<dyn ProcessRunner>,
    /// Working-directory query.
    pub cwd: Box<dyn WorkingDirectory>,
}

impl HostRuntime {
    /// Creates a runtime backed by the host platform with default settings.
    #[must_use]
    pub fn live() -> Self {
        Self::live_with(&RuntimeConfig::default())
    }

    /// Creates a runtime backed by the host platform.
    ///
    /// Only `temp_prefix` is used; see [`HostRuntime::from_config`] for the
    /// cassette settings.
    #[must_use]
    pub fn live_with(config: &RuntimeConfig) -> Self {
        Self {
            fs: Box::new(LiveFileSystem::with_temp_prefix(config.temp_prefix.clone())),
            env: Box::new(LiveEnvironment),
            exec: Box::new(LiveProcessRunner),
            cwd: Box::new(LiveWorkingDirectory),
        }
    }

    /// Creates a live runtime that records every interaction into `output_dir`.
    ///
    /// Drop the runtime, then call [`RecordingSession::finish`] to write the
    /// cassettes.
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory exists or cannot be created.
    pub fn recording_at(
        output_dir: impl Into<PathBuf>,
    ) -> Result<(Self, RecordingSession), RuntimeError> {
        Self::recording_with(output_dir, &RuntimeConfig::default())
    }

    fn recording_with(
        output_dir: impl Into<PathBuf>,
        config: &RuntimeConfig,
    ) -> Result<(Self, RecordingSession), RuntimeError> {
        let session = RecordingSession::new(output_dir)?;
        let live = Self::live_with(config);
        let runtime = Self {
            fs: Box::new(RecordingFileSystem::new(live.fs, session.fs.clone())),
            env: Box::new(RecordingEnvironment::new(live.env, session.env.clone())),
            exec: Box::new(RecordingProcessRunner::new(live.exec, session.exec.clone())),
            cwd: Box::new(RecordingWorkingDirectory::new(live.cwd, session.cwd.clone())),
        };
        Ok((runtime, session))
    }

    /// Creates a replaying runtime from one cassette holding every port.
    ///
    /// Each port gets its own replayer so per-port cursors are independent.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, RuntimeError> {
        let cassette = CassetteConfig::load_cassette(path)?;
        let replayer = || CassetteReplayer::new(&cassette);
        Ok(Self {
            fs: Box::new(ReplayingFileSystem::new(replayer())),
            env: Box::new(ReplayingEnvironment::new(replayer())),
            exec: Box::new(ReplayingProcessRunner::new(replayer())),
            cwd: Box::new(ReplayingWorkingDirectory::new(replayer())),
        })
    }

    /// Creates a replaying runtime from per-port cassette files.
    ///
    /// Ports without a cassette panic with a clear message when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, RuntimeError> {
        let replayers = config.load_all()?;

        Ok(Self {
            fs: match replayers.fs {
                Some(r) => Box::new(ReplayingFileSystem::new(r)),
                None => Box::new(UnconfiguredPort),
            },
            env: match replayers.env {
                Some(r) => Box::new(ReplayingEnvironment::new(r)),
                None => Box::new(UnconfiguredPort),
            },
            exec: match replayers.exec {
                Some(r) => Box::new(ReplayingProcessRunner::new(r)),
                None => Box::new(UnconfiguredPort),
            },
            cwd: match replayers.cwd {
                Some(r) => Box::new(ReplayingWorkingDirectory::new(r)),
                None => Box::new(UnconfiguredPort),
            },
        })
    }

    /// Wires the runtime described by `config`: replaying, recording, or live.
    ///
    /// The returned session is `Some` only when recording.
    ///
    /// # Errors
    ///
    /// Returns an error if a cassette cannot be loaded or the recording
    /// directory cannot be created.
    pub fn from_config(
        config: &RuntimeConfig,
    ) -> Result<(Self, Option<RecordingSession>), RuntimeError> {
        if let Some(path) = &config.replay_cassette {
            tracing::debug!(cassette = %path.display(), "replaying host interactions");
            return Ok((Self::replaying(path)?, None));
        }
        if let Some(dir) = &config.record_dir {
            tracing::debug!(dir = %dir.display(), "recording host interactions");
            let (runtime, session) = Self::recording_with(dir.clone(), config)?;
            return Ok((runtime, Some(session)));
        }
        Ok((Self::live_with(config), None))
    }
}

// --- Panicking adapter for ports without a cassette ---

struct UnconfiguredPort;

impl UnconfiguredPort {
    fn fail(port: &str) -> ! {
        panic!("{port} port not configured in CassetteConfig: no cassette loaded for {port}");
    }
}

impl FileSystem for UnconfiguredPort {
    fn read_file<'a>(&'a self, _path: &'a Path) -> PortFuture<'a, Result<Bytes, RuntimeError>> {
        Self::fail("fs")
    }
    fn write_file<'a>(
        &'a self,
        _path: &'a Path,
        _data: &'a [u8],
    ) -> PortFuture<'a, Result<(), RuntimeError>> {
        Self::fail("fs")
    }
    fn stat<'a>(&'a self, _path: &'a Path) -> PortFuture<'a, Option<Stat>> {
        Self::fail("fs")
    }
    fn mkdir<'a>(
        &'a self,
        _path: &'a Path,
        _options: MkdirOptions,
    ) -> PortFuture<'a, Result<(), RuntimeError>> {
        Self::fail("fs")
    }
    fn remove<'a>(&'a self, _path: &'a Path) -> PortFuture<'a, ()> {
        Self::fail("fs")
    }
    fn make_temp_file(
        &self,
        _options: TempFileOptions,
    ) -> PortFuture<'_, Result<PathBuf, RuntimeError>> {
        Self::fail("fs")
    }
}

impl Environment for UnconfiguredPort {
    fn get(&self, _name: &str) -> Option<String> {
        Self::fail("env")
    }
}

impl ProcessRunner for UnconfiguredPort {
    fn exec<'a>(
        &'a self,
        _command: &'a [String],
        _options: ExecOptions,
    ) -> PortFuture<'a, Result<RunResult, RuntimeError>> {
        Self::fail("exec")
    }
}

impl WorkingDirectory for UnconfiguredPort {
    fn cwd(&self) -> Result<PathBuf, RuntimeError> {
        Self::fail("cwd")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn write_cassette(path: &Path, interactions: Vec<Interaction>) {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            platform: "linux".into(),
            interactions,
        };
        let yaml = serde_yaml::to_string(&cassette).unwrap();
        std::fs::write(path, yaml).unwrap();
    }

    #[test]
    fn replaying_runtime_from_monolithic_cassette() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("full.cassette.yaml");
        write_cassette(
            &path,
            vec![
                Interaction {
                    seq: 0,
                    port: "cwd".into(),
                    method: "cwd".into(),
                    input: json!(null),
                    output: json!({"Ok": "/srv/docs"}),
                },
                Interaction {
                    seq: 1,
                    port: "env".into(),
                    method: "get".into(),
                    input: json!({"name": "LANG"}),
                    output: json!("en_US.UTF-8"),
                },
            ],
        );

        let runtime = HostRuntime::replaying(&path).unwrap();
        assert_eq!(runtime.cwd.cwd().unwrap(), PathBuf::from("/srv/docs"));
        assert_eq!(runtime.env.get("LANG").as_deref(), Some("en_US.UTF-8"));
    }

    #[test]
    #[should_panic(expected = "not configured in CassetteConfig")]
    fn unspecified_port_panics_with_clear_message() {
        let runtime = HostRuntime::replaying_from(&CassetteConfig::default()).unwrap();
        let _ = runtime.cwd.cwd();
    }

    #[test]
    fn from_config_defaults_to_live() {
        let config = RuntimeConfig::default();
        let (runtime, session) = HostRuntime::from_config(&config).unwrap();

        assert!(session.is_none());
        let expected = std::env::current_dir().unwrap();
        assert_eq!(runtime.cwd.cwd().unwrap(), expected);
    }

    #[test]
    fn from_config_records_into_requested_directory() {
        let root = tempfile::tempdir().unwrap();
        let config = RuntimeConfig {
            record_dir: Some(root.path().join("rec")),
            ..RuntimeConfig::default()
        };

        let (runtime, session) = HostRuntime::from_config(&config).unwrap();
        let session = session.expect("recording session");
        let _ = runtime.env.get("PATH");
        drop(runtime);

        let dir = session.finish().unwrap();
        let cassette_path = dir.join("env.cassette.yaml");
        let env_cassette = std::fs::read_to_string(cassette_path).unwrap();
        assert!(env_cassette.contains("PATH"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn recording_tolerates_non_utf8_paths() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let root = tempfile::tempdir().unwrap();
        let bad = root.path().join(OsStr::from_bytes(b"bad\xff"));
        let (runtime, session) = HostRuntime::recording_at(root.path().join("rec")).unwrap();

        assert_eq!(runtime.fs.stat(&bad).await, None);
        runtime.fs.remove(&bad).await;
        drop(runtime);

        let dir = session.finish().unwrap();
        let config = CassetteConfig::from_session_dir(&dir);
        let replaying = HostRuntime::replaying_from(&config).unwrap();
        assert_eq!(replaying.fs.stat(&bad).await, None);
        replaying.fs.remove(&bad).await;
    }
}
