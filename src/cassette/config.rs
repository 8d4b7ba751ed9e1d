//! Cassette configuration for composable per-port replay.

use std::path::{Path, PathBuf};

use super::format::Cassette;
use super::replayer::CassetteReplayer;
use crate::error::RuntimeError;

/// Per-port cassette file paths. Ports without a path panic if called
/// during replay.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Cassette for the filesystem port.
    pub fs: Option<PathBuf>,
    /// Cassette for the environment port.
    pub env: Option<PathBuf>,
    /// Cassette for the process execution port.
    pub exec: Option<PathBuf>,
    /// Cassette for the working-directory port.
    pub cwd: Option<PathBuf>,
}

/// Per-port replayers, each with its own interaction stream.
#[derive(Debug)]
pub struct PortReplayers {
    /// Replayer for the filesystem port.
    pub fs: Option<CassetteReplayer>,
    /// Replayer for the environment port.
    pub env: Option<CassetteReplayer>,
    /// Replayer for the process execution port.
    pub exec: Option<CassetteReplayer>,
    /// Replayer for the working-directory port.
    pub cwd: Option<CassetteReplayer>,
}

impl CassetteConfig {
    /// Per-port layout written by a recording session into `dir`.
    #[must_use]
    pub fn from_session_dir(dir: &Path) -> Self {
        let path = |port: &str| Some(dir.join(format!("{port}.cassette.yaml")));
        Self {
            fs: path("fs"),
            env: path("env"),
            exec: path("exec"),
            cwd: path("cwd"),
        }
    }

    /// Read and parse one cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_cassette(path: &Path) -> Result<Cassette, RuntimeError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| RuntimeError::io("read_cassette", path, source))?;
        serde_yaml::from_str(&content).map_err(|e| {
            RuntimeError::Cassette(format!("failed to parse {}: {e}", path.display()))
        })
    }

    /// Load a cassette file and create a replayer over all its interactions.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_monolithic(path: &Path) -> Result<CassetteReplayer, RuntimeError> {
        Self::load_cassette(path).map(|cassette| CassetteReplayer::new(&cassette))
    }

    /// Load all configured per-port cassette files and create replayers.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, RuntimeError> {
        let load = |path: Option<&Path>| path.map(Self::load_monolithic).transpose();
        Ok(PortReplayers {
            fs: load(self.fs.as_deref())?,
            env: load(self.env.as_deref())?,
            exec: load(self.exec.as_deref())?,
            cwd: load(self.cwd.as_deref())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Interaction;
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
    fn load_per_port_cassettes() {
        let dir = tempfile::tempdir().unwrap();
        let env_path = dir.path().join("env.cassette.yaml");
        write_cassette(
            &env_path,
            vec![Interaction {
                seq: 0,
                port: "env".into(),
                method: "get".into(),
                input: json!({"name": "LANG"}),
                output: json!("C.UTF-8"),
            }],
        );

        let config = CassetteConfig {
            env: Some(env_path),
            ..CassetteConfig::default()
        };
        let mut replayers = config.load_all().unwrap();

        let env = replayers.env.as_mut().unwrap();
        assert_eq!(env.next_interaction("env", "get").output, json!("C.UTF-8"));
        assert!(replayers.fs.is_none());
        assert!(replayers.exec.is_none());
        assert!(replayers.cwd.is_none());
    }

    #[test]
    fn session_dir_layout_names_every_port() {
        let config = CassetteConfig::from_session_dir(Path::new("/rec"));

        assert_eq!(
            config.fs.as_deref(),
            Some(Path::new("/rec/fs.cassette.yaml"))
        );
        assert_eq!(
            config.exec.as_deref(),
            Some(Path::new("/rec/exec.cassette.yaml"))
        );
    }

    #[test]
    fn missing_cassette_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        let err = CassetteConfig::load_monolithic(&path).unwrap_err();

        assert!(err.is_io());
    }

    #[test]
    fn malformed_cassette_is_cassette_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "interactions: [unterminated").unwrap();

        let err = CassetteConfig::load_monolithic(&path).unwrap_err();
        assert!(matches!(err, RuntimeError::Cassette(_)));
    }
}
