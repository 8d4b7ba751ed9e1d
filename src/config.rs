//! Runtime configuration read from environment variables.

use std::path::PathBuf;

use crate::adapters::live::LiveEnvironment;
use crate::error::RuntimeError;
use crate::ports::env::Environment;

/// Directory for per-port recording cassettes.
pub const RECORD_VAR: &str = "HOST_RUNTIME_RECORD";
/// Monolithic cassette to replay instead of touching the host.
pub const REPLAY_VAR: &str = "HOST_RUNTIME_REPLAY";
/// Prefix for directories created by `make_temp_file`.
pub const TEMP_PREFIX_VAR: &str = "HOST_RUNTIME_TEMP_PREFIX";

/// Prefix used when [`TEMP_PREFIX_VAR`] is unset.
pub const DEFAULT_TEMP_PREFIX: &str = "host-runtime-";

/// How a [`HostRuntime`](crate::runtime::HostRuntime) is wired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Prefix for temp directory names.
    pub temp_prefix: String,
    /// Record every interaction into this (new) directory.
    pub record_dir: Option<PathBuf>,
    /// Replay this cassette instead of using the host.
    pub replay_cassette: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            temp_prefix: DEFAULT_TEMP_PREFIX.to_string(),
            record_dir: None,
            replay_cassette: None,
        }
    }
}

impl RuntimeConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if recording and replay are both requested.
    pub fn from_env() -> Result<Self, RuntimeError> {
        Self::from_environment(&LiveEnvironment)
    }

    /// Reads the configuration through any [`Environment`].
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if recording and replay are both requested.
    pub fn from_environment(env: &dyn Environment) -> Result<Self, RuntimeError> {
        let read = |name: &str| env.get(name).filter(|value| !value.is_empty());

        let config = Self {
            temp_prefix: read(TEMP_PREFIX_VAR)
                .unwrap_or_else(|| DEFAULT_TEMP_PREFIX.to_string()),
            record_dir: read(RECORD_VAR).map(PathBuf::from),
            replay_cassette: read(REPLAY_VAR).map(PathBuf::from),
        };
        if config.record_dir.is_some() && config.replay_cassette.is_some() {
            return Err(RuntimeError::Cassette(format!(
                "{RECORD_VAR} and {REPLAY_VAR} cannot both be set"
            )));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    struct MapEnvironment(HashMap<&'static str, &'static str>);

    impl Environment for MapEnvironment {
        fn get(&self, name: &str) -> Option<String> {
            self.0.get(name).map(ToString::to_string)
        }
    }

    fn env(pairs: &[(&'static str, &'static str)]) -> MapEnvironment {
        MapEnvironment(pairs.iter().copied().collect())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = RuntimeConfig::from_environment(&env(&[])).unwrap();

        assert_eq!(config, RuntimeConfig::default());
        assert_eq!(config.temp_prefix, "host-runtime-");
    }

    #[test]
    fn reads_all_variables() {
        let config = RuntimeConfig::from_environment(&env(&[
            (TEMP_PREFIX_VAR, "render-"),
            (RECORD_VAR, "/tmp/rec"),
        ]))
        .unwrap();

        assert_eq!(config.temp_prefix, "render-");
        assert_eq!(config.record_dir, Some(PathBuf::from("/tmp/rec")));
        assert_eq!(config.replay_cassette, None);
    }

    #[test]
    fn empty_values_are_ignored() {
        let blank = env(&[(TEMP_PREFIX_VAR, ""), (REPLAY_VAR, "")]);
        let config = RuntimeConfig::from_environment(&blank).unwrap();

        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn record_and_replay_are_exclusive() {
        let err = RuntimeConfig::from_environment(&env(&[
            (RECORD_VAR, "/tmp/rec"),
            (REPLAY_VAR, "/tmp/run.yaml"),
        ]))
        .unwrap_err();

        assert!(err.to_string().contains("cannot both be set"));
    }
}
