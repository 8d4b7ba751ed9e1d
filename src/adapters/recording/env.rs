//! Recording adapter for the `Environment` port.

use serde::Serialize;

use super::record_interaction;
use crate::cassette::session::SharedRecorder;
use crate::ports::env::Environment;

/// Records environment lookups while delegating to an inner implementation.
pub struct RecordingEnvironment {
    inner: Box<dyn Environment>,
    recorder: SharedRecorder,
}

impl RecordingEnvironment {
    /// Creates a new recording environment wrapping the given implementation.
    pub fn new(inner: Box<dyn Environment>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct NameInput<'a> {
    name: &'a str,
}

impl Environment for RecordingEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        let result = self.inner.get(name);
        let input = NameInput { name };
        record_interaction(&self.recorder, "env", "get", &input, &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::cassette::recorder::CassetteRecorder;

    struct FixedEnvironment;

    impl Environment for FixedEnvironment {
        fn get(&self, name: &str) -> Option<String> {
            (name == "THEME").then(|| "dark".to_string())
        }
    }

    #[test]
    fn records_present_and_absent_lookups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("env.cassette.yaml");

        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "test")));
        {
            let env = RecordingEnvironment::new(Box::new(FixedEnvironment), Arc::clone(&recorder));
            assert_eq!(env.get("THEME").as_deref(), Some("dark"));
            assert_eq!(env.get("MISSING"), None);
        }
        assert_eq!(recorder.lock().unwrap().len(), 2);

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("THEME"));
        assert!(content.contains("dark"));
        assert!(content.contains("MISSING"));
    }
}
