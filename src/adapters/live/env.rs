//! Live environment adapter reading the process environment.

use crate::ports::env::Environment;

/// Live environment that reads variables from the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveEnvironment;

impl Environment for LiveEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        // Names the platform cannot hold are never set.
        if name.is_empty() || name.contains(['=', '\0']) {
            return None;
        }
        std::env::var_os(name)
            .map(|value| value.to_string_lossy().into_owned())
    }
}
