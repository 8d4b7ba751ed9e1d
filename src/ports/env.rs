//! Environment port for reading process environment variables.

/// Reads process environment variables.
pub trait Environment: Send + Sync {
    /// Returns the value of `name`, or `None` if it is unset.
    fn get(&self, name: &str) -> Option<String>;
}
