//! Live adapters that talk to the host platform.

pub mod cwd;
pub mod env;
pub mod exec;
pub mod filesystem;

pub use cwd::LiveWorkingDirectory;
pub use env::LiveEnvironment;
pub use exec::LiveProcessRunner;
pub use filesystem::LiveFileSystem;
