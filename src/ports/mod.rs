//! Port traits defining the host capability boundary.
//!
//! Each trait is one capability the rendering engine consumes (filesystem,
//! environment, subprocess execution, working directory). Implementations
//! live in `src/adapters/`.

pub mod cwd;
pub mod env;
pub mod exec;
pub mod filesystem;

use std::future::Future;
use std::pin::Pin;

pub use cwd::WorkingDirectory;
pub use env::Environment;
pub use exec::{ExecOptions, ProcessRunner, RunResult};
pub use filesystem::{FileSystem, MkdirOptions, Stat, TempFileOptions};

/// Boxed future returned by async port methods, keeping the traits dyn-compatible.
pub type PortFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
