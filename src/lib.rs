//! Host capability adapter for rendering engines.
//!
//! A rendering engine needs a handful of host services: byte-level file
//! access, environment lookups, subprocess execution and the working
//! directory. [`HostRuntime`] exposes them as four port traits
//! ([`FileSystem`], [`Environment`], [`ProcessRunner`],
//! [`WorkingDirectory`]) backed by the live adapters in
//! [`adapters::live`], or by cassette record/replay decorators for
//! deterministic tests.
//!
//! ```no_run
//! # async fn demo() -> Result<(), host_runtime::RuntimeError> {
//! use host_runtime::{ExecOptions, HostRuntime};
//!
//! let runtime = HostRuntime::live();
//! let command = vec!["echo".to_string(), "hello".to_string()];
//! let run = runtime.exec.exec(&command, ExecOptions::default()).await?;
//! assert_eq!(run.exit_code, 0);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cassette;
pub mod config;
pub mod error;
pub mod ports;
pub mod runtime;

pub use config::RuntimeConfig;
pub use error::RuntimeError;
pub use ports::{
    Environment, ExecOptions, FileSystem, MkdirOptions, ProcessRunner, RunResult, Stat,
    TempFileOptions, WorkingDirectory,
};
pub use runtime::HostRuntime;
