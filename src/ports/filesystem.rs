//! Filesystem port for byte-level file access.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::PortFuture;
use crate::error::RuntimeError;

/// Type of an existing filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    /// The entry is a regular file.
    pub is_file: bool,
    /// The entry is a directory.
    pub is_directory: bool,
}

impl Stat {
    /// A regular file.
    pub const FILE: Self = Self {
        is_file: true,
        is_directory: false,
    };

    /// A directory.
    pub const DIRECTORY: Self = Self {
        is_file: false,
        is_directory: true,
    };
}

/// Options for [`FileSystem::mkdir`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MkdirOptions {
    /// Create missing ancestors and tolerate an existing directory.
    pub recursive: bool,
}

impl MkdirOptions {
    /// Options with `recursive` set.
    #[must_use]
    pub fn recursive() -> Self {
        Self { recursive: true }
    }
}

/// Options for [`FileSystem::make_temp_file`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TempFileOptions {
    /// Appended to the `tmp` file name, e.g. `".svg"`.
    pub suffix: Option<String>,
}

impl TempFileOptions {
    /// Options with the given file name suffix.
    pub fn with_suffix(suffix: impl Into<String>) -> Self {
        Self {
            suffix: Some(suffix.into()),
        }
    }
}

/// Provides byte-level filesystem access.
pub trait FileSystem: Send + Sync {
    /// Reads the whole file into one contiguous buffer.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Io`] if the file is missing or unreadable.
    fn read_file<'a>(&'a self, path: &'a Path) -> PortFuture<'a, Result<Bytes, RuntimeError>>;

    /// Replaces the file contents with `data`, creating the file if needed.
    ///
    /// Parent directories are not created and the write is not atomic.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Io`] on permission or path-resolution failure.
    fn write_file<'a>(
        &'a self,
        path: &'a Path,
        data: &'a [u8],
    ) -> PortFuture<'a, Result<(), RuntimeError>>;

    /// Probes the path. Any failure, not only "not found", yields `None`.
    fn stat<'a>(&'a self, path: &'a Path) -> PortFuture<'a, Option<Stat>>;

    /// Creates a directory.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Io`] if an ancestor is missing and
    /// `options.recursive` is unset, or if the platform call fails.
    fn mkdir<'a>(
        &'a self,
        path: &'a Path,
        options: MkdirOptions,
    ) -> PortFuture<'a, Result<(), RuntimeError>>;

    /// Attempts to remove the entry. Failures are ignored.
    fn remove<'a>(&'a self, path: &'a Path) -> PortFuture<'a, ()>;

    /// Creates an empty `tmp<suffix>` file inside a fresh, uniquely named
    /// directory under the platform temp root and returns its path.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Io`] if the directory or file cannot be created.
    fn make_temp_file(
        &self,
        options: TempFileOptions,
    ) -> PortFuture<'_, Result<PathBuf, RuntimeError>>;
}
