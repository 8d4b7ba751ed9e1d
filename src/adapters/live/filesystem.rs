//! Live filesystem adapter using `tokio::fs`.

use std::io;
use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::config::DEFAULT_TEMP_PREFIX;
use crate::error::RuntimeError;
use crate::ports::filesystem::{FileSystem, MkdirOptions, Stat, TempFileOptions};
use crate::ports::PortFuture;

/// Live filesystem adapter backed by real disk I/O.
#[derive(Debug, Clone)]
pub struct LiveFileSystem {
    temp_prefix: String,
}

impl LiveFileSystem {
    /// Creates an adapter using the default temp directory prefix.
    #[must_use]
    pub fn new() -> Self {
        Self::with_temp_prefix(DEFAULT_TEMP_PREFIX)
    }

    /// Creates an adapter whose temp directories start with `prefix`.
    pub fn with_temp_prefix(prefix: impl Into<String>) -> Self {
        Self {
            temp_prefix: prefix.into(),
        }
    }
}

impl Default for LiveFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for LiveFileSystem {
    fn read_file<'a>(&'a self, path: &'a Path) -> PortFuture<'a, Result<Bytes, RuntimeError>> {
        Box::pin(async move {
            tokio::fs::read(path)
                .await
                .map(Bytes::from)
                .map_err(|source| RuntimeError::io("read_file", path, source))
        })
    }

    fn write_file<'a>(
        &'a self,
        path: &'a Path,
        data: &'a [u8],
    ) -> PortFuture<'a, Result<(), RuntimeError>> {
        Box::pin(async move {
            tokio::fs::write(path, data)
                .await
                .map_err(|source| RuntimeError::io("write_file", path, source))
        })
    }

    fn stat<'a>(&'a self, path: &'a Path) -> PortFuture<'a, Option<Stat>> {
        Box::pin(async move {
            match tokio::fs::metadata(path).await {
                Ok(meta) => Some(Stat {
                    is_file: meta.is_file(),
                    is_directory: meta.is_dir(),
                }),
                Err(e) => {
                    tracing::trace!(path = %path.display(), error = %e, "stat treated as absent");
                    None
                }
            }
        })
    }

    fn mkdir<'a>(
        &'a self,
        path: &'a Path,
        options: MkdirOptions,
    ) -> PortFuture<'a, Result<(), RuntimeError>> {
        Box::pin(async move {
            let result = if options.recursive {
                tokio::fs::create_dir_all(path).await
            } else {
                tokio::fs::create_dir(path).await
            };
            result.map_err(|source| RuntimeError::io("mkdir", path, source))
        })
    }

    fn remove<'a>(&'a self, path: &'a Path) -> PortFuture<'a, ()> {
        Box::pin(async move {
            if let Err(e) = tokio::fs::remove_file(path).await {
                tracing::trace!(path = %path.display(), error = %e, "remove failed; ignored");
            }
        })
    }

    fn make_temp_file(
        &self,
        options: TempFileOptions,
    ) -> PortFuture<'_, Result<PathBuf, RuntimeError>> {
        let prefix = self.temp_prefix.clone();
        Box::pin(async move {
            let root = std::env::temp_dir();
            let blocking_root = root.clone();
            let dir = tokio::task::spawn_blocking(move || {
                tempfile::Builder::new()
                    .prefix(&prefix)
                    .tempdir_in(blocking_root)
                    .map(tempfile::TempDir::keep)
            })
            .await
            .map_err(io::Error::other)
            .and_then(|created| created)
            .map_err(|source| RuntimeError::io("make_temp_file", &root, source))?;

            let suffix = options.suffix.as_deref().unwrap_or_default();
            let file = dir.join(format!("tmp{suffix}"));
            if let Err(source) = tokio::fs::write(&file, b"").await {
                if let Err(e) = tokio::fs::remove_dir(&dir).await {
                    tracing::trace!(path = %dir.display(), error = %e, "temp dir cleanup failed");
                }
                return Err(RuntimeError::io("make_temp_file", &file, source));
            }
            tracing::debug!(path = %file.display(), "allocated temp file");
            Ok(file)
        })
    }
}
