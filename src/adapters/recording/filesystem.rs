//! Recording adapter for the `FileSystem` port.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use serde::Serialize;

use super::{record_interaction, record_result};
use crate::cassette::recorded::{encode_bytes, encode_path};
use crate::cassette::session::SharedRecorder;
use crate::error::RuntimeError;
use crate::ports::filesystem::{FileSystem, MkdirOptions, Stat, TempFileOptions};
use crate::ports::PortFuture;

/// Records filesystem interactions while delegating to an inner implementation.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: SharedRecorder,
}

impl RecordingFileSystem {
    /// Creates a new recording filesystem wrapping the given implementation.
    pub fn new(inner: Box<dyn FileSystem>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct PathInput {
    path: String,
}

impl PathInput {
    fn new(path: &Path) -> Self {
        Self {
            path: encode_path(path),
        }
    }
}

#[derive(Serialize)]
struct WriteInput {
    path: String,
    data: String,
}

#[derive(Serialize)]
struct MkdirInput {
    path: String,
    recursive: bool,
}

impl FileSystem for RecordingFileSystem {
    fn read_file<'a>(&'a self, path: &'a Path) -> PortFuture<'a, Result<Bytes, RuntimeError>> {
        Box::pin(async move {
            let result = self.inner.read_file(path).await;
            let recorded = result.as_ref().map(|data| encode_bytes(data));
            let input = PathInput::new(path);
            record_result(&self.recorder, "fs", "read_file", &input, recorded);
            result
        })
    }

    fn write_file<'a>(
        &'a self,
        path: &'a Path,
        data: &'a [u8],
    ) -> PortFuture<'a, Result<(), RuntimeError>> {
        Box::pin(async move {
            let result = self.inner.write_file(path, data).await;
            let input = WriteInput {
                path: encode_path(path),
                data: encode_bytes(data),
            };
            record_result(&self.recorder, "fs", "write_file", &input, result.as_ref());
            result
        })
    }

    fn stat<'a>(&'a self, path: &'a Path) -> PortFuture<'a, Option<Stat>> {
        Box::pin(async move {
            let result = self.inner.stat(path).await;
            let input = PathInput::new(path);
            record_interaction(&self.recorder, "fs", "stat", &input, &result);
            result
        })
    }

    fn mkdir<'a>(
        &'a self,
        path: &'a Path,
        options: MkdirOptions,
    ) -> PortFuture<'a, Result<(), RuntimeError>> {
        Box::pin(async move {
            let result = self.inner.mkdir(path, options).await;
            let input = MkdirInput {
                path: encode_path(path),
                recursive: options.recursive,
            };
            record_result(&self.recorder, "fs", "mkdir", &input, result.as_ref());
            result
        })
    }

    fn remove<'a>(&'a self, path: &'a Path) -> PortFuture<'a, ()> {
        Box::pin(async move {
            self.inner.remove(path).await;
            let input = PathInput::new(path);
            record_interaction(&self.recorder, "fs", "remove", &input, &());
        })
    }

    fn make_temp_file(
        &self,
        options: TempFileOptions,
    ) -> PortFuture<'_, Result<PathBuf, RuntimeError>> {
        Box::pin(async move {
            let result = self.inner.make_temp_file(options.clone()).await;
            let recorded = result.as_ref().map(|path| encode_path(path));
            record_result(&self.recorder, "fs", "make_temp_file", &options, recorded);
            result
        })
    }
}
