//! Replaying adapter for the `FileSystem` port.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use bytes::Bytes;

use super::{next_output, replay_result, replay_value};
use crate::cassette::recorded::decode_bytes;
use crate::cassette::replayer::CassetteReplayer;
use crate::error::RuntimeError;
use crate::ports::filesystem::{FileSystem, MkdirOptions, Stat, TempFileOptions};
use crate::ports::PortFuture;

/// Replays recorded filesystem operations from a cassette.
///
/// Nothing touches the disk; arguments are ignored and outputs are served
/// in recorded order per method.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self {
            replayer: Mutex::new(replayer),
        }
    }
}

impl FileSystem for ReplayingFileSystem {
    fn read_file<'a>(&'a self, _path: &'a Path) -> PortFuture<'a, Result<Bytes, RuntimeError>> {
        let output = next_output(&self.replayer, "fs", "read_file");
        Box::pin(async move {
            let encoded: String = replay_result(output, "fs::read_file")?;
            decode_bytes(&encoded)
        })
    }

    fn write_file<'a>(
        &'a self,
        _path: &'a Path,
        _data: &'a [u8],
    ) -> PortFuture<'a, Result<(), RuntimeError>> {
        let output = next_output(&self.replayer, "fs", "write_file");
        Box::pin(async move { replay_result(output, "fs::write_file") })
    }

    fn stat<'a>(&'a self, _path: &'a Path) -> PortFuture<'a, Option<Stat>> {
        let output = next_output(&self.replayer, "fs", "stat");
        Box::pin(async move { replay_value(output, "fs::stat") })
    }

    fn mkdir<'a>(
        &'a self,
        _path: &'a Path,
        _options: MkdirOptions,
    ) -> PortFuture<'a, Result<(), RuntimeError>> {
        let output = next_output(&self.replayer, "fs", "mkdir");
        Box::pin(async move { replay_result(output, "fs::mkdir") })
    }

    fn remove<'a>(&'a self, _path: &'a Path) -> PortFuture<'a, ()> {
        let _ = next_output(&self.replayer, "fs", "remove");
        Box::pin(async {})
    }

    fn make_temp_file(
        &self,
        _options: TempFileOptions,
    ) -> PortFuture<'_, Result<PathBuf, RuntimeError>> {
        let output = next_output(&self.replayer, "fs", "make_temp_file");
        Box::pin(async move { replay_result(output, "fs::make_temp_file") })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::adapters::replaying::test_support::replayer;

    #[tokio::test]
    async fn replays_read_file_bytes() {
        let fs = ReplayingFileSystem::new(replayer(&[(
            "fs",
            "read_file",
            json!({"Ok": "AP8K"}),
        )]));

        let data = fs.read_file(Path::new("/any")).await.unwrap();
        assert_eq!(&data[..], &[0x00, 0xff, b'\n']);
    }

    #[tokio::test]
    async fn replays_recorded_io_error() {
        let fs = ReplayingFileSystem::new(replayer(&[(
            "fs",
            "mkdir",
            json!({"Err": {
                "kind": "io",
                "op": "mkdir",
                "path": "/a/b",
                "message": "No such file or directory"
            }}),
        )]));

        let err = fs
            .mkdir(Path::new("/a/b"), MkdirOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_io());
        assert_eq!(err.to_string(), "mkdir /a/b: No such file or directory");
    }

    #[tokio::test]
    async fn replays_stat_absence_and_temp_paths() {
        let fs = ReplayingFileSystem::new(replayer(&[
            ("fs", "stat", json!(null)),
            (
                "fs",
                "stat",
                json!({"is_file": false, "is_directory": true}),
            ),
            (
                "fs",
                "make_temp_file",
                json!({"Ok": "/tmp/host-runtime-abc/tmp.png"}),
            ),
            ("fs", "remove", json!(null)),
        ]));

        assert_eq!(fs.stat(Path::new("/x")).await, None);
        assert_eq!(fs.stat(Path::new("/y")).await, Some(Stat::DIRECTORY));
        let temp = fs
            .make_temp_file(TempFileOptions::with_suffix(".png"))
            .await
            .unwrap();
        assert_eq!(temp, PathBuf::from("/tmp/host-runtime-abc/tmp.png"));
        fs.remove(&temp).await;
    }

    #[tokio::test]
    async fn malformed_output_is_cassette_error() {
        let fs = ReplayingFileSystem::new(replayer(&[("fs", "write_file", json!(42))]));

        let err = fs.write_file(Path::new("/x"), b"").await.unwrap_err();
        assert!(matches!(err, RuntimeError::Cassette(_)));
    }
}
