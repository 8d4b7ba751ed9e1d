//! Live process runner using `tokio::process::Command`.

use std::io;
use std::process::Stdio;

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use crate::error::RuntimeError;
use crate::ports::exec::{ExecOptions, ProcessRunner, RunResult};
use crate::ports::PortFuture;

const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Exit code reported when the platform gives none (terminated by a signal).
const ABNORMAL_EXIT_CODE: i32 = 1;

/// Live process runner that spawns real subprocesses.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveProcessRunner;

impl ProcessRunner for LiveProcessRunner {
    fn exec<'a>(
        &'a self,
        command: &'a [String],
        options: ExecOptions,
    ) -> PortFuture<'a, Result<RunResult, RuntimeError>> {
        Box::pin(async move {
            let Some((program, args)) = command.split_first() else {
                return Err(RuntimeError::exec(
                    "",
                    io::Error::new(io::ErrorKind::InvalidInput, "empty command"),
                ));
            };

            let mut cmd = Command::new(program);
            cmd.args(args)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped());
            if let Some(cwd) = &options.cwd {
                cmd.current_dir(cwd);
            }

            tracing::debug!(%program, args = args.len(), cwd = ?options.cwd, "spawning subprocess");
            let mut child = cmd
                .spawn()
                .map_err(|source| RuntimeError::exec(program.as_str(), source))?;

            let stdout = child.stdout.take();
            let stderr = child.stderr.take();
            // Both streams and the exit status must settle before we report.
            let (stdout_chunks, stderr_chunks, status) =
                tokio::join!(collect_chunks(stdout), collect_chunks(stderr), child.wait());
            let status =
                status.map_err(|source| RuntimeError::exec(program.as_str(), source))?;

            let exit_code = status.code().unwrap_or(ABNORMAL_EXIT_CODE);
            let result = RunResult {
                exit_code,
                stdout: concat_chunks(stdout_chunks),
                stderr: concat_chunks(stderr_chunks),
            };
            tracing::debug!(
                %program,
                exit_code,
                stdout_bytes = result.stdout.as_ref().map_or(0, Bytes::len),
                stderr_bytes = result.stderr.as_ref().map_or(0, Bytes::len),
                "subprocess exited"
            );
            Ok(result)
        })
    }
}

/// Reads `reader` to EOF, keeping every read as its own chunk in arrival order.
async fn collect_chunks<R: AsyncRead + Unpin>(reader: Option<R>) -> Vec<Bytes> {
    let mut chunks = Vec::new();
    let Some(mut reader) = reader else {
        return chunks;
    };

    let mut buf = BytesMut::with_capacity(READ_CHUNK_SIZE);
    loop {
        buf.reserve(READ_CHUNK_SIZE);
        match reader.read_buf(&mut buf).await {
            Ok(0) => break,
            Ok(_) => chunks.push(buf.split().freeze()),
            Err(e) => {
                tracing::trace!(error = %e, "stream read failed; keeping bytes read so far");
                break;
            }
        }
    }
    chunks
}

/// Joins chunks into one contiguous buffer; `None` when there are none.
fn concat_chunks(mut chunks: Vec<Bytes>) -> Option<Bytes> {
    match chunks.len() {
        0 => None,
        1 => chunks.pop(),
        _ => {
            let total = chunks.iter().map(Bytes::len).sum();
            let mut out = BytesMut::with_capacity(total);
            for chunk in &chunks {
                out.extend_from_slice(chunk);
            }
            Some(out.freeze())
        }
    }
}
