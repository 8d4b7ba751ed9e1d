//! Record-replay round-trip integration test.
//!
//! 1. Record a session against the live host (fs, env, exec, cwd).
//! 2. Replay the per-port cassettes with `HostRuntime::replaying_from`.
//! 3. Assert the replayed outputs equal the recorded ones without touching
//!    the host, twice for determinism.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use serde_json::json;

use host_runtime::cassette::config::CassetteConfig;
use host_runtime::cassette::recorder::CassetteRecorder;
use host_runtime::{ExecOptions, HostRuntime, MkdirOptions, RunResult, Stat};

/// Everything a render pass observed through the runtime.
#[derive(Debug, PartialEq)]
struct Observed {
    contents: Bytes,
    missing_is_error: bool,
    stat: Option<Stat>,
    mkdir_failed: bool,
    home: Option<String>,
    cwd: PathBuf,
    run: Option<RunResult>,
}

async fn exercise(runtime: &HostRuntime, root: &Path) -> Observed {
    let doc = root.join("doc.md");
    runtime.fs.write_file(&doc, b"# Title\n").await.unwrap();
    let contents = runtime.fs.read_file(&doc).await.unwrap();
    let missing = root.join("nope.md");
    let missing_is_error = runtime.fs.read_file(&missing).await.is_err();
    let stat = runtime.fs.stat(&doc).await;
    let deep = root.join("a").join("b");
    let options = MkdirOptions::default();
    let mkdir_failed = runtime.fs.mkdir(&deep, options).await.is_err();
    runtime.fs.remove(&doc).await;
    let home = runtime.env.get("HOME");
    let cwd = runtime.cwd.cwd().unwrap();

    let run = if cfg!(unix) {
        let command = vec!["echo".to_string(), "rendered".to_string()];
        let options = ExecOptions::default();
        Some(runtime.exec.exec(&command, options).await.unwrap())
    } else {
        None
    };

    Observed {
        contents,
        missing_is_error,
        stat,
        mkdir_failed,
        home,
        cwd,
        run,
    }
}

#[tokio::test]
async fn record_then_replay_produces_identical_outputs() {
    let scratch = tempfile::tempdir().unwrap();
    let work = scratch.path().join("work");
    std::fs::create_dir(&work).unwrap();

    // --- Phase 1: record against the live host ---
    let cassettes = scratch.path().join("cassettes");
    let (runtime, session) = HostRuntime::recording_at(cassettes).unwrap();
    let recorded = exercise(&runtime, &work).await;
    drop(runtime);
    let cassette_dir = session.finish().unwrap();

    assert_eq!(&recorded.contents[..], b"# Title\n");
    assert!(recorded.missing_is_error);
    assert!(recorded.mkdir_failed);
    assert!(!work.join("doc.md").exists(), "remove ran during recording");

    // The replay must not depend on the host; delete what recording touched.
    std::fs::remove_dir_all(&work).unwrap();

    // --- Phase 2: replay twice ---
    let config = CassetteConfig::from_session_dir(&cassette_dir);
    for _ in 0..2 {
        let replaying = HostRuntime::replaying_from(&config).unwrap();
        let replayed = exercise(&replaying, &work).await;
        assert_eq!(replayed, recorded);
    }
}

#[tokio::test]
async fn monolithic_cassette_serves_every_port() {
    let dir = tempfile::tempdir().unwrap();
    let cassette_path = dir.path().join("render.cassette.yaml");

    let mut recorder = CassetteRecorder::new(&cassette_path, "render-pass");
    recorder.record("cwd", "cwd", json!(null), json!({"Ok": "/site"}));
    recorder.record(
        "fs",
        "stat",
        json!({"path": "/site/book.toml"}),
        json!({"is_file": true, "is_directory": false}),
    );
    recorder.record(
        "env",
        "get",
        json!({"name": "RENDER_THEME"}),
        json!("solarized"),
    );
    recorder.record(
        "exec",
        "exec",
        json!({"command": ["dot", "-Tsvg"], "cwd": null}),
        json!({"Ok": {"exit_code": 2, "stdout": null, "stderr": "c3ludGF4IGVycm9y"}}),
    );
    recorder.finish().unwrap();

    let runtime = HostRuntime::replaying(&cassette_path).unwrap();

    assert_eq!(runtime.cwd.cwd().unwrap(), PathBuf::from("/site"));
    assert_eq!(
        runtime.fs.stat(Path::new("/site/book.toml")).await,
        Some(Stat::FILE)
    );
    assert_eq!(
        runtime.env.get("RENDER_THEME").as_deref(),
        Some("solarized")
    );

    let command = vec!["dot".to_string(), "-Tsvg".to_string()];
    let options = ExecOptions::default();
    let run = runtime.exec.exec(&command, options).await.unwrap();
    assert_eq!(run.exit_code, 2);
    assert_eq!(run.stdout, None);
    assert_eq!(run.stderr, Some(Bytes::from_static(b"syntax error")));
}
