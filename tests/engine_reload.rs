// tests/engine_reload.rs

use std::fs;

use tokio::sync::mpsc;

use passgraph::engine::{CoreRuntime, ReloadOutcome, Runtime, RuntimeEvent, RuntimeOptions};
use passgraph::errors::PassgraphError;
use passgraph_test_utils::with_timeout;

const CHAIN: &str = r#"
[pass.geometry]
writes = ["color"]

[pass.post]
reads = ["color"]
"#;

const CHAIN_WITH_UI: &str = r#"
[pass.geometry]
writes = ["color"]

[pass.post]
reads = ["color"]
writes = ["final"]

[pass.ui]
reads = ["final"]
"#;

const CYCLIC: &str = r#"
[pass.a]
reads = ["y"]
writes = ["x"]

[pass.b]
reads = ["x"]
writes = ["y"]
"#;

fn runtime_for(path: &std::path::Path) -> (Runtime, mpsc::Sender<RuntimeEvent>) {
    let (tx, rx) = mpsc::channel(16);
    let core = CoreRuntime::new(path);
    let runtime = Runtime::new(core, rx, RuntimeOptions::default());
    (runtime, tx)
}

#[test]
fn test_unchanged_content_is_skipped() {
    passgraph_test_utils::init_tracing();

    let file = passgraph_test_utils::pipeline_file(CHAIN);
    let (mut runtime, _tx) = runtime_for(file.path());

    assert_eq!(runtime.reload().unwrap(), ReloadOutcome::Applied);
    assert_eq!(runtime.reload().unwrap(), ReloadOutcome::Unchanged);

    fs::write(file.path(), CHAIN_WITH_UI).unwrap();
    assert_eq!(runtime.reload().unwrap(), ReloadOutcome::Applied);

    let report = runtime.report();
    assert_eq!(report.reloads_applied, 2);
    assert_eq!(report.reloads_skipped, 1);
    assert_eq!(report.frames_run, 2);
    assert_eq!(report.last_schedule, vec!["geometry", "post", "ui"]);
}

#[test]
fn test_failed_reload_keeps_previous_graph() {
    let file = passgraph_test_utils::pipeline_file(CHAIN);
    let (mut runtime, _tx) = runtime_for(file.path());
    runtime.reload().unwrap();

    fs::write(file.path(), CYCLIC).unwrap();
    assert!(matches!(runtime.reload(), Err(PassgraphError::GraphCycle(_))));

    let current = runtime.current().unwrap();
    assert_eq!(current.schedule_names(), vec!["geometry", "post"]);
    assert_eq!(runtime.report().last_schedule, vec!["geometry", "post"]);
}

#[tokio::test]
async fn test_run_applies_changes_until_shutdown() {
    let file = passgraph_test_utils::pipeline_file(CHAIN);
    let (runtime, tx) = runtime_for(file.path());
    let path = file.path().to_path_buf();

    // Same content twice: the initial load plus two skipped reloads.
    tx.send(RuntimeEvent::PipelineChanged { path: path.clone() })
        .await
        .unwrap();
    tx.send(RuntimeEvent::PipelineChanged { path })
        .await
        .unwrap();
    tx.send(RuntimeEvent::ShutdownRequested).await.unwrap();

    let report = with_timeout(runtime.run()).await.unwrap();

    assert_eq!(report.reloads_applied, 1);
    assert_eq!(report.reloads_skipped, 2);
    assert_eq!(report.reloads_failed, 0);
    assert_eq!(report.last_schedule, vec!["geometry", "post"]);
}

#[tokio::test]
async fn test_run_fails_when_first_load_fails() {
    let file = passgraph_test_utils::pipeline_file(CYCLIC);
    let (runtime, tx) = runtime_for(file.path());
    drop(tx);

    let result = with_timeout(runtime.run()).await;

    assert!(matches!(result, Err(PassgraphError::GraphCycle(_))));
}

#[tokio::test]
async fn test_exit_behaviour_stops_runtime_on_bad_reload() {
    let good = format!("[config]\non_reload_error = \"exit\"\n{CHAIN}");
    let file = passgraph_test_utils::pipeline_file(&good);
    let path = file.path().to_path_buf();
    let (tx, rx) = mpsc::channel(16);
    let mut runtime = Runtime::new(CoreRuntime::new(&path), rx, RuntimeOptions { frames: Some(2) });
    runtime.reload().unwrap();
    assert_eq!(runtime.report().frames_run, 2);

    fs::write(&path, CYCLIC).unwrap();
    tx.send(RuntimeEvent::PipelineChanged { path }).await.unwrap();
    tx.send(RuntimeEvent::ShutdownRequested).await.unwrap();

    let result = with_timeout(runtime.run()).await;
    assert!(matches!(result, Err(PassgraphError::GraphCycle(_))));
}

#[tokio::test]
async fn test_keep_last_behaviour_counts_failure_and_continues() {
    let file = passgraph_test_utils::pipeline_file(CHAIN);
    let path = file.path().to_path_buf();
    let (mut runtime, tx) = runtime_for(&path);
    runtime.reload().unwrap();

    fs::write(&path, CYCLIC).unwrap();
    tx.send(RuntimeEvent::PipelineChanged { path: path.clone() })
        .await
        .unwrap();
    tx.send(RuntimeEvent::ShutdownRequested).await.unwrap();

    let report = with_timeout(runtime.run()).await.unwrap();
    assert_eq!(report.reloads_applied, 1);
    assert_eq!(report.reloads_failed, 1);
    assert_eq!(report.last_schedule, vec!["geometry", "post"]);
}

#[test]
fn test_zero_frame_override_is_rejected() {
    let file = passgraph_test_utils::pipeline_file(CHAIN);
    let (_tx, rx) = mpsc::channel(16);
    let mut runtime = Runtime::new(
        CoreRuntime::new(file.path()),
        rx,
        RuntimeOptions { frames: Some(0) },
    );

    assert!(matches!(runtime.reload(), Err(PassgraphError::PipelineError(_))));
    assert_eq!(runtime.report().reloads_applied, 0);
    assert!(runtime.current().is_none());
}
