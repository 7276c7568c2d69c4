// src/watch/watcher.rs

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::RuntimeEvent;

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive for
/// as long as needed. Dropping this handle will stop file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
    path: PathBuf,
}

impl WatcherHandle {
    /// The (canonical) pipeline file being watched.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Spawn a watcher on the pipeline file and send
/// `RuntimeEvent::PipelineChanged` whenever it is created or modified.
///
/// The parent directory is watched rather than the file itself, so editors
/// that save by renaming a temporary file over the original are still seen.
pub fn spawn_watcher(
    pipeline_path: impl Into<PathBuf>,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> Result<WatcherHandle> {
    let pipeline_path = pipeline_path.into();
    // Canonicalize once so event paths compare equal.
    let pipeline_path = pipeline_path
        .canonicalize()
        .unwrap_or_else(|_| pipeline_path.clone());

    let dir = match pipeline_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Err(err) = event_tx.send(event) {
                    // No subscriber context on notify's thread.
                    eprintln!("passgraph: failed to forward notify event: {err}");
                }
            }
            Err(err) => {
                eprintln!("passgraph: file watch error: {err}");
            }
        },
        Config::default(),
    )
    .context("creating file watcher")?;

    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("watching directory {:?}", dir))?;

    info!(path = ?pipeline_path, "pipeline watcher started");

    let target = pipeline_path.clone();
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            if !is_content_event(&event.kind) {
                continue;
            }

            for path in event.paths {
                if path.file_name() != target.file_name() {
                    continue;
                }

                debug!(path = ?path, kind = ?event.kind, "pipeline file changed");

                let event = RuntimeEvent::PipelineChanged {
                    path: target.clone(),
                };
                if runtime_tx.send(event).await.is_err() {
                    warn!("runtime channel closed; stopping watcher loop");
                    return;
                }
            }
        }
        debug!("watcher event loop finished");
    });

    Ok(WatcherHandle {
        _inner: watcher,
        path: pipeline_path,
    })
}

fn is_content_event(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Create(_) | EventKind::Modify(_))
}
