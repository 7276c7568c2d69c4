// src/engine/runtime.rs

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::config::{PipelineFile, parse_and_validate};
use crate::errors::{PassgraphError, Result};
use crate::exec::{CommandQueue, TraceRenderer, run_frames};
use crate::pipeline::{BuiltPipeline, build_render_graph};
use crate::types::ReloadFailureBehaviour;
use crate::watch::{ContentHashCache, compute_content_hash};

use super::core::CoreRuntime;
use super::{CoreCommand, RuntimeEvent, RuntimeOptions};

/// What a single reload attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// New content was validated, compiled and run.
    Applied,
    /// Content hash matched the last applied version; nothing was done.
    Unchanged,
}

/// Counters returned when the runtime stops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeReport {
    pub reloads_applied: u64,
    pub reloads_skipped: u64,
    pub reloads_failed: u64,
    pub frames_run: u64,
    /// Pass names of the schedule that was active at shutdown.
    pub last_schedule: Vec<String>,
}

/// Reloads the pipeline in response to `RuntimeEvent`s and runs the
/// resulting render graph.
///
/// This is an IO shell around `CoreRuntime`, which decides *whether* to
/// reload; this struct does the reading, hashing, compiling and running.
pub struct Runtime {
    core: CoreRuntime,
    event_rx: mpsc::Receiver<RuntimeEvent>,
    options: RuntimeOptions,
    pipeline_path: PathBuf,
    hashes: ContentHashCache,
    current: Option<BuiltPipeline>,
    on_reload_error: ReloadFailureBehaviour,
    renderer: TraceRenderer,
    queue: CommandQueue,
    report: RuntimeReport,
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .field("pipeline_path", &self.pipeline_path)
            .field("report", &self.report)
            .finish_non_exhaustive()
    }
}

impl Runtime {
    pub fn new(
        core: CoreRuntime,
        event_rx: mpsc::Receiver<RuntimeEvent>,
        options: RuntimeOptions,
    ) -> Self {
        let pipeline_path = core.pipeline_path().to_path_buf();
        Self {
            core,
            event_rx,
            options,
            pipeline_path,
            hashes: ContentHashCache::new(),
            current: None,
            on_reload_error: ReloadFailureBehaviour::default(),
            renderer: TraceRenderer::new(),
            queue: CommandQueue::new(),
            report: RuntimeReport::default(),
        }
    }

    /// Counters so far.
    pub fn report(&self) -> &RuntimeReport {
        &self.report
    }

    /// The render graph built from the last good pipeline, if any.
    pub fn current(&self) -> Option<&BuiltPipeline> {
        self.current.as_ref()
    }

    /// Main event loop.
    ///
    /// - Loads the pipeline up front unless [`reload`](Self::reload) already
    ///   succeeded; failing here is always an error.
    /// - Consumes `RuntimeEvent`s from `event_rx`.
    /// - Feeds them into the core runtime and executes its commands.
    pub async fn run(mut self) -> Result<RuntimeReport> {
        info!(path = ?self.pipeline_path, "passgraph runtime started");

        if self.current.is_none() {
            self.reload()?;
        }

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("runtime event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "runtime received event");

            let step = self.core.step(event);

            for command in step.commands {
                self.execute_command(command)?;
            }

            if !step.keep_running {
                info!("core requested exit; stopping runtime");
                break;
            }
        }

        info!(
            applied = self.report.reloads_applied,
            skipped = self.report.reloads_skipped,
            failed = self.report.reloads_failed,
            "runtime exiting"
        );
        Ok(self.report)
    }

    fn execute_command(&mut self, command: CoreCommand) -> Result<()> {
        match command {
            CoreCommand::ReloadPipeline => match self.reload() {
                Ok(_) => Ok(()),
                Err(err) => self.handle_reload_error(err),
            },
            CoreCommand::RequestExit => {
                info!("core issued RequestExit command");
                Ok(())
            }
        }
    }

    fn handle_reload_error(&mut self, err: PassgraphError) -> Result<()> {
        self.report.reloads_failed += 1;
        match self.on_reload_error {
            ReloadFailureBehaviour::KeepLast => {
                warn!(error = %err, "reload failed; keeping last good schedule");
                Ok(())
            }
            ReloadFailureBehaviour::Exit => {
                error!(error = %err, "reload failed; exiting");
                Err(err)
            }
        }
    }

    /// Read the pipeline file and, if its content changed since the last
    /// successful reload, validate, build, compile and run it.
    ///
    /// On error the previous graph stays in place.
    pub fn reload(&mut self) -> Result<ReloadOutcome> {
        let bytes = fs::read(&self.pipeline_path)?;
        let hash = compute_content_hash(&bytes);

        if !self.hashes.changed(&self.pipeline_path, &hash) {
            debug!(path = ?self.pipeline_path, "pipeline content unchanged; skipping reload");
            self.report.reloads_skipped += 1;
            return Ok(ReloadOutcome::Unchanged);
        }

        let contents = String::from_utf8(bytes).map_err(|err| {
            PassgraphError::PipelineError(format!(
                "pipeline file {:?} is not valid UTF-8: {err}",
                self.pipeline_path
            ))
        })?;
        let pipeline = parse_and_validate(&contents)?;
        let mut built = build_render_graph(&pipeline)?;
        built.graph.compile()?;

        let frames = self.options.frames.unwrap_or(pipeline.config.frames);
        if frames == 0 {
            return Err(PassgraphError::PipelineError(
                "frame override must be >= 1 (got 0)".to_string(),
            ));
        }
        run_frames(&mut built.graph, &mut self.renderer, &mut self.queue, frames)?;

        self.log_submissions();
        self.apply(&pipeline, built, frames, hash);
        Ok(ReloadOutcome::Applied)
    }

    fn apply(&mut self, pipeline: &PipelineFile, built: BuiltPipeline, frames: u64, hash: String) {
        let schedule: Vec<String> = built
            .schedule_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        info!(
            path = ?self.pipeline_path,
            schedule = %schedule.join(" -> "),
            "pipeline reloaded"
        );

        self.hashes.record(self.pipeline_path.clone(), hash);
        self.on_reload_error = pipeline.config.on_reload_error;
        self.current = Some(built);
        self.report.reloads_applied += 1;
        self.report.frames_run += frames;
        self.report.last_schedule = schedule;
    }

    fn log_submissions(&mut self) {
        for submission in self.queue.drain() {
            debug!(
                pass = %submission.pass,
                frame = submission.frame,
                "submission"
            );
        }
    }

    pub fn pipeline_path(&self) -> &Path {
        &self.pipeline_path
    }
}
