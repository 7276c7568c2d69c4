// src/exec/frames.rs

use tracing::{debug, info};

use crate::errors::Result;
use crate::exec::{CommandQueue, TraceRenderer};
use crate::render_graph::RenderGraph;

/// Run `frames` frames of `graph`.
///
/// Each frame is bracketed by `begin_frame`/`end_frame` on the renderer. The
/// graph compiles lazily on the first frame; a compile error stops the loop
/// before any pass runs and leaves the renderer outside a frame.
pub fn run_frames(
    graph: &mut RenderGraph<TraceRenderer, CommandQueue>,
    renderer: &mut TraceRenderer,
    queue: &mut CommandQueue,
    frames: u64,
) -> Result<()> {
    info!(frames, passes = graph.pass_count(), "running frames");

    for _ in 0..frames {
        renderer.begin_frame();
        let result = graph.execute(renderer, queue);
        renderer.end_frame();
        result?;
    }

    debug!(
        frames,
        submissions = queue.submissions().len(),
        "frames finished"
    );
    Ok(())
}
