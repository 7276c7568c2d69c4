// src/exec/renderer.rs

use tracing::{debug, trace};

/// Stand-in renderer for the CLI.
///
/// Real applications bring their own renderer type; this one only counts
/// frames and logs what passes touch.
#[derive(Debug, Default)]
pub struct TraceRenderer {
    frame: u64,
    in_frame: bool,
    passes_this_frame: usize,
}

impl TraceRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the current (or most recently finished) frame.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn in_frame(&self) -> bool {
        self.in_frame
    }

    pub fn begin_frame(&mut self) {
        if self.in_frame {
            // Unbalanced begin: close the previous frame first.
            self.end_frame();
        }
        self.frame += 1;
        self.in_frame = true;
        self.passes_this_frame = 0;
        debug!(frame = self.frame, "renderer: begin frame");
    }

    /// Record that a pass ran during the current frame.
    pub fn record_pass(&mut self, pass: &str) {
        self.passes_this_frame += 1;
        trace!(frame = self.frame, pass = %pass, "renderer: pass");
    }

    pub fn end_frame(&mut self) {
        if !self.in_frame {
            return;
        }
        self.in_frame = false;
        debug!(
            frame = self.frame,
            passes = self.passes_this_frame,
            "renderer: end frame"
        );
    }
}
