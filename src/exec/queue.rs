// src/exec/queue.rs

/// One pass's work for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub pass: String,
    pub frame: u64,
}

/// Records submissions in the order passes make them.
#[derive(Debug, Default)]
pub struct CommandQueue {
    submissions: Vec<Submission>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&mut self, pass: impl Into<String>, frame: u64) {
        self.submissions.push(Submission {
            pass: pass.into(),
            frame,
        });
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }

    /// Take every recorded submission, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<Submission> {
        std::mem::take(&mut self.submissions)
    }
}
