#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use passgraph::render_graph::{DependencyBuilder, Pass, ResourceId};

/// Shared log of pass executions, in the order they happened.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: &str) {
        self.entries.lock().unwrap().push(entry.to_string());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    /// Position of the first entry equal to `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.lock().unwrap().iter().position(|e| e == name)
    }

    pub fn count(&self, name: &str) -> usize {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.as_str() == name)
            .count()
    }
}

/// Pass that declares fixed reads/writes and writes its name to a
/// [`Journal`] when executed. Works with any renderer/queue type.
#[derive(Debug, Clone)]
pub struct RecordingPass {
    name: String,
    reads: Vec<Option<ResourceId>>,
    writes: Vec<Option<ResourceId>>,
    journal: Journal,
    declare_calls: Arc<Mutex<usize>>,
}

impl RecordingPass {
    pub fn new(name: &str, journal: &Journal) -> Self {
        Self {
            name: name.to_string(),
            reads: Vec::new(),
            writes: Vec::new(),
            journal: journal.clone(),
            declare_calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn reads(mut self, resource: impl Into<Option<ResourceId>>) -> Self {
        self.reads.push(resource.into());
        self
    }

    pub fn writes(mut self, resource: impl Into<Option<ResourceId>>) -> Self {
        self.writes.push(resource.into());
        self
    }

    /// Counter of `declare_dependencies` calls, shared with clones.
    pub fn declare_counter(&self) -> Arc<Mutex<usize>> {
        Arc::clone(&self.declare_calls)
    }
}

impl<R: ?Sized, Q: ?Sized> Pass<R, Q> for RecordingPass {
    fn name(&self) -> &str {
        &self.name
    }

    fn declare_dependencies(&mut self, deps: &mut DependencyBuilder<'_>) {
        *self.declare_calls.lock().unwrap() += 1;
        deps.read(self.reads.iter().copied())
            .write(self.writes.iter().copied());
    }

    fn execute(&mut self, _renderer: &mut R, _queue: &mut Q) {
        self.journal.push(&self.name);
    }
}
