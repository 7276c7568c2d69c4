// src/watch/mod.rs

//! Watching the pipeline file for changes.
//!
//! - [`watcher`] wires a `notify` watcher to the runtime channel.
//! - [`hash`] provides content hashes so unchanged saves can be ignored.
//!
//! It does **not** reload anything itself; it only turns filesystem changes
//! into `RuntimeEvent`s.

pub mod hash;
pub mod watcher;

pub use hash::{ContentHashCache, compute_content_hash};
pub use watcher::{WatcherHandle, spawn_watcher};
