// src/tasks/mod.rs

//! The three CLI tasks and how they depend on each other.
//!
//! `watch` and `default` both depend on `css`. A task's plan is its
//! dependency chain followed by the task itself, so `watch` compiles once
//! before it starts watching.

pub mod graph;

use std::fmt;

pub use graph::TaskGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskKind {
    /// Compile once.
    Css,
    /// Compile, then rebuild on every change under the source directory.
    Watch,
    /// Alias for `css`.
    Default,
}

impl TaskKind {
    pub fn name(self) -> &'static str {
        match self {
            TaskKind::Css => "css",
            TaskKind::Watch => "watch",
            TaskKind::Default => "default",
        }
    }

    pub fn all() -> [TaskKind; 3] {
        [TaskKind::Css, TaskKind::Watch, TaskKind::Default]
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
