// src/notifier/mod.rs

//! Where compile errors get surfaced.
//!
//! The pipeline never notifies anyone itself; the runtime hands failures to
//! a [`Notifier`] picked by the CLI layer. Delivery is best effort: a
//! notifier that fails only produces a warning.

pub mod desktop;

use std::fmt::Debug;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use tracing::error;

use crate::types::NotifierKind;

pub use desktop::DesktopNotifier;

pub trait Notifier: Send + Sync + Debug {
    /// Deliver a one-line message such as `"Error: expected \";\"."`.
    fn notify(&self, message: &str) -> Result<()>;
}

/// Logs the message at `error` level.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) -> Result<()> {
        error!("{message}");
        Ok(())
    }
}

/// Drops every message.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _message: &str) -> Result<()> {
        Ok(())
    }
}

/// Keeps every message in memory; handy in tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) -> Result<()> {
        if let Ok(mut guard) = self.messages.lock() {
            guard.push(message.to_string());
        }
        Ok(())
    }
}

/// Build the notifier for a configured kind.
pub fn from_kind(kind: NotifierKind, title: &str) -> Arc<dyn Notifier> {
    match kind {
        NotifierKind::Desktop => Arc::new(DesktopNotifier::new(title)),
        NotifierKind::Log => Arc::new(LogNotifier),
        NotifierKind::None => Arc::new(NoopNotifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_notifier_keeps_order() {
        let n = RecordingNotifier::new();
        n.notify("Error: one").unwrap();
        n.notify("Error: two").unwrap();
        assert_eq!(n.messages(), vec!["Error: one", "Error: two"]);
    }
}
