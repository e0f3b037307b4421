// src/errors.rs

//! Crate-wide error types.
//!
//! [`StylewatchError`] covers everything that should end the run (bad config,
//! IO failures, unknown tasks). [`CompilationError`] is the one error the
//! pipeline recovers from: it is reported through a notifier and the watch
//! loop keeps going.

use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StylewatchError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Pipeline stage that produced a [`CompilationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileStage {
    /// SCSS parsing, import resolution or evaluation.
    Sass,
    /// Re-parsing the compiled CSS for prefixing and minification.
    Prefix,
}

impl fmt::Display for CompileStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileStage::Sass => f.write_str("sass"),
            CompileStage::Prefix => f.write_str("prefix"),
        }
    }
}

/// The entry stylesheet (or something it imports) failed to compile.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct CompilationError {
    pub stage: CompileStage,
    pub message: String,
}

impl CompilationError {
    pub fn new(stage: CompileStage, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            "unknown error".to_string()
        } else {
            message
        };
        Self { stage, message }
    }

    /// Human-readable line handed to notifiers: `"Error: <message>"`.
    pub fn notification_message(&self) -> String {
        format!("Error: {}", self.message)
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, StylewatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_message_has_error_prefix() {
        let err = CompilationError::new(CompileStage::Sass, "expected \";\".");
        assert_eq!(err.notification_message(), "Error: expected \";\".");
    }

    #[test]
    fn empty_message_is_replaced() {
        let err = CompilationError::new(CompileStage::Prefix, "  ");
        assert_eq!(err.message, "unknown error");
    }
}
