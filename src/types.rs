use clap::ValueEnum;
use serde::Deserialize;

/// Behaviour when a rebuild trigger arrives while a compile is running.
///
/// - `Queue`: remember the trigger and rebuild once the current compile
///   finishes. Up to `queue_length` reruns are kept; with the default of 1
///   this collapses any burst into a single rebuild of the latest state.
/// - `Drop`: ignore triggers that arrive while a compile is running.
///
/// A running compile is never cancelled in either mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TriggerWhileRunningBehaviour {
    #[default]
    Queue,
    Drop,
}

/// Output formatting of the compiled stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// Whitespace and comments stripped.
    #[default]
    Compressed,
    /// One declaration per line.
    Expanded,
}

impl OutputStyle {
    pub fn is_compressed(self) -> bool {
        matches!(self, OutputStyle::Compressed)
    }
}

/// Where compile errors get surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotifierKind {
    /// OS notification (`notify-send` / `osascript`), falling back to logs.
    #[default]
    Desktop,
    /// `tracing` error line only.
    Log,
    /// Swallow the message.
    None,
}
