// src/notifier/desktop.rs

use anyhow::{Context, Result};
use tokio::process::Command;
use tracing::{debug, error};

use super::Notifier;

/// OS notification via `notify-send` (Linux/BSD) or `osascript` (macOS).
///
/// The message is also logged, so nothing is lost on headless machines or
/// platforms without a notification helper (Windows).
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    title: String,
}

impl DesktopNotifier {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    fn command(&self, message: &str) -> Option<Command> {
        if cfg!(target_os = "macos") {
            let script = format!(
                "display notification \"{}\" with title \"{}\"",
                escape_applescript(message),
                escape_applescript(&self.title)
            );
            let mut c = Command::new("osascript");
            c.arg("-e").arg(script);
            Some(c)
        } else if cfg!(unix) {
            let mut c = Command::new("notify-send");
            c.arg(&self.title).arg(message);
            Some(c)
        } else {
            None
        }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, message: &str) -> Result<()> {
        error!("{message}");

        let Some(mut cmd) = self.command(message) else {
            return Ok(());
        };

        // Fire and forget; tokio reaps the child once it exits.
        let child = cmd
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()
            .context("spawning desktop notification helper")?;
        debug!(pid = ?child.id(), "desktop notification sent");
        Ok(())
    }
}

fn escape_applescript(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
