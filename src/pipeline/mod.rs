// src/pipeline/mod.rs

//! The compile pipeline: SCSS → CSS → prefixed CSS → output file.
//!
//! - [`compile`] runs `grass` on the entry stylesheet and hands the result
//!   to [`prefix`]. It only reads from the filesystem.
//! - [`prefix`] re-parses the CSS with `lightningcss`, adds vendor prefixes
//!   for the configured browsers and minifies.
//! - [`output`] writes the artifact into place.
//!
//! [`build`] glues these together and is what the compile backend runs for
//! every trigger. Compilation errors come back as [`BuildOutcome::Failed`];
//! anything else (e.g. an unwritable output directory) is an `Err`.

pub mod compile;
pub mod output;
pub mod prefix;

use tracing::{info, warn};

use crate::config::ResolvedConfig;
use crate::errors::{CompilationError, Result};
use crate::fs::FileSystem;

pub use compile::{compile, CssArtifact};
pub use output::{write_artifact, WriteStatus};
pub use prefix::{prefix, PrefixOptions};

/// Result of one pipeline run that did not hit a fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Built {
        artifact: CssArtifact,
        status: WriteStatus,
    },
    /// Compilation failed; the output file was not touched.
    Failed(CompilationError),
}

impl BuildOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, BuildOutcome::Built { .. })
    }
}

/// Compile the entry stylesheet and write the artifact.
pub fn build(cfg: &ResolvedConfig, fs: &dyn FileSystem) -> Result<BuildOutcome> {
    let artifact = match compile(cfg, fs) {
        Ok(artifact) => artifact,
        Err(err) => {
            warn!(
                entry = ?cfg.entry_path,
                stage = %err.stage,
                error = %err,
                "compilation failed; output left untouched"
            );
            return Ok(BuildOutcome::Failed(err));
        }
    };

    let status = write_artifact(&artifact, &cfg.output_path, fs)?;
    info!(
        output = ?cfg.output_path,
        bytes = artifact.code.len(),
        digest = %artifact.short_digest(),
        ?status,
        "stylesheet built"
    );

    Ok(BuildOutcome::Built { artifact, status })
}
