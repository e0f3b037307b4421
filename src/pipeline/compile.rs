// src/pipeline/compile.rs

use std::io;
use std::path::Path;

use tracing::debug;

use crate::config::ResolvedConfig;
use crate::errors::{CompilationError, CompileStage};
use crate::fs::FileSystem;
use crate::pipeline::prefix::prefix;
use crate::types::OutputStyle;

/// Compiled, prefixed stylesheet ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssArtifact {
    pub code: String,
    /// blake3 hex digest of `code`.
    pub digest: String,
}

impl CssArtifact {
    pub fn new(code: String) -> Self {
        let digest = blake3::hash(code.as_bytes()).to_hex().to_string();
        Self { code, digest }
    }

    /// First 12 hex chars of the digest, for log lines.
    pub fn short_digest(&self) -> &str {
        &self.digest[..12]
    }
}

/// Lets `grass` resolve imports through our [`FileSystem`].
#[derive(Debug)]
struct GrassFs<'a>(&'a dyn FileSystem);

impl grass::Fs for GrassFs<'_> {
    fn is_dir(&self, path: &Path) -> bool {
        self.0.is_dir(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.0.is_file(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.0
            .read(path)
            .map_err(|e| io::Error::new(io::ErrorKind::NotFound, e.to_string()))
    }
}

/// Compile the configured entry stylesheet into a prefixed CSS artifact.
///
/// Reads the entry and its imports (searched in `include_roots`), never
/// writes. The same inputs always produce the same bytes.
pub fn compile(cfg: &ResolvedConfig, fs: &dyn FileSystem) -> Result<CssArtifact, CompilationError> {
    if !fs.is_file(&cfg.entry_path) {
        return Err(CompilationError::new(
            CompileStage::Sass,
            format!("entry stylesheet {} not found", cfg.entry_path.display()),
        ));
    }

    debug!(
        entry = ?cfg.entry_path,
        include_roots = ?cfg.include_roots,
        "compiling stylesheet"
    );

    let grass_fs = GrassFs(fs);
    let options = grass::Options::default()
        .style(grass_style(cfg.style))
        .load_paths(&cfg.include_roots)
        .fs(&grass_fs);

    let css = grass::from_path(&cfg.entry_path, &options)
        .map_err(|e| CompilationError::new(CompileStage::Sass, sass_error_message(&e.to_string())))?;

    // Prefixer positions point into the compiled CSS, not the SCSS sources.
    let label = cfg.output_path.to_string_lossy();
    let code = prefix(&css, &label, &cfg.prefix)?;

    Ok(CssArtifact::new(code))
}

fn grass_style(style: OutputStyle) -> grass::OutputStyle {
    match style {
        OutputStyle::Compressed => grass::OutputStyle::Compressed,
        OutputStyle::Expanded => grass::OutputStyle::Expanded,
    }
}

/// Collapse grass's multi-line diagnostic into one line.
///
/// grass renders `Error: <message>`, a source excerpt, then the location as
/// the last line. We keep the message and the location.
fn sass_error_message(rendered: &str) -> String {
    let mut lines = rendered.lines().map(str::trim).filter(|l| !l.is_empty());
    let first = lines.next().unwrap_or_default();
    let summary = first.strip_prefix("Error:").unwrap_or(first).trim();

    let location = lines
        .last()
        .filter(|l| !l.starts_with(['╵', '│', '╷', '|', ',', '\'']) && l.contains(':'))
        .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "));

    match location {
        Some(loc) => format!("{summary} ({loc})"),
        None => summary.to_string(),
    }
}
