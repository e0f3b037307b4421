// src/pipeline/prefix.rs

//! Vendor prefixing and minification via `lightningcss`.

use std::sync::{Arc, RwLock};

use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};
use tracing::warn;

use crate::errors::{CompilationError, CompileStage};
use crate::types::OutputStyle;

/// Browser targets plus output formatting for the prefixer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixOptions {
    pub targets: Targets,
    pub minify: bool,
}

impl PrefixOptions {
    /// Build options from browserslist queries such as `"defaults"` or
    /// `"last 2 versions, not dead"`. An empty list means no prefixing.
    pub fn from_browserslist<S: AsRef<str>>(
        queries: &[S],
        style: OutputStyle,
    ) -> anyhow::Result<Self> {
        let browsers = if queries.is_empty() {
            None
        } else {
            Browsers::from_browserslist(queries.iter().map(|q| q.as_ref()))?
        };

        Ok(Self {
            targets: Targets {
                browsers,
                ..Targets::default()
            },
            minify: style.is_compressed(),
        })
    }
}

/// Byte order mark grass puts in front of compressed output with non-ASCII text.
const BOM: char = '\u{feff}';

/// Add the vendor prefixes `options.targets` needs and re-print `css`.
///
/// `label` names the compiled CSS in messages; positions refer to it, not to
/// the SCSS sources. Rules and declarations lightningcss cannot parse (old
/// IE hacks like `*zoom: 1`) are dropped with a warning instead of failing
/// the build.
pub fn prefix(css: &str, label: &str, options: &PrefixOptions) -> Result<String, CompilationError> {
    let (bom, body) = match css.strip_prefix(BOM) {
        Some(rest) => (true, rest),
        None => (false, css),
    };

    let warnings = Arc::new(RwLock::new(Vec::new()));
    let parser_options = ParserOptions {
        filename: label.to_string(),
        error_recovery: true,
        warnings: Some(Arc::clone(&warnings)),
        ..ParserOptions::default()
    };

    let mut sheet = StyleSheet::parse(body, parser_options).map_err(prefix_error)?;

    if let Ok(warnings) = warnings.read() {
        for warning in warnings.iter() {
            warn!(css = label, "skipped unsupported CSS: {warning}");
        }
    }

    sheet
        .minify(MinifyOptions {
            targets: options.targets,
            ..MinifyOptions::default()
        })
        .map_err(prefix_error)?;

    let printed = sheet
        .to_css(PrinterOptions {
            minify: options.minify,
            targets: options.targets,
            ..PrinterOptions::default()
        })
        .map_err(prefix_error)?;

    let mut code = printed.code;
    if bom {
        code.insert(0, BOM);
    }
    Ok(code)
}

fn prefix_error(err: impl std::fmt::Display) -> CompilationError {
    CompilationError::new(CompileStage::Prefix, err.to_string())
}
