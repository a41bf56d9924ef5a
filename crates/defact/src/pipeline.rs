//! Load, check, report.
//!
//! The pipeline deserializes a decl-set document, validates its file
//! references, runs the factory rule over every declared class, and renders
//! the resulting diagnostics with source paths resolved.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use defact_check::check_all;
use defact_decl::{DeclSet, FileId};
use defact_diag::{Diagnostic, Severity};

/// Why a decl-set document could not be loaded.
///
/// These are input-layer failures, distinct from diagnostics: a decl set
/// that loads cleanly never makes the checker itself fail.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse `{path}`: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid decl set in `{path}`: {reason}")]
    Invalid { path: String, reason: String },
}

/// What one analysis run produced.
#[derive(Debug)]
pub struct AnalysisResult {
    pub diagnostics: Vec<Diagnostic>,
    pub classes_checked: usize,
    pub bindings_checked: usize,
}

impl AnalysisResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| matches!(diag.severity, Severity::Error))
    }
}

/// Read and validate a decl-set document.
pub fn load_decl_set(path: &Path) -> Result<DeclSet, LoadError> {
    let display = path.display().to_string();
    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: display.clone(),
        source,
    })?;
    let decls: DeclSet = serde_json::from_str(&source).map_err(|source| LoadError::Json {
        path: display.clone(),
        source,
    })?;
    decls.validate().map_err(|reason| LoadError::Invalid {
        path: display,
        reason,
    })?;
    Ok(decls)
}

/// Run the factory rule over every class in a decl set.
pub fn analyze(decls: &DeclSet) -> AnalysisResult {
    let diagnostics = check_all(decls);
    AnalysisResult {
        classes_checked: decls.classes.len(),
        bindings_checked: decls.classes.iter().map(|c| c.bindings.len()).sum(),
        diagnostics,
    }
}

/// Load a decl-set document and analyze it in one step.
pub fn check_file(path: &Path) -> Result<AnalysisResult, LoadError> {
    let decls = load_decl_set(path)?;
    Ok(analyze(&decls))
}

/// Render diagnostics as one report line each, prefixed with the source
/// path and byte range when the diagnostic carries a location.
pub fn render_report(decls: &DeclSet, diagnostics: &[Diagnostic]) -> String {
    let mut out = String::new();
    for diag in diagnostics {
        if let Some(location) = diag.location {
            if let Some(path) = decls.path(FileId(location.file_id)) {
                let _ = write!(out, "{path}:{}..{}: ", location.start, location.end);
            }
        }
        let _ = writeln!(out, "{diag}");
    }
    out
}
