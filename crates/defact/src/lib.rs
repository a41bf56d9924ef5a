//! Front end for the defact checker.
//!
//! The library surface is the pipeline: load a decl-set document produced
//! by an upstream resolver, run the default-factory rule over every class
//! it declares, and hand back diagnostics ready for rendering. The `defact`
//! binary in this crate is a thin CLI over the same functions.

mod pipeline;

pub use pipeline::{
    analyze, check_file, load_decl_set, render_report, AnalysisResult, LoadError,
};

pub use defact_check::{check_all, find_mismatch, ClassRegistry, Mismatch, TypeMatcher};
pub use defact_decl::DeclSet;
pub use defact_diag::{Diagnostic, Severity};
