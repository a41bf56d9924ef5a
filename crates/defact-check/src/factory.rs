//! The default-factory rule.
//!
//! For every field bound to a zero-argument factory, the factory's return
//! type must be assignable to the field's annotation. Incompatible pairs
//! become [`Diagnostic`]s; pairs involving an unresolved type are skipped
//! without judgment.

use defact_decl::{ClassDecl, DeclSet, FactoryBinding, Span};
use defact_diag::{Category, Diagnostic, DiagnosticError, SourceLocation};

use crate::{ClassRegistry, TypeMatcher};

/// An incompatibility between a field annotation and its factory.
///
/// Carries the display names of both sides so callers can phrase reports
/// without re-rendering types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub field: String,
    pub declared: String,
    pub actual: String,
}

/// The user-facing message for a factory/annotation mismatch.
pub fn mismatch_message(declared: &str, actual: &str) -> String {
    format!("Type mismatch: field annotation is '{declared}', but default_factory returns '{actual}'")
}

/// Compare a field's annotation against its factory's return type.
///
/// Returns `None` when the factory result is assignable or when either
/// side is unresolved.
pub fn find_mismatch(registry: &ClassRegistry, binding: &FactoryBinding) -> Option<Mismatch> {
    let declared = &binding.field.declared;
    let actual = binding.factory.return_type();
    if declared.is_unknown() || actual.is_unknown() {
        return None;
    }

    let mut matcher = TypeMatcher::new(registry);
    if matcher.matches(declared, &actual) {
        return None;
    }

    Some(Mismatch {
        field: binding.field.name.clone(),
        declared: declared.to_string(),
        actual: actual.to_string(),
    })
}

/// Check one binding, producing a diagnostic on mismatch.
pub fn check_binding(registry: &ClassRegistry, binding: &FactoryBinding) -> Option<Diagnostic> {
    let mismatch = find_mismatch(registry, binding)?;

    let mut diag = Diagnostic::error(
        Category::TypeMismatch,
        mismatch_message(&mismatch.declared, &mismatch.actual),
    )
    .at(span_to_location(binding.factory.span()))
    .with_help(format!(
        "annotate the field as '{}' or pass a default_factory returning '{}'",
        mismatch.actual, mismatch.declared
    ));

    if let Some(annotation) = binding.field.annotation_span {
        diag = diag.with_label(
            span_to_location(annotation),
            format!("annotation of field `{}`", mismatch.field),
        );
    }

    Some(diag)
}

/// Check every factory binding declared on a class.
pub fn check_class(registry: &ClassRegistry, class: &ClassDecl) -> Vec<Diagnostic> {
    class
        .bindings
        .iter()
        .filter_map(|binding| check_binding(registry, binding))
        .collect()
}

/// Check every class in a decl set against the hierarchy it declares.
pub fn check_all(decls: &DeclSet) -> Vec<Diagnostic> {
    let registry = ClassRegistry::from_decl_set(decls);
    decls
        .classes
        .iter()
        .flat_map(|class| check_class(&registry, class))
        .collect()
}

/// Check every class in a decl set, failing when any binding mismatches.
///
/// The `Err` carries every diagnostic the run produced, for callers that
/// treat a mismatching decl set as a hard failure rather than a report.
pub fn check_all_strict(decls: &DeclSet) -> Result<(), DiagnosticError> {
    let diagnostics = check_all(decls);
    if diagnostics.is_empty() {
        Ok(())
    } else {
        Err(DiagnosticError::multiple(diagnostics))
    }
}

/// Convert a declaration span to a diagnostic location.
pub fn span_to_location(span: Span) -> SourceLocation {
    SourceLocation {
        file_id: span.file.0,
        start: span.start,
        end: span.end,
    }
}
