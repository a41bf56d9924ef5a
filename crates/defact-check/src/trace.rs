//! Tracing types for checker observability.
//!
//! These types capture step-by-step traces of assignability decisions,
//! exposing which rule fired for which pair of types. All tracing is
//! opt-in via `TypeMatcher::enable_tracing()` with zero overhead when
//! disabled.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Assignability trace
// ---------------------------------------------------------------------------

/// A single step in an assignability trace.
#[derive(Debug, Clone, Serialize)]
pub struct AssignStep {
    pub step: usize,
    pub rule: AssignRule,
    pub declared: String,
    pub actual: String,
    pub detail: String,
}

/// Which assignability rule fired during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignRule {
    /// Either side is unresolved. No judgment is made.
    UnresolvedSkip,
    /// `Any` on either side is compatible with everything.
    AnyWildcard,
    /// `Never` on the value side promotes to any annotation.
    BottomPromotion,
    /// The value side is a union. Every alternative must be accepted.
    UnionActual,
    /// The annotation side is a union. One accepting alternative suffices.
    UnionDeclared,
    /// Types are already identical.
    Identity,
    /// The value widens along the numeric tower (bool, int, float, complex).
    NumericWiden,
    /// Structural recursion into container parameters or type arguments.
    Decompose,
    /// Nominal acceptance through the class hierarchy.
    Subclass,
    /// No rule accepted the pair.
    Mismatch,
}

impl AssignRule {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignRule::UnresolvedSkip => "unresolved_skip",
            AssignRule::AnyWildcard => "any_wildcard",
            AssignRule::BottomPromotion => "bottom_promotion",
            AssignRule::UnionActual => "union_actual",
            AssignRule::UnionDeclared => "union_declared",
            AssignRule::Identity => "identity",
            AssignRule::NumericWiden => "numeric_widen",
            AssignRule::Decompose => "decompose",
            AssignRule::Subclass => "subclass",
            AssignRule::Mismatch => "mismatch",
        }
    }
}
