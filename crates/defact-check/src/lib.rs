//! Assignability checking for defact.
//!
//! This crate decides whether the value produced by a default factory may
//! initialize the field it is bound to. [`TypeMatcher`] implements the
//! assignability relation over resolved annotation types; the [`factory`]
//! module applies it to factory bindings and turns rejected pairs into
//! diagnostics.
//!
//! The matcher is deliberately not a general inference engine: it never
//! invents types, it only compares the two the resolver handed over. When
//! either side is unresolved it accepts the pair and leaves judgment to a
//! run with better information.

pub mod factory;
pub mod trace;

use std::collections::{BTreeMap, BTreeSet};

use defact_decl::DeclSet;
use defact_types::{scalar_for_class_name, TupleShape, Type};

use crate::trace::{AssignRule, AssignStep};

// Re-export for convenience.
pub use crate::factory::{
    check_all, check_all_strict, check_binding, check_class, find_mismatch, mismatch_message,
    Mismatch,
};
pub use defact_diag::{Category, Diagnostic, DiagnosticError, SourceLocation};

/// The implicit root of every class hierarchy.
pub const OBJECT_CLASS: &str = "object";

// ---------------------------------------------------------------------------
// Class registry
// ---------------------------------------------------------------------------

/// Known classes and their direct bases.
///
/// Subclass queries are reflexive and transitive, treat [`OBJECT_CLASS`] as
/// the root of the hierarchy, and tolerate cycles in the recorded bases.
/// A class the registry has never seen is a leaf directly under `object`.
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    bases: BTreeMap<String, Vec<String>>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every class declared in a decl set.
    pub fn from_decl_set(decls: &DeclSet) -> Self {
        let mut registry = Self::new();
        for class in &decls.classes {
            registry.insert(class.name.clone(), class.bases.clone());
        }
        registry
    }

    /// Record a class and its direct bases.
    pub fn insert(&mut self, name: impl Into<String>, bases: Vec<String>) {
        self.bases.insert(name.into(), bases);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bases.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Whether `sub` names the same class as `sup` or inherits from it.
    pub fn is_subclass(&self, sub: &str, sup: &str) -> bool {
        if sub == sup || sup == OBJECT_CLASS {
            return true;
        }
        let mut seen = BTreeSet::new();
        let mut pending = vec![sub];
        while let Some(name) = pending.pop() {
            if !seen.insert(name) {
                continue;
            }
            let Some(bases) = self.bases.get(name) else {
                continue;
            };
            for base in bases {
                if base.as_str() == sup {
                    return true;
                }
                pending.push(base.as_str());
            }
        }
        false
    }
}

// ---------------------------------------------------------------------------
// Assignability
// ---------------------------------------------------------------------------

/// Decides whether a value type may initialize a field with a given
/// annotation.
///
/// The relation decomposes unions on the value side before the annotation
/// side, widens along the numeric tower, treats mutable containers as
/// invariant in their parameters, and falls back to nominal subclassing
/// through the [`ClassRegistry`] for class types.
///
/// Every decision can be traced. Tracing is opt-in via
/// [`TypeMatcher::enable_tracing`] with zero overhead when disabled.
#[derive(Debug)]
pub struct TypeMatcher<'a> {
    registry: &'a ClassRegistry,
    /// When true, every rule decision is recorded for observability tools.
    tracing: bool,
    /// Rule trace (populated only when `tracing` is true).
    trace: Vec<AssignStep>,
}

impl<'a> TypeMatcher<'a> {
    pub fn new(registry: &'a ClassRegistry) -> Self {
        Self {
            registry,
            tracing: false,
            trace: Vec::new(),
        }
    }

    /// Enable step-by-step rule tracing.
    pub fn enable_tracing(&mut self) {
        self.tracing = true;
    }

    /// Whether tracing is active.
    pub fn is_tracing(&self) -> bool {
        self.tracing
    }

    /// Get the rule trace (empty if tracing was not enabled).
    pub fn trace(&self) -> &[AssignStep] {
        &self.trace
    }

    /// Take and clear the rule trace.
    pub fn take_trace(&mut self) -> Vec<AssignStep> {
        std::mem::take(&mut self.trace)
    }

    fn push_step(&mut self, rule: AssignRule, declared: &Type, actual: &Type, detail: String) {
        if self.tracing {
            let step = self.trace.len() + 1;
            self.trace.push(AssignStep {
                step,
                rule,
                declared: declared.to_string(),
                actual: actual.to_string(),
                detail,
            });
        }
    }

    /// Whether a value of type `actual` may initialize a field annotated
    /// with `declared`.
    pub fn matches(&mut self, declared: &Type, actual: &Type) -> bool {
        if declared.is_unknown() || actual.is_unknown() {
            self.push_step(
                AssignRule::UnresolvedSkip,
                declared,
                actual,
                "unresolved type suppresses judgment".into(),
            );
            return true;
        }

        if matches!(declared, Type::Any) || matches!(actual, Type::Any) {
            self.push_step(
                AssignRule::AnyWildcard,
                declared,
                actual,
                "Any is compatible in both directions".into(),
            );
            return true;
        }

        if matches!(actual, Type::Never) {
            self.push_step(
                AssignRule::BottomPromotion,
                declared,
                actual,
                "Never is bottom and assignable to any annotation".into(),
            );
            return true;
        }

        // The value side decomposes first: a union is acceptable only when
        // every alternative it may produce is accepted.
        if let Type::Union { members } = actual {
            self.push_step(
                AssignRule::UnionActual,
                declared,
                actual,
                "every produced alternative must be accepted".into(),
            );
            return members.iter().all(|member| self.matches(declared, member));
        }

        if let Type::Union { members } = declared {
            self.push_step(
                AssignRule::UnionDeclared,
                declared,
                actual,
                "one accepting alternative suffices".into(),
            );
            return members.iter().any(|member| self.matches(member, actual));
        }

        let declared = fold_scalar_class(declared);
        let actual = fold_scalar_class(actual);
        self.structural(&declared, &actual)
    }

    fn structural(&mut self, declared: &Type, actual: &Type) -> bool {
        match (declared, actual) {
            // Identical types: nothing to do.
            _ if declared == actual => {
                self.push_step(
                    AssignRule::Identity,
                    declared,
                    actual,
                    "types already equal".into(),
                );
                true
            }

            _ if widens_numerically(declared, actual) => {
                self.push_step(
                    AssignRule::NumericWiden,
                    declared,
                    actual,
                    format!("'{actual}' widens to '{declared}' in the numeric tower"),
                );
                true
            }

            (Type::List { element: d }, Type::List { element: a }) => {
                self.push_step(
                    AssignRule::Decompose,
                    declared,
                    actual,
                    "list is invariant in its element type".into(),
                );
                self.equivalent(d, a)
            }

            (Type::Set { element: d }, Type::Set { element: a }) => {
                self.push_step(
                    AssignRule::Decompose,
                    declared,
                    actual,
                    "set is invariant in its element type".into(),
                );
                self.equivalent(d, a)
            }

            (Type::Dict { key: dk, value: dv }, Type::Dict { key: ak, value: av }) => {
                self.push_step(
                    AssignRule::Decompose,
                    declared,
                    actual,
                    "dict is invariant in its key and value types".into(),
                );
                self.equivalent(dk, ak) && self.equivalent(dv, av)
            }

            (Type::FrozenSet { element: d }, Type::FrozenSet { element: a }) => {
                self.push_step(
                    AssignRule::Decompose,
                    declared,
                    actual,
                    "frozenset is covariant in its element type".into(),
                );
                self.matches(d, a)
            }

            (Type::Tuple { shape: d }, Type::Tuple { shape: a }) => match (d, a) {
                (TupleShape::Homogeneous(de), TupleShape::Homogeneous(ae)) => {
                    self.push_step(
                        AssignRule::Decompose,
                        declared,
                        actual,
                        "variable-length tuple is covariant in its element type".into(),
                    );
                    self.matches(de, ae)
                }
                (TupleShape::Homogeneous(de), TupleShape::Fixed(aes)) => {
                    self.push_step(
                        AssignRule::Decompose,
                        declared,
                        actual,
                        "fixed tuple satisfies a variable-length annotation".into(),
                    );
                    aes.iter().all(|ae| self.matches(de, ae))
                }
                (TupleShape::Fixed(des), TupleShape::Fixed(aes)) if des.len() == aes.len() => {
                    self.push_step(
                        AssignRule::Decompose,
                        declared,
                        actual,
                        "tuple elements compared positionally".into(),
                    );
                    des.iter().zip(aes).all(|(de, ae)| self.matches(de, ae))
                }
                _ => {
                    self.push_step(
                        AssignRule::Mismatch,
                        declared,
                        actual,
                        "tuple shapes are incompatible".into(),
                    );
                    false
                }
            },

            _ => self.nominal(declared, actual),
        }
    }

    fn nominal(&mut self, declared: &Type, actual: &Type) -> bool {
        let (Some(sup), Some(sub)) = (nominal_name(declared), nominal_name(actual)) else {
            self.push_step(
                AssignRule::Mismatch,
                declared,
                actual,
                "no assignability rule applies".into(),
            );
            return false;
        };

        if sup == sub {
            // Same class spelled through different representations, or the
            // same generic at different parameterizations.
            let declared_args = class_args(declared);
            let actual_args = class_args(actual);
            if declared_args.is_empty() || actual_args.is_empty() {
                self.push_step(
                    AssignRule::Subclass,
                    declared,
                    actual,
                    format!("bare `{sup}` reference accepts any parameterization"),
                );
                return true;
            }
            if declared_args.len() != actual_args.len() {
                self.push_step(
                    AssignRule::Mismatch,
                    declared,
                    actual,
                    "type argument counts differ".into(),
                );
                return false;
            }
            self.push_step(
                AssignRule::Decompose,
                declared,
                actual,
                "type arguments of the same class are invariant".into(),
            );
            return declared_args
                .iter()
                .zip(actual_args)
                .all(|(d, a)| self.equivalent(d, a));
        }

        if self.registry.is_subclass(sub, sup) {
            self.push_step(
                AssignRule::Subclass,
                declared,
                actual,
                format!("`{sub}` is a subclass of `{sup}`"),
            );
            true
        } else {
            self.push_step(
                AssignRule::Mismatch,
                declared,
                actual,
                format!("`{sub}` is not a subclass of `{sup}`"),
            );
            false
        }
    }

    /// Invariant position: both directions must accept.
    fn equivalent(&mut self, declared: &Type, actual: &Type) -> bool {
        self.matches(declared, actual) && self.matches(actual, declared)
    }
}

/// One-shot assignability query without tracing.
pub fn is_assignable(registry: &ClassRegistry, declared: &Type, actual: &Type) -> bool {
    let mut matcher = TypeMatcher::new(registry);
    matcher.matches(declared, actual)
}

/// One-shot assignability query with the rule trace that produced it.
pub fn decide(
    registry: &ClassRegistry,
    declared: &Type,
    actual: &Type,
) -> (bool, Vec<AssignStep>) {
    let mut matcher = TypeMatcher::new(registry);
    matcher.enable_tracing();
    let accepted = matcher.matches(declared, actual);
    (accepted, matcher.take_trace())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Builtin scalars may arrive spelled as class references; fold them onto
/// the scalar representation before structural matching.
fn fold_scalar_class(ty: &Type) -> Type {
    if let Type::Class { name, args } = ty {
        if args.is_empty() {
            if let Some(scalar) = scalar_for_class_name(name) {
                return scalar;
            }
        }
    }
    ty.clone()
}

/// The runtime class behind a type, for nominal comparisons.
fn nominal_name(ty: &Type) -> Option<&str> {
    match ty {
        Type::Int => Some("int"),
        Type::Str => Some("str"),
        Type::Float => Some("float"),
        Type::Bool => Some("bool"),
        Type::Bytes => Some("bytes"),
        Type::Complex => Some("complex"),
        Type::None => Some("NoneType"),
        Type::List { .. } => Some("list"),
        Type::Set { .. } => Some("set"),
        Type::FrozenSet { .. } => Some("frozenset"),
        Type::Dict { .. } => Some("dict"),
        Type::Tuple { .. } => Some("tuple"),
        Type::Class { name, .. } => Some(name),
        Type::Any | Type::Never | Type::Unknown | Type::Union { .. } => None,
    }
}

fn class_args(ty: &Type) -> &[Type] {
    match ty {
        Type::Class { args, .. } => args,
        _ => &[],
    }
}

fn numeric_rank(ty: &Type) -> Option<u8> {
    match ty {
        Type::Bool => Some(0),
        Type::Int => Some(1),
        Type::Float => Some(2),
        Type::Complex => Some(3),
        _ => None,
    }
}

fn widens_numerically(declared: &Type, actual: &Type) -> bool {
    match (numeric_rank(declared), numeric_rank(actual)) {
        (Some(declared_rank), Some(actual_rank)) => actual_rank <= declared_rank,
        _ => false,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ClassRegistry {
        let mut registry = ClassRegistry::new();
        registry.insert("Base", vec![]);
        registry.insert("Middle", vec!["Base".to_string()]);
        registry.insert("Leaf", vec!["Middle".to_string()]);
        registry.insert("Other", vec![]);
        registry
    }

    fn accepts(declared: &Type, actual: &Type) -> bool {
        is_assignable(&registry(), declared, actual)
    }

    // -- registry --

    #[test]
    fn subclass_is_reflexive() {
        let reg = registry();
        assert!(reg.is_subclass("Base", "Base"));
        assert!(reg.is_subclass("NeverHeardOf", "NeverHeardOf"));
    }

    #[test]
    fn subclass_follows_direct_and_transitive_bases() {
        let reg = registry();
        assert!(reg.is_subclass("Middle", "Base"));
        assert!(reg.is_subclass("Leaf", "Base"));
        assert!(!reg.is_subclass("Base", "Leaf"));
        assert!(!reg.is_subclass("Other", "Base"));
    }

    #[test]
    fn object_is_the_root_of_every_hierarchy() {
        let reg = registry();
        assert!(reg.is_subclass("Leaf", OBJECT_CLASS));
        assert!(reg.is_subclass("NeverHeardOf", OBJECT_CLASS));
        assert!(!reg.is_subclass(OBJECT_CLASS, "Leaf"));
    }

    #[test]
    fn subclass_tolerates_base_cycles() {
        let mut reg = ClassRegistry::new();
        reg.insert("A", vec!["B".to_string()]);
        reg.insert("B", vec!["A".to_string()]);
        assert!(reg.is_subclass("A", "B"));
        assert!(reg.is_subclass("B", "A"));
        assert!(!reg.is_subclass("A", "C"));
    }

    #[test]
    fn unknown_classes_are_leaves_under_object() {
        let reg = ClassRegistry::new();
        assert!(reg.is_subclass("Mystery", OBJECT_CLASS));
        assert!(!reg.is_subclass("Mystery", "Base"));
    }

    // -- scalars and the numeric tower --

    #[test]
    fn identical_scalars_match() {
        assert!(accepts(&Type::Int, &Type::Int));
        assert!(accepts(&Type::Str, &Type::Str));
        assert!(accepts(&Type::None, &Type::None));
    }

    #[test]
    fn annotation_int_rejects_str_factory() {
        assert!(!accepts(&Type::Int, &Type::Str));
        assert!(!accepts(&Type::Str, &Type::Int));
    }

    #[test]
    fn numeric_tower_widens_upward_only() {
        assert!(accepts(&Type::Int, &Type::Bool));
        assert!(accepts(&Type::Float, &Type::Int));
        assert!(accepts(&Type::Float, &Type::Bool));
        assert!(accepts(&Type::Complex, &Type::Float));
        assert!(accepts(&Type::Complex, &Type::Int));

        assert!(!accepts(&Type::Int, &Type::Float));
        assert!(!accepts(&Type::Bool, &Type::Int));
        assert!(!accepts(&Type::Float, &Type::Complex));
    }

    #[test]
    fn scalar_class_references_fold_onto_scalars() {
        assert!(accepts(&Type::class("int"), &Type::Int));
        assert!(accepts(&Type::Int, &Type::class("int")));
        assert!(accepts(&Type::Float, &Type::class("int")));
        assert!(!accepts(&Type::class("int"), &Type::Str));
    }

    // -- wildcards, bottom, unresolved --

    #[test]
    fn any_matches_in_both_directions() {
        assert!(accepts(&Type::Any, &Type::Str));
        assert!(accepts(&Type::Int, &Type::Any));
        assert!(accepts(&Type::list(Type::Any), &Type::list(Type::Int)));
        assert!(accepts(&Type::list(Type::Int), &Type::list(Type::Any)));
    }

    #[test]
    fn unknown_suppresses_judgment() {
        assert!(accepts(&Type::Unknown, &Type::Str));
        assert!(accepts(&Type::Int, &Type::Unknown));
        assert!(accepts(&Type::list(Type::Int), &Type::list(Type::Unknown)));
    }

    #[test]
    fn never_promotes_but_never_accepts() {
        assert!(accepts(&Type::Int, &Type::Never));
        assert!(accepts(&Type::Never, &Type::Never));
        assert!(!accepts(&Type::Never, &Type::Int));
    }

    // -- unions --

    #[test]
    fn union_annotation_accepts_each_member() {
        let declared = Type::union(vec![Type::Int, Type::Str]);
        assert!(accepts(&declared, &Type::Int));
        assert!(accepts(&declared, &Type::Str));
        assert!(!accepts(&declared, &Type::Bytes));
    }

    #[test]
    fn union_value_requires_every_member_accepted() {
        let produced = Type::union(vec![Type::Int, Type::Str]);
        assert!(!accepts(&Type::Int, &produced));
        assert!(accepts(
            &Type::union(vec![Type::Int, Type::Str, Type::None]),
            &produced
        ));
    }

    #[test]
    fn union_is_reflexively_assignable() {
        let ty = Type::union(vec![Type::Int, Type::Str]);
        assert!(accepts(&ty, &ty));
    }

    #[test]
    fn optional_accepts_none_and_inner() {
        let declared = Type::optional(Type::Int);
        assert!(accepts(&declared, &Type::None));
        assert!(accepts(&declared, &Type::Int));
        assert!(!accepts(&declared, &Type::Str));
        assert!(!accepts(&Type::Int, &Type::None));
    }

    // -- containers --

    #[test]
    fn lists_are_invariant() {
        assert!(accepts(&Type::list(Type::Int), &Type::list(Type::Int)));
        assert!(!accepts(&Type::list(Type::Float), &Type::list(Type::Int)));
        assert!(!accepts(&Type::list(Type::Int), &Type::list(Type::Float)));
        assert!(!accepts(&Type::list(Type::Int), &Type::set(Type::Int)));
    }

    #[test]
    fn sets_are_invariant_but_frozensets_are_covariant() {
        assert!(!accepts(&Type::set(Type::Float), &Type::set(Type::Int)));
        assert!(accepts(
            &Type::frozen_set(Type::Float),
            &Type::frozen_set(Type::Int)
        ));
        assert!(!accepts(
            &Type::frozen_set(Type::Int),
            &Type::frozen_set(Type::Float)
        ));
    }

    #[test]
    fn dict_checks_key_and_value() {
        let declared = Type::dict(Type::Str, Type::Int);
        assert!(accepts(&declared, &Type::dict(Type::Str, Type::Int)));
        assert!(!accepts(&declared, &Type::dict(Type::Str, Type::Str)));
        assert!(!accepts(&declared, &Type::dict(Type::Int, Type::Int)));
    }

    #[test]
    fn tuple_shape_rules() {
        let pair = Type::tuple(vec![Type::Int, Type::Str]);
        assert!(accepts(&pair, &Type::tuple(vec![Type::Int, Type::Str])));
        assert!(!accepts(&pair, &Type::tuple(vec![Type::Str, Type::Int])));
        assert!(!accepts(&pair, &Type::tuple(vec![Type::Int])));

        let homogeneous = Type::homogeneous_tuple(Type::Int);
        assert!(accepts(&homogeneous, &Type::tuple(vec![Type::Int, Type::Int])));
        assert!(accepts(&homogeneous, &Type::tuple(vec![])));
        assert!(accepts(&homogeneous, &Type::tuple(vec![Type::Bool])));
        assert!(!accepts(&homogeneous, &Type::tuple(vec![Type::Int, Type::Str])));
        assert!(!accepts(&pair, &homogeneous));

        assert!(accepts(
            &Type::homogeneous_tuple(Type::Float),
            &Type::homogeneous_tuple(Type::Int)
        ));
    }

    // -- classes --

    #[test]
    fn classes_match_nominally() {
        assert!(accepts(&Type::class("Base"), &Type::class("Leaf")));
        assert!(accepts(&Type::class("Base"), &Type::class("Middle")));
        assert!(!accepts(&Type::class("Leaf"), &Type::class("Base")));
        assert!(!accepts(&Type::class("Base"), &Type::class("Other")));
    }

    #[test]
    fn bare_class_reference_accepts_any_parameterization() {
        let bare = Type::class("Registry");
        let parameterized = Type::class_with_args("Registry", vec![Type::Str, Type::Int]);
        assert!(accepts(&bare, &parameterized));
        assert!(accepts(&parameterized, &bare));
    }

    #[test]
    fn same_class_type_arguments_are_invariant() {
        let of_int = Type::class_with_args("Registry", vec![Type::Int]);
        let of_str = Type::class_with_args("Registry", vec![Type::Str]);
        let of_any = Type::class_with_args("Registry", vec![Type::Any]);
        assert!(accepts(&of_int, &of_int));
        assert!(!accepts(&of_int, &of_str));
        assert!(accepts(&of_any, &of_int));
        assert!(accepts(&of_int, &of_any));
    }

    #[test]
    fn proper_subclass_is_accepted_nominally_regardless_of_arguments() {
        let declared = Type::class_with_args("Base", vec![Type::Int]);
        let actual = Type::class_with_args("Leaf", vec![Type::Str]);
        assert!(accepts(&declared, &actual));
    }

    #[test]
    fn scalar_subclasses_pass_through_the_registry() {
        let mut reg = ClassRegistry::new();
        reg.insert("UserId", vec!["int".to_string()]);
        assert!(is_assignable(&reg, &Type::Int, &Type::class("UserId")));
        assert!(!is_assignable(&reg, &Type::Str, &Type::class("UserId")));
    }

    #[test]
    fn object_annotation_accepts_everything_concrete() {
        let object = Type::class(OBJECT_CLASS);
        assert!(accepts(&object, &Type::Int));
        assert!(accepts(&object, &Type::None));
        assert!(accepts(&object, &Type::list(Type::Int)));
        assert!(accepts(&object, &Type::class("Leaf")));
        assert!(accepts(&object, &Type::union(vec![Type::Int, Type::Str])));
    }

    // -- tracing --

    #[test]
    fn trace_is_empty_unless_enabled() {
        let reg = registry();
        let mut matcher = TypeMatcher::new(&reg);
        assert!(!matcher.matches(&Type::Int, &Type::Str));
        assert!(!matcher.is_tracing());
        assert!(matcher.trace().is_empty());
    }

    #[test]
    fn decide_records_the_rule_trail() {
        let reg = registry();
        let (accepted, steps) = decide(&reg, &Type::Int, &Type::Str);
        assert!(!accepted);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].rule, AssignRule::Mismatch);
        assert_eq!(steps[0].declared, "int");
        assert_eq!(steps[0].actual, "str");

        let (accepted, steps) = decide(&reg, &Type::optional(Type::Int), &Type::None);
        assert!(accepted);
        assert_eq!(steps[0].rule, AssignRule::UnionDeclared);
        assert!(steps.iter().any(|s| s.rule == AssignRule::Identity));
        let numbering: Vec<usize> = steps.iter().map(|s| s.step).collect();
        assert_eq!(numbering, (1..=steps.len()).collect::<Vec<_>>());
    }

    #[test]
    fn trace_steps_serialize_with_rule_tags() {
        let reg = registry();
        let (_, steps) = decide(&reg, &Type::Int, &Type::Str);

        let json = serde_json::to_value(&steps).expect("trace should serialize");
        assert_eq!(json[0]["step"], 1);
        assert_eq!(json[0]["rule"], "mismatch");
        assert_eq!(json[0]["declared"], "int");
        assert_eq!(json[0]["actual"], "str");

        let (_, steps) = decide(&reg, &Type::Int, &Type::Unknown);
        let json = serde_json::to_value(&steps).expect("trace should serialize");
        assert_eq!(json[0]["rule"], "unresolved_skip");
    }
}
