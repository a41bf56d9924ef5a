//! Type representations for defact.
//!
//! This crate defines the semantic types the checker compares. They are
//! resolved annotation values handed over by an upstream resolver, not
//! syntax: by the time a [`Type`] exists, names have been resolved and
//! parameters instantiated (or explicitly left [`Type::Unknown`]).

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A resolved annotation type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    // -- Scalars --
    Int,
    Str,
    Float,
    Bool,
    Bytes,
    Complex,
    /// The `None` singleton type.
    None,

    // -- Dynamic, bottom, and missing information --
    /// Explicit `Any`: compatible in both directions.
    Any,
    /// Bottom type (`Never`/`NoReturn`): assignable to everything.
    Never,
    /// The resolver could not produce a type. Carrying `Unknown` suppresses
    /// judgment; it is never reported against.
    Unknown,

    // -- Containers --
    List { element: Box<Type> },
    Set { element: Box<Type> },
    FrozenSet { element: Box<Type> },
    Dict { key: Box<Type>, value: Box<Type> },
    Tuple { shape: TupleShape },

    // -- Nominal types --
    /// Class type, optionally parameterized. Omitted `args` means the
    /// annotation was spelled bare (`Widget` rather than `Widget[int]`).
    Class { name: String, args: Vec<Type> },

    /// Union of alternatives. Always flattened and deduplicated; build one
    /// through [`Type::union`] to keep that invariant.
    Union { members: Vec<Type> },
}

/// Element layout of a tuple annotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TupleShape {
    /// `tuple[int, str]` — fixed arity, one type per position.
    Fixed(Vec<Type>),
    /// `tuple[int, ...]` — any length, a single element type.
    Homogeneous(Box<Type>),
}

/// Builtin scalar names as they appear in class position.
pub const SCALAR_CLASS_NAMES: [&str; 6] = ["int", "str", "float", "bool", "bytes", "complex"];

/// The scalar type a builtin class name denotes, if any.
///
/// Resolvers may spell builtins either as scalars or as class references
/// (`int` vs. a class type named `int`); the matcher folds the latter onto
/// the former through this table.
pub fn scalar_for_class_name(name: &str) -> Option<Type> {
    match name {
        "int" => Some(Type::Int),
        "str" => Some(Type::Str),
        "float" => Some(Type::Float),
        "bool" => Some(Type::Bool),
        "bytes" => Some(Type::Bytes),
        "complex" => Some(Type::Complex),
        _ => None,
    }
}

impl Type {
    pub fn list(element: Type) -> Self {
        Type::List {
            element: Box::new(element),
        }
    }

    pub fn set(element: Type) -> Self {
        Type::Set {
            element: Box::new(element),
        }
    }

    pub fn frozen_set(element: Type) -> Self {
        Type::FrozenSet {
            element: Box::new(element),
        }
    }

    pub fn dict(key: Type, value: Type) -> Self {
        Type::Dict {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Fixed-arity tuple: `tuple[a, b, …]`.
    pub fn tuple(elements: Vec<Type>) -> Self {
        Type::Tuple {
            shape: TupleShape::Fixed(elements),
        }
    }

    /// Homogeneous tuple: `tuple[t, ...]`.
    pub fn homogeneous_tuple(element: Type) -> Self {
        Type::Tuple {
            shape: TupleShape::Homogeneous(Box::new(element)),
        }
    }

    /// Bare class reference.
    pub fn class(name: impl Into<String>) -> Self {
        Type::Class {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Parameterized class reference.
    pub fn class_with_args(name: impl Into<String>, args: Vec<Type>) -> Self {
        Type::Class {
            name: name.into(),
            args,
        }
    }

    /// Build a union, flattening nested unions and dropping duplicates while
    /// preserving first-seen order. A single surviving member collapses to
    /// itself; an empty member list collapses to [`Type::Never`].
    pub fn union(members: Vec<Type>) -> Self {
        let mut flat = Vec::with_capacity(members.len());
        for member in members {
            flatten_union_member(member, &mut flat);
        }
        match flat.len() {
            0 => Type::Never,
            1 => flat.into_iter().next().unwrap_or(Type::Never),
            _ => Type::Union { members: flat },
        }
    }

    /// `t | None`.
    pub fn optional(inner: Type) -> Self {
        Type::union(vec![inner, Type::None])
    }

    /// Whether the resolver failed to produce this type.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Type::Unknown)
    }

    /// The class name when this is a nominal class type.
    pub fn class_name(&self) -> Option<&str> {
        match self {
            Type::Class { name, .. } => Some(name),
            _ => None,
        }
    }
}

fn flatten_union_member(member: Type, out: &mut Vec<Type>) {
    match member {
        Type::Union { members } => {
            for inner in members {
                flatten_union_member(inner, out);
            }
        }
        other => {
            if !out.contains(&other) {
                out.push(other);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Display (annotation syntax)
// ---------------------------------------------------------------------------

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Str => write!(f, "str"),
            Type::Float => write!(f, "float"),
            Type::Bool => write!(f, "bool"),
            Type::Bytes => write!(f, "bytes"),
            Type::Complex => write!(f, "complex"),
            Type::None => write!(f, "None"),
            Type::Any => write!(f, "Any"),
            Type::Never => write!(f, "Never"),
            Type::Unknown => write!(f, "Unknown"),

            Type::List { element } => write!(f, "list[{element}]"),
            Type::Set { element } => write!(f, "set[{element}]"),
            Type::FrozenSet { element } => write!(f, "frozenset[{element}]"),
            Type::Dict { key, value } => write!(f, "dict[{key}, {value}]"),
            Type::Tuple { shape } => match shape {
                TupleShape::Fixed(elements) if elements.is_empty() => write!(f, "tuple[()]"),
                TupleShape::Fixed(elements) => {
                    write!(f, "tuple[")?;
                    for (i, element) in elements.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{element}")?;
                    }
                    write!(f, "]")
                }
                TupleShape::Homogeneous(element) => write!(f, "tuple[{element}, ...]"),
            },

            Type::Class { name, args } => {
                write!(f, "{name}")?;
                if !args.is_empty() {
                    write!(f, "[")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    write!(f, "]")?;
                }
                Ok(())
            }

            Type::Union { members } => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
        }
    }
}
