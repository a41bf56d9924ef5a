//! Declaration model for defact.
//!
//! An upstream resolver hands the checker already-resolved declarations —
//! no parsing happens here. Every declaration carries a [`Span`] so that
//! diagnostics can point back into the original source, and the whole
//! model round-trips through serde as the decl-set interchange document.

use serde::{Deserialize, Serialize};

use defact_types::{scalar_for_class_name, Type};

// ---------------------------------------------------------------------------
// Source locations
// ---------------------------------------------------------------------------

/// Identifies a source file within a decl set. `FileId(n)` indexes the
/// n-th entry of [`DeclSet::files`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct FileId(pub u32);

/// A byte offset range within a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub file: FileId,
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(file: FileId, start: u32, end: u32) -> Self {
        Self { file, start, end }
    }

    /// Create a span that covers both `self` and `other`.
    pub fn merge(self, other: Span) -> Span {
        debug_assert_eq!(
            self.file, other.file,
            "cannot merge spans from different files"
        );
        Span {
            file: self.file,
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// A span for declarations without a real source position.
    pub fn synthetic() -> Self {
        Self {
            file: FileId(u32::MAX),
            start: 0,
            end: 0,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        self.file == FileId(u32::MAX)
    }
}

/// A source file referenced by declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: String,
}

// ---------------------------------------------------------------------------
// Declarations
// ---------------------------------------------------------------------------

/// A named, annotated attribute on a dataclass-style declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    /// The resolved annotation ([`Type::Unknown`] when the resolver gave up).
    pub declared: Type,
    /// The whole field declaration.
    pub span: Span,
    /// Just the annotation, for labeling. Absent when the field carries no
    /// explicit annotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation_span: Option<Span>,
}

/// The factory side of a binding: where a field's default value comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CallableRef {
    /// A function or lambda with a resolved (or explicitly unknown) return
    /// type.
    Function {
        name: String,
        returns: Type,
        span: Span,
    },
    /// A class used directly as the factory; calling it yields an instance.
    Constructor {
        class_name: String,
        #[serde(default)]
        args: Vec<Type>,
        span: Span,
    },
}

impl CallableRef {
    pub fn name(&self) -> &str {
        match self {
            CallableRef::Function { name, .. } => name,
            CallableRef::Constructor { class_name, .. } => class_name,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            CallableRef::Function { span, .. } | CallableRef::Constructor { span, .. } => *span,
        }
    }

    /// The type a call to this factory produces.
    ///
    /// Constructors of builtin collections yield the parameterized builtin
    /// (`list` ⇒ `list[Any]`, `dict` ⇒ `dict[Any, Any]`), scalar constructors
    /// yield the scalar, and everything else yields an instance of the named
    /// class.
    pub fn return_type(&self) -> Type {
        match self {
            CallableRef::Function { returns, .. } => returns.clone(),
            CallableRef::Constructor {
                class_name, args, ..
            } => constructor_instance_type(class_name, args),
        }
    }
}

fn constructor_instance_type(class_name: &str, args: &[Type]) -> Type {
    let arg = |index: usize| args.get(index).cloned().unwrap_or(Type::Any);
    if let Some(scalar) = scalar_for_class_name(class_name) {
        return scalar;
    }
    match class_name {
        "list" => Type::list(arg(0)),
        "set" => Type::set(arg(0)),
        "frozenset" => Type::frozen_set(arg(0)),
        "dict" => Type::dict(arg(0), arg(1)),
        "tuple" => Type::homogeneous_tuple(arg(0)),
        _ => Type::Class {
            name: class_name.to_string(),
            args: args.to_vec(),
        },
    }
}

/// Pairs a field with the zero-argument factory that produces its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactoryBinding {
    pub field: FieldDecl,
    pub factory: CallableRef,
}

/// A dataclass-style declaration.
///
/// `fields` lists every annotated attribute; `bindings` pairs the subset
/// that carries a default factory with the factory itself. Fields without
/// factories are never checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub name: String,
    #[serde(default)]
    pub bases: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    #[serde(default)]
    pub bindings: Vec<FactoryBinding>,
    pub span: Span,
}

// ---------------------------------------------------------------------------
// The interchange document
// ---------------------------------------------------------------------------

/// Everything a resolver hands the checker for one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeclSet {
    #[serde(default)]
    pub files: Vec<SourceFile>,
    #[serde(default)]
    pub classes: Vec<ClassDecl>,
}

impl DeclSet {
    /// Resolve a file id to its path.
    pub fn path(&self, file: FileId) -> Option<&str> {
        self.files.get(file.0 as usize).map(|f| f.path.as_str())
    }

    /// Every non-synthetic span must reference a file in `files`.
    pub fn validate(&self) -> Result<(), String> {
        let file_count = self.files.len() as u32;
        for class in &self.classes {
            for span in class_spans(class) {
                if !span.is_synthetic() && span.file.0 >= file_count {
                    return Err(format!(
                        "class `{}` references file id {} but the decl set has {} file(s)",
                        class.name, span.file.0, file_count
                    ));
                }
            }
        }
        Ok(())
    }
}

fn class_spans(class: &ClassDecl) -> Vec<Span> {
    let mut spans = vec![class.span];
    for field in &class.fields {
        spans.push(field.span);
        spans.extend(field.annotation_span);
    }
    for binding in &class.bindings {
        spans.push(binding.field.span);
        spans.extend(binding.field.annotation_span);
        spans.push(binding.factory.span());
    }
    spans
}
