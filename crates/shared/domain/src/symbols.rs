//! Symbol snapshot model.
//!
//! An immutable description of the declarations a host compiler exposes: their annotations
//! (with ordered, optionally named arguments), direct supertypes and constructors. The
//! serde shape doubles as the on-disk snapshot format.

use crate::names::ClassName;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    #[default]
    Class,
    Interface,
    Object,
    Annotation,
}

/// A literal annotation argument value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationValue {
    Bool(bool),
    Int(i64),
    Str(String),
    Class { class: ClassName },
    Array(Vec<AnnotationValue>),
}

impl AnnotationValue {
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_class(&self) -> Option<&ClassName> {
        match self {
            Self::Class { class } => Some(class),
            _ => None,
        }
    }

    /// Class references held by an array value. A single class counts as a one-element array.
    #[must_use]
    pub fn as_classes(&self) -> Option<Vec<&ClassName>> {
        match self {
            Self::Class { class } => Some(vec![class]),
            Self::Array(items) => items.iter().map(Self::as_class).collect(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for AnnotationValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<String> for AnnotationValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for AnnotationValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<ClassName> for AnnotationValue {
    fn from(class: ClassName) -> Self {
        Self::Class { class }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationArgument {
    /// `None` for positional arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub value: AnnotationValue,
}

impl AnnotationArgument {
    pub fn named(name: impl Into<String>, value: impl Into<AnnotationValue>) -> Self {
        Self { name: Some(name.into()), value: value.into() }
    }

    pub fn positional(value: impl Into<AnnotationValue>) -> Self {
        Self { name: None, value: value.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub class: ClassName,
    #[serde(default)]
    pub arguments: Vec<AnnotationArgument>,
}

impl Annotation {
    #[must_use]
    pub const fn new(class: ClassName) -> Self {
        Self { class, arguments: Vec::new() }
    }

    #[must_use]
    pub fn with(mut self, argument: AnnotationArgument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Value of the argument explicitly named `name`.
    #[must_use]
    pub fn named(&self, name: &str) -> Option<&AnnotationValue> {
        self.arguments.iter().find(|a| a.name.as_deref() == Some(name)).map(|a| &a.value)
    }

    /// Value at `index` if it was passed positionally.
    #[must_use]
    pub fn positional(&self, index: usize) -> Option<&AnnotationValue> {
        self.arguments.get(index).filter(|a| a.name.is_none()).map(|a| &a.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ClassName,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl Parameter {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: ClassName) -> Self {
        Self { name: name.into(), ty, annotations: Vec::new() }
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    #[must_use]
    pub fn has_annotation(&self, class: &ClassName) -> bool {
        self.annotations.iter().any(|a| &a.class == class)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constructor {
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl Constructor {
    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn has_annotation(&self, class: &ClassName) -> bool {
        self.annotations.iter().any(|a| &a.class == class)
    }

    /// Compact signature used in diagnostics, e.g. `(appContext: Context, id: Long)`.
    #[must_use]
    pub fn signature(&self) -> String {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.ty.simple_name()))
            .collect();
        format!("({})", params.join(", "))
    }
}

/// A class-like declaration from the compilation snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: ClassName,
    #[serde(default)]
    pub kind: DeclarationKind,
    /// Direct supertypes only; transitive lookups belong to the symbol provider.
    #[serde(default)]
    pub supertypes: Vec<ClassName>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub constructors: Vec<Constructor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<PathBuf>,
}

impl Declaration {
    #[must_use]
    pub const fn new(name: ClassName) -> Self {
        Self {
            name,
            kind: DeclarationKind::Class,
            supertypes: Vec::new(),
            annotations: Vec::new(),
            constructors: Vec::new(),
            source_file: None,
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: DeclarationKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_supertype(mut self, supertype: ClassName) -> Self {
        self.supertypes.push(supertype);
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    #[must_use]
    pub fn with_constructor(mut self, constructor: Constructor) -> Self {
        self.constructors.push(constructor);
        self
    }

    #[must_use]
    pub fn with_source_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_file = Some(path.into());
        self
    }

    /// First annotation of the given class.
    #[must_use]
    pub fn annotation(&self, class: &ClassName) -> Option<&Annotation> {
        self.annotations.iter().find(|a| &a.class == class)
    }

    #[must_use]
    pub fn has_annotation(&self, class: &ClassName) -> bool {
        self.annotation(class).is_some()
    }
}
