//! Generated declaration trees.
//!
//! The logical shape of emitted source: files holding types with annotations, supertypes,
//! constructors and functions. Rendering to text belongs to the sinks; generators only build
//! these values. Builders consume and return `self` so a whole declaration reads as one
//! expression.

use crate::known;
use sealant_domain::config::HeaderConfig;
use sealant_domain::names::ClassName;
use serde::Serialize;

/// A type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeName {
    Class { name: ClassName },
    Parameterized { raw: ClassName, arguments: Vec<TypeName> },
    /// `out T`.
    Producer { bound: Box<TypeName> },
    /// `*`.
    Star,
    /// A type with type-use annotations, e.g. `@JvmSuppressWildcards Provider<T>`.
    Annotated { annotations: Vec<AnnotationSpec>, inner: Box<TypeName> },
}

impl TypeName {
    #[must_use]
    pub fn class(name: &ClassName) -> Self {
        Self::Class { name: name.clone() }
    }

    #[must_use]
    pub fn parameterized(raw: &ClassName, arguments: impl IntoIterator<Item = Self>) -> Self {
        Self::Parameterized { raw: raw.clone(), arguments: arguments.into_iter().collect() }
    }

    #[must_use]
    pub fn producer_of(bound: Self) -> Self {
        Self::Producer { bound: Box::new(bound) }
    }

    #[must_use]
    pub fn suppress_wildcards(self) -> Self {
        Self::Annotated {
            annotations: vec![AnnotationSpec::new(&known::JVM_SUPPRESS_WILDCARDS)],
            inner: Box::new(self),
        }
    }

    /// `Map<K, V>`.
    #[must_use]
    pub fn map_of(key: Self, value: Self) -> Self {
        Self::parameterized(&known::MAP, [key, value])
    }

    /// `Set<T>`.
    #[must_use]
    pub fn set_of(item: Self) -> Self {
        Self::parameterized(&known::SET, [item])
    }

    /// `Class<out T>`.
    #[must_use]
    pub fn java_class_out(bound: &ClassName) -> Self {
        Self::parameterized(&known::JAVA_CLASS, [Self::producer_of(Self::class(bound))])
    }

    /// Every class this reference mentions, outermost first.
    #[must_use]
    pub fn referenced_classes(&self) -> Vec<&ClassName> {
        let mut out = Vec::new();
        self.collect_classes(&mut out);
        out
    }

    fn collect_classes<'a>(&'a self, out: &mut Vec<&'a ClassName>) {
        match self {
            Self::Class { name } => out.push(name),
            Self::Parameterized { raw, arguments } => {
                out.push(raw);
                for arg in arguments {
                    arg.collect_classes(out);
                }
            },
            Self::Producer { bound } => bound.collect_classes(out),
            Self::Star => {},
            Self::Annotated { annotations, inner } => {
                out.extend(annotations.iter().map(|a| &a.class));
                inner.collect_classes(out);
            },
        }
    }
}

impl From<&ClassName> for TypeName {
    fn from(name: &ClassName) -> Self {
        Self::class(name)
    }
}

/// An annotation argument value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MemberValue {
    /// `X::class`.
    ClassLiteral(ClassName),
    /// `[X::class, Y::class]`.
    ClassArray(Vec<ClassName>),
    Str(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AnnotationMember {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub value: MemberValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AnnotationSpec {
    pub class: ClassName,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<AnnotationMember>,
}

impl AnnotationSpec {
    #[must_use]
    pub fn new(class: &ClassName) -> Self {
        Self { class: class.clone(), members: Vec::new() }
    }

    /// Positional `X::class`.
    #[must_use]
    pub fn class_arg(mut self, value: &ClassName) -> Self {
        self.members.push(AnnotationMember { name: None, value: MemberValue::ClassLiteral(value.clone()) });
        self
    }

    /// `name = X::class`.
    #[must_use]
    pub fn named_class(mut self, name: &str, value: &ClassName) -> Self {
        self.members.push(AnnotationMember {
            name: Some(name.to_owned()),
            value: MemberValue::ClassLiteral(value.clone()),
        });
        self
    }

    /// `name = [X::class, ...]`.
    #[must_use]
    pub fn named_classes(mut self, name: &str, values: impl IntoIterator<Item = ClassName>) -> Self {
        self.members.push(AnnotationMember {
            name: Some(name.to_owned()),
            value: MemberValue::ClassArray(values.into_iter().collect()),
        });
        self
    }

    /// Positional string literal.
    #[must_use]
    pub fn string(mut self, value: impl Into<String>) -> Self {
        self.members.push(AnnotationMember { name: None, value: MemberValue::Str(value.into()) });
        self
    }

    /// `@ContributesTo(scope = X::class)`.
    #[must_use]
    pub fn contributes_to(scope: &ClassName) -> Self {
        Self::new(&known::CONTRIBUTES_TO).named_class("scope", scope)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Private,
    Abstract,
    Override,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Interface,
    Object,
    CompanionObject,
}

/// Constructor parameters may double as properties (`val x: T`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    #[default]
    None,
    Val,
    OverrideVal,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ParameterSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeName,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationSpec>,
    pub property: PropertyKind,
}

impl ParameterSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeName) -> Self {
        Self { name: name.into(), ty, annotations: Vec::new(), property: PropertyKind::None }
    }

    #[must_use]
    pub fn annotation(mut self, annotation: AnnotationSpec) -> Self {
        self.annotations.push(annotation);
        self
    }

    #[must_use]
    pub fn property(mut self, kind: PropertyKind) -> Self {
        self.property = kind;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ConstructorSpec {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationSpec>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
    pub parameters: Vec<ParameterSpec>,
}

impl ConstructorSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn annotation(mut self, annotation: AnnotationSpec) -> Self {
        self.annotations.push(annotation);
        self
    }

    #[must_use]
    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    #[must_use]
    pub fn parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }
}

/// A function body. Generated functions only ever return a single expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    /// `return Class(arg, ...)`.
    ReturnNew { class: ClassName, arguments: Vec<String> },
    /// `return Class::class.java`.
    ReturnJavaClass { class: ClassName },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FunSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationSpec>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns: Option<TypeName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Statement>,
}

impl FunSpec {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: Vec::new(),
            modifiers: Vec::new(),
            parameters: Vec::new(),
            returns: None,
            body: None,
        }
    }

    /// An abstract function, the shape of every `@Binds`/`@Multibinds` declaration.
    #[must_use]
    pub fn abstract_fun(name: impl Into<String>) -> Self {
        Self::new(name).modifier(Modifier::Abstract)
    }

    #[must_use]
    pub fn annotation(mut self, annotation: AnnotationSpec) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Shorthand for a marker annotation without arguments.
    #[must_use]
    pub fn annotated(self, class: &ClassName) -> Self {
        self.annotation(AnnotationSpec::new(class))
    }

    #[must_use]
    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    #[must_use]
    pub fn parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn returns(mut self, ty: TypeName) -> Self {
        self.returns = Some(ty);
        self
    }

    #[must_use]
    pub fn body(mut self, statement: Statement) -> Self {
        self.body = Some(statement);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeSpec {
    pub kind: TypeKind,
    /// Simple name; empty for companion objects.
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationSpec>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub supertypes: Vec<TypeName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_constructor: Option<ConstructorSpec>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<FunSpec>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TypeSpec>,
}

impl TypeSpec {
    fn of(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            modifiers: Vec::new(),
            annotations: Vec::new(),
            supertypes: Vec::new(),
            primary_constructor: None,
            functions: Vec::new(),
            types: Vec::new(),
        }
    }

    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self::of(TypeKind::Class, name)
    }

    #[must_use]
    pub fn interface(name: impl Into<String>) -> Self {
        Self::of(TypeKind::Interface, name)
    }

    #[must_use]
    pub fn object(name: impl Into<String>) -> Self {
        Self::of(TypeKind::Object, name)
    }

    #[must_use]
    pub fn companion() -> Self {
        Self::of(TypeKind::CompanionObject, "")
    }

    #[must_use]
    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    #[must_use]
    pub fn annotation(mut self, annotation: AnnotationSpec) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Shorthand for a marker annotation without arguments.
    #[must_use]
    pub fn annotated(self, class: &ClassName) -> Self {
        self.annotation(AnnotationSpec::new(class))
    }

    #[must_use]
    pub fn supertype(mut self, ty: TypeName) -> Self {
        self.supertypes.push(ty);
        self
    }

    #[must_use]
    pub fn primary_constructor(mut self, constructor: ConstructorSpec) -> Self {
        self.primary_constructor = Some(constructor);
        self
    }

    #[must_use]
    pub fn function(mut self, function: FunSpec) -> Self {
        self.functions.push(function);
        self
    }

    #[must_use]
    pub fn nested(mut self, ty: Self) -> Self {
        self.types.push(ty);
        self
    }
}

/// One output unit: a file with its header and top-level types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FileSpec {
    pub package: String,
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comment: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationSpec>,
    pub types: Vec<TypeSpec>,
}

impl FileSpec {
    #[must_use]
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            comment: Vec::new(),
            annotations: Vec::new(),
            types: Vec::new(),
        }
    }

    /// Stamps the generated-file header and, if enabled, the runtime API opt-in.
    #[must_use]
    pub fn header(mut self, header: &HeaderConfig) -> Self {
        self.comment = [header.title.as_str(), header.url.as_str()]
            .into_iter()
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect();
        if header.opt_in {
            self.annotations.push(
                AnnotationSpec::new(&known::OPT_IN)
                    .class_arg(&known::INTERNAL_SEALANT_API)
                    .class_arg(&known::EXPERIMENTAL_SEALANT_API),
            );
        }
        self
    }

    #[must_use]
    pub fn add_type(mut self, ty: TypeSpec) -> Self {
        self.types.push(ty);
        self
    }

    /// Fully-qualified names of the top-level types.
    ///
    /// # Errors
    /// Returns [`crate::error::SealantError::Domain`] if a type name is not an identifier.
    pub fn top_level_names(&self) -> Result<Vec<ClassName>, crate::error::SealantError> {
        self.types
            .iter()
            .map(|t| {
                ClassName::top_level(self.package.clone(), t.name.clone())
                    .map_err(crate::error::SealantError::from)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(raw: &str) -> ClassName {
        raw.parse().unwrap()
    }

    #[test]
    fn header_adds_comment_and_opt_in() {
        let file = FileSpec::new("sealant.integration.work", "AppScope_SealantWork_Integration")
            .header(&HeaderConfig::default());
        assert_eq!(file.comment, ["Generated by Sealant.", "https://github.com/SteinerOk/sealant"]);
        assert_eq!(file.annotations.len(), 1);
        assert_eq!(file.annotations[0].members.len(), 2);
    }

    #[test]
    fn header_without_opt_in() {
        let header = HeaderConfig { opt_in: false, ..HeaderConfig::default() };
        let file = FileSpec::new("a", "B").header(&header);
        assert!(file.annotations.is_empty());
    }

    #[test]
    fn referenced_classes_walk_arguments() {
        let ty = TypeName::map_of(
            TypeName::class(&known::KOTLIN_STRING),
            TypeName::parameterized(&known::PROVIDER, [TypeName::class(&class("a.Factory"))])
                .suppress_wildcards(),
        );
        let names: Vec<String> = ty.referenced_classes().iter().map(|c| c.simple_name().to_owned()).collect();
        assert_eq!(names, ["Map", "String", "JvmSuppressWildcards", "Provider", "Factory"]);
    }

    #[test]
    fn top_level_names_use_file_package() {
        let file = FileSpec::new("com.example", "Foo_Creation")
            .add_type(TypeSpec::interface("Foo_BindsModule"))
            .add_type(TypeSpec::object("Foo_KeyModule"));
        let names: Vec<String> = file.top_level_names().unwrap().iter().map(ToString::to_string).collect();
        assert_eq!(names, ["com.example.Foo_BindsModule", "com.example.Foo_KeyModule"]);
    }

    #[test]
    fn trees_serialize_to_stable_json() {
        let ty = TypeSpec::interface("X").annotation(AnnotationSpec::contributes_to(&class("a.AppScope")));
        let json = serde_json::to_string(&ty).unwrap();
        assert_eq!(
            json,
            r#"{"kind":"interface","name":"X","annotations":[{"class":"com.squareup.anvil.annotations.ContributesTo","members":[{"name":"scope","value":{"kind":"class_literal","value":"a.AppScope"}}]}]}"#
        );
    }
}
