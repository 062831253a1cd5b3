//! Fully-qualified class names.
//!
//! A [`ClassName`] is a package plus one or more simple names (more than one for nested
//! types). Textual form follows the JVM convention: lower-case leading segments are the
//! package, the first segment starting with an upper-case letter opens the simple names.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClassName {
    package: String,
    simple_names: Vec<String>,
}

impl ClassName {
    /// Builds a name from a package and its simple names, outermost first.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidClassName`] if `simple_names` is empty or a segment is
    /// not an identifier.
    pub fn new<I, S>(package: impl Into<String>, simple_names: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let package = package.into();
        let simple_names: Vec<String> = simple_names.into_iter().map(Into::into).collect();
        let display = display_parts(&package, &simple_names);

        if simple_names.is_empty() {
            return Err(invalid(display, "at least one simple name is required"));
        }
        if !package.is_empty() && !package.split('.').all(is_identifier) {
            return Err(invalid(display, "package segments must be identifiers"));
        }
        if !simple_names.iter().all(|s| is_identifier(s)) {
            return Err(invalid(display, "simple names must be identifiers"));
        }

        Ok(Self { package, simple_names })
    }

    /// Builds a name from compile-time constant parts without validation.
    ///
    /// Meant for the fixed tables of well-known external types; user input goes through
    /// [`ClassName::new`] or [`FromStr`].
    #[must_use]
    pub fn from_static(package: &'static str, simple_names: &[&'static str]) -> Self {
        Self {
            package: package.to_owned(),
            simple_names: simple_names.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    /// Shorthand for a top-level class.
    ///
    /// # Errors
    /// See [`ClassName::new`].
    pub fn top_level(
        package: impl Into<String>,
        simple_name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Self::new(package, [simple_name.into()])
    }

    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    #[must_use]
    pub fn simple_names(&self) -> &[String] {
        &self.simple_names
    }

    /// Innermost simple name.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.simple_names.last().map_or("", String::as_str)
    }

    /// Outermost enclosing class, or `self` for top-level classes.
    #[must_use]
    pub fn top_level_class(&self) -> Self {
        Self { package: self.package.clone(), simple_names: self.simple_names[..1].to_vec() }
    }

    /// Simple names joined with `separator`, e.g. `Outer_Inner`.
    #[must_use]
    pub fn joined_simple_names(&self, separator: &str) -> String {
        self.simple_names.join(separator)
    }

    /// Dotted source form, e.g. `com.example.Outer.Inner`.
    #[must_use]
    pub fn canonical_name(&self) -> String {
        display_parts(&self.package, &self.simple_names)
    }

    /// Binary form used by class loaders, e.g. `com.example.Outer$Inner`.
    #[must_use]
    pub fn reflection_name(&self) -> String {
        let nested = self.simple_names.join("$");
        if self.package.is_empty() { nested } else { format!("{}.{nested}", self.package) }
    }

    /// A class nested inside this one.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidClassName`] if `name` is not an identifier.
    pub fn nested(&self, name: impl Into<String>) -> Result<Self, DomainError> {
        let mut simple_names = self.simple_names.clone();
        simple_names.push(name.into());
        Self::new(self.package.clone(), simple_names)
    }

    /// A top-level class in the same package.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidClassName`] if `name` is not an identifier.
    pub fn peer(&self, name: impl Into<String>) -> Result<Self, DomainError> {
        Self::top_level(self.package.clone(), name)
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.package.is_empty() {
            write!(f, "{}.", self.package)?;
        }
        write!(f, "{}", self.simple_names.join("."))
    }
}

impl FromStr for ClassName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(invalid(s.to_owned(), "name is empty"));
        }

        let segments: Vec<&str> = trimmed.split('.').collect();
        if segments.iter().any(|seg| seg.is_empty()) {
            return Err(invalid(trimmed.to_owned(), "empty segment"));
        }

        let split = segments
            .iter()
            .position(|seg| seg.starts_with(|c: char| c.is_ascii_uppercase()))
            .unwrap_or(segments.len() - 1);

        Self::new(segments[..split].join("."), segments[split..].iter().copied())
    }
}

impl TryFrom<String> for ClassName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<&str> for ClassName {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClassName> for String {
    fn from(value: ClassName) -> Self {
        value.canonical_name()
    }
}

fn display_parts(package: &str, simple_names: &[String]) -> String {
    let nested = simple_names.join(".");
    if package.is_empty() { nested } else { format!("{package}.{nested}") }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    chars.next().is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn invalid(name: String, message: &'static str) -> DomainError {
    DomainError::InvalidClassName { declaration: name.into(), message: message.into(), context: None }
}
