use sealant_domain::DomainError;
use std::borrow::Cow;

/// Every failure the generator can report.
///
/// Variants carrying a `declaration` are per-declaration diagnostics: the run records them
/// and keeps going. Variants marked `#[fatal]` corrupt the output of the whole run and abort it.
#[sealant_derive::sealant_error]
pub enum SealantError {
    /// A contributing declaration has no resolvable scope.
    #[error("Couldn't find scope for {declaration}{}: {message}", format_context(.context))]
    MissingScope {
        declaration: Cow<'static, str>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// Scope-bearing annotations on one declaration name different scopes.
    #[error("All scopes on annotations must be the same for {declaration}{}: {message}", format_context(.context))]
    InconsistentScope {
        declaration: Cow<'static, str>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// A declaration has the marker but not the structure the feature needs.
    #[error("Invalid declaration {declaration}{}: {message}", format_context(.context))]
    ShapeViolation {
        declaration: Cow<'static, str>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// A scope configuration payload is missing a field or carries the wrong kind of value.
    #[error("Invalid scope configuration on {declaration}{}: {message}", format_context(.context))]
    InvalidConfiguration {
        declaration: Cow<'static, str>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// Two generators tried to write the same file.
    #[fatal]
    #[error("Emission conflict for {unit}{}: {message}", format_context(.context))]
    EmissionConflict {
        unit: Cow<'static, str>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// The parent links of the scope graph loop back on themselves.
    #[fatal]
    #[error("Scope cycle{}: {path}", format_context(.context))]
    ScopeCycle { path: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A derived name was claimed twice.
    #[fatal]
    #[error("Name collision on {name}{}: {message}", format_context(.context))]
    NameCollision {
        name: Cow<'static, str>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// The symbol snapshot cannot be used as a whole.
    #[fatal]
    #[error("Invalid symbol snapshot{}: {message}", format_context(.context))]
    InvalidSnapshot { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[fatal]
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[fatal]
    #[error("JSON error{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[fatal]
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },

    #[fatal]
    #[error("Domain error{}: {source}", format_context(.context))]
    Domain { source: DomainError, context: Option<Cow<'static, str>> },

    #[fatal]
    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl SealantError {
    pub fn missing_scope(
        declaration: impl ToString,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::MissingScope {
            declaration: declaration.to_string().into(),
            message: message.into(),
            context: None,
        }
    }

    pub fn inconsistent_scope(
        declaration: impl ToString,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::InconsistentScope {
            declaration: declaration.to_string().into(),
            message: message.into(),
            context: None,
        }
    }

    pub fn shape(declaration: impl ToString, message: impl Into<Cow<'static, str>>) -> Self {
        Self::ShapeViolation {
            declaration: declaration.to_string().into(),
            message: message.into(),
            context: None,
        }
    }

    pub fn configuration(
        declaration: impl ToString,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::InvalidConfiguration {
            declaration: declaration.to_string().into(),
            message: message.into(),
            context: None,
        }
    }

    pub fn snapshot(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidSnapshot { message: message.into(), context: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_declaration_errors_are_not_fatal() {
        let errors = [
            SealantError::missing_scope("a.Foo", "no scope argument"),
            SealantError::inconsistent_scope("a.Foo", "a.One vs a.Two"),
            SealantError::shape("a.Foo", "must extend Fragment"),
            SealantError::configuration("a.Foo", "addWorkSupport is missing"),
        ];
        for err in &errors {
            assert!(!err.is_fatal(), "{}", err.kind());
            assert_eq!(err.declaration(), Some("a.Foo"));
        }
    }

    #[test]
    fn run_level_errors_are_fatal() {
        let cycle = SealantError::ScopeCycle { path: "a.A -> a.B -> a.A".into(), context: None };
        assert!(cycle.is_fatal());
        assert_eq!(cycle.declaration(), None);

        let io: SealantError = std::io::Error::other("disk gone").into();
        assert!(io.is_fatal());
        assert_eq!(io.kind(), "Io");
    }

    #[test]
    fn messages_name_the_declaration() {
        let err = SealantError::missing_scope("com.example.MainWorker", "no scope-bearing annotation");
        assert_eq!(
            err.to_string(),
            "Couldn't find scope for com.example.MainWorker: no scope-bearing annotation"
        );
    }
}
