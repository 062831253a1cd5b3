use crate::error::SealantError;
use crate::tree::FileSpec;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use typed_builder::TypedBuilder;

/// Identity of an output unit: `(package, file)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct UnitKey {
    pub package: String,
    pub file: String,
}

impl fmt::Display for UnitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            write!(f, "{}", self.file)
        } else {
            write!(f, "{}/{}", self.package, self.file)
        }
    }
}

/// A declaration tree ready for persistence, with the files it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TypedBuilder)]
pub struct GeneratedUnit {
    /// Id of the generator that produced the unit.
    pub generator: &'static str,
    pub file: FileSpec,
    /// Originating source files, for incremental-build tracking.
    #[builder(default)]
    pub provenance: Vec<PathBuf>,
}

impl GeneratedUnit {
    #[must_use]
    pub fn key(&self) -> UnitKey {
        UnitKey { package: self.file.package.clone(), file: self.file.name.clone() }
    }

    #[must_use]
    pub fn package(&self) -> &str {
        &self.file.package
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file.name
    }
}

/// Persists generated units.
///
/// Implementations are append-only for the duration of a run: a second unit with the same
/// [`UnitKey`] is an [`SealantError::EmissionConflict`].
pub trait EmissionSink: Send + Sync {
    /// # Errors
    /// Returns [`SealantError::EmissionConflict`] for a repeated key, or an I/O error from
    /// sinks that write to disk.
    fn emit(&self, unit: GeneratedUnit) -> Result<(), SealantError>;

    /// Called once after the last unit of a run.
    ///
    /// # Errors
    /// Sink-specific; the default does nothing.
    fn finish(&self) -> Result<(), SealantError> {
        Ok(())
    }
}

/// Builds the conflict error for `key`, naming both generators.
#[must_use]
pub fn conflict(key: &UnitKey, first: &str, second: &str) -> SealantError {
    SealantError::EmissionConflict {
        unit: key.to_string().into(),
        message: format!("already emitted by {first}, emitted again by {second}").into(),
        context: None,
    }
}

impl<S: EmissionSink + ?Sized> EmissionSink for &S {
    fn emit(&self, unit: GeneratedUnit) -> Result<(), SealantError> {
        (**self).emit(unit)
    }

    fn finish(&self) -> Result<(), SealantError> {
        (**self).finish()
    }
}
