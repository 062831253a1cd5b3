//! Deterministic names for generated declarations.
//!
//! Every generated name is a pure function of a source name and a fixed suffix, so two runs over
//! the same snapshot agree. The [`NameRegistry`] catches the remaining failure mode: two
//! generators deriving the same name.

use crate::error::SealantError;
use fxhash::FxHashMap;
use parking_lot::Mutex;
use sealant_domain::names::ClassName;

/// Prefix of the child scope a view-model-enabled scope gets.
pub const CHILD_SCOPE_PREFIX: &str = "ViewModel_";

/// Separator between name parts.
pub const SEPARATOR: &str = "_";

/// `<Base simple names joined by _>_<suffix>` in the package of `base`.
///
/// # Errors
/// Returns [`SealantError::Domain`] if the suffix makes the name invalid.
pub fn derive_name(base: &ClassName, suffix: &str) -> Result<ClassName, SealantError> {
    let name = format!("{}{SEPARATOR}{suffix}", base.joined_simple_names(SEPARATOR));
    Ok(base.peer(name)?)
}

/// `ViewModel_<Scope simple name>` in the package of `scope`.
///
/// # Errors
/// Returns [`SealantError::Domain`] if the resulting name is invalid.
pub fn derive_scope_child_name(scope: &ClassName) -> Result<ClassName, SealantError> {
    Ok(scope.peer(format!("{CHILD_SCOPE_PREFIX}{}", scope.simple_name()))?)
}

/// Scope part of integration names: simple names joined by `_`.
#[must_use]
pub fn scope_prefix(scope: &ClassName) -> String {
    scope.joined_simple_names(SEPARATOR)
}

/// `<Scope>_<FeatureName>_Integration`.
#[must_use]
pub fn integration_file_name(scope: &ClassName, feature_name: &str) -> String {
    format!("{}{SEPARATOR}{feature_name}{SEPARATOR}Integration", scope_prefix(scope))
}

/// `<Scope>_<suffix>` in `package`.
///
/// # Errors
/// Returns [`SealantError::Domain`] if the resulting name is invalid.
pub fn scoped_name(
    package: &str,
    scope: &ClassName,
    suffix: &str,
) -> Result<ClassName, SealantError> {
    Ok(ClassName::top_level(package, format!("{}{SEPARATOR}{suffix}", scope_prefix(scope)))?)
}

/// Tracks every top-level name claimed during one run.
#[derive(Debug, Default)]
pub struct NameRegistry {
    claims: Mutex<FxHashMap<ClassName, Claim>>,
}

#[derive(Debug, Clone)]
struct Claim {
    generator: &'static str,
    origin: String,
}

impl NameRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `name` as produced by `generator` for `origin`.
    ///
    /// # Errors
    /// Returns [`SealantError::NameCollision`] if the name was already claimed.
    pub fn claim(
        &self,
        name: &ClassName,
        generator: &'static str,
        origin: &str,
    ) -> Result<(), SealantError> {
        let mut claims = self.claims.lock();
        if let Some(previous) = claims.get(name) {
            return Err(SealantError::NameCollision {
                name: name.to_string().into(),
                message: format!(
                    "claimed by {} for {} and again by {generator} for {origin}",
                    previous.generator, previous.origin
                )
                .into(),
                context: None,
            });
        }
        claims.insert(name.clone(), Claim { generator, origin: origin.to_owned() });
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.claims.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.claims.lock().is_empty()
    }
}
