use crate::render::render;
use parking_lot::RwLock;
use sealant_kernel::error::SealantError;
use sealant_kernel::sink::{EmissionSink, GeneratedUnit, UnitKey, conflict};
use std::collections::BTreeMap;
use tracing::debug;

/// Keeps every emitted unit in memory, ordered by key.
#[derive(Debug, Default)]
pub struct MemorySink {
    units: RwLock<BTreeMap<UnitKey, GeneratedUnit>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.read().is_empty()
    }

    #[must_use]
    pub fn get(&self, package: &str, file: &str) -> Option<GeneratedUnit> {
        let key = UnitKey { package: package.to_owned(), file: file.to_owned() };
        self.units.read().get(&key).cloned()
    }

    #[must_use]
    pub fn keys(&self) -> Vec<UnitKey> {
        self.units.read().keys().cloned().collect()
    }

    #[must_use]
    pub fn units(&self) -> Vec<GeneratedUnit> {
        self.units.read().values().cloned().collect()
    }

    /// Kotlin text of one unit.
    ///
    /// # Errors
    /// Returns [`SealantError::Internal`] if rendering fails.
    pub fn render(&self, package: &str, file: &str) -> Result<Option<String>, SealantError> {
        self.get(package, file)
            .map(|unit| render(&unit.file).map_err(|_| SealantError::from("Rendering failed")))
            .transpose()
    }

    #[must_use]
    pub fn into_units(self) -> Vec<GeneratedUnit> {
        self.units.into_inner().into_values().collect()
    }
}

impl EmissionSink for MemorySink {
    fn emit(&self, unit: GeneratedUnit) -> Result<(), SealantError> {
        let key = unit.key();
        let mut units = self.units.write();
        if let Some(previous) = units.get(&key) {
            return Err(conflict(&key, previous.generator, unit.generator));
        }
        debug!(unit = %key, generator = unit.generator, "Unit kept in memory");
        units.insert(key, unit);
        Ok(())
    }
}
