use sealant_kernel::generator::{Diagnostic, EmittedUnit, Journal, Skip};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub emitted: Vec<EmittedUnit>,
    pub diagnostics: Vec<Diagnostic>,
    pub skips: Vec<Skip>,
    pub elapsed_ms: u64,
}

impl Report {
    pub(crate) fn new(journal: Journal, elapsed: Duration) -> Self {
        let Journal { emitted, diagnostics, skips } = journal;
        Self {
            emitted,
            diagnostics,
            skips,
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// `true` when no declaration was rejected.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Emitted unit count per generator id.
    #[must_use]
    pub fn units_by_generator(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for unit in &self.emitted {
            *counts.entry(unit.generator).or_default() += 1;
        }
        counts
    }

    /// Diagnostics grouped by the source file they are attributed to. Diagnostics without a
    /// known file are listed under `None`.
    #[must_use]
    pub fn diagnostics_by_file(&self) -> BTreeMap<Option<&std::path::Path>, Vec<&Diagnostic>> {
        let mut grouped: BTreeMap<Option<&std::path::Path>, Vec<&Diagnostic>> = BTreeMap::new();
        for diagnostic in &self.diagnostics {
            grouped.entry(diagnostic.source_file.as_deref()).or_default().push(diagnostic);
        }
        grouped
    }
}
