use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// File name of the manifest, written at the output root.
pub const MANIFEST_FILE: &str = "sealant-manifest.json";

/// Index of one run's outputs, for incremental builds and auditing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    /// Units in key order.
    pub units: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub package: String,
    pub file: String,
    /// Path relative to the output root, with `/` separators.
    pub path: String,
    pub generator: String,
    /// Hex SHA-256 of the rendered content.
    pub sha256: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub provenance: Vec<PathBuf>,
}

impl Manifest {
    #[must_use]
    pub fn new(units: Vec<ManifestEntry>) -> Self {
        Self { version: env!("CARGO_PKG_VERSION").to_owned(), generated_at: Utc::now(), units }
    }

    #[must_use]
    pub fn entry(&self, package: &str, file: &str) -> Option<&ManifestEntry> {
        self.units.iter().find(|u| u.package == package && u.file == file)
    }
}

/// Hex-encoded SHA-256 of `content`.
#[must_use]
pub fn fingerprint(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
