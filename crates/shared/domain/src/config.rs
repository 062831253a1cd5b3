use crate::features::FeatureSet;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level generator settings.
///
/// Every field has a default, so an empty file (or none at all) is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Features the pipeline generates for. Scopes still decide per feature.
    pub features: FeatureSet,
    /// Stop at the first per-declaration diagnostic instead of collecting them all.
    pub fail_fast: bool,
    pub output: OutputConfig,
    pub header: HeaderConfig,
    pub logging: LoggingConfig,
}

/// Where and how generated units are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    /// Remove `.kt` files left over from a previous run that this run did not produce.
    pub clean_stale: bool,
    pub manifest: bool,
}

/// Header comment stamped on every generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub title: String,
    pub url: String,
    /// Add the opt-in annotation for the internal and experimental runtime APIs.
    pub opt_in: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: Option<PathBuf>,
    pub json: bool,
    pub env_filter: Option<String>,
}

// --- Default ---

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: PathBuf::from("build/generated/sealant"), clean_stale: false, manifest: true }
    }
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            title: "Generated by Sealant.".to_owned(),
            url: "https://github.com/SteinerOk/sealant".to_owned(),
            opt_in: true,
        }
    }
}
