use crate::error::{SealantError, SealantErrorExt};
use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::info;

/// Prefix of the environment variables that override file settings.
pub const ENV_PREFIX: &str = "SEALANT";

/// Loads generator settings from an optional file with environment overrides on top.
///
/// Layers, lowest priority first:
/// 1. **Defaults**: whatever `T`'s serde defaults produce.
/// 2. **File**: `path`, if given. The format follows the extension (`.toml`, `.json`, `.yaml`).
///    A path that was passed in but does not exist is an error.
/// 3. **Environment**: variables prefixed with `SEALANT__`; nested keys use double
///    underscores (e.g. `SEALANT__OUTPUT__DIR` maps to `output.dir`).
///
/// # Errors
/// Returns [`SealantError::Config`] if the file is missing or unreadable, or if the merged
/// values do not match `T`.
///
/// # Example
/// ```rust
/// use sealant_kernel::config::load_config;
/// use sealant_kernel::domain::config::GeneratorConfig;
///
/// let cfg: GeneratorConfig = load_config(None::<&str>).unwrap();
/// assert!(cfg.output.manifest);
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, SealantError>
where
    T: DeserializeOwned,
{
    let mut builder = Config::builder();
    let path: Option<&Path> = path.as_ref().map(AsRef::as_ref);

    match path {
        Some(path) => {
            info!("Loading config from {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        },
        None => info!("No config file given, using defaults and environment"),
    }

    let config = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
