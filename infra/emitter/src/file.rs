//! On-disk sink: one Kotlin file per unit under the output root.

use crate::manifest::{MANIFEST_FILE, Manifest, ManifestEntry, fingerprint};
use crate::render::render;
use parking_lot::RwLock;
use sealant_kernel::domain::config::OutputConfig;
use sealant_kernel::error::{SealantError, SealantErrorExt};
use sealant_kernel::sink::{EmissionSink, GeneratedUnit, UnitKey, conflict};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

const SOURCE_EXTENSION: &str = "kt";
const TMP_MARKER: &str = ".sealanttmp.";

/// Writes rendered units to `<root>/<package path>/<file>.kt`.
///
/// Every write is atomic: the content goes to a unique temp file next to the target, is synced,
/// then renamed over it. A crash leaves either the old file or the new one.
#[derive(Debug)]
pub struct FileSink {
    root: PathBuf,
    clean_stale: bool,
    manifest: bool,
    written: RwLock<BTreeMap<UnitKey, ManifestEntry>>,
    tmp_counter: AtomicU64,
}

impl FileSink {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            clean_stale: false,
            manifest: true,
            written: RwLock::new(BTreeMap::new()),
            tmp_counter: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(&config.dir).clean_stale(config.clean_stale).manifest(config.manifest)
    }

    /// Remove `.kt` files under the root that this run did not write.
    #[must_use]
    pub const fn clean_stale(mut self, enabled: bool) -> Self {
        self.clean_stale = enabled;
        self
    }

    #[must_use]
    pub const fn manifest(mut self, enabled: bool) -> Self {
        self.manifest = enabled;
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the unit with `key` lands.
    #[must_use]
    pub fn path_for(&self, key: &UnitKey) -> PathBuf {
        self.root.join(relative_path(key))
    }

    /// Entries written so far, in key order.
    #[must_use]
    pub fn entries(&self) -> Vec<ManifestEntry> {
        self.written.read().values().cloned().collect()
    }

    fn write_atomic(&self, target: &Path, content: &[u8]) -> Result<(), SealantError> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create directory {}", parent.display()))?;
        }

        let temp = self.tmp_path(target);
        fill_temp(&temp, |file| {
            file.write_all(content).context("Write failed")?;
            file.sync_all().context("Sync failed")
        })?;

        if let Err(err) = fs::rename(&temp, target) {
            if err.kind() == std::io::ErrorKind::AlreadyExists {
                fs::remove_file(target)
                    .context(format!("Failed to replace existing file: {}", target.display()))?;
                fs::rename(&temp, target).context(format!(
                    "Atomic swap failed: {} -> {}",
                    temp.display(),
                    target.display()
                ))?;
            } else {
                let _ = fs::remove_file(&temp);
                return Err(SealantError::Io {
                    source: err,
                    context: Some(
                        format!("Atomic swap failed: {} -> {}", temp.display(), target.display())
                            .into(),
                    ),
                });
            }
        }

        debug!(path = %target.display(), "File saved atomically");
        Ok(())
    }

    fn tmp_path(&self, target: &Path) -> PathBuf {
        let id = self.tmp_counter.fetch_add(1, Ordering::Relaxed);
        let name = target.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        target.with_file_name(format!("{name}{TMP_MARKER}{}.{id}", std::process::id()))
    }

    /// Removes source files and leftover temp files not produced by this run, then any
    /// directories left empty. Returns the number of files removed.
    fn remove_stale(&self) -> usize {
        if !self.root.is_dir() {
            return 0;
        }
        let keep: Vec<PathBuf> = self.written.read().keys().map(|k| self.path_for(k)).collect();
        let mut removed = 0;

        WalkDir::new(&self.root)
            .contents_first(true)
            .into_iter()
            .flatten()
            .filter(|e| e.path() != self.root)
            .for_each(|entry| {
                let path = entry.path();
                if entry.file_type().is_file() {
                    let is_source = path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION);
                    let is_tmp = path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.contains(TMP_MARKER));
                    if (is_source || is_tmp) && !keep.iter().any(|k| k == path) {
                        match fs::remove_file(path) {
                            Ok(()) => removed += 1,
                            Err(e) => warn!(path = %path.display(), error = %e, "Stale file not removed"),
                        }
                    }
                } else if entry.file_type().is_dir() {
                    // Fails on non-empty directories, which is what we want.
                    let _ = fs::remove_dir(path);
                }
            });

        removed
    }
}

impl EmissionSink for FileSink {
    fn emit(&self, unit: GeneratedUnit) -> Result<(), SealantError> {
        let key = unit.key();
        let mut written = self.written.write();
        if let Some(previous) = written.get(&key) {
            return Err(conflict(&key, &previous.generator, unit.generator));
        }

        let content = render(&unit.file)
            .map_err(|_| SealantError::from(format!("Rendering {key} failed")))?;
        let target = self.path_for(&key);
        self.write_atomic(&target, content.as_bytes())?;

        let entry = ManifestEntry {
            package: key.package.clone(),
            file: key.file.clone(),
            path: relative_path(&key),
            generator: unit.generator.to_owned(),
            sha256: fingerprint(&content),
            provenance: unit.provenance,
        };
        written.insert(key, entry);
        Ok(())
    }

    fn finish(&self) -> Result<(), SealantError> {
        if self.clean_stale {
            let removed = self.remove_stale();
            if removed > 0 {
                info!(removed, root = %self.root.display(), "Removed stale outputs");
            }
        }

        if self.manifest {
            let manifest = Manifest::new(self.entries());
            let json = serde_json::to_vec_pretty(&manifest).context("Failed to encode manifest")?;
            self.write_atomic(&self.root.join(MANIFEST_FILE), &json)?;
        }

        info!(units = self.written.read().len(), root = %self.root.display(), "Output written");
        Ok(())
    }
}

/// `<package path>/<file>.kt` with `/` separators.
fn relative_path(key: &UnitKey) -> String {
    if key.package.is_empty() {
        format!("{}.{SOURCE_EXTENSION}", key.file)
    } else {
        format!("{}/{}.{SOURCE_EXTENSION}", key.package.replace('.', "/"), key.file)
    }
}

/// Creates `temp` and lets `fill` write it. The file is removed again if `fill` fails.
fn fill_temp(
    temp: &Path,
    fill: impl FnOnce(&mut fs::File) -> Result<(), SealantError>,
) -> Result<(), SealantError> {
    let mut file = fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(temp)
        .context(format!("Temp creation failed: {}", temp.display()))?;
    let filled = fill(&mut file);
    drop(file);
    if filled.is_err() {
        let _ = fs::remove_file(temp);
    }
    filled
}
