//! Emission sinks for generated units.
//!
//! - [`MemorySink`] keeps units in an ordered map. Used by tests and dry runs.
//! - [`FileSink`] renders each unit to Kotlin source under an output root, writing every file
//!   atomically (unique temp file + `fsync` + `rename`). On [`finish`](EmissionSink::finish)
//!   it optionally removes stale outputs of a previous run and writes a
//!   [`Manifest`] with a SHA-256 fingerprint per unit.
//!
//! Both reject a second unit with the same `(package, file)` key.
//!
//! # Example
//!
//! ```rust
//! use sealant_emitter::MemorySink;
//! use sealant_kernel::prelude::*;
//!
//! let sink = MemorySink::new();
//! let unit = GeneratedUnit::builder()
//!     .generator("fragment-creation")
//!     .file(FileSpec::new("com.example", "HomeFragment_Creation"))
//!     .build();
//! sink.emit(unit.clone()).unwrap();
//!
//! assert!(sink.emit(unit).is_err());
//! assert_eq!(sink.len(), 1);
//! ```

mod file;
mod manifest;
mod memory;
mod render;
#[cfg(feature = "testing")]
pub mod testing;

pub use file::FileSink;
pub use manifest::{MANIFEST_FILE, Manifest, ManifestEntry, fingerprint};
pub use memory::MemorySink;
pub use render::render;
