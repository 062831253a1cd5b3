//! # Domain Models
//!
//! Pure data shared by every Sealant crate: fully-qualified class names, the closed set of
//! platform features, the symbol snapshot model handed over by a host compiler, and the
//! generator settings. Keep it lean: no I/O or heavy logic, just data and simple helpers.

pub mod config;
pub mod error;
pub mod features;
pub mod names;
pub mod symbols;

pub use crate::error::{DomainError, DomainErrorExt};
