//! Kernel of the generator, shared by every feature crate.
//! Keep this crate free of feature knowledge; it only knows scopes, names, trees and sinks.
//!
//! ## Scope resolution
//! ```rust
//! use sealant_kernel::prelude::*;
//!
//! let table = SymbolTable::from_json_str(r#"[{
//!     "name": "com.example.AppScope",
//!     "annotations": [{
//!         "class": "dev.steinerok.sealant.core.SealantConfiguration",
//!         "arguments": [{"value": true}, {"value": true}, {"value": false}, {"value": true}]
//!     }]
//! }]"#).unwrap();
//! let (graph, errors) = ScopeGraph::build(&table);
//! assert!(errors.is_empty());
//! let scope: ClassName = "com.example.AppScope".parse().unwrap();
//! assert!(graph.feature_enabled(&scope, Feature::Work));
//! assert!(!graph.feature_enabled(&scope, Feature::Fragment));
//! ```
pub mod config;
pub mod error;
pub mod generator;
pub mod known;
pub mod naming;
pub mod prelude;
pub mod scope;
pub mod sink;
pub mod symbols;
pub mod tree;

pub use sealant_domain as domain;

pub use crate::error::{SealantError, SealantErrorExt};
