//! Facade crate for the Sealant generator.
//! Re-exports domain/kernel primitives and composes the feature generators into a [`Pipeline`].
//! Keep this crate thin: it should orchestrate other crates, not generate anything itself.
//!
//! ## Usage
//! ```rust
//! use sealant::emitter::MemorySink;
//! use sealant::kernel::symbols::SymbolTable;
//! use sealant::Pipeline;
//!
//! let table = SymbolTable::from_json_str(r#"[
//!   {"name": "com.example.AppScope", "annotations": [{
//!     "class": "dev.steinerok.sealant.core.SealantConfiguration",
//!     "arguments": [{"value": false}, {"value": false}, {"value": false}, {"value": true}]
//!   }]},
//!   {"name": "com.example.AppComponent", "kind": "interface", "annotations": [{
//!     "class": "com.squareup.anvil.annotations.MergeComponent",
//!     "arguments": [{"name": "scope", "value": {"class": "com.example.AppScope"}}]
//!   }]}
//! ]"#).unwrap();
//!
//! let sink = MemorySink::new();
//! let report = Pipeline::builder().build().run(&table, &sink).unwrap();
//! assert!(report.is_clean());
//! assert!(sink.get("sealant.integration.work", "AppScope_SealantWork_Integration").is_some());
//! ```

mod pipeline;
mod report;

pub use pipeline::{Pipeline, PipelineBuilder, generate};
pub use report::Report;

pub use sealant_domain as domain;
pub use sealant_emitter as emitter;
pub use sealant_kernel as kernel;

/// Feature registry for runtime introspection.
pub mod features {
    #[cfg(feature = "appcomponent")]
    pub use sealant_appcomponent as appcomponent;
    #[cfg(feature = "fragment")]
    pub use sealant_fragment as fragment;
    #[cfg(feature = "viewmodel")]
    pub use sealant_viewmodel as viewmodel;
    #[cfg(feature = "work")]
    pub use sealant_work as work;

    use sealant_domain::features::Feature;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[Feature] = &[
        #[cfg(feature = "appcomponent")]
        Feature::Appcomponent,
        #[cfg(feature = "viewmodel")]
        Feature::ViewModel,
        #[cfg(feature = "fragment")]
        Feature::Fragment,
        #[cfg(feature = "work")]
        Feature::Work,
    ];

    #[must_use]
    pub fn is_enabled(feature: Feature) -> bool {
        ENABLED.contains(&feature)
    }
}
