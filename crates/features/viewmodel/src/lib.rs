//! # View-model
//!
//! View-models live in a subgraph of their own. Every scope enabling the feature gets a child
//! scope `ViewModel_<Scope>` and, unless an ancestor already provides it, a merged subcomponent
//! over that child scope created from a `SavedStateHandle`. Contributed view-models are bound
//! into the child scope's map and their classes into the owning scope's key set.
//!
//! Two scopes are in play for one view-model: the scope that enables the feature (key set,
//! subcomponent factory) and the derived child scope the instances are bound into.

mod child_scopes;
mod creation;
mod integration;
pub mod names;
mod wrapper;

pub use child_scopes::ChildScopes;
pub use creation::ViewModelCreation;
pub use integration::ViewModelIntegration;
pub use wrapper::ViewModelModuleWrapper;

use sealant_kernel::generator::Generator;

/// Generators of this feature: child scopes, creation, module wrappers, integration.
#[must_use]
pub fn generators() -> Vec<Box<dyn Generator>> {
    vec![
        Box::new(ChildScopes),
        Box::new(ViewModelCreation),
        Box::new(ViewModelModuleWrapper),
        Box::new(ViewModelIntegration),
    ]
}
