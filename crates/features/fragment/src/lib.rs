//! # Fragment
//!
//! Fragments annotated with `@ContributesFragment(scope, replaces = [...])` are bound into a
//! class-keyed fragment map. Scopes that enable the feature get an owner interface exposing
//! the `SealantFragmentFactory`; the root-most one also declares the map and provides the
//! factory.

mod creation;
mod integration;
pub mod names;

pub use creation::FragmentCreation;
pub use integration::FragmentIntegration;

use sealant_kernel::generator::Generator;

/// Generators of this feature, creation first.
#[must_use]
pub fn generators() -> Vec<Box<dyn Generator>> {
    vec![Box::new(FragmentCreation), Box::new(FragmentIntegration)]
}
