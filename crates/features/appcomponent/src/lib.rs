//! # App-component
//!
//! Framework classes that cannot be constructor-injected (activities, services, receivers)
//! are annotated with `@InjectWith(scope)`. Each gets a `SealantInjector` wrapping its
//! `MembersInjector`, bound into the activity injector map when the class is a
//! `ComponentActivity` and into the map of other injectors otherwise. Every scope enabling the
//! feature exposes the maps through a `SealantInjectorsOwner`.

mod creation;
mod integration;
pub mod names;

pub use creation::AppcomponentCreation;
pub use integration::AppcomponentIntegration;

use sealant_kernel::generator::Generator;

/// Generators of this feature, creation first.
#[must_use]
pub fn generators() -> Vec<Box<dyn Generator>> {
    vec![Box::new(AppcomponentCreation), Box::new(AppcomponentIntegration)]
}
