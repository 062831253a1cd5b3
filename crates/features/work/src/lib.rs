//! # Work
//!
//! Workers annotated with `@ContributesWorker(scope)` get an assisted factory bound into a
//! string-keyed map under the worker's reflection name. Every scope that enables the feature
//! gets an owner interface exposing the `SealantWorkerFactory`; the root-most such scope also
//! declares the factory multibinding and provides the factory itself.
//!
//! A worker must extend `ListenableWorker` and have exactly one `@AssistedInject` constructor
//! whose only `@Assisted` parameters are `appContext: Context` and
//! `workerParams: WorkerParameters`.

mod creation;
mod integration;
pub mod names;

pub use creation::WorkCreation;
pub use integration::WorkIntegration;

use sealant_kernel::generator::Generator;

/// Generators of this feature, creation first.
#[must_use]
pub fn generators() -> Vec<Box<dyn Generator>> {
    vec![Box::new(WorkCreation), Box::new(WorkIntegration)]
}
