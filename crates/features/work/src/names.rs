//! Runtime types of the work integration.

use sealant_kernel::known_names;

pub const FEATURE_NAME: &str = "SealantWork";
pub const INTEGRATION_PACKAGE: &str = "sealant.integration.work";

pub const APP_CONTEXT_PARAMETER: &str = "appContext";
pub const WORKER_PARAMS_PARAMETER: &str = "workerParams";

known_names! {
    CONTRIBUTES_WORKER => "dev.steinerok.sealant.work", ["ContributesWorker"];
    WORKER_ASSISTED_FACTORY => "dev.steinerok.sealant.work", ["WorkerAssistedFactory"];
    /// Qualifier of the assisted factory map.
    WORKER_ASSISTED_FACTORY_MAP => "dev.steinerok.sealant.work", ["SealantWorkerAssistedFactoryMap"];
    SEALANT_WORKER_FACTORY => "dev.steinerok.sealant.work", ["SealantWorkerFactory"];
    SEALANT_WORKER_FACTORY_OWNER => "dev.steinerok.sealant.work", ["SealantWorkerFactory", "Owner"];
}
