//! Runtime types of the view-model integration.

use sealant_kernel::known_names;

pub const FEATURE_NAME: &str = "SealantViewModel";
pub const INTEGRATION_PACKAGE: &str = "sealant.integration.viewmodel";

known_names! {
    CONTRIBUTES_VIEW_MODEL => "dev.steinerok.sealant.viewmodel", ["ContributesViewModel"];
    /// Marks a module to be installed into the view-model subgraph.
    CONTRIBUTES_TO_VIEW_MODEL => "dev.steinerok.sealant.viewmodel", ["ContributesToViewModel"];
    SEALANT_VIEW_MODEL_SCOPE => "dev.steinerok.sealant.viewmodel", ["SealantViewModelScope"];
    SEALANT_VIEW_MODEL_MAP => "dev.steinerok.sealant.viewmodel", ["SealantViewModelMap"];
    SEALANT_VIEW_MODEL_MAP_KEY_SET => "dev.steinerok.sealant.viewmodel", ["SealantViewModelMap", "KeySet"];
    SEALANT_VIEW_MODEL_MAP_SUBCOMPONENT_MAP =>
        "dev.steinerok.sealant.viewmodel", ["SealantViewModelMap", "SubcomponentMap"];
    VIEW_MODEL_KEY => "dev.steinerok.sealant.viewmodel", ["ViewModelKey"];
    SEALANT_VIEW_MODEL_SUBCOMPONENT => "dev.steinerok.sealant.viewmodel", ["SealantViewModelSubcomponent"];
    SEALANT_VIEW_MODEL_SUBCOMPONENT_FACTORY =>
        "dev.steinerok.sealant.viewmodel", ["SealantViewModelSubcomponent", "Factory"];
    SEALANT_VIEW_MODEL_SUBCOMPONENT_PARENT =>
        "dev.steinerok.sealant.viewmodel", ["SealantViewModelSubcomponent", "Parent"];
    VIEW_MODEL_FACTORIES_OWNER => "dev.steinerok.sealant.viewmodel", ["ViewModelFactoriesOwner"];
    SEALANT_VIEW_MODEL_FACTORY_CREATOR_OWNER =>
        "dev.steinerok.sealant.viewmodel", ["SealantViewModelFactoryCreator", "Owner"];
}
