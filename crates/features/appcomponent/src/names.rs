use sealant_kernel::known_names;

pub const FEATURE_NAME: &str = "SealantAppcomponent";
pub const INTEGRATION_PACKAGE: &str = "sealant.integration.appcomponent";

known_names! {
    INJECT_WITH => "dev.steinerok.sealant.appcomponent", ["InjectWith"];
    SEALANT_INJECTOR => "dev.steinerok.sealant.appcomponent", ["SealantInjector"];
    SEALANT_INJECTORS_OWNER => "dev.steinerok.sealant.appcomponent", ["SealantInjectorsOwner"];
    SEALANT_ACTIVITY_INJECTORS_MAP => "dev.steinerok.sealant.appcomponent", ["SealantActivityInjectorsMap"];
    SEALANT_OTHER_INJECTORS_MAP => "dev.steinerok.sealant.appcomponent", ["SealantOtherInjectorsMap"];
    ACTIVITY_KEY => "dev.steinerok.sealant.appcomponent", ["ActivityKey"];
}
