use sealant_kernel::known_names;

pub const FEATURE_NAME: &str = "SealantFragment";
pub const INTEGRATION_PACKAGE: &str = "sealant.integration.fragment";

/// Modules the generated binding module replaces, passed through to `@ContributesTo`.
pub const REPLACES_ARGUMENT: &str = "replaces";
pub const REPLACES_INDEX: usize = 1;

known_names! {
    CONTRIBUTES_FRAGMENT => "dev.steinerok.sealant.fragment", ["ContributesFragment"];
    FRAGMENT_KEY => "dev.steinerok.sealant.fragment", ["FragmentKey"];
    SEALANT_FRAGMENT_FACTORY => "dev.steinerok.sealant.fragment", ["SealantFragmentFactory"];
    SEALANT_FRAGMENT_FACTORY_OWNER => "dev.steinerok.sealant.fragment", ["SealantFragmentFactory", "Owner"];
}
