//! Well-known external type names.
//!
//! Plain immutable tables, materialised on first use. Feature crates keep the names of their
//! own runtime types next to their generators.

use sealant_domain::names::ClassName;
use std::sync::LazyLock;

/// Declares `pub static NAME: LazyLock<ClassName>` entries from package and simple names.
#[macro_export]
macro_rules! known_names {
    ($($(#[$meta:meta])* $ident:ident => $package:literal, [$($simple:literal),+ $(,)?];)*) => {
        $(
            $(#[$meta])*
            pub static $ident: ::std::sync::LazyLock<$crate::domain::names::ClassName> =
                ::std::sync::LazyLock::new(|| {
                    $crate::domain::names::ClassName::from_static($package, &[$($simple),+])
                });
        )*
    };
}

// --- Sealant core ---

known_names! {
    /// Scope configuration: four feature flags plus an optional parent scope.
    SEALANT_CONFIGURATION => "dev.steinerok.sealant.core", ["SealantConfiguration"];
    /// Marks one declaration as the integration point for several scopes.
    SEALANT_INTEGRATION => "dev.steinerok.sealant.core", ["SealantIntegration"];
    EXPERIMENTAL_SEALANT_API => "dev.steinerok.sealant.core", ["ExperimentalSealantApi"];
    INTERNAL_SEALANT_API => "dev.steinerok.sealant.core.internal", ["InternalSealantApi"];
}

// --- Anvil ---

known_names! {
    MERGE_COMPONENT => "com.squareup.anvil.annotations", ["MergeComponent"];
    MERGE_SUBCOMPONENT => "com.squareup.anvil.annotations", ["MergeSubcomponent"];
    MERGE_SUBCOMPONENT_FACTORY => "com.squareup.anvil.annotations", ["MergeSubcomponent", "Factory"];
    CONTRIBUTES_TO => "com.squareup.anvil.annotations", ["ContributesTo"];
    SINGLE_IN => "com.squareup.anvil.annotations.optional", ["SingleIn"];
}

// --- Dagger / javax.inject ---

known_names! {
    MODULE => "dagger", ["Module"];
    BINDS => "dagger", ["Binds"];
    BINDS_INSTANCE => "dagger", ["BindsInstance"];
    PROVIDES => "dagger", ["Provides"];
    MEMBERS_INJECTOR => "dagger", ["MembersInjector"];
    CLASS_KEY => "dagger.multibindings", ["ClassKey"];
    STRING_KEY => "dagger.multibindings", ["StringKey"];
    INTO_MAP => "dagger.multibindings", ["IntoMap"];
    INTO_SET => "dagger.multibindings", ["IntoSet"];
    MULTIBINDS => "dagger.multibindings", ["Multibinds"];
    ASSISTED => "dagger.assisted", ["Assisted"];
    ASSISTED_INJECT => "dagger.assisted", ["AssistedInject"];
    ASSISTED_FACTORY => "dagger.assisted", ["AssistedFactory"];
    INJECT => "javax.inject", ["Inject"];
    PROVIDER => "javax.inject", ["Provider"];
}

// --- Kotlin / Java ---

known_names! {
    OPT_IN => "kotlin", ["OptIn"];
    /// Default of `parentScope`: no parent.
    KOTLIN_ANY => "kotlin", ["Any"];
    KOTLIN_STRING => "kotlin", ["String"];
    MAP => "kotlin.collections", ["Map"];
    SET => "kotlin.collections", ["Set"];
    JAVA_CLASS => "java.lang", ["Class"];
    JVM_SUPPRESS_WILDCARDS => "kotlin.jvm", ["JvmSuppressWildcards"];
}

// --- Android ---

known_names! {
    ANDROID_CONTEXT => "android.content", ["Context"];
    ANDROIDX_ACTIVITY => "androidx.activity", ["ComponentActivity"];
    ANDROIDX_FRAGMENT => "androidx.fragment.app", ["Fragment"];
    ANDROIDX_VIEW_MODEL => "androidx.lifecycle", ["ViewModel"];
    SAVED_STATE_HANDLE => "androidx.lifecycle", ["SavedStateHandle"];
    ANDROIDX_LISTENABLE_WORKER => "androidx.work", ["ListenableWorker"];
    WORKER_PARAMETERS => "androidx.work", ["WorkerParameters"];
}

/// Annotations whose presence makes a declaration a component for integration purposes.
#[must_use]
pub fn component_markers() -> [&'static ClassName; 2] {
    [&MERGE_COMPONENT, &MERGE_SUBCOMPONENT]
}

/// Forces every table entry; used by tests to catch malformed literals.
#[doc(hidden)]
#[must_use]
pub fn all() -> Vec<&'static LazyLock<ClassName>> {
    vec![
        &SEALANT_CONFIGURATION,
        &SEALANT_INTEGRATION,
        &EXPERIMENTAL_SEALANT_API,
        &INTERNAL_SEALANT_API,
        &MERGE_COMPONENT,
        &MERGE_SUBCOMPONENT,
        &MERGE_SUBCOMPONENT_FACTORY,
        &CONTRIBUTES_TO,
        &SINGLE_IN,
        &MODULE,
        &BINDS,
        &BINDS_INSTANCE,
        &PROVIDES,
        &MEMBERS_INJECTOR,
        &CLASS_KEY,
        &STRING_KEY,
        &INTO_MAP,
        &INTO_SET,
        &MULTIBINDS,
        &ASSISTED,
        &ASSISTED_INJECT,
        &ASSISTED_FACTORY,
        &INJECT,
        &PROVIDER,
        &OPT_IN,
        &KOTLIN_ANY,
        &KOTLIN_STRING,
        &MAP,
        &SET,
        &JAVA_CLASS,
        &JVM_SUPPRESS_WILDCARDS,
        &ANDROID_CONTEXT,
        &ANDROIDX_ACTIVITY,
        &ANDROIDX_FRAGMENT,
        &ANDROIDX_VIEW_MODEL,
        &SAVED_STATE_HANDLE,
        &ANDROIDX_LISTENABLE_WORKER,
        &WORKER_PARAMETERS,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_parses_back_to_itself() {
        for entry in all() {
            let name: &ClassName = entry;
            let parsed: ClassName = name.canonical_name().parse().unwrap();
            assert_eq!(&parsed, name);
        }
    }

    #[test]
    fn nested_names_keep_their_outer_class() {
        assert_eq!(
            MERGE_SUBCOMPONENT_FACTORY.reflection_name(),
            "com.squareup.anvil.annotations.MergeSubcomponent$Factory"
        );
    }
}
