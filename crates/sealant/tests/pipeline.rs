mod fixtures;

use fixtures::{
    ALL, CONTRIBUTES_FRAGMENT, CONTRIBUTES_VIEW_MODEL, INJECT_WITH, NONE, component, contributed,
    run, scope, try_run, worker,
};
use proptest::prelude::*;
use sealant::domain::config::GeneratorConfig;
use sealant::kernel::prelude::*;

const INTEGRATION_PACKAGES: [&str; 4] = [
    "sealant.integration.appcomponent",
    "sealant.integration.fragment",
    "sealant.integration.viewmodel",
    "sealant.integration.work",
];

/// `SkeletonScope` <- `AppScope` (everything) <- `GuestScope` (view-model and fragment).
fn scenario_scopes() -> Vec<Declaration> {
    vec![
        scope("com.example.di.SkeletonScope", NONE, None),
        scope("com.example.di.AppScope", ALL, Some("com.example.di.SkeletonScope")),
        scope("com.example.di.GuestScope", [false, true, true, false], Some("com.example.di.AppScope")),
        component("com.example.AppComponent", "com.example.di.AppScope"),
        component("com.example.GuestComponent", "com.example.di.GuestScope"),
    ]
}

#[test]
fn activity_injection_and_disabled_features() {
    let mut decls = scenario_scopes();
    decls.push(
        contributed("com.example.MainActivity", INJECT_WITH, "com.example.di.AppScope")
            .with_supertype(known::ANDROIDX_ACTIVITY.clone()),
    );
    decls.push(
        contributed("com.example.guest.GuestActivity", INJECT_WITH, "com.example.di.GuestScope")
            .with_supertype(known::ANDROIDX_ACTIVITY.clone()),
    );
    decls.push(
        contributed("com.example.guest.GuestFragment", CONTRIBUTES_FRAGMENT, "com.example.di.GuestScope")
            .with_supertype(known::ANDROIDX_FRAGMENT.clone()),
    );
    let outcome = run(decls);

    let injection = outcome.text("com.example", "MainActivity_Injection");
    assert!(injection.contains("public class MainActivity_SealantInjector"));
    assert!(injection.contains("@ActivityKey(MainActivity::class)"));

    assert!(!outcome.has("com.example.guest", "GuestActivity_Injection"));
    assert!(outcome.has("com.example.guest", "GuestFragment_Creation"));
    assert!(outcome.report.is_clean());

    // The guest scope gets fragment and view-model integrations only.
    for (package, expected) in INTEGRATION_PACKAGES.iter().zip([false, true, true, false]) {
        assert_eq!(!outcome.files_in(package, "GuestScope_").is_empty(), expected, "{package}");
    }
}

#[test]
fn components_merging_one_scope_integrate_it_once() {
    let mut decls = scenario_scopes();
    decls.push(component("com.example.feature.AppComponentTwo", "com.example.di.AppScope"));
    let outcome = run(decls);

    for package in INTEGRATION_PACKAGES {
        assert_eq!(outcome.files_in(package, "AppScope_").len(), 1, "{package}");
    }
    let duplicates = outcome
        .report
        .skips
        .iter()
        .filter(|s| matches!(s.reason, SkipReason::DuplicateScope { .. }))
        .count();
    assert_eq!(duplicates, 4);
}

#[test]
fn view_model_in_inheriting_scope() {
    let mut decls = scenario_scopes();
    decls.push(
        contributed("com.example.guest.GuestViewModel", CONTRIBUTES_VIEW_MODEL, "com.example.di.GuestScope")
            .with_supertype(known::ANDROIDX_VIEW_MODEL.clone()),
    );
    let outcome = run(decls);

    let guest = outcome.text("sealant.integration.viewmodel", "GuestScope_SealantViewModel_Integration");
    assert!(!guest.contains("public interface GuestScope_SealantViewModelSubcomponent "));
    assert!(guest.contains("public interface GuestScope_SealantViewModelFactoryCreator_Owner"));
    assert!(guest.contains("@ContributesTo(scope = ViewModel_GuestScope::class)"));

    let app = outcome.text("sealant.integration.viewmodel", "AppScope_SealantViewModel_Integration");
    assert!(app.contains("public interface AppScope_SealantViewModelSubcomponent : SealantViewModelSubcomponent"));

    let creation = outcome.text("com.example.guest", "GuestViewModel_Creation");
    assert!(creation.contains("@ContributesTo(scope = ViewModel_GuestScope::class)"));
    assert!(outcome.has("com.example.di", "GuestScope_SealantChildScopes"));
}

#[test]
fn inheritance_suppresses_only_shared_modules() {
    let work_only = [false, false, false, true];
    let enabled_parent = run(vec![
        scope("com.example.di.ParentScope", work_only, None),
        scope("com.example.di.ChildScope", work_only, Some("com.example.di.ParentScope")),
        component("com.example.ParentComponent", "com.example.di.ParentScope"),
        component("com.example.ChildComponent", "com.example.di.ChildScope"),
    ]);
    let child = enabled_parent.text("sealant.integration.work", "ChildScope_SealantWork_Integration");
    assert!(!child.contains("IntegrativeModule"));
    assert!(child.contains("ChildScope_SealantWorkerFactory_Owner"));

    let disabled_parent = run(vec![
        scope("com.example.di.ParentScope", NONE, None),
        scope("com.example.di.ChildScope", work_only, Some("com.example.di.ParentScope")),
        component("com.example.ParentComponent", "com.example.di.ParentScope"),
        component("com.example.ChildComponent", "com.example.di.ChildScope"),
    ]);
    let child = disabled_parent.text("sealant.integration.work", "ChildScope_SealantWork_Integration");
    assert!(child.contains("public abstract class ChildScope_SealantWork_IntegrativeModule"));
}

#[test]
fn malformed_worker_is_reported_with_its_constructor() {
    let mut decls = scenario_scopes();
    decls.push(worker("com.example.work.SyncWorker", "com.example.di.AppScope", &["context", "workerParams"]));
    decls.push(worker("com.example.work.GoodWorker", "com.example.di.AppScope", &["appContext", "workerParams"]));
    let outcome = run(decls);

    assert!(outcome.has("com.example.work", "GoodWorker_Creation"));
    assert!(!outcome.has("com.example.work", "SyncWorker_Creation"));

    let diagnostics = &outcome.report.diagnostics;
    assert!(!diagnostics.is_empty());
    for diagnostic in diagnostics {
        assert_eq!(diagnostic.kind, "ShapeViolation");
        assert_eq!(diagnostic.declaration.as_deref(), Some("com.example.work.SyncWorker"));
        assert_eq!(diagnostic.source_file.as_deref(), Some(std::path::Path::new("src/main/SyncWorker.kt")));
        assert!(diagnostic.message.contains("(context: Context, workerParams: WorkerParameters)"));
    }
}

#[test]
fn fail_fast_stops_at_the_first_diagnostic() {
    let mut decls = scenario_scopes();
    decls.push(worker("com.example.work.AWorker", "com.example.di.AppScope", &["appContext"]));
    decls.push(worker("com.example.work.BWorker", "com.example.di.AppScope", &["workerParams"]));

    let collected = try_run(decls.clone(), GeneratorConfig::default()).unwrap();
    assert!(collected.report.diagnostics.len() >= 2);

    let config = GeneratorConfig { fail_fast: true, ..GeneratorConfig::default() };
    let stopped = try_run(decls, config).unwrap();
    assert!(!stopped.report.diagnostics.is_empty());
    assert!(stopped.report.diagnostics.iter().all(|d| d.declaration.as_deref() == Some("com.example.work.AWorker")));
    assert!(stopped.files_in("sealant.integration.work", "").is_empty());
}

#[test]
fn broken_scope_configuration_is_a_diagnostic() {
    let mut broken = Declaration::new("com.example.di.BrokenScope".parse().unwrap());
    broken = broken.with_annotation(
        Annotation::new(known::SEALANT_CONFIGURATION.clone())
            .with(AnnotationArgument::named("addAppcomponentSupport", true)),
    );
    let mut decls = scenario_scopes();
    decls.push(broken);
    let outcome = run(decls);

    let [diagnostic] = outcome.report.diagnostics.as_slice() else {
        panic!("{:?}", outcome.report.diagnostics);
    };
    assert_eq!(diagnostic.generator, "scope-graph");
    assert_eq!(diagnostic.kind, "InvalidConfiguration");
    assert!(outcome.has("sealant.integration.work", "AppScope_SealantWork_Integration"));
}

#[test]
fn conflicting_component_scopes_are_reported_once() {
    let conflicted = component("com.example.ConflictedComponent", "com.example.di.AppScope").with_annotation(
        Annotation::new(known::MERGE_SUBCOMPONENT.clone())
            .with(AnnotationArgument::named("scope", fixtures::class("com.example.di.GuestScope"))),
    );
    let mut decls = scenario_scopes();
    decls.push(conflicted);
    let outcome = run(decls);

    let [diagnostic] = outcome.report.diagnostics.as_slice() else {
        panic!("{:?}", outcome.report.diagnostics);
    };
    assert_eq!(diagnostic.kind, "InconsistentScope");
    assert_eq!(diagnostic.generator, "appcomponent-integration");
    assert_eq!(diagnostic.declaration.as_deref(), Some("com.example.ConflictedComponent"));
    assert!(outcome.has("sealant.integration.work", "AppScope_SealantWork_Integration"));
}

#[test]
fn scope_cycle_aborts_the_run() {
    let decls = vec![
        scope("com.example.di.AScope", ALL, Some("com.example.di.BScope")),
        scope("com.example.di.BScope", ALL, Some("com.example.di.AScope")),
        component("com.example.AComponent", "com.example.di.AScope"),
    ];
    let err = try_run(decls, GeneratorConfig::default()).unwrap_err();
    assert_eq!(err.kind(), "ScopeCycle");
    assert!(err.is_fatal());
}

#[test]
fn features_switched_off_in_config_are_not_generated() {
    let config = GeneratorConfig {
        features: [Feature::Work].into_iter().collect(),
        ..GeneratorConfig::default()
    };
    let outcome = try_run(scenario_scopes(), config).unwrap();
    assert!(outcome.has("sealant.integration.work", "AppScope_SealantWork_Integration"));
    assert!(outcome.files_in("sealant.integration.fragment", "").is_empty());
    assert!(!outcome.has("com.example.di", "AppScope_SealantChildScopes"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn one_integration_per_scope_whatever_the_component_count(
        names in prop::collection::btree_set("[A-Z][a-z]{2,6}", 1..6),
        reversed in any::<bool>(),
    ) {
        let mut decls = vec![scope("com.example.di.AppScope", ALL, None)];
        let mut components: Vec<Declaration> = names
            .iter()
            .map(|n| component(&format!("com.example.{n}Component"), "com.example.di.AppScope"))
            .collect();
        if reversed {
            components.reverse();
        }
        decls.extend(components);

        let outcome = run(decls);
        for package in INTEGRATION_PACKAGES {
            prop_assert_eq!(outcome.files_in(package, "AppScope_").len(), 1);
        }
        let kept = &outcome.report.emitted.iter().find(|u| u.generator == "work-integration").unwrap().provenance;
        let first = names.iter().next().unwrap();
        prop_assert_eq!(kept, &vec![std::path::PathBuf::from(format!("src/main/{first}Component.kt"))]);
    }

    #[test]
    fn generation_is_deterministic(workers in prop::collection::btree_set("[A-Z][a-z]{2,6}", 0..4)) {
        let build = || {
            let mut decls = scenario_scopes();
            for w in &workers {
                decls.push(worker(&format!("com.example.work.{w}Worker"), "com.example.di.AppScope", &["appContext", "workerParams"]));
            }
            decls
        };
        let first = run(build());
        let second = run(build());

        prop_assert_eq!(first.sink.units(), second.sink.units());
        for key in first.sink.keys() {
            prop_assert_eq!(
                first.text(&key.package, &key.file),
                second.text(&key.package, &key.file)
            );
        }
    }
}
