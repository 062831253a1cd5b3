use sealant_emitter::testing::{class, component, contributed, run, scope};
use sealant_kernel::prelude::*;
use sealant_work::generators;
use sealant_work::names::CONTRIBUTES_WORKER;

const WORK_ONLY: [bool; 4] = [false, false, false, true];

fn worker(name: &str, scope: &str) -> Declaration {
    let assisted = |n: &str, ty: &ClassName| {
        Parameter::new(n, ty.clone()).with_annotation(Annotation::new(known::ASSISTED.clone()))
    };
    contributed(name, &CONTRIBUTES_WORKER, scope)
        .with_supertype(class("androidx.work.CoroutineWorker"))
        .with_constructor(
            Constructor::default()
                .with_annotation(Annotation::new(known::ASSISTED_INJECT.clone()))
                .with_parameter(assisted("appContext", &known::ANDROID_CONTEXT))
                .with_parameter(assisted("workerParams", &known::WORKER_PARAMETERS)),
        )
}

fn coroutine_worker() -> Declaration {
    Declaration::new(class("androidx.work.CoroutineWorker"))
        .with_supertype(known::ANDROIDX_LISTENABLE_WORKER.clone())
}

#[test]
fn creation_unit_binds_assisted_factory_by_reflection_name() {
    let outcome = run(
        vec![
            scope("com.example.di.AppScope", WORK_ONLY, None),
            coroutine_worker(),
            worker("com.example.work.SyncWorker", "com.example.di.AppScope"),
        ],
        &generators(),
    );

    let expected = "\
// Generated by Sealant.
// https://github.com/SteinerOk/sealant
@file:OptIn(InternalSealantApi::class, ExperimentalSealantApi::class)

package com.example.work

import androidx.work.ListenableWorker
import com.example.di.AppScope
import com.squareup.anvil.annotations.ContributesTo
import dagger.Binds
import dagger.Module
import dagger.assisted.AssistedFactory
import dagger.multibindings.IntoMap
import dagger.multibindings.StringKey
import dev.steinerok.sealant.core.ExperimentalSealantApi
import dev.steinerok.sealant.core.internal.InternalSealantApi
import dev.steinerok.sealant.work.SealantWorkerAssistedFactoryMap
import dev.steinerok.sealant.work.WorkerAssistedFactory

@AssistedFactory
public interface SyncWorker_AssistedFactory : WorkerAssistedFactory<SyncWorker>

@Module
@ContributesTo(scope = AppScope::class)
public interface SyncWorker_BindsModule {
  @Binds
  @IntoMap
  @StringKey(\"com.example.work.SyncWorker\")
  @SealantWorkerAssistedFactoryMap
  public fun bind(instance: SyncWorker_AssistedFactory): WorkerAssistedFactory<out ListenableWorker>
}
";
    assert_eq!(outcome.text("com.example.work", "SyncWorker_Creation"), expected);
    assert_eq!(
        outcome.journal.emitted[0].provenance,
        [std::path::PathBuf::from("src/main/SyncWorker.kt")]
    );
}

#[test]
fn root_scope_gets_module_and_owner() {
    let outcome = run(
        vec![
            scope("com.example.di.AppScope", WORK_ONLY, None),
            component("com.example.AppComponent", "com.example.di.AppScope"),
        ],
        &generators(),
    );

    let text = outcome.text("sealant.integration.work", "AppScope_SealantWork_Integration");
    assert!(text.contains("public abstract class AppScope_SealantWork_IntegrativeModule {\n"));
    assert!(text.contains(
        "  public abstract fun bindWafMap(): Map<String, WorkerAssistedFactory<out ListenableWorker>>\n"
    ));
    assert!(text.contains(
        "    public fun provideWorkerFactory(@SealantWorkerAssistedFactoryMap wafProviderMap: \
         Map<String, @JvmSuppressWildcards Provider<WorkerAssistedFactory<out ListenableWorker>>>): \
         SealantWorkerFactory {\n      return SealantWorkerFactory(wafProviderMap)\n    }\n"
    ));
    assert!(text.contains(
        "@ContributesTo(scope = AppScope::class)\n\
         public interface AppScope_SealantWorkerFactory_Owner : SealantWorkerFactory.Owner\n"
    ));
    assert!(outcome.journal.skips.is_empty());
}

#[test]
fn child_scope_inherits_the_multibinding() {
    let outcome = run(
        vec![
            scope("com.example.di.AppScope", WORK_ONLY, None),
            scope("com.example.di.AccountScope", WORK_ONLY, Some("com.example.di.AppScope")),
            component("com.example.AccountComponent", "com.example.di.AccountScope"),
            component("com.example.AppComponent", "com.example.di.AppScope"),
        ],
        &generators(),
    );

    let child = outcome.text("sealant.integration.work", "AccountScope_SealantWork_Integration");
    assert!(!child.contains("IntegrativeModule"));
    assert!(child.contains("public interface AccountScope_SealantWorkerFactory_Owner"));

    assert_eq!(outcome.journal.skips.len(), 1);
    assert_eq!(
        outcome.journal.skips[0].reason,
        SkipReason::InheritedFromAncestor { ancestor: class("com.example.di.AppScope") }
    );
}

#[test]
fn disabled_scope_and_broken_workers_emit_nothing() {
    let mut broken = worker("com.example.work.BrokenWorker", "com.example.di.AppScope");
    broken.constructors[0].parameters[0].name = "context".to_owned();

    let outcome = run(
        vec![
            scope("com.example.di.AppScope", WORK_ONLY, None),
            scope("com.example.di.UiScope", [false, true, true, false], None),
            coroutine_worker(),
            broken,
            worker("com.example.work.UiWorker", "com.example.di.UiScope"),
            worker("com.example.work.SyncWorker", "com.example.di.AppScope"),
        ],
        &generators(),
    );

    assert!(!outcome.has("com.example.work", "BrokenWorker_Creation"));
    assert!(!outcome.has("com.example.work", "UiWorker_Creation"));
    assert!(outcome.has("com.example.work", "SyncWorker_Creation"));

    let diagnostics = &outcome.journal.diagnostics;
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.iter().all(|d| d.kind == "ShapeViolation"));
    assert!(diagnostics.iter().all(|d| d.declaration.as_deref() == Some("com.example.work.BrokenWorker")));
    assert_eq!(
        diagnostics[0].source_file.as_deref(),
        Some(std::path::Path::new("src/main/BrokenWorker.kt"))
    );
}
