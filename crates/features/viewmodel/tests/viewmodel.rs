use sealant_emitter::testing::{component, contributed, run, scope};
use sealant_kernel::prelude::*;
use sealant_viewmodel::generators;
use sealant_viewmodel::names::{CONTRIBUTES_TO_VIEW_MODEL, CONTRIBUTES_VIEW_MODEL};

const VIEW_MODEL_ONLY: [bool; 4] = [false, true, false, false];
const PACKAGE: &str = "sealant.integration.viewmodel";

fn view_model(name: &str, scope: &str) -> Declaration {
    contributed(name, &CONTRIBUTES_VIEW_MODEL, scope).with_supertype(known::ANDROIDX_VIEW_MODEL.clone())
}

/// `AppScope` and its child `GuestScope`, both enabling view-models, each with a component.
fn app_and_guest() -> Vec<Declaration> {
    vec![
        scope("com.example.di.AppScope", VIEW_MODEL_ONLY, None),
        scope("com.example.di.GuestScope", VIEW_MODEL_ONLY, Some("com.example.di.AppScope")),
        component("com.example.AppComponent", "com.example.di.AppScope"),
        component("com.example.GuestComponent", "com.example.di.GuestScope"),
    ]
}

#[test]
fn every_enabling_scope_gets_a_child_scope() {
    let mut decls = app_and_guest();
    decls.push(scope("com.example.di.PlainScope", [true, false, true, true], None));
    let outcome = run(decls, &generators());

    let text = outcome.text("com.example.di", "AppScope_SealantChildScopes");
    assert!(text.contains("package com.example.di\n"));
    assert!(text.contains("public abstract class ViewModel_AppScope private constructor()\n"));
    assert!(outcome.has("com.example.di", "GuestScope_SealantChildScopes"));
    assert!(!outcome.has("com.example.di", "PlainScope_SealantChildScopes"));
}

#[test]
fn view_model_is_split_across_scope_and_child_scope() {
    let mut decls = app_and_guest();
    decls.push(view_model("com.example.feed.FeedViewModel", "com.example.di.GuestScope"));
    let outcome = run(decls, &generators());

    let text = outcome.text("com.example.feed", "FeedViewModel_Creation");
    assert!(text.contains(
        "@Module\n\
         @ContributesTo(scope = GuestScope::class)\n\
         public object FeedViewModel_KeyModule {\n  \
         @Provides\n  \
         @IntoSet\n  \
         @SealantViewModelMap.KeySet\n  \
         public fun provideFeedViewModelKey(): Class<out ViewModel> {\n    \
         return FeedViewModel::class.java\n  \
         }\n\
         }\n"
    ));
    assert!(text.contains(
        "@Module\n\
         @ContributesTo(scope = ViewModel_GuestScope::class)\n\
         public interface FeedViewModel_BindsModule {\n  \
         @Binds\n  \
         @IntoMap\n  \
         @ViewModelKey(FeedViewModel::class)\n  \
         @SealantViewModelMap\n  \
         public fun bind(instance: FeedViewModel): ViewModel\n\
         }\n"
    ));
    assert!(text.contains("import com.example.di.ViewModel_GuestScope\n"));
}

#[test]
fn non_view_model_is_a_shape_violation() {
    let mut decls = app_and_guest();
    decls.push(contributed(
        "com.example.feed.FeedPresenter",
        &CONTRIBUTES_VIEW_MODEL,
        "com.example.di.AppScope",
    ));
    let outcome = run(decls, &generators());

    assert!(!outcome.has("com.example.feed", "FeedPresenter_Creation"));
    let [diagnostic] = outcome.journal.diagnostics.as_slice() else {
        panic!("expected one diagnostic, got {:?}", outcome.journal.diagnostics);
    };
    assert_eq!(diagnostic.kind, "ShapeViolation");
    assert_eq!(
        diagnostic.message,
        "Invalid declaration com.example.feed.FeedPresenter: must extend androidx.lifecycle.ViewModel"
    );
}

#[test]
fn modules_are_wrapped_into_the_child_scope() {
    let mut decls = app_and_guest();
    decls.push(contributed("com.example.feed.FeedModule", &CONTRIBUTES_TO_VIEW_MODEL, "com.example.di.AppScope"));
    let outcome = run(decls, &generators());

    let text = outcome.text("com.example.feed", "FeedModule_Wrapper");
    assert!(text.contains(
        "@Module(includes = [FeedModule::class])\n\
         @ContributesTo(scope = ViewModel_AppScope::class)\n\
         public interface FeedModule_Wrapper\n"
    ));
}

#[test]
fn root_scope_owns_the_subcomponent() {
    let outcome = run(app_and_guest(), &generators());
    let text = outcome.text(PACKAGE, "AppScope_SealantViewModel_Integration");

    assert!(text.contains(
        "@SingleIn(SealantViewModelScope::class)\n\
         @MergeSubcomponent(scope = ViewModel_AppScope::class)\n\
         public interface AppScope_SealantViewModelSubcomponent : SealantViewModelSubcomponent {\n  \
         @MergeSubcomponent.Factory\n  \
         public interface Factory : SealantViewModelSubcomponent.Factory {\n    \
         override fun create(@BindsInstance ssHandle: SavedStateHandle): \
         AppScope_SealantViewModelSubcomponent\n  \
         }\n\n  \
         @ContributesTo(scope = AppScope::class)\n  \
         public interface Parent : SealantViewModelSubcomponent.Parent\n\
         }\n"
    ));
    assert!(text.contains(
        "@Module(subcomponents = [AppScope_SealantViewModelSubcomponent::class])\n\
         @ContributesTo(scope = AppScope::class)\n\
         public interface AppScope_SealantViewModelSubcomponent_IntegrativeModule {\n  \
         @Multibinds\n  \
         @SealantViewModelMap.KeySet\n  \
         public fun bindVmClassSet(): Set<Class<out ViewModel>>\n\n  \
         @Binds\n  \
         @IntoMap\n  \
         @StringKey(\"com.example.di.AppScope\")\n  \
         @SealantViewModelMap.SubcomponentMap\n  \
         public fun bind(instance: AppScope_SealantViewModelSubcomponent.Factory): \
         SealantViewModelSubcomponent.Factory\n\
         }\n"
    ));
    assert!(text.contains(
        "@ContributesTo(scope = AppScope::class)\n\
         public interface AppScope_SealantViewModelFactoryCreator_Owner : SealantViewModelFactoryCreator.Owner\n"
    ));
}

#[test]
fn inheriting_scope_keeps_its_child_scope_parts() {
    let outcome = run(app_and_guest(), &generators());
    let text = outcome.text(PACKAGE, "GuestScope_SealantViewModel_Integration");

    assert!(!text.contains("GuestScope_SealantViewModelSubcomponent"));
    assert!(text.contains("public interface GuestScope_SealantViewModelFactoryCreator_Owner"));
    assert!(text.contains(
        "@Module\n\
         @ContributesTo(scope = ViewModel_GuestScope::class)\n\
         public interface GuestScope_ViewModelFactories_IntegrativeModule {\n  \
         @Multibinds\n  \
         @SealantViewModelMap\n  \
         public fun bindWmMap(): Map<Class<out ViewModel>, ViewModel>\n\
         }\n"
    ));
    assert!(text.contains(
        "@ContributesTo(scope = ViewModel_GuestScope::class)\n\
         public interface GuestScope_ViewModelFactoriesOwner : ViewModelFactoriesOwner\n"
    ));

    let [skip] = outcome.journal.skips.as_slice() else {
        panic!("expected one skip, got {:?}", outcome.journal.skips);
    };
    assert_eq!(skip.scope.to_string(), "com.example.di.GuestScope");
    assert!(matches!(
        &skip.reason,
        SkipReason::InheritedFromAncestor { ancestor } if ancestor.to_string() == "com.example.di.AppScope"
    ));
}
