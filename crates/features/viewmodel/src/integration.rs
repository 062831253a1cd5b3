use crate::names::{
    FEATURE_NAME, INTEGRATION_PACKAGE, SEALANT_VIEW_MODEL_FACTORY_CREATOR_OWNER, SEALANT_VIEW_MODEL_MAP,
    SEALANT_VIEW_MODEL_MAP_KEY_SET, SEALANT_VIEW_MODEL_MAP_SUBCOMPONENT_MAP, SEALANT_VIEW_MODEL_SCOPE,
    SEALANT_VIEW_MODEL_SUBCOMPONENT, SEALANT_VIEW_MODEL_SUBCOMPONENT_FACTORY,
    SEALANT_VIEW_MODEL_SUBCOMPONENT_PARENT, VIEW_MODEL_FACTORIES_OWNER,
};
use sealant_kernel::prelude::*;

const ID: &str = "viewmodel-integration";

/// Emits `<Scope>_SealantViewModel_Integration` for every scope that enables view-models.
///
/// The subcomponent and its factory binding are shared with descendants; the owner interfaces
/// and the child scope's view-model map are emitted for every scope.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewModelIntegration;

impl Generator for ViewModelIntegration {
    fn id(&self) -> &'static str {
        ID
    }

    fn feature(&self) -> Feature {
        Feature::ViewModel
    }

    fn phase(&self) -> Phase {
        Phase::Integration
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<(), SealantError> {
        emit_integrations(
            ctx,
            ID,
            Feature::ViewModel,
            INTEGRATION_PACKAGE,
            FEATURE_NAME,
            |scope| {
                let subcomponent =
                    naming::scoped_name(INTEGRATION_PACKAGE, scope, "SealantViewModelSubcomponent")?;
                Ok(vec![
                    subcomponent_type(scope, &subcomponent)?,
                    subcomponent_module(scope, &subcomponent)?,
                ])
            },
            |scope| {
                let child_scope = naming::derive_scope_child_name(scope)?;
                Ok(vec![
                    owner(
                        scope,
                        "SealantViewModelFactoryCreator_Owner",
                        scope,
                        &SEALANT_VIEW_MODEL_FACTORY_CREATOR_OWNER,
                    )?,
                    factories_module(scope, &child_scope)?,
                    owner(scope, "ViewModelFactoriesOwner", &child_scope, &VIEW_MODEL_FACTORIES_OWNER)?,
                ])
            },
        )
    }
}

/// The merged subcomponent over `ViewModel_<Scope>`, created from a `SavedStateHandle`.
fn subcomponent_type(scope: &ClassName, subcomponent: &ClassName) -> Result<TypeSpec, SealantError> {
    let child_scope = naming::derive_scope_child_name(scope)?;

    let factory = TypeSpec::interface("Factory")
        .annotated(&known::MERGE_SUBCOMPONENT_FACTORY)
        .supertype(TypeName::class(&SEALANT_VIEW_MODEL_SUBCOMPONENT_FACTORY))
        .function(
            FunSpec::abstract_fun("create")
                .modifier(Modifier::Override)
                .parameter(
                    ParameterSpec::new("ssHandle", TypeName::class(&known::SAVED_STATE_HANDLE))
                        .annotation(AnnotationSpec::new(&known::BINDS_INSTANCE)),
                )
                .returns(TypeName::class(subcomponent)),
        );
    let parent = TypeSpec::interface("Parent")
        .annotation(AnnotationSpec::contributes_to(scope))
        .supertype(TypeName::class(&SEALANT_VIEW_MODEL_SUBCOMPONENT_PARENT));

    Ok(TypeSpec::interface(subcomponent.simple_name())
        .annotation(AnnotationSpec::new(&known::SINGLE_IN).class_arg(&SEALANT_VIEW_MODEL_SCOPE))
        .annotation(AnnotationSpec::new(&known::MERGE_SUBCOMPONENT).named_class("scope", &child_scope))
        .supertype(TypeName::class(&SEALANT_VIEW_MODEL_SUBCOMPONENT))
        .nested(factory)
        .nested(parent))
}

/// Declares the key set and binds the subcomponent factory under the scope's reflection name.
fn subcomponent_module(scope: &ClassName, subcomponent: &ClassName) -> Result<TypeSpec, SealantError> {
    let name = naming::scoped_name(
        INTEGRATION_PACKAGE,
        scope,
        "SealantViewModelSubcomponent_IntegrativeModule",
    )?;
    let factory = subcomponent.nested("Factory")?;

    Ok(TypeSpec::interface(name.simple_name())
        .annotation(
            AnnotationSpec::new(&known::MODULE).named_classes("subcomponents", [subcomponent.clone()]),
        )
        .annotation(AnnotationSpec::contributes_to(scope))
        .function(
            FunSpec::abstract_fun("bindVmClassSet")
                .annotated(&known::MULTIBINDS)
                .annotated(&SEALANT_VIEW_MODEL_MAP_KEY_SET)
                .returns(TypeName::set_of(TypeName::java_class_out(&known::ANDROIDX_VIEW_MODEL))),
        )
        .function(
            FunSpec::abstract_fun("bind")
                .annotated(&known::BINDS)
                .annotated(&known::INTO_MAP)
                .annotation(AnnotationSpec::new(&known::STRING_KEY).string(scope.reflection_name()))
                .annotated(&SEALANT_VIEW_MODEL_MAP_SUBCOMPONENT_MAP)
                .parameter(ParameterSpec::new("instance", TypeName::class(&factory)))
                .returns(TypeName::class(&SEALANT_VIEW_MODEL_SUBCOMPONENT_FACTORY)),
        ))
}

/// The (possibly empty) view-model map of the child scope.
fn factories_module(scope: &ClassName, child_scope: &ClassName) -> Result<TypeSpec, SealantError> {
    let name = naming::scoped_name(INTEGRATION_PACKAGE, scope, "ViewModelFactories_IntegrativeModule")?;
    Ok(TypeSpec::interface(name.simple_name())
        .annotated(&known::MODULE)
        .annotation(AnnotationSpec::contributes_to(child_scope))
        .function(
            FunSpec::abstract_fun("bindWmMap")
                .annotated(&known::MULTIBINDS)
                .annotated(&SEALANT_VIEW_MODEL_MAP)
                .returns(TypeName::map_of(
                    TypeName::java_class_out(&known::ANDROIDX_VIEW_MODEL),
                    TypeName::class(&known::ANDROIDX_VIEW_MODEL),
                )),
        ))
}

fn owner(
    scope: &ClassName,
    suffix: &str,
    contributed_to: &ClassName,
    supertype: &ClassName,
) -> Result<TypeSpec, SealantError> {
    let name = naming::scoped_name(INTEGRATION_PACKAGE, scope, suffix)?;
    Ok(TypeSpec::interface(name.simple_name())
        .annotation(AnnotationSpec::contributes_to(contributed_to))
        .supertype(TypeName::class(supertype)))
}
