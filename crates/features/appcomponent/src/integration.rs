use crate::names::{
    FEATURE_NAME, INTEGRATION_PACKAGE, SEALANT_ACTIVITY_INJECTORS_MAP, SEALANT_INJECTORS_OWNER,
    SEALANT_OTHER_INJECTORS_MAP,
};
use sealant_kernel::prelude::*;

const ID: &str = "appcomponent-integration";

/// Emits `<Scope>_SealantAppcomponent_Integration` for every scope that enables injectors.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppcomponentIntegration;

impl Generator for AppcomponentIntegration {
    fn id(&self) -> &'static str {
        ID
    }

    fn feature(&self) -> Feature {
        Feature::Appcomponent
    }

    fn phase(&self) -> Phase {
        Phase::Integration
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<(), SealantError> {
        emit_integrations(
            ctx,
            ID,
            Feature::Appcomponent,
            INTEGRATION_PACKAGE,
            FEATURE_NAME,
            |scope| {
                let name = naming::scoped_name(
                    INTEGRATION_PACKAGE,
                    scope,
                    &format!("{FEATURE_NAME}_IntegrativeModule"),
                )?;
                Ok(vec![
                    TypeSpec::interface(name.simple_name())
                        .annotated(&known::MODULE)
                        .annotation(AnnotationSpec::contributes_to(scope))
                        .function(
                            FunSpec::abstract_fun("activityInjectors")
                                .annotated(&known::MULTIBINDS)
                                .returns(TypeName::class(&SEALANT_ACTIVITY_INJECTORS_MAP)),
                        )
                        .function(
                            FunSpec::abstract_fun("otherInjectors")
                                .annotated(&known::MULTIBINDS)
                                .returns(TypeName::class(&SEALANT_OTHER_INJECTORS_MAP)),
                        ),
                ])
            },
            |scope| {
                let name = naming::scoped_name(INTEGRATION_PACKAGE, scope, "SealantInjectorsOwner")?;
                Ok(vec![
                    TypeSpec::interface(name.simple_name())
                        .annotation(AnnotationSpec::contributes_to(scope))
                        .supertype(TypeName::class(&SEALANT_INJECTORS_OWNER)),
                ])
            },
        )
    }
}
