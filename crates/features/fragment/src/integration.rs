use crate::names::{
    FEATURE_NAME, INTEGRATION_PACKAGE, SEALANT_FRAGMENT_FACTORY, SEALANT_FRAGMENT_FACTORY_OWNER,
};
use sealant_kernel::prelude::*;

const ID: &str = "fragment-integration";

/// Emits `<Scope>_SealantFragment_Integration` for every scope that enables fragments.
#[derive(Debug, Clone, Copy, Default)]
pub struct FragmentIntegration;

impl Generator for FragmentIntegration {
    fn id(&self) -> &'static str {
        ID
    }

    fn feature(&self) -> Feature {
        Feature::Fragment
    }

    fn phase(&self) -> Phase {
        Phase::Integration
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<(), SealantError> {
        emit_integrations(
            ctx,
            ID,
            Feature::Fragment,
            INTEGRATION_PACKAGE,
            FEATURE_NAME,
            |scope| Ok(vec![integrative_module(scope)?]),
            |scope| {
                let name = naming::scoped_name(INTEGRATION_PACKAGE, scope, "SealantFragmentFactory_Owner")?;
                Ok(vec![
                    TypeSpec::interface(name.simple_name())
                        .annotation(AnnotationSpec::contributes_to(scope))
                        .supertype(TypeName::class(&SEALANT_FRAGMENT_FACTORY_OWNER)),
                ])
            },
        )
    }
}

fn integrative_module(scope: &ClassName) -> Result<TypeSpec, SealantError> {
    let name = naming::scoped_name(INTEGRATION_PACKAGE, scope, &format!("{FEATURE_NAME}_IntegrativeModule"))?;
    let fragment = TypeName::class(&known::ANDROIDX_FRAGMENT);
    let key = TypeName::java_class_out(&known::ANDROIDX_FRAGMENT);
    let providers = TypeName::map_of(
        key.clone(),
        TypeName::parameterized(&known::PROVIDER, [fragment.clone()]).suppress_wildcards(),
    );

    Ok(TypeSpec::class(name.simple_name())
        .modifier(Modifier::Abstract)
        .annotated(&known::MODULE)
        .annotation(AnnotationSpec::contributes_to(scope))
        .function(
            FunSpec::abstract_fun("bindFragmentMap")
                .annotated(&known::MULTIBINDS)
                .returns(TypeName::map_of(key, fragment)),
        )
        .nested(
            TypeSpec::companion().function(
                FunSpec::new("provideFragmentFactory")
                    .annotated(&known::PROVIDES)
                    .parameter(ParameterSpec::new("fragmentProviderMap", providers))
                    .returns(TypeName::class(&SEALANT_FRAGMENT_FACTORY))
                    .body(Statement::ReturnNew {
                        class: SEALANT_FRAGMENT_FACTORY.clone(),
                        arguments: vec!["fragmentProviderMap".to_owned()],
                    }),
            ),
        ))
}
