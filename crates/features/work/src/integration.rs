use crate::names::{
    FEATURE_NAME, INTEGRATION_PACKAGE, SEALANT_WORKER_FACTORY, SEALANT_WORKER_FACTORY_OWNER,
    WORKER_ASSISTED_FACTORY, WORKER_ASSISTED_FACTORY_MAP,
};
use sealant_kernel::prelude::*;

const ID: &str = "work-integration";

/// Emits `<Scope>_SealantWork_Integration` for every scope that enables work.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkIntegration;

impl Generator for WorkIntegration {
    fn id(&self) -> &'static str {
        ID
    }

    fn feature(&self) -> Feature {
        Feature::Work
    }

    fn phase(&self) -> Phase {
        Phase::Integration
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<(), SealantError> {
        emit_integrations(
            ctx,
            ID,
            Feature::Work,
            INTEGRATION_PACKAGE,
            FEATURE_NAME,
            |scope| Ok(vec![integrative_module(scope)?]),
            |scope| Ok(vec![owner(scope)?]),
        )
    }
}

fn owner(scope: &ClassName) -> Result<TypeSpec, SealantError> {
    let name = naming::scoped_name(INTEGRATION_PACKAGE, scope, "SealantWorkerFactory_Owner")?;
    Ok(TypeSpec::interface(name.simple_name())
        .annotation(AnnotationSpec::contributes_to(scope))
        .supertype(TypeName::class(&SEALANT_WORKER_FACTORY_OWNER)))
}

/// Declares the (possibly empty) factory map and provides the worker factory from it.
fn integrative_module(scope: &ClassName) -> Result<TypeSpec, SealantError> {
    let name = naming::scoped_name(INTEGRATION_PACKAGE, scope, &format!("{FEATURE_NAME}_IntegrativeModule"))?;
    let factory = TypeName::parameterized(
        &WORKER_ASSISTED_FACTORY,
        [TypeName::producer_of(TypeName::class(&known::ANDROIDX_LISTENABLE_WORKER))],
    );
    let providers = TypeName::map_of(
        TypeName::class(&known::KOTLIN_STRING),
        TypeName::parameterized(&known::PROVIDER, [factory.clone()]).suppress_wildcards(),
    );

    Ok(TypeSpec::class(name.simple_name())
        .modifier(Modifier::Abstract)
        .annotated(&known::MODULE)
        .annotation(AnnotationSpec::contributes_to(scope))
        .function(
            FunSpec::abstract_fun("bindWafMap")
                .annotated(&known::MULTIBINDS)
                .annotated(&WORKER_ASSISTED_FACTORY_MAP)
                .returns(TypeName::map_of(TypeName::class(&known::KOTLIN_STRING), factory)),
        )
        .nested(
            TypeSpec::companion().function(
                FunSpec::new("provideWorkerFactory")
                    .annotated(&known::PROVIDES)
                    .parameter(
                        ParameterSpec::new("wafProviderMap", providers)
                            .annotation(AnnotationSpec::new(&WORKER_ASSISTED_FACTORY_MAP)),
                    )
                    .returns(TypeName::class(&SEALANT_WORKER_FACTORY))
                    .body(Statement::ReturnNew {
                        class: SEALANT_WORKER_FACTORY.clone(),
                        arguments: vec!["wafProviderMap".to_owned()],
                    }),
            ),
        ))
}
