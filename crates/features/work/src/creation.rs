use crate::names::{
    APP_CONTEXT_PARAMETER, CONTRIBUTES_WORKER, WORKER_ASSISTED_FACTORY, WORKER_ASSISTED_FACTORY_MAP,
    WORKER_PARAMS_PARAMETER,
};
use sealant_kernel::prelude::*;

const ID: &str = "work-creation";

/// Emits `<Worker>_Creation`: the assisted factory and the module binding it into the map.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkCreation;

impl Generator for WorkCreation {
    fn id(&self) -> &'static str {
        ID
    }

    fn feature(&self) -> Feature {
        Feature::Work
    }

    fn phase(&self) -> Phase {
        Phase::Creation
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<(), SealantError> {
        for contribution in contributions(ctx, ID, &CONTRIBUTES_WORKER, Feature::Work)? {
            if ctx.should_stop() {
                break;
            }
            let declaration = contribution.declaration;

            let violations = validate(ctx.provider(), declaration);
            if !violations.is_empty() {
                for violation in violations {
                    ctx.diagnose(ID, violation)?;
                }
                continue;
            }

            let file = creation_file(ctx, declaration, &contribution.scope)?;
            ctx.emit(ID, file, declaration)?;
        }
        Ok(())
    }
}

/// Every unmet shape constraint of a worker declaration.
pub(crate) fn validate(provider: &dyn SymbolProvider, declaration: &Declaration) -> Vec<SealantError> {
    let mut violations = Vec::new();
    let name = &declaration.name;

    if !provider.is_subtype_of(declaration, &known::ANDROIDX_LISTENABLE_WORKER) {
        violations.push(SealantError::shape(
            name,
            format!("must extend {}", *known::ANDROIDX_LISTENABLE_WORKER),
        ));
    }

    let constructors = provider.constructors(declaration);
    let [constructor] = constructors else {
        violations.push(SealantError::shape(
            name,
            format!("must have exactly one constructor, found {}", constructors.len()),
        ));
        return violations;
    };
    let signature = constructor.signature();

    if !constructor.has_annotation(&known::ASSISTED_INJECT) {
        violations.push(SealantError::shape(
            name,
            format!("constructor {signature} must be annotated with @AssistedInject"),
        ));
    }

    let assisted: Vec<&Parameter> =
        constructor.parameters.iter().filter(|p| p.has_annotation(&known::ASSISTED)).collect();
    if assisted.len() != 2 {
        violations.push(SealantError::shape(
            name,
            format!(
                "constructor {signature} must have exactly two @Assisted parameters, found {}",
                assisted.len()
            ),
        ));
    }

    let expected = [
        (APP_CONTEXT_PARAMETER, &*known::ANDROID_CONTEXT),
        (WORKER_PARAMS_PARAMETER, &*known::WORKER_PARAMETERS),
    ];
    for parameter in &assisted {
        match expected.iter().find(|(n, _)| *n == parameter.name) {
            None => violations.push(SealantError::shape(
                name,
                format!(
                    "constructor {signature} has @Assisted parameter '{}'; only \
                     '{APP_CONTEXT_PARAMETER}' and '{WORKER_PARAMS_PARAMETER}' are allowed",
                    parameter.name
                ),
            )),
            Some((_, ty)) if parameter.ty != **ty => violations.push(SealantError::shape(
                name,
                format!(
                    "constructor {signature}: parameter '{}' must be of type {ty}, found {}",
                    parameter.name, parameter.ty
                ),
            )),
            Some(_) => {},
        }
    }
    for (expected_name, ty) in expected {
        if !assisted.iter().any(|p| p.name == expected_name) {
            violations.push(SealantError::shape(
                name,
                format!(
                    "constructor {signature} is missing @Assisted parameter '{expected_name}: {}'",
                    ty.simple_name()
                ),
            ));
        }
    }

    violations
}

fn creation_file(
    ctx: &GenerationContext<'_>,
    declaration: &Declaration,
    scope: &ClassName,
) -> Result<FileSpec, SealantError> {
    let orig = &declaration.name;
    let factory = naming::derive_name(orig, "AssistedFactory")?;
    let module = naming::derive_name(orig, "BindsModule")?;

    let factory_type = TypeSpec::interface(factory.simple_name())
        .annotated(&known::ASSISTED_FACTORY)
        .supertype(TypeName::parameterized(&WORKER_ASSISTED_FACTORY, [TypeName::class(orig)]));

    let worker_factory = TypeName::parameterized(
        &WORKER_ASSISTED_FACTORY,
        [TypeName::producer_of(TypeName::class(&known::ANDROIDX_LISTENABLE_WORKER))],
    );
    let module_type = TypeSpec::interface(module.simple_name())
        .annotated(&known::MODULE)
        .annotation(AnnotationSpec::contributes_to(scope))
        .function(
            FunSpec::abstract_fun("bind")
                .annotated(&known::BINDS)
                .annotated(&known::INTO_MAP)
                .annotation(AnnotationSpec::new(&known::STRING_KEY).string(orig.reflection_name()))
                .annotated(&WORKER_ASSISTED_FACTORY_MAP)
                .parameter(ParameterSpec::new("instance", TypeName::class(&factory)))
                .returns(worker_factory),
        );

    Ok(ctx
        .file(orig.package(), naming::derive_name(orig, "Creation")?.simple_name())
        .add_type(factory_type)
        .add_type(module_type))
}
