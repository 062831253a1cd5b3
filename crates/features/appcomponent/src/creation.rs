use crate::names::{ACTIVITY_KEY, INJECT_WITH, SEALANT_INJECTOR};
use sealant_kernel::prelude::*;

const ID: &str = "appcomponent-creation";

/// Emits `<Class>_Injection`: the injector wrapper and the module binding it.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppcomponentCreation;

impl Generator for AppcomponentCreation {
    fn id(&self) -> &'static str {
        ID
    }

    fn feature(&self) -> Feature {
        Feature::Appcomponent
    }

    fn phase(&self) -> Phase {
        Phase::Creation
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<(), SealantError> {
        for contribution in contributions(ctx, ID, &INJECT_WITH, Feature::Appcomponent)? {
            if ctx.should_stop() {
                break;
            }
            let declaration = contribution.declaration;
            let is_activity = ctx.provider().is_subtype_of(declaration, &known::ANDROIDX_ACTIVITY);
            let file = injection_file(ctx, declaration, &contribution.scope, is_activity)?;
            ctx.emit(ID, file, declaration)?;
        }
        Ok(())
    }
}

fn injection_file(
    ctx: &GenerationContext<'_>,
    declaration: &Declaration,
    scope: &ClassName,
    is_activity: bool,
) -> Result<FileSpec, SealantError> {
    let orig = &declaration.name;
    let injector = naming::derive_name(orig, "SealantInjector")?;
    let module = naming::derive_name(&injector, "BindsModule")?;

    let injector_type = TypeSpec::class(injector.simple_name())
        .primary_constructor(
            ConstructorSpec::new().annotation(AnnotationSpec::new(&known::INJECT)).parameter(
                ParameterSpec::new(
                    "injector",
                    TypeName::parameterized(&known::MEMBERS_INJECTOR, [TypeName::class(orig)]),
                )
                .property(PropertyKind::OverrideVal),
            ),
        )
        .supertype(TypeName::parameterized(&SEALANT_INJECTOR, [TypeName::class(orig)]));

    let key = if is_activity { &*ACTIVITY_KEY } else { &*known::CLASS_KEY };
    let module_type = TypeSpec::interface(module.simple_name())
        .annotated(&known::MODULE)
        .annotation(AnnotationSpec::contributes_to(scope))
        .function(
            FunSpec::abstract_fun("bind")
                .annotated(&known::BINDS)
                .annotated(&known::INTO_MAP)
                .annotation(AnnotationSpec::new(key).class_arg(orig))
                .parameter(ParameterSpec::new("instance", TypeName::class(&injector)))
                .returns(TypeName::parameterized(&SEALANT_INJECTOR, [TypeName::Star])),
        );

    Ok(ctx
        .file(orig.package(), naming::derive_name(orig, "Injection")?.simple_name())
        .add_type(injector_type)
        .add_type(module_type))
}
