use crate::names::{CONTRIBUTES_FRAGMENT, FRAGMENT_KEY, REPLACES_ARGUMENT, REPLACES_INDEX};
use sealant_kernel::prelude::*;

const ID: &str = "fragment-creation";

/// Emits `<Fragment>_Creation` holding the module that binds the fragment into the map.
#[derive(Debug, Clone, Copy, Default)]
pub struct FragmentCreation;

impl Generator for FragmentCreation {
    fn id(&self) -> &'static str {
        ID
    }

    fn feature(&self) -> Feature {
        Feature::Fragment
    }

    fn phase(&self) -> Phase {
        Phase::Creation
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<(), SealantError> {
        for contribution in contributions(ctx, ID, &CONTRIBUTES_FRAGMENT, Feature::Fragment)? {
            if ctx.should_stop() {
                break;
            }
            let declaration = contribution.declaration;

            if !ctx.provider().is_subtype_of(declaration, &known::ANDROIDX_FRAGMENT) {
                let err = SealantError::shape(
                    &declaration.name,
                    format!("must extend {}", *known::ANDROIDX_FRAGMENT),
                );
                ctx.diagnose(ID, err)?;
                continue;
            }

            let replaces = match replaced_modules(ctx.provider(), declaration) {
                Ok(replaces) => replaces,
                Err(err) => {
                    ctx.diagnose(ID, err)?;
                    continue;
                },
            };

            let file = creation_file(ctx, declaration, &contribution.scope, replaces)?;
            ctx.emit(ID, file, declaration)?;
        }
        Ok(())
    }
}

fn replaced_modules(
    provider: &dyn SymbolProvider,
    declaration: &Declaration,
) -> Result<Vec<ClassName>, SealantError> {
    let Some(annotation) = declaration.annotation(&CONTRIBUTES_FRAGMENT) else {
        return Ok(Vec::new());
    };
    let Some(value) =
        provider.annotation_argument(declaration, annotation, REPLACES_ARGUMENT, Some(REPLACES_INDEX))?
    else {
        return Ok(Vec::new());
    };
    value.as_classes().map(|c| c.into_iter().cloned().collect()).ok_or_else(|| {
        SealantError::configuration(
            &declaration.name,
            format!("{REPLACES_ARGUMENT} must list class references, got {value:?}"),
        )
    })
}

fn creation_file(
    ctx: &GenerationContext<'_>,
    declaration: &Declaration,
    scope: &ClassName,
    replaces: Vec<ClassName>,
) -> Result<FileSpec, SealantError> {
    let orig = &declaration.name;
    let module = naming::derive_name(orig, "BindsModule")?;

    let mut contributes = AnnotationSpec::contributes_to(scope);
    if !replaces.is_empty() {
        contributes = contributes.named_classes(REPLACES_ARGUMENT, replaces);
    }

    let module_type = TypeSpec::interface(module.simple_name())
        .annotated(&known::MODULE)
        .annotation(contributes)
        .function(
            FunSpec::abstract_fun("bind")
                .annotated(&known::BINDS)
                .annotated(&known::INTO_MAP)
                .annotation(AnnotationSpec::new(&FRAGMENT_KEY).class_arg(orig))
                .parameter(ParameterSpec::new("instance", TypeName::class(orig)))
                .returns(TypeName::class(&known::ANDROIDX_FRAGMENT)),
        );

    Ok(ctx
        .file(orig.package(), naming::derive_name(orig, "Creation")?.simple_name())
        .add_type(module_type))
}
