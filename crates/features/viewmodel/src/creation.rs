use crate::names::{
    CONTRIBUTES_VIEW_MODEL, SEALANT_VIEW_MODEL_MAP, SEALANT_VIEW_MODEL_MAP_KEY_SET, VIEW_MODEL_KEY,
};
use sealant_kernel::prelude::*;

const ID: &str = "viewmodel-creation";

/// Emits `<ViewModel>_Creation`: the key module for the owning scope and the binds module for
/// its view-model child scope.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewModelCreation;

impl Generator for ViewModelCreation {
    fn id(&self) -> &'static str {
        ID
    }

    fn feature(&self) -> Feature {
        Feature::ViewModel
    }

    fn phase(&self) -> Phase {
        Phase::Creation
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<(), SealantError> {
        for contribution in contributions(ctx, ID, &CONTRIBUTES_VIEW_MODEL, Feature::ViewModel)? {
            if ctx.should_stop() {
                break;
            }
            let declaration = contribution.declaration;

            if !ctx.provider().is_subtype_of(declaration, &known::ANDROIDX_VIEW_MODEL) {
                let err = SealantError::shape(
                    &declaration.name,
                    format!("must extend {}", *known::ANDROIDX_VIEW_MODEL),
                );
                ctx.diagnose(ID, err)?;
                continue;
            }

            let file = creation_file(ctx, declaration, &contribution.scope)?;
            ctx.emit(ID, file, declaration)?;
        }
        Ok(())
    }
}

fn creation_file(
    ctx: &GenerationContext<'_>,
    declaration: &Declaration,
    scope: &ClassName,
) -> Result<FileSpec, SealantError> {
    let orig = &declaration.name;
    let child_scope = naming::derive_scope_child_name(scope)?;
    let key_module = naming::derive_name(orig, "KeyModule")?;
    let binds_module = naming::derive_name(orig, "BindsModule")?;

    let key_type = TypeSpec::object(key_module.simple_name())
        .annotated(&known::MODULE)
        .annotation(AnnotationSpec::contributes_to(scope))
        .function(
            FunSpec::new(format!("provide{}Key", orig.joined_simple_names("_")))
                .annotated(&known::PROVIDES)
                .annotated(&known::INTO_SET)
                .annotated(&SEALANT_VIEW_MODEL_MAP_KEY_SET)
                .returns(TypeName::java_class_out(&known::ANDROIDX_VIEW_MODEL))
                .body(Statement::ReturnJavaClass { class: orig.clone() }),
        );

    let binds_type = TypeSpec::interface(binds_module.simple_name())
        .annotated(&known::MODULE)
        .annotation(AnnotationSpec::contributes_to(&child_scope))
        .function(
            FunSpec::abstract_fun("bind")
                .annotated(&known::BINDS)
                .annotated(&known::INTO_MAP)
                .annotation(AnnotationSpec::new(&VIEW_MODEL_KEY).class_arg(orig))
                .annotated(&SEALANT_VIEW_MODEL_MAP)
                .parameter(ParameterSpec::new("instance", TypeName::class(orig)))
                .returns(TypeName::class(&known::ANDROIDX_VIEW_MODEL)),
        );

    Ok(ctx
        .file(orig.package(), naming::derive_name(orig, "Creation")?.simple_name())
        .add_type(key_type)
        .add_type(binds_type))
}
