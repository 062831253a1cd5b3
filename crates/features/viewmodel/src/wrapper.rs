use crate::names::CONTRIBUTES_TO_VIEW_MODEL;
use sealant_kernel::prelude::*;

const ID: &str = "viewmodel-wrapper";

/// Emits `<Module>_Wrapper`, installing a user module into the view-model child scope.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewModelModuleWrapper;

impl Generator for ViewModelModuleWrapper {
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
        for contribution in contributions(ctx, ID, &CONTRIBUTES_TO_VIEW_MODEL, Feature::ViewModel)? {
            if ctx.should_stop() {
                break;
            }
            let orig = &contribution.declaration.name;
            let child_scope = naming::derive_scope_child_name(&contribution.scope)?;
            let wrapper = naming::derive_name(orig, "Wrapper")?;

            let file = ctx.file(orig.package(), wrapper.simple_name()).add_type(
                TypeSpec::interface(wrapper.simple_name())
                    .annotation(AnnotationSpec::new(&known::MODULE).named_classes("includes", [orig.clone()]))
                    .annotation(AnnotationSpec::contributes_to(&child_scope)),
            );
            ctx.emit(ID, file, contribution.declaration)?;
        }
        Ok(())
    }
}
