use sealant_kernel::prelude::*;
use tracing::debug;

const ID: &str = "viewmodel-child-scopes";

/// Emits `<Scope>_SealantChildScopes` with the `ViewModel_<Scope>` marker class for every
/// configured scope that enables view-models.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChildScopes;

impl Generator for ChildScopes {
    fn id(&self) -> &'static str {
        ID
    }

    fn feature(&self) -> Feature {
        Feature::ViewModel
    }

    fn phase(&self) -> Phase {
        Phase::ChildScopes
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<(), SealantError> {
        for configuration in ctx.graph().scopes() {
            if ctx.should_stop() {
                break;
            }
            let scope = &configuration.scope;
            if !configuration.enables(Feature::ViewModel) {
                continue;
            }
            let origin = ctx.provider().declaration(scope).ok_or_else(|| {
                SealantError::from(format!("configured scope {scope} is missing from the snapshot"))
            })?;

            let child = naming::derive_scope_child_name(scope)?;
            debug!(scope = %scope, child = %child, "Child scope");
            let file = ctx
                .file(scope.package(), naming::derive_name(scope, "SealantChildScopes")?.simple_name())
                .add_type(
                    TypeSpec::class(child.simple_name())
                        .modifier(Modifier::Abstract)
                        .primary_constructor(ConstructorSpec::new().modifier(Modifier::Private)),
                );
            ctx.emit(ID, file, origin)?;
        }
        Ok(())
    }
}
