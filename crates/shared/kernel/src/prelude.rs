pub use crate::error::{SealantError, SealantErrorExt};
pub use crate::generator::{
    Contribution, Diagnostic, GenerationContext, Generator, IntegrationTarget, Journal, Phase,
    Skip, SkipReason, contributions, emit_integrations, integration_targets, run_generators,
};
pub use crate::known;
pub use crate::naming::{self, NameRegistry};
pub use crate::scope::{ScopeConfiguration, ScopeGraph};
pub use crate::sink::{EmissionSink, GeneratedUnit, UnitKey};
pub use crate::symbols::{SymbolProvider, SymbolTable};
pub use crate::tree::{
    AnnotationSpec, ConstructorSpec, FileSpec, FunSpec, Modifier, ParameterSpec, PropertyKind,
    Statement, TypeKind, TypeName, TypeSpec,
};
pub use sealant_domain::features::{Feature, FeatureSet};
pub use sealant_domain::names::ClassName;
pub use sealant_domain::symbols::{
    Annotation, AnnotationArgument, AnnotationValue, Constructor, Declaration, DeclarationKind,
    Parameter,
};
