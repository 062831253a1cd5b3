//! The generator contract and the selection logic shared by every feature.
//!
//! A generator reads the symbol snapshot and scope graph through a [`GenerationContext`],
//! emits units through it, and reports per-declaration problems to it. Only run-level
//! failures travel back as `Err`.

use crate::error::SealantError;
use crate::known;
use crate::naming::{self, NameRegistry};
use crate::scope::ScopeGraph;
use crate::sink::{EmissionSink, GeneratedUnit, UnitKey};
use crate::symbols::SymbolProvider;
use crate::tree::{FileSpec, TypeSpec};
use fxhash::FxHashMap;
use parking_lot::Mutex;
use sealant_domain::config::HeaderConfig;
use sealant_domain::features::Feature;
use sealant_domain::names::ClassName;
use sealant_domain::symbols::{Annotation, Declaration};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info_span, warn};
use typed_builder::TypedBuilder;

/// Name of the list argument of the multi-scope integration marker.
pub const SCOPES_ARGUMENT: &str = "scopes";

/// Order in which generators run. Within a phase, registration order decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    ChildScopes,
    Creation,
    Integration,
}

pub trait Generator: Send + Sync {
    /// Stable id, e.g. `work-creation`. Used in logs, reports and conflict messages.
    fn id(&self) -> &'static str;

    fn feature(&self) -> Feature;

    fn phase(&self) -> Phase;

    /// Runs over the whole snapshot.
    ///
    /// # Errors
    /// Only fatal errors; everything attributable to one declaration goes to
    /// [`GenerationContext::diagnose`].
    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<(), SealantError>;
}

/// A problem attributed to one declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub generator: &'static str,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declaration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<PathBuf>,
    pub message: String,
}

/// Why an otherwise eligible integration was not (fully) generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// Another declaration already integrated the same scope.
    DuplicateScope { kept: ClassName },
    /// An ancestor scope already declares the shared multibindings.
    InheritedFromAncestor { ancestor: ClassName },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skip {
    pub generator: &'static str,
    pub scope: ClassName,
    pub declaration: ClassName,
    #[serde(flatten)]
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedUnit {
    pub generator: &'static str,
    pub key: UnitKey,
    pub provenance: Vec<PathBuf>,
}

/// Everything a run recorded besides the units themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Journal {
    pub emitted: Vec<EmittedUnit>,
    pub diagnostics: Vec<Diagnostic>,
    pub skips: Vec<Skip>,
}

/// Shared state of one run, handed to every generator in turn.
#[derive(TypedBuilder)]
pub struct GenerationContext<'a> {
    provider: &'a dyn SymbolProvider,
    graph: &'a ScopeGraph,
    sink: &'a dyn EmissionSink,
    names: &'a NameRegistry,
    header: &'a HeaderConfig,
    #[builder(default)]
    fail_fast: bool,
    #[builder(default, setter(skip))]
    journal: Mutex<Journal>,
    /// Resolved integration candidates, shared by every integration generator.
    #[builder(default, setter(skip))]
    candidates: Mutex<Option<Vec<Candidate<'a>>>>,
}

/// A declaration asking for a scope to be integrated, with its position among the scopes the
/// declaration lists.
type Candidate<'a> = (&'a Declaration, usize, ClassName);

impl<'a> GenerationContext<'a> {
    #[must_use]
    pub fn provider(&self) -> &'a dyn SymbolProvider {
        self.provider
    }

    #[must_use]
    pub const fn graph(&self) -> &'a ScopeGraph {
        self.graph
    }

    /// An empty file with the configured header.
    #[must_use]
    pub fn file(&self, package: impl Into<String>, name: impl Into<String>) -> FileSpec {
        FileSpec::new(package, name).header(self.header)
    }

    /// Claims the file's top-level names and hands it to the sink.
    ///
    /// # Errors
    /// [`SealantError::NameCollision`] or whatever the sink returns; all of them fatal.
    pub fn emit(
        &self,
        generator: &'static str,
        file: FileSpec,
        origin: &Declaration,
    ) -> Result<(), SealantError> {
        let origin_name = origin.name.to_string();
        for name in file.top_level_names()? {
            self.names.claim(&name, generator, &origin_name)?;
        }

        let provenance: Vec<PathBuf> = self
            .provider
            .containing_source_file(origin)
            .map(|p| vec![p.to_path_buf()])
            .unwrap_or_default();
        let unit = GeneratedUnit::builder()
            .generator(generator)
            .file(file)
            .provenance(provenance.clone())
            .build();
        let key = unit.key();

        self.sink.emit(unit)?;
        debug!(generator, unit = %key, origin = %origin_name, "Unit emitted");
        self.journal.lock().emitted.push(EmittedUnit { generator, key, provenance });
        Ok(())
    }

    /// Records a per-declaration error. Fatal errors are handed back instead.
    ///
    /// # Errors
    /// Returns `error` itself if it is fatal.
    pub fn diagnose(&self, generator: &'static str, error: SealantError) -> Result<(), SealantError> {
        if error.is_fatal() {
            return Err(error);
        }

        let declaration = error.declaration().map(str::to_owned);
        let source_file = declaration
            .as_deref()
            .and_then(|raw| raw.parse::<ClassName>().ok())
            .and_then(|name| self.provider.declaration(&name))
            .and_then(|decl| self.provider.containing_source_file(decl))
            .map(std::path::Path::to_path_buf);

        warn!(generator, kind = error.kind(), "{error}");
        self.journal.lock().diagnostics.push(Diagnostic {
            generator,
            kind: error.kind(),
            declaration,
            source_file,
            message: error.to_string(),
        });
        Ok(())
    }

    /// Notes a documented, intentional skip.
    pub fn skip(&self, generator: &'static str, scope: &ClassName, declaration: &ClassName, reason: SkipReason) {
        debug!(generator, scope = %scope, declaration = %declaration, ?reason, "Skipped");
        self.journal.lock().skips.push(Skip {
            generator,
            scope: scope.clone(),
            declaration: declaration.clone(),
            reason,
        });
    }

    /// `true` once a diagnostic was recorded in fail-fast mode.
    #[must_use]
    pub fn should_stop(&self) -> bool {
        self.fail_fast && !self.journal.lock().diagnostics.is_empty()
    }

    #[must_use]
    pub fn diagnostic_count(&self) -> usize {
        self.journal.lock().diagnostics.len()
    }

    /// Components and multi-scope markers with their resolved scopes, in candidate order.
    ///
    /// Resolved once per run: a declaration whose scopes cannot be read is reported a single
    /// time, attributed to `generator` (the first one asking), and left out for everyone.
    ///
    /// # Errors
    /// Fatal errors only.
    fn integration_candidates(&self, generator: &'static str) -> Result<Vec<Candidate<'a>>, SealantError> {
        if let Some(candidates) = self.candidates.lock().as_ref() {
            return Ok(candidates.clone());
        }

        let provider = self.provider;
        let mut candidates: Vec<Candidate<'a>> = Vec::new();
        let mut errors = Vec::new();
        let markers = known::component_markers();
        for declaration in provider.declarations() {
            let is_component = markers.iter().any(|m| provider.has_annotation(declaration, m));
            if is_component {
                match self.graph.scope_of(provider, declaration, &markers) {
                    Ok(scope) => candidates.push((declaration, 0, scope)),
                    Err(err) => errors.push(err),
                }
            }

            if let Some(annotation) = declaration.annotation(&known::SEALANT_INTEGRATION) {
                match listed_scopes(self, declaration, annotation) {
                    Ok(scopes) => {
                        let offset = usize::from(is_component);
                        candidates.extend(
                            scopes.into_iter().enumerate().map(|(i, s)| (declaration, offset + i, s)),
                        );
                    },
                    Err(err) => errors.push(err),
                }
            }
        }
        candidates.sort_by(|a, b| a.0.name.cmp(&b.0.name).then(a.1.cmp(&b.1)));

        // The candidates lock is released before any diagnostic takes the journal lock.
        let first = {
            let mut cached = self.candidates.lock();
            let first = cached.is_none();
            cached.get_or_insert_with(|| candidates.clone());
            first
        };
        if first {
            for err in errors {
                self.diagnose(generator, err)?;
            }
        }
        Ok(candidates)
    }

    #[must_use]
    pub fn into_journal(self) -> Journal {
        self.journal.into_inner()
    }
}

/// Runs `generators` in order against one context, stopping early in fail-fast mode.
///
/// # Errors
/// The first fatal error any generator returns.
pub fn run_generators(
    generators: &[Box<dyn Generator>],
    ctx: &GenerationContext<'_>,
) -> Result<(), SealantError> {
    for generator in generators {
        if ctx.should_stop() {
            debug!(generator = generator.id(), "Stopping after first diagnostic");
            break;
        }
        let _span = info_span!("generator", id = generator.id()).entered();
        generator.generate(ctx)?;
    }
    Ok(())
}

/// A contribution whose scope enables the feature.
#[derive(Debug, Clone)]
pub struct Contribution<'a> {
    pub declaration: &'a Declaration,
    pub scope: ClassName,
}

/// Declarations carrying `marker` whose resolved scope enables `feature` itself.
///
/// Scope resolution failures are recorded as diagnostics and the declaration is dropped.
///
/// # Errors
/// Only fatal errors.
pub fn contributions<'a>(
    ctx: &GenerationContext<'a>,
    generator: &'static str,
    marker: &'a ClassName,
    feature: Feature,
) -> Result<Vec<Contribution<'a>>, SealantError> {
    let mut found = Vec::new();

    for declaration in ctx.provider().declarations_annotated_with(marker) {
        if ctx.should_stop() {
            break;
        }
        let scope = match ctx.graph().scope_of(ctx.provider(), declaration, &[marker]) {
            Ok(scope) => scope,
            Err(err) => {
                ctx.diagnose(generator, err)?;
                continue;
            },
        };
        if !ctx.graph().feature_enabled(&scope, feature) {
            debug!(generator, declaration = %declaration.name, scope = %scope, "Feature disabled for scope");
            continue;
        }
        found.push(Contribution { declaration, scope });
    }

    Ok(found)
}

/// One scope to integrate, with the declaration that first requested it.
#[derive(Debug, Clone)]
pub struct IntegrationTarget<'a> {
    pub declaration: &'a Declaration,
    pub scope: ClassName,
    /// Nearest ancestor that already enables the feature, if any.
    pub inherited_from: Option<ClassName>,
}

/// Integration points for `feature`, one per scope.
///
/// Candidates are components (merge markers) and declarations listing scopes in the
/// multi-scope marker. They are ordered by declaration name, then by the position of the
/// scope within the declaration, and deduplicated by scope: the first one wins and the rest
/// are recorded as skips. Scope errors on a candidate are reported once per run, whichever
/// integration generator asks first.
///
/// # Errors
/// Fatal errors only, including [`SealantError::ScopeCycle`] from the ancestor lookup.
pub fn integration_targets<'a>(
    ctx: &GenerationContext<'a>,
    generator: &'static str,
    feature: Feature,
) -> Result<Vec<IntegrationTarget<'a>>, SealantError> {
    let candidates = ctx.integration_candidates(generator)?;

    let mut kept: FxHashMap<ClassName, ClassName> = FxHashMap::default();
    let mut targets = Vec::new();
    for (declaration, _, scope) in candidates {
        if !ctx.graph().feature_enabled(&scope, feature) {
            continue;
        }
        if let Some(first) = kept.get(&scope) {
            let reason = SkipReason::DuplicateScope { kept: first.clone() };
            ctx.skip(generator, &scope, &declaration.name, reason);
            continue;
        }
        kept.insert(scope.clone(), declaration.name.clone());

        let inherited_from = ctx.graph().nearest_ancestor_enabling(&scope, feature)?.cloned();
        targets.push(IntegrationTarget { declaration, scope, inherited_from });
    }

    Ok(targets)
}

/// Emits `<Scope>_<FeatureName>_Integration` in `package` for every integration target.
///
/// `shared` builds the declarations an ancestor already provides when it enables the feature;
/// they are left out (and a skip is recorded) for inheriting scopes. `local` builds what every
/// scope gets.
///
/// # Errors
/// Fatal errors only.
pub fn emit_integrations<S, L>(
    ctx: &GenerationContext<'_>,
    generator: &'static str,
    feature: Feature,
    package: &str,
    feature_name: &str,
    shared: S,
    local: L,
) -> Result<(), SealantError>
where
    S: Fn(&ClassName) -> Result<Vec<TypeSpec>, SealantError>,
    L: Fn(&ClassName) -> Result<Vec<TypeSpec>, SealantError>,
{
    for target in integration_targets(ctx, generator, feature)? {
        if ctx.should_stop() {
            break;
        }
        let scope = &target.scope;
        let mut file = ctx.file(package, naming::integration_file_name(scope, feature_name));

        match &target.inherited_from {
            Some(ancestor) => {
                let reason = SkipReason::InheritedFromAncestor { ancestor: ancestor.clone() };
                ctx.skip(generator, scope, &target.declaration.name, reason);
            },
            None => {
                for ty in shared(scope)? {
                    file = file.add_type(ty);
                }
            },
        }
        for ty in local(scope)? {
            file = file.add_type(ty);
        }

        ctx.emit(generator, file, target.declaration)?;
    }
    Ok(())
}

fn listed_scopes(
    ctx: &GenerationContext<'_>,
    declaration: &Declaration,
    annotation: &Annotation,
) -> Result<Vec<ClassName>, SealantError> {
    let value = ctx
        .provider()
        .annotation_argument(declaration, annotation, SCOPES_ARGUMENT, Some(0))?
        .ok_or_else(|| {
            SealantError::missing_scope(
                &declaration.name,
                format!("@{} lists no scopes", annotation.class.simple_name()),
            )
        })?;
    let classes = value.as_classes().ok_or_else(|| {
        SealantError::configuration(
            &declaration.name,
            format!("{SCOPES_ARGUMENT} of @{} must be class references", annotation.class.simple_name()),
        )
    })?;

    let mut scopes: Vec<ClassName> = Vec::with_capacity(classes.len());
    for class in classes {
        if !scopes.contains(class) {
            scopes.push(class.clone());
        }
    }
    Ok(scopes)
}
