use crate::report::Report;
use sealant_domain::config::GeneratorConfig;
use sealant_emitter::FileSink;
use sealant_kernel::prelude::*;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, info_span};

/// Generator id used for diagnostics raised while reading scope configurations.
const SCOPE_GRAPH: &str = "scope-graph";

/// Every generator compiled in, in registration order.
fn registry() -> Vec<Box<dyn Generator>> {
    #[allow(unused_mut)]
    let mut generators: Vec<Box<dyn Generator>> = Vec::new();

    #[cfg(feature = "appcomponent")]
    generators.extend(sealant_appcomponent::generators());
    #[cfg(feature = "fragment")]
    generators.extend(sealant_fragment::generators());
    #[cfg(feature = "viewmodel")]
    generators.extend(sealant_viewmodel::generators());
    #[cfg(feature = "work")]
    generators.extend(sealant_work::generators());

    generators
}

/// One configured generation run.
///
/// Generators run by phase (child scopes, creation, integration) and by registration order
/// within a phase: app-component, fragment, view-model, work.
pub struct Pipeline {
    config: GeneratorConfig,
    generators: Vec<Box<dyn Generator>>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("generators", &self.generator_ids())
            .finish()
    }
}

#[derive(Default)]
pub struct PipelineBuilder {
    config: GeneratorConfig,
    extra: Vec<Box<dyn Generator>>,
}

impl std::fmt::Debug for PipelineBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let extra: Vec<&str> = self.extra.iter().map(|g| g.id()).collect();
        f.debug_struct("PipelineBuilder").field("config", &self.config).field("extra", &extra).finish()
    }
}

impl PipelineBuilder {
    #[must_use]
    pub fn config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Registers a generator after the built-in ones of its phase.
    #[must_use]
    pub fn generator(mut self, generator: Box<dyn Generator>) -> Self {
        self.extra.push(generator);
        self
    }

    #[must_use]
    pub fn build(self) -> Pipeline {
        let features = self.config.features;
        let mut generators: Vec<Box<dyn Generator>> = registry()
            .into_iter()
            .chain(self.extra)
            .filter(|g| {
                let enabled = features.has(g.feature());
                if !enabled {
                    debug!(generator = g.id(), feature = %g.feature(), "Generator disabled by config");
                }
                enabled
            })
            .collect();
        generators.sort_by_key(|g| g.phase());

        Pipeline { config: self.config, generators }
    }
}

impl Pipeline {
    #[must_use]
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Ids of the registered generators, in run order.
    #[must_use]
    pub fn generator_ids(&self) -> Vec<&'static str> {
        self.generators.iter().map(|g| g.id()).collect()
    }

    /// Runs every generator over `provider`, emitting into `sink`.
    ///
    /// Configuration and shape problems end up in the [`Report`]; the run itself only fails
    /// on scope cycles, name collisions, emission conflicts and sink errors.
    ///
    /// # Errors
    /// The first fatal [`SealantError`].
    pub fn run(
        &self,
        provider: &dyn SymbolProvider,
        sink: &dyn EmissionSink,
    ) -> Result<Report, SealantError> {
        let _span = info_span!("pipeline", declarations = provider.declarations().count()).entered();
        let started = Instant::now();

        let (graph, errors) = ScopeGraph::build(provider);
        graph.validate()?;
        debug!(scopes = graph.len(), "Scope graph ready");

        let names = NameRegistry::new();
        let ctx = GenerationContext::builder()
            .provider(provider)
            .graph(&graph)
            .sink(sink)
            .names(&names)
            .header(&self.config.header)
            .fail_fast(self.config.fail_fast)
            .build();

        for error in errors {
            ctx.diagnose(SCOPE_GRAPH, error)?;
        }
        if !ctx.should_stop() {
            run_generators(&self.generators, &ctx)?;
        }
        sink.finish()?;

        let report = Report::new(ctx.into_journal(), started.elapsed());
        info!(
            units = report.emitted.len(),
            diagnostics = report.diagnostics.len(),
            skips = report.skips.len(),
            elapsed_ms = report.elapsed_ms,
            "Generation finished"
        );
        Ok(report)
    }
}

/// Loads the snapshot at `symbols` and writes the generated sources as configured.
///
/// # Errors
/// Snapshot loading errors and whatever [`Pipeline::run`] returns.
pub fn generate(config: GeneratorConfig, symbols: impl AsRef<Path>) -> Result<Report, SealantError> {
    let table = SymbolTable::from_path(symbols)?;
    let sink = FileSink::from_config(&config.output);
    Pipeline::builder().config(config).build().run(&table, &sink)
}
