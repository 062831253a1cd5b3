#![allow(dead_code)]

use sealant::Pipeline;
use sealant::Report;
use sealant::domain::config::GeneratorConfig;
use sealant::emitter::MemorySink;
use sealant::kernel::prelude::*;

pub const ALL: [bool; 4] = [true, true, true, true];
pub const NONE: [bool; 4] = [false, false, false, false];

pub const INJECT_WITH: &str = "dev.steinerok.sealant.appcomponent.InjectWith";
pub const CONTRIBUTES_FRAGMENT: &str = "dev.steinerok.sealant.fragment.ContributesFragment";
pub const CONTRIBUTES_VIEW_MODEL: &str = "dev.steinerok.sealant.viewmodel.ContributesViewModel";
pub const CONTRIBUTES_WORKER: &str = "dev.steinerok.sealant.work.ContributesWorker";

pub fn class(raw: &str) -> ClassName {
    raw.parse().unwrap()
}

/// Flags in payload order: appcomponent, view-model, fragment, work.
pub fn scope(name: &str, flags: [bool; 4], parent: Option<&str>) -> Declaration {
    let mut annotation = Annotation::new(known::SEALANT_CONFIGURATION.clone());
    for (feature, flag) in Feature::all().zip(flags) {
        annotation = annotation.with(AnnotationArgument::named(feature.config_key(), flag));
    }
    if let Some(parent) = parent {
        annotation = annotation.with(AnnotationArgument::named("parentScope", class(parent)));
    }
    Declaration::new(class(name)).with_annotation(annotation)
}

pub fn component(name: &str, scope: &str) -> Declaration {
    let simple = class(name).simple_name().to_owned();
    Declaration::new(class(name))
        .with_kind(DeclarationKind::Interface)
        .with_annotation(
            Annotation::new(known::MERGE_COMPONENT.clone())
                .with(AnnotationArgument::named("scope", class(scope))),
        )
        .with_source_file(format!("src/main/{simple}.kt"))
}

pub fn contributed(name: &str, marker: &str, scope: &str) -> Declaration {
    let simple = class(name).simple_name().to_owned();
    Declaration::new(class(name))
        .with_annotation(
            Annotation::new(class(marker)).with(AnnotationArgument::named("scope", class(scope))),
        )
        .with_source_file(format!("src/main/{simple}.kt"))
}

fn assisted(name: &str, ty: &ClassName) -> Parameter {
    Parameter::new(name, ty.clone()).with_annotation(Annotation::new(known::ASSISTED.clone()))
}

/// A worker with an `@AssistedInject` constructor taking the given assisted parameters.
pub fn worker(name: &str, scope: &str, assisted_names: &[&str]) -> Declaration {
    let mut constructor =
        Constructor::default().with_annotation(Annotation::new(known::ASSISTED_INJECT.clone()));
    for assisted_name in assisted_names {
        let ty = if assisted_name.ends_with("Params") {
            &*known::WORKER_PARAMETERS
        } else {
            &*known::ANDROID_CONTEXT
        };
        constructor = constructor.with_parameter(assisted(assisted_name, ty));
    }
    contributed(name, CONTRIBUTES_WORKER, scope)
        .with_supertype(known::ANDROIDX_LISTENABLE_WORKER.clone())
        .with_constructor(constructor)
}

#[derive(Debug)]
pub struct Outcome {
    pub sink: MemorySink,
    pub report: Report,
}

impl Outcome {
    pub fn text(&self, package: &str, file: &str) -> String {
        self.sink
            .render(package, file)
            .unwrap()
            .unwrap_or_else(|| panic!("{package}/{file} was not emitted; have {:?}", self.sink.keys()))
    }

    pub fn has(&self, package: &str, file: &str) -> bool {
        self.sink.get(package, file).is_some()
    }

    /// Emitted files in `package` whose name starts with `prefix`.
    pub fn files_in(&self, package: &str, prefix: &str) -> Vec<String> {
        self.sink
            .keys()
            .into_iter()
            .filter(|k| k.package == package && k.file.starts_with(prefix))
            .map(|k| k.file)
            .collect()
    }
}

pub fn try_run(
    declarations: Vec<Declaration>,
    config: GeneratorConfig,
) -> Result<Outcome, SealantError> {
    let table: SymbolTable = declarations.into_iter().collect();
    let sink = MemorySink::new();
    let report = Pipeline::builder().config(config).build().run(&table, &sink)?;
    Ok(Outcome { sink, report })
}

pub fn run(declarations: Vec<Declaration>) -> Outcome {
    try_run(declarations, GeneratorConfig::default()).unwrap()
}
