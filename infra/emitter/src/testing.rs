//! Snapshot builders and a one-call generator harness for feature-crate tests.
//!
//! Enabled by the `testing` feature; not part of the public surface of the emitter.
#![allow(clippy::missing_panics_doc, clippy::must_use_candidate)]

use crate::MemorySink;
use sealant_kernel::domain::config::HeaderConfig;
use sealant_kernel::prelude::*;

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
    Declaration::new(class(name))
        .with_kind(DeclarationKind::Interface)
        .with_annotation(
            Annotation::new(known::MERGE_COMPONENT.clone())
                .with(AnnotationArgument::named("scope", class(scope))),
        )
}

pub fn contributed(name: &str, marker: &ClassName, scope: &str) -> Declaration {
    let simple = class(name).simple_name().to_owned();
    Declaration::new(class(name))
        .with_annotation(
            Annotation::new(marker.clone()).with(AnnotationArgument::named("scope", class(scope))),
        )
        .with_source_file(format!("src/main/{simple}.kt"))
}

#[derive(Debug)]
pub struct Outcome {
    pub sink: MemorySink,
    pub journal: Journal,
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
}

/// Runs `generators` over `declarations` with a fresh graph, registry and [`MemorySink`].
pub fn run(declarations: Vec<Declaration>, generators: &[Box<dyn Generator>]) -> Outcome {
    let table: SymbolTable = declarations.into_iter().collect();
    let (graph, errors) = ScopeGraph::build(&table);
    assert!(errors.is_empty(), "{errors:?}");

    let sink = MemorySink::new();
    let names = NameRegistry::new();
    let header = HeaderConfig::default();
    let journal = {
        let ctx = GenerationContext::builder()
            .provider(&table)
            .graph(&graph)
            .sink(&sink)
            .names(&names)
            .header(&header)
            .build();
        run_generators(generators, &ctx).unwrap();
        ctx.into_journal()
    };

    Outcome { sink, journal }
}
