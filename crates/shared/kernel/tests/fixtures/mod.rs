#![allow(dead_code)]

use parking_lot::Mutex;
use sealant_kernel::prelude::*;
use sealant_kernel::sink::conflict;

pub fn class(raw: &str) -> ClassName {
    raw.parse().unwrap()
}

/// A scope declaration with flags in payload order: appcomponent, view-model, fragment, work.
pub fn scope(name: &str, flags: [bool; 4], parent: Option<&str>) -> Declaration {
    let mut annotation = Annotation::new(known::SEALANT_CONFIGURATION.clone());
    for (feature, flag) in Feature::all().zip(flags) {
        annotation = annotation.with(AnnotationArgument::named(feature.config_key(), flag));
    }
    if let Some(parent) = parent {
        annotation = annotation.with(AnnotationArgument::named("parentScope", class(parent)));
    }
    let mut decl = Declaration::new(class(name));
    decl.annotations.push(annotation);
    decl
}

pub fn component(name: &str, scope: &str) -> Declaration {
    let mut decl = Declaration::new(class(name));
    decl.kind = DeclarationKind::Interface;
    decl.annotations.push(
        Annotation::new(known::MERGE_COMPONENT.clone())
            .with(AnnotationArgument::named("scope", class(scope))),
    );
    decl.source_file = Some(format!("src/{}.kt", decl.name.simple_name()).into());
    decl
}

pub fn integration_point(name: &str, scopes: &[&str]) -> Declaration {
    let list = AnnotationValue::Array(scopes.iter().map(|s| AnnotationValue::from(class(s))).collect());
    let mut decl = Declaration::new(class(name));
    decl.annotations.push(
        Annotation::new(known::SEALANT_INTEGRATION.clone())
            .with(AnnotationArgument::named("scopes", list)),
    );
    decl
}

/// Keeps emitted units in order and rejects repeated keys.
#[derive(Default)]
pub struct RecordingSink {
    pub units: Mutex<Vec<GeneratedUnit>>,
}

impl EmissionSink for RecordingSink {
    fn emit(&self, unit: GeneratedUnit) -> Result<(), SealantError> {
        let mut units = self.units.lock();
        let key = unit.key();
        if let Some(previous) = units.iter().find(|u| u.key() == key) {
            return Err(conflict(&key, previous.generator, unit.generator));
        }
        units.push(unit);
        Ok(())
    }
}
