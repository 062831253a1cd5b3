//! Scope graph resolution.
//!
//! A scope is any type named by a scope-bearing annotation. Scopes that carry the configuration
//! annotation declare which features they enable and, optionally, a parent scope. The parent
//! links form a forest; [`ScopeGraph::validate`] rejects anything else before generators run.

use crate::error::SealantError;
use crate::known;
use crate::symbols::SymbolProvider;
use fxhash::FxHashSet;
use sealant_domain::features::{Feature, FeatureSet};
use sealant_domain::names::ClassName;
use sealant_domain::symbols::{Annotation, AnnotationValue, Declaration};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Argument name that makes an annotation scope-bearing.
pub const SCOPE_ARGUMENT: &str = "scope";
/// Name and position of the parent link in the configuration payload.
pub const PARENT_SCOPE_ARGUMENT: &str = "parentScope";
pub const PARENT_SCOPE_INDEX: usize = 4;

/// The configuration read from one scope declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeConfiguration {
    pub scope: ClassName,
    pub parent: Option<ClassName>,
    pub features: FeatureSet,
}

impl ScopeConfiguration {
    /// Reads the configuration annotation of `declaration`.
    ///
    /// Every feature flag is required. Flags are looked up by name, positionally at the
    /// feature's index otherwise.
    ///
    /// # Errors
    /// Returns [`SealantError::InvalidConfiguration`] if a flag is missing or not a boolean,
    /// if an argument is given twice, or if the parent is not a class reference.
    pub fn read(
        provider: &dyn SymbolProvider,
        declaration: &Declaration,
        annotation: &Annotation,
    ) -> Result<Self, SealantError> {
        let mut features = FeatureSet::empty();

        for feature in Feature::all() {
            let key = feature.config_key();
            let value = provider
                .annotation_argument(declaration, annotation, key, Some(feature.index()))?
                .ok_or_else(|| {
                    SealantError::configuration(
                        &declaration.name,
                        format!("Couldn't find {key} for {}.", annotation.class),
                    )
                })?;
            let enabled = value.as_bool().ok_or_else(|| {
                SealantError::configuration(
                    &declaration.name,
                    format!("{key} of {} must be a boolean, got {value:?}", annotation.class),
                )
            })?;
            if enabled {
                features |= feature.flag();
            }
        }

        let parent = match provider.annotation_argument(
            declaration,
            annotation,
            PARENT_SCOPE_ARGUMENT,
            Some(PARENT_SCOPE_INDEX),
        )? {
            None => None,
            Some(AnnotationValue::Class { class }) if *class == *known::KOTLIN_ANY => None,
            Some(AnnotationValue::Class { class }) => Some(class.clone()),
            Some(other) => {
                return Err(SealantError::configuration(
                    &declaration.name,
                    format!("{PARENT_SCOPE_ARGUMENT} must be a class reference, got {other:?}"),
                ));
            },
        };

        Ok(Self { scope: declaration.name.clone(), parent, features })
    }

    #[must_use]
    pub const fn enables(&self, feature: Feature) -> bool {
        self.features.has(feature)
    }
}

/// Every configured scope of one compilation, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct ScopeGraph {
    scopes: BTreeMap<ClassName, ScopeConfiguration>,
}

impl ScopeGraph {
    /// Reads every declaration that carries the configuration annotation.
    ///
    /// Declarations whose configuration cannot be read are left out of the graph (they behave
    /// like unconfigured scopes) and their errors are returned alongside it.
    #[must_use]
    pub fn build(provider: &dyn SymbolProvider) -> (Self, Vec<SealantError>) {
        let mut scopes = BTreeMap::new();
        let mut errors = Vec::new();

        for declaration in provider.declarations_annotated_with(&known::SEALANT_CONFIGURATION) {
            let Some(annotation) = declaration.annotation(&known::SEALANT_CONFIGURATION) else {
                continue;
            };
            match ScopeConfiguration::read(provider, declaration, annotation) {
                Ok(config) => {
                    debug!(scope = %config.scope, parent = ?config.parent, "Scope configured");
                    scopes.insert(config.scope.clone(), config);
                },
                Err(err) => {
                    warn!(scope = %declaration.name, "{err}");
                    errors.push(err);
                },
            }
        }

        (Self { scopes }, errors)
    }

    #[must_use]
    pub fn configuration(&self, scope: &ClassName) -> Option<&ScopeConfiguration> {
        self.scopes.get(scope)
    }

    /// Configured scopes in name order.
    pub fn scopes(&self) -> impl Iterator<Item = &ScopeConfiguration> {
        self.scopes.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    #[must_use]
    pub fn parent_of(&self, scope: &ClassName) -> Option<&ClassName> {
        self.scopes.get(scope).and_then(|c| c.parent.as_ref())
    }

    /// Scopes whose parent is `scope`, in name order.
    pub fn children_of<'a>(
        &'a self,
        scope: &'a ClassName,
    ) -> impl Iterator<Item = &'a ScopeConfiguration> + 'a {
        self.scopes.values().filter(move |c| c.parent.as_ref() == Some(scope))
    }

    /// Configured scopes without a configured parent.
    pub fn roots(&self) -> impl Iterator<Item = &ScopeConfiguration> {
        self.scopes
            .values()
            .filter(|c| c.parent.as_ref().is_none_or(|p| !self.scopes.contains_key(p)))
    }

    /// The scope's own flag; ancestors are not consulted. Unconfigured scopes enable nothing.
    #[must_use]
    pub fn feature_enabled(&self, scope: &ClassName, feature: Feature) -> bool {
        self.scopes.get(scope).is_some_and(|c| c.enables(feature))
    }

    /// First ancestor, starting at the parent, whose own configuration enables `feature`.
    ///
    /// The walk visits each scope at most once, so it ends within `len() + 1` steps.
    ///
    /// # Errors
    /// Returns [`SealantError::ScopeCycle`] naming the visited path when a scope is reached
    /// twice.
    pub fn nearest_ancestor_enabling(
        &self,
        scope: &ClassName,
        feature: Feature,
    ) -> Result<Option<&ClassName>, SealantError> {
        let mut visited: FxHashSet<&ClassName> = FxHashSet::default();
        let mut path = vec![scope];
        visited.insert(scope);

        let mut current = self.parent_of(scope);
        while let Some(candidate) = current {
            path.push(candidate);
            if !visited.insert(candidate) {
                return Err(cycle_error(&path));
            }
            if self.feature_enabled(candidate, feature) {
                return Ok(Some(candidate));
            }
            current = self.parent_of(candidate);
        }

        Ok(None)
    }

    /// # Errors
    /// See [`ScopeGraph::nearest_ancestor_enabling`].
    pub fn feature_enabled_in_parents(
        &self,
        scope: &ClassName,
        feature: Feature,
    ) -> Result<bool, SealantError> {
        self.nearest_ancestor_enabling(scope, feature).map(|found| found.is_some())
    }

    /// Parent chain of `scope`, nearest first.
    ///
    /// # Errors
    /// Returns [`SealantError::ScopeCycle`] if the chain loops.
    pub fn ancestors(&self, scope: &ClassName) -> Result<Vec<&ClassName>, SealantError> {
        let mut visited: FxHashSet<&ClassName> = FxHashSet::default();
        let mut path = vec![scope];
        let mut ancestors = Vec::new();
        visited.insert(scope);

        let mut current = self.parent_of(scope);
        while let Some(parent) = current {
            path.push(parent);
            if !visited.insert(parent) {
                return Err(cycle_error(&path));
            }
            ancestors.push(parent);
            current = self.parent_of(parent);
        }

        Ok(ancestors)
    }

    /// Checks that the parent links form a forest.
    ///
    /// # Errors
    /// Returns [`SealantError::ScopeCycle`] for the first cycle found, in scope name order.
    pub fn validate(&self) -> Result<(), SealantError> {
        let mut cleared: FxHashSet<&ClassName> = FxHashSet::default();

        for scope in self.scopes.keys() {
            if cleared.contains(scope) {
                continue;
            }
            let chain = self.ancestors(scope)?;
            cleared.insert(scope);
            cleared.extend(chain);
        }

        Ok(())
    }

    /// Resolves the scope a declaration is governed by.
    ///
    /// An annotation is scope-bearing if it passes a `scope` argument by name, or if it is one
    /// of `markers` or a known annotation type whose first constructor parameter is `scope`
    /// and the value is passed positionally. All scope-bearing annotations must agree.
    ///
    /// # Errors
    /// * [`SealantError::MissingScope`] if none of `markers` is present or no scope value is
    ///   found.
    /// * [`SealantError::InconsistentScope`] if two annotations name different scopes.
    pub fn scope_of(
        &self,
        provider: &dyn SymbolProvider,
        declaration: &Declaration,
        markers: &[&ClassName],
    ) -> Result<ClassName, SealantError> {
        if !markers.iter().any(|m| provider.has_annotation(declaration, m)) {
            let names: Vec<String> = markers.iter().map(|m| m.simple_name().to_owned()).collect();
            return Err(SealantError::missing_scope(
                &declaration.name,
                format!("none of @{} is present", names.join(", @")),
            ));
        }

        let mut found: Option<(&ClassName, &ClassName)> = None;
        for annotation in &declaration.annotations {
            let Some(value) = scope_value(provider, declaration, annotation, markers)? else {
                continue;
            };
            let scope = value.as_class().ok_or_else(|| {
                SealantError::missing_scope(
                    &declaration.name,
                    format!("scope of @{} is not a class reference", annotation.class.simple_name()),
                )
            })?;
            match found {
                None => found = Some((scope, &annotation.class)),
                Some((first, _)) if first == scope => {},
                Some((first, first_annotation)) => {
                    return Err(SealantError::inconsistent_scope(
                        &declaration.name,
                        format!(
                            "@{} names {first} but @{} names {scope}",
                            first_annotation.simple_name(),
                            annotation.class.simple_name()
                        ),
                    ));
                },
            }
        }

        found.map(|(scope, _)| scope.clone()).ok_or_else(|| {
            SealantError::missing_scope(&declaration.name, "no scope argument on the marker annotation")
        })
    }
}

fn scope_value<'a>(
    provider: &dyn SymbolProvider,
    declaration: &Declaration,
    annotation: &'a Annotation,
    markers: &[&ClassName],
) -> Result<Option<&'a AnnotationValue>, SealantError> {
    let positional = markers.iter().any(|m| **m == annotation.class)
        || first_parameter_is_scope(provider, annotation);
    let index = positional.then_some(0);
    provider.annotation_argument(declaration, annotation, SCOPE_ARGUMENT, index)
}

fn first_parameter_is_scope(provider: &dyn SymbolProvider, annotation: &Annotation) -> bool {
    provider
        .declaration(&annotation.class)
        .and_then(|decl| decl.constructors.first())
        .and_then(|ctor| ctor.parameters.first())
        .is_some_and(|param| param.name == SCOPE_ARGUMENT)
}

fn cycle_error(path: &[&ClassName]) -> SealantError {
    let rendered: Vec<String> = path.iter().map(ToString::to_string).collect();
    SealantError::ScopeCycle { path: rendered.join(" -> ").into(), context: None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::SymbolTable;
    use sealant_domain::symbols::AnnotationArgument;

    fn class(raw: &str) -> ClassName {
        raw.parse().unwrap()
    }

    fn scope(name: &str, flags: [bool; 4], parent: Option<&str>) -> Declaration {
        let mut ann = Annotation::new(known::SEALANT_CONFIGURATION.clone());
        for flag in flags {
            ann = ann.with(AnnotationArgument::positional(flag));
        }
        if let Some(parent) = parent {
            ann = ann.with(AnnotationArgument::named(PARENT_SCOPE_ARGUMENT, class(parent)));
        }
        let mut decl = Declaration::new(class(name));
        decl.annotations.push(ann);
        decl
    }

    fn graph(decls: Vec<Declaration>) -> ScopeGraph {
        let table: SymbolTable = decls.into_iter().collect();
        let (graph, errors) = ScopeGraph::build(&table);
        assert!(errors.is_empty(), "{errors:?}");
        graph
    }

    #[test]
    fn own_flag_wins_without_inheritance() {
        let g = graph(vec![
            scope("a.AppScope", [true, true, true, true], None),
            scope("a.GuestScope", [false, true, true, false], Some("a.AppScope")),
        ]);
        assert!(!g.feature_enabled(&class("a.GuestScope"), Feature::Work));
        assert!(g.feature_enabled(&class("a.GuestScope"), Feature::Fragment));
        assert!(!g.feature_enabled(&class("a.Unknown"), Feature::Fragment));
    }

    #[test]
    fn nearest_ancestor_skips_the_scope_itself() {
        let g = graph(vec![
            scope("a.Skeleton", [false, false, false, true], None),
            scope("a.AppScope", [true, false, false, false], Some("a.Skeleton")),
            scope("a.Guest", [false, false, false, true], Some("a.AppScope")),
        ]);
        let guest = class("a.Guest");
        assert_eq!(
            g.nearest_ancestor_enabling(&guest, Feature::Work).unwrap(),
            Some(&class("a.Skeleton"))
        );
        assert_eq!(g.nearest_ancestor_enabling(&class("a.Skeleton"), Feature::Work).unwrap(), None);
        assert!(!g.feature_enabled_in_parents(&guest, Feature::Fragment).unwrap());
    }

    #[test]
    fn kotlin_any_parent_means_root() {
        let g = graph(vec![scope("a.Root", [true, true, true, true], Some("kotlin.Any"))]);
        assert_eq!(g.parent_of(&class("a.Root")), None);
        assert_eq!(g.roots().count(), 1);
    }

    #[test]
    fn unconfigured_parent_stops_the_walk() {
        let g = graph(vec![scope("a.Child", [true, true, true, true], Some("a.Plain"))]);
        assert_eq!(g.nearest_ancestor_enabling(&class("a.Child"), Feature::Work).unwrap(), None);
        assert_eq!(g.ancestors(&class("a.Child")).unwrap(), [&class("a.Plain")]);
    }

    #[test]
    fn cycle_is_reported_with_its_path() {
        let g = graph(vec![
            scope("a.A", [false; 4], Some("a.B")),
            scope("a.B", [false; 4], Some("a.A")),
        ]);
        let err = g.nearest_ancestor_enabling(&class("a.A"), Feature::Work).unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "Scope cycle: a.A -> a.B -> a.A");
        assert!(matches!(g.validate(), Err(SealantError::ScopeCycle { .. })));
    }

    #[test]
    fn self_parent_is_a_cycle() {
        let g = graph(vec![scope("a.Loop", [true; 4], Some("a.Loop"))]);
        assert!(g.validate().is_err());
    }

    #[test]
    fn missing_flag_is_a_configuration_error() {
        let mut decl = Declaration::new(class("a.Broken"));
        decl.annotations.push(
            Annotation::new(known::SEALANT_CONFIGURATION.clone())
                .with(AnnotationArgument::named("addAppcomponentSupport", true)),
        );
        let table: SymbolTable = [decl].into_iter().collect();
        let (g, errors) = ScopeGraph::build(&table);

        assert!(g.is_empty());
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "Invalid scope configuration on a.Broken: Couldn't find addViewModelSupport for \
             dev.steinerok.sealant.core.SealantConfiguration."
        );
    }

    #[test]
    fn scope_of_requires_a_marker() {
        let marker = class("a.ContributesWorker");
        let decl = Declaration::new(class("a.Worker"));
        let table = SymbolTable::new();
        let err = ScopeGraph::default().scope_of(&table, &decl, &[&marker]).unwrap_err();
        assert!(matches!(err, SealantError::MissingScope { .. }));
    }

    #[test]
    fn scope_of_reads_positional_marker_argument() {
        let marker = class("a.ContributesWorker");
        let mut decl = Declaration::new(class("a.Worker"));
        decl.annotations.push(
            Annotation::new(marker.clone()).with(AnnotationArgument::positional(class("a.AppScope"))),
        );
        let table = SymbolTable::new();
        let found = ScopeGraph::default().scope_of(&table, &decl, &[&marker]).unwrap();
        assert_eq!(found, class("a.AppScope"));
    }

    #[test]
    fn scope_of_rejects_disagreeing_annotations() {
        let marker = class("a.ContributesWorker");
        let mut decl = Declaration::new(class("a.Worker"));
        decl.annotations.push(
            Annotation::new(marker.clone()).with(AnnotationArgument::named("scope", class("a.AppScope"))),
        );
        decl.annotations.push(
            Annotation::new(class("a.Other")).with(AnnotationArgument::named("scope", class("a.GuestScope"))),
        );
        let table = SymbolTable::new();
        let err = ScopeGraph::default().scope_of(&table, &decl, &[&marker]).unwrap_err();
        assert!(matches!(err, SealantError::InconsistentScope { .. }));
        assert!(err.to_string().contains("a.AppScope"));
        assert!(err.to_string().contains("a.GuestScope"));
    }
}
