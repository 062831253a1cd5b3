mod fixtures;

use fixtures::{class, scope};
use proptest::prelude::*;
use sealant_kernel::prelude::*;

/// `parents[i]` is the index of scope `i`'s parent, if any. Any shape is allowed, cycles included.
fn build(parents: &[Option<usize>], work: &[bool]) -> ScopeGraph {
    let table: SymbolTable = parents
        .iter()
        .enumerate()
        .map(|(i, parent)| {
            let parent = parent.map(|p| format!("s.Scope{p}"));
            scope(&format!("s.Scope{i}"), [false, false, false, work[i]], parent.as_deref())
        })
        .collect();
    let (graph, errors) = ScopeGraph::build(&table);
    assert!(errors.is_empty());
    graph
}

proptest! {
    #[test]
    fn ancestor_walk_always_terminates(
        shape in (1usize..12).prop_flat_map(|n| (
            prop::collection::vec(prop::option::of(0..n), n),
            prop::collection::vec(any::<bool>(), n),
        ))
    ) {
        let (parents, work) = shape;
        let graph = build(&parents, &work);

        for i in 0..parents.len() {
            let name = class(&format!("s.Scope{i}"));
            match graph.nearest_ancestor_enabling(&name, Feature::Work) {
                Ok(Some(found)) => {
                    prop_assert!(graph.feature_enabled(found, Feature::Work));
                    prop_assert_ne!(found, &name);
                },
                Ok(None) => {},
                Err(err) => {
                    let is_cycle = matches!(err, SealantError::ScopeCycle { .. });
                    prop_assert!(is_cycle, "unexpected error: {}", err);
                    // The path never repeats more than one scope, so it is bounded by the graph.
                    let hops = err.to_string().matches(" -> ").count();
                    prop_assert!(hops <= parents.len());
                },
            }
        }
    }

    #[test]
    fn validate_agrees_with_walks(
        shape in (1usize..10).prop_flat_map(|n| prop::collection::vec(prop::option::of(0..n), n))
    ) {
        let graph = build(&shape, &vec![false; shape.len()]);
        let any_cycle = (0..shape.len())
            .any(|i| graph.ancestors(&class(&format!("s.Scope{i}"))).is_err());
        prop_assert_eq!(graph.validate().is_err(), any_cycle);
    }
}

#[test]
fn two_scope_cycle_fails_fast() {
    let graph = build(&[Some(1), Some(0)], &[false, false]);
    let err = graph
        .nearest_ancestor_enabling(&class("s.Scope0"), Feature::Work)
        .expect_err("cycle must be reported");
    assert_eq!(err.to_string(), "Scope cycle: s.Scope0 -> s.Scope1 -> s.Scope0");
}

#[test]
fn scopes_are_listed_in_name_order() {
    let graph = build(&[None, Some(0), Some(0)], &[true, false, true]);
    let names: Vec<String> = graph.scopes().map(|s| s.scope.to_string()).collect();
    assert_eq!(names, ["s.Scope0", "s.Scope1", "s.Scope2"]);
    assert_eq!(graph.children_of(&class("s.Scope0")).count(), 2);
    assert_eq!(graph.roots().count(), 1);
}
