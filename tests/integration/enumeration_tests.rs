//! End-to-end exercises of the enumeration pipeline: maximal graph →
//! filters → conditional enumeration → graph-set composition.

use causalgraph::explore::combinator::split_and_filter;
use causalgraph::explore::conditions::{
    explicit_parents, is_dag, no_direct_edges, no_input_nodes, no_output_nodes, no_self_loops,
    path_complete,
};
use causalgraph::explore::enumerate::{conditional_subgraphs, partial_conditional_subgraphs};
use causalgraph::explore::filters::{
    apply_filters, barren_nodes, orphan_nodes, remove_self_loops,
};
use causalgraph::graph::{complete_digraph, DirectedGraph};
use causalgraph::EngineError;

#[test]
fn complete_digraph_is_the_n_squared_universe() {
    let g = complete_digraph(&["rain", "sprinkler", "grass_wet"]).unwrap();
    assert_eq!(g.node_count(), 3);
    assert_eq!(g.edge_count(), 9);
    for a in ["rain", "sprinkler", "grass_wet"] {
        for b in ["rain", "sprinkler", "grass_wet"] {
            assert!(g.contains_edge(a, b));
        }
    }
}

#[test]
fn filter_then_enumerate_shrinks_the_search_space() {
    let universe = complete_digraph(&["rain", "sprinkler", "grass_wet"]).unwrap();
    // Pre-filtering drops the 3 self-loops: 2^6 subsets instead of 2^9.
    let narrowed = apply_filters(&universe, &[remove_self_loops()]);
    assert_eq!(narrowed.edge_count(), 6);

    let permissive: Vec<_> = conditional_subgraphs(
        &narrowed,
        vec![Box::new(|_: &DirectedGraph| Ok(true))],
    )
    .unwrap()
    .collect();
    assert_eq!(permissive.len(), 64);
}

#[test]
fn enumerated_dags_satisfy_every_declared_constraint() {
    let universe = complete_digraph(&["rain", "sprinkler", "grass_wet"]).unwrap();
    let narrowed = apply_filters(&universe, &[remove_self_loops(), orphan_nodes(&["rain"])]);

    let candidates = conditional_subgraphs(
        &narrowed,
        vec![
            is_dag(),
            no_self_loops(),
            path_complete(&[("rain", "grass_wet")]),
            no_output_nodes(&["grass_wet"]),
            no_direct_edges(&[("grass_wet", "rain")]),
        ],
    )
    .unwrap();

    let mut seen = 0;
    for result in candidates {
        let g = result.unwrap();
        assert!(g.is_acyclic());
        assert!(g.self_loops().is_empty());
        assert!(g.has_path("rain", "grass_wet").unwrap());
        assert_eq!(g.out_degree("grass_wet").unwrap(), 0);
        assert_eq!(g.in_degree("rain").unwrap(), 0, "orphan filter held");
        assert!(!g.contains_edge("grass_wet", "rain"));
        // Edge subset of the filtered universe.
        for (s, d) in g.edges() {
            assert!(narrowed.contains_edge(&s, &d));
        }
        seen += 1;
    }
    assert!(seen > 0, "the sprinkler skeleton is among the candidates");
}

#[test]
fn empty_condition_list_is_a_configuration_error() {
    let g = complete_digraph(&["a", "b"]).unwrap();
    assert!(matches!(
        conditional_subgraphs(&g, vec![]).err(),
        Some(EngineError::Configuration(_))
    ));
    assert!(matches!(
        partial_conditional_subgraphs(&g, &[("a", "b")], vec![]).err(),
        Some(EngineError::Configuration(_))
    ));
}

#[test]
fn restricted_enumeration_searches_only_the_ambiguous_edges() {
    // Fix the skeleton rain->sprinkler, rain->grass_wet; leave only
    // sprinkler->grass_wet ambiguous.
    let mut g = DirectedGraph::new();
    g.add_nodes(["rain", "sprinkler", "grass_wet"]);
    g.add_edges([
        ("rain", "sprinkler"),
        ("rain", "grass_wet"),
        ("sprinkler", "grass_wet"),
    ])
    .unwrap();

    let candidates: Vec<_> =
        partial_conditional_subgraphs(&g, &[("sprinkler", "grass_wet")], vec![is_dag()])
            .unwrap()
            .map(|r| r.unwrap())
            .collect();

    assert_eq!(candidates.len(), 2);
    for c in &candidates {
        assert!(c.contains_edge("rain", "sprinkler"));
        assert!(c.contains_edge("rain", "grass_wet"));
    }
    assert_eq!(
        candidates
            .iter()
            .filter(|c| c.contains_edge("sprinkler", "grass_wet"))
            .count(),
        1
    );
}

#[test]
fn restricted_enumeration_over_no_edges_yields_exactly_the_graph() {
    let mut g = DirectedGraph::new();
    g.add_nodes(["a", "b"]);
    g.add_edge("a", "b").unwrap();

    let out: Vec<_> = partial_conditional_subgraphs(&g, &[], vec![is_dag()])
        .unwrap()
        .collect();
    assert_eq!(out.len(), 1);
    assert!(out[0].as_ref().unwrap().contains_edge("a", "b"));
}

#[test]
fn split_and_filter_preserves_both_halves() {
    let universe = complete_digraph(&["x", "y"]).unwrap();
    let narrowed = apply_filters(&universe, &[remove_self_loops()]);
    let all = conditional_subgraphs(&narrowed, vec![Box::new(|_: &DirectedGraph| Ok(true))])
        .unwrap();

    let (unfiltered, dags) = split_and_filter(all, vec![is_dag()]).unwrap();

    // Consume the filtered half completely first.
    let dags: Vec<_> = dags.map(|r| r.unwrap()).collect();
    assert_eq!(dags.len(), 3, "of 4 subsets only x<->y is cyclic");

    // The duplicate is unaffected.
    let unfiltered: Vec<_> = unfiltered.map(|r| r.unwrap()).collect();
    assert_eq!(unfiltered.len(), 4);
}

#[test]
fn independently_developed_condition_sets_compose() {
    let universe = complete_digraph(&["x", "y", "z"]).unwrap();
    let narrowed = apply_filters(&universe, &[remove_self_loops(), barren_nodes(&["z"])]);

    let structural = conditional_subgraphs(&narrowed, vec![is_dag()]).unwrap();
    let (all_dags, rooted) =
        split_and_filter(structural, vec![no_input_nodes(&["x"])]).unwrap();
    let (rooted_again, pinned) =
        split_and_filter(rooted, vec![explicit_parents(&[("z", vec!["y"])])]).unwrap();

    let pinned: Vec<_> = pinned.map(|r| r.unwrap()).collect();
    for g in &pinned {
        assert!(g.is_acyclic());
        assert_eq!(g.in_degree("x").unwrap(), 0);
        assert_eq!(g.in_edges("z").unwrap(), vec![("y".into(), "z".into())]);
        assert_eq!(g.out_degree("z").unwrap(), 0, "barren filter held");
    }
    assert!(!pinned.is_empty());

    let rooted_count = rooted_again.count();
    let dag_count = all_dags.count();
    assert!(pinned.len() <= rooted_count && rooted_count <= dag_count);
}

#[test]
fn lookup_errors_abort_enumeration() {
    let g = complete_digraph(&["a", "b"]).unwrap();
    let mut it =
        conditional_subgraphs(&g, vec![no_input_nodes(&["not_a_node"])]).unwrap();
    assert!(matches!(it.next(), Some(Err(EngineError::Lookup(_)))));
    assert!(it.next().is_none(), "iterator is fused after the error");
}
