//! Known-topology regression and property tests for layout graphs.

use kinfolk_core::config::LayoutConfig;
use kinfolk_core::model::{Gender, Person, Relationship};
use kinfolk_core::Family;
use kinfolk_layout::node::{EdgeKind, LayoutNode};
use kinfolk_layout::{LayoutOptions, LayoutRequest, MarriageClusters, build_layout};
use proptest::prelude::*;

fn people(ids: &[&str]) -> Vec<Person> {
    ids.iter().map(|id| Person::new(*id, *id, Gender::Other)).collect()
}

#[test]
fn remarriage_yields_one_cluster_and_two_anchors() {
    let family = Family::new(
        people(&["a", "b", "c", "k1", "k2"]),
        vec![
            Relationship::spouse("s1", "a", "b"),
            Relationship::spouse("s2", "c", "b"),
            Relationship::parent("p1", "a", "k1"),
            Relationship::parent("p2", "b", "k1"),
            Relationship::parent("p3", "b", "k2"),
            Relationship::parent("p4", "c", "k2"),
        ],
    )
    .expect("family");

    let clusters = MarriageClusters::detect(&family);
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters.clusters()[0], vec!["a", "b", "c"]);

    let config = LayoutConfig::default();
    let graph = build_layout(&family, &config, &LayoutOptions::default());
    let anchors: Vec<&str> = graph.union_anchors().map(|a| a.id.as_str()).collect();
    assert_eq!(anchors, vec!["union_a_b", "union_b_c"]);

    let group = graph.groups().next().expect("group");
    assert_eq!(group.id, "group_a_b_c");
    assert!((group.size.width - 540.0).abs() < f64::EPSILON);
    assert!((group.size.height - 250.0).abs() < f64::EPSILON);

    // slots at 50, 230, 410; anchors at midpoint + 44
    let x = |id: &str| graph.node(id).expect("node").position().x;
    assert!((x("union_a_b") - 184.0).abs() < f64::EPSILON);
    assert!((x("union_b_c") - 364.0).abs() < f64::EPSILON);
    assert!((graph.node("union_a_b").expect("anchor").position().y - 74.0).abs() < f64::EPSILON);

    let lineage: Vec<(&str, &str)> = graph
        .edges
        .iter()
        .filter(|e| e.kind == EdgeKind::Lineage)
        .map(|e| (e.source.as_str(), e.target.as_str()))
        .collect();
    assert_eq!(lineage, vec![("union_a_b", "k1"), ("union_b_c", "k2")]);
}

#[test]
fn redundant_relationships_do_not_duplicate_edges() {
    let family = Family::new(
        people(&["a", "b", "k"]),
        vec![
            Relationship::spouse("s1", "a", "b"),
            Relationship::spouse("s2", "b", "a"),
            Relationship::parent("p1", "a", "k"),
            Relationship::parent("p2", "a", "k"),
            Relationship::parent("p3", "b", "k"),
        ],
    )
    .expect("family");
    let graph = build_layout(&family, &LayoutConfig::default(), &LayoutOptions::default());
    assert_eq!(graph.edges.len(), 2);
    assert_eq!(graph.union_anchors().count(), 1);

    let mut ids: Vec<&str> = graph.edges.iter().map(|e| e.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), graph.edges.len());
}

#[test]
fn every_person_appears_exactly_once() {
    let family = Family::new(
        people(&["a", "b", "c", "d", "e"]),
        vec![
            Relationship::spouse("s1", "a", "b"),
            Relationship::spouse("s2", "d", "e"),
            Relationship::parent("p1", "a", "c"),
        ],
    )
    .expect("family");
    let graph = build_layout(&family, &LayoutConfig::default(), &LayoutOptions::default());
    let mut ids: Vec<&str> = graph.people().map(|p| p.id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);

    let request = LayoutRequest::from_graph(&graph, &LayoutConfig::default());
    let top: Vec<&str> = request.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(top, vec!["group_a_b", "group_d_e", "c"]);
    assert!(graph
        .nodes
        .iter()
        .filter(|n| matches!(n, LayoutNode::Person(p) if p.group.is_some()))
        .all(|n| !n.is_top_level()));
}

proptest! {
    #[test]
    fn anchor_position_ignores_storage_direction(
        n in 2usize..7,
        pairs in proptest::collection::vec((0usize..7, 0usize..7), 1..8),
    ) {
        let ids: Vec<String> = (0..n).map(|i| format!("m{i}")).collect();
        let pairs: Vec<(usize, usize)> = pairs
            .into_iter()
            .map(|(a, b)| (a % n, b % n))
            .filter(|(a, b)| a != b)
            .collect();
        prop_assume!(!pairs.is_empty());

        let make = |flip: bool| {
            let rels = pairs
                .iter()
                .enumerate()
                .map(|(i, &(a, b))| {
                    let (s, t) = if flip { (b, a) } else { (a, b) };
                    Relationship::spouse(format!("s{i}"), ids[s].clone(), ids[t].clone())
                })
                .collect();
            let people = ids.iter().map(|id| Person::new(id.clone(), "x", Gender::Other));
            Family::new(people, rels).expect("family")
        };

        let config = LayoutConfig::default();
        let forward = build_layout(&make(false), &config, &LayoutOptions::default());
        let backward = build_layout(&make(true), &config, &LayoutOptions::default());
        prop_assert_eq!(&forward, &backward);

        for anchor in forward.union_anchors() {
            let (u, v) = &anchor.spouses;
            let xu = forward.node(u).expect("u").position().x;
            let xv = forward.node(v).expect("v").position().x;
            let expected = (xu + xv) / 2.0 + (config.member_width - config.anchor_width) / 2.0;
            prop_assert!((anchor.position.x - expected).abs() < 1e-9);
        }
    }
}
