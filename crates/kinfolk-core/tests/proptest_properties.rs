//! Property tests: termination on arbitrary data, generation invariants on
//! layered data, and title symmetry for parent links.

use proptest::prelude::*;

use kinfolk_core::config::KinshipConfig;
use kinfolk_core::graph::{Generations, RelationGraph};
use kinfolk_core::kinship::{PathTree, classify};
use kinfolk_core::model::{Gender, Person, Relationship};
use kinfolk_core::{Family, resolve_title};

fn arb_gender() -> impl Strategy<Value = Gender> {
    prop_oneof![Just(Gender::Male), Just(Gender::Female), Just(Gender::Other)]
}

/// Any shape at all: cycles, self-links, duplicates, dangling ids.
fn arb_family() -> impl Strategy<Value = Family> {
    (1usize..12)
        .prop_flat_map(|n| {
            (
                proptest::collection::vec(arb_gender(), n),
                proptest::collection::vec((0..n + 2, 0..n + 2, any::<bool>()), 0..30),
            )
        })
        .prop_map(|(genders, edges)| {
            let people: Vec<Person> = genders
                .into_iter()
                .enumerate()
                .map(|(i, g)| Person::new(format!("p{i}"), format!("P{i}"), g))
                .collect();
            let rels = edges
                .into_iter()
                .enumerate()
                .map(|(i, (a, b, parent))| {
                    let (a, b) = (format!("p{a}"), format!("p{b}"));
                    if parent {
                        Relationship::parent(format!("r{i}"), a, b)
                    } else {
                        Relationship::spouse(format!("r{i}"), a, b)
                    }
                })
                .collect();
            Family::new(people, rels).expect("ids are unique")
        })
}

/// People on levels; parent links go one level down, spouses stay level.
fn arb_layered_family() -> impl Strategy<Value = Family> {
    (2usize..14)
        .prop_flat_map(|n| {
            (
                proptest::collection::vec(0u8..4, n),
                proptest::collection::vec((0..n, 0..n), 0..40),
            )
        })
        .prop_map(|(levels, pairs)| {
            let people: Vec<Person> = (0..levels.len())
                .map(|i| Person::new(format!("p{i:02}"), "x", Gender::Other))
                .collect();
            let mut rels = Vec::new();
            for (i, (a, b)) in pairs.into_iter().enumerate() {
                let (la, lb) = (levels[a], levels[b]);
                if la + 1 == lb {
                    rels.push(Relationship::parent(format!("r{i}"), format!("p{a:02}"), format!("p{b:02}")));
                } else if la == lb && a != b {
                    rels.push(Relationship::spouse(format!("r{i}"), format!("p{a:02}"), format!("p{b:02}")));
                }
            }
            Family::new(people, rels).expect("ids are unique")
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn generations_terminate_within_bound(family in arb_family()) {
        let gens = Generations::compute(&family);
        prop_assert!(gens.passes() <= family.len() + 1);
        for id in family.ids() {
            prop_assert!(gens.get(id).is_some_and(|g| g >= 1));
        }
    }

    #[test]
    fn layered_generations_respect_edges(family in arb_layered_family()) {
        let gens = Generations::compute(&family);
        prop_assert!(gens.converged());
        for id in family.ids() {
            let Some(highest) = family.parents_of(id).filter_map(|p| gens.get(p)).max() else {
                continue;
            };
            let child = gens.get(id).expect("child");
            // Only spouse sync can lift a child above its highest parent.
            if family.spouse_links().any(|r| r.source == id || r.target == id) {
                prop_assert!(child > highest, "{id}");
            } else {
                prop_assert_eq!(child, highest + 1, "{}", id);
            }
        }
        for rel in family.spouse_links() {
            prop_assert_eq!(gens.get(&rel.source), gens.get(&rel.target));
        }
    }

    #[test]
    fn paths_respect_depth_cap(family in arb_family(), depth in 1usize..6) {
        let graph = RelationGraph::from_family(&family);
        let root = graph.node_index("p0").expect("p0 exists");
        let tree = PathTree::explore(&graph, root, depth);
        for id in family.ids() {
            let idx = graph.node_index(id).expect("node");
            if let Some(path) = tree.path_to(&graph, idx) {
                prop_assert!(path.len() <= depth);
                prop_assert_eq!(path.via.last().map(String::as_str), (!path.is_empty()).then_some(id));
            }
        }
    }

    #[test]
    fn resolution_never_fails(family in arb_family()) {
        let config = KinshipConfig::default();
        for id in family.ids() {
            let title = resolve_title(&family, "p0", id, &config);
            if id == "p0" {
                prop_assert_eq!(title, "本人");
            }
        }
        prop_assert_eq!(resolve_title(&family, "nobody", "p0", &config), "");
    }

    #[test]
    fn self_is_oneself(family in arb_family()) {
        let config = KinshipConfig::default();
        for id in family.ids() {
            prop_assert!(classify(&family, id, id, &config).is_some());
        }
    }
}
