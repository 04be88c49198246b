//! Relationship graph construction.
//!
//! Every recorded fact becomes two directed, typed edges so that traversal
//! can walk the family in any direction:
//!
//! | Fact | Forward edge | Reverse edge |
//! |------|--------------|--------------|
//! | `parent(P, C)` | `P → C` as [`Step::Son`]/[`Step::Daughter`] | `C → P` as [`Step::Father`]/[`Step::Mother`] |
//! | `spouse(A, B)` | `A → B` typed by B's gender | `B → A` typed by A's gender |
//!
//! The edge label always describes the person at the *head* of the edge as
//! seen from the tail. No deduplication is done: a fact recorded twice
//! yields parallel edges, which traversal tolerates through its visited set.
//!
//! ## Neighbour order
//!
//! [`RelationGraph::neighbors`] yields edges sorted by `(target id, step)`,
//! so breadth-first search picks the same shortest path no matter how the
//! relationship list was ordered.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;
use std::fmt;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::family::Family;
use crate::model::{Gender, RelationshipKind};

/// A typed edge: who the head person is to the tail person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Father,
    Mother,
    Son,
    Daughter,
    Husband,
    Wife,
    Spouse,
}

impl Step {
    /// Edge from a child to a parent of the given gender.
    #[must_use]
    pub const fn parent(gender: Gender) -> Self {
        match gender {
            Gender::Male => Self::Father,
            Gender::Female | Gender::Other => Self::Mother,
        }
    }

    /// Edge from a parent to a child of the given gender.
    #[must_use]
    pub const fn child(gender: Gender) -> Self {
        match gender {
            Gender::Female => Self::Daughter,
            Gender::Male | Gender::Other => Self::Son,
        }
    }

    /// Edge to a spouse of the given gender.
    #[must_use]
    pub const fn spouse(gender: Gender) -> Self {
        match gender {
            Gender::Male => Self::Husband,
            Gender::Female => Self::Wife,
            Gender::Other => Self::Spouse,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Father => "father",
            Self::Mother => "mother",
            Self::Son => "son",
            Self::Daughter => "daughter",
            Self::Husband => "husband",
            Self::Wife => "wife",
            Self::Spouse => "spouse",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed adjacency over one family snapshot.
///
/// Nodes are person ids (every person, in id order, including isolated
/// ones). Relationships whose endpoints are not both known are skipped.
#[derive(Debug)]
pub struct RelationGraph {
    pub graph: DiGraph<String, Step>,
    pub node_map: HashMap<String, NodeIndex>,
    /// [`Family::content_hash`] of the snapshot this graph was built from.
    pub content_hash: String,
}

impl RelationGraph {
    /// Build the adjacency graph for `family`.
    #[must_use]
    #[instrument(skip(family), fields(people = family.len()))]
    pub fn from_family(family: &Family) -> Self {
        let mut graph = DiGraph::<String, Step>::with_capacity(
            family.len(),
            family.relationships().len() * 2,
        );
        let mut node_map = HashMap::with_capacity(family.len());
        for id in family.ids() {
            let idx = graph.add_node(id.to_string());
            node_map.insert(id.to_string(), idx);
        }

        let mut skipped = 0usize;
        for rel in family.relationships() {
            let (Some(source), Some(target)) = (family.person(&rel.source), family.person(&rel.target))
            else {
                skipped += 1;
                continue;
            };
            let (Some(&s), Some(&t)) = (node_map.get(&rel.source), node_map.get(&rel.target)) else {
                skipped += 1;
                continue;
            };

            match rel.kind {
                RelationshipKind::Parent => {
                    graph.add_edge(s, t, Step::child(target.gender));
                    graph.add_edge(t, s, Step::parent(source.gender));
                }
                RelationshipKind::Spouse => {
                    graph.add_edge(s, t, Step::spouse(target.gender));
                    graph.add_edge(t, s, Step::spouse(source.gender));
                }
            }
        }

        if skipped > 0 {
            debug!(skipped, "skipped relationships with unknown endpoints");
        }

        Self {
            graph,
            node_map,
            content_hash: family.content_hash(),
        }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    /// Person id for a node.
    #[must_use]
    pub fn node_id(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(String::as_str)
    }

    /// Outgoing `(neighbour, step)` pairs of `idx`, sorted by neighbour id
    /// and then step.
    #[must_use]
    pub fn neighbors(&self, idx: NodeIndex) -> Vec<(NodeIndex, Step)> {
        let mut out: Vec<(NodeIndex, Step)> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.target(), *e.weight()))
            .collect();
        out.sort_by(|a, b| {
            self.graph[a.0]
                .cmp(&self.graph[b.0])
                .then_with(|| a.1.cmp(&b.1))
        });
        out
    }

    /// Outgoing adjacency of `id` as `(neighbour id, step)` pairs.
    ///
    /// Unknown ids have no neighbours.
    #[must_use]
    pub fn adjacency(&self, id: &str) -> Vec<(&str, Step)> {
        self.node_index(id)
            .map(|idx| {
                self.neighbors(idx)
                    .into_iter()
                    .map(|(n, step)| (self.graph[n].as_str(), step))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Person, Relationship};

    fn family(rels: Vec<Relationship>) -> Family {
        Family::new(
            [
                Person::new("dad", "Dad", Gender::Male),
                Person::new("mom", "Mom", Gender::Female),
                Person::new("kid", "Kid", Gender::Other),
                Person::new("pat", "Pat", Gender::Other),
            ],
            rels,
        )
        .expect("family")
    }

    #[test]
    fn parent_fact_yields_two_typed_edges() {
        let g = RelationGraph::from_family(&family(vec![
            Relationship::parent("r1", "dad", "kid"),
            Relationship::parent("r2", "mom", "kid"),
        ]));
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.adjacency("dad"), vec![("kid", Step::Son)]);
        assert_eq!(
            g.adjacency("kid"),
            vec![("dad", Step::Father), ("mom", Step::Mother)]
        );
    }

    #[test]
    fn spouse_edges_are_typed_by_the_other_person() {
        let g = RelationGraph::from_family(&family(vec![
            Relationship::spouse("r1", "mom", "dad"),
            Relationship::spouse("r2", "pat", "mom"),
        ]));
        assert_eq!(g.adjacency("dad"), vec![("mom", Step::Wife)]);
        assert_eq!(
            g.adjacency("mom"),
            vec![("dad", Step::Husband), ("pat", Step::Spouse)]
        );
    }

    #[test]
    fn unknown_endpoints_are_skipped() {
        let g = RelationGraph::from_family(&family(vec![
            Relationship::parent("r1", "ghost", "kid"),
            Relationship::spouse("r2", "dad", "nobody"),
        ]));
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 0);
        assert!(g.adjacency("ghost").is_empty());
    }

    #[test]
    fn duplicate_facts_produce_parallel_edges() {
        let g = RelationGraph::from_family(&family(vec![
            Relationship::spouse("r1", "dad", "mom"),
            Relationship::spouse("r2", "mom", "dad"),
        ]));
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.adjacency("dad").len(), 2);
    }

    #[test]
    fn step_from_gender_defaults() {
        assert_eq!(Step::child(Gender::Other), Step::Son);
        assert_eq!(Step::parent(Gender::Other), Step::Mother);
        assert_eq!(Step::spouse(Gender::Other), Step::Spouse);
        assert_eq!(Step::spouse(Gender::Female), Step::Wife);
    }
}
