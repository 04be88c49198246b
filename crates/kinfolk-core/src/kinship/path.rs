//! Breadth-first shortest paths over a [`RelationGraph`].
//!
//! A node is marked visited when it is enqueued, so every reachable person
//! gets exactly one predecessor: the first edge that reached it in
//! neighbour order. Nodes at `max_depth` edges from the root are recorded but
//! never expanded, so no path longer than `max_depth` is ever produced.

use std::collections::{HashMap, VecDeque};

use petgraph::graph::NodeIndex;
use serde::Serialize;

use crate::graph::{RelationGraph, Step};

/// A relational path from the root to one target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KinPath {
    /// Edge labels in traversal order.
    pub steps: Vec<Step>,
    /// Ids of the people reached by each step; the last entry is the target.
    pub via: Vec<String>,
}

impl KinPath {
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Id of the person reached after `step` edges (1-based).
    #[must_use]
    pub fn person_at(&self, step: usize) -> Option<&str> {
        step.checked_sub(1)
            .and_then(|i| self.via.get(i))
            .map(String::as_str)
    }
}

/// Predecessor tree of a depth-bounded BFS from one root.
#[derive(Debug, Clone)]
pub struct PathTree {
    root: NodeIndex,
    pred: HashMap<NodeIndex, (NodeIndex, Step)>,
}

impl PathTree {
    /// Explore everything within `max_depth` edges of `root`.
    #[must_use]
    pub fn explore(graph: &RelationGraph, root: NodeIndex, max_depth: usize) -> Self {
        bfs(graph, root, None, max_depth)
    }

    /// Number of people reached, the root included.
    #[must_use]
    pub fn reached(&self) -> usize {
        self.pred.len() + 1
    }

    /// Path from the root to `target`, or `None` if it was not reached.
    #[must_use]
    pub fn path_to(&self, graph: &RelationGraph, target: NodeIndex) -> Option<KinPath> {
        if target == self.root {
            return Some(KinPath::default());
        }

        let mut steps = Vec::new();
        let mut via = Vec::new();
        let mut cursor = target;
        while cursor != self.root {
            let &(prev, step) = self.pred.get(&cursor)?;
            steps.push(step);
            via.push(graph.node_id(cursor)?.to_string());
            cursor = prev;
        }
        steps.reverse();
        via.reverse();
        Some(KinPath { steps, via })
    }
}

/// Shortest path from `root` to `target` within `max_depth` edges.
#[must_use]
pub fn shortest_path(
    graph: &RelationGraph,
    root: NodeIndex,
    target: NodeIndex,
    max_depth: usize,
) -> Option<KinPath> {
    bfs(graph, root, Some(target), max_depth).path_to(graph, target)
}

fn bfs(
    graph: &RelationGraph,
    root: NodeIndex,
    target: Option<NodeIndex>,
    max_depth: usize,
) -> PathTree {
    let mut pred: HashMap<NodeIndex, (NodeIndex, Step)> = HashMap::new();
    let mut queue: VecDeque<(NodeIndex, usize)> = VecDeque::from([(root, 0)]);

    while let Some((node, depth)) = queue.pop_front() {
        if Some(node) == target {
            break;
        }
        if depth >= max_depth {
            continue;
        }

        for (next, step) in graph.neighbors(node) {
            if next == root || pred.contains_key(&next) {
                continue;
            }
            pred.insert(next, (node, step));
            queue.push_back((next, depth + 1));
        }
    }

    PathTree { root, pred }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::Family;
    use crate::model::{Gender, Person, Relationship};

    fn chain(len: usize) -> Family {
        let people: Vec<Person> = (0..=len)
            .map(|i| Person::new(format!("p{i:02}"), "x", Gender::Male))
            .collect();
        let rels = (0..len)
            .map(|i| Relationship::parent(format!("r{i}"), format!("p{:02}", i + 1), format!("p{i:02}")))
            .collect();
        Family::new(people, rels).expect("family")
    }

    #[test]
    fn finds_path_up_to_max_depth() {
        let family = chain(10);
        let graph = RelationGraph::from_family(&family);
        let root = graph.node_index("p00").expect("root");

        let at_cap = graph.node_index("p08").expect("p08");
        let path = shortest_path(&graph, root, at_cap, 8).expect("within cap");
        assert_eq!(path.len(), 8);
        assert!(path.steps.iter().all(|s| *s == Step::Father));
        assert_eq!(path.person_at(8), Some("p08"));

        let beyond = graph.node_index("p09").expect("p09");
        assert!(shortest_path(&graph, root, beyond, 8).is_none());
    }

    #[test]
    fn tree_matches_single_target_search() {
        let family = chain(5);
        let graph = RelationGraph::from_family(&family);
        let root = graph.node_index("p02").expect("root");
        let tree = PathTree::explore(&graph, root, 8);
        assert_eq!(tree.reached(), 6);
        for id in ["p00", "p01", "p03", "p05"] {
            let idx = graph.node_index(id).expect("node");
            assert_eq!(
                tree.path_to(&graph, idx),
                shortest_path(&graph, root, idx, 8),
                "path to {id}"
            );
        }
        assert_eq!(tree.path_to(&graph, root), Some(KinPath::default()));
    }

    #[test]
    fn cycles_terminate() {
        let family = Family::new(
            [
                Person::new("a", "a", Gender::Male),
                Person::new("b", "b", Gender::Female),
                Person::new("c", "c", Gender::Male),
            ],
            vec![
                Relationship::parent("r1", "a", "b"),
                Relationship::parent("r2", "b", "a"),
            ],
        )
        .expect("family");
        let graph = RelationGraph::from_family(&family);
        let a = graph.node_index("a").expect("a");
        let c = graph.node_index("c").expect("c");
        assert!(shortest_path(&graph, a, c, 8).is_none());
        let b = graph.node_index("b").expect("b");
        assert_eq!(shortest_path(&graph, a, b, 8).map(|p| p.len()), Some(1));
    }
}
