//! Data-quality findings over a family snapshot.
//!
//! None of these stop a computation; every engine tolerates them. They are
//! surfaced so the editing layer can offer fixes:
//! - relationships pointing at unknown people
//! - self-relationships
//! - more than two parents
//! - the same fact recorded twice
//! - parent cycles (a person who is their own ancestor)

use std::collections::{BTreeMap, HashMap, HashSet};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use tracing::instrument;

use crate::error::ErrorCode;
use crate::family::Family;
use crate::model::RelationshipKind;

/// One data-quality finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub code: &'static str,
    #[serde(skip)]
    pub error_code: ErrorCode,
    pub message: String,
    /// Person ids involved, ascending.
    pub people: Vec<String>,
    /// Relationship ids involved, in list order.
    pub relationships: Vec<String>,
}

impl Finding {
    fn new(error_code: ErrorCode, message: String) -> Self {
        Self {
            code: error_code.code(),
            error_code,
            message,
            people: Vec::new(),
            relationships: Vec::new(),
        }
    }

    fn people<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.people = ids.into_iter().map(Into::into).collect();
        self.people.sort();
        self
    }

    fn relationships<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relationships = ids.into_iter().map(Into::into).collect();
        self
    }
}

/// Run every check over `family`.
///
/// Findings are ordered by code, then by the order the checks encounter
/// them.
#[must_use]
#[instrument(skip(family), fields(people = family.len()))]
pub fn diagnose(family: &Family) -> Vec<Finding> {
    let mut findings = Vec::new();
    findings.extend(dangling(family));
    findings.extend(self_links(family));
    findings.extend(excess_parents(family));
    findings.extend(duplicates(family));
    findings.extend(parent_cycles(family));
    findings.sort_by_key(|f| f.error_code);
    findings
}

fn dangling(family: &Family) -> Vec<Finding> {
    family
        .relationships()
        .iter()
        .filter_map(|rel| {
            let missing: Vec<&str> = [rel.source.as_str(), rel.target.as_str()]
                .into_iter()
                .filter(|id| !family.contains(id))
                .collect();
            (!missing.is_empty()).then(|| {
                Finding::new(
                    ErrorCode::DanglingRelationship,
                    format!("{} relationship '{}' references unknown {}", rel.kind, rel.id, missing.join(", ")),
                )
                .people(missing)
                .relationships([rel.id.as_str()])
            })
        })
        .collect()
}

fn self_links(family: &Family) -> Vec<Finding> {
    family
        .relationships()
        .iter()
        .filter(|rel| rel.source == rel.target)
        .map(|rel| {
            Finding::new(
                ErrorCode::SelfRelationship,
                format!("{} relationship '{}' links '{}' to themselves", rel.kind, rel.id, rel.source),
            )
            .people([rel.source.as_str()])
            .relationships([rel.id.as_str()])
        })
        .collect()
}

fn excess_parents(family: &Family) -> Vec<Finding> {
    let mut parents: BTreeMap<&str, (HashSet<&str>, Vec<&str>)> = BTreeMap::new();
    for rel in family.parent_links() {
        let entry = parents.entry(rel.target.as_str()).or_default();
        entry.0.insert(rel.source.as_str());
        entry.1.push(rel.id.as_str());
    }

    parents
        .into_iter()
        .filter(|(_, (distinct, _))| distinct.len() > 2)
        .map(|(child, (distinct, rels))| {
            Finding::new(
                ErrorCode::ExcessParents,
                format!("'{child}' has {} recorded parents", distinct.len()),
            )
            .people(std::iter::once(child).chain(distinct))
            .relationships(rels)
        })
        .collect()
}

fn duplicates(family: &Family) -> Vec<Finding> {
    let mut seen: HashMap<(RelationshipKind, &str, &str), Vec<&str>> = HashMap::new();
    let mut order = Vec::new();
    for rel in family.relationships() {
        let key = match rel.kind {
            RelationshipKind::Parent => (rel.kind, rel.source.as_str(), rel.target.as_str()),
            RelationshipKind::Spouse => {
                let (a, b) = rel.sorted_pair();
                (rel.kind, a, b)
            }
        };
        let ids = seen.entry(key).or_default();
        if ids.is_empty() {
            order.push(key);
        }
        ids.push(rel.id.as_str());
    }

    order
        .into_iter()
        .filter_map(|key| {
            let ids = seen.get(&key)?;
            (ids.len() > 1).then(|| {
                let (kind, a, b) = key;
                Finding::new(
                    ErrorCode::DuplicateRelationship,
                    format!("{kind} fact between '{a}' and '{b}' recorded {} times", ids.len()),
                )
                .people([a, b])
                .relationships(ids.iter().copied())
            })
        })
        .collect()
}

fn parent_cycles(family: &Family) -> Vec<Finding> {
    let mut graph = DiGraph::<&str, ()>::new();
    let mut index: HashMap<&str, NodeIndex> = HashMap::new();
    for id in family.ids() {
        index.insert(id, graph.add_node(id));
    }
    let mut self_parent = Vec::new();
    for rel in family.parent_links() {
        if let (Some(&s), Some(&t)) = (index.get(rel.source.as_str()), index.get(rel.target.as_str())) {
            if s == t {
                self_parent.push(rel.source.as_str());
            } else {
                graph.add_edge(s, t, ());
            }
        }
    }

    let mut cycles: Vec<Vec<&str>> = tarjan_scc(&graph)
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .map(|scc| {
            let mut ids: Vec<&str> = scc.into_iter().map(|idx| graph[idx]).collect();
            ids.sort_unstable();
            ids
        })
        .collect();
    cycles.extend(self_parent.into_iter().map(|id| vec![id]));
    cycles.sort();
    cycles.dedup();

    cycles
        .into_iter()
        .map(|ids| {
            Finding::new(
                ErrorCode::ParentCycle,
                format!("parent cycle through {}", ids.join(" → ")),
            )
            .people(ids)
        })
        .collect()
}
