//! Marriage cluster detection.
//!
//! A cluster is a maximal set of people connected through spouse links,
//! so a remarriage chain `A–B`, `B–C` forms one cluster `{A, B, C}`.
//! People with no spouse are not clustered and are laid out on their own.

use std::collections::{BTreeSet, HashMap};

use kinfolk_core::Family;
use petgraph::unionfind::UnionFind;
use tracing::instrument;

/// Spouse-connected components of a family.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarriageClusters {
    /// Clusters of two or more, members ascending, clusters ordered by
    /// their first member.
    clusters: Vec<Vec<String>>,
    membership: HashMap<String, usize>,
    /// Distinct spouse pairs as `(lower id, higher id)`.
    pairs: BTreeSet<(String, String)>,
}

impl MarriageClusters {
    /// Partition `family` by spouse links.
    ///
    /// Links with unknown endpoints and self-links are ignored.
    #[must_use]
    #[instrument(skip(family), fields(people = family.len()))]
    pub fn detect(family: &Family) -> Self {
        let ids: Vec<&str> = family.ids().collect();
        let index: HashMap<&str, usize> = ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();

        let mut sets = UnionFind::<usize>::new(ids.len());
        let mut pairs = BTreeSet::new();
        for rel in family.spouse_links() {
            let (a, b) = rel.sorted_pair();
            if a == b {
                continue;
            }
            if let (Some(&ia), Some(&ib)) = (index.get(a), index.get(b)) {
                sets.union(ia, ib);
                pairs.insert((a.to_string(), b.to_string()));
            }
        }

        let mut by_root: HashMap<usize, Vec<String>> = HashMap::new();
        for (a, b) in &pairs {
            for id in [a, b] {
                if let Some(&i) = index.get(id.as_str()) {
                    by_root.entry(sets.find(i)).or_default().push(id.clone());
                }
            }
        }

        let mut clusters: Vec<Vec<String>> = by_root
            .into_values()
            .map(|mut members| {
                members.sort();
                members.dedup();
                members
            })
            .collect();
        clusters.sort();

        let membership = clusters
            .iter()
            .enumerate()
            .flat_map(|(ci, members)| members.iter().map(move |m| (m.clone(), ci)))
            .collect();

        Self {
            clusters,
            membership,
            pairs,
        }
    }

    /// Clusters of two or more people.
    #[must_use]
    pub fn clusters(&self) -> &[Vec<String>] {
        &self.clusters
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Index of the cluster containing `id`.
    #[must_use]
    pub fn cluster_index(&self, id: &str) -> Option<usize> {
        self.membership.get(id).copied()
    }

    /// Members of the cluster containing `id`.
    #[must_use]
    pub fn cluster_of(&self, id: &str) -> Option<&[String]> {
        self.cluster_index(id)
            .and_then(|ci| self.clusters.get(ci))
            .map(Vec::as_slice)
    }

    /// `true` if `a` and `b` have a spouse link, in either direction.
    #[must_use]
    pub fn are_spouses(&self, a: &str, b: &str) -> bool {
        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        self.pairs.contains(&(a.to_string(), b.to_string()))
    }

    /// All distinct spouse pairs, `(lower id, higher id)`, ascending.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(a, b)| (a.as_str(), b.as_str()))
    }

    /// Spouse pairs whose members belong to cluster `index`.
    pub fn pairs_in(&self, index: usize) -> impl Iterator<Item = (&str, &str)> {
        self.pairs()
            .filter(move |(a, _)| self.cluster_index(a) == Some(index))
    }
}
