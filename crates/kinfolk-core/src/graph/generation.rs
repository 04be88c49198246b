//! Generation numbering by bounded fixed-point relaxation.
//!
//! People with no recorded parent start at generation 1. Each pass then
//!
//! 1. pushes every child to at least `parent + 1`, and
//! 2. raises both spouses of every couple to the larger of their two values.
//!
//! Passes repeat until nothing changes. On acyclic data this converges in at
//! most one pass per person; a parent cycle would otherwise climb forever, so
//! the loop stops after `people + 1` passes and reports that it did not
//! converge. Relationships with unknown endpoints are ignored.

use std::collections::{BTreeMap, HashMap};

use tracing::{instrument, warn};

use crate::family::Family;

/// Generation number per person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generations {
    values: BTreeMap<String, u32>,
    passes: usize,
    converged: bool,
}

impl Generations {
    /// Compute generation numbers for every person in `family`.
    #[instrument(skip(family), fields(people = family.len()))]
    pub fn compute(family: &Family) -> Self {
        let mut values: HashMap<&str, u32> = HashMap::with_capacity(family.len());
        for id in family.ids() {
            if family.parents_of(id).next().is_none() {
                values.insert(id, 1);
            }
        }

        let parent_edges: Vec<(&str, &str)> = family
            .parent_links()
            .map(|r| (r.source.as_str(), r.target.as_str()))
            .collect();
        let spouse_edges: Vec<(&str, &str)> = family
            .spouse_links()
            .map(|r| (r.source.as_str(), r.target.as_str()))
            .collect();

        let max_passes = family.len() + 1;
        let mut passes = 0;
        let mut converged = false;

        while passes < max_passes {
            passes += 1;
            let mut changed = false;

            for &(parent, child) in &parent_edges {
                let parent_gen = values.get(parent).copied().unwrap_or(1);
                let child_gen = values.get(child).copied().unwrap_or(0);
                let candidate = parent_gen.saturating_add(1);
                if candidate > child_gen {
                    values.insert(child, candidate);
                    changed = true;
                }
            }

            for &(a, b) in &spouse_edges {
                let gen_a = values.get(a).copied().unwrap_or(1);
                let gen_b = values.get(b).copied().unwrap_or(1);
                let max = gen_a.max(gen_b);
                if max > gen_a {
                    values.insert(a, max);
                    changed = true;
                }
                if max > gen_b {
                    values.insert(b, max);
                    changed = true;
                }
            }

            if !changed {
                converged = true;
                break;
            }
        }

        if !converged {
            warn!(
                passes,
                "generation numbers did not converge; parent data likely contains a cycle"
            );
        }

        let values = family
            .ids()
            .map(|id| (id.to_string(), values.get(id).copied().unwrap_or(1)))
            .collect();

        Self {
            values,
            passes,
            converged,
        }
    }

    /// Generation of `id`, if the person is known.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<u32> {
        self.values.get(id).copied()
    }

    /// All generation numbers keyed by person id.
    #[must_use]
    pub const fn as_map(&self) -> &BTreeMap<String, u32> {
        &self.values
    }

    /// Number of relaxation passes run.
    #[must_use]
    pub const fn passes(&self) -> usize {
        self.passes
    }

    /// `false` when the pass bound was hit before values settled.
    #[must_use]
    pub const fn converged(&self) -> bool {
        self.converged
    }

    /// Person ids grouped by generation, ascending; ids ascending within a
    /// generation.
    #[must_use]
    pub fn groups(&self) -> BTreeMap<u32, Vec<&str>> {
        let mut groups: BTreeMap<u32, Vec<&str>> = BTreeMap::new();
        for (id, &value) in &self.values {
            groups.entry(value).or_default().push(id.as_str());
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, Person, Relationship};

    fn people(ids: &[&str]) -> Vec<Person> {
        ids.iter()
            .map(|id| Person::new(*id, *id, Gender::Other))
            .collect()
    }

    #[test]
    fn three_generations_with_spouse() {
        let family = Family::new(
            people(&["gp", "dad", "mom", "kid"]),
            vec![
                Relationship::parent("r1", "gp", "dad"),
                Relationship::parent("r2", "dad", "kid"),
                Relationship::parent("r3", "mom", "kid"),
                Relationship::spouse("r4", "dad", "mom"),
            ],
        )
        .expect("family");
        let gens = Generations::compute(&family);
        assert!(gens.converged());
        assert_eq!(gens.get("gp"), Some(1));
        assert_eq!(gens.get("dad"), Some(2));
        assert_eq!(gens.get("mom"), Some(2));
        assert_eq!(gens.get("kid"), Some(3));
    }

    #[test]
    fn spouse_sync_feeds_back_into_children() {
        // `mom` marries into generation 2; her child with `dad` must land on 3
        // even though the child's edge from `mom` is listed first.
        let family = Family::new(
            people(&["gp", "dad", "mom", "kid"]),
            vec![
                Relationship::parent("r1", "mom", "kid"),
                Relationship::spouse("r2", "dad", "mom"),
                Relationship::parent("r3", "gp", "dad"),
            ],
        )
        .expect("family");
        let gens = Generations::compute(&family);
        assert_eq!(gens.get("kid"), Some(3));
        assert_eq!(gens.get("mom"), Some(2));
    }

    #[test]
    fn parent_cycle_terminates() {
        let family = Family::new(
            people(&["a", "b"]),
            vec![
                Relationship::parent("r1", "a", "b"),
                Relationship::parent("r2", "b", "a"),
            ],
        )
        .expect("family");
        let gens = Generations::compute(&family);
        assert!(!gens.converged());
        assert_eq!(gens.passes(), 3);
        assert!(gens.get("a").is_some());
        assert!(gens.get("b").is_some());
    }

    #[test]
    fn isolated_people_are_generation_one() {
        let family = Family::new(people(&["solo"]), Vec::new()).expect("family");
        let gens = Generations::compute(&family);
        assert_eq!(gens.get("solo"), Some(1));
        assert_eq!(gens.groups().get(&1), Some(&vec!["solo"]));
        assert_eq!(gens.get("ghost"), None);
    }

    #[test]
    fn spouse_sync_lifts_child_above_its_parent() {
        let family = Family::new(
            people(&["r", "q", "s", "p", "c"]),
            vec![
                Relationship::parent("r1", "r", "q"),
                Relationship::parent("r2", "q", "s"),
                Relationship::parent("r3", "p", "c"),
                Relationship::spouse("r4", "c", "s"),
            ],
        )
        .expect("family");
        let gens = Generations::compute(&family);
        assert!(gens.converged());
        assert_eq!(gens.get("p"), Some(1));
        assert_eq!(gens.get("s"), Some(3));
        assert_eq!(gens.get("c"), Some(3));
    }
}
