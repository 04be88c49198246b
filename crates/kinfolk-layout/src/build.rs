//! Layout graph construction.
//!
//! For each marriage cluster a group container is emitted, sized to hold
//! one fixed-width slot per member, with
//!
//! - one person node per member at slot `i`:
//!   `x = i * slot + (slot - member) / 2 + padding`, `y = member_top`;
//! - one union anchor per actual spouse pair, at
//!   `x = (x_u + x_v) / 2 + (member - anchor) / 2`, `y = anchor_top`;
//! - one spouse edge per pair, left member to right member.
//!
//! People without a spouse become ungrouped person nodes. Each parent link
//! then becomes a lineage edge into the child, sourced from the union
//! anchor of the parent and a co-parent who is also the parent's spouse, or
//! from the parent alone when there is no such co-parent. Lineage edges are
//! keyed by `(source, child)`, so both parents of a couple yield one edge.

use std::collections::{BTreeSet, HashMap, HashSet};

use kinfolk_core::config::{KinshipConfig, LayoutConfig};
use kinfolk_core::{Family, KinshipResolver};
use tracing::{debug, instrument};

use crate::cluster::MarriageClusters;
use crate::node::{
    EdgeKind, GroupContainerNode, Handle, LayoutEdge, LayoutGraph, LayoutNode, PersonNode, Point,
    Size, UnionAnchorNode, UnionVariant,
};

/// Per-render options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Person to flag with the highlight hint.
    pub highlight: Option<String>,
    /// Perspective for per-node kinship titles; no titles when unset.
    pub root: Option<String>,
    pub kinship: KinshipConfig,
}

/// Escape a person id for use as one `_`-separated part of a derived id.
///
/// `~` becomes `~~` and `_` becomes `~u`, so an escaped part never contains
/// `_` and ids without either character pass through unchanged.
#[must_use]
pub fn id_part(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    for c in id.chars() {
        match c {
            '~' => out.push_str("~~"),
            '_' => out.push_str("~u"),
            _ => out.push(c),
        }
    }
    out
}

#[must_use]
pub fn group_id(members: &[String]) -> String {
    let parts: Vec<String> = members.iter().map(|m| id_part(m.as_str())).collect();
    format!("group_{}", parts.join("_"))
}

/// Anchor id of the pair; argument order does not matter.
#[must_use]
pub fn union_id(a: &str, b: &str) -> String {
    let (u, v) = if a <= b { (a, b) } else { (b, a) };
    format!("union_{}_{}", id_part(u), id_part(v))
}

#[must_use]
pub fn spouse_edge_id(a: &str, b: &str) -> String {
    let (u, v) = if a <= b { (a, b) } else { (b, a) };
    format!("spouse_{}_{}", id_part(u), id_part(v))
}

/// Lineage edge id from a source node id (person or union anchor) to a child.
///
/// The child part is escaped, so the last `_` always separates the two.
#[must_use]
pub fn lineage_edge_id(source: &str, child: &str) -> String {
    format!("lineage_{source}_{}", id_part(child))
}

/// Relative x of the person in slot `index` of a group.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn slot_x(index: usize, config: &LayoutConfig) -> f64 {
    (index as f64).mul_add(
        config.slot_width,
        (config.slot_width - config.member_width) / 2.0 + config.group_padding,
    )
}

/// Relative x of the anchor between members at `x_u` and `x_v`.
#[must_use]
pub fn anchor_x(x_u: f64, x_v: f64, config: &LayoutConfig) -> f64 {
    (x_u + x_v) / 2.0 + (config.member_width - config.anchor_width) / 2.0
}

/// Build the layout graph for `family`.
#[must_use]
#[instrument(skip_all, fields(people = family.len()))]
pub fn build_layout(family: &Family, config: &LayoutConfig, options: &LayoutOptions) -> LayoutGraph {
    let clusters = MarriageClusters::detect(family);
    let mut resolver = options
        .root
        .as_deref()
        .map(|root| KinshipResolver::new(family, root, options.kinship.clone()));
    let mut person_node = |id: &str, group: Option<String>, position: Point, size: Size| {
        let person = family.person(id)?;
        Some(LayoutNode::Person(PersonNode {
            id: id.to_string(),
            group,
            position,
            size,
            name: person.display_name(),
            gender: person.gender,
            deceased: person.is_deceased(),
            highlighted: options.highlight.as_deref() == Some(id),
            title: resolver.as_mut().map(|r| r.title(id)),
        }))
    };

    let mut graph = LayoutGraph::default();
    let mut variants: HashMap<(&str, &str), UnionVariant> = HashMap::new();

    for (ci, members) in clusters.clusters().iter().enumerate() {
        let gid = group_id(members);
        #[allow(clippy::cast_precision_loss)]
        let width = config.slot_width * members.len() as f64;
        graph.nodes.push(LayoutNode::Group(GroupContainerNode {
            id: gid.clone(),
            members: members.clone(),
            position: Point::default(),
            size: Size::new(width, config.group_height),
        }));

        let slots: HashMap<&str, usize> = members
            .iter()
            .enumerate()
            .map(|(i, m)| (m.as_str(), i))
            .collect();
        for (i, member) in members.iter().enumerate() {
            graph.nodes.extend(person_node(
                member,
                Some(gid.clone()),
                Point::new(slot_x(i, config), config.member_top),
                Size::new(config.member_width, config.member_width),
            ));
        }

        for (u, v) in clusters.pairs_in(ci) {
            let (Some(&iu), Some(&iv)) = (slots.get(u), slots.get(v)) else {
                continue;
            };
            let deceased = |id: &str| family.person(id).is_some_and(|p| p.is_deceased());
            let variant = UnionVariant::from_deceased(deceased(u), deceased(v));
            variants.insert((u, v), variant);

            graph.nodes.push(LayoutNode::UnionAnchor(UnionAnchorNode {
                id: union_id(u, v),
                group: gid.clone(),
                spouses: (u.to_string(), v.to_string()),
                position: Point::new(
                    anchor_x(slot_x(iu, config), slot_x(iv, config), config),
                    config.anchor_top,
                ),
                size: Size::new(config.anchor_width, config.anchor_width),
                variant,
            }));

            let (left, right) = if iu <= iv { (u, v) } else { (v, u) };
            let dashed = variant == UnionVariant::Deceased;
            graph.edges.push(LayoutEdge {
                id: spouse_edge_id(u, v),
                source: left.to_string(),
                target: right.to_string(),
                kind: EdgeKind::Spouse,
                source_handle: Handle::Right,
                target_handle: Handle::Left,
                dashed,
                animated: false,
                weight: config.spouse_weight,
            });
        }
    }

    for id in family.ids() {
        if clusters.cluster_index(id).is_none() {
            graph.nodes.extend(person_node(
                id,
                None,
                Point::default(),
                Size::new(config.node_width, config.node_height),
            ));
        }
    }

    let mut seen: HashSet<(String, String)> = HashSet::new();
    for rel in family.parent_links() {
        let (parent, child) = (rel.source.as_str(), rel.target.as_str());
        if parent == child {
            continue;
        }

        let co_parents: BTreeSet<&str> = family
            .parents_of(child)
            .filter(|other| *other != parent)
            .collect();
        let couple = co_parents
            .into_iter()
            .find(|other| clusters.are_spouses(parent, other))
            .map(|other| if parent <= other { (parent, other) } else { (other, parent) });

        let (source, dashed) = match couple {
            Some((u, v)) => (
                union_id(u, v),
                variants.get(&(u, v)) == Some(&UnionVariant::Deceased),
            ),
            None => (
                parent.to_string(),
                family.person(parent).is_some_and(|p| p.is_deceased()),
            ),
        };

        if !seen.insert((source.clone(), child.to_string())) {
            continue;
        }
        graph.edges.push(LayoutEdge {
            id: lineage_edge_id(&source, child),
            source,
            target: child.to_string(),
            kind: EdgeKind::Lineage,
            source_handle: Handle::Bottom,
            target_handle: Handle::Top,
            dashed,
            animated: !dashed,
            weight: config.lineage_weight,
        });
    }

    debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        clusters = clusters.len(),
        "built layout graph"
    );
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kinfolk_core::model::{Gender, Person, Relationship};

    fn dead(p: Person) -> Person {
        p.with_death_date(NaiveDate::from_ymd_opt(2001, 1, 1).expect("date"))
    }

    #[test]
    fn slot_and_anchor_geometry() {
        let config = LayoutConfig::default();
        assert!((slot_x(0, &config) - 50.0).abs() < f64::EPSILON);
        assert!((slot_x(1, &config) - 230.0).abs() < f64::EPSILON);
        assert!((anchor_x(50.0, 230.0, &config) - 184.0).abs() < f64::EPSILON);
        assert_eq!(union_id("b", "a"), "union_a_b");
    }

    #[test]
    fn derived_ids_stay_distinct_for_underscored_person_ids() {
        assert_ne!(
            group_id(&["a_b".into(), "c".into()]),
            group_id(&["a".into(), "b_c".into()])
        );
        assert_ne!(union_id("a_b", "c"), union_id("a", "b_c"));
        assert_ne!(spouse_edge_id("a_b", "c"), spouse_edge_id("a", "b_c"));
        assert_eq!(id_part("x~_y"), "x~~~uy");
    }

    #[test]
    fn underscored_parent_links_keep_separate_lineage_edges() {
        let family = Family::new(
            [
                Person::new("x", "X", Gender::Male),
                Person::new("x_1", "X1", Gender::Male),
                Person::new("1_y", "1Y", Gender::Female),
                Person::new("y", "Y", Gender::Female),
            ],
            vec![
                Relationship::parent("p1", "x", "1_y"),
                Relationship::parent("p2", "x_1", "y"),
            ],
        )
        .expect("family");
        let graph = build_layout(&family, &LayoutConfig::default(), &LayoutOptions::default());
        let mut lineage: Vec<(&str, &str, &str)> = graph
            .edges
            .iter()
            .filter(|e| e.kind == EdgeKind::Lineage)
            .map(|e| (e.id.as_str(), e.source.as_str(), e.target.as_str()))
            .collect();
        lineage.sort_unstable();
        assert_eq!(
            lineage,
            vec![
                ("lineage_x_1_y", "x_1", "y"),
                ("lineage_x_1~uy", "x", "1_y"),
            ]
        );
    }

    #[test]
    fn couple_with_child() {
        let family = Family::new(
            [
                Person::new("mom", "Mom", Gender::Female),
                Person::new("dad", "Dad", Gender::Male),
                Person::new("kid", "Kid", Gender::Male),
            ],
            vec![
                Relationship::spouse("s1", "mom", "dad"),
                Relationship::parent("p1", "dad", "kid"),
                Relationship::parent("p2", "mom", "kid"),
            ],
        )
        .expect("family");
        let graph = build_layout(&family, &LayoutConfig::default(), &LayoutOptions::default());

        let group = graph.node("group_dad_mom").expect("group");
        assert!((group.size().width - 360.0).abs() < f64::EPSILON);
        assert_eq!(graph.union_anchors().count(), 1);

        let spouse = graph.edge("spouse_dad_mom").expect("spouse edge");
        assert_eq!((spouse.source.as_str(), spouse.target.as_str()), ("dad", "mom"));
        assert!(!spouse.animated);

        let lineage: Vec<&LayoutEdge> = graph
            .edges
            .iter()
            .filter(|e| e.kind == EdgeKind::Lineage)
            .collect();
        assert_eq!(lineage.len(), 1);
        assert_eq!(lineage[0].id, "lineage_union_dad_mom_kid");
        assert!(lineage[0].animated && !lineage[0].dashed);

        let kid = graph.node("kid").expect("kid");
        assert!(kid.is_top_level());
        assert!((kid.size().width - 220.0).abs() < f64::EPSILON);
    }

    #[test]
    fn single_parent_routes_directly_and_dashes_when_deceased() {
        let family = Family::new(
            [
                dead(Person::new("gran", "Gran", Gender::Female)),
                Person::new("kid", "Kid", Gender::Female),
            ],
            vec![Relationship::parent("p1", "gran", "kid")],
        )
        .expect("family");
        let graph = build_layout(&family, &LayoutConfig::default(), &LayoutOptions::default());
        let edge = graph.edge("lineage_gran_kid").expect("edge");
        assert!(edge.dashed);
        assert!(!edge.animated);
    }

    #[test]
    fn unmarried_co_parents_do_not_share_an_anchor() {
        let family = Family::new(
            [
                Person::new("a", "A", Gender::Male),
                Person::new("b", "B", Gender::Female),
                Person::new("kid", "Kid", Gender::Female),
            ],
            vec![
                Relationship::parent("p1", "a", "kid"),
                Relationship::parent("p2", "b", "kid"),
            ],
        )
        .expect("family");
        let graph = build_layout(&family, &LayoutConfig::default(), &LayoutOptions::default());
        assert!(graph.edge("lineage_a_kid").is_some());
        assert!(graph.edge("lineage_b_kid").is_some());
        assert_eq!(graph.union_anchors().count(), 0);
    }

    #[test]
    fn anchor_variants_follow_deceased_spouses() {
        let family = Family::new(
            [
                dead(Person::new("a", "A", Gender::Male)),
                Person::new("b", "B", Gender::Female).with_status("殁"),
                Person::new("c", "C", Gender::Male),
                Person::new("kid", "Kid", Gender::Male),
            ],
            vec![
                Relationship::spouse("s1", "a", "b"),
                Relationship::spouse("s2", "b", "c"),
                Relationship::parent("p1", "a", "kid"),
                Relationship::parent("p2", "b", "kid"),
            ],
        )
        .expect("family");
        let graph = build_layout(&family, &LayoutConfig::default(), &LayoutOptions::default());
        let variants: Vec<(String, UnionVariant)> = graph
            .union_anchors()
            .map(|a| (a.id.clone(), a.variant))
            .collect();
        assert_eq!(
            variants,
            vec![
                ("union_a_b".to_string(), UnionVariant::Deceased),
                ("union_b_c".to_string(), UnionVariant::Widowed),
            ]
        );
        assert!(graph.edge("spouse_a_b").is_some_and(|e| e.dashed));
        let lineage = graph.edge("lineage_union_a_b_kid").expect("lineage");
        assert!(lineage.dashed);
    }

    #[test]
    fn highlight_and_titles() {
        let family = Family::new(
            [
                Person::new("dad", "Dad", Gender::Male),
                Person::new("kid", "Kid", Gender::Female),
            ],
            vec![Relationship::parent("p1", "dad", "kid")],
        )
        .expect("family");
        let options = LayoutOptions {
            highlight: Some("kid".into()),
            root: Some("kid".into()),
            kinship: KinshipConfig::default(),
        };
        let graph = build_layout(&family, &LayoutConfig::default(), &options);
        let people: Vec<(&str, bool, Option<&str>)> = graph
            .people()
            .map(|p| (p.id.as_str(), p.highlighted, p.title.as_deref()))
            .collect();
        assert_eq!(
            people,
            vec![("dad", false, Some("爸爸")), ("kid", true, Some("本人"))]
        );
    }
}
