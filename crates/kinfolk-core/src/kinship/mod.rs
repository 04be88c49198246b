//! Kinship title resolution.
//!
//! Resolution runs in three stages:
//!
//! 1. [`path`]: depth-bounded BFS from the root over the
//!    [`RelationGraph`](crate::graph::RelationGraph) yields the shortest
//!    typed path to the target.
//! 2. [`classify`]: the path shape (plus birth dates of the people on it) is
//!    matched against the pattern table and becomes a [`Kinship`].
//! 3. [`title`]: the [`Kinship`] is rendered in a [`Locale`].
//!
//! Nothing here fails: unknown ids, unreachable targets, and paths beyond
//! the depth cap all produce an empty title.
//!
//! For many targets against one root, use [`KinshipResolver`], which runs
//! the BFS once and memoizes per target.

pub mod classify;
pub mod path;
pub mod rank;
pub mod title;

use std::collections::HashMap;

use tracing::{debug, instrument};

pub use classify::{CousinLine, Kinship, Partner, Seniority, Sex, Side};
pub use path::{KinPath, PathTree, shortest_path};
pub use rank::BirthRank;
pub use title::{Locale, UnknownLocale};

use crate::config::KinshipConfig;
use crate::family::Family;
use crate::graph::RelationGraph;

/// Structured kinship of `target` as seen from `root`.
///
/// Returns `None` if either id is unknown or no path exists within
/// `config.max_depth` edges.
#[must_use]
#[instrument(skip(family, config))]
pub fn classify(
    family: &Family,
    root: &str,
    target: &str,
    config: &KinshipConfig,
) -> Option<Kinship> {
    let root_person = family.person(root)?;
    let target_person = family.person(target)?;
    if root == target {
        return Some(Kinship::Oneself);
    }

    let graph = RelationGraph::from_family(family);
    let path = shortest_path(
        &graph,
        graph.node_index(root)?,
        graph.node_index(target)?,
        config.max_depth,
    )?;
    debug!(steps = ?path.steps, "found kinship path");
    Some(classify::classify_path(
        family,
        root_person,
        target_person,
        &path,
        config.distant_after,
    ))
}

/// Title of `target` as seen from `root`, or an empty string.
#[must_use]
pub fn resolve_title(family: &Family, root: &str, target: &str, config: &KinshipConfig) -> String {
    classify(family, root, target, config)
        .map(|k| k.title(config.locale))
        .unwrap_or_default()
}

/// Per-root title cache over one family snapshot.
///
/// The BFS tree from the root is built once; each target is classified on
/// first request and memoized. The cache is valid for the `(root,
/// content_hash)` pair returned by [`KinshipResolver::version`].
#[derive(Debug)]
pub struct KinshipResolver<'a> {
    family: &'a Family,
    root: String,
    config: KinshipConfig,
    graph: RelationGraph,
    tree: Option<PathTree>,
    cache: HashMap<String, Option<Kinship>>,
}

impl<'a> KinshipResolver<'a> {
    #[instrument(skip(family, config))]
    pub fn new(family: &'a Family, root: &str, config: KinshipConfig) -> Self {
        let graph = RelationGraph::from_family(family);
        let tree = graph
            .node_index(root)
            .map(|idx| PathTree::explore(&graph, idx, config.max_depth));
        debug!(
            reached = tree.as_ref().map_or(0, PathTree::reached),
            "explored kinship tree"
        );
        Self {
            family,
            root: root.to_string(),
            config,
            graph,
            tree,
            cache: HashMap::new(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    #[must_use]
    pub const fn config(&self) -> &KinshipConfig {
        &self.config
    }

    /// `(root id, content hash)` this resolver's answers are valid for.
    #[must_use]
    pub fn version(&self) -> (&str, &str) {
        (&self.root, &self.graph.content_hash)
    }

    /// `true` if `family` still has the content this resolver was built on.
    #[must_use]
    pub fn is_current(&self, family: &Family) -> bool {
        family.content_hash() == self.graph.content_hash
    }

    /// Structured kinship of `target`, memoized.
    pub fn classify(&mut self, target: &str) -> Option<Kinship> {
        if let Some(cached) = self.cache.get(target) {
            return *cached;
        }
        let result = self.compute(target);
        self.cache.insert(target.to_string(), result);
        result
    }

    /// Title of `target` in the configured locale, or an empty string.
    pub fn title(&mut self, target: &str) -> String {
        let locale = self.config.locale;
        self.classify(target)
            .map(|k| k.title(locale))
            .unwrap_or_default()
    }

    /// Number of memoized targets.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    fn compute(&self, target: &str) -> Option<Kinship> {
        let root_person = self.family.person(&self.root)?;
        let target_person = self.family.person(target)?;
        if self.root == target {
            return Some(Kinship::Oneself);
        }
        let idx = self.graph.node_index(target)?;
        let path = self.tree.as_ref()?.path_to(&self.graph, idx)?;
        Some(classify::classify_path(
            self.family,
            root_person,
            target_person,
            &path,
            self.config.distant_after,
        ))
    }
}
