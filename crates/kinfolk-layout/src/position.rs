//! Hand-off to an external layered-DAG positioning routine.
//!
//! The routine only sees top-level nodes (group containers and ungrouped
//! people). Edges touching grouped nodes are remapped to their containers;
//! edges that end up inside a single container are dropped, and parallel
//! edges are merged keeping the highest weight. The routine returns center
//! coordinates, which [`apply_layout`] turns into top-left positions.
//! Grouped nodes keep their positions relative to their container.

use std::collections::{BTreeMap, HashMap};

use anyhow::{Context, Result};
use kinfolk_core::config::LayoutConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::node::{LayoutGraph, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RankDir {
    /// Ranks run top to bottom.
    Tb,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutSettings {
    pub rank_dir: RankDir,
    pub node_sep: f64,
    pub rank_sep: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestNode {
    pub id: String,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestEdge {
    pub source: String,
    pub target: String,
    pub weight: u32,
}

/// Input for a [`LayeredLayout`] routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRequest {
    pub settings: LayoutSettings,
    pub nodes: Vec<RequestNode>,
    /// Sorted by `(source, target)`.
    pub edges: Vec<RequestEdge>,
}

impl LayoutRequest {
    #[must_use]
    #[instrument(skip_all, fields(nodes = graph.nodes.len(), edges = graph.edges.len()))]
    pub fn from_graph(graph: &LayoutGraph, config: &LayoutConfig) -> Self {
        let nodes: Vec<RequestNode> = graph
            .nodes
            .iter()
            .filter(|n| n.is_top_level())
            .map(|n| {
                let size = n.size();
                RequestNode {
                    id: n.id().to_string(),
                    width: size.width,
                    height: size.height,
                }
            })
            .collect();

        let mut merged: BTreeMap<(&str, &str), u32> = BTreeMap::new();
        for edge in &graph.edges {
            let source = graph.top_level_of(&edge.source);
            let target = graph.top_level_of(&edge.target);
            if source == target {
                continue;
            }
            let weight = merged.entry((source, target)).or_insert(0);
            *weight = (*weight).max(edge.weight);
        }

        let edges = merged
            .into_iter()
            .map(|((source, target), weight)| RequestEdge {
                source: source.to_string(),
                target: target.to_string(),
                weight,
            })
            .collect();

        Self {
            settings: LayoutSettings {
                rank_dir: RankDir::Tb,
                node_sep: config.node_sep,
                rank_sep: config.rank_sep,
            },
            nodes,
            edges,
        }
    }
}

/// External positioning routine.
pub trait LayeredLayout {
    /// Center coordinates per top-level node id.
    ///
    /// # Errors
    ///
    /// Whatever the routine reports; nothing is applied on failure.
    fn place(&self, request: &LayoutRequest) -> Result<HashMap<String, Point>>;
}

/// Move top-level nodes to the placed centers, converted to top-left.
///
/// Grouped nodes and nodes absent from `centers` are left unchanged.
/// Returns the number of nodes moved.
pub fn apply_layout(graph: &mut LayoutGraph, centers: &HashMap<String, Point>) -> usize {
    let mut moved = 0;
    for node in graph.nodes.iter_mut().filter(|n| n.is_top_level()) {
        let Some(center) = centers.get(node.id()) else {
            continue;
        };
        let size = node.size();
        node.set_position(Point::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
        ));
        moved += 1;
    }
    moved
}

/// Build the request, run `engine`, and apply its placements.
///
/// # Errors
///
/// Returns the engine's error with context.
pub fn layout_with(
    graph: &mut LayoutGraph,
    config: &LayoutConfig,
    engine: &dyn LayeredLayout,
) -> Result<()> {
    let request = LayoutRequest::from_graph(graph, config);
    let centers = engine
        .place(&request)
        .context("layered layout routine failed")?;
    let moved = apply_layout(graph, &centers);
    if moved < request.nodes.len() {
        warn!(
            placed = moved,
            expected = request.nodes.len(),
            "layout routine omitted some nodes"
        );
    }
    debug!(moved, "applied layered layout");
    Ok(())
}
