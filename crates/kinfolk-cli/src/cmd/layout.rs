//! `kin layout` — diagram graph and the layered-layout request for it.

use crate::cmd::{pick_root, require_person};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};
use clap::Args;
use kinfolk_core::Family;
use kinfolk_core::config::ProjectConfig;
use kinfolk_layout::{LayoutGraph, LayoutNode, LayoutOptions, LayoutRequest, build_layout};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Args, Debug)]
#[command(
    about = "Build the family diagram graph",
    long_about = "Build person, union-anchor, and marriage-group nodes with spouse and lineage \
                  edges, plus the top-level request handed to a layered layout engine.",
    after_help = "EXAMPLES:\n    # Summary of the diagram\n    kin layout\n\n\
                  # Highlight one person and add titles from the root\n    kin layout --highlight bob --root alice\n\n\
                  # Full graph for a renderer\n    kin layout --json"
)]
pub struct LayoutArgs {
    /// Person to mark with the highlight hint.
    #[arg(long)]
    pub highlight: Option<String>,

    /// Perspective for per-node titles; defaults to the family file's root.
    #[arg(long)]
    pub root: Option<String>,

    /// Omit per-node titles even when a root is known.
    #[arg(long)]
    pub no_titles: bool,
}

/// JSON shape of `kin layout`.
#[derive(Debug, Serialize)]
pub struct LayoutOutput {
    pub graph: LayoutGraph,
    pub request: LayoutRequest,
}

/// Execute `kin layout`.
///
/// # Errors
///
/// Returns an error if a named person is unknown or output fails.
pub fn run_layout(
    args: &LayoutArgs,
    family: &Family,
    config: &ProjectConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    if let Some(id) = args.highlight.as_deref() {
        require_person(family, id, output)?;
    }
    let root = if args.no_titles {
        None
    } else {
        pick_root(family, args.root.as_deref(), output)?
    };

    let options = LayoutOptions {
        highlight: args.highlight.clone(),
        root: root.map(str::to_string),
        kinship: config.kinship.clone(),
    };
    let graph = build_layout(family, &config.layout, &options);
    let request = LayoutRequest::from_graph(&graph, &config.layout);

    render_mode(
        output,
        &LayoutOutput { graph, request },
        render_text,
        render_pretty,
    )
}

const fn node_kind(node: &LayoutNode) -> &'static str {
    match node {
        LayoutNode::Person(_) => "person",
        LayoutNode::UnionAnchor(_) => "union_anchor",
        LayoutNode::Group(_) => "group",
    }
}

fn render_text(result: &LayoutOutput, w: &mut dyn Write) -> io::Result<()> {
    for node in &result.graph.nodes {
        let position = node.position();
        let size = node.size();
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            node_kind(node),
            node.id(),
            node.parent().unwrap_or("-"),
            position.x,
            position.y,
            size.width,
            size.height,
        )?;
    }
    for edge in &result.graph.edges {
        writeln!(
            w,
            "edge\t{}\t{}\t{}\t{}",
            edge.id, edge.source, edge.target, edge.weight
        )?;
    }
    Ok(())
}

fn render_pretty(result: &LayoutOutput, w: &mut dyn Write) -> io::Result<()> {
    let graph = &result.graph;
    pretty_section(w, "Diagram")?;
    pretty_kv(w, "People", graph.people().count().to_string())?;
    pretty_kv(w, "Groups", graph.groups().count().to_string())?;
    pretty_kv(w, "Unions", graph.union_anchors().count().to_string())?;
    pretty_kv(w, "Edges", graph.edges.len().to_string())?;
    writeln!(w)?;

    pretty_section(w, "Layered request")?;
    for node in &result.request.nodes {
        writeln!(w, "  {:<24} {} x {}", node.id, node.width, node.height)?;
    }
    for edge in &result.request.edges {
        writeln!(w, "  {} -> {} (weight {})", edge.source, edge.target, edge.weight)?;
    }
    Ok(())
}
