//! Layout graph payload: a tagged union of node variants and typed edges.
//!
//! Every node exposes the same narrow contract ([`LayoutNode::id`],
//! [`LayoutNode::size`], [`LayoutNode::position`], [`LayoutNode::parent`])
//! for the positioning step. Variant fields carry the renderer hints.
//! Positions of grouped nodes are relative to their group container.

use kinfolk_core::model::Gender;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Visual state of a marriage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnionVariant {
    /// Both spouses living.
    Active,
    /// Exactly one spouse deceased.
    Widowed,
    /// Both spouses deceased.
    Deceased,
}

impl UnionVariant {
    #[must_use]
    pub const fn from_deceased(a: bool, b: bool) -> Self {
        match (a, b) {
            (true, true) => Self::Deceased,
            (false, false) => Self::Active,
            _ => Self::Widowed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonNode {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub position: Point,
    pub size: Size,
    pub name: String,
    pub gender: Gender,
    pub deceased: bool,
    pub highlighted: bool,
    /// Kinship title relative to the layout root, when one was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Marriage point of one specific spouse pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionAnchorNode {
    pub id: String,
    pub group: String,
    /// `(lower id, higher id)`.
    pub spouses: (String, String),
    pub position: Point,
    pub size: Size,
    pub variant: UnionVariant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupContainerNode {
    pub id: String,
    /// Members ascending, matching their slot order.
    pub members: Vec<String>,
    pub position: Point,
    pub size: Size,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayoutNode {
    Person(PersonNode),
    UnionAnchor(UnionAnchorNode),
    Group(GroupContainerNode),
}

impl LayoutNode {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Person(n) => &n.id,
            Self::UnionAnchor(n) => &n.id,
            Self::Group(n) => &n.id,
        }
    }

    /// Container this node sits in, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        match self {
            Self::Person(n) => n.group.as_deref(),
            Self::UnionAnchor(n) => Some(&n.group),
            Self::Group(_) => None,
        }
    }

    #[must_use]
    pub const fn size(&self) -> Size {
        match self {
            Self::Person(n) => n.size,
            Self::UnionAnchor(n) => n.size,
            Self::Group(n) => n.size,
        }
    }

    #[must_use]
    pub const fn position(&self) -> Point {
        match self {
            Self::Person(n) => n.position,
            Self::UnionAnchor(n) => n.position,
            Self::Group(n) => n.position,
        }
    }

    pub const fn set_position(&mut self, position: Point) {
        match self {
            Self::Person(n) => n.position = position,
            Self::UnionAnchor(n) => n.position = position,
            Self::Group(n) => n.position = position,
        }
    }

    #[must_use]
    pub const fn is_top_level(&self) -> bool {
        match self {
            Self::Person(n) => n.group.is_none(),
            Self::UnionAnchor(_) => false,
            Self::Group(_) => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Between two spouses, drawn straight.
    Spouse,
    /// From a parent or union anchor down to a child.
    Lineage,
}

/// Connection point on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    pub source_handle: Handle,
    pub target_handle: Handle,
    /// Render dashed and faded.
    pub dashed: bool,
    pub animated: bool,
    /// Layered-layout weight hint.
    pub weight: u32,
}

/// Nodes and edges ready for positioning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutGraph {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
}

impl LayoutGraph {
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    #[must_use]
    pub fn edge(&self, id: &str) -> Option<&LayoutEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn union_anchors(&self) -> impl Iterator<Item = &UnionAnchorNode> {
        self.nodes.iter().filter_map(|n| match n {
            LayoutNode::UnionAnchor(a) => Some(a),
            _ => None,
        })
    }

    pub fn groups(&self) -> impl Iterator<Item = &GroupContainerNode> {
        self.nodes.iter().filter_map(|n| match n {
            LayoutNode::Group(g) => Some(g),
            _ => None,
        })
    }

    pub fn people(&self) -> impl Iterator<Item = &PersonNode> {
        self.nodes.iter().filter_map(|n| match n {
            LayoutNode::Person(p) => Some(p),
            _ => None,
        })
    }

    /// Id of the top-level node containing `id` (itself when ungrouped).
    #[must_use]
    pub fn top_level_of<'a>(&'a self, id: &'a str) -> &'a str {
        self.node(id).and_then(LayoutNode::parent).unwrap_or(id)
    }
}
