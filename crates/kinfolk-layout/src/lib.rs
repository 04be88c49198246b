//! kinfolk-layout library.
//!
//! Turns a family snapshot into a diagram graph: marriage clusters become
//! group containers, each spouse pair gets a union anchor, and children
//! hang from their parents' anchor. Positioning is delegated to an external
//! layered-DAG routine through [`position::LayeredLayout`].

#![forbid(unsafe_code)]

pub mod build;
pub mod cluster;
pub mod node;
pub mod position;

pub use build::{LayoutOptions, build_layout};
pub use cluster::MarriageClusters;
pub use node::{LayoutEdge, LayoutGraph, LayoutNode, Point, Size, UnionVariant};
pub use position::{LayeredLayout, LayoutRequest, apply_layout, layout_with};
