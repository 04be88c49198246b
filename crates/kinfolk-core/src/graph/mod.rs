//! Derived graph structures over a [`crate::family::Family`] snapshot.
//!
//! - [`build`]: typed bidirectional adjacency used by kinship traversal.
//! - [`generation`]: bounded fixed-point generation numbering.

pub mod build;
pub mod generation;

pub use build::{RelationGraph, Step};
pub use generation::Generations;
