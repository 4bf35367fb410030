//! Minimal scene graph the framing code measures.
//!
//! Nodes live in a flat arena addressed by [`NodeId`]. Each node carries a
//! local [`Transform`], a cached world matrix, and an optional
//! "exclude from bounding box" override used to keep ground planes and
//! markers out of framing calculations.

mod bounds;
mod graph;
mod node;

pub use bounds::{Aabb, BoundingSphere};
pub use graph::{SceneGraph, DEFAULT_MAX_DEPTH};
pub use node::{Node, NodeId, NodeKind, Transform};
