//! Builds a binary bounding volume hierarchy over an indexed triangle mesh
//! and packs it into the 32-byte node records a GPU traversal shader reads.

mod app;
pub mod bvh;
mod config;
mod error;
pub mod geometry;

pub use app::App;
pub use bvh::{GpuNode, Node, NodeId, Tree, TreeStats, TriangleHandle};
pub use config::Config;
pub use error::{Error, Result};
pub use geometry::{Aabb, Mesh};
