mod node;
mod partition;
mod tree;
mod triangle;
pub use node::{GpuNode, Node, NodeId, TriangleHandle, LEAF_FLAG};
pub use partition::split_axis;
pub use tree::{Tree, TreeStats};
