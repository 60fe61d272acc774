use crate::error::{Error, Result, MAX_ENCODABLE};
use crate::geometry::Aabb;
use bytemuck::{Pod, Zeroable};
use glam::{Vec4, Vec4Swizzles};
use std::mem::size_of;

/// `min_bounds.w` of a leaf.
pub const LEAF_FLAG: f32 = -1.0;

/// Position of a node in the flat, pre-order node array. Node 0 is the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Offset into the reordered index buffer of the first of a triangle's
/// three entries (`triangle * 3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TriangleHandle(pub u32);

impl TriangleHandle {
    pub fn from_triangle(triangle: usize) -> Self {
        Self((triangle * 3) as u32)
    }
    pub fn offset(self) -> usize {
        self.0 as usize
    }
    pub fn triangle(self) -> usize {
        self.offset() / 3
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node {
    Leaf {
        bounds: Aabb,
        triangle: TriangleHandle,
    },
    Internal {
        bounds: Aabb,
        left: NodeId,
        right: NodeId,
    },
}

impl Node {
    pub fn bounds(&self) -> &Aabb {
        match self {
            Node::Leaf { bounds, .. } | Node::Internal { bounds, .. } => bounds,
        }
    }
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        match *self {
            Node::Internal { left, right, .. } => Some((left, right)),
            Node::Leaf { .. } => None,
        }
    }
}

/// Packed node as read by the traversal shader.
///
/// `min_bounds.w` is the left child index, or `-1` for a leaf.
/// `max_bounds.w` is the right child index, or the leaf's triangle offset
/// into the index buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuNode {
    pub min_bounds: Vec4,
    pub max_bounds: Vec4,
}

const _: () = assert!(size_of::<GpuNode>() == 32);

impl GpuNode {
    pub fn is_leaf(&self) -> bool {
        self.min_bounds.w == LEAF_FLAG
    }
}

impl From<&Node> for GpuNode {
    fn from(node: &Node) -> Self {
        let (bounds, min_w, max_w) = match *node {
            Node::Leaf { bounds, triangle } => (bounds, LEAF_FLAG, triangle.0 as f32),
            Node::Internal {
                bounds,
                left,
                right,
            } => (bounds, left.0 as f32, right.0 as f32),
        };
        Self {
            min_bounds: bounds.min.extend(min_w),
            max_bounds: bounds.max.extend(max_w),
        }
    }
}

fn decode_index(w: f32) -> Result<u32> {
    if w >= 0.0 && w.fract() == 0.0 && w < MAX_ENCODABLE as f32 {
        Ok(w as u32)
    } else {
        Err(Error::InvalidInput(format!("{w} is not a packed node index")))
    }
}

impl TryFrom<GpuNode> for Node {
    type Error = Error;

    fn try_from(node: GpuNode) -> Result<Self> {
        let bounds = Aabb::new(node.min_bounds.xyz(), node.max_bounds.xyz());
        let right = decode_index(node.max_bounds.w)?;
        if node.is_leaf() {
            if right % 3 != 0 {
                return Err(Error::InvalidInput(format!(
                    "leaf offset {right} is not a triangle boundary"
                )));
            }
            return Ok(Node::Leaf {
                bounds,
                triangle: TriangleHandle(right),
            });
        }
        Ok(Node::Internal {
            bounds,
            left: NodeId(decode_index(node.min_bounds.w)?),
            right: NodeId(right),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn unit() -> Aabb {
        Aabb::new(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(1.0, 3.0, 4.0))
    }

    #[test]
    fn leaf_layout() {
        let node = Node::Leaf {
            bounds: unit(),
            triangle: TriangleHandle::from_triangle(5),
        };
        let gpu = GpuNode::from(&node);
        assert!(gpu.is_leaf());
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&gpu));
        assert_eq!(floats, &[-1.0, 0.0, 2.0, -1.0, 1.0, 3.0, 4.0, 15.0]);
        assert_eq!(Node::try_from(gpu).unwrap(), node);
    }

    #[test]
    fn internal_layout() {
        let node = Node::Internal {
            bounds: unit(),
            left: NodeId(1),
            right: NodeId(6),
        };
        let gpu = GpuNode::from(&node);
        assert!(!gpu.is_leaf());
        assert_eq!(gpu.min_bounds.w, 1.0);
        assert_eq!(gpu.max_bounds.w, 6.0);
        let bytes: &[u8] = bytemuck::bytes_of(&gpu);
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[12..16], &1.0f32.to_le_bytes());
        assert_eq!(Node::try_from(gpu).unwrap(), node);
    }

    #[test]
    fn rejects_fractional_indices() {
        let mut gpu = GpuNode::from(&Node::Internal {
            bounds: unit(),
            left: NodeId(1),
            right: NodeId(2),
        });
        gpu.max_bounds.w = 2.5;
        assert!(Node::try_from(gpu).is_err());
        gpu.max_bounds.w = 2.0;
        gpu.min_bounds.w = -3.0;
        assert!(Node::try_from(gpu).is_err());
    }

    #[test]
    fn rejects_misaligned_leaf_offset() {
        let gpu = GpuNode {
            min_bounds: Vec4::new(0.0, 0.0, 0.0, LEAF_FLAG),
            max_bounds: Vec4::new(1.0, 1.0, 1.0, 4.0),
        };
        assert!(Node::try_from(gpu).is_err());
    }
}
