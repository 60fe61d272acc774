use crate::bvh::node::{GpuNode, Node, NodeId, TriangleHandle};
use crate::bvh::partition::partition;
use crate::bvh::triangle::Triangles;
use crate::error::{Error, Result, MAX_ENCODABLE};
use crate::geometry::Mesh;
use glam::Vec3;
use std::collections::VecDeque;
use std::ops::Range;

/// Binary BVH over a triangle mesh, one triangle per leaf.
///
/// Nodes are stored in pre-order: a parent precedes both children and the
/// left subtree occupies the block directly after its parent. Leaves address
/// the reordered `indices`, which travel with the nodes so the two can never
/// disagree.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    indices: Vec<u32>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    pub nodes: usize,
    pub leaves: usize,
    /// Edges on the longest root-to-leaf path.
    pub max_depth: usize,
}

impl TryFrom<Mesh> for Tree {
    type Error = Error;

    fn try_from(mesh: Mesh) -> Result<Self> {
        Self::build(&mesh.positions, mesh.indices)
    }
}

impl Tree {
    /// Builds the hierarchy, taking ownership of `indices` and returning them
    /// reordered so that leaf triangle handles address them directly.
    pub fn build(vertices: &[f32], mut indices: Vec<u32>) -> Result<Self> {
        validate(vertices, &indices)?;
        let n = indices.len() / 3;
        let nodes = {
            let mut builder = Builder {
                tris: Triangles::new(vertices, &mut indices),
                nodes: Vec::with_capacity(2 * n - 1),
            };
            builder.build(0..n);
            builder.nodes
        };
        debug_assert_eq!(nodes.len(), 2 * n - 1);
        if nodes[0].bounds().extent() == Vec3::ZERO {
            log::warn!("all {n} triangles collapse to a single point");
        }
        log::debug!("built bvh: {} triangles, {} nodes", n, nodes.len());
        Ok(Self { nodes, indices })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }
    pub fn root(&self) -> &Node {
        &self.nodes[0]
    }
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
    /// Vertex indices of the triangle a leaf points at.
    pub fn triangle(&self, handle: TriangleHandle) -> [u32; 3] {
        let i = handle.offset();
        [self.indices[i], self.indices[i + 1], self.indices[i + 2]]
    }
    pub fn into_parts(self) -> (Vec<Node>, Vec<u32>) {
        (self.nodes, self.indices)
    }

    pub fn to_gpu(&self) -> Vec<GpuNode> {
        self.nodes.iter().map(GpuNode::from).collect()
    }
    /// Byte image of the packed node array, ready for a storage buffer.
    pub fn node_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.to_gpu()).to_vec()
    }
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            nodes: self.nodes.len(),
            ..Default::default()
        };
        let mut q = VecDeque::new();
        q.push_back((NodeId(0), 0));
        while let Some((id, depth)) = q.pop_front() {
            stats.max_depth = stats.max_depth.max(depth);
            match self.node(id).children() {
                Some((left, right)) => {
                    q.push_back((left, depth + 1));
                    q.push_back((right, depth + 1));
                }
                None => stats.leaves += 1,
            }
        }
        stats
    }
}

fn validate(vertices: &[f32], indices: &[u32]) -> Result<()> {
    if vertices.len() % 3 != 0 {
        return Err(Error::InvalidInput(format!(
            "vertex buffer length {} is not a multiple of 3",
            vertices.len()
        )));
    }
    if indices.len() % 3 != 0 {
        return Err(Error::InvalidInput(format!(
            "index count {} is not a multiple of 3",
            indices.len()
        )));
    }
    if indices.is_empty() {
        return Err(Error::InvalidInput("mesh has no triangles".into()));
    }
    if indices.len() > MAX_ENCODABLE {
        return Err(Error::TooLarge {
            triangles: indices.len() / 3,
        });
    }
    let vertex_count = vertices.len() / 3;
    if let Some(slot) = indices.iter().position(|&i| i as usize >= vertex_count) {
        return Err(Error::InvalidInput(format!(
            "index {} at slot {slot} is out of range for {vertex_count} vertices",
            indices[slot]
        )));
    }
    Ok(())
}

struct Builder<'a> {
    tris: Triangles<'a>,
    nodes: Vec<Node>,
}

impl Builder<'_> {
    fn allocate(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn build(&mut self, range: Range<usize>) -> NodeId {
        let bounds = self.tris.bounds(range.clone());
        if range.len() == 1 {
            return self.allocate(Node::Leaf {
                bounds,
                triangle: TriangleHandle::from_triangle(range.start),
            });
        }
        // reserve the slot before recursing so the parent precedes its children
        let id = self.allocate(Node::Internal {
            bounds,
            left: NodeId(0),
            right: NodeId(0),
        });
        let mid = partition(&mut self.tris, range.clone(), &bounds);
        let left = self.build(range.start..mid);
        let right = self.build(mid..range.end);
        self.nodes[id.index()] = Node::Internal {
            bounds,
            left,
            right,
        };
        id
    }
}
