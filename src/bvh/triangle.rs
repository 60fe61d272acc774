use crate::geometry::Aabb;
use glam::Vec3;
use std::ops::Range;

/// Triangle soup seen through a shared vertex buffer and an index buffer the
/// builder is free to reorder, one triangle (3 entries) at a time.
///
/// Indexing is unchecked beyond slice bounds: `Tree::build` validates every
/// index before a `Triangles` is ever constructed.
pub struct Triangles<'a> {
    vertices: &'a [f32],
    indices: &'a mut [u32],
}

impl<'a> Triangles<'a> {
    pub fn new(vertices: &'a [f32], indices: &'a mut [u32]) -> Self {
        Self { vertices, indices }
    }

    /// Position of the vertex referenced by index-buffer slot `slot`.
    #[inline]
    pub fn vertex(&self, slot: usize) -> Vec3 {
        let base = self.indices[slot] as usize * 3;
        Vec3::from_slice(&self.vertices[base..base + 3])
    }

    #[inline]
    pub fn corners(&self, triangle: usize) -> [Vec3; 3] {
        let slot = triangle * 3;
        [
            self.vertex(slot),
            self.vertex(slot + 1),
            self.vertex(slot + 2),
        ]
    }

    /// Tight box over every vertex of the triangles in `range`.
    /// An empty range yields `Aabb::EMPTY`.
    pub fn bounds(&self, range: Range<usize>) -> Aabb {
        let mut aabb = Aabb::EMPTY;
        for t in range {
            for p in self.corners(t) {
                aabb.grow_point(p);
            }
        }
        aabb
    }

    #[inline]
    pub fn centroid(&self, triangle: usize) -> Vec3 {
        let [a, b, c] = self.corners(triangle);
        (a + b + c) / 3.0
    }

    pub fn indices(&self) -> &[u32] {
        &*self.indices
    }

    pub(crate) fn indices_mut(&mut self) -> &mut [u32] {
        &mut *self.indices
    }
}
