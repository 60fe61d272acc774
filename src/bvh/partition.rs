use crate::bvh::triangle::Triangles;
use crate::geometry::Aabb;
use glam::Vec3;
use std::cmp::Ordering;
use std::ops::Range;

/// Axis of largest extent, x=0, y=1, z=2.
///
/// The nesting is load-bearing: on an x/y tie y is compared against z, and
/// a tie with z always resolves to z. Serialized trees depend on this order.
pub fn split_axis(size: Vec3) -> usize {
    if size.x > size.y {
        if size.x > size.z {
            0
        } else {
            2
        }
    } else if size.y > size.z {
        1
    } else {
        2
    }
}

/// Sorts the triangles of `range` by centroid along the longest axis of
/// `bounds`, rewrites their index-buffer records in that order, and returns
/// the count-median split point.
///
/// `range` must hold at least two triangles; both halves are then non-empty.
pub fn partition(tris: &mut Triangles<'_>, range: Range<usize>, bounds: &Aabb) -> usize {
    debug_assert!(range.len() >= 2, "partition of {range:?}");
    let axis = split_axis(bounds.extent());
    let start = range.start;
    let keys: Vec<f32> = range.clone().map(|t| tris.centroid(t)[axis]).collect();
    let mut order: Vec<usize> = range.clone().collect();
    order.sort_by(|&a, &b| {
        keys[a - start]
            .partial_cmp(&keys[b - start])
            .unwrap_or(Ordering::Equal)
    });
    let mut sorted = Vec::with_capacity(range.len() * 3);
    for t in order {
        sorted.extend_from_slice(&tris.indices()[t * 3..t * 3 + 3]);
    }
    tris.indices_mut()[start * 3..range.end * 3].copy_from_slice(&sorted);
    let mid = (range.start + range.end) / 2;
    log::trace!("split {range:?} on axis {axis} at {mid}");
    mid
}
