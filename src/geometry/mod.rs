mod aabb;
mod mesh;
pub use aabb::Aabb;
pub use mesh::Mesh;
