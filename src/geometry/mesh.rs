use crate::error::Result;
use std::io::BufReader;
use std::path::Path;

/// Indexed triangle mesh: positions with stride 3, three indices per triangle.
#[derive(Debug, Default, Clone)]
pub struct Mesh {
    pub positions: Vec<f32>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(positions: Vec<f32>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read(path)?;
        Self::load_obj(&source)
    }
    /// Parses a Wavefront OBJ, merging every model into one index space.
    pub fn load_obj(source: &[u8]) -> Result<Self> {
        let mut reader = BufReader::new(source);
        let (models, _materials) = tobj::load_obj_buf(
            &mut reader,
            &tobj::LoadOptions {
                single_index: true,
                triangulate: true,
                ..Default::default()
            },
            |_matpath| Err(tobj::LoadError::GenericFailure),
        )?;
        let mut positions = Vec::new();
        let mut indices = Vec::new();
        for model in models {
            let mesh = model.mesh;
            let offset = (positions.len() / 3) as u32;
            log::trace!(
                "model {}: {} vertices, {} indices",
                model.name,
                mesh.positions.len() / 3,
                mesh.indices.len()
            );
            positions.extend_from_slice(&mesh.positions);
            indices.extend(mesh.indices.into_iter().map(|i| offset + i));
        }
        Ok(Self::new(positions, indices))
    }
}
