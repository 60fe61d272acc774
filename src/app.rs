use crate::bvh::{Tree, TreeStats};
use crate::config::Config;
use crate::error::Result;
use crate::geometry::Mesh;
use std::fs;
use std::time::Instant;

pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Loads the mesh, builds the tree and writes the buffers when asked to.
    pub fn run(&self) -> Result<TreeStats> {
        let mesh = Mesh::open(&self.config.mesh)?;
        log::info!(
            "loaded {}: {} vertices, {} triangles",
            self.config.mesh.display(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        let build_timestamp = Instant::now();
        let tree = Tree::try_from(mesh)?;
        let stats = tree.stats();
        log::info!(
            "bvh built in {:?}: {} nodes, {} leaves, depth {}",
            build_timestamp.elapsed(),
            stats.nodes,
            stats.leaves,
            stats.max_depth
        );
        if let (Some(nodes), Some(indices)) = (self.config.nodes_path(), self.config.indices_path())
        {
            fs::write(&nodes, tree.node_bytes())?;
            fs::write(&indices, tree.index_bytes())?;
            log::info!("wrote {} and {}", nodes.display(), indices.display());
        }
        Ok(stats)
    }
}
