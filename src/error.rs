use thiserror::Error;

/// Largest node index or index-buffer offset an `f32` field holds exactly.
pub const MAX_ENCODABLE: usize = 1 << 24;

#[derive(Error, Debug)]
pub enum Error {
    /// Mesh data that cannot describe a triangle list
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Node or index offsets would lose precision in the packed float fields
    #[error("Mesh too large: {triangles} triangles exceed the packed node index range")]
    TooLarge { triangles: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("OBJ load error: {0}")]
    Obj(#[from] tobj::LoadError),
}

pub type Result<T> = std::result::Result<T, Error>;
