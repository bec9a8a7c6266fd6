use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("surface faces must have 3 columns, got {0}")]
    FaceArity(usize),

    #[error("surface face {face} references vertex {vertex} but only {vertex_count} vertices exist")]
    FaceVertexOutOfRange {
        face: usize,
        vertex: usize,
        vertex_count: usize,
    },

    #[error("surface has {vertex_count} vertices but {value_count} vertex values")]
    VertexValueMismatch {
        vertex_count: usize,
        value_count: usize,
    },
}
