use thiserror::Error;

/// Reasons a single OBJ asset yields no mesh. Never fatal to a whole document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ObjError {
    #[error("OBJ content is not valid UTF-8: {0}")]
    Decode(#[from] std::str::Utf8Error),

    #[error("OBJ contained no usable geometry ({positions} positions, {triangles} triangles)")]
    NoGeometry { positions: usize, triangles: usize },

    #[error("Too many vertices in OBJ ({0} > {max})", max = u32::MAX)]
    TooManyVertices(usize),
}

pub type ObjResult<T> = Result<T, ObjError>;
