//! Core shared errors (renderer-agnostic).

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Expected a 4x4 matrix of 16 floats, got {0} values")]
    MatrixLength(usize),
}

pub type CoreResult<T> = Result<T, CoreError>;
