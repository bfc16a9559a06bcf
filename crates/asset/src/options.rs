//! Load-time knobs. Defaults reproduce the plain fail-soft behaviour.

use corelib::MatrixLayout;

/// How negative (relative) face indices are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IndexMode {
    /// Indices are used as written; negative values are out of range and the
    /// attribute falls back to its default.
    #[default]
    Absolute,
    /// `-k` refers to the k-th most recent element declared before the face.
    Relative,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub index_mode: IndexMode,
    pub matrix_layout: MatrixLayout,
}

impl LoadOptions {
    pub fn with_index_mode(mut self, index_mode: IndexMode) -> Self {
        self.index_mode = index_mode;
        self
    }

    pub fn with_matrix_layout(mut self, matrix_layout: MatrixLayout) -> Self {
        self.matrix_layout = matrix_layout;
        self
    }
}
