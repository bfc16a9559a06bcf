//! Placement of flattened meshes in a scene.
//!
//! A placement only associates a matrix with a mesh; vertex data is never
//! transformed. Name and mesh are shared behind [`Arc`]s: the first
//! placement wraps them once, every re-placement through
//! [`PlacedMesh::with_transform`] or [`PlacedMesh::set_transform`] is a
//! reference-count bump plus a matrix and allocates nothing.

use std::sync::Arc;

use corelib::{Aabb, Mat4, MatrixLayout, matrix_from_slice};

use crate::{mesh::FlattenedMesh, obj::parse_obj, options::LoadOptions};

#[derive(Clone, Debug)]
pub struct PlacedMesh {
    name: Arc<str>,
    mesh: Arc<FlattenedMesh>,
    transform: Mat4,
}

impl PlacedMesh {
    pub fn new(name: impl Into<Arc<str>>, mesh: impl Into<Arc<FlattenedMesh>>, transform: Mat4) -> Self {
        Self {
            name: name.into(),
            mesh: mesh.into(),
            transform,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn mesh(&self) -> &FlattenedMesh {
        &self.mesh
    }

    #[inline]
    pub fn shared_mesh(&self) -> &Arc<FlattenedMesh> {
        &self.mesh
    }

    #[inline]
    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    /// Replace the matrix in place. Buffers are untouched.
    #[inline]
    pub fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
    }

    /// Same mesh and name, different placement.
    pub fn with_transform(&self, transform: Mat4) -> Self {
        Self {
            name: Arc::clone(&self.name),
            mesh: Arc::clone(&self.mesh),
            transform,
        }
    }

    /// Bounds of the mesh after placement, `None` for an empty mesh.
    pub fn world_bounds(&self) -> Option<Aabb> {
        self.mesh.bounds().map(|b| b.transformed(&self.transform))
    }
}

/// Place `mesh` using a flat 16-float matrix.
///
/// This is the initial wrap: an owned mesh or name is moved into a new
/// [`Arc`]. Pass an existing `Arc<FlattenedMesh>` to share buffers.
///
/// A slice of the wrong length cannot describe a placement; the mesh is then
/// placed at the identity so it still shows up.
pub fn apply_transform(
    name: impl Into<Arc<str>>,
    mesh: impl Into<Arc<FlattenedMesh>>,
    matrix: &[f32],
    layout: MatrixLayout,
) -> PlacedMesh {
    let name = name.into();
    let transform = matrix_from_slice(matrix, layout).unwrap_or_else(|e| {
        log::warn!("Part '{}': {}; using identity", name, e);
        Mat4::IDENTITY
    });
    PlacedMesh::new(name, mesh, transform)
}

/// Parse one part's OBJ bytes and place it.
///
/// `None` means the part has no usable geometry and the caller should show a
/// placeholder for it instead.
pub fn load_part(name: &str, bytes: &[u8], matrix: &[f32], options: &LoadOptions) -> Option<PlacedMesh> {
    match parse_obj(bytes, options) {
        Ok(mesh) => {
            log::info!(
                "Loaded part '{}': {} triangles, normals={}, texcoords={}",
                name,
                mesh.triangle_count(),
                mesh.has_normals(),
                mesh.has_texcoords()
            );
            Some(apply_transform(name, mesh, matrix, options.matrix_layout))
        }
        Err(e) => {
            log::warn!("Skip part '{}': {}", name, e);
            None
        }
    }
}
