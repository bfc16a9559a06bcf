//! Flattened buffer emitter: one output vertex per triangle corner.

use corelib::{Vec2, Vec3};

use super::{
    face::{Face, FaceCorner},
    pools::AttributePools,
};
use crate::{
    error::{ObjError, ObjResult},
    mesh::{DEFAULT_NORMAL, FlattenedMesh},
};

pub const DEFAULT_POSITION: Vec3 = Vec3::ZERO;
pub const DEFAULT_TEXCOORD: Vec2 = Vec2::ZERO;

/// Accumulates de-indexed buffers from triangles, resolving each corner
/// against the attribute pools.
#[derive(Debug)]
pub struct MeshEmitter<'p> {
    pools: &'p AttributePools,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    texcoords: Vec<Vec2>,
    out_of_range: usize,
}

impl<'p> MeshEmitter<'p> {
    pub fn new(pools: &'p AttributePools) -> Self {
        Self {
            pools,
            positions: Vec::new(),
            normals: Vec::new(),
            texcoords: Vec::new(),
            out_of_range: 0,
        }
    }

    pub fn emit_face(&mut self, face: &Face) {
        self.positions.reserve(face.triangle_count() * 3);
        for triangle in face.triangles() {
            self.emit_triangle(triangle);
        }
    }

    pub fn emit_triangle(&mut self, triangle: [FaceCorner; 3]) {
        for corner in triangle {
            self.emit_corner(corner);
        }
    }

    fn emit_corner(&mut self, corner: FaceCorner) {
        let pools = self.pools;
        let position = self.lookup(&pools.positions, corner.position, DEFAULT_POSITION);
        self.positions.push(position);

        // A corner without a normal/texcoord index adds nothing, which leaves
        // the buffer short and gets it discarded in `finish`.
        if let Some(index) = corner.normal {
            let normal = self.lookup(&pools.normals, index, DEFAULT_NORMAL);
            self.normals.push(normal);
        }
        if let Some(index) = corner.texcoord {
            let uv = self.lookup(&pools.texcoords, index, DEFAULT_TEXCOORD);
            self.texcoords.push(uv);
        }
    }

    fn lookup<T: Copy>(&mut self, pool: &[T], index: i64, default: T) -> T {
        let slot = index
            .checked_sub(1)
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|i| pool.get(i).copied());
        slot.unwrap_or_else(|| {
            self.out_of_range += 1;
            default
        })
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Enforce the buffer-length contract and build the index buffer.
    pub fn finish(self) -> ObjResult<FlattenedMesh> {
        let Self {
            pools,
            positions,
            mut normals,
            mut texcoords,
            out_of_range,
        } = self;

        let vertex_count = positions.len();
        if pools.positions.is_empty() || vertex_count == 0 {
            return Err(ObjError::NoGeometry {
                positions: pools.positions.len(),
                triangles: vertex_count / 3,
            });
        }
        let count = u32::try_from(vertex_count)
            .map_err(|_| ObjError::TooManyVertices(vertex_count))?;

        if normals.len() != vertex_count {
            if !normals.is_empty() {
                log::debug!(
                    "Dropping partial normal buffer ({} of {} corners)",
                    normals.len(),
                    vertex_count
                );
            }
            normals.clear();
        }
        if texcoords.len() != vertex_count {
            if !texcoords.is_empty() {
                log::debug!(
                    "Dropping partial texcoord buffer ({} of {} corners)",
                    texcoords.len(),
                    vertex_count
                );
            }
            texcoords.clear();
        }
        if out_of_range > 0 {
            log::debug!("{} out-of-range attribute references replaced by defaults", out_of_range);
        }

        Ok(FlattenedMesh {
            positions,
            normals,
            texcoords,
            indices: (0..count).collect(),
        })
    }
}
