//! CPU-side flattened mesh produced by loaders.

use bytemuck::{Pod, Zeroable};
use corelib::{Aabb, Vec2, Vec3};

/// Normal used when a corner references a normal that does not exist.
pub const DEFAULT_NORMAL: Vec3 = Vec3::Y;

/// Interleaved vertex with position/normal/uv. Values are in object space.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// De-indexed triangle mesh: every triangle corner owns its own entry.
///
/// Invariants upheld by every constructor in this crate:
/// - `normals` and `texcoords` are either empty or exactly as long as `positions`;
/// - `indices` is `0..positions.len()` in emission order, so its length is a
///   multiple of three.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlattenedMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub texcoords: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl FlattenedMesh {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    #[inline]
    pub fn has_texcoords(&self) -> bool {
        !self.texcoords.is_empty()
    }

    /// Returns `true` if the mesh is non-empty and all buffer lengths agree.
    pub fn is_valid(&self) -> bool {
        let n = self.positions.len();
        n > 0
            && self.indices.len() == n
            && n % 3 == 0
            && (self.normals.is_empty() || self.normals.len() == n)
            && (self.texcoords.is_empty() || self.texcoords.len() == n)
    }

    /// Object-space bounds, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Aabb> {
        let aabb = Aabb::from_points(self.positions.iter().copied());
        (!aabb.is_empty()).then_some(aabb)
    }

    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    pub fn texcoord_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texcoords)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Interleaved copy for pipelines with a single vertex buffer.
    /// Missing normals become [`DEFAULT_NORMAL`], missing uvs become zero.
    pub fn interleaved(&self) -> Vec<MeshVertex> {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let n = self.normals.get(i).copied().unwrap_or(DEFAULT_NORMAL);
                let uv = self.texcoords.get(i).copied().unwrap_or(Vec2::ZERO);
                MeshVertex::new(p.to_array(), n.to_array(), uv.to_array())
            })
            .collect()
    }

    /// Axis-aligned cube centred on the origin, used as placeholder geometry.
    pub fn cube(size: f32) -> Self {
        // (outward normal, u, v) with u x v == normal so corners wind CCW.
        const FACES: [(Vec3, Vec3, Vec3); 6] = [
            (Vec3::X, Vec3::Y, Vec3::Z),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::Z, Vec3::X),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::Y, Vec3::X),
        ];
        const UV: [Vec2; 4] = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];

        let h = size * 0.5;
        let mut mesh = Self::default();
        for (n, u, v) in FACES {
            let c = n * h;
            let quad = [
                c - u * h - v * h,
                c + u * h - v * h,
                c + u * h + v * h,
                c - u * h + v * h,
            ];
            for i in [0, 1, 2, 0, 2, 3] {
                mesh.positions.push(quad[i]);
                mesh.normals.push(n);
                mesh.texcoords.push(UV[i]);
            }
        }
        mesh.indices = (0..mesh.positions.len() as u32).collect();
        mesh
    }
}
