//! Minimal OBJ parser supporting positions, normals and texture coordinates.
//!
//! Every triangle corner becomes its own output vertex, so the three index
//! spaces of the format never need to be unified into a shared vertex key.

pub mod emit;
pub mod face;
pub mod pools;
pub mod scan;

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use anyhow::{Context, Result};

use crate::{
    error::ObjResult,
    mesh::FlattenedMesh,
    options::{IndexMode, LoadOptions},
};
use emit::MeshEmitter;
use face::Face;
use pools::AttributePools;
use scan::{Directive, decode, scan};

/// Load an OBJ mesh from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> Result<FlattenedMesh> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open OBJ file: {}", path.as_ref().display()))?;
    load_obj_from_reader(BufReader::new(file), options)
        .with_context(|| format!("Failed to load OBJ file: {}", path.as_ref().display()))
}

/// Load an OBJ mesh from a [`Read`] implementation.
pub fn load_obj_from_reader<R: Read>(mut reader: R, options: &LoadOptions) -> Result<FlattenedMesh> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .context("Failed to read OBJ content")?;
    Ok(parse_obj(&bytes, options)?)
}

/// Convenience helper to parse an OBJ string literal with default options.
pub fn load_obj_from_str(contents: &str) -> ObjResult<FlattenedMesh> {
    parse_str(contents, &LoadOptions::default())
}

/// Parse raw asset bytes into a flattened mesh.
///
/// Fails on invalid UTF-8 or when no triangle could be emitted. Malformed
/// numbers, bad indices and degenerate faces are absorbed along the way.
pub fn parse_obj(bytes: &[u8], options: &LoadOptions) -> ObjResult<FlattenedMesh> {
    parse_str(decode(bytes)?, options)
}

fn parse_str(text: &str, options: &LoadOptions) -> ObjResult<FlattenedMesh> {
    let mut pools = AttributePools::default();
    let mut faces: Vec<Face> = Vec::new();
    let mut dropped = 0usize;

    for line in scan(text) {
        match line.directive {
            Directive::Face => match Face::parse(&line.args) {
                Some(face) => faces.push(match options.index_mode {
                    IndexMode::Absolute => face,
                    // Relative indices see only what was declared so far.
                    IndexMode::Relative => face.to_absolute(&pools),
                }),
                None => {
                    log::debug!("Degenerate face dropped on line {}", line.line_no);
                    dropped += 1;
                }
            },
            _ => {
                if !pools.push(&line) {
                    log::debug!("Short {:?} line dropped on line {}", line.directive, line.line_no);
                    dropped += 1;
                }
            }
        }
    }

    // Faces may reference attributes declared after them, so emit only once
    // every pool is complete.
    let mut emitter = MeshEmitter::new(&pools);
    for face in &faces {
        emitter.emit_face(face);
    }
    let mesh = emitter.finish()?;

    log::debug!(
        "OBJ parsed: {} positions, {} normals, {} texcoords, {} faces -> {} triangles ({} lines dropped)",
        pools.positions.len(),
        pools.normals.len(),
        pools.texcoords.len(),
        faces.len(),
        mesh.triangle_count(),
        dropped
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ObjError;
    use corelib::{Vec2, Vec3, vec3};

    const TRIANGLE: &str = r#"
        v 0 0 0
        v 1 0 0
        v 0 1 0
        f 1 2 3
    "#;

    #[test]
    fn parse_simple_triangle() {
        let mesh = load_obj_from_str(TRIANGLE).expect("parse triangle");
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.positions, [vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0)]);
        assert_eq!(mesh.indices, [0, 1, 2]);
        assert!(mesh.normals.is_empty());
        assert!(mesh.texcoords.is_empty());
    }

    #[test]
    fn quad_becomes_two_fanned_triangles() {
        let src = r#"
            v 0 0 0
            v 1 0 0
            v 0 1 0
            v 1 1 0
            f 1 2 3 4
        "#;
        let mesh = load_obj_from_str(src).expect("parse quad");
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.indices, [0, 1, 2, 3, 4, 5]);
        assert_eq!(
            mesh.positions[3..],
            [vec3(0.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0), vec3(1.0, 1.0, 0.0)]
        );
    }

    #[test]
    fn attributes_without_positions_yield_nothing() {
        let src = "vn 0 0 1\nvt 0 0\nvt 1 1\n";
        let err = load_obj_from_str(src).unwrap_err();
        assert_eq!(
            err,
            ObjError::NoGeometry {
                positions: 0,
                triangles: 0
            }
        );
    }

    #[test]
    fn faces_without_any_vertices_fail() {
        // No `v` lines at all: even a well-formed face is not usable geometry.
        assert!(load_obj_from_str("f 1 2 3\n").is_err());
    }

    #[test]
    fn out_of_range_position_degrades_one_vertex() {
        let src = "v 1 1 1\nv 2 2 2\nf 1 2 99\n";
        let mesh = load_obj_from_str(src).expect("fail-soft index");
        assert_eq!(mesh.positions, [vec3(1.0, 1.0, 1.0), vec3(2.0, 2.0, 2.0), Vec3::ZERO]);
    }

    #[test]
    fn mixed_corner_forms_drop_partial_normals() {
        let src = r#"
            v 0 0 0
            v 1 0 0
            v 0 1 0
            vt 0 0
            vt 1 0
            vn 0 0 1
            vn 0 0 1
            vn 0 0 1
            f 1/1/1 2/2 3//3
        "#;
        let mesh = load_obj_from_str(src).expect("parse mixed corners");
        assert_eq!(mesh.triangle_count(), 1);
        assert!(mesh.normals.is_empty());
        assert!(mesh.texcoords.is_empty());
    }

    #[test]
    fn full_corners_keep_attributes() {
        let src = r#"
            v 0.0 0.0 0.0
            v 1.0 0.0 0.0
            v 0.0 1.0 0.0
            vn 0.0 0.0 1.0
            vt 0.0 0.0
            vt 1.0 0.0
            vt 0.0 1.0
            f 1/1/1 2/2/1 3/3/1
        "#;
        let mesh = load_obj_from_str(src).expect("parse triangle");
        assert!(mesh.is_valid());
        assert_eq!(mesh.normals, [Vec3::Z; 3]);
        assert_eq!(mesh.texcoords, [Vec2::ZERO, Vec2::X, Vec2::Y]);
    }

    #[test]
    fn faces_may_precede_their_vertices() {
        let src = "f 1 2 3\nv 0 0 0\nv 1 0 0\nv 0 1 0\n";
        let mesh = load_obj_from_str(src).expect("forward references");
        assert_eq!(mesh.positions[1], vec3(1.0, 0.0, 0.0));
    }

    #[test]
    fn classic_mac_line_endings_load() {
        let mesh = load_obj_from_str("v 0 0 0\rv 1 0 0\rv 0 1 0\rf 1 2 3\r").expect("CR-only OBJ");
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.positions[2], vec3(0.0, 1.0, 0.0));
    }

    #[test]
    fn degenerate_faces_are_skipped_not_fatal() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2\nf 1 2 x\nf 1 2 3\n";
        let mesh = load_obj_from_str(src).expect("one good face");
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn counts_follow_the_fan_law_across_faces() {
        let src = r#"
            v 0 0 0
            v 1 0 0
            v 1 1 0
            v 0 1 0
            v 0.5 1.5 0
            f 1 2 3
            f 1 2 3 4
            f 1 2 3 5 4
        "#;
        let mesh = load_obj_from_str(src).expect("parse polygons");
        assert_eq!(mesh.triangle_count(), 1 + 2 + 3);
        assert_eq!(mesh.indices.len(), 3 * mesh.triangle_count());
        assert!(mesh.is_valid());
    }

    #[test]
    fn parsing_is_deterministic() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\n";
        let a = parse_obj(src.as_bytes(), &LoadOptions::default()).unwrap();
        let b = parse_obj(src.as_bytes(), &LoadOptions::default()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.position_bytes(), b.position_bytes());
        assert_eq!(a.normal_bytes(), b.normal_bytes());
    }

    #[test]
    fn invalid_utf8_fails_the_asset() {
        let err = parse_obj(b"v 0 0 0\n\xff\xfe", &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, ObjError::Decode(_)));
    }

    // Negative indices are not resolved unless asked for. Absolute mode falls
    // back to defaults, which diverges from what most exporters intend.
    #[test]
    fn negative_indices_default_to_out_of_range() {
        let src = "v 1 0 0\nv 0 1 0\nv 0 0 1\nf -3 -2 -1\n";
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(mesh.positions, [Vec3::ZERO; 3]);

        let relative = LoadOptions::default().with_index_mode(IndexMode::Relative);
        let mesh = parse_obj(src.as_bytes(), &relative).unwrap();
        assert_eq!(mesh.positions, [Vec3::X, Vec3::Y, Vec3::Z]);
    }

    #[test]
    fn relative_indices_resolve_at_the_face_line() {
        let src = "v 1 0 0\nv 0 1 0\nv 0 0 1\nf -1 -2 -3\nv 9 9 9\n";
        let relative = LoadOptions::default().with_index_mode(IndexMode::Relative);
        let mesh = parse_obj(src.as_bytes(), &relative).unwrap();
        assert_eq!(mesh.positions, [Vec3::Z, Vec3::Y, Vec3::X]);
    }

    #[test]
    fn reader_and_path_loading() {
        let mesh = load_obj_from_reader(TRIANGLE.as_bytes(), &LoadOptions::default()).unwrap();
        assert_eq!(mesh.triangle_count(), 1);

        let path = std::env::temp_dir().join(format!("partmesh-obj-{}.obj", std::process::id()));
        std::fs::write(&path, TRIANGLE).unwrap();
        let from_file = load_obj_from_path(&path, &LoadOptions::default()).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(from_file, mesh);

        assert!(load_obj_from_path(path.with_extension("missing"), &LoadOptions::default()).is_err());
    }
}
