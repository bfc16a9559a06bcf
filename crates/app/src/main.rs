//! Entry point for the partmesh inspector.
//! Loads OBJ files as scene parts and reports what a renderer would receive.
//!
//! Usage: partmesh [--transform=m0,m1,...,m15 | --translate=x,y,z --rotate-deg=x,y,z --scale=x,y,z]
//!                 [--row-major] [--relative-indices] <file.obj>...

use std::path::Path;

use anyhow::{Context, Result, bail};
use asset::{AssetEntry, IndexMode, LoadOptions, PartRecord, SceneNode, assemble};
use corelib::{MatrixLayout, Transform, Vec3, matrix_from_slice, matrix_to_array};

fn parse_layout_arg() -> MatrixLayout {
    // --row-major / --matrix=row|col, default column-major
    let mut layout = MatrixLayout::ColumnMajor;
    for arg in std::env::args() {
        if arg == "--row-major" {
            layout = MatrixLayout::RowMajor;
        } else if let Some(val) = arg.strip_prefix("--matrix=") {
            layout = match val.to_ascii_lowercase().as_str() {
                "row" | "row-major" => MatrixLayout::RowMajor,
                "col" | "column" | "column-major" => MatrixLayout::ColumnMajor,
                other => {
                    log::warn!("Unknown matrix layout '{}', using column-major.", other);
                    MatrixLayout::ColumnMajor
                }
            };
        }
    }
    layout
}

fn parse_index_mode_arg() -> IndexMode {
    for arg in std::env::args() {
        if arg == "--relative-indices" {
            return IndexMode::Relative;
        }
    }
    IndexMode::Absolute
}

fn parse_floats(flag: &str, val: &str) -> Result<Vec<f32>> {
    val.split(',')
        .map(|v| v.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Invalid {} value '{}'", flag, val))
}

/// `--translate=`, `--rotate-deg=`, `--scale=`: three comma-separated floats each.
fn parse_vec3_arg(flag: &str, default: Vec3) -> Result<Vec3> {
    let prefix = format!("{}=", flag);
    for arg in std::env::args() {
        if let Some(val) = arg.strip_prefix(prefix.as_str()) {
            let values = parse_floats(flag, val)?;
            let &[x, y, z] = values.as_slice() else {
                bail!("{} expects x,y,z, got {} values", flag, values.len());
            };
            return Ok(Vec3::new(x, y, z));
        }
    }
    Ok(default)
}

/// Flat placement in `layout` order from translation, XYZ Euler degrees and scale.
fn placement_from_trs(translate: Vec3, rotate_deg: Vec3, scale: Vec3, layout: MatrixLayout) -> [f32; 16] {
    let radians = Vec3::new(
        rotate_deg.x.to_radians(),
        rotate_deg.y.to_radians(),
        rotate_deg.z.to_radians(),
    );
    matrix_to_array(&Transform::from_trs(translate, radians, scale).matrix(), layout)
}

/// `--transform=` takes 16 comma-separated floats applied to every part.
/// Without it the placement is built from the TRS flags (identity by default).
fn parse_transform_arg(layout: MatrixLayout) -> Result<[f32; 16]> {
    for arg in std::env::args() {
        if let Some(val) = arg.strip_prefix("--transform=") {
            let values = parse_floats("--transform", val)?;
            matrix_from_slice(&values, layout)?;
            let mut out = [0.0; 16];
            out.copy_from_slice(&values);
            return Ok(out);
        }
    }
    let translate = parse_vec3_arg("--translate", Vec3::ZERO)?;
    let rotate_deg = parse_vec3_arg("--rotate-deg", Vec3::ZERO)?;
    let scale = parse_vec3_arg("--scale", Vec3::ONE)?;
    Ok(placement_from_trs(translate, rotate_deg, scale, layout))
}

fn parse_paths() -> Vec<String> {
    std::env::args()
        .skip(1)
        .filter(|a| !a.starts_with("--"))
        .collect()
}

fn read_parts(paths: &[String], transform: [f32; 16]) -> Result<(Vec<PartRecord>, Vec<AssetEntry>)> {
    let mut parts = Vec::with_capacity(paths.len());
    let mut assets = Vec::with_capacity(paths.len());
    for path in paths {
        let content = std::fs::read(path).with_context(|| format!("Failed to read {}", path))?;
        let name = Path::new(path)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.clone());
        log::info!("Part '{}' <- {} ({} bytes)", name, path, content.len());
        parts.push(PartRecord {
            name,
            path: path.clone(),
            transform,
        });
        assets.push(AssetEntry {
            name: path.clone(),
            content,
        });
    }
    Ok((parts, assets))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let layout = parse_layout_arg();
    let index_mode = parse_index_mode_arg();
    let transform = parse_transform_arg(layout)?;
    let paths = parse_paths();
    if paths.is_empty() {
        bail!("No OBJ files given. Usage: partmesh [--transform=m0,..,m15] [--row-major] [--relative-indices] <file.obj>...");
    }
    log::info!(
        "Starting partmesh. Parts: {}, layout={:?}, index_mode={:?}",
        paths.len(),
        layout,
        index_mode
    );

    let (parts, assets) = read_parts(&paths, transform)?;
    let options = LoadOptions {
        index_mode,
        matrix_layout: layout,
    };
    let scene = assemble(&parts, &assets, &options);

    for node in &scene.nodes {
        let placed = node.placed();
        let mesh = placed.mesh();
        let kind = match node {
            SceneNode::Mesh(_) => "mesh",
            SceneNode::Placeholder(_) => "placeholder",
        };
        let trs = Transform::from_matrix(&placed.transform());
        println!(
            "{:<24} {:<11} tris={:<8} verts={:<8} normals={:<5} texcoords={:<5} bytes={}",
            placed.name(),
            kind,
            mesh.triangle_count(),
            mesh.vertex_count(),
            mesh.has_normals(),
            mesh.has_texcoords(),
            mesh.position_bytes().len()
                + mesh.normal_bytes().len()
                + mesh.texcoord_bytes().len()
                + mesh.index_bytes().len()
        );
        println!(
            "{:<24} translation={:?} rotation_xyz={:?} scale={:?}",
            "", trs.translation, trs.rotation_euler, trs.scale
        );
    }

    match scene.bounds() {
        Some(b) => println!("scene bounds: min={:?} max={:?} size={:?}", b.min, b.max, b.size()),
        None => println!("scene bounds: <empty>"),
    }

    log::info!(
        "Done: {} meshes, {} placeholders.",
        scene.mesh_count(),
        scene.placeholder_count()
    );
    Ok(())
}
