//! Scene assembly: match parts to OBJ assets, load them, keep part order.

use corelib::{Aabb, MatrixLayout};
use rayon::prelude::*;

use crate::{
    mesh::FlattenedMesh,
    options::LoadOptions,
    placed::{PlacedMesh, apply_transform, load_part},
};

/// Edge length of the cube shown for parts without usable geometry.
pub const PLACEHOLDER_SIZE: f32 = 0.05;

/// A geometry part as described by the container: a name, the path of its
/// mesh asset and a flat placement matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct PartRecord {
    pub name: String,
    pub path: String,
    pub transform: [f32; 16],
}

/// A named file extracted from the container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetEntry {
    pub name: String,
    pub content: Vec<u8>,
}

#[derive(Clone, Debug)]
pub enum SceneNode {
    Mesh(PlacedMesh),
    Placeholder(PlacedMesh),
}

impl SceneNode {
    pub fn placed(&self) -> &PlacedMesh {
        match self {
            Self::Mesh(p) | Self::Placeholder(p) => p,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

/// Nodes in part order, independent of load scheduling.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn mesh_count(&self) -> usize {
        self.nodes.iter().filter(|n| !n.is_placeholder()).count()
    }

    pub fn placeholder_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_placeholder()).count()
    }

    /// Union of all placed bounds.
    pub fn bounds(&self) -> Option<Aabb> {
        self.nodes
            .iter()
            .filter_map(|n| n.placed().world_bounds())
            .reduce(|a, b| a.union(&b))
    }
}

fn file_name(path: &str) -> String {
    path.rsplit(['/', '\\'])
        .next()
        .unwrap_or(path)
        .to_lowercase()
}

/// Find the asset for a part path.
///
/// File names are compared case-insensitively: an exact file-name match wins,
/// otherwise the first asset whose name contains the part's file name, or
/// whose file name is contained in the part path.
pub fn find_asset<'a>(assets: &'a [AssetEntry], part_path: &str) -> Option<&'a AssetEntry> {
    let wanted = file_name(part_path);
    if wanted.is_empty() {
        return None;
    }
    let part_path = part_path.to_lowercase();

    assets
        .iter()
        .find(|a| file_name(&a.name) == wanted)
        .or_else(|| {
            assets.iter().find(|a| {
                let asset_file = file_name(&a.name);
                a.name.to_lowercase().contains(&wanted)
                    || (!asset_file.is_empty() && part_path.contains(&asset_file))
            })
        })
}

fn load_one(part: &PartRecord, assets: &[AssetEntry], options: &LoadOptions) -> Option<PlacedMesh> {
    let Some(asset) = find_asset(assets, &part.path) else {
        log::warn!("No asset matches part '{}' ({})", part.name, part.path);
        return None;
    };
    load_part(&part.name, &asset.content, &part.transform, options)
}

/// Parse parts in parallel. Indexed `collect` keeps results in part order
/// whatever order the workers finish in.
fn load_all(parts: &[PartRecord], assets: &[AssetEntry], options: &LoadOptions) -> Vec<Option<PlacedMesh>> {
    parts
        .par_iter()
        .map(|part| load_one(part, assets, options))
        .collect()
}

/// Build the scene for a document.
///
/// Parts that fail to load are left out. When no part at all produced a
/// mesh, every part is shown as a placeholder cube at its placement instead,
/// so the document still renders something.
pub fn assemble(parts: &[PartRecord], assets: &[AssetEntry], options: &LoadOptions) -> Scene {
    let nodes: Vec<SceneNode> = load_all(parts, assets, options)
        .into_iter()
        .flatten()
        .map(SceneNode::Mesh)
        .collect();

    if !nodes.is_empty() {
        log::info!("Scene assembled: {} of {} parts loaded", nodes.len(), parts.len());
        return Scene { nodes };
    }

    if !parts.is_empty() {
        log::warn!("No part produced geometry; using {} placeholders", parts.len());
    }
    Scene {
        nodes: parts.iter().map(|p| placeholder(p, options.matrix_layout)).collect(),
    }
}

fn placeholder(part: &PartRecord, layout: MatrixLayout) -> SceneNode {
    SceneNode::Placeholder(apply_transform(
        part.name.as_str(),
        FlattenedMesh::cube(PLACEHOLDER_SIZE),
        &part.transform,
        layout,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::{Mat4, Vec3, matrix_to_array};

    fn translate(x: f32) -> [f32; 16] {
        matrix_to_array(&Mat4::from_translation(Vec3::new(x, 0.0, 0.0)), MatrixLayout::ColumnMajor)
    }

    fn part(name: &str, path: &str, x: f32) -> PartRecord {
        PartRecord {
            name: name.to_string(),
            path: path.to_string(),
            transform: translate(x),
        }
    }

    fn asset(name: &str, content: &str) -> AssetEntry {
        AssetEntry {
            name: name.to_string(),
            content: content.as_bytes().to_vec(),
        }
    }

    const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

    #[test]
    fn exact_file_name_beats_substring() {
        let assets = [
            asset("geom/big_lamp.obj", TRIANGLE),
            asset("geom/lamp.obj", TRIANGLE),
        ];
        let found = find_asset(&assets, "parts/LAMP.OBJ").unwrap();
        assert_eq!(found.name, "geom/lamp.obj");
    }

    #[test]
    fn substring_matches_both_ways() {
        let assets = [asset("a/housing_v2.obj", TRIANGLE), asset("body.obj", TRIANGLE)];
        assert_eq!(find_asset(&assets, "housing_v2.obj.bak").unwrap().name, "a/housing_v2.obj");
        assert_eq!(find_asset(&assets, "x/old_body.obj").unwrap().name, "body.obj");
        assert!(find_asset(&assets, "lens.obj").is_none());
        assert!(find_asset(&assets, "").is_none());
    }

    #[test]
    fn nodes_follow_part_order() {
        let assets: Vec<_> = (0..16).map(|i| asset(&format!("p{i}.obj"), TRIANGLE)).collect();
        let parts: Vec<_> = (0..16)
            .rev()
            .map(|i| part(&format!("part{i}"), &format!("p{i}.obj"), i as f32))
            .collect();

        let scene = assemble(&parts, &assets, &LoadOptions::default());
        assert_eq!(scene.mesh_count(), 16);
        let names: Vec<_> = scene.nodes.iter().map(|n| n.placed().name().to_string()).collect();
        let expected: Vec<_> = (0..16).rev().map(|i| format!("part{i}")).collect();
        assert_eq!(names, expected);
        assert_eq!(scene.nodes[0].placed().transform().w_axis.x, 15.0);
    }

    #[test]
    fn failed_parts_are_skipped_when_others_load() {
        let assets = [asset("good.obj", TRIANGLE), asset("bad.obj", "vn 0 0 1\n")];
        let parts = [
            part("bad", "bad.obj", 0.0),
            part("good", "good.obj", 1.0),
            part("missing", "nowhere.obj", 2.0),
        ];
        let scene = assemble(&parts, &assets, &LoadOptions::default());
        assert_eq!(scene.nodes.len(), 1);
        assert_eq!(scene.placeholder_count(), 0);
        assert_eq!(scene.nodes[0].placed().name(), "good");

        let bounds = scene.bounds().unwrap();
        assert_eq!(bounds.min, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn all_failed_parts_become_placeholders() {
        let assets = [asset("bad.obj", "# nothing here\n")];
        let parts = [part("a", "bad.obj", 0.0), part("b", "other.obj", 3.0)];
        let scene = assemble(&parts, &assets, &LoadOptions::default());
        assert_eq!(scene.placeholder_count(), 2);
        assert_eq!(scene.mesh_count(), 0);

        let b = scene.nodes[1].placed();
        assert_eq!(b.name(), "b");
        assert_eq!(b.mesh().triangle_count(), 12);
        let bounds = b.world_bounds().unwrap();
        assert!((bounds.center() - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-6);
        assert!((bounds.size() - Vec3::splat(PLACEHOLDER_SIZE)).length() < 1e-6);
    }

    #[test]
    fn empty_document_is_empty_scene() {
        let scene = assemble(&[], &[], &LoadOptions::default());
        assert!(scene.nodes.is_empty());
        assert!(scene.bounds().is_none());
    }
}
