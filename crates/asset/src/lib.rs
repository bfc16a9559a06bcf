//! Asset loading for scene parts.
//! OBJ text is flattened into render-ready buffers, then placed by a 4x4 matrix.

pub mod error;
pub mod mesh;
pub mod obj;
pub mod options;
pub mod placed;
pub mod scene;

pub use error::{ObjError, ObjResult};
pub use mesh::{FlattenedMesh, MeshVertex};
pub use obj::{load_obj_from_path, load_obj_from_reader, load_obj_from_str, parse_obj};
pub use options::{IndexMode, LoadOptions};
pub use placed::{PlacedMesh, apply_transform, load_part};
pub use scene::{AssetEntry, PartRecord, Scene, SceneNode, assemble, find_asset};
