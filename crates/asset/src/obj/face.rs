//! Face corners and fan triangulation.

use super::pools::AttributePools;

/// One vertex reference of a face. Indices are kept exactly as written
/// (1-based, possibly negative or out of range); resolution happens at
/// emission time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceCorner {
    pub position: i64,
    pub texcoord: Option<i64>,
    pub normal: Option<i64>,
}

impl FaceCorner {
    /// Parse `p`, `p/t`, `p//n` or `p/t/n`.
    ///
    /// `None` when the position field is missing or not an integer. Empty or
    /// non-numeric texcoord/normal fields become `None`.
    pub fn parse(token: &str) -> Option<Self> {
        let mut fields = token.split('/');
        let position = fields.next()?.parse::<i64>().ok()?;
        let texcoord = fields.next().and_then(optional_index);
        let normal = fields.next().and_then(optional_index);
        Some(Self {
            position,
            texcoord,
            normal,
        })
    }

    /// Rewrite negative indices against the current pool sizes, so `-1` names
    /// the most recently declared element.
    pub fn to_absolute(self, pools: &AttributePools) -> Self {
        Self {
            position: relative(self.position, pools.positions.len()),
            texcoord: self.texcoord.map(|i| relative(i, pools.texcoords.len())),
            normal: self.normal.map(|i| relative(i, pools.normals.len())),
        }
    }
}

fn optional_index(field: &str) -> Option<i64> {
    if field.is_empty() {
        None
    } else {
        field.parse().ok()
    }
}

fn relative(index: i64, len: usize) -> i64 {
    if index >= 0 {
        return index;
    }
    // Reaching before the first element lands on zero or below: still out of range.
    i64::try_from(len)
        .ok()
        .and_then(|len| len.checked_add(index))
        .map_or(index, |i| i + 1)
}

/// A polygon with at least three corners.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Face {
    corners: Vec<FaceCorner>,
}

impl Face {
    pub const MIN_CORNERS: usize = 3;

    /// `None` for degenerate input (fewer than three corners).
    pub fn from_corners(corners: Vec<FaceCorner>) -> Option<Self> {
        (corners.len() >= Self::MIN_CORNERS).then_some(Self { corners })
    }

    /// Parse the arguments of an `f` line. Unparseable corners are dropped
    /// before the corner count is checked.
    pub fn parse(args: &[&str]) -> Option<Self> {
        Self::from_corners(args.iter().filter_map(|t| FaceCorner::parse(t)).collect())
    }

    pub fn corners(&self) -> &[FaceCorner] {
        &self.corners
    }

    pub fn to_absolute(self, pools: &AttributePools) -> Self {
        Self {
            corners: self
                .corners
                .into_iter()
                .map(|c| c.to_absolute(pools))
                .collect(),
        }
    }

    /// An n-gon fans into n - 2 triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.corners.len() - 2
    }

    /// Fan triangulation anchored at the first corner: `(c0, ci, ci+1)`.
    /// Correct for convex polygons only; concave input is not repaired.
    pub fn triangles(&self) -> impl Iterator<Item = [FaceCorner; 3]> + '_ {
        let c = &self.corners;
        (1..c.len() - 1).map(move |i| [c[0], c[i], c[i + 1]])
    }
}
