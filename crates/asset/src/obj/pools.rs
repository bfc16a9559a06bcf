//! Attribute pools: positions, normals and texture coordinates in declaration order.

use corelib::{Vec2, Vec3};

use super::scan::{Directive, ScannedLine};

/// The three independent index spaces of an OBJ asset. External indices are
/// 1-based; slot `i` here is external index `i + 1`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributePools {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub texcoords: Vec<Vec2>,
}

impl AttributePools {
    /// Append the attribute carried by `line`.
    ///
    /// Returns `false` when the line was dropped: too few fields, or a
    /// directive that is not an attribute.
    pub fn push(&mut self, line: &ScannedLine<'_>) -> bool {
        match line.directive {
            Directive::Position => push_vec3(&mut self.positions, &line.args),
            Directive::Normal => push_vec3(&mut self.normals, &line.args),
            Directive::TexCoord => {
                // Optional third `w` component is ignored.
                let [u, v, ..] = line.args.as_slice() else {
                    return false;
                };
                self.texcoords.push(Vec2::new(component(u), component(v)));
                true
            }
            Directive::Face => false,
        }
    }

    /// Pool length for the attribute a directive feeds.
    pub fn len_of(&self, directive: Directive) -> usize {
        match directive {
            Directive::Position => self.positions.len(),
            Directive::Normal => self.normals.len(),
            Directive::TexCoord => self.texcoords.len(),
            Directive::Face => 0,
        }
    }
}

fn push_vec3(pool: &mut Vec<Vec3>, args: &[&str]) -> bool {
    let [x, y, z, ..] = args else {
        return false;
    };
    pool.push(Vec3::new(component(x), component(y), component(z)));
    true
}

/// Malformed numbers degrade to zero instead of failing the asset.
#[inline]
fn component(token: &str) -> f32 {
    token.parse().unwrap_or(0.0)
}
