use crate::{CoreError, CoreResult, EulerRot, Mat4, Quat, Vec3};

/// Element order of a flat 16-float matrix handed over by a container format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatrixLayout {
    /// Columns one after another; translation lives at elements 12, 13, 14.
    #[default]
    ColumnMajor,
    /// Rows one after another; translation lives at elements 3, 7, 11.
    RowMajor,
}

/// Build a matrix from a flat slice. Anything but 16 values is rejected.
pub fn matrix_from_slice(values: &[f32], layout: MatrixLayout) -> CoreResult<Mat4> {
    let array: &[f32; 16] = values
        .try_into()
        .map_err(|_| CoreError::MatrixLength(values.len()))?;
    let m = Mat4::from_cols_array(array);
    Ok(match layout {
        MatrixLayout::ColumnMajor => m,
        MatrixLayout::RowMajor => m.transpose(),
    })
}

/// Inverse of [`matrix_from_slice`].
pub fn matrix_to_array(m: &Mat4, layout: MatrixLayout) -> [f32; 16] {
    match layout {
        MatrixLayout::ColumnMajor => m.to_cols_array(),
        MatrixLayout::RowMajor => m.transpose().to_cols_array(),
    }
}

/// Rigid transform with uniform or non-uniform scale (Euler XYZ).
#[derive(Clone, Copy, Debug)]
pub struct Transform {
    pub translation: Vec3,
    /// Euler angles in radians (XYZ order).
    pub rotation_euler: Vec3,
    pub scale: Vec3,
}

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation_euler: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    #[inline]
    pub fn from_trs(translation: Vec3, rotation_euler: Vec3, scale: Vec3) -> Self {
        Self {
            translation,
            rotation_euler,
            scale,
        }
    }

    /// Decompose an affine placement matrix. Shear and projection are lost.
    pub fn from_matrix(m: &Mat4) -> Self {
        let (scale, rotation, translation) = m.to_scale_rotation_translation();
        let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
        Self {
            translation,
            rotation_euler: Vec3::new(x, y, z),
            scale,
        }
    }

    /// Build matrix = T * R * S (column-major Mat4 per glam).
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        let q = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation_euler.x,
            self.rotation_euler.y,
            self.rotation_euler.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, q, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSLATE_1_2_3: [f32; 16] = [
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        1.0, 2.0, 3.0, 1.0,
    ];

    #[test]
    fn column_major_translation_moves_reference_point() {
        let m = matrix_from_slice(&TRANSLATE_1_2_3, MatrixLayout::ColumnMajor).unwrap();
        let p = m.transform_point3(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(p, Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn row_major_is_the_transpose() {
        let row = matrix_to_array(
            &matrix_from_slice(&TRANSLATE_1_2_3, MatrixLayout::ColumnMajor).unwrap(),
            MatrixLayout::RowMajor,
        );
        assert_eq!(row[3], 1.0);
        assert_eq!(row[7], 2.0);
        assert_eq!(row[11], 3.0);

        let m = matrix_from_slice(&row, MatrixLayout::RowMajor).unwrap();
        assert_eq!(m.transform_point3(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(matrix_to_array(&m, MatrixLayout::RowMajor), row);
    }

    #[test]
    fn wrong_length_is_rejected() {
        let err = matrix_from_slice(&[1.0; 9], MatrixLayout::ColumnMajor).unwrap_err();
        assert_eq!(err, CoreError::MatrixLength(9));
    }

    #[test]
    fn decompose_round_trip() {
        let t = Transform::from_trs(
            Vec3::new(0.5, -1.0, 2.0),
            Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
            Vec3::new(2.0, 2.0, 2.0),
        );
        let back = Transform::from_matrix(&t.matrix());
        assert!((back.translation - t.translation).length() < 1e-5);
        assert!((back.scale - t.scale).length() < 1e-5);
        let p = Vec3::new(1.0, 0.0, 0.0);
        assert!((back.matrix().transform_point3(p) - t.matrix().transform_point3(p)).length() < 1e-4);
    }
}
