//! 3x3 matrices for rigid transforms.
//!
//! Row-major storage. Only the operations the renderer needs: products,
//! transpose, and the rotation constructors used by the camera and by mesh
//! transforms (axis-aligned rotations plus rotation about an arbitrary axis).

use std::ops::Mul;

use super::vec3::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat3 {
    m: [[f32; 3]; 3],
}

impl Mat3 {
    pub const fn new(m: [[f32; 3]; 3]) -> Self {
        Self { m }
    }

    pub const IDENTITY: Self = Self::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.m[row][col]
    }

    pub fn transpose(&self) -> Self {
        let mut t = [[0.0; 3]; 3];
        for (r, row) in self.m.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                t[c][r] = *value;
            }
        }
        Self::new(t)
    }

    /// Rotation about the world X axis.
    pub fn rotation_x(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new([[1.0, 0.0, 0.0], [0.0, cos, -sin], [0.0, sin, cos]])
    }

    /// Rotation about the world Y axis.
    pub fn rotation_y(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new([[cos, 0.0, sin], [0.0, 1.0, 0.0], [-sin, 0.0, cos]])
    }

    /// Rotation about the world Z axis (the vertical axis in this renderer).
    pub fn rotation_z(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new([[cos, -sin, 0.0], [sin, cos, 0.0], [0.0, 0.0, 1.0]])
    }

    /// The skew-symmetric matrix `K` with `K * v == axis x v`.
    fn cross_matrix(axis: Vec3) -> Self {
        Self::new([
            [0.0, -axis.z, axis.y],
            [axis.z, 0.0, -axis.x],
            [-axis.y, axis.x, 0.0],
        ])
    }

    /// Rotation by `angle` about an arbitrary axis (Rodrigues' formula):
    /// `R = I*cos + K*sin + (k k^T)(1 - cos)`.
    ///
    /// The axis is normalized internally; a zero axis yields the identity.
    pub fn rotation_about_axis(axis: Vec3, angle: f32) -> Self {
        let k = axis.normalize_or(Vec3::ZERO);
        if k == Vec3::ZERO {
            return Self::IDENTITY;
        }

        let (sin, cos) = angle.sin_cos();
        let cross = Self::cross_matrix(k);
        let outer = Self::new([
            [k.x * k.x, k.x * k.y, k.x * k.z],
            [k.y * k.x, k.y * k.y, k.y * k.z],
            [k.z * k.x, k.z * k.y, k.z * k.z],
        ]);

        let mut m = [[0.0; 3]; 3];
        for (r, row) in m.iter_mut().enumerate() {
            for (c, value) in row.iter_mut().enumerate() {
                let id = if r == c { cos } else { 0.0 };
                *value = id + cross.m[r][c] * sin + outer.m[r][c] * (1.0 - cos);
            }
        }
        Self::new(m)
    }
}

/// Matrix product.
impl Mul<Mat3> for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Self::Output {
        let mut m = [[0.0; 3]; 3];
        for (r, row) in m.iter_mut().enumerate() {
            for (c, value) in row.iter_mut().enumerate() {
                *value = (0..3).map(|k| self.m[r][k] * rhs.m[k][c]).sum();
            }
        }
        Mat3::new(m)
    }
}

/// Matrix-vector product (column vector on the right).
impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Self::Output {
        Vec3::new(
            self.m[0][0] * v.x + self.m[0][1] * v.y + self.m[0][2] * v.z,
            self.m[1][0] * v.x + self.m[1][1] * v.y + self.m[1][2] * v.z,
            self.m[2][0] * v.x + self.m[2][1] * v.y + self.m[2][2] * v.z,
        )
    }
}
