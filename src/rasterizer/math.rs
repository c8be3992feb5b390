//! Vector and matrix math for the rendering pipeline
//!
//! Plain value types, row-major matrices, no SIMD.

use std::ops::{Add, Mul, Sub};
use serde::{Serialize, Deserialize};

/// 2D Vector
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (signed area of the parallelogram)
    pub fn cross(self, other: Vec2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn norm(self) -> Vec2 {
        let l = self.len();
        if l == 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(self.x / l, self.y / l)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f32) -> Vec2 {
        Vec2::new(self.x * s, self.y * s)
    }
}

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const ONE: Vec3 = Vec3 { x: 1.0, y: 1.0, z: 1.0 };
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Normalize; a zero-length vector stays zero instead of going NaN
    pub fn norm(self) -> Vec3 {
        let l = self.len();
        if l == 0.0 {
            return Vec3::ZERO;
        }
        Vec3::new(self.x / l, self.y / l, self.z / l)
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }
}

/// Homogeneous 4D vector, used through the projection pipeline
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Lift a 3D point into homogeneous coordinates (w = 1)
    pub fn from_point(p: Vec3) -> Self {
        Self::new(p.x, p.y, p.z, 1.0)
    }

    pub fn dot(self, other: Vec4) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Perspective divide. Callers must guard near-zero w themselves;
    /// clip-space w can legitimately be zero or negative mid-pipeline.
    pub fn homo(self) -> Vec3 {
        Vec3::new(self.x / self.w, self.y / self.w, self.z / self.w)
    }
}

impl Add for Vec4 {
    type Output = Vec4;
    fn add(self, other: Vec4) -> Vec4 {
        Vec4::new(
            self.x + other.x,
            self.y + other.y,
            self.z + other.z,
            self.w + other.w,
        )
    }
}

impl Sub for Vec4 {
    type Output = Vec4;
    fn sub(self, other: Vec4) -> Vec4 {
        Vec4::new(
            self.x - other.x,
            self.y - other.y,
            self.z - other.z,
            self.w - other.w,
        )
    }
}

impl Mul<f32> for Vec4 {
    type Output = Vec4;
    fn mul(self, s: f32) -> Vec4 {
        Vec4::new(self.x * s, self.y * s, self.z * s, self.w * s)
    }
}

/// Row-major 3x3 matrix (2D transforms)
#[derive(Debug, Clone, Copy)]
pub struct Mat3 {
    pub m: [[f32; 3]; 3],
}

impl Mat3 {
    pub fn identity() -> Self {
        Self {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Rotation about the implicit Z axis
    pub fn rotation(angle_rad: f32) -> Self {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Self {
            m: [[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    pub fn translation(tx: f32, ty: f32) -> Self {
        let mut mat = Self::identity();
        mat.m[0][2] = tx;
        mat.m[1][2] = ty;
        mat
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        let mut mat = Self::identity();
        mat.m[0][0] = sx;
        mat.m[1][1] = sy;
        mat
    }

    pub fn transform(&self, v: Vec2) -> Vec2 {
        Vec2::new(
            self.m[0][0] * v.x + self.m[0][1] * v.y + self.m[0][2],
            self.m[1][0] * v.x + self.m[1][1] * v.y + self.m[1][2],
        )
    }
}

impl Mul for Mat3 {
    type Output = Mat3;
    fn mul(self, rhs: Mat3) -> Mat3 {
        let mut result = Mat3 { m: [[0.0; 3]; 3] };
        for row in 0..3 {
            for col in 0..3 {
                for k in 0..3 {
                    result.m[row][col] += self.m[row][k] * rhs.m[k][col];
                }
            }
        }
        result
    }
}

/// Row-major 4x4 matrix (3D transforms and projection)
#[derive(Debug, Clone, Copy)]
pub struct Mat4 {
    pub m: [[f32; 4]; 4],
}

impl Mat4 {
    pub fn zero() -> Self {
        Self { m: [[0.0; 4]; 4] }
    }

    pub fn identity() -> Self {
        let mut mat = Self::zero();
        for i in 0..4 {
            mat.m[i][i] = 1.0;
        }
        mat
    }

    pub fn translation(tx: f32, ty: f32, tz: f32) -> Self {
        let mut mat = Self::identity();
        mat.m[0][3] = tx;
        mat.m[1][3] = ty;
        mat.m[2][3] = tz;
        mat
    }

    pub fn scale(sx: f32, sy: f32, sz: f32) -> Self {
        let mut mat = Self::identity();
        mat.m[0][0] = sx;
        mat.m[1][1] = sy;
        mat.m[2][2] = sz;
        mat
    }

    pub fn rot_x(angle_rad: f32) -> Self {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        let mut mat = Self::identity();
        mat.m[1][1] = c;
        mat.m[1][2] = -s;
        mat.m[2][1] = s;
        mat.m[2][2] = c;
        mat
    }

    pub fn rot_y(angle_rad: f32) -> Self {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        let mut mat = Self::identity();
        mat.m[0][0] = c;
        mat.m[0][2] = s;
        mat.m[2][0] = -s;
        mat.m[2][2] = c;
        mat
    }

    pub fn rot_z(angle_rad: f32) -> Self {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        let mut mat = Self::identity();
        mat.m[0][0] = c;
        mat.m[0][1] = -s;
        mat.m[1][0] = s;
        mat.m[1][1] = c;
        mat
    }

    /// OpenGL-style perspective frustum. Produces clip-space w = -z_view,
    /// so points in front of the camera end up with positive w.
    pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let tan_half_fov = (fov / 2.0).tan();
        let mut mat = Self::zero();
        mat.m[0][0] = 1.0 / (aspect * tan_half_fov);
        mat.m[1][1] = 1.0 / tan_half_fov;
        mat.m[2][2] = -(far + near) / (far - near);
        mat.m[2][3] = -(2.0 * far * near) / (far - near);
        mat.m[3][2] = -1.0;
        mat
    }

    /// View matrix from eye/target/up. The forward row is negated to match
    /// the sign convention `perspective` assumes.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let f = (target - eye).norm();
        let r = f.cross(up).norm();
        let u = r.cross(f);

        let mut mat = Self::identity();
        mat.m[0][0] = r.x;
        mat.m[0][1] = r.y;
        mat.m[0][2] = r.z;
        mat.m[1][0] = u.x;
        mat.m[1][1] = u.y;
        mat.m[1][2] = u.z;
        mat.m[2][0] = -f.x;
        mat.m[2][1] = -f.y;
        mat.m[2][2] = -f.z;
        mat.m[0][3] = -r.dot(eye);
        mat.m[1][3] = -u.dot(eye);
        mat.m[2][3] = f.dot(eye);
        mat
    }

    pub fn transform(&self, v: Vec4) -> Vec4 {
        Vec4::new(
            self.m[0][0] * v.x + self.m[0][1] * v.y + self.m[0][2] * v.z + self.m[0][3] * v.w,
            self.m[1][0] * v.x + self.m[1][1] * v.y + self.m[1][2] * v.z + self.m[1][3] * v.w,
            self.m[2][0] * v.x + self.m[2][1] * v.y + self.m[2][2] * v.z + self.m[2][3] * v.w,
            self.m[3][0] * v.x + self.m[3][1] * v.y + self.m[3][2] * v.z + self.m[3][3] * v.w,
        )
    }
}

impl Mul for Mat4 {
    type Output = Mat4;
    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut result = Mat4::zero();
        for row in 0..4 {
            for col in 0..4 {
                for k in 0..4 {
                    result.m[row][col] += self.m[row][k] * rhs.m[k][col];
                }
            }
        }
        result
    }
}

/// Barycentric coordinates of p in triangle (v1, v2, v3), using only x/y.
/// Returns (-1, -1, -1) for a degenerate (near-zero-area) triangle so the
/// coverage test fails for every pixel.
pub fn barycentric(p: Vec3, v1: Vec3, v2: Vec3, v3: Vec3) -> Vec3 {
    let d = (v2.y - v3.y) * (v1.x - v3.x) + (v3.x - v2.x) * (v1.y - v3.y);

    if d.abs() < 1e-6 {
        return Vec3::new(-1.0, -1.0, -1.0);
    }

    let u = ((v2.y - v3.y) * (p.x - v3.x) + (v3.x - v2.x) * (p.y - v3.y)) / d;
    let v = ((v3.y - v1.y) * (p.x - v3.x) + (v1.x - v3.x) * (p.y - v3.y)) / d;
    let w = 1.0 - u - v;

    Vec3::new(u, v, w)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn assert_vec3_eq(a: Vec3, b: Vec3) {
        assert!(
            (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS && (a.z - b.z).abs() < EPS,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_vec3_dot() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert!((a.dot(b) - 32.0).abs() < EPS);
    }

    #[test]
    fn test_vec3_cross() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        assert_vec3_eq(a.cross(b), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_norm_of_zero_vector_is_zero() {
        assert_vec3_eq(Vec3::ZERO.norm(), Vec3::ZERO);
        assert!(Vec2::ZERO.norm().len() < EPS);
    }

    #[test]
    fn test_mat4_identity_transform() {
        let v = Vec4::new(3.0, -2.0, 7.0, 1.0);
        let out = Mat4::identity().transform(v);
        assert!((out.x - v.x).abs() < EPS);
        assert!((out.y - v.y).abs() < EPS);
        assert!((out.z - v.z).abs() < EPS);
        assert!((out.w - v.w).abs() < EPS);
    }

    #[test]
    fn test_composition_order_matters() {
        let p = Vec4::new(1.0, 1.0, 1.0, 1.0);
        let t = Mat4::translation(1.0, 0.0, 0.0);
        let r = Mat4::rot_y(std::f32::consts::FRAC_PI_2);

        // Rotate first, then translate: (1,1,1) -> (1,1,-1) -> (2,1,-1)
        let rotate_then_translate = (t * r).transform(p);
        assert_vec3_eq(rotate_then_translate.homo(), Vec3::new(2.0, 1.0, -1.0));

        // Translate first, then rotate: (1,1,1) -> (2,1,1) -> (1,1,-2)
        let translate_then_rotate = (r * t).transform(p);
        assert_vec3_eq(translate_then_rotate.homo(), Vec3::new(1.0, 1.0, -2.0));
    }

    #[test]
    fn test_homo_scale_invariance() {
        let v = Vec4::new(2.0, 3.0, 4.0, 2.0);
        let k = 2.5;
        assert_vec3_eq(v.homo(), (v * k).homo());
        assert_vec3_eq(v.homo(), Vec3::new(1.0, 1.5, 2.0));
    }

    #[test]
    fn test_look_at_moves_world_origin_in_front() {
        let view = Mat4::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::UP);
        let origin = view.transform(Vec4::new(0.0, 0.0, 0.0, 1.0));
        // The world origin sits 5 units in front of the camera (-Z in view space)
        assert_vec3_eq(origin.homo(), Vec3::new(0.0, 0.0, -5.0));
    }

    #[test]
    fn test_perspective_w_is_negated_view_z() {
        let proj = Mat4::perspective(std::f32::consts::FRAC_PI_3, 4.0 / 3.0, 0.1, 100.0);
        let clip = proj.transform(Vec4::new(0.0, 0.0, -4.0, 1.0));
        assert!((clip.w - 4.0).abs() < EPS);
    }

    #[test]
    fn test_mat3_rotation_and_translation() {
        let rot = Mat3::rotation(std::f32::consts::FRAC_PI_2);
        let p = rot.transform(Vec2::new(1.0, 0.0));
        assert!(p.x.abs() < EPS && (p.y - 1.0).abs() < EPS);

        let moved = (Mat3::translation(2.0, -1.0) * rot).transform(Vec2::new(1.0, 0.0));
        assert!((moved.x - 2.0).abs() < EPS && moved.y.abs() < EPS);
    }

    #[test]
    fn test_barycentric_inside() {
        let v1 = Vec3::new(0.0, 0.0, 0.0);
        let v2 = Vec3::new(10.0, 0.0, 0.0);
        let v3 = Vec3::new(5.0, 10.0, 0.0);
        let bc = barycentric(Vec3::new(5.0, 3.0, 0.0), v1, v2, v3);
        assert!(bc.x >= 0.0 && bc.y >= 0.0 && bc.z >= 0.0);
        assert!((bc.x + bc.y + bc.z - 1.0).abs() < EPS);
    }

    #[test]
    fn test_barycentric_degenerate_sentinel() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(1.0, 1.0, 0.0);
        let c = Vec3::new(2.0, 2.0, 0.0);
        let bc = barycentric(Vec3::new(1.0, 1.0, 0.0), a, b, c);
        assert!(bc.x < 0.0 && bc.y < 0.0 && bc.z < 0.0);
    }
}
