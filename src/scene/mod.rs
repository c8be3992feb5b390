//! Scene objects: mesh generators with transform state
//!
//! Pure data and generation; all rendering lives in the rasterizer module.

mod cube;
mod sphere;

pub use cube::Cube;
pub use sphere::Sphere;

use serde::{Serialize, Deserialize};
use crate::rasterizer::{Mat4, Vec3};

/// Position, Euler rotation (radians), and non-uniform scale.
///
/// The model matrix is combined on demand and never cached, so mutating
/// any component is immediately visible to the next render call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// T * Rz * Ry * Rx * S, applied right-to-left to a column vector:
    /// scale, rotate X then Y then Z, translate
    pub fn model_matrix(&self) -> Mat4 {
        let t = Mat4::translation(self.position.x, self.position.y, self.position.z);
        let rx = Mat4::rot_x(self.rotation.x);
        let ry = Mat4::rot_y(self.rotation.y);
        let rz = Mat4::rot_z(self.rotation.z);
        let s = Mat4::scale(self.scale.x, self.scale.y, self.scale.z);

        t * rz * ry * rx * s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Vec4;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_default_transform_is_identity() {
        let m = Transform::default().model_matrix();
        let v = Vec4::new(1.0, 2.0, 3.0, 1.0);
        let out = m.transform(v);
        assert!((out.x - 1.0).abs() < EPS);
        assert!((out.y - 2.0).abs() < EPS);
        assert!((out.z - 3.0).abs() < EPS);
    }

    #[test]
    fn test_scale_applies_before_translation() {
        let t = Transform {
            position: Vec3::new(10.0, 0.0, 0.0),
            rotation: Vec3::ZERO,
            scale: Vec3::new(2.0, 2.0, 2.0),
        };
        let out = t.model_matrix().transform(Vec4::new(1.0, 0.0, 0.0, 1.0));
        // (1,0,0) scales to (2,0,0), then translates to (12,0,0)
        assert!((out.x - 12.0).abs() < EPS);
    }

    #[test]
    fn test_rotation_order_x_then_y() {
        use std::f32::consts::FRAC_PI_2;
        let t = Transform {
            position: Vec3::ZERO,
            rotation: Vec3::new(FRAC_PI_2, FRAC_PI_2, 0.0),
            scale: Vec3::ONE,
        };
        // (0,1,0) -rotX-> (0,0,1) -rotY-> (1,0,0)
        let out = t.model_matrix().transform(Vec4::new(0.0, 1.0, 0.0, 1.0));
        assert!((out.x - 1.0).abs() < EPS);
        assert!(out.y.abs() < EPS);
        assert!(out.z.abs() < EPS);
    }
}
