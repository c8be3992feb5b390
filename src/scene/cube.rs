//! Unit cube mesh

use crate::rasterizer::{Mat4, Mesh, Renderable, Vec3};
use super::Transform;

/// Axis-aligned cube spanning [-1, 1] on each axis: 8 vertices, 12 triangles
pub struct Cube {
    mesh: Mesh,
    pub transform: Transform,
}

impl Cube {
    pub fn new() -> Self {
        let vertices = vec![
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
        ];

        let indices = vec![
            0, 1, 2, 2, 3, 0, // back
            4, 5, 6, 6, 7, 4, // front
            0, 1, 5, 5, 4, 0, // bottom
            2, 3, 7, 7, 6, 2, // top
            0, 3, 7, 7, 4, 0, // left
            1, 2, 6, 6, 5, 1, // right
        ];

        Self {
            mesh: Mesh { vertices, indices },
            transform: Transform::default(),
        }
    }

    pub fn set_position(&mut self, pos: Vec3) {
        self.transform.position = pos;
    }

    pub fn set_rotation(&mut self, rot: Vec3) {
        self.transform.rotation = rot;
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.transform.scale = scale;
    }
}

impl Default for Cube {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderable for Cube {
    fn vertices(&self) -> &[Vec3] {
        &self.mesh.vertices
    }

    fn indices(&self) -> &[u32] {
        &self.mesh.indices
    }

    fn model_matrix(&self) -> Mat4 {
        self.transform.model_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::validate_mesh;

    #[test]
    fn test_cube_mesh_is_valid() {
        let cube = Cube::new();
        assert_eq!(cube.vertices().len(), 8);
        assert_eq!(cube.indices().len(), 36);
        assert!(validate_mesh(cube.vertices(), cube.indices()).is_ok());
    }

    #[test]
    fn test_setters_feed_the_model_matrix() {
        let mut cube = Cube::new();
        cube.set_position(Vec3::new(3.0, 0.0, 0.0));
        let m = cube.model_matrix();
        assert!((m.m[0][3] - 3.0).abs() < 1e-6);
    }
}
