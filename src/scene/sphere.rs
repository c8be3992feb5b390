//! UV-sphere mesh generator

use std::f32::consts::PI;

use crate::rasterizer::{Mat4, Mesh, Renderable, Vec3};
use super::Transform;

/// Latitude/longitude sphere: (lat+1) * (long+1) vertices, two triangles
/// per quad patch
pub struct Sphere {
    mesh: Mesh,
    pub transform: Transform,
}

impl Sphere {
    pub fn new(radius: f32, lat_segments: u32, long_segments: u32) -> Self {
        // A sphere needs at least 2 stacks and 3 slices to enclose volume
        let lat_segments = lat_segments.max(2);
        let long_segments = long_segments.max(3);

        let mut vertices =
            Vec::with_capacity(((lat_segments + 1) * (long_segments + 1)) as usize);

        for lat in 0..=lat_segments {
            let theta = lat as f32 * PI / lat_segments as f32;
            let sin_theta = theta.sin();
            let cos_theta = theta.cos();

            for lon in 0..=long_segments {
                let phi = lon as f32 * 2.0 * PI / long_segments as f32;
                vertices.push(Vec3::new(
                    radius * sin_theta * phi.cos(),
                    radius * cos_theta,
                    radius * sin_theta * phi.sin(),
                ));
            }
        }

        let mut indices = Vec::with_capacity((lat_segments * long_segments * 6) as usize);

        for lat in 0..lat_segments {
            for lon in 0..long_segments {
                let first = lat * (long_segments + 1) + lon;
                let second = first + long_segments + 1;

                indices.extend_from_slice(&[first, second, first + 1]);
                indices.extend_from_slice(&[second, second + 1, first + 1]);
            }
        }

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

impl Renderable for Sphere {
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
