//! Core types for the rasterizer

use super::math::Vec3;

/// RGBA color (0-255 per channel); packed as ARGB8888 in the framebuffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Pack to ARGB8888 (the framebuffer pixel layout)
    pub fn to_argb(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Unpack from ARGB8888
    pub fn from_argb(px: u32) -> Self {
        Self {
            a: (px >> 24) as u8,
            r: (px >> 16) as u8,
            g: (px >> 8) as u8,
            b: px as u8,
        }
    }

    /// Convert to [r, g, b, a] bytes (texture upload order)
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Indexed triangle mesh. Owns its storage; three consecutive indices
/// name one triangle.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Validating constructor; malformed index lists are rejected here
    /// rather than crashing mid-render.
    pub fn new(vertices: Vec<Vec3>, indices: Vec<u32>) -> Result<Self, String> {
        validate_mesh(&vertices, &indices)?;
        Ok(Self { vertices, indices })
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Check that the index list is a whole number of triangles and every
/// index names an existing vertex.
pub fn validate_mesh(vertices: &[Vec3], indices: &[u32]) -> Result<(), String> {
    if indices.len() % 3 != 0 {
        return Err(format!(
            "index count {} is not a multiple of 3",
            indices.len()
        ));
    }
    if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
        return Err(format!(
            "index {} out of range for {} vertices",
            bad,
            vertices.len()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_argb_round_trip() {
        let c = Color::with_alpha(12, 34, 56, 78);
        assert_eq!(Color::from_argb(c.to_argb()), c);
        assert_eq!(Color::RED.to_argb(), 0xffff0000);
        assert_eq!(Color::BLUE.to_argb(), 0xff0000ff);
    }

    #[test]
    fn test_mesh_accepts_valid_indices() {
        let mesh = Mesh::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 2],
        )
        .unwrap();
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_mesh_rejects_partial_triangle() {
        let result = Mesh::new(vec![Vec3::ZERO, Vec3::ONE], vec![0, 1]);
        assert!(result.is_err());
    }

    #[test]
    fn test_mesh_rejects_out_of_range_index() {
        let result = Mesh::new(vec![Vec3::ZERO, Vec3::ONE], vec![0, 1, 2]);
        assert!(result.is_err());
    }
}
