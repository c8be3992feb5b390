//! Sutherland-Hodgman triangle clipping in homogeneous clip space
//!
//! Clipping runs before the perspective divide so points behind the
//! camera (w <= 0) are handled correctly. The canonical view volume is
//! -w <= x,y,z <= w, one half-space per plane.

use super::math::Vec4;

/// The six frustum planes, in the order they are clipped against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipPlane {
    Left,
    Right,
    Bottom,
    Top,
    Near,
    Far,
}

impl ClipPlane {
    pub const ALL: [ClipPlane; 6] = [
        ClipPlane::Left,
        ClipPlane::Right,
        ClipPlane::Bottom,
        ClipPlane::Top,
        ClipPlane::Near,
        ClipPlane::Far,
    ];

    /// Signed distance to the plane boundary; non-negative means inside
    fn boundary(self, v: Vec4) -> f32 {
        match self {
            ClipPlane::Left => v.x + v.w,
            ClipPlane::Right => v.w - v.x,
            ClipPlane::Bottom => v.y + v.w,
            ClipPlane::Top => v.w - v.y,
            ClipPlane::Near => v.z + v.w,
            ClipPlane::Far => v.w - v.z,
        }
    }
}

/// Half-space test for a single plane
pub fn inside(v: Vec4, plane: ClipPlane) -> bool {
    plane.boundary(v) >= 0.0
}

/// Intersection of edge (a, b) with a plane boundary. A near-zero
/// denominator returns `a` unchanged instead of dividing.
pub fn intersect(a: Vec4, b: Vec4, plane: ClipPlane) -> Vec4 {
    let da = plane.boundary(a);
    let db = plane.boundary(b);
    let denom = da - db;
    if denom.abs() < 1e-6 {
        return a;
    }
    let t = (da / denom).clamp(0.0, 1.0);
    a + (b - a) * t
}

/// One Sutherland-Hodgman stage: clip a convex polygon against a single plane
pub fn clip_polygon(poly: &[Vec4], plane: ClipPlane) -> Vec<Vec4> {
    let mut out = Vec::with_capacity(poly.len() + 1);
    for i in 0..poly.len() {
        let a = poly[i];
        let b = poly[(i + 1) % poly.len()];
        let a_in = inside(a, plane);
        let b_in = inside(b, plane);

        if a_in && b_in {
            out.push(b);
        } else if a_in {
            out.push(intersect(a, b, plane));
        } else if b_in {
            out.push(intersect(a, b, plane));
            out.push(b);
        }
        // both outside: emit nothing
    }
    out
}

/// Clip a clip-space triangle against all six frustum planes and fan the
/// surviving convex polygon back into triangles (0, i, i+1). Returns an
/// empty list for a fully-outside triangle.
pub fn clip_triangle(triangle: [Vec4; 3]) -> Vec<[Vec4; 3]> {
    let mut poly: Vec<Vec4> = triangle.to_vec();

    for plane in ClipPlane::ALL {
        poly = clip_polygon(&poly, plane);
        if poly.is_empty() {
            return Vec::new();
        }
    }

    if poly.len() < 3 {
        return Vec::new();
    }

    let mut triangles = Vec::with_capacity(poly.len() - 2);
    for i in 1..poly.len() - 1 {
        triangles.push([poly[0], poly[i], poly[i + 1]]);
    }
    triangles
}
