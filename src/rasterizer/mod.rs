//! Software 3D rasterizer
//!
//! A matrix-driven pipeline with no GPU involvement:
//! - model -> world -> camera -> clip transforms via Mat4
//! - Sutherland-Hodgman clipping against the homogeneous view frustum
//! - perspective-correct screen mapping with a depth-tested rasterizer
//!   (wireframe lines and barycentric triangle fill)
//! - optional supersampled anti-aliasing (render at Nx, box-filter down)

mod clip;
mod math;
mod render;
mod types;

pub use clip::*;
pub use math::*;
pub use render::*;
pub use types::*;

/// Default viewport dimensions
pub const WIDTH: usize = 640;
pub const HEIGHT: usize = 480;
