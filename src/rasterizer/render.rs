//! Framebuffer and the clip-space rendering pipeline
//!
//! The pipeline is a linear per-object, per-triangle sweep:
//! model -> world -> camera -> clip (frustum clipping happens here, before
//! the perspective divide) -> screen, then depth-tested line or fill
//! rasterization. No shading, no textures, no threading.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::clip::clip_triangle;
use super::math::{barycentric, Mat4, Vec3, Vec4};
use super::types::{validate_mesh, Color};

/// Substituted for near-zero homogeneous w before the perspective divide
const W_EPSILON: f32 = 1e-5;

/// Skip threshold for near-zero-area triangles
const AREA_EPSILON: f32 = 1e-6;

/// Anything that can hand the renderer a mesh and a model matrix.
///
/// The model matrix is recomputed from the object's current transform on
/// every call, so mutations are visible to the next render pass.
pub trait Renderable {
    fn vertices(&self) -> &[Vec3];
    fn indices(&self) -> &[u32];
    fn model_matrix(&self) -> Mat4;
}

/// How a render pass draws each triangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Wireframe(Color),
    Filled(Color),
}

/// Pixel buffer plus parallel depth buffer
pub struct Framebuffer {
    pub pixels: Vec<u32>, // ARGB8888, row-major, origin top-left
    pub zbuffer: Vec<f32>,
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height],
            zbuffer: vec![f32::INFINITY; width * height],
            width,
            height,
        }
    }

    /// Reset every pixel to `color` and every depth entry to "nothing drawn"
    pub fn clear(&mut self, color: Color) {
        let argb = color.to_argb();
        for px in &mut self.pixels {
            *px = argb;
        }
        for z in &mut self.zbuffer {
            *z = f32::INFINITY;
        }
    }

    /// Bounds-checked pixel write; out-of-range coordinates are discarded
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = color.to_argb();
        }
    }

    /// Depth-tested pixel write: accepted iff z is strictly closer than
    /// what the depth buffer holds. Returns whether the write happened.
    pub fn set_pixel_with_depth(&mut self, x: i32, y: i32, z: f32, color: Color) -> bool {
        if x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height {
            let idx = y as usize * self.width + x as usize;
            if z < self.zbuffer[idx] {
                self.zbuffer[idx] = z;
                self.pixels[idx] = color.to_argb();
                return true;
            }
        }
        false
    }

    /// Depth-tested line between two screen-space points (z = depth).
    /// Parametric stepping over max(|dx|, |dy|) steps; position and depth
    /// interpolate linearly per step.
    pub fn draw_line(&mut self, p0: Vec3, p1: Vec3, color: Color) {
        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;
        let steps = dx.abs().max(dy.abs()).ceil() as i32;

        if steps == 0 {
            self.set_pixel_with_depth(p0.x as i32, p0.y as i32, p0.z, color);
            return;
        }

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = p0.x + dx * t;
            let y = p0.y + dy * t;
            let z = p0.z + (p1.z - p0.z) * t;
            self.set_pixel_with_depth(x as i32, y as i32, z, color);
        }
    }

    /// Depth-tested triangle fill: bounding box clamped to the buffer,
    /// barycentric coverage test per pixel. Near-zero-area triangles are
    /// skipped entirely.
    pub fn draw_triangle(&mut self, v0: Vec3, v1: Vec3, v2: Vec3, color: Color) {
        let area = (v1.x - v0.x) * (v2.y - v0.y) - (v2.x - v0.x) * (v1.y - v0.y);
        if area.abs() < AREA_EPSILON {
            return;
        }

        let min_x = v0.x.min(v1.x).min(v2.x).max(0.0) as usize;
        let max_x = (v0.x.max(v1.x).max(v2.x) + 1.0).min(self.width as f32) as usize;
        let min_y = v0.y.min(v1.y).min(v2.y).max(0.0) as usize;
        let max_y = (v0.y.max(v1.y).max(v2.y) + 1.0).min(self.height as f32) as usize;

        for y in min_y..max_y {
            for x in min_x..max_x {
                let p = Vec3::new(x as f32, y as f32, 0.0);
                let bc = barycentric(p, v0, v1, v2);

                if bc.x >= 0.0 && bc.y >= 0.0 && bc.z >= 0.0 {
                    let z = bc.x * v0.z + bc.y * v1.z + bc.z * v2.z;
                    self.set_pixel_with_depth(x as i32, y as i32, z, color);
                }
            }
        }
    }
}

/// The renderer: camera state, render target(s), and the scene object list.
///
/// Single-threaded and synchronous; a render call runs to completion. The
/// scene list holds weak references only - callers own their objects and
/// must keep them alive while registered.
pub struct Renderer {
    width: usize,
    height: usize,
    view: Mat4,
    projection: Mat4,
    fb: Framebuffer,
    ssaa_factor: usize,
    resolved: Vec<u32>,
    objects: Vec<Weak<RefCell<dyn Renderable>>>,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            view: Mat4::identity(),
            projection: Mat4::identity(),
            fb: Framebuffer::new(width, height),
            ssaa_factor: 1,
            resolved: Vec::new(),
            objects: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The active render target (supersampled while SSAA is enabled)
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.fb
    }

    /// Replace the view matrix from eye/target/up
    pub fn set_camera(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        self.view = Mat4::look_at(eye, target, up);
    }

    /// Replace the projection matrix; aspect ratio comes from the viewport
    pub fn set_projection(&mut self, fov: f32, near: f32, far: f32) {
        let aspect = self.width as f32 / self.height as f32;
        self.projection = Mat4::perspective(fov, aspect, near, far);
    }

    /// Render at factor x the viewport resolution; factor <= 1 disables.
    /// Re-enabling at a different factor replaces the previous buffers.
    pub fn enable_ssaa(&mut self, factor: usize) {
        if factor <= 1 {
            self.disable_ssaa();
            return;
        }
        if factor == self.ssaa_factor {
            return;
        }
        self.ssaa_factor = factor;
        self.fb = Framebuffer::new(self.width * factor, self.height * factor);
        self.resolved = vec![0; self.width * self.height];
    }

    /// Restore 1:1 rendering, dropping the supersampled buffers
    pub fn disable_ssaa(&mut self) {
        if self.ssaa_factor == 1 {
            return;
        }
        self.ssaa_factor = 1;
        self.fb = Framebuffer::new(self.width, self.height);
        self.resolved = Vec::new();
    }

    pub fn ssaa_factor(&self) -> usize {
        self.ssaa_factor
    }

    /// Clear the render target's color and depth buffers
    pub fn clear(&mut self, color: Color) {
        self.fb.clear(color);
    }

    /// model -> world -> camera -> clip, composed per call (never cached)
    pub fn model_to_clip(&self, vertex: Vec3, model: &Mat4) -> Vec4 {
        let local = Vec4::from_point(vertex);
        let world = model.transform(local);
        let camera = self.view.transform(world);
        self.projection.transform(camera)
    }

    /// Perspective divide and viewport mapping. Screen y is flipped
    /// (origin top-left); depth is ndc.z remapped to [0, 1], closer =
    /// smaller. Near-zero w is replaced with a small epsilon.
    pub fn clip_to_screen(&self, clip: Vec4) -> Vec3 {
        let mut clip = clip;
        if clip.w.abs() < W_EPSILON {
            clip.w = W_EPSILON;
        }
        let ndc = clip.homo();

        Vec3::new(
            (ndc.x + 1.0) * 0.5 * self.fb.width as f32,
            (1.0 - ndc.y) * 0.5 * self.fb.height as f32,
            (ndc.z + 1.0) * 0.5,
        )
    }

    /// Full unclipped projection of a single vertex to screen space
    pub fn project_vertex(&self, vertex: Vec3, model: &Mat4) -> Vec3 {
        self.clip_to_screen(self.model_to_clip(vertex, model))
    }

    /// Draw an object's triangles as depth-tested edges
    pub fn render_wireframe(&mut self, obj: &dyn Renderable, color: Color) {
        self.render_object(obj, DrawMode::Wireframe(color));
    }

    /// Draw an object's triangles filled, via the barycentric scan
    pub fn render_filled(&mut self, obj: &dyn Renderable, color: Color) {
        self.render_object(obj, DrawMode::Filled(color));
    }

    fn render_object(&mut self, obj: &dyn Renderable, mode: DrawMode) {
        let verts = obj.vertices();
        let inds = obj.indices();
        let model = obj.model_matrix();

        for tri in inds.chunks_exact(3) {
            let clip = [
                self.model_to_clip(verts[tri[0] as usize], &model),
                self.model_to_clip(verts[tri[1] as usize], &model),
                self.model_to_clip(verts[tri[2] as usize], &model),
            ];

            for clipped in clip_triangle(clip) {
                let s0 = self.clip_to_screen(clipped[0]);
                let s1 = self.clip_to_screen(clipped[1]);
                let s2 = self.clip_to_screen(clipped[2]);

                match mode {
                    DrawMode::Wireframe(color) => {
                        self.fb.draw_line(s0, s1, color);
                        self.fb.draw_line(s1, s2, color);
                        self.fb.draw_line(s2, s0, color);
                    }
                    DrawMode::Filled(color) => {
                        self.fb.draw_triangle(s0, s1, s2, color);
                    }
                }
            }
        }
    }

    /// Register an object. The mesh is validated here - a malformed index
    /// list is rejected up front rather than crashing during a render
    /// call. Only a weak reference is stored; the caller keeps ownership.
    pub fn add_object(&mut self, obj: &Rc<RefCell<dyn Renderable>>) -> Result<(), String> {
        {
            let o = obj.borrow();
            validate_mesh(o.vertices(), o.indices())?;
        }
        self.objects.push(Rc::downgrade(obj));
        Ok(())
    }

    /// Draw every registered object in registration order. Objects the
    /// caller has dropped are skipped.
    pub fn render_scene(&mut self, mode: DrawMode) {
        let live: Vec<Rc<RefCell<dyn Renderable>>> =
            self.objects.iter().filter_map(Weak::upgrade).collect();

        for obj in &live {
            let obj = obj.borrow();
            self.render_object(&*obj, mode);
        }
    }

    /// The frame to present: the render target itself at 1:1, or the
    /// box-filtered downsample while SSAA is active (each output pixel
    /// averages its factor^2 source pixels per channel).
    pub fn resolve(&mut self) -> &[u32] {
        if self.ssaa_factor <= 1 {
            return &self.fb.pixels;
        }

        let f = self.ssaa_factor;
        let samples = (f * f) as u32;

        for y in 0..self.height {
            for x in 0..self.width {
                let mut a = 0u32;
                let mut r = 0u32;
                let mut g = 0u32;
                let mut b = 0u32;

                for sy in 0..f {
                    let row = (y * f + sy) * self.fb.width + x * f;
                    for sx in 0..f {
                        let px = self.fb.pixels[row + sx];
                        a += (px >> 24) & 0xff;
                        r += (px >> 16) & 0xff;
                        g += (px >> 8) & 0xff;
                        b += px & 0xff;
                    }
                }

                self.resolved[y * self.width + x] = ((a / samples) << 24)
                    | ((r / samples) << 16)
                    | ((g / samples) << 8)
                    | (b / samples);
            }
        }

        &self.resolved
    }
}
