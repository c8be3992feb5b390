//! Prism Engine: a software 3D rasterizer
//!
//! Runs the full model -> world -> camera -> clip -> screen pipeline on
//! the CPU and hands macroquad a finished pixel buffer each frame.
//! Controls: Space toggles wireframe/filled, S cycles SSAA, P saves a PNG.

mod config;
mod rasterizer;
mod scene;

use std::cell::RefCell;
use std::rc::Rc;

use macroquad::prelude::*;

use config::{load_config, RenderConfig};
use rasterizer::{Color as RasterColor, DrawMode, Renderable, Renderer, Vec3};
use scene::{Cube, Sphere};

const CONFIG_PATH: &str = "assets/demo.ron";
const SCREENSHOT_PATH: &str = "screenshot.png";

fn window_conf() -> Conf {
    Conf {
        window_title: "Prism Engine".to_string(),
        window_width: rasterizer::WIDTH as i32,
        window_height: rasterizer::HEIGHT as i32,
        window_resizable: true,
        ..Default::default()
    }
}

/// Repack the ARGB frame into the RGBA byte order macroquad uploads
fn frame_to_rgba(frame: &[u32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(frame.len() * 4);
    for px in frame {
        bytes.push((px >> 16) as u8);
        bytes.push((px >> 8) as u8);
        bytes.push(*px as u8);
        bytes.push((px >> 24) as u8);
    }
    bytes
}

#[macroquad::main(window_conf)]
async fn main() {
    let cfg = match load_config(CONFIG_PATH) {
        Ok(cfg) => {
            println!("Loaded config from {}", CONFIG_PATH);
            cfg
        }
        Err(e) => {
            eprintln!("Config load failed ({}), using defaults", e);
            RenderConfig::default()
        }
    };

    let mut renderer = Renderer::new(cfg.width, cfg.height);
    renderer.set_camera(cfg.camera.eye, cfg.camera.target, cfg.camera.up);
    renderer.set_projection(cfg.fov_degrees.to_radians(), cfg.near, cfg.far);
    if cfg.ssaa >= 2 {
        renderer.enable_ssaa(cfg.ssaa);
        println!("SSAA x{}", cfg.ssaa);
    }

    let cube = Rc::new(RefCell::new(Cube::new()));
    let sphere = Rc::new(RefCell::new(Sphere::new(0.8, 12, 16)));
    sphere
        .borrow_mut()
        .set_position(Vec3::new(2.2, 0.0, -1.0));

    let cube_obj: Rc<RefCell<dyn Renderable>> = cube.clone();
    let sphere_obj: Rc<RefCell<dyn Renderable>> = sphere.clone();
    for (name, obj) in [("cube", &cube_obj), ("sphere", &sphere_obj)] {
        if let Err(e) = renderer.add_object(obj) {
            eprintln!("Failed to register {}: {}", name, e);
        }
    }

    let mut angle = 0.0f32;
    let mut filled = false;

    loop {
        if is_key_pressed(KeyCode::Space) {
            filled = !filled;
            println!("Draw mode: {}", if filled { "filled" } else { "wireframe" });
        }

        if is_key_pressed(KeyCode::S) {
            let next = match renderer.ssaa_factor() {
                1 => 2,
                2 => 4,
                _ => 1,
            };
            renderer.enable_ssaa(next);
            println!("SSAA x{}", next);
        }

        cube.borrow_mut().set_rotation(Vec3::new(angle, 0.5, 0.0));
        sphere.borrow_mut().set_rotation(Vec3::new(0.0, angle, 0.0));
        angle += 0.4 * get_frame_time();

        renderer.clear(RasterColor::BLACK);
        let mode = if filled {
            DrawMode::Filled(RasterColor::new(90, 170, 255))
        } else {
            DrawMode::Wireframe(RasterColor::WHITE)
        };
        renderer.render_scene(mode);

        let rgba = frame_to_rgba(renderer.resolve());

        if is_key_pressed(KeyCode::P) {
            match image::save_buffer(
                SCREENSHOT_PATH,
                &rgba,
                cfg.width as u32,
                cfg.height as u32,
                image::ExtendedColorType::Rgba8,
            ) {
                Ok(()) => println!("Saved {}", SCREENSHOT_PATH),
                Err(e) => eprintln!("Screenshot failed: {}", e),
            }
        }

        let texture = Texture2D::from_rgba8(cfg.width as u16, cfg.height as u16, &rgba);
        texture.set_filter(FilterMode::Nearest);

        clear_background(BLACK);
        draw_texture_ex(
            &texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(screen_width(), screen_height())),
                ..Default::default()
            },
        );

        next_frame().await
    }
}
