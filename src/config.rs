//! Render configuration loading
//!
//! Uses RON (Rusty Object Notation) for a human-readable config file
//! describing the viewport, camera, projection, and SSAA settings.

use std::fs;
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::rasterizer::Vec3;

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::SerializeError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

/// Camera placement (eye/target/up, as fed to the look-at matrix)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

/// Everything the renderer needs at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    pub camera: CameraConfig,
    /// Vertical field of view, degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// 0 or 1 disables supersampling; >= 2 renders at that factor
    pub ssaa: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            camera: CameraConfig {
                eye: Vec3::new(0.0, 0.0, 5.0),
                target: Vec3::ZERO,
                up: Vec3::UP,
            },
            fov_degrees: 60.0,
            near: 0.1,
            far: 100.0,
            ssaa: 1,
        }
    }
}

/// Load a render config from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RenderConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    Ok(ron::from_str(&contents)?)
}

/// Save a render config to a RON file
pub fn save_config<P: AsRef<Path>>(config: &RenderConfig, path: P) -> Result<(), ConfigError> {
    let pretty = ron::ser::PrettyConfig::new().indentor("  ".to_string());
    let contents = ron::ser::to_string_pretty(config, pretty)?;
    fs::write(path, contents)?;
    Ok(())
}
