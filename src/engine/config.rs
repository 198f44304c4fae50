//! Runtime configuration for the demo.
//!
//! There is no command line surface; a handful of environment variables can
//! override the defaults, which match the classic teaching setup.

use std::path::{Path, PathBuf};

use crate::engine::rendering::shader_bootstrap::ShaderPolicy;

pub const ENV_VERTEX_SHADER: &str = "RT3D_VERTEX_SHADER";
pub const ENV_FRAGMENT_SHADER: &str = "RT3D_FRAGMENT_SHADER";
pub const ENV_STRICT_SHADERS: &str = "RT3D_STRICT_SHADERS";
pub const ENV_EXIT_AFTER_FRAMES: &str = "RT3D_EXIT_AFTER_FRAMES";

#[derive(Clone, Debug, PartialEq)]
pub struct DemoConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Requested core-profile version as (major, minor).
    pub gl_version: (u8, u8),
    /// Requested MSAA sample count. Not guaranteed by the driver.
    pub samples: u8,
    pub swap_interval: u32,
    pub clear_colour: [f32; 4],
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    pub shader_policy: ShaderPolicy,
    /// Stop the frame loop on its own after this many presented frames.
    pub exit_after_frames: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        let shaders = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/assets/shaders");
        Self {
            title: "SDL/GLM/OpenGL Demo".to_string(),
            width: 1024,
            height: 720,
            gl_version: (3, 3),
            samples: 4,
            swap_interval: 1,
            // Grey, so that all-white or all-black triangles stay visible.
            clear_colour: [0.5, 0.5, 0.5, 1.0],
            vertex_shader: shaders.join("minimal.vert"),
            fragment_shader: shaders.join("minimal.frag"),
            shader_policy: ShaderPolicy::Lenient,
            exit_after_frames: None,
        }
    }
}

impl DemoConfig {
    /// Defaults with overrides taken from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides taken from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_VERTEX_SHADER).filter(|p| !p.is_empty()) {
            config.vertex_shader = PathBuf::from(path);
        }
        if let Some(path) = lookup(ENV_FRAGMENT_SHADER).filter(|p| !p.is_empty()) {
            config.fragment_shader = PathBuf::from(path);
        }

        if let Some(value) = lookup(ENV_STRICT_SHADERS) {
            match parse_flag(&value) {
                Some(true) => config.shader_policy = ShaderPolicy::Strict,
                Some(false) => config.shader_policy = ShaderPolicy::Lenient,
                None => log::warn!("Ignoring {ENV_STRICT_SHADERS}={value:?}: expected a boolean"),
            }
        }

        if let Some(value) = lookup(ENV_EXIT_AFTER_FRAMES) {
            match value.trim().parse::<u64>() {
                Ok(frames) if frames > 0 => config.exit_after_frames = Some(frames),
                _ => log::warn!(
                    "Ignoring {ENV_EXIT_AFTER_FRAMES}={value:?}: expected a positive frame count"
                ),
            }
        }

        config
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
