//! Minimal OpenGL demo: one window, one core-profile context, one shader
//! program read from disk and two hardcoded triangle meshes, redrawn every
//! frame until the window is closed or Escape is pressed.
//!
//! - `engine::rendering`: window/context setup and the shader bootstrap
//! - `engine::components`: vertex data upload
//! - `engine::systems`: the frame loop and its quit predicate
//! - `game`: the fixed scene
//! - `app`: winit application handler tying it together

pub mod app;
pub mod engine;
pub mod game;
pub mod index;

pub use app::{run, FATAL_EXIT_CODE};
pub use engine::DemoConfig;
pub use index::Program;
