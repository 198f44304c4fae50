pub mod gl_context;
pub mod shader_bootstrap;

pub use gl_context::GlWindow;
pub use shader_bootstrap::{bootstrap_program, Bootstrap, ShaderError, ShaderPolicy};
