use anyhow::Context as _;
use glow::HasContext;

use crate::engine::config::DemoConfig;
use crate::engine::rendering::shader_bootstrap::bootstrap_program;
use crate::game::Scene;

// === MAIN PROGRAM ===

/// GL-side state of the demo: the function table, the shader program and
/// the uploaded scene.
pub struct Program {
    gl: glow::Context,
    shader_program: glow::Program,
    scene: Scene,
}

impl Program {
    /// Runs the shader bootstrap and geometry upload against a current
    /// context.
    pub fn new(gl: glow::Context, config: &DemoConfig) -> anyhow::Result<Self> {
        let bootstrap = bootstrap_program(&gl, &config.vertex_shader, &config.fragment_shader)
            .context("Unable to create shader program")?;
        let shader_program = bootstrap.resolve(&gl, config.shader_policy)?;

        let scene = match Scene::upload(&gl, config.clear_colour) {
            Ok(scene) => scene,
            Err(err) => {
                unsafe { gl.delete_program(shader_program) };
                return Err(err.context("Unable to upload scene geometry"));
            }
        };

        log::info!(
            "Program initialized: {} mesh(es), {} vertices",
            scene.meshes.len(),
            scene.vertex_count()
        );

        Ok(Self {
            gl,
            shader_program,
            scene,
        })
    }

    pub fn render(&mut self, width: u32, height: u32) {
        let [r, g, b, a] = self.scene.clear_colour;
        unsafe {
            self.gl.viewport(0, 0, width as i32, height as i32);
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(glow::COLOR_BUFFER_BIT);

            self.gl.use_program(Some(self.shader_program));
        }

        for mesh in &self.scene.meshes {
            mesh.draw(&self.gl);
        }

        unsafe {
            self.gl.bind_vertex_array(None);
        }
    }

    pub fn cleanup(&self) {
        self.scene.delete(&self.gl);
        unsafe {
            self.gl.delete_program(self.shader_program);
        }
    }
}
