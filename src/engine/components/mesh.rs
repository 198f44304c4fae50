use anyhow::{anyhow, bail};
use glow::HasContext;

use crate::engine::rendering::shader_bootstrap::AttributeSlot;

const COMPONENTS_PER_VERTEX: usize = 3;

/// Host-side vertex data for one mesh: xyz positions and optional rgb
/// colours, one triple per vertex.
#[derive(Clone, Copy, Debug)]
pub struct MeshData<'a> {
    pub positions: &'a [f32],
    pub colours: Option<&'a [f32]>,
}

impl<'a> MeshData<'a> {
    pub fn new(positions: &'a [f32]) -> Self {
        Self {
            positions,
            colours: None,
        }
    }

    pub fn with_colours(mut self, colours: &'a [f32]) -> Self {
        self.colours = Some(colours);
        self
    }

    /// Checks the layout and returns the number of vertices.
    pub fn vertex_count(&self) -> anyhow::Result<usize> {
        if self.positions.is_empty() || self.positions.len() % COMPONENTS_PER_VERTEX != 0 {
            bail!(
                "expected xyz position triples, got {} floats",
                self.positions.len()
            );
        }
        let count = self.positions.len() / COMPONENTS_PER_VERTEX;

        if let Some(colours) = self.colours {
            if colours.len() != self.positions.len() {
                bail!(
                    "{} colour floats do not cover {count} vertices",
                    colours.len()
                );
            }
        }

        Ok(count)
    }
}

// GPU-side mesh: one VAO and the buffers it references
#[derive(Clone, Debug)]
pub struct Mesh {
    pub vao: glow::VertexArray,
    pub buffers: Vec<glow::Buffer>,
    pub vertex_count: usize,
}

impl Mesh {
    /// Uploads `data` into fresh vertex buffers bound to the fixed attribute
    /// slots and records them in a new VAO.
    pub fn upload(gl: &glow::Context, data: &MeshData<'_>) -> anyhow::Result<Self> {
        let vertex_count = data.vertex_count()?;

        unsafe {
            let vao = gl.create_vertex_array().map_err(|e| anyhow!(e))?;
            gl.bind_vertex_array(Some(vao));

            let mut buffers = Vec::with_capacity(2);
            buffers.push(upload_attribute(gl, AttributeSlot::Position, data.positions)?);
            if let Some(colours) = data.colours {
                buffers.push(upload_attribute(gl, AttributeSlot::Colour, colours)?);
            }

            gl.bind_vertex_array(None);

            Ok(Self {
                vao,
                buffers,
                vertex_count,
            })
        }
    }

    pub fn draw(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            gl.draw_arrays(glow::TRIANGLES, 0, self.vertex_count as i32);
        }
    }

    pub fn delete(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_vertex_array(self.vao);
            for buffer in &self.buffers {
                gl.delete_buffer(*buffer);
            }
        }
    }
}

/// Expects the target VAO to be bound.
fn upload_attribute(
    gl: &glow::Context,
    slot: AttributeSlot,
    values: &[f32],
) -> anyhow::Result<glow::Buffer> {
    unsafe {
        let vbo = gl.create_buffer().map_err(|e| anyhow!(e))?;
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, bytemuck::cast_slice(values), glow::STATIC_DRAW);
        gl.vertex_attrib_pointer_f32(
            slot.location(),
            COMPONENTS_PER_VERTEX as i32,
            glow::FLOAT,
            false,
            0,
            0,
        );
        gl.enable_vertex_attrib_array(slot.location());
        Ok(vbo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_vertices_from_position_triples() {
        let positions = [0.0; 18];
        assert_eq!(MeshData::new(&positions).vertex_count().unwrap(), 6);
    }

    #[test]
    fn colours_must_cover_every_vertex() {
        let positions = [0.0; 18];
        let colours = [1.0; 9];
        let err = MeshData::new(&positions)
            .with_colours(&colours)
            .vertex_count()
            .unwrap_err();
        assert!(err.to_string().contains("do not cover 6 vertices"));

        let colours = [1.0; 18];
        let data = MeshData::new(&positions).with_colours(&colours);
        assert_eq!(data.vertex_count().unwrap(), 6);
    }

    #[test]
    fn rejects_empty_or_ragged_positions() {
        assert!(MeshData::new(&[]).vertex_count().is_err());
        assert!(MeshData::new(&[0.0, 1.0]).vertex_count().is_err());
        assert!(MeshData::new(&[0.0; 10]).vertex_count().is_err());
    }
}
