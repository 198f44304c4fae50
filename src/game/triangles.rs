// Hardcoded geometry for the demo scene.

use crate::engine::components::{Mesh, MeshData};

/// Two coloured triangles sharing one VAO.
pub const PAIR_POSITIONS: [f32; 18] = [
    -1.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, //
    0.0, 2.0, 1.0, //
    1.0, 0.0, -2.0, //
    0.0, 0.0, -1.0,
];

/// Red, green and blue corners, repeated for the second triangle.
pub const PAIR_COLOURS: [f32; 18] = [
    1.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, //
    0.0, 0.0, 1.0, //
    1.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, //
    0.0, 0.0, 1.0,
];

/// A single triangle with positions only.
pub const SINGLE_POSITIONS: [f32; 9] = [
    0.0, 0.0, 0.0, //
    0.0, -1.0, 0.0, //
    1.0, 0.0, 0.0,
];

pub fn mesh_data() -> [MeshData<'static>; 2] {
    [
        MeshData::new(&PAIR_POSITIONS).with_colours(&PAIR_COLOURS),
        MeshData::new(&SINGLE_POSITIONS),
    ]
}

/// Everything drawn each frame. Owned by the caller instead of living in
/// process-wide state.
#[derive(Debug)]
pub struct Scene {
    pub clear_colour: [f32; 4],
    pub meshes: Vec<Mesh>,
}

impl Scene {
    pub fn upload(gl: &glow::Context, clear_colour: [f32; 4]) -> anyhow::Result<Self> {
        let meshes = mesh_data()
            .iter()
            .map(|data| Mesh::upload(gl, data))
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self {
            clear_colour,
            meshes,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|mesh| mesh.vertex_count).sum()
    }

    pub fn delete(&self, gl: &glow::Context) {
        for mesh in &self.meshes {
            mesh.delete(gl);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_geometry_is_well_formed() {
        let counts: Vec<usize> = mesh_data()
            .iter()
            .map(|data| data.vertex_count().unwrap())
            .collect();
        assert_eq!(counts, vec![6, 3]);
    }

    #[test]
    fn only_the_first_mesh_is_coloured() {
        let [pair, single] = mesh_data();
        assert!(pair.colours.is_some());
        assert!(single.colours.is_none());
    }
}
