pub mod mesh;

pub use mesh::{Mesh, MeshData};
