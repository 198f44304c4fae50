pub mod triangles;

pub use triangles::Scene;
