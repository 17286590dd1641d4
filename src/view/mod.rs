// VIEW: renderable data handed to the external renderer
pub mod geometry;
pub mod material;
pub mod renderable;

pub use geometry::SphereGeometry;
pub use material::{MaterialUniform, StandardMaterial};
pub use renderable::Renderable;
