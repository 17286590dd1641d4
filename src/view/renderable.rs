use super::geometry::SphereGeometry;
use super::material::StandardMaterial;
use crate::utils::Mesh;

/// Geometry + material pair attached to a scene object.
/// The triangle list is generated once, when the renderable is created.
#[derive(Debug, Clone, PartialEq)]
pub struct Renderable {
    geometry: SphereGeometry,
    mesh: Mesh,
    material: StandardMaterial,
}

impl Renderable {
    pub fn sphere(geometry: SphereGeometry, material: StandardMaterial) -> Self {
        let mesh = geometry.build();
        Self { geometry, mesh, material }
    }

    pub fn geometry(&self) -> &SphereGeometry {
        &self.geometry
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn material(&self) -> &StandardMaterial {
        &self.material
    }
}
