use std::f32::consts::PI;

use glam::Vec3;

use crate::utils::{Mesh, Vertex};

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Parameters of a full UV sphere. The triangle list is produced by [`SphereGeometry::build`].
/// Segment counts are at least 3 around and 2 from pole to pole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereGeometry {
    radius: f32,
    width_segments: u32,
    height_segments: u32,
}

impl SphereGeometry {
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self {
            radius,
            width_segments: width_segments.max(3),
            height_segments: height_segments.max(2),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn width_segments(&self) -> u32 {
        self.width_segments
    }

    pub fn height_segments(&self) -> u32 {
        self.height_segments
    }

    pub fn vertex_count(&self) -> usize {
        (self.width_segments as usize + 1) * (self.height_segments as usize + 1)
    }

    /// Pole rows only contribute one triangle per quad
    pub fn triangle_count(&self) -> usize {
        self.width_segments as usize * (self.height_segments as usize - 1) * 2
    }

    /// Rings run from the +Y pole (v = 0) to the -Y pole (v = 1).
    /// Each ring repeats its first vertex at u = 1 so the texture seam has its own uv.
    pub fn build(&self) -> Mesh {
        let w = self.width_segments;
        let h = self.height_segments;

        let mut vertices = Vec::with_capacity(self.vertex_count());
        let mut indices = Vec::with_capacity(self.triangle_count() * 3);

        for iy in 0..=h {
            let v = iy as f32 / h as f32;

            // shift pole uvs to the middle of their segment
            let u_offset = if iy == 0 {
                0.5 / w as f32
            } else if iy == h {
                -0.5 / w as f32
            } else {
                0.0
            };

            for ix in 0..=w {
                let u = ix as f32 / w as f32;
                let (sin_theta, cos_theta) = (v * PI).sin_cos();
                let (sin_phi, cos_phi) = (u * 2.0 * PI).sin_cos();

                let dir = Vec3::new(-cos_phi * sin_theta, cos_theta, sin_phi * sin_theta);
                let pos = dir * self.radius;

                vertices.push(Vertex {
                    pos: pos.to_array(),
                    normal: dir.normalize_or_zero().to_array(),
                    color: WHITE,
                    uv: [u + u_offset, 1.0 - v],
                });
            }
        }

        let row = w + 1;
        for iy in 0..h {
            for ix in 0..w {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;

                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != h - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Mesh { vertices, indices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_for_default_tessellation() {
        let geometry = SphereGeometry::new(1.0, 32, 16);
        let mesh = geometry.build();
        assert_eq!(mesh.vertices.len(), 33 * 17);
        assert_eq!(mesh.triangle_count(), 32 * 15 * 2);
        assert_eq!(mesh.vertices.len(), geometry.vertex_count());
        assert_eq!(mesh.triangle_count(), geometry.triangle_count());
    }

    #[test]
    fn vertices_lie_on_the_sphere() {
        let mesh = SphereGeometry::new(2.5, 32, 16).build();
        for v in &mesh.vertices {
            let len = Vec3::from_array(v.pos).length();
            assert!((len - 2.5).abs() < 1e-4, "vertex off sphere: {len}");
        }
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn poles_on_y_axis() {
        let mesh = SphereGeometry::new(1.0, 8, 4).build();
        let top = Vec3::from_array(mesh.vertices[0].pos);
        let bottom = Vec3::from_array(mesh.vertices.last().unwrap().pos);
        assert!((top - Vec3::Y).length() < 1e-5);
        assert!((bottom + Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn zero_radius_keeps_unit_normals() {
        let mesh = SphereGeometry::new(0.0, 32, 16).build();
        let n = Vec3::from_array(mesh.vertices[40].normal);
        assert!((n.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn segment_counts_are_clamped() {
        let geometry = SphereGeometry::new(1.0, 1, 1);
        assert_eq!(geometry.width_segments(), 3);
        assert_eq!(geometry.height_segments(), 2);
        assert_eq!(geometry.build().triangle_count(), 6);
    }

    #[test]
    fn zero_segments_still_build() {
        let geometry = SphereGeometry::new(1.0, 0, 0);
        assert_eq!(geometry.triangle_count(), 6);

        let mesh = geometry.build();
        assert_eq!(mesh.vertices.len(), geometry.vertex_count());
        assert!(mesh.vertices.iter().flat_map(|v| v.pos).all(f32::is_finite));
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }
}
