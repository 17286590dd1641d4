use glam::Vec3;

/// Metallic-roughness material. Defaults give a plain white, fully rough, non-metallic surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardMaterial {
    pub color: Vec3,
    pub emissive: Vec3,
    pub roughness: f32,
    pub metalness: f32,
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            emissive: Vec3::ZERO,
            roughness: 1.0,
            metalness: 0.0,
        }
    }
}

impl StandardMaterial {
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    pub fn uniform(&self) -> MaterialUniform {
        MaterialUniform {
            color: self.color.extend(1.0).to_array(),
            emissive: self.emissive.extend(1.0).to_array(),
            roughness: self.roughness.clamp(0.0, 1.0),
            metalness: self.metalness.clamp(0.0, 1.0),
            _pad: [0.0; 2],
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub color: [f32; 4],
    pub emissive: [f32; 4],
    pub roughness: f32,
    pub metalness: f32,
    pub _pad: [f32; 2],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_white_and_rough() {
        let m = StandardMaterial::default();
        assert_eq!(m.color, Vec3::ONE);
        assert_eq!(m.roughness, 1.0);
        assert_eq!(m.metalness, 0.0);
    }

    #[test]
    fn uniform_is_16_byte_aligned() {
        let u = StandardMaterial::default().uniform();
        assert_eq!(bytemuck::bytes_of(&u).len() % 16, 0);
        assert_eq!(u.color, [1.0, 1.0, 1.0, 1.0]);
    }
}
