use glam::{DMat4, DVec3, Mat4};

use super::entity::EntityId;
use super::scene_graph::Node;
use super::tick::Tick;
use crate::config::ClientConfig;

/// Perspective viewpoint. Where it sits and where it looks come from its scene node,
/// which looks down its local -Z axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub fov_y: f64,
    pub aspect: f64,
    pub z_near: f64,
    pub z_far: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_y: 75f64.to_radians(),
            aspect: 1.0,
            z_near: 0.1,
            z_far: 2000.0,
        }
    }
}

impl Camera {
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f64 / height as f64;
        }
    }

    pub fn projection(&self) -> DMat4 {
        DMat4::perspective_rh(self.fov_y, self.aspect, self.z_near, self.z_far)
    }

    /// `world` is the camera node's world matrix
    pub fn view_proj(&self, world: DMat4) -> Mat4 {
        (self.projection() * world.inverse()).as_mat4()
    }
}

/// Camera that rides along under another object's node.
/// `followed` is a plain handle: the camera never keeps its target alive.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowCamera {
    pub camera: Camera,
    pub follow_distance: f64,
    /// Radians of pitch per unit of vertical pointer motion
    pub elevation_coef: f64,
    /// Pitch applied when a new target is picked up, radians
    pub follow_pitch: f64,
    pub(crate) followed: Option<EntityId>,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

impl FollowCamera {
    pub fn from_config(cfg: &ClientConfig) -> Self {
        Self {
            camera: Camera::default(),
            follow_distance: cfg.follow_distance,
            elevation_coef: cfg.mouse_elevation_coef,
            follow_pitch: cfg.follow_pitch_deg.to_radians(),
            followed: None,
        }
    }

    pub fn followed(&self) -> Option<EntityId> {
        self.followed
    }

    /// Local offset from the followed node: behind and above it
    pub fn offset(&self) -> DVec3 {
        DVec3::new(0.0, -self.follow_distance, self.follow_distance / 2.0)
    }

    /// Per-tick pitch from pointer motion. Pitch only moves on frames that also
    /// carry horizontal motion, and horizontal motion is otherwise unused.
    pub fn update(&self, node: &mut Node, tick: &Tick) {
        let motion = tick.input.mouse_motion;
        if motion.x != 0.0 {
            node.rotation.x -= self.elevation_coef * motion.y;
            tracing::trace!(frame = tick.frame, pitch = node.rotation.x, "follow camera pitch");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_follow_camera() {
        let cam = FollowCamera::default();
        assert_eq!(cam.follow_distance, 3.0);
        assert_eq!(cam.elevation_coef, 0.0015);
        assert_eq!(cam.offset(), DVec3::new(0.0, -3.0, 1.5));
        assert!((cam.follow_pitch - std::f64::consts::FRAC_PI_3).abs() < 1e-12);
        assert!(cam.followed().is_none());
    }

    #[test]
    fn pitch_needs_horizontal_motion() {
        let cam = FollowCamera::default();
        let mut graph = crate::model::SceneGraph::new();
        let id = graph.create_node("cam");
        let node = graph.get_mut(id).unwrap();
        node.rotation.x = 1.0;

        cam.update(node, &Tick::with_motion(0.0, 250.0));
        assert_eq!(node.rotation.x, 1.0);

        cam.update(node, &Tick::with_motion(4.0, 200.0));
        assert!((node.rotation.x - (1.0 - 0.0015 * 200.0)).abs() < 1e-12);
        assert_eq!(node.rotation.y, 0.0);
        assert_eq!(node.rotation.z, 0.0);
    }

    #[test]
    fn set_aspect_ignores_zero_height() {
        let mut cam = Camera::default();
        cam.set_aspect(1280, 720);
        assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-12);
        cam.set_aspect(100, 0);
        assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn view_proj_puts_target_in_front() {
        let cam = Camera::default();
        // camera at +Z looking down -Z toward the origin
        let world = DMat4::from_translation(DVec3::new(0.0, 0.0, 5.0));
        let clip = cam.view_proj(world) * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
