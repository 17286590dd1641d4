use tracing::{debug, info};

use super::input::InputState;
use crate::error::{Error, Result};
use crate::model::{EntityId, EntityKind, Scene, Tick};

/// Longest step handed to the scene, in seconds
pub const MAX_DT: f64 = 0.1;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Owns the scene and drives it one tick per frame
#[derive(Debug)]
pub struct FrameLoop {
    pub scene: Scene,
    pub input: InputState,
    pub active_camera: Option<EntityId>,
    frame: u64,
    elapsed: f64,
}

impl FrameLoop {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            input: InputState::new(),
            active_camera: None,
            frame: 0,
            elapsed: 0.0,
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Match the active camera's aspect ratio to the surface size
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        let Some(camera) = self.active_camera else { return };
        match self.scene.get_mut(camera).map(|e| &mut e.kind) {
            Some(EntityKind::Camera(c)) => c.set_aspect(width, height),
            Some(EntityKind::FollowCamera(fc)) => fc.camera.set_aspect(width, height),
            _ => {}
        }
    }

    /// Advance one frame: drain input into a tick, update every entity,
    /// and return the active camera's uniform if there is one.
    pub fn step(&mut self, dt: f64) -> Option<CameraUniform> {
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_DT) } else { 0.0 };
        self.frame += 1;
        self.elapsed += dt;

        let tick = Tick {
            frame: self.frame,
            dt,
            elapsed: self.elapsed,
            input: self.input.snapshot(),
        };
        self.scene.update(&tick);

        let camera = self.active_camera?;
        self.scene.view_proj(camera).map(|m| CameraUniform {
            view_proj: m.to_cols_array_2d(),
        })
    }

    /// Point the active follow camera at the next spheroid, wrapping around.
    /// Returns the new target, or `None` if the scene has no spheroids.
    pub fn cycle_follow_target(&mut self) -> Result<Option<EntityId>> {
        let camera = self.active_camera.ok_or(Error::NoActiveCamera)?;
        let current = self
            .scene
            .get(camera)
            .ok_or(Error::UnknownEntity)?
            .as_follow_camera()
            .ok_or(Error::NotACamera)?
            .followed();

        let spheroids: Vec<EntityId> = self
            .scene
            .iter()
            .filter(|(_, e)| matches!(e.kind, EntityKind::Spheroid(_)))
            .map(|(id, _)| id)
            .collect();
        if spheroids.is_empty() {
            return Ok(None);
        }

        let next = match current.and_then(|c| spheroids.iter().position(|&s| s == c)) {
            Some(i) => spheroids[(i + 1) % spheroids.len()],
            None => spheroids[0],
        };
        self.scene.follow(camera, next)?;

        if let Some(target) = self.scene.get(next) {
            info!("camera now following {}", target.object);
        }
        debug!(frame = self.frame, "follow target cycled");
        Ok(Some(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::controller::input::InputEvent;

    fn frame_loop() -> (FrameLoop, EntityId, EntityId, EntityId) {
        let mut scene = Scene::new(ClientConfig::default());
        let earth = scene.spawn_spheroid("Earth", "", 1.0, 5.972e24).unwrap();
        let moon = scene.spawn_spheroid("Moon", "", 0.27, 7.342e22).unwrap();
        let cam = scene.spawn_follow_camera("cam", "");
        scene.follow(cam, earth).unwrap();
        let mut fl = FrameLoop::new(scene);
        fl.active_camera = Some(cam);
        (fl, earth, moon, cam)
    }

    #[test]
    fn step_feeds_pointer_motion_to_camera() {
        let (mut fl, _, _, cam) = frame_loop();
        let start = fl.scene.node(cam).unwrap().rotation.x;

        fl.input.process_event(&InputEvent::PointerLockChanged { locked: true });
        fl.input.process_event(&InputEvent::MouseMove { dx: 3.0, dy: 10.0 });
        assert!(fl.step(1.0 / 60.0).is_some());

        let pitch = fl.scene.node(cam).unwrap().rotation.x;
        assert!((pitch - (start - 0.0015 * 10.0)).abs() < 1e-12);

        // motion was consumed by the first step
        fl.step(1.0 / 60.0);
        assert_eq!(fl.scene.node(cam).unwrap().rotation.x, pitch);
        assert_eq!(fl.frame(), 2);
    }

    #[test]
    fn viewport_sets_camera_aspect() {
        let (mut fl, _, _, cam) = frame_loop();
        fl.set_viewport(1600, 800);
        let aspect = fl.scene.get(cam).unwrap().kind.camera().unwrap().aspect;
        assert_eq!(aspect, 2.0);
    }

    #[test]
    fn dt_is_clamped() {
        let (mut fl, _, _, _) = frame_loop();
        fl.step(5.0);
        assert_eq!(fl.elapsed(), MAX_DT);
        fl.step(-1.0);
        fl.step(f64::NAN);
        assert_eq!(fl.elapsed(), MAX_DT);
    }

    #[test]
    fn no_active_camera_no_uniform() {
        let mut fl = FrameLoop::new(Scene::default());
        assert!(fl.step(0.016).is_none());
        assert_eq!(fl.cycle_follow_target(), Err(Error::NoActiveCamera));
    }

    #[test]
    fn cycle_needs_a_follow_camera() {
        let mut scene = Scene::default();
        scene.spawn_spheroid("Earth", "", 1.0, 5.972e24).unwrap();
        let plain = scene.spawn_camera("plain", "");
        let mut fl = FrameLoop::new(scene);

        fl.active_camera = Some(plain);
        assert_eq!(fl.cycle_follow_target(), Err(Error::NotACamera));

        fl.scene.remove(plain);
        assert_eq!(fl.cycle_follow_target(), Err(Error::UnknownEntity));
    }

    #[test]
    fn cycle_wraps_over_spheroids() {
        let (mut fl, earth, moon, cam) = frame_loop();
        assert_eq!(fl.cycle_follow_target(), Ok(Some(moon)));
        assert_eq!(fl.scene.followed_object(cam).unwrap().object.name, "Moon");
        assert_eq!(fl.cycle_follow_target(), Ok(Some(earth)));
    }
}
