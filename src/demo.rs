use glam::DVec3;

use crate::config::ClientConfig;
use crate::controller::FrameLoop;
use crate::error::Result;
use crate::model::body::E24;
use crate::model::Scene;

/// Earth with the Moon parented to it, and a follow camera on Earth.
/// Sizes and distances are render units; only the masses are physical.
pub fn home_system(config: ClientConfig) -> Result<FrameLoop> {
    let mut scene = Scene::new(config);

    let earth = scene.spawn_spheroid("Earth", "earth", 1.0, 5.972 * E24)?;
    let moon = scene.spawn_spheroid("Moon", "moon", 0.27, 0.07342 * E24)?;
    scene.attach(earth, moon)?;
    scene.set_position(moon, DVec3::new(10.0, 0.0, 0.0))?;

    let camera = scene.spawn_follow_camera("Camera", "camera");
    scene.follow(camera, earth)?;

    let mut frame_loop = FrameLoop::new(scene);
    frame_loop.active_camera = Some(camera);
    Ok(frame_loop)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_system_is_wired() {
        let mut fl = home_system(ClientConfig::default()).unwrap();
        assert_eq!(fl.scene.len(), 3);
        let cam = fl.active_camera.unwrap();
        assert_eq!(fl.scene.followed_object(cam).unwrap().object.id, "earth");
        assert!(fl.step(0.016).is_some());
    }
}
