use glam::DVec3;
use orrery::controller::InputEvent;
use orrery::model::{EntityKind, Scene, Tick, G};
use orrery::{demo, ClientConfig, Error};

#[test]
fn home_system_camera_tracks_mouse_pitch() {
    let mut fl = demo::home_system(ClientConfig::default()).unwrap();
    let cam = fl.active_camera.unwrap();

    let node = fl.scene.node(cam).unwrap();
    assert_eq!(node.position, DVec3::new(0.0, -3.0, 1.5));
    let start = node.rotation.x;
    assert!((start - 60f64.to_radians()).abs() < 1e-12);

    // motion before the pointer is captured is dropped
    fl.input.process_event(&InputEvent::MouseMove { dx: 4.0, dy: 4.0 });
    fl.step(0.016);
    assert_eq!(fl.scene.node(cam).unwrap().rotation.x, start);

    fl.input.process_event(&InputEvent::PointerLockChanged { locked: true });
    fl.input.process_event(&InputEvent::MouseMove { dx: 0.0, dy: 50.0 });
    fl.step(0.016);
    assert_eq!(fl.scene.node(cam).unwrap().rotation.x, start);

    fl.input.process_event(&InputEvent::MouseMove { dx: 2.0, dy: 20.0 });
    let uniform = fl.step(0.016).unwrap();
    let pitch = fl.scene.node(cam).unwrap().rotation.x;
    assert!((pitch - (start - 0.03)).abs() < 1e-12);
    assert!(uniform.view_proj.iter().flatten().all(|v| v.is_finite()));
}

#[test]
fn camera_moves_with_its_target() {
    let mut scene = Scene::new(ClientConfig::default());
    let mars = scene.spawn_spheroid("Mars", "", 0.53, 0.642e24).unwrap();
    let cam = scene.spawn_follow_camera("cam", "");
    scene.follow(cam, mars).unwrap();

    scene.set_position(mars, DVec3::new(100.0, 5.0, 0.0)).unwrap();
    let world = scene.world_position(cam).unwrap();
    assert!((world - DVec3::new(100.0, 2.0, 1.5)).length() < 1e-9);

    let mu = match &scene.get(mars).unwrap().kind {
        EntityKind::Spheroid(s) => s.body().mu(),
        _ => unreachable!(),
    };
    assert!((mu - G * 0.642e24).abs() <= mu * 1e-12);
    assert!(!scene.get(mars).unwrap().object.id.is_empty());
}

#[test]
fn removed_target_leaves_camera_at_root() {
    let mut scene = Scene::new(ClientConfig::default());
    let earth = scene.spawn_spheroid("Earth", "earth", 1.0, 5.972e24).unwrap();
    let cam = scene.spawn_follow_camera("cam", "cam");
    scene.follow(cam, earth).unwrap();

    assert!(scene.remove(earth).is_some());
    assert!(scene.followed_object(cam).is_none());
    let cam_node = scene.get(cam).unwrap().object.node;
    assert_eq!(scene.graph.parent_of(cam_node), None);

    scene.update(&Tick::with_motion(1.0, 1.0));
    assert_eq!(scene.follow(cam, earth), Err(Error::UnknownEntity));
}
