use glam::{DMat4, DVec3, Mat4};
use slotmap::SlotMap;
use tracing::{debug, trace};

use super::body::{Body, Spheroid};
use super::camera::{Camera, FollowCamera};
use super::entity::{Entity, EntityId, EntityKind};
use super::game_object::GameObject;
use super::scene_graph::{Node, SceneGraph};
use super::tick::Tick;
use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// Entity table plus the transform hierarchy the entities live in
#[derive(Debug, Default)]
pub struct Scene {
    pub graph: SceneGraph,
    entities: SlotMap<EntityId, Entity>,
    config: ClientConfig,
}

impl Scene {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            graph: SceneGraph::new(),
            entities: SlotMap::with_key(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Create a root node for the entity and register it
    pub fn spawn(&mut self, name: &str, id: &str, kind: EntityKind) -> EntityId {
        let node = self.graph.create_node(name);
        let object = GameObject::new(name, id, node);
        debug!("spawned {} {}", kind.name(), object);
        self.entities.insert(Entity { object, kind })
    }

    pub fn spawn_marker(&mut self, name: &str, id: &str) -> EntityId {
        self.spawn(name, id, EntityKind::Marker)
    }

    pub fn spawn_spheroid(&mut self, name: &str, id: &str, radius: f64, mass: f64) -> Result<EntityId> {
        let body = Body::new(radius, mass)?;
        Ok(self.spawn(name, id, EntityKind::Spheroid(Spheroid::new(body))))
    }

    pub fn spawn_camera(&mut self, name: &str, id: &str) -> EntityId {
        self.spawn(name, id, EntityKind::Camera(Camera::default()))
    }

    pub fn spawn_follow_camera(&mut self, name: &str, id: &str) -> EntityId {
        let camera = FollowCamera::from_config(&self.config);
        self.spawn(name, id, EntityKind::FollowCamera(camera))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter()
    }

    /// The transform node of an entity
    pub fn node(&self, id: EntityId) -> Option<&Node> {
        self.entities.get(id).and_then(|e| self.graph.get(e.object.node))
    }

    pub fn node_mut(&mut self, id: EntityId) -> Option<&mut Node> {
        let node = self.entities.get(id)?.object.node;
        self.graph.get_mut(node)
    }

    pub fn set_position(&mut self, id: EntityId, position: DVec3) -> Result<()> {
        self.node_mut(id).ok_or(Error::UnknownEntity)?.position = position;
        Ok(())
    }

    /// Parent `child`'s node under `parent`'s node
    pub fn attach(&mut self, parent: EntityId, child: EntityId) -> Result<()> {
        let parent_node = self.entities.get(parent).ok_or(Error::UnknownEntity)?.object.node;
        let child_node = self.entities.get(child).ok_or(Error::UnknownEntity)?.object.node;
        self.graph.attach(parent_node, child_node)
    }

    /// Drop the entity and its node. Child nodes (e.g. a camera following it)
    /// become roots and keep their local transforms.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.entities.remove(id)?;
        self.graph.remove(entity.object.node);
        debug!("removed {}", entity.object);
        Some(entity)
    }

    pub fn world_matrix(&self, id: EntityId) -> Option<DMat4> {
        self.graph.world_matrix(self.entities.get(id)?.object.node)
    }

    pub fn world_position(&self, id: EntityId) -> Option<DVec3> {
        self.graph.world_position(self.entities.get(id)?.object.node)
    }

    /// View-projection for a camera entity (either kind)
    pub fn view_proj(&self, id: EntityId) -> Option<Mat4> {
        let camera = self.entities.get(id)?.kind.camera()?;
        Some(camera.view_proj(self.world_matrix(id)?))
    }

    /// Put the follow camera under `target`'s node, behind and above it, pitched down toward it.
    pub fn follow(&mut self, camera: EntityId, target: EntityId) -> Result<()> {
        let target_node = self.entities.get(target).ok_or(Error::UnknownEntity)?.object.node;
        let cam_entity = self.entities.get(camera).ok_or(Error::UnknownEntity)?;
        let cam_node = cam_entity.object.node;
        if cam_entity.as_follow_camera().is_none() {
            return Err(Error::NotACamera);
        }

        self.graph.attach(target_node, cam_node)?;

        let Some(fc) = self.entities.get_mut(camera).and_then(Entity::as_follow_camera_mut) else {
            return Err(Error::NotACamera);
        };
        fc.followed = Some(target);
        let (offset, pitch) = (fc.offset(), fc.follow_pitch);

        let node = self.graph.get_mut(cam_node).ok_or(Error::UnknownNode)?;
        node.position = offset;
        node.rotation = DVec3::new(pitch, 0.0, 0.0);

        if let (Some(cam), Some(tgt)) = (self.entities.get(camera), self.entities.get(target)) {
            debug!(
                "{} (pos: {:?}) now following {} (pos: {:?})",
                cam.object,
                self.graph.get(cam_node).map(|n| n.position),
                tgt.object,
                self.graph.get(target_node).map(|n| n.position),
            );
        }
        Ok(())
    }

    /// Resolve a follow camera's target. `None` once the target has been removed.
    pub fn followed_object(&self, camera: EntityId) -> Option<&Entity> {
        let target = self.entities.get(camera)?.as_follow_camera()?.followed()?;
        self.entities.get(target)
    }

    /// Run one tick over every entity
    pub fn update(&mut self, tick: &Tick) {
        trace!(frame = tick.frame, dt = tick.dt, "scene update");
        for entity in self.entities.values() {
            match &entity.kind {
                EntityKind::FollowCamera(fc) => {
                    if let Some(node) = self.graph.get_mut(entity.object.node) {
                        fc.update(node, tick);
                    }
                }
                EntityKind::Marker | EntityKind::Spheroid(_) | EntityKind::Camera(_) => {}
            }
        }
    }
}
