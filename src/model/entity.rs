use slotmap::new_key_type;

use super::body::Spheroid;
use super::camera::{Camera, FollowCamera};
use super::game_object::GameObject;

new_key_type! {
    pub struct EntityId;
}

/// Per-kind data. The tick loop matches on this instead of going through trait objects.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    /// Transform only (anchors, empty pivots)
    Marker,
    Spheroid(Spheroid),
    Camera(Camera),
    FollowCamera(FollowCamera),
}

impl EntityKind {
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Marker => "marker",
            EntityKind::Spheroid(_) => "spheroid",
            EntityKind::Camera(_) => "camera",
            EntityKind::FollowCamera(_) => "follow_camera",
        }
    }

    /// Projection parameters, for either camera kind
    pub fn camera(&self) -> Option<&Camera> {
        match self {
            EntityKind::Camera(c) => Some(c),
            EntityKind::FollowCamera(fc) => Some(&fc.camera),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub object: GameObject,
    pub kind: EntityKind,
}

impl Entity {
    pub fn as_spheroid(&self) -> Option<&Spheroid> {
        match &self.kind {
            EntityKind::Spheroid(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_follow_camera(&self) -> Option<&FollowCamera> {
        match &self.kind {
            EntityKind::FollowCamera(fc) => Some(fc),
            _ => None,
        }
    }

    pub fn as_follow_camera_mut(&mut self) -> Option<&mut FollowCamera> {
        match &mut self.kind {
            EntityKind::FollowCamera(fc) => Some(fc),
            _ => None,
        }
    }
}
