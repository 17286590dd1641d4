// MODEL: scene objects and their data
pub mod body;
pub mod camera;
pub mod entity;
pub mod game_object;
pub mod scene;
pub mod scene_graph;
pub mod tick;

pub use body::{Body, Spheroid, G};
pub use camera::{Camera, FollowCamera};
pub use entity::{Entity, EntityId, EntityKind};
pub use game_object::GameObject;
pub use scene::Scene;
pub use scene_graph::{Node, NodeId, SceneGraph};
pub use tick::{InputSnapshot, Tick};
