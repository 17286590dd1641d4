use std::fmt;

use uuid::Uuid;

use super::scene_graph::NodeId;

/// Identity shared by every scene entity, plus the node carrying its transform
#[derive(Debug, Clone, PartialEq)]
pub struct GameObject {
    pub name: String,
    pub id: String,
    pub node: NodeId,
}

impl GameObject {
    /// An empty `id` is replaced by a fresh UUID v4.
    pub fn new(name: impl Into<String>, id: impl Into<String>, node: NodeId) -> Self {
        let id = id.into();
        let id = if id.is_empty() { Uuid::new_v4().to_string() } else { id };
        Self { name: name.into(), id, node }
    }
}

impl fmt::Display for GameObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.id)
    }
}
