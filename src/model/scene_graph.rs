use glam::{DMat4, DQuat, DVec3, EulerRot};
use slotmap::{new_key_type, SlotMap};

use crate::error::{Error, Result};

new_key_type! {
    /// Handle to a transform node. Keys are versioned: a removed node's id never resolves again.
    pub struct NodeId;
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    /// Local translation, relative to the parent node
    pub position: DVec3,
    /// Local rotation as XYZ euler angles in radians (x = pitch)
    pub rotation: DVec3,
    pub scale: DVec3,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: DVec3::ZERO,
            rotation: DVec3::ZERO,
            scale: DVec3::ONE,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn quaternion(&self) -> DQuat {
        DQuat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn local_matrix(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(self.scale, self.quaternion(), self.position)
    }
}

/// Transform hierarchy. Nodes without a parent are roots.
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeId, Node>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_node(&mut self, name: impl Into<String>) -> NodeId {
        self.nodes.insert(Node::new(name))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// True if `ancestor` is somewhere above `node`. A node is not its own ancestor.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = self.parent_of(node);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.parent_of(p);
        }
        false
    }

    /// Make `child` a child of `parent`, detaching it from any previous parent.
    /// The child's local transform is kept as-is.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.contains(parent) || !self.contains(child) {
            return Err(Error::UnknownNode);
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(Error::HierarchyCycle);
        }

        self.detach(child)?;

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
        Ok(())
    }

    /// Turn `child` into a root. No-op if it already is one.
    pub fn detach(&mut self, child: NodeId) -> Result<()> {
        let parent = self
            .nodes
            .get_mut(child)
            .ok_or(Error::UnknownNode)?
            .parent
            .take();

        if let Some(p) = parent.and_then(|p| self.nodes.get_mut(p)) {
            p.children.retain(|&c| c != child);
        }
        Ok(())
    }

    /// Remove a node. Its children become roots and keep their local transforms.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        self.detach(id).ok()?;
        let node = self.nodes.remove(id)?;
        for &child in &node.children {
            if let Some(c) = self.nodes.get_mut(child) {
                c.parent = None;
            }
        }
        Some(node)
    }

    pub fn local_matrix(&self, id: NodeId) -> Option<DMat4> {
        self.nodes.get(id).map(Node::local_matrix)
    }

    /// Product of local matrices from the root down to `id`
    pub fn world_matrix(&self, id: NodeId) -> Option<DMat4> {
        let mut node = self.nodes.get(id)?;
        let mut m = node.local_matrix();
        while let Some(parent) = node.parent.and_then(|p| self.nodes.get(p)) {
            m = parent.local_matrix() * m;
            node = parent;
        }
        Some(m)
    }

    pub fn world_position(&self, id: NodeId) -> Option<DVec3> {
        self.world_matrix(id).map(|m| m.transform_point3(DVec3::ZERO))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: DVec3, b: DVec3) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn attach_links_both_sides() {
        let mut g = SceneGraph::new();
        let a = g.create_node("a");
        let b = g.create_node("b");
        g.attach(a, b).unwrap();

        assert_eq!(g.parent_of(b), Some(a));
        assert_eq!(g.children_of(a), &[b]);
        assert!(g.is_ancestor(a, b));
        assert!(!g.is_ancestor(b, a));
    }

    #[test]
    fn reattach_moves_child() {
        let mut g = SceneGraph::new();
        let a = g.create_node("a");
        let b = g.create_node("b");
        let c = g.create_node("c");
        g.attach(a, c).unwrap();
        g.attach(b, c).unwrap();

        assert!(g.children_of(a).is_empty());
        assert_eq!(g.children_of(b), &[c]);
        assert_eq!(g.parent_of(c), Some(b));
    }

    #[test]
    fn cycles_are_rejected() {
        let mut g = SceneGraph::new();
        let a = g.create_node("a");
        let b = g.create_node("b");
        let c = g.create_node("c");
        g.attach(a, b).unwrap();
        g.attach(b, c).unwrap();

        assert_eq!(g.attach(c, a), Err(Error::HierarchyCycle));
        assert_eq!(g.attach(a, a), Err(Error::HierarchyCycle));
        assert_eq!(g.parent_of(a), None);
    }

    #[test]
    fn world_position_composes_parents() {
        let mut g = SceneGraph::new();
        let a = g.create_node("a");
        let b = g.create_node("b");
        g.get_mut(a).unwrap().position = DVec3::new(10.0, 0.0, 0.0);
        g.get_mut(b).unwrap().position = DVec3::new(0.0, 2.0, 0.0);
        g.attach(a, b).unwrap();

        assert!(approx(g.world_position(b).unwrap(), DVec3::new(10.0, 2.0, 0.0)));

        // rotating the parent 90 degrees about Z swings the child's offset onto -X
        g.get_mut(a).unwrap().rotation.z = std::f64::consts::FRAC_PI_2;
        assert!(approx(g.world_position(b).unwrap(), DVec3::new(8.0, 0.0, 0.0)));
    }

    #[test]
    fn remove_orphans_children() {
        let mut g = SceneGraph::new();
        let a = g.create_node("a");
        let b = g.create_node("b");
        g.get_mut(b).unwrap().position = DVec3::new(1.0, 2.0, 3.0);
        g.attach(a, b).unwrap();

        let removed = g.remove(a).unwrap();
        assert_eq!(removed.name, "a");
        assert!(!g.contains(a));
        assert_eq!(g.parent_of(b), None);
        assert!(approx(g.world_position(b).unwrap(), DVec3::new(1.0, 2.0, 3.0)));
        assert!(g.remove(a).is_none());
        assert_eq!(g.attach(a, b), Err(Error::UnknownNode));
    }
}
