//! Arena-backed scene graph.
//!
//! Nodes are owned by the [`SceneGraph`] and addressed by [`NodeId`]. Each node
//! has at most one parent, so the graph is always a forest. It is built once
//! and then instantiated as Bevy entities by [`crate::scene`].

use crate::animation::{AnimationSlot, RotationAnimation};
use crate::appearance::Surface;
use crate::error::GraphError;
use crate::shape::Shape;
use bevy::prelude::*;
use std::collections::BTreeMap;
use std::fmt;
use std::ops;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// What a node stands for in the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Component, Reflect)]
#[reflect(Component)]
pub enum NodeRole {
    #[default]
    Pivot,
    Sun,
    Planet,
    Moon,
    Ring,
    OrbitalPath,
}

impl NodeRole {
    pub fn is_body(&self) -> bool {
        matches!(self, Self::Sun | Self::Planet | Self::Moon)
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub role: NodeRole,
    pub translation: Vec3,
    pub rotation: Quat,
    pub shape: Option<Shape>,
    pub surface: Option<Surface>,
    animations: BTreeMap<AnimationSlot, RotationAnimation>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: NodeRole::Pivot,
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            shape: None,
            surface: None,
            animations: BTreeMap::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_role(self, role: NodeRole) -> Self {
        Self { role, ..self }
    }

    pub fn with_translation(self, translation: Vec3) -> Self {
        Self {
            translation,
            ..self
        }
    }

    pub fn with_geometry(self, shape: Shape, surface: Surface) -> Self {
        Self {
            shape: Some(shape),
            surface: Some(surface),
            ..self
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.translation).with_rotation(self.rotation)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn animation(&self, slot: AnimationSlot) -> Option<&RotationAnimation> {
        self.animations.get(&slot)
    }

    pub fn animations(&self) -> impl Iterator<Item = (AnimationSlot, &RotationAnimation)> {
        self.animations.iter().map(|(slot, animation)| (*slot, animation))
    }

    pub fn is_animated(&self) -> bool {
        !self.animations.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds a detached node. Any parent or children set on `node` are dropped.
    pub fn add(&mut self, mut node: Node) -> NodeId {
        node.parent = None;
        node.children.clear();
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Attaches `child` under `parent`, detaching it from its previous parent.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), GraphError> {
        if parent == child || self.is_descendant_of(parent, child) {
            return Err(GraphError::Cycle { parent, child });
        }
        if let Some(previous) = self[child].parent.take() {
            self[previous].children.retain(|&id| id != child);
        }
        self[child].parent = Some(parent);
        self[parent].children.push(child);
        Ok(())
    }

    /// Adds `node` directly under `parent`.
    pub fn add_under(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = self.add(node);
        self[id].parent = Some(parent);
        self[parent].children.push(id);
        id
    }

    /// Attaches an animation, replacing any previous one in the same slot.
    pub fn animate(
        &mut self,
        id: NodeId,
        slot: AnimationSlot,
        animation: RotationAnimation,
    ) -> Option<RotationAnimation> {
        self[id].animations.insert(slot, animation)
    }

    /// True when `ancestor` is found walking up from `node`, excluding `node` itself.
    pub fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(node).any(|id| id == ancestor)
    }

    /// Number of edges from `ancestor` down to `node`.
    pub fn depth_below(&self, ancestor: NodeId, node: NodeId) -> Option<usize> {
        if node == ancestor {
            return Some(0);
        }
        self.ancestors(node)
            .position(|id| id == ancestor)
            .map(|position| position + 1)
    }

    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self[node].parent, move |&id| self[id].parent)
    }

    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(id, _)| id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        let node = &self[id];
        write!(f, "{:indent$}{}", "", node.name, indent = depth * 2)?;
        if node.role != NodeRole::Pivot {
            write!(f, " [{:?}]", node.role)?;
        }
        for (slot, animation) in node.animations() {
            write!(f, " {slot}={}", animation.period)?;
        }
        writeln!(f)?;
        for &child in &node.children {
            self.fmt_node(f, child, depth + 1)?;
        }
        Ok(())
    }
}

impl ops::Index<NodeId> for SceneGraph {
    type Output = Node;

    fn index(&self, index: NodeId) -> &Self::Output {
        &self.nodes[index.0]
    }
}

impl ops::IndexMut<NodeId> for SceneGraph {
    fn index_mut(&mut self, index: NodeId) -> &mut Self::Output {
        &mut self.nodes[index.0]
    }
}

impl fmt::Display for SceneGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for root in self.roots() {
            self.fmt_node(f, root, 0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Period;

    fn chain(graph: &mut SceneGraph, names: &[&str]) -> Vec<NodeId> {
        let mut ids = Vec::new();
        for name in names {
            let id = match ids.last() {
                Some(&parent) => graph.add_under(parent, Node::new(*name)),
                None => graph.add(Node::new(*name)),
            };
            ids.push(id);
        }
        ids
    }

    #[test]
    fn add_child_reparents() {
        let mut graph = SceneGraph::new();
        let a = graph.add(Node::new("a"));
        let b = graph.add(Node::new("b"));
        let c = graph.add(Node::new("c"));
        graph.add_child(a, c).unwrap();
        graph.add_child(b, c).unwrap();
        assert!(graph[a].children().is_empty());
        assert_eq!(graph[b].children(), &[c]);
        assert_eq!(graph[c].parent(), Some(b));
    }

    #[test]
    fn add_child_rejects_cycles() {
        let mut graph = SceneGraph::new();
        let ids = chain(&mut graph, &["a", "b", "c"]);
        assert_eq!(
            graph.add_child(ids[2], ids[0]),
            Err(GraphError::Cycle {
                parent: ids[2],
                child: ids[0]
            })
        );
        assert!(graph.add_child(ids[0], ids[0]).is_err());
        assert_eq!(graph[ids[0]].parent(), None);
    }

    #[test]
    fn depth_and_ancestry() {
        let mut graph = SceneGraph::new();
        let ids = chain(&mut graph, &["a", "b", "c", "d"]);
        assert_eq!(graph.depth_below(ids[0], ids[3]), Some(3));
        assert_eq!(graph.depth_below(ids[1], ids[1]), Some(0));
        assert_eq!(graph.depth_below(ids[3], ids[0]), None);
        assert!(graph.is_descendant_of(ids[3], ids[1]));
        assert!(!graph.is_descendant_of(ids[1], ids[3]));
        assert_eq!(
            graph.ancestors(ids[3]).collect::<Vec<_>>(),
            vec![ids[2], ids[1], ids[0]]
        );
        assert_eq!(graph.roots().collect::<Vec<_>>(), vec![ids[0]]);
    }

    #[test]
    fn animate_replaces_same_slot_only() {
        let mut graph = SceneGraph::new();
        let id = graph.add(Node::new("a"));
        let first = RotationAnimation::full_turn(Period::new(1.0).unwrap());
        let second = RotationAnimation::full_turn(Period::new(2.0).unwrap());
        assert_eq!(graph.animate(id, AnimationSlot::Spin, first), None);
        assert_eq!(graph.animate(id, AnimationSlot::Orbit, first), None);
        assert_eq!(graph.animate(id, AnimationSlot::Spin, second), Some(first));
        assert_eq!(graph[id].animations().count(), 2);
        assert_eq!(graph[id].animation(AnimationSlot::Spin), Some(&second));
    }

    #[test]
    fn display_prints_indented_tree() {
        let mut graph = SceneGraph::new();
        let ids = chain(&mut graph, &["root", "child"]);
        graph.animate(
            ids[1],
            AnimationSlot::Orbit,
            RotationAnimation::full_turn(Period::new(3.0).unwrap()),
        );
        assert_eq!(graph.to_string(), "root\n  child orbit=3s\n");
    }
}
