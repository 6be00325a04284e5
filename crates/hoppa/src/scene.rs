//! # Scene: The Engine Behind the World
//!
//! The world never renders or simulates anything itself. Everything visible
//! or physical goes through a [`Scene`]: it creates nodes, paints them, and
//! pushes them around. Components only hold a [`NodeId`], a plain index into
//! the scene's own node table, so a component never keeps a node alive.
//!
//! ```text
//! World ──(NodeId)──► Scene node table ──► renderer / physics engine
//! ```
//!
//! [`RecordingScene`] is the in-memory implementation used by the headless
//! binary and the tests. The `physics3d` feature adds a Rapier-backed one.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::math::{Color, Vec3};

/// Non-owning handle to a node in a [`Scene`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Shape of a node's geometry and collider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Cuboid { half_extents: Vec3 },
    Ball { radius: f32 },
}

impl Shape {
    /// A 1x1x1 box.
    pub fn unit_cube() -> Self {
        Shape::Cuboid {
            half_extents: Vec3::splat(0.5),
        }
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::unit_cube()
    }
}

/// The renderer and physics engine, as seen by the world.
///
/// Nodes are dynamic bodies: affected by gravity and collisions, and able to
/// receive impulses. Operations on a node that no longer exists return
/// [`Error::MissingCollaborator`].
pub trait Scene {
    /// Create a renderable, physical node at `position`.
    fn create_node(&mut self, shape: &Shape, position: Vec3) -> NodeId;

    /// Set the node's material color. Takes effect immediately.
    fn set_material_color(&mut self, node: NodeId, color: Color) -> Result<()>;

    /// Apply an instantaneous impulse to the node's body.
    fn apply_impulse(&mut self, node: NodeId, impulse: Vec3) -> Result<()>;

    /// Advance the simulation by `dt` seconds. Scenes driven by an external
    /// engine loop leave this as a no-op.
    fn step(&mut self, _dt: f32) {}
}

/// Everything a [`RecordingScene`] knows about one node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub shape: Shape,
    /// Position the node was created at.
    pub position: Vec3,
    /// Material color, `None` until the first assignment.
    pub color: Option<Color>,
    /// Every impulse received, in order.
    pub impulses: Vec<Vec3>,
}

/// In-memory [`Scene`] that records every effect applied to it.
///
/// It simulates nothing: nodes stay where they were created and
/// [`Scene::step`] is a no-op. Use `RapierScene` to see boxes move.
#[derive(Debug, Default)]
pub struct RecordingScene {
    nodes: Vec<Option<NodeRecord>>,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn node(&self, node: NodeId) -> Option<&NodeRecord> {
        self.nodes.get(node.index() as usize)?.as_ref()
    }

    /// Tear down a node. Later operations on it report a missing collaborator.
    pub fn remove_node(&mut self, node: NodeId) -> bool {
        match self.nodes.get_mut(node.index() as usize) {
            Some(slot) => slot.take().is_some(),
            None => false,
        }
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    /// Total impulses received across all live nodes.
    pub fn impulse_count(&self) -> usize {
        self.nodes.iter().flatten().map(|n| n.impulses.len()).sum()
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut NodeRecord> {
        self.nodes
            .get_mut(node.index() as usize)
            .and_then(Option::as_mut)
            .ok_or(Error::MissingCollaborator(node))
    }
}

impl Scene for RecordingScene {
    fn create_node(&mut self, shape: &Shape, position: Vec3) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(Some(NodeRecord {
            shape: *shape,
            position,
            color: None,
            impulses: Vec::new(),
        }));
        id
    }

    fn set_material_color(&mut self, node: NodeId, color: Color) -> Result<()> {
        self.node_mut(node)?.color = Some(color);
        Ok(())
    }

    fn apply_impulse(&mut self, node: NodeId, impulse: Vec3) -> Result<()> {
        self.node_mut(node)?.impulses.push(impulse);
        Ok(())
    }
}
