//! 3D physics scene via Rapier.
//!
//! [`RapierScene`] implements [`Scene`] on top of a Rapier simulation: every
//! node is a dynamic rigid body with a collider, impulses go straight to the
//! body, and [`Scene::step`] advances the simulation on a fixed timestep.
//! Colors are kept in the node table for whatever renderer reads them.

use rapier3d::prelude::*;

use crate::error::{Error, Result};
use crate::math::{Color, Quat, Vec3};
use crate::scene::{NodeId, Scene, Shape};

fn shape_to_collider_builder(shape: &Shape) -> ColliderBuilder {
    match *shape {
        Shape::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
        }
        Shape::Ball { radius } => ColliderBuilder::ball(radius),
    }
}

struct RapierNode {
    body: RigidBodyHandle,
    color: Option<Color>,
}

/// A [`Scene`] backed by a Rapier physics world.
pub struct RapierScene {
    gravity: Vec3,
    pipeline: PhysicsPipeline,
    params: IntegrationParameters,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    /// Indexed by `NodeId`. `None` once a node has been removed.
    nodes: Vec<Option<RapierNode>>,
    accumulator: f32,
}

impl std::fmt::Debug for RapierScene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RapierScene")
            .field("gravity", &self.gravity)
            .field("bodies", &self.bodies.len())
            .field("colliders", &self.colliders.len())
            .finish()
    }
}

impl RapierScene {
    /// An empty scene with default gravity (0, -9.81, 0) and no ground.
    pub fn new() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            pipeline: PhysicsPipeline::new(),
            params: IntegrationParameters::default(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            nodes: Vec::new(),
            accumulator: 0.0,
        }
    }

    pub fn with_gravity(mut self, g: Vec3) -> Self {
        self.gravity = g;
        self
    }

    /// Add a fixed floor whose top surface sits at `y = 0`.
    pub fn with_ground(mut self, half_extent: f32) -> Self {
        let floor = RigidBodyBuilder::fixed()
            .translation(Vec3::new(0.0, -0.1, 0.0))
            .build();
        let handle = self.bodies.insert(floor);
        let collider = ColliderBuilder::cuboid(half_extent, 0.1, half_extent)
            .friction(0.8)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        self
    }

    fn node(&self, node: NodeId) -> Result<&RapierNode> {
        self.nodes
            .get(node.index() as usize)
            .and_then(Option::as_ref)
            .ok_or(Error::MissingCollaborator(node))
    }

    /// Current world position of the node's body.
    pub fn position(&self, node: NodeId) -> Option<Vec3> {
        let body = self.bodies.get(self.node(node).ok()?.body)?;
        Some(body.translation())
    }

    /// Current orientation of the node's body.
    pub fn rotation(&self, node: NodeId) -> Option<Quat> {
        let body = self.bodies.get(self.node(node).ok()?.body)?;
        Some(*body.rotation())
    }

    pub fn color(&self, node: NodeId) -> Option<Color> {
        self.node(node).ok()?.color
    }

    /// Remove the node and its body from the simulation.
    pub fn remove_node(&mut self, node: NodeId) -> bool {
        let Some(removed) = self
            .nodes
            .get_mut(node.index() as usize)
            .and_then(Option::take)
        else {
            return false;
        };
        self.bodies.remove(
            removed.body,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        true
    }
}

impl Default for RapierScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for RapierScene {
    fn create_node(&mut self, shape: &Shape, position: Vec3) -> NodeId {
        let body = RigidBodyBuilder::dynamic().translation(position).build();
        let handle = self.bodies.insert(body);
        let collider = shape_to_collider_builder(shape)
            .restitution(0.1)
            .friction(0.8)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(Some(RapierNode {
            body: handle,
            color: None,
        }));
        id
    }

    fn set_material_color(&mut self, node: NodeId, color: Color) -> Result<()> {
        let slot = self
            .nodes
            .get_mut(node.index() as usize)
            .and_then(Option::as_mut)
            .ok_or(Error::MissingCollaborator(node))?;
        slot.color = Some(color);
        Ok(())
    }

    fn apply_impulse(&mut self, node: NodeId, impulse: Vec3) -> Result<()> {
        let handle = self.node(node)?.body;
        let body = self
            .bodies
            .get_mut(handle)
            .ok_or(Error::MissingCollaborator(node))?;
        body.apply_impulse(impulse, true);
        Ok(())
    }

    /// Fixed-timestep stepping (default 1/60s) with an accumulator, capped so
    /// a long stall does not trigger a burst of catch-up steps.
    fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        self.accumulator += dt.min(0.25);

        let fixed_dt = self.params.dt;
        while self.accumulator >= fixed_dt {
            self.pipeline.step(
                self.gravity,
                &self.params,
                &mut self.islands,
                &mut self.broad_phase,
                &mut self.narrow_phase,
                &mut self.bodies,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                &mut self.ccd_solver,
                &(),
                &(),
            );
            self.accumulator -= fixed_dt;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use crate::host::Host;

    #[test]
    fn body_falls_onto_ground() {
        let mut scene = RapierScene::new().with_ground(10.0);
        let node = scene.create_node(&Shape::unit_cube(), Vec3::new(0.0, 3.0, 0.0));
        for _ in 0..180 {
            scene.step(1.0 / 60.0);
        }
        let y = scene.position(node).unwrap().y;
        assert!((y - 0.5).abs() < 0.1, "box should rest on the ground, y = {y}");
    }

    #[test]
    fn impulse_lifts_body() {
        let mut scene = RapierScene::new().with_ground(10.0);
        let node = scene.create_node(&Shape::unit_cube(), Vec3::new(0.0, 0.5, 0.0));
        scene.apply_impulse(node, Vec3::new(0.0, 5.0, 0.0)).unwrap();
        for _ in 0..10 {
            scene.step(1.0 / 60.0);
        }
        assert!(scene.position(node).unwrap().y > 0.6);
    }

    #[test]
    fn color_recorded_and_missing_node_reported() {
        let mut scene = RapierScene::new();
        let node = scene.create_node(&Shape::unit_cube(), Vec3::ZERO);
        scene.set_material_color(node, Color::BLUE).unwrap();
        assert_eq!(scene.color(node), Some(Color::BLUE));

        assert!(scene.remove_node(node));
        assert_eq!(
            scene.apply_impulse(node, Vec3::Y),
            Err(Error::MissingCollaborator(node))
        );
        assert_eq!(scene.position(node), None);
    }

    #[test]
    fn tapped_boxes_rise_purple_stays() {
        let mut host = Host::new(RapierScene::new().with_ground(20.0), SceneConfig::five_boxes());
        host.setup().unwrap();
        // Let every box settle on the ground first.
        for i in 1..=120 {
            host.frame(i as f64 / 60.0).unwrap();
        }
        let rest: Vec<f32> = (0..5)
            .map(|i| host.scene().position(NodeId::new(i)).unwrap().y)
            .collect();

        host.tap();
        for i in 121..=130 {
            host.frame(i as f64 / 60.0).unwrap();
        }

        let purple = host.scene().position(NodeId::new(1)).unwrap().y;
        assert!((purple - rest[1]).abs() < 0.01, "purple moved to y = {purple}");
        for i in [0, 2, 3, 4] {
            let y = host.scene().position(NodeId::new(i)).unwrap().y;
            assert!(y > rest[i as usize] + 0.2, "box {i} did not rise: y = {y}");
        }
    }
}
