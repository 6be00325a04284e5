//! # Component: What a Box Can Have
//!
//! Each component kind is a variant of [`Component`], tagged by
//! [`ComponentKind`]. An entity holds at most one component per kind.
//!
//! | Kind            | State                 | Behavior                          |
//! |-----------------|-----------------------|-----------------------------------|
//! | `Geometry`      | scene node + color    | repaints its node on color change |
//! | `PlayerControl` | jump impulse          | kicks the entity's body upward    |
//! | `Particle`      | elapsed time          | advances every frame              |

use std::fmt;

use log::warn;

use super::world::Target;
use crate::math::{Color, Vec3};
use crate::scene::{NodeId, Scene};

/// Discriminator for [`Component`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    Geometry,
    PlayerControl,
    Particle,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 3] = [
        ComponentKind::Geometry,
        ComponentKind::PlayerControl,
        ComponentKind::Particle,
    ];

    /// Kinds whose system is advanced by [`World::update`](super::World::update).
    pub fn is_time_sensitive(self) -> bool {
        matches!(self, ComponentKind::Particle)
    }

    pub fn name(self) -> &'static str {
        match self {
            ComponentKind::Geometry => "geometry",
            ComponentKind::PlayerControl => "player control",
            ComponentKind::Particle => "particle",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Geometry(Geometry),
    PlayerControl(PlayerControl),
    Particle(Particle),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Geometry(_) => ComponentKind::Geometry,
            Component::PlayerControl(_) => ComponentKind::PlayerControl,
            Component::Particle(_) => ComponentKind::Particle,
        }
    }

    pub fn as_geometry(&self) -> Option<&Geometry> {
        match self {
            Component::Geometry(geometry) => Some(geometry),
            _ => None,
        }
    }

    pub fn as_player_control(&self) -> Option<&PlayerControl> {
        match self {
            Component::PlayerControl(control) => Some(control),
            _ => None,
        }
    }

    pub fn as_particle(&self) -> Option<&Particle> {
        match self {
            Component::Particle(particle) => Some(particle),
            _ => None,
        }
    }

    /// Per-frame advance. Only time-sensitive kinds react.
    pub(crate) fn tick(&mut self, delta: f32) {
        if let Component::Particle(particle) = self {
            particle.advance(delta);
        }
    }
}

impl From<Geometry> for Component {
    fn from(geometry: Geometry) -> Self {
        Component::Geometry(geometry)
    }
}

impl From<PlayerControl> for Component {
    fn from(control: PlayerControl) -> Self {
        Component::PlayerControl(control)
    }
}

impl From<Particle> for Component {
    fn from(particle: Particle) -> Self {
        Component::Particle(particle)
    }
}

// ── Geometry ────────────────────────────────────────────────────────────

/// The visible, physical part of an entity.
///
/// `node` is a back-reference into the scene; the scene owns the node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    node: NodeId,
    color: Color,
}

impl Geometry {
    /// Wrap an existing node. The color is recorded but not pushed to the
    /// scene until [`set_color`](Self::set_color).
    pub fn new(node: NodeId, color: Color) -> Self {
        Self { node, color }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Set the color and apply it to the node's material right away.
    ///
    /// Returns `false` if the node is gone; the new color is still recorded.
    pub fn set_color(&mut self, color: Color, scene: &mut dyn Scene) -> bool {
        self.color = color;
        match scene.set_material_color(self.node, color) {
            Ok(()) => true,
            Err(err) => {
                warn!("color not applied to node {}: {err}", self.node);
                false
            }
        }
    }
}

// ── PlayerControl ───────────────────────────────────────────────────────

/// Default upward kick for a jump, in impulse units (mass × m/s).
pub const DEFAULT_JUMP_IMPULSE: Vec3 = Vec3::new(0.0, 5.0, 0.0);

/// Marks an entity as responding to player input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerControl {
    impulse: Vec3,
}

impl PlayerControl {
    pub fn new(impulse: Vec3) -> Self {
        Self { impulse }
    }

    pub fn impulse(&self) -> Vec3 {
        self.impulse
    }

    /// Kick the target's body. Returns whether an impulse was applied.
    pub fn jump(&self, target: &mut Target<'_>) -> bool {
        let Some(node) = target.node else {
            warn!("entity {} cannot jump: no geometry node", target.entity);
            return false;
        };
        match target.scene.apply_impulse(node, self.impulse) {
            Ok(()) => true,
            Err(err) => {
                warn!("entity {} cannot jump: {err}", target.entity);
                false
            }
        }
    }
}

impl Default for PlayerControl {
    fn default() -> Self {
        Self::new(DEFAULT_JUMP_IMPULSE)
    }
}

// ── Particle ────────────────────────────────────────────────────────────

/// Per-frame simulation state.
///
/// Only tracks how long it has been simulated; effects built on top read
/// [`elapsed`](Self::elapsed).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Particle {
    elapsed: f32,
    ticks: u64,
}

impl Particle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds simulated so far. Non-positive deltas count as a tick but do
    /// not move time backwards.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn advance(&mut self, delta: f32) {
        self.elapsed += delta.max(0.0);
        self.ticks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::entity::EntityAllocator;
    use crate::error::Error;
    use crate::scene::{RecordingScene, Shape};

    #[test]
    fn kind_matches_variant() {
        assert_eq!(
            Component::from(Geometry::new(NodeId::new(0), Color::RED)).kind(),
            ComponentKind::Geometry
        );
        assert_eq!(
            Component::from(PlayerControl::default()).kind(),
            ComponentKind::PlayerControl
        );
        assert_eq!(Component::from(Particle::new()).kind(), ComponentKind::Particle);
        assert!(ComponentKind::Particle.is_time_sensitive());
        assert!(!ComponentKind::PlayerControl.is_time_sensitive());
    }

    #[test]
    fn set_color_reaches_node() {
        let mut scene = RecordingScene::new();
        let node = scene.create_node(&Shape::unit_cube(), Vec3::ZERO);
        let mut geometry = Geometry::new(node, Color::WHITE);

        assert!(geometry.set_color(Color::GREEN, &mut scene));
        assert_eq!(geometry.color(), Color::GREEN);
        assert_eq!(scene.node(node).unwrap().color, Some(Color::GREEN));
    }

    #[test]
    fn set_color_is_idempotent() {
        let mut scene = RecordingScene::new();
        let node = scene.create_node(&Shape::unit_cube(), Vec3::ZERO);
        let mut geometry = Geometry::new(node, Color::WHITE);

        geometry.set_color(Color::PURPLE, &mut scene);
        let once = scene.node(node).unwrap().clone();
        geometry.set_color(Color::PURPLE, &mut scene);
        assert_eq!(scene.node(node).unwrap(), &once);
    }

    #[test]
    fn set_color_on_missing_node_is_noop() {
        let mut scene = RecordingScene::new();
        let node = scene.create_node(&Shape::unit_cube(), Vec3::ZERO);
        scene.remove_node(node);

        let mut geometry = Geometry::new(node, Color::WHITE);
        assert!(!geometry.set_color(Color::RED, &mut scene));
        assert_eq!(geometry.color(), Color::RED);
    }

    #[test]
    fn jump_kicks_target_node() {
        let mut scene = RecordingScene::new();
        let node = scene.create_node(&Shape::unit_cube(), Vec3::ZERO);
        let entity = EntityAllocator::new().allocate();
        let control = PlayerControl::new(Vec3::new(0.0, 3.0, 0.0));

        let mut target = Target {
            entity,
            node: Some(node),
            scene: &mut scene,
        };
        assert!(control.jump(&mut target));
        assert_eq!(scene.node(node).unwrap().impulses, vec![Vec3::new(0.0, 3.0, 0.0)]);
    }

    #[test]
    fn jump_without_node_is_noop() {
        let mut scene = RecordingScene::new();
        let entity = EntityAllocator::new().allocate();
        let mut target = Target {
            entity,
            node: None,
            scene: &mut scene,
        };
        assert!(!PlayerControl::default().jump(&mut target));

        let gone = NodeId::new(3);
        let mut target = Target {
            entity,
            node: Some(gone),
            scene: &mut scene,
        };
        assert!(!PlayerControl::default().jump(&mut target));
        assert_eq!(
            scene.apply_impulse(gone, Vec3::Y),
            Err(Error::MissingCollaborator(gone))
        );
    }

    #[test]
    fn particle_accumulates_positive_time() {
        let mut component = Component::from(Particle::new());
        component.tick(0.5);
        component.tick(-0.25);
        component.tick(0.25);

        let particle = component.as_particle().unwrap();
        assert_eq!(particle.elapsed(), 0.75);
        assert_eq!(particle.ticks(), 3);
    }

    #[test]
    fn tick_ignores_other_kinds() {
        let mut component = Component::from(PlayerControl::default());
        component.tick(1.0);
        assert_eq!(component, Component::from(PlayerControl::default()));
    }
}
