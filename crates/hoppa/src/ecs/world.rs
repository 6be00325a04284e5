//! # World: Entities, Registries, and the Frame Tick
//!
//! The [`World`] owns every entity and one [`ComponentSystem`] per
//! [`ComponentKind`]. It is built once, explicitly, and handed by reference to
//! whatever drives it; there is no global instance.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ World                                                │
//! │                                                      │
//! │  allocator: generational entity IDs                  │
//! │  records:   Entity → set of ComponentKind            │
//! │                                                      │
//! │  geometry  ─┐                                        │
//! │  controls  ─┼─ ComponentSystem (Entity → Component)  │
//! │  particles ─┘                                        │
//! │                                                      │
//! │  time: previous update timestamp, delta, frames      │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//!
//! ```text
//! Uninitialized ──initialize()──► Ready ──┬─ update(t)    (each frame)
//!                                         └─ broadcast()  (on input)
//! ```
//!
//! Entity creation and attachment work in either state; the frame tick and
//! broadcasts refuse to run until [`initialize`](World::initialize) has
//! populated the scene.
//!
//! The scene is never stored here. Operations that touch nodes take a
//! `&mut dyn Scene`, so the world cannot outlive, or keep alive, the nodes its
//! components point at.

use std::collections::{BTreeSet, HashMap};

use log::{debug, info, trace};

use super::component::{Component, ComponentKind, DEFAULT_JUMP_IMPULSE, Geometry, PlayerControl};
use super::entity::{Entity, EntityAllocator};
use super::system::ComponentSystem;
use crate::config::{BoxSpec, SceneConfig};
use crate::error::{Error, Result};
use crate::math::{Color, Vec3};
use crate::scene::{NodeId, Scene, Shape};
use crate::time::Time;

/// What a broadcast action can reach for the component it is called on.
pub struct Target<'a> {
    /// Entity owning the component.
    pub entity: Entity,
    /// Node of the entity's geometry, if it has one.
    pub node: Option<NodeId>,
    pub scene: &'a mut dyn Scene,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldState {
    Uninitialized,
    Ready,
}

/// Running counters, readable through [`World::stats`].
#[cfg(feature = "diagnostics")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorldStats {
    /// Completed [`World::update`] calls.
    pub frames: u64,
    /// Completed [`World::broadcast`] calls.
    pub broadcasts: u64,
    /// Broadcast actions that reported an effect.
    pub effects_applied: u64,
    /// Broadcast actions that did nothing, e.g. because a node was missing.
    pub effects_skipped: u64,
}

pub struct World {
    allocator: EntityAllocator,
    /// Kinds held by each live entity.
    records: HashMap<Entity, BTreeSet<ComponentKind>>,
    geometry: ComponentSystem,
    controls: ComponentSystem,
    particles: ComponentSystem,
    time: Time,
    state: WorldState,
    /// Impulse given to `PlayerControl` components built by the box factory.
    jump_impulse: Vec3,
    /// Shape of nodes created by the box factory.
    box_shape: Shape,
    #[cfg(feature = "diagnostics")]
    stats: WorldStats,
}

impl World {
    /// An empty world whose clock starts at `0.0`.
    pub fn new() -> Self {
        Self::with_start_time(0.0)
    }

    /// An empty world whose first frame delta is measured from `start`.
    pub fn with_start_time(start: f64) -> Self {
        Self {
            allocator: EntityAllocator::new(),
            records: HashMap::new(),
            geometry: ComponentSystem::new(ComponentKind::Geometry),
            controls: ComponentSystem::new(ComponentKind::PlayerControl),
            particles: ComponentSystem::new(ComponentKind::Particle),
            time: Time::new(start),
            state: WorldState::Uninitialized,
            jump_impulse: DEFAULT_JUMP_IMPULSE,
            box_shape: Shape::unit_cube(),
            #[cfg(feature = "diagnostics")]
            stats: WorldStats::default(),
        }
    }

    pub fn state(&self) -> WorldState {
        self.state
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    pub fn jump_impulse(&self) -> Vec3 {
        self.jump_impulse
    }

    #[cfg(feature = "diagnostics")]
    pub fn stats(&self) -> &WorldStats {
        &self.stats
    }

    // ── Setup ───────────────────────────────────────────────────────────

    /// Build every box in `config` and mark the world ready.
    ///
    /// Returns the created entities in configuration order. A second call
    /// fails with [`Error::AlreadyInitialized`] and creates nothing.
    pub fn initialize(&mut self, scene: &mut dyn Scene, config: &SceneConfig) -> Result<Vec<Entity>> {
        if self.state == WorldState::Ready {
            return Err(Error::AlreadyInitialized);
        }
        self.jump_impulse = config.jump_impulse;
        self.box_shape = config.box_shape;

        let entities = config
            .boxes
            .iter()
            .map(|spec| self.make_box_entity(scene, spec))
            .collect::<Result<Vec<_>>>()?;

        self.state = WorldState::Ready;
        info!(
            "world ready: {} entities, {} player-controlled",
            entities.len(),
            self.controls.len()
        );
        Ok(entities)
    }

    /// Create a box: a scene node at the spec's position, a [`Geometry`]
    /// painted with its color, and a [`PlayerControl`] if it wants one.
    pub fn make_box_entity(&mut self, scene: &mut dyn Scene, spec: &BoxSpec) -> Result<Entity> {
        let node = scene.create_node(&self.box_shape, spec.position);
        let mut geometry = Geometry::new(node, spec.color);
        geometry.set_color(spec.color, scene);

        let entity = self.create_entity();
        self.attach(entity, geometry)?;
        if spec.controlled {
            self.attach(entity, PlayerControl::new(self.jump_impulse))?;
        }
        debug!(
            "box {entity} at {} on node {node}{}",
            spec.position,
            if spec.controlled { " (controlled)" } else { "" }
        );
        Ok(entity)
    }

    // ── Entities & components ───────────────────────────────────────────

    /// Create an entity with no components.
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.allocator.allocate();
        self.records.insert(entity, BTreeSet::new());
        entity
    }

    /// Attach a component. An entity holds one component per kind; a second
    /// one of the same kind is rejected and the first is kept.
    pub fn attach(&mut self, entity: Entity, component: impl Into<Component>) -> Result<()> {
        let component = component.into();
        let kind = component.kind();
        let kinds = self
            .records
            .get_mut(&entity)
            .ok_or(Error::UnknownEntity(entity))?;
        if kinds.contains(&kind) {
            return Err(Error::DuplicateComponentKind { entity, kind });
        }

        let system = match kind {
            ComponentKind::Geometry => &mut self.geometry,
            ComponentKind::PlayerControl => &mut self.controls,
            ComponentKind::Particle => &mut self.particles,
        };
        system.register(entity, component)?;
        kinds.insert(kind);
        Ok(())
    }

    /// Remove and return the entity's component of `kind`.
    pub fn detach(&mut self, entity: Entity, kind: ComponentKind) -> Result<Component> {
        let kinds = self
            .records
            .get_mut(&entity)
            .ok_or(Error::UnknownEntity(entity))?;
        if !kinds.remove(&kind) {
            return Err(Error::MissingComponent { entity, kind });
        }
        let system = match kind {
            ComponentKind::Geometry => &mut self.geometry,
            ComponentKind::PlayerControl => &mut self.controls,
            ComponentKind::Particle => &mut self.particles,
        };
        system
            .unregister(entity)
            .ok_or(Error::MissingComponent { entity, kind })
    }

    /// Destroy the entity and unregister all of its components.
    ///
    /// Its scene node is left alone; the scene owns it.
    pub fn destroy(&mut self, entity: Entity) -> Result<()> {
        let kinds = self
            .records
            .remove(&entity)
            .ok_or(Error::UnknownEntity(entity))?;
        for kind in kinds {
            self.system_mut(kind).unregister(entity);
        }
        self.allocator.deallocate(entity);
        debug!("destroyed entity {entity}");
        Ok(())
    }

    /// All components of a live entity, ordered by kind.
    pub fn components(&self, entity: Entity) -> Result<Vec<&Component>> {
        let kinds = self.records.get(&entity).ok_or(Error::UnknownEntity(entity))?;
        Ok(kinds
            .iter()
            .filter_map(|&kind| self.system(kind).get(entity))
            .collect())
    }

    pub fn get(&self, entity: Entity, kind: ComponentKind) -> Option<&Component> {
        self.system(kind).get(entity)
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.allocator.is_alive(entity)
    }

    pub fn entity_count(&self) -> usize {
        self.allocator.alive_count()
    }

    /// Live entities in ID order.
    pub fn entities(&self) -> Vec<Entity> {
        let mut entities: Vec<Entity> = self.records.keys().copied().collect();
        entities.sort();
        entities
    }

    pub fn system(&self, kind: ComponentKind) -> &ComponentSystem {
        match kind {
            ComponentKind::Geometry => &self.geometry,
            ComponentKind::PlayerControl => &self.controls,
            ComponentKind::Particle => &self.particles,
        }
    }

    fn system_mut(&mut self, kind: ComponentKind) -> &mut ComponentSystem {
        match kind {
            ComponentKind::Geometry => &mut self.geometry,
            ComponentKind::PlayerControl => &mut self.controls,
            ComponentKind::Particle => &mut self.particles,
        }
    }

    fn node_of(&self, entity: Entity) -> Option<NodeId> {
        self.geometry
            .get(entity)
            .and_then(Component::as_geometry)
            .map(Geometry::node)
    }

    /// Repaint the entity's geometry. A missing node is logged, not returned.
    pub fn set_color(&mut self, entity: Entity, color: Color, scene: &mut dyn Scene) -> Result<()> {
        if !self.is_alive(entity) {
            return Err(Error::UnknownEntity(entity));
        }
        match self.geometry.get_mut(entity) {
            Some(Component::Geometry(geometry)) => {
                geometry.set_color(color, scene);
                Ok(())
            }
            _ => Err(Error::MissingComponent {
                entity,
                kind: ComponentKind::Geometry,
            }),
        }
    }

    // ── Frame tick & broadcasts ─────────────────────────────────────────

    /// Advance the world to `current_time` (seconds of host time).
    ///
    /// Forwards `current_time - previous` to every time-sensitive system and
    /// returns it. The first call measures from the construction time, so a
    /// host clock that does not start there produces one outsized delta. A
    /// non-increasing timestamp yields a zero or negative delta; that is not
    /// an error.
    pub fn update(&mut self, current_time: f64) -> Result<f64> {
        if self.state != WorldState::Ready {
            return Err(Error::NotInitialized);
        }
        let delta = self.time.advance(current_time);
        let delta_secs = self.time.delta_secs();
        for kind in ComponentKind::ALL {
            if kind.is_time_sensitive() {
                self.system_mut(kind).update(delta_secs);
            }
        }
        #[cfg(feature = "diagnostics")]
        {
            self.stats.frames += 1;
        }
        trace!("frame {} dt={delta:.4}", self.time.frame_count());
        Ok(delta)
    }

    /// Run `action` on every component of `kind`, in entity order.
    ///
    /// The action reports whether it had an effect; the return value counts
    /// those. An action that fails for one component does not stop the rest.
    pub fn broadcast<F>(&mut self, kind: ComponentKind, scene: &mut dyn Scene, mut action: F) -> Result<usize>
    where
        F: FnMut(&mut Component, &mut Target<'_>) -> bool,
    {
        if self.state != WorldState::Ready {
            return Err(Error::NotInitialized);
        }
        // Resolve nodes up front: the geometry system may be the one iterated.
        let targets: Vec<(Entity, Option<NodeId>)> = self
            .system(kind)
            .entities()
            .map(|entity| (entity, self.node_of(entity)))
            .collect();

        let system = self.system_mut(kind);
        let mut applied = 0;
        for &(entity, node) in &targets {
            let Some(component) = system.get_mut(entity) else {
                continue;
            };
            let mut target = Target {
                entity,
                node,
                scene: &mut *scene,
            };
            if action(component, &mut target) {
                applied += 1;
            }
        }

        #[cfg(feature = "diagnostics")]
        {
            self.stats.broadcasts += 1;
            self.stats.effects_applied += applied as u64;
            self.stats.effects_skipped += (targets.len() - applied) as u64;
        }
        debug!("broadcast to {kind}: {applied}/{} applied", targets.len());
        Ok(applied)
    }

    /// Make every player-controlled entity jump. Returns the number of
    /// impulses applied.
    pub fn jump(&mut self, scene: &mut dyn Scene) -> Result<usize> {
        self.broadcast(ComponentKind::PlayerControl, scene, |component, target| {
            match component {
                Component::PlayerControl(control) => control.jump(target),
                _ => false,
            }
        })
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
