//! # ComponentSystem: One Registry Per Kind
//!
//! A [`ComponentSystem`] holds every component of a single
//! [`ComponentKind`], keyed by owning entity. It is what makes the two bulk
//! operations cheap:
//!
//! - broadcasting an action to all components of a kind (a tap → every
//!   `PlayerControl` jumps)
//! - advancing all components of a kind by a frame delta (`Particle`)
//!
//! Storage is a `BTreeMap`, so iteration follows entity order and stays the
//! same from frame to frame regardless of registration order.

use std::collections::BTreeMap;

use super::component::{Component, ComponentKind};
use super::entity::Entity;
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct ComponentSystem {
    kind: ComponentKind,
    components: BTreeMap<Entity, Component>,
}

impl ComponentSystem {
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            components: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Add `entity`'s component. Rejects components of another kind and a
    /// second component for the same entity; the first one stays.
    pub fn register(&mut self, entity: Entity, component: Component) -> Result<()> {
        if component.kind() != self.kind {
            return Err(Error::KindMismatch {
                expected: self.kind,
                found: component.kind(),
            });
        }
        if self.components.contains_key(&entity) {
            return Err(Error::DuplicateComponentKind {
                entity,
                kind: self.kind,
            });
        }
        self.components.insert(entity, component);
        Ok(())
    }

    /// Remove and return `entity`'s component, if it has one here.
    pub fn unregister(&mut self, entity: Entity) -> Option<Component> {
        self.components.remove(&entity)
    }

    pub fn get(&self, entity: Entity) -> Option<&Component> {
        self.components.get(&entity)
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut Component> {
        self.components.get_mut(&entity)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.components.contains_key(&entity)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Owning entities, in iteration order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.components.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Entity, &Component)> + '_ {
        self.components.iter().map(|(&entity, component)| (entity, component))
    }

    pub fn for_each(&self, mut action: impl FnMut(Entity, &Component)) {
        for (&entity, component) in &self.components {
            action(entity, component);
        }
    }

    pub fn for_each_mut(&mut self, mut action: impl FnMut(Entity, &mut Component)) {
        for (&entity, component) in &mut self.components {
            action(entity, component);
        }
    }

    /// Advance every component by `delta` seconds.
    pub fn update(&mut self, delta: f32) {
        for component in self.components.values_mut() {
            component.tick(delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::component::{Geometry, Particle, PlayerControl};
    use crate::ecs::entity::EntityAllocator;
    use crate::math::{Color, Vec3};
    use crate::scene::NodeId;

    fn entities(n: usize) -> Vec<Entity> {
        let mut alloc = EntityAllocator::new();
        (0..n).map(|_| alloc.allocate()).collect()
    }

    #[test]
    fn register_and_get() {
        let a = entities(1)[0];
        let mut system = ComponentSystem::new(ComponentKind::PlayerControl);
        system.register(a, PlayerControl::default().into()).unwrap();

        assert_eq!(system.len(), 1);
        assert!(system.contains(a));
        assert!(system.get(a).unwrap().as_player_control().is_some());
    }

    #[test]
    fn duplicate_keeps_first() {
        let a = entities(1)[0];
        let mut system = ComponentSystem::new(ComponentKind::Geometry);
        system
            .register(a, Geometry::new(NodeId::new(0), Color::RED).into())
            .unwrap();

        let err = system
            .register(a, Geometry::new(NodeId::new(1), Color::BLUE).into())
            .unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateComponentKind {
                entity: a,
                kind: ComponentKind::Geometry
            }
        );

        let kept = system.get(a).unwrap().as_geometry().unwrap();
        assert_eq!(kept.node(), NodeId::new(0));
        assert_eq!(kept.color(), Color::RED);
    }

    #[test]
    fn wrong_kind_rejected() {
        let a = entities(1)[0];
        let mut system = ComponentSystem::new(ComponentKind::Geometry);
        let err = system.register(a, Particle::new().into()).unwrap_err();
        assert_eq!(
            err,
            Error::KindMismatch {
                expected: ComponentKind::Geometry,
                found: ComponentKind::Particle
            }
        );
        assert!(system.is_empty());
    }

    #[test]
    fn iteration_follows_entity_order() {
        let es = entities(4);
        let mut system = ComponentSystem::new(ComponentKind::PlayerControl);
        for &e in es.iter().rev() {
            system.register(e, PlayerControl::default().into()).unwrap();
        }

        let mut seen = Vec::new();
        system.for_each(|entity, _| seen.push(entity));
        assert_eq!(seen, es);
        assert_eq!(system.entities().collect::<Vec<_>>(), es);
    }

    #[test]
    fn unregister_removes() {
        let es = entities(2);
        let mut system = ComponentSystem::new(ComponentKind::Particle);
        system.register(es[0], Particle::new().into()).unwrap();
        system.register(es[1], Particle::new().into()).unwrap();

        assert!(system.unregister(es[0]).is_some());
        assert!(system.unregister(es[0]).is_none());
        assert_eq!(system.entities().collect::<Vec<_>>(), vec![es[1]]);
    }

    #[test]
    fn update_advances_every_component() {
        let es = entities(3);
        let mut system = ComponentSystem::new(ComponentKind::Particle);
        for &e in &es {
            system.register(e, Particle::new().into()).unwrap();
        }
        system.update(0.5);
        system.update(0.25);

        for (_, component) in system.iter() {
            let particle = component.as_particle().unwrap();
            assert_eq!(particle.elapsed(), 0.75);
            assert_eq!(particle.ticks(), 2);
        }
    }

    #[test]
    fn for_each_mut_visits_all() {
        let es = entities(2);
        let mut system = ComponentSystem::new(ComponentKind::PlayerControl);
        for &e in &es {
            system.register(e, PlayerControl::default().into()).unwrap();
        }
        system.for_each_mut(|_, component| {
            *component = PlayerControl::new(Vec3::X).into();
        });
        for (_, component) in system.iter() {
            assert_eq!(component.as_player_control().unwrap().impulse(), Vec3::X);
        }
    }
}
