//! # Entity: Identity Without Data
//!
//! An [`Entity`] is an index plus a generation. It holds no components itself;
//! the [`World`](super::world::World) records which kinds it has and the
//! [`ComponentSystem`](super::system::ComponentSystem)s hold the data.
//!
//! Destroyed slots are recycled with a bumped generation, so a handle kept
//! past its entity's destruction is rejected instead of silently pointing at
//! whatever reused the slot:
//!
//! ```text
//! Entity { index: 3, generation: 0 }  ← box created at startup
//! Entity { index: 3, generation: 1 }  ← new box after the first was destroyed
//! ```

use std::fmt;

/// A handle to an entity in the [`World`](super::world::World).
///
/// Ordering is by index, then generation. Component systems iterate in this
/// order, which keeps broadcasts stable from frame to frame.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl Entity {
    pub fn index(self) -> u32 {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Hands out entity IDs and recycles freed slots.
///
/// ```text
/// generations: [1, 0, 0]   ← one counter per slot ever handed out
/// free_list:   [0]         ← slots waiting for reuse
/// ```
#[derive(Debug, Default)]
pub(crate) struct EntityAllocator {
    generations: Vec<u32>,
    free_list: Vec<u32>,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> Entity {
        match self.free_list.pop() {
            Some(index) => Entity {
                index,
                generation: self.generations[index as usize],
            },
            None => {
                let index = self.generations.len() as u32;
                self.generations.push(0);
                Entity {
                    index,
                    generation: 0,
                }
            }
        }
    }

    /// Free the entity's slot. Returns `false` if the handle was already stale.
    pub fn deallocate(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        let generation = &mut self.generations[entity.index as usize];
        *generation = generation.wrapping_add(1);
        self.free_list.push(entity.index);
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.generations
            .get(entity.index as usize)
            .is_some_and(|&generation| generation == entity.generation)
    }

    pub fn alive_count(&self) -> usize {
        self.generations.len() - self.free_list.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_sequential() {
        let mut alloc = EntityAllocator::new();
        let e0 = alloc.allocate();
        let e1 = alloc.allocate();
        assert_eq!((e0.index(), e0.generation()), (0, 0));
        assert_eq!((e1.index(), e1.generation()), (1, 0));
    }

    #[test]
    fn recycled_slot_gets_new_generation() {
        let mut alloc = EntityAllocator::new();
        let e0 = alloc.allocate();
        assert!(alloc.deallocate(e0));

        let reused = alloc.allocate();
        assert_eq!(reused.index(), 0);
        assert_eq!(reused.generation(), 1);
        assert!(!alloc.is_alive(e0));
        assert!(alloc.is_alive(reused));
    }

    #[test]
    fn generation_wraps_after_max() {
        let mut alloc = EntityAllocator::new();
        alloc.allocate();
        alloc.generations[0] = u32::MAX;
        let worn = Entity {
            index: 0,
            generation: u32::MAX,
        };

        assert!(alloc.deallocate(worn));
        let reused = alloc.allocate();
        assert_eq!((reused.index(), reused.generation()), (0, 0));
        assert!(!alloc.is_alive(worn));
    }

    #[test]
    fn double_free_rejected() {
        let mut alloc = EntityAllocator::new();
        let e0 = alloc.allocate();
        assert!(alloc.deallocate(e0));
        assert!(!alloc.deallocate(e0));
    }

    #[test]
    fn foreign_handle_is_dead() {
        let alloc = EntityAllocator::new();
        let never = Entity {
            index: 7,
            generation: 0,
        };
        assert!(!alloc.is_alive(never));
    }

    #[test]
    fn alive_count_tracks_frees() {
        let mut alloc = EntityAllocator::new();
        let e0 = alloc.allocate();
        let _e1 = alloc.allocate();
        assert_eq!(alloc.alive_count(), 2);
        alloc.deallocate(e0);
        assert_eq!(alloc.alive_count(), 1);
    }

    #[test]
    fn display_format() {
        let e = Entity {
            index: 4,
            generation: 2,
        };
        assert_eq!(e.to_string(), "4v2");
        assert_eq!(format!("{e:?}"), "Entity(4v2)");
    }
}
