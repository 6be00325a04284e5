//! # The Box ECS
//!
//! A closed-set entity-component-system: every component kind is known up
//! front, so components are a tagged enum and each kind gets its own
//! registry. No type erasure, no reflection.
//!
//! ## Module Overview
//!
//! - [`entity`]: Generational entity IDs
//! - [`component`]: The component variants and their behavior
//! - [`system`]: Per-kind component registries
//! - [`world`]: Entities, registries, the update tick and broadcasts

pub mod component;
pub mod entity;
pub mod system;
pub mod world;

pub use component::{Component, ComponentKind, Geometry, Particle, PlayerControl};
pub use entity::Entity;
pub use system::ComponentSystem;
pub use world::{Target, World, WorldState};

#[cfg(feature = "diagnostics")]
pub use world::WorldStats;
