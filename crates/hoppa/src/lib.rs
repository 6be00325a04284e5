//! # Hoppa: Tap-to-Jump ECS Core
//!
//! A small entity-component-system that drives a scene of physics boxes
//! without knowing which engine renders or simulates them. The engine side is
//! reached through the [`Scene`](scene::Scene) trait; the [`Host`](host::Host)
//! adapter turns frame ticks and taps into world updates and jumps.
//!
//! Start with `use hoppa::prelude::*`.

pub mod config;
pub mod ecs;
pub mod error;
pub mod host;
pub mod input;
pub mod math;
pub mod prelude;
pub mod scene;
pub mod time;

#[cfg(feature = "physics3d")]
pub mod physics3d;

pub use error::{Error, Result};
