//! Common imports.
//!
//! ```ignore
//! use hoppa::prelude::*;
//! ```

pub use crate::config::{BoxSpec, ConfigError, SceneConfig};
pub use crate::ecs::{
    Component, ComponentKind, ComponentSystem, Entity, Geometry, Particle, PlayerControl, Target,
    World, WorldState,
};
pub use crate::error::{Error, Result};
pub use crate::host::{FrameReport, Host};
pub use crate::input::{Gesture, GestureQueue};
pub use crate::math::{Color, Quat, Vec3};
pub use crate::scene::{NodeId, NodeRecord, RecordingScene, Scene, Shape};
pub use crate::time::{Clock, Time};

#[cfg(feature = "physics3d")]
pub use crate::physics3d::RapierScene;
