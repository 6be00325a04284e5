//! Error taxonomy shared by the world, its systems, and scene collaborators.

use thiserror::Error;

use crate::ecs::{ComponentKind, Entity};
use crate::scene::NodeId;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The entity already holds a component of this kind. The existing
    /// component is left untouched.
    #[error("entity {entity} already has a {kind} component")]
    DuplicateComponentKind { entity: Entity, kind: ComponentKind },
    /// The handle is stale or was never allocated by this world.
    #[error("unknown entity {0}")]
    UnknownEntity(Entity),
    #[error("entity {entity} has no {kind} component")]
    MissingComponent { entity: Entity, kind: ComponentKind },
    /// A component was offered to the system of another kind.
    #[error("a {found} component cannot be registered in the {expected} system")]
    KindMismatch {
        expected: ComponentKind,
        found: ComponentKind,
    },
    /// The scene node backing a component is gone. Components treat this as a
    /// no-op and log it.
    #[error("scene node {0} is not available")]
    MissingCollaborator(NodeId),
    #[error("world has not been initialized")]
    NotInitialized,
    #[error("world is already initialized")]
    AlreadyInitialized,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
