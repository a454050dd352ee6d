//! Physics module for substep integration and floor collision
//!
//! Static triangle meshes act as floors. Bodies are integrated in fixed
//! substeps and snapped onto any walkable face they sink into.

pub mod mesh;
pub mod resolver;
pub mod step;

pub use mesh::{CollisionMesh, CollisionMeshFactory, Face, MeshError, MeshIndex};
pub use resolver::{contains_xz, ColliderInstance, CollisionResolver};
pub use step::PhysicsStep;
