//! Static mesh collider component

use crate::ecs::Component;
use crate::physics::CollisionMesh;
use std::sync::Arc;

/// Marks an entity as a static floor collider
///
/// The mesh is shared and read-only; many colliders may reference the same
/// asset, and its lifetime is managed by whoever loaded it.
#[derive(Debug, Clone)]
pub struct MeshColliderComponent {
    /// Collision geometry in model space
    pub mesh: Arc<CollisionMesh>,
}

impl MeshColliderComponent {
    /// Create a collider for a shared mesh
    pub fn new(mesh: Arc<CollisionMesh>) -> Self {
        Self { mesh }
    }
}

impl Component for MeshColliderComponent {}
