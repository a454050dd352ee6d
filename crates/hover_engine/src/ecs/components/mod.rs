//! ECS Components module
//!
//! Physics-facing components; all are plain data.

pub mod transform;
pub mod rigidbody;
pub mod mesh_collider;

pub use transform::TransformComponent;
pub use rigidbody::RigidbodyComponent;
pub use mesh_collider::MeshColliderComponent;
