//! ECS Systems module

pub mod physics_system;

pub use physics_system::{PhysicsStats, PhysicsSystem};
