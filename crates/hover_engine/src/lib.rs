//! # Hover Engine
//!
//! A small entity-component-system core with a substep physics integrator and
//! a triangle-mesh floor collision resolver.
//!
//! ## Features
//!
//! - **ECS Architecture**: Generational entities with typed component storage
//! - **Substep Physics**: Gravity and linear drag integrated over fixed substeps
//! - **Mesh Floors**: Bodies snap onto walkable faces of static collision meshes
//! - **Asset Loading**: Collision meshes from Wavefront OBJ files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hover_engine::prelude::*;
//! use std::sync::Arc;
//!
//! let mut world = World::new();
//! let mut systems = Systems::new();
//! systems.add(PhysicsSystem::new(PhysicsConfig::default()));
//!
//! let floor = Arc::new(CollisionMeshFactory::floor(10.0, 0.0));
//! let ground = world.create_entity();
//! world.add_component(ground, TransformComponent::identity());
//! world.add_component(ground, MeshColliderComponent::new(floor));
//!
//! let body = world.create_entity();
//! world.add_component(body, TransformComponent::from_position(Vec3::new(0.0, 0.5, 0.0)));
//! world.add_component(body, RigidbodyComponent::default());
//!
//! systems.update_all(&mut world, 1.0 / 60.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod ecs;
pub mod physics;
pub mod assets;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        foundation::{
            math::{Vec3, Mat4, Quat, WORLD_UP},
            time::{Timer, FixedTimestep},
        },
        config::{Config, ConfigError, PhysicsConfig, ColliderSpace},
        ecs::{World, Entity, Component, System, Systems},
        ecs::components::{TransformComponent, RigidbodyComponent, MeshColliderComponent},
        ecs::systems::{PhysicsSystem, PhysicsStats},
        physics::{CollisionMesh, CollisionMeshFactory, MeshIndex, PhysicsStep, CollisionResolver},
        assets::{AssetError, MeshLibrary, ObjLoader},
    };
}
