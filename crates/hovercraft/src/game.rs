//! Game state: the world, its systems and the hovercraft

use crate::config::GameConfig;
use hover_engine::config::ConfigError;
use hover_engine::ecs::components::{MeshColliderComponent, RigidbodyComponent, TransformComponent};
use hover_engine::ecs::systems::PhysicsSystem;
use hover_engine::ecs::{Entity, Systems, World};
use hover_engine::foundation::math::Vec3;
use hover_engine::physics::CollisionMesh;
use std::sync::Arc;

/// Owns the ECS world and runs its systems
pub struct Game {
    world: World,
    systems: Systems,
    spawn_position: Vec3,
    hovercraft: Option<Entity>,
    terrain: Option<Entity>,
}

impl Game {
    /// Create a game with the physics system registered
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut systems = Systems::new();
        systems.add(PhysicsSystem::new(config.physics.clone()));

        Ok(Self {
            world: World::new(),
            systems,
            spawn_position: config.simulation.spawn_position,
            hovercraft: None,
            terrain: None,
        })
    }

    /// Spawn the terrain collider and the hovercraft
    ///
    /// Calling this again replaces both.
    pub fn init(&mut self, terrain_mesh: Arc<CollisionMesh>) {
        for entity in [self.terrain.take(), self.hovercraft.take()].into_iter().flatten() {
            self.world.destroy_entity(entity);
        }

        let terrain = self.world.create_entity();
        self.world.add_component(terrain, TransformComponent::identity());
        self.world.add_component(terrain, MeshColliderComponent::new(terrain_mesh));

        let hovercraft = self.world.create_entity();
        self.world
            .add_component(hovercraft, TransformComponent::from_position(self.spawn_position));
        self.world.add_component(hovercraft, RigidbodyComponent::new());

        log::info!("Spawned hovercraft {} at {:?}", hovercraft, self.spawn_position);
        self.terrain = Some(terrain);
        self.hovercraft = Some(hovercraft);
    }

    /// Advance the simulation by `delta_time` seconds
    pub fn update(&mut self, delta_time: f32) {
        self.systems.update_all(&mut self.world, delta_time);
    }

    /// Current hovercraft position, once spawned
    pub fn hovercraft_position(&self) -> Option<Vec3> {
        let transform = self.world.get_component::<TransformComponent>(self.hovercraft?)?;
        Some(transform.position)
    }

    /// Current hovercraft velocity, once spawned
    pub fn hovercraft_velocity(&self) -> Option<Vec3> {
        let body = self.world.get_component::<RigidbodyComponent>(self.hovercraft?)?;
        Some(body.velocity)
    }

    /// The game world
    pub fn world(&self) -> &World {
        &self.world
    }
}
