//! Substep integration of rigidbodies against mesh colliders
//!
//! Each tick is split into `substeps` equal slices. Every slice applies
//! gravity, then drag, then moves the body through the collision resolver,
//! which may pin it onto a walkable face and zero its vertical velocity.
//!
//! Bodies are updated one at a time by handle: the system copies a body's
//! position and velocity out of the world, integrates the copy, and writes it
//! back before moving on to the next body.

use crate::config::{ConfigError, PhysicsConfig};
use crate::ecs::components::{MeshColliderComponent, RigidbodyComponent, TransformComponent};
use crate::ecs::{Entity, System, World};
use crate::physics::{ColliderInstance, CollisionResolver, PhysicsStep};

/// Counts from one physics tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhysicsStats {
    /// Bodies integrated
    pub bodies: usize,
    /// Colliders each body was tested against
    pub colliders: usize,
    /// Bodies that touched a floor during the tick
    pub grounded: usize,
}

/// Gravity, drag and floor collision for every `(Transform, Rigidbody)`
pub struct PhysicsSystem {
    config: PhysicsConfig,
    resolver: CollisionResolver,
}

impl PhysicsSystem {
    /// Create a physics system
    pub fn new(config: PhysicsConfig) -> Self {
        let resolver = CollisionResolver::new(&config);
        Self { config, resolver }
    }

    /// Create a physics system after validating `config`
    pub fn try_new(config: PhysicsConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Active configuration
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Advance one body by `delta_time` seconds
    ///
    /// Returns `true` if any substep grounded the body.
    pub fn integrate(&self, step: &mut PhysicsStep, delta_time: f32, colliders: &[ColliderInstance]) -> bool {
        let sub_dt = delta_time * self.config.substep_fraction();
        let mut grounded = false;

        for _ in 0..self.config.substeps.max(1) {
            step.velocity += self.config.gravity * sub_dt;
            step.velocity += -step.velocity * self.config.linear_drag * sub_dt;

            let delta = step.velocity * sub_dt;
            grounded |= self.resolver.resolve(step, delta, colliders);
        }

        grounded
    }

    /// Run one tick over the whole world
    pub fn update(&mut self, world: &mut World, delta_time: f32) -> PhysicsStats {
        let mut stats = PhysicsStats::default();

        for entity in world.entities_with::<(TransformComponent, RigidbodyComponent)>() {
            let colliders = self.colliders(world);

            let (Some(transform), Some(body)) = (
                world.get_component::<TransformComponent>(entity),
                world.get_component::<RigidbodyComponent>(entity),
            ) else {
                continue;
            };
            let mut step = PhysicsStep::new(transform.position, body.velocity);

            if self.integrate(&mut step, delta_time, &colliders) {
                stats.grounded += 1;
            }

            if let Some(transform) = world.get_component_mut::<TransformComponent>(entity) {
                transform.position = step.position;
            }
            if let Some(body) = world.get_component_mut::<RigidbodyComponent>(entity) {
                body.velocity = step.velocity;
            }

            stats.bodies += 1;
            stats.colliders = colliders.len();
        }

        log::debug!(
            "Physics tick {:.4}s: {} bodies, {} colliders, {} grounded",
            delta_time,
            stats.bodies,
            stats.colliders,
            stats.grounded
        );

        stats
    }

    /// Snapshot every collider in store order
    fn colliders(&self, world: &World) -> Vec<ColliderInstance> {
        world
            .entities_with::<(TransformComponent, MeshColliderComponent)>()
            .into_iter()
            .filter_map(|entity| self.place_collider(world, entity))
            .collect()
    }

    fn place_collider(&self, world: &World, entity: Entity) -> Option<ColliderInstance> {
        let transform = world.get_component::<TransformComponent>(entity)?;
        let collider = world.get_component::<MeshColliderComponent>(entity)?;
        let model = transform.model_matrix(self.config.collider_space);

        let instance = ColliderInstance::new(entity, model, collider.mesh.clone());
        if instance.is_none() {
            log::warn!("Skipping collider {}: model matrix is not invertible", entity);
        }
        instance
    }
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl System for PhysicsSystem {
    fn name(&self) -> &str {
        "physics"
    }

    fn run(&mut self, world: &mut World, delta_time: f32) {
        self.update(world, delta_time);
    }
}
