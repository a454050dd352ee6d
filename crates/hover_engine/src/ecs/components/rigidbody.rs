//! Rigidbody component for entities moved by the physics system
//!
//! Bodies are unit-mass points: no inertia, no angular state.

use crate::ecs::Component;
use crate::foundation::math::Vec3;

/// Component for entities integrated under gravity and drag
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RigidbodyComponent {
    /// Linear velocity in units per second
    pub velocity: Vec3,
}

impl RigidbodyComponent {
    /// Create a body at rest
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a body with an initial velocity
    pub fn with_velocity(velocity: Vec3) -> Self {
        Self { velocity }
    }
}

impl Component for RigidbodyComponent {}
