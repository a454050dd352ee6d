//! Per-body integration state

use crate::foundation::math::Vec3;

/// Position and velocity of one body while it is being integrated
///
/// The physics system copies these out of the body's components, advances
/// them through every substep and writes them back afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsStep {
    /// World-space position
    pub position: Vec3,
    /// World-space velocity
    pub velocity: Vec3,
}

impl PhysicsStep {
    /// Create a step from a body's current state
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self { position, velocity }
    }
}
