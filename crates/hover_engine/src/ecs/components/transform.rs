//! Transform component for the ECS system
//!
//! Pure data component plus the matrix helpers the physics system needs.
//! Y-up, right-handed.

use crate::config::ColliderSpace;
use crate::ecs::Component;
use crate::foundation::math::{utils, Mat4, Quat, Vec3, WORLD_UP};

/// ECS Transform component
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// World space position
    pub position: Vec3,

    /// World space rotation (always unit length)
    pub rotation: Quat,

    /// World space scale factors
    pub scale: Vec3,
}

impl Component for TransformComponent {}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl TransformComponent {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create from full transform specification
    pub fn from_transform(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Translate-rotate-scale matrix
    pub fn trs_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Model matrix used to place a collider mesh in the world
    ///
    /// [`ColliderSpace::TranslationOnly`] ignores rotation and scale.
    pub fn model_matrix(&self, space: ColliderSpace) -> Mat4 {
        match space {
            ColliderSpace::TranslationOnly => Mat4::new_translation(&self.position),
            ColliderSpace::Full => self.trs_matrix(),
        }
    }

    /// Set rotation from a quaternion
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    /// Set rotation from Euler angles in radians
    pub fn set_rotation_euler(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = utils::euler_to_quaternion(x, y, z);
    }

    /// Turn so that local -Z points at `target`, keeping world up
    ///
    /// Leaves the rotation untouched when `target` is at the current position
    /// or straight above/below it.
    pub fn look_at(&mut self, target: Vec3) {
        let forward = target - self.position;
        if forward.magnitude_squared() <= f32::EPSILON
            || forward.normalize().cross(&WORLD_UP).magnitude_squared() <= f32::EPSILON
        {
            return;
        }
        self.rotation = Quat::face_towards(&-forward, &WORLD_UP);
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: Set rotation from quaternion
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set scale (uniform)
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}
