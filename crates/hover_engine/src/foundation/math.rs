//! Math utilities and types
//!
//! Thin aliases over nalgebra single-precision types plus the handful of
//! helpers the physics code needs. Y is up, right-handed.

pub use nalgebra::{
    Vector3, Matrix4,
    Quaternion,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// World up axis
pub const WORLD_UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Quat};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Build a rotation from Euler angles in radians (roll about X, pitch about Y, yaw about Z)
    pub fn euler_to_quaternion(x: f32, y: f32, z: f32) -> Quat {
        Quat::from_euler_angles(x, y, z)
    }
}

/// Extension trait for Mat4 with point helpers on plain vectors
pub trait Mat4Ext {
    /// Transform a position (w = 1), including translation
    fn transform_position(&self, position: &Vec3) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn transform_position(&self, position: &Vec3) -> Vec3 {
        self.transform_point(&Point3::from(*position)).coords
    }
}
