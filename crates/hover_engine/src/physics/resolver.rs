//! Floor collision against static triangle meshes
//!
//! A moving point is tested in each collider's model space. Faces that are
//! walkable (normal Y above a threshold), contain the point in their XZ
//! projection and have the point inside their vertical snap band pull the
//! point's Y onto the face plane and stop vertical motion.
//!
//! Every collider and every face is visited unconditionally and in order, so
//! a later snap overrides an earlier one. There is no broad phase and no
//! best-match selection.

use super::mesh::{CollisionMesh, Face};
use super::step::PhysicsStep;
use crate::config::PhysicsConfig;
use crate::ecs::Entity;
use crate::foundation::math::{Mat4, Mat4Ext, Vec3, WORLD_UP};
use std::sync::Arc;

/// A collider placed in the world for the duration of one body's substeps
#[derive(Debug, Clone)]
pub struct ColliderInstance {
    /// Owning entity
    pub entity: Entity,
    /// Model to world
    pub model: Mat4,
    /// World to model
    pub inverse: Mat4,
    /// Model-space geometry
    pub mesh: Arc<CollisionMesh>,
}

impl ColliderInstance {
    /// Place `mesh` with `model`; `None` if the matrix cannot be inverted
    pub fn new(entity: Entity, model: Mat4, mesh: Arc<CollisionMesh>) -> Option<Self> {
        let inverse = model.try_inverse()?;
        Some(Self {
            entity,
            model,
            inverse,
            mesh,
        })
    }
}

/// Snaps points onto walkable mesh faces
#[derive(Debug, Clone, Copy)]
pub struct CollisionResolver {
    walkable_min_normal_y: f32,
    band_top: f32,
    band_depth: f32,
}

impl CollisionResolver {
    /// Create a resolver using the floor parameters of `config`
    pub fn new(config: &PhysicsConfig) -> Self {
        Self {
            walkable_min_normal_y: config.walkable_min_normal_y,
            band_top: config.band_top,
            band_depth: config.band_depth,
        }
    }

    /// Move `step` by `delta` and correct the result against every collider
    ///
    /// Returns `true` if any face snapped the point, in which case the
    /// vertical velocity of `step` is now zero.
    pub fn resolve(&self, step: &mut PhysicsStep, delta: Vec3, colliders: &[ColliderInstance]) -> bool {
        let mut position = step.position + delta;
        let mut grounded = false;

        for collider in colliders {
            let mut local = collider.inverse.transform_position(&position);

            if self.snap_to_mesh(&mut local, &collider.mesh) {
                log::trace!("Grounded on {} at local y {:.4}", collider.entity, local.y);
                step.velocity.y = 0.0;
                grounded = true;
            }

            position = collider.model.transform_position(&local);
        }

        step.position = position;
        grounded
    }

    /// Snap a model-space point onto the mesh; `true` if any face applied
    pub fn snap_to_mesh(&self, local: &mut Vec3, mesh: &CollisionMesh) -> bool {
        let mut snapped = false;
        for (index, face) in mesh.faces().enumerate() {
            if let Some(height) = self.snap_height(local, &face) {
                log::trace!("Face {} snaps y {:.4} -> {:.4}", index, local.y, height);
                local.y = height;
                snapped = true;
            }
        }
        snapped
    }

    /// The Y that puts `local` on the plane of `face`, if the face claims it
    pub fn snap_height(&self, local: &Vec3, face: &Face) -> Option<f32> {
        let normal = face.normal;

        // Walls and ceilings are never floors
        if normal.y <= self.walkable_min_normal_y {
            return None;
        }

        if !contains_xz(face, local) {
            return None;
        }

        let top = face.v0 + WORLD_UP * self.band_top;
        if normal.dot(&(local - top)) > 0.0 {
            return None;
        }

        let bottom = top - WORLD_UP * self.band_depth;
        if normal.dot(&(local - bottom)) < 0.0 {
            return None;
        }

        let offset = (face.v0 - local).dot(&normal) / normal.dot(&WORLD_UP);
        let height = local.y + offset;

        // NaN or infinite heights come from broken normals; such faces never match
        height.is_finite().then_some(height)
    }
}

/// Whether `point` lies inside the XZ projection of `face`
///
/// Degenerate projections have zero area and never contain anything.
pub fn contains_xz(face: &Face, point: &Vec3) -> bool {
    let (v0, v1, v2) = (face.v0, face.v1, face.v2);

    let alpha = 0.5 * (-v1.z * v2.x + v0.z * (-v1.x + v2.x) + v0.x * (v1.z - v2.z) + v1.x * v2.z);
    let sign = if alpha < 0.0 { -1.0 } else { 1.0 };
    let s = (v0.z * v2.x - v0.x * v2.z + (v2.z - v0.z) * point.x + (v0.x - v2.x) * point.z) * sign;
    let t = (v0.x * v1.z - v0.z * v1.x + (v0.z - v1.z) * point.x + (v1.x - v0.x) * point.z) * sign;

    s >= 0.0 && t >= 0.0 && (s + t) < 2.0 * alpha * sign
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColliderSpace;
    use crate::ecs::components::TransformComponent;
    use crate::physics::mesh::{CollisionMeshFactory, MeshIndex};
    use approx::assert_relative_eq;

    fn resolver() -> CollisionResolver {
        CollisionResolver::new(&PhysicsConfig::default())
    }

    fn collider_at(position: Vec3, mesh: CollisionMesh) -> ColliderInstance {
        let transform = TransformComponent::from_position(position);
        ColliderInstance::new(
            Entity::default(),
            transform.model_matrix(ColliderSpace::TranslationOnly),
            Arc::new(mesh),
        )
        .unwrap()
    }

    fn triangle(v0: Vec3, v1: Vec3, v2: Vec3, normal: Vec3) -> CollisionMesh {
        CollisionMesh::new(
            vec![v0, v1, v2],
            vec![normal],
            vec![MeshIndex::new(0, 0), MeshIndex::new(1, 0), MeshIndex::new(2, 0)],
        )
        .unwrap()
    }

    fn face(v0: Vec3, v1: Vec3, v2: Vec3) -> Face {
        Face { v0, v1, v2, normal: Vec3::y() }
    }

    #[test]
    fn test_contains_xz_either_winding() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(2.0, 0.0, 0.0);
        let c = Vec3::new(0.0, 0.0, 2.0);
        let inside = Vec3::new(0.5, 7.0, 0.5);
        let outside = Vec3::new(1.5, 0.0, 1.5);

        assert!(contains_xz(&face(a, b, c), &inside));
        assert!(contains_xz(&face(a, c, b), &inside));
        assert!(!contains_xz(&face(a, b, c), &outside));
        assert!(!contains_xz(&face(a, c, b), &outside));
    }

    #[test]
    fn test_contains_xz_degenerate_never_matches() {
        let collinear = face(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        );
        assert!(!contains_xz(&collinear, &Vec3::new(1.0, 0.0, 0.0)));
        assert!(!contains_xz(&collinear, &Vec3::new(0.5, 0.0, 0.0)));
    }

    #[test]
    fn test_snap_onto_floor_inside_band() {
        let colliders = [collider_at(Vec3::zeros(), CollisionMeshFactory::floor(10.0, 0.0))];
        let mut step = PhysicsStep::new(Vec3::new(1.0, 0.0, 2.0), Vec3::new(0.0, -3.0, 0.0));

        let grounded = resolver().resolve(&mut step, Vec3::new(0.0, -0.05, 0.0), &colliders);

        assert!(grounded);
        assert_eq!(step.velocity.y, 0.0);
        assert_relative_eq!(step.position, Vec3::new(1.0, 0.0, 2.0), epsilon = 1e-6);
    }

    #[test]
    fn test_snap_keeps_horizontal_velocity() {
        let colliders = [collider_at(Vec3::zeros(), CollisionMeshFactory::floor(10.0, 0.0))];
        let mut step = PhysicsStep::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, -1.0, -1.0));

        resolver().resolve(&mut step, Vec3::new(0.1, -0.1, 0.0), &colliders);

        assert_eq!(step.velocity, Vec3::new(2.0, 0.0, -1.0));
        assert_relative_eq!(step.position, Vec3::new(0.1, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_point_above_face_is_untouched() {
        let colliders = [collider_at(Vec3::zeros(), CollisionMeshFactory::floor(10.0, 0.0))];
        let mut step = PhysicsStep::new(Vec3::new(1.0, 0.5, 2.0), Vec3::new(0.0, -1.0, 0.0));

        let grounded = resolver().resolve(&mut step, Vec3::new(0.0, -0.1, 0.0), &colliders);

        assert!(!grounded);
        assert_eq!(step.velocity.y, -1.0);
        assert_relative_eq!(step.position, Vec3::new(1.0, 0.4, 2.0), epsilon = 1e-6);
    }

    #[test]
    fn test_point_below_band_falls_through() {
        let colliders = [collider_at(Vec3::zeros(), CollisionMeshFactory::floor(10.0, 0.0))];
        let mut step = PhysicsStep::new(Vec3::new(1.0, -1.2, 2.0), Vec3::new(0.0, -1.0, 0.0));

        let grounded = resolver().resolve(&mut step, Vec3::zeros(), &colliders);

        assert!(!grounded);
        assert_relative_eq!(step.position.y, -1.2, epsilon = 1e-6);
    }

    #[test]
    fn test_band_bottom_is_inclusive() {
        let floor = CollisionMeshFactory::floor(10.0, 0.0);
        let face = floor.face(0).unwrap();
        assert_eq!(resolver().snap_height(&Vec3::new(-1.0, -1.0, 2.0), &face), Some(0.0));
        assert_eq!(resolver().snap_height(&Vec3::new(-1.0, 0.0, 2.0), &face), Some(0.0));
        assert_eq!(resolver().snap_height(&Vec3::new(-1.0, -1.01, 2.0), &face), None);
    }

    #[test]
    fn test_outside_every_face_passes_through() {
        let colliders = [collider_at(Vec3::new(3.0, 1.0, -2.0), CollisionMeshFactory::floor(1.0, 0.0))];
        let start = Vec3::new(10.0, 0.9, 10.0);
        let delta = Vec3::new(0.1, -0.2, 0.0);
        let mut step = PhysicsStep::new(start, Vec3::new(1.0, -4.0, 0.0));

        let grounded = resolver().resolve(&mut step, delta, &colliders);

        assert!(!grounded);
        assert_eq!(step.velocity, Vec3::new(1.0, -4.0, 0.0));
        assert_relative_eq!(step.position, start + delta, epsilon = 1e-5);
    }

    #[test]
    fn test_no_colliders_applies_delta_exactly() {
        let mut step = PhysicsStep::new(Vec3::new(1.0, 2.0, 3.0), Vec3::zeros());
        resolver().resolve(&mut step, Vec3::new(0.5, -0.5, 0.25), &[]);
        assert_eq!(step.position, Vec3::new(1.5, 1.5, 3.25));
    }

    #[test]
    fn test_steep_faces_are_skipped() {
        let v0 = Vec3::new(-1.0, 0.0, -1.0);
        let v1 = Vec3::new(1.0, 0.0, -1.0);
        let v2 = Vec3::new(0.0, 0.0, 1.0);
        let point = Vec3::new(0.0, -0.5, -0.5);

        let threshold = triangle(v0, v1, v2, Vec3::new(0.0, 0.1, 0.995));
        let wall = triangle(v0, v1, v2, Vec3::new(0.0, 0.0, 1.0));
        let floor = triangle(v0, v1, v2, Vec3::y());

        let mut local = point;
        assert!(!resolver().snap_to_mesh(&mut local, &threshold));
        assert!(!resolver().snap_to_mesh(&mut local, &wall));
        assert_eq!(local, point);

        assert!(resolver().snap_to_mesh(&mut local, &floor));
        assert_relative_eq!(local.y, 0.0);
    }

    #[test]
    fn test_wall_beneath_body_never_snaps() {
        let colliders = [collider_at(Vec3::new(0.0, -2.0, 0.0), CollisionMeshFactory::wall(5.0, 2.0))];
        let mut step = PhysicsStep::new(Vec3::new(0.0, -0.5, 0.0), Vec3::new(0.0, -1.0, 0.0));

        let grounded = resolver().resolve(&mut step, Vec3::new(0.0, -0.1, 0.0), &colliders);

        assert!(!grounded);
        assert_eq!(step.velocity.y, -1.0);
    }

    #[test]
    fn test_degenerate_face_never_snaps() {
        let degenerate = triangle(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::y(),
        );
        let colliders = [collider_at(Vec3::zeros(), degenerate)];
        let mut step = PhysicsStep::new(Vec3::new(1.0, -0.5, 0.0), Vec3::new(0.0, -1.0, 0.0));

        let grounded = resolver().resolve(&mut step, Vec3::zeros(), &colliders);

        assert!(!grounded);
        assert_relative_eq!(step.position, Vec3::new(1.0, -0.5, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_nan_normal_never_snaps() {
        let broken = triangle(
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(-1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(f32::NAN, f32::NAN, f32::NAN),
        );
        let mut local = Vec3::new(0.0, -0.5, 0.0);
        assert!(!resolver().snap_to_mesh(&mut local, &broken));
        assert_eq!(local, Vec3::new(0.0, -0.5, 0.0));
    }

    #[test]
    fn test_resolve_is_idempotent_once_grounded() {
        let colliders = [collider_at(Vec3::new(0.0, 2.0, 0.0), CollisionMeshFactory::ramp(5.0, 2.0))];
        let mut step = PhysicsStep::new(Vec3::new(1.0, 3.0, 0.5), Vec3::new(0.0, -2.0, 0.0));

        assert!(resolver().resolve(&mut step, Vec3::new(0.0, -0.1, 0.0), &colliders));
        let grounded_at = step.position;

        resolver().resolve(&mut step, Vec3::zeros(), &colliders);
        assert_relative_eq!(step.position, grounded_at, epsilon = 1e-5);
        resolver().resolve(&mut step, Vec3::zeros(), &colliders);
        assert_relative_eq!(step.position, grounded_at, epsilon = 1e-5);
        assert_eq!(step.velocity.y, 0.0);
    }

    #[test]
    fn test_snap_onto_ramp_plane() {
        // Ramp rises 2 over 10 units of X; at x = 1 the surface is at y = 1.2
        let colliders = [collider_at(Vec3::zeros(), CollisionMeshFactory::ramp(5.0, 2.0))];
        let mut step = PhysicsStep::new(Vec3::new(1.0, 1.0, 0.0), Vec3::new(0.0, -2.0, 0.0));

        assert!(resolver().resolve(&mut step, Vec3::zeros(), &colliders));
        assert_relative_eq!(step.position.y, 1.2, epsilon = 1e-5);
    }

    #[test]
    fn test_last_collider_wins() {
        let lower = collider_at(Vec3::new(0.0, -0.3, 0.0), CollisionMeshFactory::floor(5.0, 0.0));
        let upper = collider_at(Vec3::new(0.0, 0.0, 0.0), CollisionMeshFactory::floor(5.0, 0.0));
        let mut step = PhysicsStep::new(Vec3::new(1.0, -0.5, 2.0), Vec3::new(0.0, -1.0, 0.0));

        // The first collider alone would settle the point at -0.3
        let mut first_only = step.clone();
        resolver().resolve(&mut first_only, Vec3::zeros(), std::slice::from_ref(&lower));
        assert_relative_eq!(first_only.position.y, -0.3, epsilon = 1e-6);

        assert!(resolver().resolve(&mut step, Vec3::zeros(), &[lower, upper]));
        assert_relative_eq!(step.position.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_collider_order_decides_result() {
        // With the band reaching above the face, the lower floor also claims
        // a point the upper floor has just lifted
        let resolver = CollisionResolver::new(&PhysicsConfig {
            band_top: 0.5,
            ..PhysicsConfig::default()
        });
        let lower = collider_at(Vec3::new(0.0, -0.3, 0.0), CollisionMeshFactory::floor(5.0, 0.0));
        let upper = collider_at(Vec3::new(0.0, 0.0, 0.0), CollisionMeshFactory::floor(5.0, 0.0));
        let start = PhysicsStep::new(Vec3::new(1.0, -0.4, 2.0), Vec3::new(0.0, -1.0, 0.0));

        let mut upper_last = start.clone();
        assert!(resolver.resolve(&mut upper_last, Vec3::zeros(), &[lower.clone(), upper.clone()]));
        assert_relative_eq!(upper_last.position.y, 0.0, epsilon = 1e-6);

        let mut lower_last = start;
        assert!(resolver.resolve(&mut lower_last, Vec3::zeros(), &[upper, lower]));
        assert_relative_eq!(lower_last.position.y, -0.3, epsilon = 1e-6);
    }

    #[test]
    fn test_full_space_uses_collider_scale() {
        let transform = TransformComponent::from_position(Vec3::zeros()).with_uniform_scale(2.0);
        let mesh = Arc::new(CollisionMeshFactory::floor(1.0, 0.0));
        let point = Vec3::new(1.5, -0.5, 0.0);

        let full = ColliderInstance::new(
            Entity::default(),
            transform.model_matrix(ColliderSpace::Full),
            Arc::clone(&mesh),
        )
        .unwrap();
        let mut step = PhysicsStep::new(point, Vec3::new(0.0, -1.0, 0.0));
        assert!(resolver().resolve(&mut step, Vec3::zeros(), &[full]));
        assert_relative_eq!(step.position.y, 0.0, epsilon = 1e-6);

        let translated = ColliderInstance::new(
            Entity::default(),
            transform.model_matrix(ColliderSpace::TranslationOnly),
            mesh,
        )
        .unwrap();
        let mut step = PhysicsStep::new(point, Vec3::new(0.0, -1.0, 0.0));
        assert!(!resolver().resolve(&mut step, Vec3::zeros(), &[translated]));
    }

    #[test]
    fn test_singular_model_matrix_is_rejected() {
        let transform = TransformComponent::identity().with_uniform_scale(0.0);
        let collider = ColliderInstance::new(
            Entity::default(),
            transform.model_matrix(ColliderSpace::Full),
            Arc::new(CollisionMeshFactory::floor(1.0, 0.0)),
        );
        assert!(collider.is_none());
    }
}
