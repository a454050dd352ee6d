//! Collision mesh representation
//!
//! Meshes are stored in MODEL SPACE and never modified after construction.
//! Positions and normals live in separate arrays; each face corner references
//! one of each, the way Wavefront OBJ `v//vn` corners do.

use crate::foundation::math::Vec3;
use thiserror::Error;

/// Collision mesh errors
#[derive(Error, Debug)]
pub enum MeshError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed source data
    #[error("Parse error on line {line}: {message}")]
    Parse {
        /// 1-based source line
        line: usize,
        /// What went wrong
        message: String,
    },

    /// A face corner points past the end of an attribute array
    #[error("Corner {corner} references {attribute} {index}, but only {available} exist")]
    IndexOutOfRange {
        /// Position in the index array
        corner: usize,
        /// `"vertex"` or `"normal"`
        attribute: &'static str,
        /// Offending index
        index: usize,
        /// Length of the referenced array
        available: usize,
    },

    /// Index array does not describe whole triangles
    #[error("Index count {index_count} is not a multiple of 3")]
    IncompleteFace {
        /// Number of corners supplied
        index_count: usize,
    },

    /// Source contained no faces
    #[error("Mesh has no faces")]
    Empty,
}

/// One face corner: a position index and a normal index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshIndex {
    /// Offset into the position array
    pub vertex: usize,
    /// Offset into the normal array
    pub normal: usize,
}

impl MeshIndex {
    /// Create a corner
    pub fn new(vertex: usize, normal: usize) -> Self {
        Self { vertex, normal }
    }
}

/// A resolved triangle with the normal of its first corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// First vertex
    pub v0: Vec3,
    /// Second vertex
    pub v1: Vec3,
    /// Third vertex
    pub v2: Vec3,
    /// Face normal
    pub normal: Vec3,
}

/// Immutable triangle mesh used for floor collision
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionMesh {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<MeshIndex>,
}

impl CollisionMesh {
    /// Build a mesh, checking that every corner references existing data
    pub fn new(
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        indices: Vec<MeshIndex>,
    ) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::IncompleteFace {
                index_count: indices.len(),
            });
        }

        for (corner, index) in indices.iter().enumerate() {
            if index.vertex >= positions.len() {
                return Err(MeshError::IndexOutOfRange {
                    corner,
                    attribute: "vertex",
                    index: index.vertex,
                    available: positions.len(),
                });
            }
            if index.normal >= normals.len() {
                return Err(MeshError::IndexOutOfRange {
                    corner,
                    attribute: "normal",
                    index: index.normal,
                    available: normals.len(),
                });
            }
        }

        Ok(Self {
            positions,
            normals,
            indices,
        })
    }

    /// Build a mesh from loose triangles, deriving one normal per face from
    /// its winding (counter-clockwise seen from the front)
    pub fn from_triangles(triangles: &[[Vec3; 3]]) -> Self {
        let mut positions = Vec::with_capacity(triangles.len() * 3);
        let mut normals = Vec::with_capacity(triangles.len());
        let mut indices = Vec::with_capacity(triangles.len() * 3);

        for (face, &[v0, v1, v2]) in triangles.iter().enumerate() {
            let base = positions.len();
            positions.extend_from_slice(&[v0, v1, v2]);
            normals.push(face_normal(v0, v1, v2));
            indices.extend((0..3).map(|corner| MeshIndex::new(base + corner, face)));
        }

        Self {
            positions,
            normals,
            indices,
        }
    }

    /// Vertex positions
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Normals
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Face corners, three per face
    pub fn indices(&self) -> &[MeshIndex] {
        &self.indices
    }

    /// Number of triangles
    pub fn face_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get a single face
    pub fn face(&self, index: usize) -> Option<Face> {
        let start = index.checked_mul(3)?;
        let end = start.checked_add(3)?;
        let corners = self.indices.get(start..end)?;
        Some(self.resolve_face(corners))
    }

    /// Iterate faces in index order
    pub fn faces(&self) -> impl Iterator<Item = Face> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|corners| self.resolve_face(corners))
    }

    fn resolve_face(&self, corners: &[MeshIndex]) -> Face {
        // Corner indices were range-checked at construction
        Face {
            v0: self.positions[corners[0].vertex],
            v1: self.positions[corners[1].vertex],
            v2: self.positions[corners[2].vertex],
            normal: self.normals[corners[0].normal],
        }
    }
}

/// Unit normal of a counter-clockwise triangle; zero for degenerate triangles
pub(crate) fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    (v1 - v0)
        .cross(&(v2 - v0))
        .try_normalize(f32::EPSILON)
        .unwrap_or_else(Vec3::zeros)
}

/// Factory for simple procedural collision meshes
pub struct CollisionMeshFactory;

impl CollisionMeshFactory {
    /// Horizontal square floor centred on the origin at `height`, facing up
    pub fn floor(half_extent: f32, height: f32) -> CollisionMesh {
        let h = half_extent;
        CollisionMesh {
            positions: vec![
                Vec3::new(-h, height, -h),
                Vec3::new(-h, height, h),
                Vec3::new(h, height, h),
                Vec3::new(h, height, -h),
            ],
            normals: vec![Vec3::new(0.0, 1.0, 0.0)],
            indices: quad_indices(0),
        }
    }

    /// Square ramp rising along +X from 0 at `x = -half_extent` to `rise`
    pub fn ramp(half_extent: f32, rise: f32) -> CollisionMesh {
        let h = half_extent;
        let normal = Vec3::new(-rise, 2.0 * h, 0.0).normalize();
        CollisionMesh {
            positions: vec![
                Vec3::new(-h, 0.0, -h),
                Vec3::new(-h, 0.0, h),
                Vec3::new(h, rise, h),
                Vec3::new(h, rise, -h),
            ],
            normals: vec![normal],
            indices: quad_indices(0),
        }
    }

    /// Vertical wall in the XY plane facing +Z, from `y = 0` to `height`
    pub fn wall(half_width: f32, height: f32) -> CollisionMesh {
        let w = half_width;
        CollisionMesh {
            positions: vec![
                Vec3::new(-w, 0.0, 0.0),
                Vec3::new(w, 0.0, 0.0),
                Vec3::new(w, height, 0.0),
                Vec3::new(-w, height, 0.0),
            ],
            normals: vec![Vec3::new(0.0, 0.0, 1.0)],
            indices: quad_indices(0),
        }
    }
}

fn quad_indices(normal: usize) -> Vec<MeshIndex> {
    [0, 1, 2, 0, 2, 3]
        .into_iter()
        .map(|vertex| MeshIndex::new(vertex, normal))
        .collect()
}
