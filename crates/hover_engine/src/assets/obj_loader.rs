//! OBJ file loader for collision meshes
//!
//! Only geometry is read: `v` positions, `vn` normals and `f` faces. Texture
//! coordinates, groups, smoothing and material statements are skipped.
//! Polygons are fan-triangulated around their first corner.

use crate::foundation::math::Vec3;
use crate::physics::mesh::{face_normal, CollisionMesh, MeshError, MeshIndex};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Wavefront OBJ reader producing [`CollisionMesh`]es
pub struct ObjLoader;

impl ObjLoader {
    /// Load an OBJ file and return a collision mesh
    pub fn load_collision_mesh<P: AsRef<Path>>(path: P) -> Result<CollisionMesh, MeshError> {
        let file = File::open(path)?;
        Self::parse_reader(BufReader::new(file))
    }

    /// Parse OBJ source text
    pub fn parse_str(source: &str) -> Result<CollisionMesh, MeshError> {
        Self::parse_reader(source.as_bytes())
    }

    fn parse_reader<R: BufRead>(reader: R) -> Result<CollisionMesh, MeshError> {
        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut indices = Vec::new();

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = number + 1;
            let parse_error = |message: String| MeshError::Parse {
                line: line_number,
                message,
            };

            let mut parts = line.split_whitespace();
            let Some(keyword) = parts.next() else {
                continue;
            };

            match keyword {
                "v" => positions.push(parse_vec3(&mut parts).map_err(parse_error)?),
                "vn" => normals.push(parse_vec3(&mut parts).map_err(parse_error)?),
                "f" => {
                    let corners = parts
                        .map(|corner| parse_corner(corner, positions.len(), normals.len()))
                        .collect::<Result<Vec<_>, _>>()
                        .map_err(parse_error)?;

                    if corners.len() < 3 {
                        return Err(parse_error(format!(
                            "face needs at least 3 corners, got {}",
                            corners.len()
                        )));
                    }

                    // Corners without a normal share one derived from the winding
                    let fallback = if corners.iter().any(|(_, normal)| normal.is_none()) {
                        normals.push(face_normal(
                            positions[corners[0].0],
                            positions[corners[1].0],
                            positions[corners[2].0],
                        ));
                        normals.len() - 1
                    } else {
                        0
                    };
                    let corners: Vec<MeshIndex> = corners
                        .into_iter()
                        .map(|(vertex, normal)| MeshIndex::new(vertex, normal.unwrap_or(fallback)))
                        .collect();

                    for i in 1..corners.len() - 1 {
                        indices.extend_from_slice(&[corners[0], corners[i], corners[i + 1]]);
                    }
                }
                _ => {}
            }
        }

        if indices.is_empty() {
            return Err(MeshError::Empty);
        }

        log::debug!(
            "Parsed OBJ: {} positions, {} normals, {} faces",
            positions.len(),
            normals.len(),
            indices.len() / 3
        );

        CollisionMesh::new(positions, normals, indices)
    }
}

fn parse_vec3<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Result<Vec3, String> {
    let mut component = |axis: &str| -> Result<f32, String> {
        let text = parts.next().ok_or_else(|| format!("missing {} component", axis))?;
        text.parse()
            .map_err(|_| format!("invalid {} component '{}'", axis, text))
    };
    Ok(Vec3::new(component("x")?, component("y")?, component("z")?))
}

/// Parse a `v`, `v/vt`, `v//vn` or `v/vt/vn` corner into zero-based indices
fn parse_corner(corner: &str, position_count: usize, normal_count: usize) -> Result<(usize, Option<usize>), String> {
    let mut fields = corner.split('/');
    let vertex = fields
        .next()
        .ok_or_else(|| format!("empty face corner '{}'", corner))
        .and_then(|field| resolve_index(field, position_count, "vertex"))?;

    let _tex_coord = fields.next();
    let normal = match fields.next() {
        Some(field) if !field.is_empty() => Some(resolve_index(field, normal_count, "normal")?),
        _ => None,
    };

    Ok((vertex, normal))
}

/// OBJ indices are 1-based; negative values count back from the end
fn resolve_index(field: &str, count: usize, attribute: &str) -> Result<usize, String> {
    let raw: i64 = field
        .parse()
        .map_err(|_| format!("invalid {} index '{}'", attribute, field))?;

    let resolved = match raw {
        0 => None,
        n if n > 0 => usize::try_from(n - 1).ok(),
        n => usize::try_from(n.unsigned_abs())
            .ok()
            .and_then(|back| count.checked_sub(back)),
    };

    resolved
        .filter(|&index| index < count)
        .ok_or_else(|| format!("{} index {} out of range ({} defined)", attribute, raw, count))
}
