//! Named collision mesh storage
//!
//! Meshes are loaded once and handed out as shared `Arc`s. Unloading a name
//! only drops the library's reference; colliders that still hold the mesh
//! keep it alive.

use super::obj_loader::ObjLoader;
use crate::physics::{CollisionMesh, MeshError};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Mesh could not be loaded
    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),

    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),
}

/// Collision meshes by name
#[derive(Debug, Default)]
pub struct MeshLibrary {
    meshes: HashMap<String, Arc<CollisionMesh>>,
}

impl MeshLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mesh, replacing any mesh already stored under `name`
    pub fn insert(&mut self, name: impl Into<String>, mesh: CollisionMesh) -> Arc<CollisionMesh> {
        let mesh = Arc::new(mesh);
        self.meshes.insert(name.into(), Arc::clone(&mesh));
        mesh
    }

    /// Load an OBJ file and register it under `name`
    pub fn load_obj<P: AsRef<Path>>(&mut self, name: &str, path: P) -> Result<Arc<CollisionMesh>, AssetError> {
        let path = path.as_ref();
        let mesh = ObjLoader::load_collision_mesh(path)?;
        log::info!(
            "Loaded collision mesh '{}' from {} ({} faces)",
            name,
            path.display(),
            mesh.face_count()
        );
        Ok(self.insert(name, mesh))
    }

    /// Look up a mesh
    pub fn get(&self, name: &str) -> Option<Arc<CollisionMesh>> {
        self.meshes.get(name).cloned()
    }

    /// Look up a mesh that must exist
    pub fn require(&self, name: &str) -> Result<Arc<CollisionMesh>, AssetError> {
        self.get(name)
            .ok_or_else(|| AssetError::NotFound(name.to_string()))
    }

    /// Drop the library's reference to a mesh
    pub fn unload(&mut self, name: &str) -> bool {
        let removed = self.meshes.remove(name).is_some();
        if removed {
            log::debug!("Unloaded collision mesh '{}'", name);
        }
        removed
    }

    /// Number of stored meshes
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Whether the library is empty
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}
