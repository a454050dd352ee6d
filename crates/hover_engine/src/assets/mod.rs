//! Asset loading for collision geometry

pub mod mesh_library;
pub mod obj_loader;

pub use mesh_library::{AssetError, MeshLibrary};
pub use obj_loader::ObjLoader;
