//! Entity-Component-System implementation
//!
//! Entities are generational handles, components live in one typed storage
//! per component type, and systems run in registration order.

pub mod world;
pub mod entity;
pub mod component;
pub mod storage;
pub mod system;
pub mod query;
pub mod components;
pub mod systems;

#[cfg(test)]
mod tests;

pub use world::World;
pub use entity::Entity;
pub use component::Component;
pub use system::{System, Systems};
pub use query::Query;
