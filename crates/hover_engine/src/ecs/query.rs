//! Component-set queries
//!
//! A [`Query`] is a tuple of component types. `world.entities_with::<(A, B)>()`
//! returns every live entity owning all of them.

use super::{Component, Entity, World};

/// A set of component types an entity can be tested against
pub trait Query {
    /// Whether `entity` owns every component in the set
    fn matches(world: &World, entity: Entity) -> bool;
}

macro_rules! impl_query {
    ($($name:ident),+) => {
        impl<$($name: Component),+> Query for ($($name,)+) {
            fn matches(world: &World, entity: Entity) -> bool {
                $(world.has_component::<$name>(entity))&&+
            }
        }
    };
}

impl_query!(A);
impl_query!(A, B);
impl_query!(A, B, C);
