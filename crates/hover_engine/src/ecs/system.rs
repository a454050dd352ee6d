//! System trait and ordered system list

use super::World;

/// System trait for processing entities and components
pub trait System {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Run the system for one tick of `delta_time` seconds
    fn run(&mut self, world: &mut World, delta_time: f32);
}

/// Systems executed in registration order, each to completion
#[derive(Default)]
pub struct Systems {
    systems: Vec<Box<dyn System>>,
}

impl Systems {
    /// Create an empty system list
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a system after those already present
    pub fn add<S: System + 'static>(&mut self, system: S) {
        log::debug!("Registered system '{}'", system.name());
        self.systems.push(Box::new(system));
    }

    /// Number of registered systems
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Whether no system is registered
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Run every system once
    pub fn update_all(&mut self, world: &mut World, delta_time: f32) {
        for system in &mut self.systems {
            system.run(world, delta_time);
        }
    }
}
