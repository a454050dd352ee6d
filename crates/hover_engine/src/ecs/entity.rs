//! Entity implementation

use slotmap::Key;

slotmap::new_key_type! {
    /// Entity identifier
    ///
    /// Generational handle: a destroyed entity's handle never aliases a
    /// later entity that reuses its slot.
    pub struct Entity;
}

impl Entity {
    /// Get the entity ID (slot index and generation packed together)
    pub fn id(&self) -> u64 {
        self.data().as_ffi()
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({:#x})", self.id())
    }
}
