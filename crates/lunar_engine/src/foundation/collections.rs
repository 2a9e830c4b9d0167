//! Handle-keyed storage
//!
//! Scene objects and hierarchy nodes live in slot maps and are referred to by
//! typed keys, so a stale handle simply fails to resolve instead of aliasing a
//! newer entry.

pub use slotmap::{SecondaryMap, SlotMap};

slotmap::new_key_type! {
    /// Handle to a render object owned by the scene manager
    pub struct ObjectId;

    /// Handle to a node of the transform hierarchy
    pub struct NodeId;
}

/// Storage for render objects
pub type ObjectStore<T> = SlotMap<ObjectId, T>;

/// Storage for hierarchy nodes
pub type NodeArena<T> = SlotMap<NodeId, T>;
