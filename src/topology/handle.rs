//! `NodeId`: a generation-checked handle into the grid arena.
//!
//! Leaf cells and transition connectors live in one arena owned by
//! [`AdaptiveGrid`](crate::grid::AdaptiveGrid). Neighbor links, connector
//! targets and the global order all refer to records through `NodeId`
//! values. A handle stays valid until its record is destroyed. After that,
//! the slot's generation moves on and the old handle is rejected instead of
//! silently aliasing whatever reuses the slot.
//!
//! The absent sentinel for boundary faces is `None` of [`Neighbor`].

use std::fmt;
use std::num::NonZeroU32;

/// Stable handle to a leaf cell or transition connector.
///
/// Generations start at 1, so `Option<NodeId>` is the same size as `NodeId`.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId {
    index: u32,
    generation: NonZeroU32,
}

/// A neighbor or connector slot: absent (domain boundary) or a handle.
pub type Neighbor = Option<NodeId>;

impl NodeId {
    /// Build a handle from its slot index and generation.
    ///
    /// Returns `None` when `generation == 0`; zero is never issued by the arena.
    #[inline]
    pub fn new(index: u32, generation: u32) -> Option<Self> {
        NonZeroU32::new(generation).map(|generation| Self { index, generation })
    }

    #[inline]
    pub(crate) const fn from_parts(index: u32, generation: NonZeroU32) -> Self {
        Self { index, generation }
    }

    /// Slot index inside the arena.
    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Generation of the slot when this handle was issued.
    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation.get()
    }

    #[inline]
    pub(crate) const fn slot(self) -> usize {
        self.index as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeId")
            .field(&self.index)
            .field(&self.generation.get())
            .finish()
    }
}

/// Prints `index@generation`.
impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.index, self.generation.get())
    }
}
