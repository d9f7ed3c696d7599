//! Generational arena backing the grid.
//!
//! Slots are recycled through a free list. Each slot carries a generation
//! that is bumped when its record is removed, so handles to destroyed records
//! are detected on lookup.

use crate::topology::handle::NodeId;
use std::num::NonZeroU32;

#[derive(Debug, Clone)]
enum Entry<T> {
    Occupied(T),
    Vacant { next_free: Option<u32> },
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: NonZeroU32,
    entry: Entry<T>,
}

/// Arena of records addressed by [`NodeId`].
#[derive(Debug, Clone)]
pub struct CellArena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<u32>,
    len: usize,
}

impl<T> Default for CellArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CellArena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    /// Number of live records.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Store `value` and return its handle. Reuses a freed slot when one exists.
    pub fn insert(&mut self, value: T) -> NodeId {
        self.len += 1;
        if let Some(free) = self.free_head {
            let slot = &mut self.slots[free as usize];
            if let Entry::Vacant { next_free } = slot.entry {
                self.free_head = next_free;
                slot.entry = Entry::Occupied(value);
                return NodeId::from_parts(free, slot.generation);
            }
            unreachable!("free list points at occupied slot {free}");
        }
        let index = u32::try_from(self.slots.len()).unwrap_or_else(|_| {
            panic!("arena exceeded {} slots", u32::MAX);
        });
        self.slots.push(Slot {
            generation: NonZeroU32::MIN,
            entry: Entry::Occupied(value),
        });
        NodeId::from_parts(index, NonZeroU32::MIN)
    }

    /// Borrow the record for `id`, or `None` if the handle is stale.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        match self.slots.get(id.slot()) {
            Some(Slot {
                generation,
                entry: Entry::Occupied(value),
            }) if generation.get() == id.generation() => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        match self.slots.get_mut(id.slot()) {
            Some(Slot {
                generation,
                entry: Entry::Occupied(value),
            }) if generation.get() == id.generation() => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Remove and return the record for `id`. The slot's generation advances,
    /// invalidating every outstanding copy of `id`.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        let slot = self.slots.get_mut(id.slot())?;
        if slot.generation.get() != id.generation() || matches!(slot.entry, Entry::Vacant { .. }) {
            return None;
        }
        let previous = std::mem::replace(
            &mut slot.entry,
            Entry::Vacant {
                next_free: self.free_head,
            },
        );
        slot.generation = slot.generation.checked_add(1).unwrap_or(NonZeroU32::MIN);
        self.free_head = Some(id.index());
        self.len -= 1;
        match previous {
            Entry::Occupied(value) => Some(value),
            Entry::Vacant { .. } => None,
        }
    }

    /// Iterate over live records in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| match &slot.entry {
            Entry::Occupied(value) => Some((NodeId::from_parts(i as u32, slot.generation), value)),
            Entry::Vacant { .. } => None,
        })
    }
}
