//! Per-face flux accumulators and the lock that serializes their updates.
//!
//! Values are stored as `f64` bit patterns in `AtomicU64`, so an unlocked
//! reader (the max-flux heuristic) always sees some complete value. Writers
//! must hold the owning cell's lock through a [`FluxGuard`], which makes the
//! read-compare-add of [`FluxGuard::merge_if_greater`] atomic with respect to
//! other writers.

use crate::topology::direction::Direction;
use parking_lot::{Mutex, MutexGuard};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
struct AtomicF64(AtomicU64);

impl AtomicF64 {
    #[inline]
    fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    #[inline]
    fn store(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// Six face accumulators guarded by a per-cell lock.
#[derive(Debug, Default)]
pub struct FluxAccumulators {
    lock: Mutex<()>,
    faces: [AtomicF64; 6],
}

impl FluxAccumulators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the cell lock. Released when the guard is dropped.
    #[inline]
    pub fn lock(&self) -> FluxGuard<'_> {
        FluxGuard {
            _held: self.lock.lock(),
            faces: &self.faces,
        }
    }

    /// Unlocked read of one accumulator; may race with a concurrent writer.
    #[inline]
    pub fn get(&self, direction: Direction) -> f64 {
        self.faces[direction.index()].load()
    }

    /// Unlocked snapshot of all six accumulators in [`Direction::ALL`] order.
    pub fn snapshot(&self) -> [f64; 6] {
        std::array::from_fn(|i| self.faces[i].load())
    }

    /// Zero every accumulator. Exclusive access makes the lock unnecessary.
    pub fn reset(&mut self) {
        for face in &self.faces {
            face.store(0.0);
        }
    }

    /// Overwrite one accumulator.
    pub fn set(&mut self, direction: Direction, value: f64) {
        self.faces[direction.index()].store(value);
    }
}

/// Scoped write access to a cell's accumulators.
#[must_use = "dropping the guard releases the cell lock"]
pub struct FluxGuard<'a> {
    _held: MutexGuard<'a, ()>,
    faces: &'a [AtomicF64; 6],
}

impl FluxGuard<'_> {
    #[inline]
    pub fn get(&self, direction: Direction) -> f64 {
        self.faces[direction.index()].load()
    }

    /// Add `local_flux` to the accumulator only if it exceeds the current value.
    ///
    /// Returns `true` when the accumulator changed. The accumulator never
    /// decreases through this call.
    pub fn merge_if_greater(&mut self, direction: Direction, local_flux: f64) -> bool {
        let face = &self.faces[direction.index()];
        let current = face.load();
        if local_flux > current {
            face.store(current + local_flux);
            true
        } else {
            false
        }
    }

    pub fn set(&mut self, direction: Direction, value: f64) {
        self.faces[direction.index()].store(value);
    }

    pub fn reset(&mut self) {
        for face in self.faces {
            face.store(0.0);
        }
    }
}
