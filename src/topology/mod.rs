//! Top-level module for mesh topology abstractions.
//!
//! This module provides the vocabulary shared by every record in the grid:
//! - Face directions and axes
//! - Generation-checked handles and the absent sentinel
//! - The common kind/level header
//! - The arena that stores records, and validation of the resulting graph

pub mod arena;
pub mod direction;
pub mod handle;
pub mod header;
pub mod validation;

pub use direction::{Axis, Direction};
pub use handle::{Neighbor, NodeId};
pub use header::{CellHeader, CellKind};
pub use validation::DebugInvariants;
