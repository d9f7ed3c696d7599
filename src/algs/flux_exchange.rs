//! Two-point flux exchange between a leaf cell and its resolved neighbor.
//!
//! For a face of `cell` the real leaf neighbor `N` is resolved first (see
//! [`resolve_neighbor`]). On every axis the contact half-distance is the
//! smaller of the two half-extents, and the local flux is
//! `(cell.v - N.v) * 2 * half`. The axis normal to the face is then merged
//! into `cell`'s accumulator for `direction` and into `N`'s accumulator
//! for the opposite face. A merge adds the local flux only when it exceeds
//! the accumulator's current value.
//!
//! Each merge runs under that cell's own lock, and the first lock is
//! released before the second is taken, so concurrent callers can never
//! deadlock. On conforming faces the final accumulator values are
//! independent of thread interleaving if every unordered face pair is
//! exchanged exactly once per step. The caller's stepping loop is
//! responsible for that.
//!
//! A hanging face has no such guarantee. The four fine cells behind a
//! connector all ascend to the same coarse accumulator, so four distinct
//! pairs merge into one value and the result depends on their order.

use crate::algs::neighbor::{Resolution, resolve_neighbor};
use crate::data::leaf_cell::LeafCell;
use crate::grid::AdaptiveGrid;
use crate::mesh_error::MeshError;
use crate::topology::direction::Direction;
use crate::topology::handle::NodeId;

/// Result of one [`exchange_flux`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FluxExchange {
    /// A leaf neighbor was found and both merges were attempted.
    Applied {
        neighbor: NodeId,
        /// Axis-matching local flux offered to both accumulators.
        local_flux: f64,
        cell_updated: bool,
        neighbor_updated: bool,
    },
    /// Resolution ended on a connector; nothing was touched.
    Unresolved,
}

/// Per-axis two-point flux `(cell.v - neighbor.v) * 2 * min(half extents)`.
///
/// Conductivity and material factors are applied by the caller.
pub fn two_point_flux(cell: &LeafCell, neighbor: &LeafCell) -> [f64; 3] {
    let own = cell.half_extents();
    let other = neighbor.half_extents();
    let dv = cell.v - neighbor.v;
    std::array::from_fn(|axis| dv * (2.0 * own[axis].min(other[axis])))
}

/// Resolve the `direction` neighbor of `cell` and merge the local flux into
/// both endpoints.
///
/// # Errors
/// - `StaleHandle` / `NotALeafCell` if `cell` is not a live leaf.
/// - `InactiveCell` if `cell` is excluded from the solve.
/// - `AbsentNeighbor` if the face is a domain boundary.
/// - Any chain error from [`resolve_neighbor`].
pub fn exchange_flux(
    grid: &AdaptiveGrid,
    cell: NodeId,
    direction: Direction,
) -> Result<FluxExchange, MeshError> {
    let this = grid.leaf(cell)?;
    if !this.active {
        return Err(MeshError::InactiveCell(cell));
    }

    let neighbor = match resolve_neighbor(grid, cell, direction)? {
        Resolution::Leaf(id) => id,
        Resolution::Dangling(_) => return Ok(FluxExchange::Unresolved),
    };
    let other = grid.leaf(neighbor)?;

    let local_flux = two_point_flux(this, other)[direction.axis().index()];

    let cell_updated = this.lock().merge_if_greater(direction, local_flux);
    let neighbor_updated = other
        .lock()
        .merge_if_greater(direction.opposite(), local_flux);

    Ok(FluxExchange::Applied {
        neighbor,
        local_flux,
        cell_updated,
        neighbor_updated,
    })
}

/// [`exchange_flux`] addressed by a one-letter direction code.
///
/// # Panics
/// An unrecognized code is a configuration defect and aborts the run.
pub fn exchange_flux_by_code(
    grid: &AdaptiveGrid,
    cell: NodeId,
    code: char,
) -> Result<FluxExchange, MeshError> {
    let direction = match Direction::from_code(code) {
        Ok(direction) => direction,
        Err(e) => {
            log::error!("{e}; exiting");
            panic!("Invalid cell direction {code}! Exiting...");
        }
    };
    exchange_flux(grid, cell, direction)
}
