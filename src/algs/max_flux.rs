//! Maximum-flux query used to bound the next adaptive time step.
//!
//! Reads are unlocked. A value racing with a concurrent exchange may be
//! stale, which is acceptable for a step-size heuristic.

use crate::data::leaf_cell::LeafCell;
use crate::grid::AdaptiveGrid;

/// Largest absolute value among the six face accumulators of `cell`.
pub fn max_abs_flux(cell: &LeafCell) -> f64 {
    cell.fluxes()
        .snapshot()
        .into_iter()
        .fold(0.0_f64, |max, flux| max.max(flux.abs()))
}

/// [`max_abs_flux`] reduced over every active leaf; 0 for an empty grid.
pub fn grid_max_abs_flux(grid: &AdaptiveGrid) -> f64 {
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        let ids = grid.active_ids();
        ids.par_iter()
            .filter_map(|&id| grid.leaf(id).ok())
            .map(max_abs_flux)
            .reduce(|| 0.0, f64::max)
    }
    #[cfg(not(feature = "rayon"))]
    {
        grid.active_leaves()
            .map(|(_, cell)| max_abs_flux(cell))
            .fold(0.0, f64::max)
    }
}
