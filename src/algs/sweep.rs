//! Fork-join flux sweep over the active leaves of a grid.
//!
//! The time-stepping loop owns the cadence: reset, sweep, then query the
//! maximum flux. This module provides the sweep itself so callers do not
//! have to hand-roll the parallel loop.

use crate::algs::flux_exchange::{FluxExchange, exchange_flux};
use crate::grid::AdaptiveGrid;
use crate::mesh_error::MeshError;
use crate::topology::direction::Direction;
use crate::topology::handle::NodeId;
use std::ops::AddAssign;

/// Which faces of each active leaf get an [`exchange_flux`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FaceSweep {
    /// All six faces of every active leaf. Each conforming face pair is
    /// visited twice.
    #[default]
    AllFaces,
    /// East, north and front only. Each conforming face pair is visited once.
    PositiveFaces,
}

impl FaceSweep {
    pub fn directions(self) -> &'static [Direction] {
        match self {
            FaceSweep::AllFaces => &Direction::ALL,
            FaceSweep::PositiveFaces => &Direction::POSITIVE,
        }
    }
}

/// Sweep configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SweepConfig {
    pub faces: FaceSweep,
    /// Run the sweep on the rayon pool when the `rayon` feature is enabled.
    pub parallel: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            faces: FaceSweep::AllFaces,
            parallel: true,
        }
    }
}

/// Face counts from one sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Faces whose neighbor resolved to a leaf.
    pub applied: usize,
    /// Faces whose connector chain ended without a leaf.
    pub unresolved: usize,
    /// Faces skipped because they lie on the domain boundary.
    pub boundary: usize,
}

impl AddAssign for SweepReport {
    fn add_assign(&mut self, other: Self) {
        self.applied += other.applied;
        self.unresolved += other.unresolved;
        self.boundary += other.boundary;
    }
}

fn sweep_cell(
    grid: &AdaptiveGrid,
    id: NodeId,
    directions: &[Direction],
) -> Result<SweepReport, MeshError> {
    let cell = grid.leaf(id)?;
    let mut report = SweepReport::default();
    for &direction in directions {
        if cell.neighbor(direction).is_none() {
            report.boundary += 1;
            continue;
        }
        match exchange_flux(grid, id, direction)? {
            FluxExchange::Applied { .. } => report.applied += 1,
            FluxExchange::Unresolved => report.unresolved += 1,
        }
    }
    Ok(report)
}

/// Call [`exchange_flux`] for the configured faces of every active leaf.
///
/// # Errors
/// The first error from any exchange; accumulator updates already made by
/// other workers are kept.
pub fn exchange_all_fluxes(
    grid: &AdaptiveGrid,
    config: &SweepConfig,
) -> Result<SweepReport, MeshError> {
    let ids = grid.active_ids();
    let directions = config.faces.directions();

    #[cfg(feature = "rayon")]
    if config.parallel {
        use rayon::prelude::*;
        let report = ids
            .par_iter()
            .map(|&id| sweep_cell(grid, id, directions))
            .try_reduce(SweepReport::default, |mut a, b| {
                a += b;
                Ok(a)
            })?;
        log::debug!("parallel flux sweep over {} leaves: {report:?}", ids.len());
        return Ok(report);
    }

    let mut report = SweepReport::default();
    for &id in &ids {
        report += sweep_cell(grid, id, directions)?;
    }
    log::debug!("serial flux sweep over {} leaves: {report:?}", ids.len());
    Ok(report)
}

/// Zero the accumulators of every active leaf.
pub fn reset_all_fluxes(grid: &mut AdaptiveGrid) {
    grid.for_each_leaf_mut(|_, cell| {
        if cell.active {
            cell.reset_fluxes();
        }
    });
}
