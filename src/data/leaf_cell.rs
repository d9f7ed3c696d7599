//! Leaf control volume: the finite-volume cell that carries the simulated field.
//!
//! A `LeafCell` owns its geometry, the scalar value `v`, six face flux
//! accumulators behind a per-cell lock, six neighbor handles, and data owned
//! on behalf of other subsystems (matrix-row entries written during assembly,
//! plus opaque solver- and mesh-specific extensions). Everything it owns is
//! released when the record is dropped by the grid.
//!
//! # Invariants
//! - Interior faces hold a present neighbor handle. Boundary faces hold `None`.
//! - Accumulators are mutated only under the cell lock ([`LeafCell::lock`]),
//!   or through `&mut self`.

use crate::data::entries::MatrixEntry;
use crate::data::flux::{FluxAccumulators, FluxGuard};
use crate::topology::direction::Direction;
use crate::topology::header::{CellHeader, CellKind};
use crate::topology::handle::Neighbor;
use std::any::Any;
use std::fmt;

/// Opaque per-cell payload owned on behalf of another subsystem.
pub type ExtensionData = Box<dyn Any + Send + Sync>;

/// Everything the refinement algorithm assigns to a cell in one call.
///
/// Neighbors are given in [`Direction::ALL`] order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellConfig {
    pub discretization: [f64; 3],
    pub bunch_number: u64,
    pub neighbors: [Neighbor; 6],
    pub grid_position: u32,
    pub hilbert_shape_number: u8,
    pub center: [f64; 3],
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            discretization: [1.0; 3],
            bunch_number: 0,
            neighbors: [None; 6],
            grid_position: 0,
            hilbert_shape_number: 0,
            center: [0.0; 3],
        }
    }
}

pub struct LeafCell {
    header: CellHeader,

    pub center: [f64; 3],
    /// Cell extents `(dx, dy, dz)`.
    pub discretization: [f64; 3],
    /// Transmembrane potential.
    pub v: f64,
    /// Right-hand side slot filled by the assembly subsystem.
    pub b: f64,

    fluxes: FluxAccumulators,
    neighbors: [Neighbor; 6],

    pub active: bool,
    /// `false` pins the cell: refinement and derefinement skip it.
    pub can_change: bool,
    /// Transient traversal marker.
    pub visited: bool,

    pub grid_position: u32,
    pub sv_position: u32,
    pub hilbert_shape_number: u8,
    pub bunch_number: u64,

    entries: Vec<MatrixEntry>,
    solver_data: Option<ExtensionData>,
    mesh_data: Option<ExtensionData>,
}

impl Default for LeafCell {
    fn default() -> Self {
        Self::new()
    }
}

impl LeafCell {
    /// A root-level, active cell with unit extents and no neighbors.
    pub fn new() -> Self {
        Self {
            header: CellHeader::new(CellKind::LeafCell),
            center: [0.0; 3],
            discretization: [1.0; 3],
            v: 0.0,
            b: 0.0,
            fluxes: FluxAccumulators::new(),
            neighbors: [None; 6],
            active: true,
            can_change: true,
            visited: false,
            grid_position: 0,
            sv_position: 0,
            hilbert_shape_number: 0,
            bunch_number: 0,
            entries: Vec::new(),
            solver_data: None,
            mesh_data: None,
        }
    }

    /// Bulk assignment used by refinement. No validation is performed.
    pub fn configure(&mut self, config: CellConfig) {
        self.discretization = config.discretization;
        self.bunch_number = config.bunch_number;
        self.neighbors = config.neighbors;
        self.grid_position = config.grid_position;
        self.hilbert_shape_number = config.hilbert_shape_number;
        self.center = config.center;
    }

    #[inline]
    pub fn header(&self) -> CellHeader {
        self.header
    }

    #[inline]
    pub fn level(&self) -> u16 {
        self.header.level
    }

    pub fn set_level(&mut self, level: u16) {
        self.header.level = level;
    }

    /// Half of the cell extent on each axis.
    #[inline]
    pub fn half_extents(&self) -> [f64; 3] {
        self.discretization.map(|d| d / 2.0)
    }

    #[inline]
    pub fn neighbor(&self, direction: Direction) -> Neighbor {
        self.neighbors[direction.index()]
    }

    /// Neighbor handles in [`Direction::ALL`] order.
    #[inline]
    pub fn neighbors(&self) -> &[Neighbor; 6] {
        &self.neighbors
    }

    pub fn set_neighbor(&mut self, direction: Direction, neighbor: Neighbor) {
        self.neighbors[direction.index()] = neighbor;
    }

    /// Acquire this cell's lock for accumulator updates.
    #[inline]
    pub fn lock(&self) -> FluxGuard<'_> {
        self.fluxes.lock()
    }

    /// Unlocked read of one face accumulator.
    #[inline]
    pub fn flux(&self, direction: Direction) -> f64 {
        self.fluxes.get(direction)
    }

    #[inline]
    pub fn fluxes(&self) -> &FluxAccumulators {
        &self.fluxes
    }

    pub fn reset_fluxes(&mut self) {
        self.fluxes.reset();
    }

    pub fn entries(&self) -> &[MatrixEntry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut Vec<MatrixEntry> {
        &mut self.entries
    }

    pub fn solver_data(&self) -> Option<&ExtensionData> {
        self.solver_data.as_ref()
    }

    /// Install solver-specific data, returning whatever was there before.
    pub fn set_solver_data(&mut self, data: ExtensionData) -> Option<ExtensionData> {
        self.solver_data.replace(data)
    }

    pub fn take_solver_data(&mut self) -> Option<ExtensionData> {
        self.solver_data.take()
    }

    pub fn mesh_data(&self) -> Option<&ExtensionData> {
        self.mesh_data.as_ref()
    }

    pub fn set_mesh_data(&mut self, data: ExtensionData) -> Option<ExtensionData> {
        self.mesh_data.replace(data)
    }

    pub fn take_mesh_data(&mut self) -> Option<ExtensionData> {
        self.mesh_data.take()
    }
}

impl fmt::Debug for LeafCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeafCell")
            .field("level", &self.header.level)
            .field("center", &self.center)
            .field("discretization", &self.discretization)
            .field("v", &self.v)
            .field("fluxes", &self.fluxes.snapshot())
            .field("neighbors", &self.neighbors)
            .field("active", &self.active)
            .field("grid_position", &self.grid_position)
            .field("sv_position", &self.sv_position)
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}
