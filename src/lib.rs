#![cfg_attr(docsrs, feature(doc_cfg))]
//! # amr-cells
//!
//! amr-cells is the adaptive non-conforming Cartesian mesh core of a cardiac
//! electrophysiology simulator. It stores the leaf control volumes that carry
//! the transmembrane potential, the hanging-node transition connectors that
//! bridge refinement boundaries, and the concurrent flux-exchange protocol
//! that produces the two-point diffusive flux estimate used for step sizing
//! and assembly.
//!
//! ## Features
//! - Arena-owned mesh graph addressed by generation-checked [`NodeId`](topology::NodeId) handles
//! - Explicit global traversal order with constant-time previous/next lookups
//! - Neighbor resolution that walks connector chains in both refinement directions
//! - Per-cell locking with a merge-if-greater accumulation rule; at most one
//!   lock is ever held by a single exchange
//! - Fork-join sweep over active leaves on the rayon pool (`rayon` feature, on by default)
//!
//! ## Out of scope
//! Refinement policy, cell-model ODEs, linear solves, file formats and CLI
//! parsing live elsewhere and drive this crate through [`grid::AdaptiveGrid`].
//!
//! ## Logging
//! Diagnostics go through the [`log`] facade. The crate never installs a logger.

pub mod algs;
pub mod data;
pub mod grid;
pub mod mesh_error;
pub mod mesh_generation;
pub mod topology;

pub use topology::validation::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::flux_exchange::{FluxExchange, exchange_flux, exchange_flux_by_code};
    pub use crate::algs::max_flux::{grid_max_abs_flux, max_abs_flux};
    pub use crate::algs::neighbor::{Resolution, resolve_neighbor};
    pub use crate::algs::sweep::{
        FaceSweep, SweepConfig, SweepReport, exchange_all_fluxes, reset_all_fluxes,
    };
    pub use crate::data::Node;
    pub use crate::data::connector::TransitionConnector;
    pub use crate::data::entries::MatrixEntry;
    pub use crate::data::leaf_cell::{CellConfig, LeafCell};
    pub use crate::grid::AdaptiveGrid;
    pub use crate::mesh_error::MeshError;
    pub use crate::mesh_generation::{UniformGridOptions, uniform_grid};
    pub use crate::topology::validation::{
        DebugInvariants, GridValidationOptions, LevelJumpHandling, validate_grid,
    };
    pub use crate::topology::{Axis, CellHeader, CellKind, Direction, Neighbor, NodeId};
}
