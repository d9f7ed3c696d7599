//! Re-export public algorithms.

pub mod flux_exchange;
pub mod max_flux;
pub mod neighbor;
pub mod sweep;

pub use flux_exchange::{FluxExchange, exchange_flux, exchange_flux_by_code, two_point_flux};
pub use max_flux::{grid_max_abs_flux, max_abs_flux};
pub use neighbor::{Resolution, resolve_neighbor};
pub use sweep::{FaceSweep, SweepConfig, SweepReport, exchange_all_fluxes, reset_all_fluxes};
