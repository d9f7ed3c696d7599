//! MeshError: unified error type for the adaptive mesh core.
//!
//! Every fallible public API returns `Result<_, MeshError>`. Programming
//! defects that cannot be recovered from (an unknown direction code handed to
//! [`exchange_flux_by_code`](crate::algs::flux_exchange::exchange_flux_by_code))
//! panic instead.

use crate::topology::direction::Direction;
use crate::topology::handle::NodeId;
use thiserror::Error;

/// Unified error type for grid, connector and flux operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// The handle's slot is empty or has been reused by a newer record.
    #[error("stale or unknown handle {0}")]
    StaleHandle(NodeId),
    /// The handle names a transition connector where a leaf cell was required.
    #[error("handle {0} is a transition connector, expected a leaf cell")]
    NotALeafCell(NodeId),
    /// The handle names a leaf cell where a transition connector was required.
    #[error("handle {0} is a leaf cell, expected a transition connector")]
    NotAConnector(NodeId),
    /// Flux exchange was requested on a leaf that is excluded from the solve.
    #[error("leaf cell {0} is not active")]
    InactiveCell(NodeId),
    /// The requested face is a domain boundary.
    #[error("leaf cell {cell} has no {direction} neighbor")]
    AbsentNeighbor { cell: NodeId, direction: Direction },
    /// A character that is not one of `n s e w f b`.
    #[error("invalid cell direction code {0:?}")]
    InvalidDirectionCode(char),
    /// Connector traversal did not reach a leaf within the hop limit.
    #[error("connector chain from {start} exceeded {limit} hops")]
    ConnectorChainTooLong { start: NodeId, limit: usize },
    /// Two directly linked records differ by more than one refinement level.
    #[error("level jump across {direction} face of {from} (level {from_level}) to {to} (level {to_level})")]
    LevelJump {
        from: NodeId,
        to: NodeId,
        direction: Direction,
        from_level: u16,
        to_level: u16,
    },
    /// The global order does not list exactly the live leaf cells.
    #[error("global order mismatch: {0}")]
    OrderMismatch(String),
    /// A leaf appears more than once in the global order.
    #[error("leaf cell {0} appears more than once in the global order")]
    DuplicateInOrder(NodeId),
    /// Generator input could not describe a valid grid.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}
