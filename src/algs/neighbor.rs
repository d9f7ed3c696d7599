//! Directional neighbor resolution across refinement boundaries.
//!
//! A face handle may name a leaf directly, or a transition connector that
//! has to be walked to reach the real leaf on the other side:
//!
//! - **Descend** (the immediate neighbor is a connector at a finer level than
//!   the cell): follow quadrant 1 while the target is a connector.
//! - **Ascend** (the immediate neighbor is a connector at the same or a
//!   coarser level): follow `single` while the target is a connector.
//!
//! The two walks check different handles and are not mirror images of each
//! other. Both are kept exactly as the mesh builder expects them.

use crate::data::Node;
use crate::data::connector::TransitionConnector;
use crate::grid::AdaptiveGrid;
use crate::mesh_error::MeshError;
use crate::topology::direction::Direction;
use crate::topology::handle::{Neighbor, NodeId};

/// Upper bound on connector hops before a chain is declared malformed.
///
/// Real chains are bounded by the mesh depth and have a handful of links.
pub const MAX_CONNECTOR_HOPS: usize = 64;

/// Which connector handle a walk follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectorWalk {
    /// Coarse to fine through quadrant 1.
    Descend,
    /// Fine to coarse through `single`.
    Ascend,
}

impl ConnectorWalk {
    #[inline]
    fn next_hop(self, connector: &TransitionConnector) -> Neighbor {
        match self {
            ConnectorWalk::Descend => connector.quadrant(1),
            ConnectorWalk::Ascend => connector.single,
        }
    }
}

/// Outcome of resolving one face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The face leads to this leaf cell.
    Leaf(NodeId),
    /// The walk stopped on a connector with no onward handle.
    Dangling(NodeId),
}

impl Resolution {
    #[inline]
    pub fn leaf(self) -> Option<NodeId> {
        match self {
            Resolution::Leaf(id) => Some(id),
            Resolution::Dangling(_) => None,
        }
    }
}

/// Pick the walk for an immediate neighbor, given both refinement levels.
/// `None` means the neighbor is already the resolved target.
pub fn connector_walk(cell_level: u16, neighbor: &Node) -> Option<ConnectorWalk> {
    let header = neighbor.header();
    if header.level > cell_level {
        if header.is_connector() {
            return Some(ConnectorWalk::Descend);
        }
    } else if header.level <= cell_level && header.is_connector() {
        return Some(ConnectorWalk::Ascend);
    }
    None
}

/// Resolve the leaf across the `direction` face of `cell`.
///
/// # Errors
/// - `StaleHandle` / `NotALeafCell` if `cell` is not a live leaf, or a chain
///   link is stale.
/// - `AbsentNeighbor` if the face is a domain boundary.
/// - `ConnectorChainTooLong` if the walk exceeds [`MAX_CONNECTOR_HOPS`].
pub fn resolve_neighbor(
    grid: &AdaptiveGrid,
    cell: NodeId,
    direction: Direction,
) -> Result<Resolution, MeshError> {
    let leaf = grid.leaf(cell)?;
    let immediate = leaf
        .neighbor(direction)
        .ok_or(MeshError::AbsentNeighbor { cell, direction })?;
    let node = grid.node(immediate)?;
    match connector_walk(leaf.level(), node) {
        Some(walk) => walk_chain(grid, immediate, walk),
        None => Ok(match node {
            Node::Leaf(_) => Resolution::Leaf(immediate),
            Node::Connector(_) => Resolution::Dangling(immediate),
        }),
    }
}

/// Follow `walk` from `start` until a leaf or a missing handle is reached.
pub fn walk_chain(
    grid: &AdaptiveGrid,
    start: NodeId,
    walk: ConnectorWalk,
) -> Result<Resolution, MeshError> {
    let mut current = start;
    for _ in 0..=MAX_CONNECTOR_HOPS {
        match grid.node(current)? {
            Node::Leaf(_) => return Ok(Resolution::Leaf(current)),
            Node::Connector(connector) => match walk.next_hop(connector) {
                Some(next) => current = next,
                None => return Ok(Resolution::Dangling(current)),
            },
        }
    }
    Err(MeshError::ConnectorChainTooLong {
        start,
        limit: MAX_CONNECTOR_HOPS,
    })
}
