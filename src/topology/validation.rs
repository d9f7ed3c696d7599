//! Grid validation helpers.
//!
//! The refinement subsystem is trusted to keep the mesh graph consistent.
//! These checks let tests and debug builds confirm it:
//!
//! - every handle stored in a neighbor or connector slot is live;
//! - the global order lists each live leaf exactly once;
//! - directly linked records differ by at most one refinement level.

use crate::data::Node;
use crate::grid::AdaptiveGrid;
use crate::mesh_error::MeshError;
use crate::topology::direction::Direction;
use crate::topology::handle::NodeId;
use std::collections::HashSet;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Assert invariants in debug builds or when invariant checking is enabled.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), MeshError>;
}

/// Behavior when two linked records differ by more than one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelJumpHandling {
    /// Skip level-jump detection.
    Ignore,
    /// Log a warning for each jump.
    Warn,
    /// Return an error on the first jump.
    Error,
}

/// Validation toggles for [`validate_grid`].
#[derive(Debug, Clone, Copy)]
pub struct GridValidationOptions {
    /// Ensure every stored handle resolves to a live record.
    pub check_handles: bool,
    /// Ensure the global order lists exactly the live leaves.
    pub check_order: bool,
    pub level_jumps: LevelJumpHandling,
}

impl GridValidationOptions {
    /// Enable every check, failing on level jumps.
    pub fn all() -> Self {
        Self {
            check_handles: true,
            check_order: true,
            level_jumps: LevelJumpHandling::Error,
        }
    }
}

impl Default for GridValidationOptions {
    fn default() -> Self {
        Self::all()
    }
}

/// Validate the grid's handles, global order and level balance.
pub fn validate_grid(
    grid: &AdaptiveGrid,
    options: GridValidationOptions,
) -> Result<(), MeshError> {
    if options.check_order {
        validate_order(grid)?;
    }

    for (id, node) in grid.nodes() {
        let level = node.header().level;
        for (direction, target) in linked_handles(node) {
            if options.check_handles && !grid.contains(target) {
                return Err(MeshError::StaleHandle(target));
            }
            if options.level_jumps == LevelJumpHandling::Ignore {
                continue;
            }
            let Ok(header) = grid.header(target) else {
                continue;
            };
            if level.abs_diff(header.level) <= 1 {
                continue;
            }
            match options.level_jumps {
                LevelJumpHandling::Warn => {
                    log::warn!(
                        "level jump: {id} (level {level}) -> {target} (level {}) across {direction}",
                        header.level
                    );
                }
                LevelJumpHandling::Error => {
                    return Err(MeshError::LevelJump {
                        from: id,
                        to: target,
                        direction,
                        from_level: level,
                        to_level: header.level,
                    });
                }
                LevelJumpHandling::Ignore => {}
            }
        }
    }
    Ok(())
}

fn validate_order(grid: &AdaptiveGrid) -> Result<(), MeshError> {
    let mut seen = HashSet::with_capacity(grid.leaf_count());
    for &id in grid.order() {
        grid.leaf(id)?;
        if !seen.insert(id) {
            return Err(MeshError::DuplicateInOrder(id));
        }
    }
    let live_leaves = grid
        .nodes()
        .filter(|(_, node)| node.header().is_leaf())
        .count();
    if live_leaves != seen.len() {
        return Err(MeshError::OrderMismatch(format!(
            "{live_leaves} live leaves but {} ordered",
            seen.len()
        )));
    }
    Ok(())
}

/// Present handles stored in a record, tagged with the face they cross.
fn linked_handles(node: &Node) -> Vec<(Direction, NodeId)> {
    match node {
        Node::Leaf(cell) => Direction::ALL
            .iter()
            .filter_map(|&d| cell.neighbor(d).map(|n| (d, n)))
            .collect(),
        Node::Connector(connector) => {
            let Some(direction) = connector.direction else {
                return Vec::new();
            };
            std::iter::once(connector.single)
                .chain(connector.quadruple)
                .flatten()
                .map(|n| (direction, n))
                .collect()
        }
    }
}

impl DebugInvariants for AdaptiveGrid {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "AdaptiveGrid");
    }

    fn validate_invariants(&self) -> Result<(), MeshError> {
        validate_grid(self, GridValidationOptions::all())
    }
}

/// Run a fallible check and panic on error when invariant checking is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
