//! Transition connector: the hanging-node bridge at a non-conforming face.
//!
//! A connector sits between one coarse cell and the four fine cells that
//! share its face. Seen from the fine side, `single` leads to the coarse
//! target. Seen from the coarse side, `quadruple[0..4]` lead to the fine
//! targets. A connector owns none of its targets.

use crate::topology::direction::Direction;
use crate::topology::header::{CellHeader, CellKind};
use crate::topology::handle::Neighbor;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionConnector {
    header: CellHeader,
    /// Face of the coarse cell this connector bridges. `None` until bound.
    pub direction: Option<Direction>,
    pub single: Neighbor,
    /// Quadrants 1..=4, stored at indices 0..4.
    pub quadruple: [Neighbor; 4],
}

impl Default for TransitionConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionConnector {
    pub fn new() -> Self {
        Self {
            header: CellHeader::new(CellKind::TransitionConnector),
            direction: None,
            single: None,
            quadruple: [None; 4],
        }
    }

    /// Set level, direction and all five handles at once.
    pub fn bind_topology(
        &mut self,
        level: u16,
        direction: Direction,
        single: Neighbor,
        quadruple: [Neighbor; 4],
    ) {
        self.header.level = level;
        self.direction = Some(direction);
        self.single = single;
        self.quadruple = quadruple;
    }

    #[inline]
    pub fn header(&self) -> CellHeader {
        self.header
    }

    #[inline]
    pub fn level(&self) -> u16 {
        self.header.level
    }

    /// Handle for quadrant `1..=4`, or `None` for any other quadrant number.
    pub fn quadrant(&self, quadrant: usize) -> Neighbor {
        quadrant
            .checked_sub(1)
            .and_then(|i| self.quadruple.get(i).copied())
            .flatten()
    }
}
