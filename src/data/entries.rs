//! Matrix-row entries owned by a leaf cell.

use crate::topology::handle::Neighbor;

/// One coefficient of the cell's row in the assembled linear system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatrixEntry {
    /// Coefficient value.
    pub value: f64,
    /// Column in the solver vector (the `sv_position` of `cell`).
    pub column: u32,
    /// Leaf cell the column belongs to, when known.
    pub cell: Neighbor,
}

impl MatrixEntry {
    pub fn new(value: f64, column: u32, cell: Neighbor) -> Self {
        Self {
            value,
            column,
            cell,
        }
    }
}
