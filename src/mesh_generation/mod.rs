//! Structured generator for conforming root-level grids.
//!
//! Produces `nx × ny × nz` leaf cells at level 1 with every interior face
//! wired and boundary faces left absent. East, north and front point towards
//! increasing x, y and z. Cells enter the global order x-fastest.

use crate::data::leaf_cell::{CellConfig, LeafCell};
use crate::grid::AdaptiveGrid;
use crate::mesh_error::MeshError;
use crate::topology::direction::Direction;
use crate::topology::handle::NodeId;
use itertools::iproduct;

/// Input to [`uniform_grid`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformGridOptions {
    /// Cell counts along x, y and z.
    pub cells: [usize; 3],
    /// Cell extents `(dx, dy, dz)`.
    pub spacing: [f64; 3],
    /// Minimum corner of the domain.
    pub origin: [f64; 3],
}

impl Default for UniformGridOptions {
    fn default() -> Self {
        Self {
            cells: [1, 1, 1],
            spacing: [1.0; 3],
            origin: [0.0; 3],
        }
    }
}

/// A generated grid plus its structured index.
#[derive(Debug)]
pub struct UniformGrid {
    pub grid: AdaptiveGrid,
    pub dims: [usize; 3],
    cells: Vec<NodeId>,
}

impl UniformGrid {
    /// Handle of the cell at structured index `(i, j, k)`.
    pub fn cell_at(&self, i: usize, j: usize, k: usize) -> Option<NodeId> {
        let [nx, ny, nz] = self.dims;
        (i < nx && j < ny && k < nz).then(|| self.cells[linear_index(self.dims, i, j, k)])
    }

    /// Handles in generation order (x fastest).
    pub fn cells(&self) -> &[NodeId] {
        &self.cells
    }
}

#[inline]
fn linear_index([nx, ny, _]: [usize; 3], i: usize, j: usize, k: usize) -> usize {
    i + nx * (j + ny * k)
}

fn invalid_geometry(message: impl Into<String>) -> MeshError {
    MeshError::InvalidGeometry(message.into())
}

/// Generate a conforming uniform grid.
///
/// # Errors
/// `InvalidGeometry` if any cell count is zero or any spacing is not a
/// positive finite number.
pub fn uniform_grid(options: UniformGridOptions) -> Result<UniformGrid, MeshError> {
    let dims = options.cells;
    if dims.contains(&0) {
        return Err(invalid_geometry("cell counts must be positive"));
    }
    if let Some(bad) = options.spacing.iter().find(|d| !(d.is_finite() && **d > 0.0)) {
        return Err(invalid_geometry(format!("spacing {bad} must be positive and finite")));
    }
    let [nx, ny, nz] = dims;
    let total = nx * ny * nz;

    let mut grid = AdaptiveGrid::with_capacity(total);
    let cells: Vec<NodeId> = (0..total).map(|_| grid.push_leaf(LeafCell::new())).collect();

    for (k, j, i) in iproduct!(0..nz, 0..ny, 0..nx) {
        let at = |di: isize, dj: isize, dk: isize| -> Option<NodeId> {
            let (ii, jj, kk) = (
                i.checked_add_signed(di)?,
                j.checked_add_signed(dj)?,
                k.checked_add_signed(dk)?,
            );
            (ii < nx && jj < ny && kk < nz).then(|| cells[linear_index(dims, ii, jj, kk)])
        };
        let mut neighbors = [None; 6];
        neighbors[Direction::North.index()] = at(0, 1, 0);
        neighbors[Direction::South.index()] = at(0, -1, 0);
        neighbors[Direction::East.index()] = at(1, 0, 0);
        neighbors[Direction::West.index()] = at(-1, 0, 0);
        neighbors[Direction::Front.index()] = at(0, 0, 1);
        neighbors[Direction::Back.index()] = at(0, 0, -1);

        let index = linear_index(dims, i, j, k);
        let ijk = [i, j, k];
        let center = std::array::from_fn(|axis| {
            options.origin[axis] + options.spacing[axis] * (ijk[axis] as f64 + 0.5)
        });
        grid.leaf_mut(cells[index])?.configure(CellConfig {
            discretization: options.spacing,
            bunch_number: 0,
            neighbors,
            grid_position: index as u32,
            hilbert_shape_number: 0,
            center,
        });
    }

    grid.renumber();
    log::debug!("generated uniform grid {nx}x{ny}x{nz}");
    Ok(UniformGrid { grid, dims, cells })
}
