#![allow(dead_code)]
use amr_cells::prelude::*;

/// Leaf with cubic extent `h`, potential `v` and refinement `level`.
pub fn leaf(v: f64, h: f64, level: u16) -> LeafCell {
    let mut cell = LeafCell::new();
    cell.v = v;
    cell.discretization = [h; 3];
    cell.set_level(level);
    cell
}

/// Wire `a --dir--> b` and `b --opposite--> a`.
pub fn link(grid: &mut AdaptiveGrid, a: NodeId, dir: Direction, b: NodeId) {
    grid.leaf_mut(a).unwrap().set_neighbor(dir, Some(b));
    grid.leaf_mut(b).unwrap().set_neighbor(dir.opposite(), Some(a));
}

/// A coarse leaf whose `dir` face is split into four fine leaves.
pub struct HangingFace {
    pub grid: AdaptiveGrid,
    pub coarse: NodeId,
    pub fine: [NodeId; 4],
    pub connector: NodeId,
    pub dir: Direction,
}

/// One coarse cell (level 1, extent 1) meeting four fine cells (level 2,
/// extent 0.5) across its `dir` face through a single transition connector.
///
/// The coarse cell points at the connector, which descends to the fine
/// cells through its quadrants. Each fine cell points back at the same
/// connector, which ascends to the coarse cell through `single`.
pub fn hanging_face(dir: Direction, v_coarse: f64, v_fine: [f64; 4]) -> HangingFace {
    let mut grid = AdaptiveGrid::new();
    let coarse = grid.push_leaf(leaf(v_coarse, 1.0, 1));
    let fine = v_fine.map(|v| grid.push_leaf(leaf(v, 0.5, 2)));

    let mut t = TransitionConnector::new();
    t.bind_topology(2, dir, Some(coarse), fine.map(Some));
    let connector = grid.create_connector(t);

    grid.leaf_mut(coarse).unwrap().set_neighbor(dir, Some(connector));
    for f in fine {
        grid.leaf_mut(f)
            .unwrap()
            .set_neighbor(dir.opposite(), Some(connector));
    }
    HangingFace {
        grid,
        coarse,
        fine,
        connector,
        dir,
    }
}

/// Snapshot of every leaf's accumulators in traversal order.
pub fn all_fluxes(grid: &AdaptiveGrid) -> Vec<[f64; 6]> {
    grid.leaves().map(|(_, c)| c.fluxes().snapshot()).collect()
}
