mod util;

use amr_cells::prelude::*;
use util::{all_fluxes, hanging_face, leaf, link};

#[test]
fn direct_neighbors_exchange_symmetric_flux() {
    let mut grid = AdaptiveGrid::new();
    let a = grid.push_leaf(leaf(10.0, 1.0, 1));
    let b = grid.push_leaf(leaf(4.0, 1.0, 1));
    link(&mut grid, a, Direction::East, b);

    let result = exchange_flux(&grid, a, Direction::East).unwrap();
    assert_eq!(
        result,
        FluxExchange::Applied {
            neighbor: b,
            local_flux: 6.0,
            cell_updated: true,
            neighbor_updated: true,
        }
    );
    assert_eq!(grid.leaf(a).unwrap().flux(Direction::East), 6.0);
    assert_eq!(grid.leaf(b).unwrap().flux(Direction::West), 6.0);
    assert_eq!(max_abs_flux(grid.leaf(a).unwrap()), 6.0);
}

#[test]
fn coarse_cell_descends_through_quadrant_one() {
    let mut grid = AdaptiveGrid::new();
    let a = grid.push_leaf(leaf(10.0, 1.0, 1));
    let b = grid.push_leaf(leaf(4.0, 0.5, 2));
    let mut t = TransitionConnector::new();
    t.bind_topology(2, Direction::East, None, [Some(b), None, None, None]);
    let t = grid.create_connector(t);
    grid.leaf_mut(a).unwrap().set_neighbor(Direction::East, Some(t));

    assert_eq!(
        resolve_neighbor(&grid, a, Direction::East).unwrap(),
        Resolution::Leaf(b)
    );
    let result = exchange_flux(&grid, a, Direction::East).unwrap();
    // min(0.5, 0.25) on x: (10 - 4) * 2 * 0.25
    assert!(matches!(result, FluxExchange::Applied { neighbor, local_flux, .. }
        if neighbor == b && local_flux == 3.0));
    assert_eq!(grid.leaf(a).unwrap().flux(Direction::East), 3.0);
    assert_eq!(grid.leaf(b).unwrap().flux(Direction::West), 3.0);
}

#[test]
fn fine_cells_ascend_through_single() {
    let mut patch = hanging_face(Direction::East, 1.0, [5.0, 5.0, 5.0, 7.0]);
    let coarse = patch.coarse;

    // Fine side: (5 - 1) * 2 * 0.25 = 2.0 lands on fine.west and coarse.east.
    let r = exchange_flux(&patch.grid, patch.fine[2], Direction::West).unwrap();
    assert!(matches!(r, FluxExchange::Applied { neighbor, .. } if neighbor == coarse));
    assert_eq!(patch.grid.leaf(patch.fine[2]).unwrap().flux(Direction::West), 2.0);
    assert_eq!(patch.grid.leaf(coarse).unwrap().flux(Direction::East), 2.0);

    // Coarse side reaches quadrant 1 only; (1 - 5) is negative, nothing merges.
    let r = exchange_flux(&patch.grid, coarse, Direction::East).unwrap();
    assert!(matches!(
        r,
        FluxExchange::Applied { neighbor, cell_updated: false, neighbor_updated: false, .. }
            if neighbor == patch.fine[0]
    ));

    // Same 2.0 again is not greater than the accumulator: unchanged.
    exchange_flux(&patch.grid, patch.fine[1], Direction::West).unwrap();
    assert_eq!(patch.grid.leaf(coarse).unwrap().flux(Direction::East), 2.0);

    // (7 - 1) * 0.5 = 3.0 > 2.0: added on top.
    exchange_flux(&patch.grid, patch.fine[3], Direction::West).unwrap();
    assert_eq!(patch.grid.leaf(coarse).unwrap().flux(Direction::East), 5.0);

    assert_eq!(
        all_fluxes(&patch.grid),
        vec![
            [0.0, 0.0, 5.0, 0.0, 0.0, 0.0],
            [0.0; 6],
            [0.0, 0.0, 0.0, 2.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 2.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 3.0, 0.0, 0.0],
        ]
    );

    patch.grid.leaf_mut(coarse).unwrap().reset_fluxes();
    assert_eq!(max_abs_flux(patch.grid.leaf(coarse).unwrap()), 0.0);
}

#[test]
fn hanging_faces_resolve_in_every_direction() {
    for dir in Direction::ALL {
        let patch = hanging_face(dir, 10.0, [4.0; 4]);

        let r = exchange_flux(&patch.grid, patch.coarse, dir).unwrap();
        assert_eq!(
            r,
            FluxExchange::Applied {
                neighbor: patch.fine[0],
                local_flux: 3.0,
                cell_updated: true,
                neighbor_updated: true,
            },
            "descend across {dir}"
        );

        let r = exchange_flux(&patch.grid, patch.fine[1], dir.opposite()).unwrap();
        assert_eq!(
            r,
            FluxExchange::Applied {
                neighbor: patch.coarse,
                local_flux: -3.0,
                cell_updated: false,
                neighbor_updated: false,
            },
            "ascend across {}",
            dir.opposite()
        );

        let coarse = patch.grid.leaf(patch.coarse).unwrap();
        let fine0 = patch.grid.leaf(patch.fine[0]).unwrap();
        for other in Direction::ALL {
            let expect_coarse = if other == dir { 3.0 } else { 0.0 };
            let expect_fine = if other == dir.opposite() { 3.0 } else { 0.0 };
            assert_eq!(coarse.flux(other), expect_coarse, "{dir}: coarse {other}");
            assert_eq!(fine0.flux(other), expect_fine, "{dir}: fine {other}");
        }
        assert_eq!(patch.dir, dir);
    }
}

#[test]
fn dangling_chains_are_silent_no_ops() {
    let mut patch = hanging_face(Direction::North, 10.0, [0.0; 4]);
    let connector = patch.connector;
    {
        let t = patch.grid.connector_mut(connector).unwrap();
        t.quadruple[0] = None;
        t.single = None;
    }
    let before = all_fluxes(&patch.grid);

    let down = exchange_flux(&patch.grid, patch.coarse, Direction::North).unwrap();
    let up = exchange_flux(&patch.grid, patch.fine[0], Direction::South).unwrap();
    assert_eq!(down, FluxExchange::Unresolved);
    assert_eq!(up, FluxExchange::Unresolved);
    assert_eq!(all_fluxes(&patch.grid), before);
}

#[test]
fn exchange_touches_only_the_two_faces() {
    let mut ug = uniform_grid(UniformGridOptions {
        cells: [3, 3, 3],
        ..Default::default()
    })
    .unwrap();
    for (n, &id) in ug.cells().to_vec().iter().enumerate() {
        ug.grid.leaf_mut(id).unwrap().v = (n as f64 * 7.3) % 5.0;
    }
    let center = ug.cell_at(1, 1, 1).unwrap();
    // Make every face of the center push outwards.
    ug.grid.leaf_mut(center).unwrap().v = 100.0;

    for dir in Direction::ALL {
        let before: Vec<_> = ug
            .grid
            .leaves()
            .map(|(id, c)| (id, c.fluxes().snapshot()))
            .collect();
        let neighbor = ug.grid.leaf(center).unwrap().neighbor(dir).unwrap();

        exchange_flux(&ug.grid, center, dir).unwrap();

        for (id, old) in before {
            let new = ug.grid.leaf(id).unwrap().fluxes().snapshot();
            for face in Direction::ALL {
                let targeted = (id == center && face == dir)
                    || (id == neighbor && face == dir.opposite());
                if targeted {
                    assert!(new[face.index()] > old[face.index()]);
                } else {
                    assert_eq!(new[face.index()], old[face.index()], "{id} {face} after {dir}");
                }
            }
        }
    }
}

#[test]
fn repeated_exchanges_never_decrease_accumulators() {
    let mut grid = AdaptiveGrid::new();
    let a = grid.push_leaf(leaf(3.0, 1.0, 1));
    let b = grid.push_leaf(leaf(1.0, 1.0, 1));
    link(&mut grid, a, Direction::Front, b);

    let mut last = (0.0, 0.0);
    for v in [3.0, 0.5, -2.0, 8.0, 1.0] {
        grid.leaf_mut(a).unwrap().v = v;
        exchange_flux(&grid, a, Direction::Front).unwrap();
        exchange_flux(&grid, b, Direction::Back).unwrap();
        let now = (
            grid.leaf(a).unwrap().flux(Direction::Front),
            grid.leaf(b).unwrap().flux(Direction::Back),
        );
        assert!(now.0 >= last.0 && now.1 >= last.1);
        last = now;
    }
}

#[test]
fn precondition_violations_are_errors() {
    let mut grid = AdaptiveGrid::new();
    let a = grid.push_leaf(leaf(1.0, 1.0, 1));
    let b = grid.push_leaf(leaf(0.0, 1.0, 1));
    link(&mut grid, a, Direction::East, b);
    let t = grid.create_connector(TransitionConnector::new());

    assert_eq!(
        exchange_flux(&grid, a, Direction::West),
        Err(MeshError::AbsentNeighbor {
            cell: a,
            direction: Direction::West
        })
    );
    assert_eq!(
        exchange_flux(&grid, t, Direction::East),
        Err(MeshError::NotALeafCell(t))
    );

    grid.destroy_leaf(b).unwrap();
    assert_eq!(
        exchange_flux(&grid, a, Direction::East),
        Err(MeshError::StaleHandle(b))
    );
    assert_eq!(
        exchange_flux(&grid, b, Direction::West),
        Err(MeshError::StaleHandle(b))
    );
}

#[test]
fn hanging_face_merge_depends_on_order() {
    // Offered fluxes (v_fine - 0) * 2 * 0.25: 0.5, 1, 2, 4.
    let run = |order: [usize; 4]| {
        let patch = hanging_face(Direction::East, 0.0, [1.0, 2.0, 4.0, 8.0]);
        for i in order {
            exchange_flux(&patch.grid, patch.fine[i], Direction::West).unwrap();
        }
        patch.grid.leaf(patch.coarse).unwrap().flux(Direction::East)
    };

    // Every offer exceeds the running total: 0.5 + 1 + 2 + 4.
    assert_eq!(run([0, 1, 2, 3]), 7.5);
    // The first offer of 4 blocks the three smaller ones.
    assert_eq!(run([3, 2, 1, 0]), 4.0);
}
