mod util;

use amr_cells::prelude::*;
use proptest::prelude::*;

const DIMS: [usize; 3] = [3, 3, 2];

fn arb_potentials() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-90.0f64..40.0, DIMS.iter().product::<usize>())
}

fn arb_exchanges() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..DIMS.iter().product::<usize>(), 0..6usize), 1..60)
}

fn seeded_grid(potentials: &[f64]) -> amr_cells::mesh_generation::UniformGrid {
    let mut ug = uniform_grid(UniformGridOptions {
        cells: DIMS,
        spacing: [0.5, 0.25, 1.0],
        ..Default::default()
    })
    .unwrap();
    for (&id, &v) in ug.cells().to_vec().iter().zip(potentials) {
        ug.grid.leaf_mut(id).unwrap().v = v;
    }
    ug
}

proptest! {
    #[test]
    fn accumulators_are_monotone(potentials in arb_potentials(), calls in arb_exchanges()) {
        let ug = seeded_grid(&potentials);
        let mut previous = util::all_fluxes(&ug.grid);
        for (cell, dir) in calls {
            let id = ug.cells()[cell];
            let direction = Direction::ALL[dir];
            match exchange_flux(&ug.grid, id, direction) {
                Ok(_) | Err(MeshError::AbsentNeighbor { .. }) => {}
                Err(e) => return Err(TestCaseError::fail(e.to_string())),
            }
            let now = util::all_fluxes(&ug.grid);
            for (old, new) in previous.iter().zip(&now) {
                for face in 0..6 {
                    prop_assert!(new[face] >= old[face]);
                }
            }
            previous = now;
        }
    }

    #[test]
    fn exchange_changes_at_most_two_faces(
        potentials in arb_potentials(),
        cell in 0usize..18,
        dir in 0usize..6
    ) {
        let ug = seeded_grid(&potentials);
        let id = ug.cells()[cell];
        let direction = Direction::ALL[dir];
        let before = util::all_fluxes(&ug.grid);

        let result = exchange_flux(&ug.grid, id, direction);
        let after = util::all_fluxes(&ug.grid);

        let Some(neighbor) = ug.grid.leaf(id).unwrap().neighbor(direction) else {
            let absent = matches!(result, Err(MeshError::AbsentNeighbor { .. }));
            prop_assert!(absent, "boundary face must report AbsentNeighbor, got {:?}", result);
            prop_assert_eq!(before, after);
            return Ok(());
        };
        for (pos, &other) in ug.grid.order().iter().enumerate() {
            for face in Direction::ALL {
                let targeted = (other == id && face == direction)
                    || (other == neighbor && face == direction.opposite());
                if !targeted {
                    prop_assert_eq!(before[pos][face.index()], after[pos][face.index()]);
                }
            }
        }

        // Antisymmetry of the local estimate: the reverse call offers the negation.
        if let Ok(FluxExchange::Applied { local_flux, .. }) = result {
            let reverse = exchange_flux(&ug.grid, neighbor, direction.opposite()).unwrap();
            match reverse {
                FluxExchange::Applied { local_flux: back, neighbor: n, .. } => {
                    prop_assert_eq!(n, id);
                    prop_assert_eq!(back, -local_flux);
                }
                FluxExchange::Unresolved => prop_assert!(false, "conforming face must resolve"),
            }
        }
    }

    #[test]
    fn max_flux_bounds_every_face(potentials in arb_potentials()) {
        let ug = seeded_grid(&potentials);
        exchange_all_fluxes(&ug.grid, &SweepConfig::default()).unwrap();
        let global = grid_max_abs_flux(&ug.grid);
        for (_, cell) in ug.grid.leaves() {
            let local = max_abs_flux(cell);
            prop_assert!(local <= global);
            for face in cell.fluxes().snapshot() {
                prop_assert!(face.abs() <= local);
                prop_assert!(face >= 0.0);
            }
        }
    }
}
