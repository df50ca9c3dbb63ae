//! Board to network compilation.

use crate::board::{Board, Cell};
use crate::csp::{Constraint, Network, Value, VarId, Variable};
use crate::error::{ModelError, Result};
use crate::neighbors::Stencil;
use crate::options::ModelOptions;
use crate::tuples;
use log::{debug, info, trace};

/// Maps every board coordinate to the variable standing for that cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableGrid<const D: usize> {
    dims: [usize; D],
    ids: Vec<VarId>,
}

impl<const D: usize> VariableGrid<D> {
    pub fn dims(&self) -> [usize; D] {
        self.dims
    }

    pub fn get(&self, coord: [usize; D]) -> Option<VarId> {
        let mut index = 0;
        for (&c, &extent) in coord.iter().zip(&self.dims) {
            if c >= extent {
                return None;
            }
            index = index * extent + c;
        }
        self.ids.get(index).copied()
    }

    /// Every coordinate with its variable, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ([usize; D], VarId)> + '_ {
        let dims = self.dims;
        self.ids.iter().enumerate().map(move |(index, &id)| {
            let mut coord = [0; D];
            let mut rest = index;
            for axis in (0..D).rev() {
                coord[axis] = rest % dims[axis];
                rest /= dims[axis];
            }
            (coord, id)
        })
    }
}

/// The result of compiling one board.
#[derive(Debug, Clone)]
pub struct Model<const D: usize> {
    pub network: Network,
    pub grid: VariableGrid<D>,
    /// Cells the domain reducer treated as forced-safe during construction.
    /// Their domains have been restored in `network`.
    pub isolated: Vec<VarId>,
}

/// Compiles a 2D board given in the integer convention, with default options.
pub fn build_2d(rows: &[Vec<i32>]) -> Result<Model<2>> {
    build(&Board::<2>::from_rows(rows)?, &ModelOptions::default())
}

/// Compiles a 3D board given in the integer convention, with default options.
pub fn build_3d(layers: &[Vec<Vec<i32>>]) -> Result<Model<3>> {
    build(&Board::<3>::from_layers(layers)?, &ModelOptions::default())
}

/// Translates `board` into a constraint network.
///
/// 1. One variable per cell: `{Empty, Mine}` when hidden, `{Hint(n)}` when
///    revealed.
/// 2. Cells with no revealed cell around them lose `Mine` from their working
///    domain.
/// 3. Each revealed cell gets a table constraint over its in-bounds
///    neighbours requiring exactly `n` mines.
/// 4. Every working domain is restored before the network is returned.
pub fn build<const D: usize>(board: &Board<D>, options: &ModelOptions) -> Result<Model<D>> {
    let stencil = Stencil::<D>::new();

    // --- 1. Variables ---
    let variables = board
        .iter()
        .map(|(coord, cell)| {
            let domain = match cell {
                Cell::Hidden => vec![Value::Empty, Value::Mine],
                Cell::Revealed(n) => vec![Value::Hint(n)],
            };
            Variable::new(&coord, domain)
        })
        .collect();
    let grid = VariableGrid {
        dims: board.dims(),
        ids: (0..board.len()).collect(),
    };
    let mut network = Network::new(format!("Minesweeper-{}d", D), variables);

    // --- 2. Domain reduction ---
    let isolated = if options.reduce_isolated {
        reduce_with(&stencil, board, &grid, &mut network)
    } else {
        Vec::new()
    };

    // --- 3. Constraints ---
    add_constraints(&stencil, board, &grid, &mut network, options)?;

    // --- 4. Restore working domains ---
    for variable in network.variables_mut() {
        variable.restore_current_domain();
    }

    info!(
        "built {}: {} variables, {} constraints, {} isolated cells",
        network.name(),
        network.variables().len(),
        network.constraints().len(),
        isolated.len()
    );

    Ok(Model {
        network,
        grid,
        isolated,
    })
}

/// Prunes `Mine` from every hidden cell whose closed neighbourhood holds no
/// revealed cell. Positions outside the board do not count as revealed.
///
/// Returns the pruned variables.
pub fn reduce_domains<const D: usize>(
    board: &Board<D>,
    grid: &VariableGrid<D>,
    network: &mut Network,
) -> Vec<VarId> {
    reduce_with(&Stencil::new(), board, grid, network)
}

fn reduce_with<const D: usize>(
    stencil: &Stencil<D>,
    board: &Board<D>,
    grid: &VariableGrid<D>,
    network: &mut Network,
) -> Vec<VarId> {
    let dims = board.dims();
    let mut pruned = Vec::new();

    for (coord, cell) in board.iter() {
        if cell.is_revealed() {
            continue;
        }
        let isolated = stencil
            .closed_neighborhood(coord, dims)
            .all(|n| matches!(board.get(n), Some(Cell::Hidden)));
        if !isolated {
            continue;
        }
        let Some(id) = grid.get(coord) else {
            continue;
        };
        let Some(variable) = network.variables_mut().get_mut(id) else {
            continue;
        };
        if variable.prune_value(Value::Mine) {
            trace!("{} has no revealed neighbour, treating as safe", variable.name());
            pruned.push(id);
        }
    }

    pruned
}

fn add_constraints<const D: usize>(
    stencil: &Stencil<D>,
    board: &Board<D>,
    grid: &VariableGrid<D>,
    network: &mut Network,
    options: &ModelOptions,
) -> Result<()> {
    let dims = board.dims();

    for (coord, cell) in board.iter() {
        let Cell::Revealed(hint) = cell else {
            continue;
        };
        let mines = hint as usize;

        let scope: Vec<VarId> = stencil
            .neighbors(coord, dims)
            .filter_map(|n| grid.get(n))
            .collect();
        let mut constraint = Constraint::new(&coord, hint, scope.clone());

        let domains: Vec<&[Value]> = scope
            .iter()
            .map(|&id| network.variables()[id].current_domain())
            .collect();

        let candidates = tuples::candidate_count(&domains, mines);
        if candidates > u128::from(options.max_candidates) {
            return Err(ModelError::CombinatorialBlowup {
                constraint: constraint.name().to_string(),
                candidates,
                limit: options.max_candidates,
            });
        }

        let table = tuples::satisfying_tuples(&domains, mines);
        if table.is_empty() {
            return Err(ModelError::UnsatisfiableHint {
                constraint: constraint.name().to_string(),
                anchor: coord.to_vec(),
                hint,
                neighbors: scope.len(),
                eligible: tuples::mine_eligible(&domains),
            });
        }

        debug!(
            "{}: {} mines among {} neighbours, {} tuples",
            constraint.name(),
            hint,
            scope.len(),
            table.len()
        );

        constraint.add_satisfying_tuples(table)?;
        network.add_constraint(constraint)?;
    }

    Ok(())
}
