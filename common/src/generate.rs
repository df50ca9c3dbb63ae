//! Random boards with a known mine layout, for demos and tests.

use crate::board::{Board, Cell};
use crate::csp::Value;
use crate::error::{ModelError, Result};
use crate::neighbors::Stencil;
use rand::Rng;
use rand::seq::index;

/// A partially revealed board together with the layout that produced it.
#[derive(Debug, Clone)]
pub struct SampledBoard<const D: usize> {
    pub board: Board<D>,
    mine_map: Vec<bool>,
}

impl<const D: usize> SampledBoard<D> {
    pub fn mines(&self) -> Vec<[usize; D]> {
        self.mine_map
            .iter()
            .enumerate()
            .filter(|&(_, &mine)| mine)
            .map(|(index, _)| self.board.coord_of(index))
            .collect()
    }

    pub fn is_mine(&self, coord: [usize; D]) -> bool {
        self.board
            .index_of(coord)
            .is_some_and(|index| self.mine_map[index])
    }

    /// The ground-truth value of every cell, in row-major order. This lines
    /// up with the variable ids of a model built from `board`.
    pub fn solution(&self) -> Vec<Value> {
        self.board
            .cells()
            .iter()
            .zip(&self.mine_map)
            .map(|(&cell, &mine)| match (cell, mine) {
                (_, true) => Value::Mine,
                (Cell::Revealed(n), false) => Value::Hint(n),
                (Cell::Hidden, false) => Value::Empty,
            })
            .collect()
    }
}

/// Places `mines` mines uniformly at random on a board with extents `dims`,
/// then reveals each safe cell with probability `reveal_probability`.
///
/// Revealed cells show their true count, including `Revealed(0)`.
pub fn sample_board<const D: usize, R: Rng + ?Sized>(
    rng: &mut R,
    dims: [usize; D],
    mines: usize,
    reveal_probability: f64,
) -> Result<SampledBoard<D>> {
    let cells: usize = dims.iter().product();
    if mines >= cells {
        return Err(ModelError::TooManyMines { mines, cells });
    }
    if !(0.0..=1.0).contains(&reveal_probability) {
        return Err(ModelError::InvalidProbability(reveal_probability));
    }

    let mut is_mine = vec![false; cells];
    for index in index::sample(rng, cells, mines).into_vec() {
        is_mine[index] = true;
    }

    let blank = Board::from_cells(dims, vec![Cell::Hidden; cells])?;
    let stencil = Stencil::<D>::new();
    let mut revealed = Vec::with_capacity(cells);

    for (index, &mine) in is_mine.iter().enumerate() {
        if mine || !rng.random_bool(reveal_probability) {
            revealed.push(Cell::Hidden);
            continue;
        }
        let count = stencil
            .neighbors(blank.coord_of(index), dims)
            .filter(|&n| blank.index_of(n).is_some_and(|i| is_mine[i]))
            .count();
        revealed.push(Cell::Revealed(count as u8));
    }

    Ok(SampledBoard {
        board: Board::from_cells(dims, revealed)?,
        mine_map: is_mine,
    })
}
