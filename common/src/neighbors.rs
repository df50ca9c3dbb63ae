//! Neighbourhood lookup for 2D (8-connected) and 3D (26-connected) boards.
//!
//! Offsets are visited in row-major order: the first axis is the outermost
//! loop and every axis steps through `-1, 0, 1`. Constraint scopes are built
//! in this order, so it also fixes the meaning of every tuple column.

use itertools::Itertools;

/// Precomputed offsets for one dimensionality.
#[derive(Debug, Clone)]
pub struct Stencil<const D: usize> {
    open: Vec<[isize; D]>,
    closed: Vec<[isize; D]>,
}

impl<const D: usize> Stencil<D> {
    pub fn new() -> Self {
        let closed: Vec<[isize; D]> = (0..D)
            .map(|_| -1isize..=1)
            .multi_cartesian_product()
            .map(|offset| {
                let mut out = [0; D];
                out.copy_from_slice(&offset);
                out
            })
            .collect();
        let open = closed
            .iter()
            .copied()
            .filter(|offset| offset.iter().any(|&d| d != 0))
            .collect();

        Stencil { open, closed }
    }

    /// Offsets excluding the centre, `3^D - 1` of them.
    pub fn offsets(&self) -> &[[isize; D]] {
        &self.open
    }

    /// In-bounds neighbours of `coord`, excluding `coord` itself.
    pub fn neighbors(
        &self,
        coord: [usize; D],
        dims: [usize; D],
    ) -> impl Iterator<Item = [usize; D]> + '_ {
        self.open
            .iter()
            .filter_map(move |&offset| shift(coord, dims, offset))
    }

    /// In-bounds neighbours of `coord` including `coord` itself.
    pub fn closed_neighborhood(
        &self,
        coord: [usize; D],
        dims: [usize; D],
    ) -> impl Iterator<Item = [usize; D]> + '_ {
        self.closed
            .iter()
            .filter_map(move |&offset| shift(coord, dims, offset))
    }
}

impl<const D: usize> Default for Stencil<D> {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorthand for a one-off lookup; prefer a shared [`Stencil`] in loops.
pub fn neighbors<const D: usize>(coord: [usize; D], dims: [usize; D]) -> Vec<[usize; D]> {
    Stencil::new().neighbors(coord, dims).collect()
}

pub fn closed_neighborhood<const D: usize>(coord: [usize; D], dims: [usize; D]) -> Vec<[usize; D]> {
    Stencil::new().closed_neighborhood(coord, dims).collect()
}

fn shift<const D: usize>(
    coord: [usize; D],
    dims: [usize; D],
    offset: [isize; D],
) -> Option<[usize; D]> {
    let mut out = [0; D];
    for axis in 0..D {
        let c = coord[axis].checked_add_signed(offset[axis])?;
        if c >= dims[axis] {
            return None;
        }
        out[axis] = c;
    }
    Some(out)
}
