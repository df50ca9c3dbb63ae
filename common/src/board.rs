use crate::error::{ModelError, Result};

/// The visible state of a single cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Cell {
    Hidden,
    Revealed(u8), // The u8 is the number of adjacent mines.
}

impl Cell {
    /// Reads a cell from the integer board convention: `0` is hidden, any
    /// positive number is a revealed hint.
    pub fn from_hint(value: i32) -> Option<Self> {
        match value {
            0 => Some(Cell::Hidden),
            1..=255 => Some(Cell::Revealed(value as u8)),
            _ => None,
        }
    }

    pub fn is_revealed(self) -> bool {
        matches!(self, Cell::Revealed(_))
    }
}

/// An immutable `D`-dimensional board stored in row-major order.
///
/// The first axis is the outermost one: for a 2D board a coordinate is
/// `[row, column]`, for a 3D board `[layer, row, column]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board<const D: usize> {
    dims: [usize; D],
    cells: Vec<Cell>,
}

impl<const D: usize> Board<D> {
    pub fn from_cells(dims: [usize; D], cells: Vec<Cell>) -> Result<Self> {
        let expected: usize = dims.iter().product();
        if cells.len() != expected {
            return Err(ModelError::MalformedBoard(format!(
                "{} cells given for extents {:?}",
                cells.len(),
                dims
            )));
        }
        Ok(Board { dims, cells })
    }

    pub fn dims(&self) -> [usize; D] {
        self.dims
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Row-major index of `coord`, or `None` when it lies outside the board.
    pub fn index_of(&self, coord: [usize; D]) -> Option<usize> {
        let mut index = 0;
        for (&c, &extent) in coord.iter().zip(&self.dims) {
            if c >= extent {
                return None;
            }
            index = index * extent + c;
        }
        Some(index)
    }

    /// Inverse of [`Board::index_of`]. `index` must be below [`Board::len`].
    pub fn coord_of(&self, index: usize) -> [usize; D] {
        let mut coord = [0; D];
        let mut rest = index;
        for axis in (0..D).rev() {
            coord[axis] = rest % self.dims[axis];
            rest /= self.dims[axis];
        }
        coord
    }

    pub fn get(&self, coord: [usize; D]) -> Option<Cell> {
        self.index_of(coord).map(|index| self.cells[index])
    }

    /// Every cell with its coordinate, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ([usize; D], Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, &cell)| (self.coord_of(index), cell))
    }

    pub fn revealed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_revealed()).count()
    }
}

impl Board<2> {
    /// Builds a board from rows of integers (`0` hidden, `n > 0` revealed).
    pub fn from_rows(rows: &[Vec<i32>]) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(rows.len() * width);

        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(ModelError::MalformedBoard(format!(
                    "row {i} has {} cells, expected {width}",
                    row.len()
                )));
            }
            for (j, &value) in row.iter().enumerate() {
                cells.push(parse_cell(value, &[i, j])?);
            }
        }

        Board::from_cells([rows.len(), width], cells)
    }
}

impl Board<3> {
    /// Builds a board from layers of rows of integers.
    pub fn from_layers(layers: &[Vec<Vec<i32>>]) -> Result<Self> {
        let height = layers.first().map_or(0, Vec::len);
        let width = layers
            .first()
            .and_then(|layer| layer.first())
            .map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(layers.len() * height * width);

        for (i, layer) in layers.iter().enumerate() {
            if layer.len() != height {
                return Err(ModelError::MalformedBoard(format!(
                    "layer {i} has {} rows, expected {height}",
                    layer.len()
                )));
            }
            for (j, row) in layer.iter().enumerate() {
                if row.len() != width {
                    return Err(ModelError::MalformedBoard(format!(
                        "row {j} of layer {i} has {} cells, expected {width}",
                        row.len()
                    )));
                }
                for (k, &value) in row.iter().enumerate() {
                    cells.push(parse_cell(value, &[i, j, k])?);
                }
            }
        }

        Board::from_cells([layers.len(), height, width], cells)
    }
}

fn parse_cell(value: i32, coord: &[usize]) -> Result<Cell> {
    Cell::from_hint(value).ok_or_else(|| {
        ModelError::MalformedBoard(format!("cell {coord:?} holds invalid value {value}"))
    })
}
