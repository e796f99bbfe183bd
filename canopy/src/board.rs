/// A single cell of the hexagonal board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Position of this cell. Cell 0 is the center, the rest spiral outwards.
    pub index: usize,
    /// 0 if the cell is unusable, 1-3 for usable cells.
    pub richness: u8,
    /// The neighboring cell in each of the six directions, or `None` where
    /// the referee sent the "no neighbor" sentinel.
    pub neighbors: [Option<usize>; 6],
}

/// The immutable adjacency graph of cells, established once at startup and
/// shared read-only for the lifetime of the process.
///
/// Adjacency comes straight off the wire and is not guaranteed to be
/// symmetric, so nothing here derives a structure that would assume it is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// The cell at `index`, if it exists.
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// All cells, ordered by index.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The neighbor of `index` in `direction` (0-5), if there is one.
    pub fn neighbor(&self, index: usize, direction: usize) -> Option<usize> {
        self.cells.get(index)?.neighbors.get(direction).copied()?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_cell_board() -> Board {
        // Asymmetric on purpose: cell 2 points back at nobody.
        Board::new(vec![
            Cell {
                index: 0,
                richness: 3,
                neighbors: [Some(1), Some(2), None, None, None, None],
            },
            Cell {
                index: 1,
                richness: 1,
                neighbors: [None, None, None, Some(0), None, None],
            },
            Cell {
                index: 2,
                richness: 0,
                neighbors: [None; 6],
            },
        ])
    }

    #[test]
    fn neighbor_lookup() {
        let board = three_cell_board();
        assert_eq!(board.neighbor(0, 0), Some(1));
        assert_eq!(board.neighbor(0, 2), None);
        assert_eq!(board.neighbor(1, 3), Some(0));
    }

    #[test]
    fn asymmetric_adjacency_is_preserved() {
        let board = three_cell_board();
        // 0 considers 2 a neighbor, but not the other way around.
        assert_eq!(board.neighbor(0, 1), Some(2));
        assert!(board.cell(2).unwrap().neighbors.iter().all(Option::is_none));
    }

    #[test]
    fn out_of_bounds_lookups_are_none() {
        let board = three_cell_board();
        assert!(board.cell(3).is_none());
        assert_eq!(board.neighbor(3, 0), None);
        assert_eq!(board.neighbor(0, 6), None);
    }
}
