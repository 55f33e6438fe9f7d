//! Connected-region analysis.
//!
//! Groups each side's pieces into 8-connected regions with an iterative
//! flood fill. The board caches the result until its next mutation.

use super::piece::{Piece, Side};
use super::square::{Square, SQUARE_COUNT};

/// Region sizes for both sides, each sorted largest first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegionSizes {
    pub black: Vec<usize>,
    pub white: Vec<usize>,
}

impl RegionSizes {
    /// Computes region sizes for both sides of the given grid.
    pub fn compute(grid: &[Piece; SQUARE_COUNT]) -> Self {
        let mut visited = [false; SQUARE_COUNT];
        let mut stack: Vec<Square> = Vec::with_capacity(SQUARE_COUNT);
        let mut sizes = RegionSizes::default();

        for start in 0..SQUARE_COUNT {
            let piece = grid[start];
            let side = match piece.side() {
                Some(s) => s,
                None => continue,
            };
            if visited[start] {
                continue;
            }

            visited[start] = true;
            stack.push(Square::from_index(start));
            let mut size = 0;
            while let Some(sq) = stack.pop() {
                size += 1;
                for n in sq.adjacent() {
                    let ni = n.index();
                    if !visited[ni] && grid[ni] == piece {
                        visited[ni] = true;
                        stack.push(n);
                    }
                }
            }

            match side {
                Side::Black => sizes.black.push(size),
                Side::White => sizes.white.push(size),
            }
        }

        sizes.black.sort_unstable_by(|a, b| b.cmp(a));
        sizes.white.sort_unstable_by(|a, b| b.cmp(a));
        sizes
    }

    /// Returns the region sizes of one side.
    pub fn for_side(&self, side: Side) -> &[usize] {
        match side {
            Side::Black => &self.black,
            Side::White => &self.white,
        }
    }
}
