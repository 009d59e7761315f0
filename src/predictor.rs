#[cfg(test)]
mod tests;

use crate::{
    mv::MotionVector,
    params::BLOCK_SIZE,
    search::{Candidate, SearchContext, SearchState},
};

/// Grid offsets looked up in the previous call's vectors.
const PREVIOUS_NEIGHBOURS: [(isize, isize); 4] = [(1, -1), (1, 1), (2, -2), (2, 2)];

/// Grid offsets looked up among the blocks already decided in this call.
const CURRENT_NEIGHBOURS: [(isize, isize); 2] = [(-1, -1), (-1, 1)];

/// Reuses displacements of neighbouring blocks as a first guess.
#[derive(Debug, Clone, Copy)]
pub struct CandidatePredictor<'a> {
    previous: &'a [MotionVector],
    current: &'a [MotionVector],
    blocks_x: usize,
    blocks_y: usize,
}

impl<'a> CandidatePredictor<'a> {
    /// `previous` holds a full grid from the last call, or nothing before the
    /// first call. `current` holds the blocks of this call decided so far, in
    /// raster order.
    #[must_use]
    pub fn new(
        previous: &'a [MotionVector],
        current: &'a [MotionVector],
        blocks_x: usize,
        blocks_y: usize,
    ) -> Self {
        Self {
            previous,
            current,
            blocks_x,
            blocks_y,
        }
    }

    /// Lowest-error neighbour displacement for the block of `ctx`.
    ///
    /// Without history this is always [`Candidate::unattainable`], so the
    /// caller falls through to a full search.
    pub fn predict(&self, ctx: &SearchContext<'_>, state: &mut SearchState) -> Candidate {
        let mut best = Candidate::unattainable((0, 0));
        if self.previous.is_empty() {
            return best;
        }

        let grid_row = (ctx.row / BLOCK_SIZE) as isize;
        let grid_col = (ctx.col / BLOCK_SIZE) as isize;
        let neighbours = PREVIOUS_NEIGHBOURS
            .iter()
            .map(|offset| (self.previous, offset))
            .chain(CURRENT_NEIGHBOURS.iter().map(|offset| (self.current, offset)));

        for (storage, &(dr, dc)) in neighbours {
            let (row, col) = (grid_row + dr, grid_col + dc);
            let Some(index) = self.index(row, col) else {
                continue;
            };
            let Some(MotionVector::Leaf(leaf)) = storage.get(index) else {
                continue;
            };
            let offset = (
                leaf.row - row * BLOCK_SIZE as isize,
                leaf.col - col * BLOCK_SIZE as isize,
            );
            best.consider(ctx, offset, state);
        }

        best
    }

    fn index(&self, row: isize, col: isize) -> Option<usize> {
        if row < 0 || col < 0 || row as usize >= self.blocks_y || col as usize >= self.blocks_x {
            return None;
        }
        Some(row as usize * self.blocks_x + col as usize)
    }
}
