use super::{BlockSearch, Candidate, SearchContext, SearchState};
use crate::mv::MotionVector;

const SPATIAL_OFFSETS: [(isize, isize); 5] = [(0, 0), (-4, 0), (4, 0), (0, -4), (0, 4)];

const FLUCTUATIONS: [(isize, isize); 16] = [
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (0, 2),
    (2, 0),
    (0, -2),
    (-2, 0),
    (2, 1),
    (-1, 2),
    (-2, -1),
    (1, -2),
];

/// Randomized spatio-temporal search (3DRS).
///
/// Probes a few fixed offsets around the start, each nudged by the next entry
/// of a fluctuation table. The table position lives in [`SearchState`] and
/// keeps cycling across blocks and calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rs3dSearch;

impl BlockSearch for Rs3dSearch {
    fn search(
        &self,
        ctx: &SearchContext<'_>,
        start: Candidate,
        state: &mut SearchState,
    ) -> MotionVector {
        let mut best = start;
        best.consider(ctx, start.offset, state);

        let (row, col) = start.offset;
        for (dr, dc) in SPATIAL_OFFSETS {
            let (fr, fc) = FLUCTUATIONS[state.fluctuation % FLUCTUATIONS.len()];
            state.fluctuation = (state.fluctuation + 1) % FLUCTUATIONS.len();
            best.consider(ctx, (row + dr + fr, col + dc + fc), state);
        }

        ctx.leaf(best)
    }
}
