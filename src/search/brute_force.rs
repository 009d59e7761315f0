use super::{BlockSearch, Candidate, SearchContext, SearchState};
use crate::mv::MotionVector;

/// Every displacement in a square window around the block's own position.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForceSearch;

impl BlockSearch for BruteForceSearch {
    fn search(
        &self,
        ctx: &SearchContext<'_>,
        start: Candidate,
        state: &mut SearchState,
    ) -> MotionVector {
        let mut best = start;
        best.consider(ctx, start.offset, state);

        let radius = ctx.params.brute_force_radius as isize;
        for dr in -radius..=radius {
            for dc in -radius..=radius {
                best.consider(ctx, (dr, dc), state);
            }
        }

        ctx.leaf(best)
    }
}
