use super::{BlockSearch, Candidate, SearchContext, SearchState};
use crate::mv::MotionVector;

/// Logarithmic search over the four diagonal corners of a shrinking square.
///
/// A block whose error stays above the split threshold is divided once, and
/// each quadrant is searched on its own. The split is always kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossSearch;

impl BlockSearch for CrossSearch {
    fn search(
        &self,
        ctx: &SearchContext<'_>,
        start: Candidate,
        state: &mut SearchState,
    ) -> MotionVector {
        let mut best = start;
        best.consider(ctx, start.offset, state);

        let threshold = ctx.scaled(ctx.params.cross_threshold);
        let mut side = ctx.params.cross_side.max(1) as isize;
        loop {
            let (row, col) = best.offset;
            for (dr, dc) in [(-side, -side), (-side, side), (side, side), (side, -side)] {
                best.consider(ctx, (row + dr, col + dc), state);
            }
            if side <= 1 || best.error < threshold {
                break;
            }
            side /= 2;
        }

        if ctx.should_split(best.error) {
            let children = ctx
                .quadrants()
                .map(|quadrant| self.search(&quadrant, Candidate::unattainable(best.offset), state));
            return MotionVector::split(children);
        }

        ctx.leaf(best)
    }
}
