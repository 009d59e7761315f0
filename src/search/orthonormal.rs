use super::{BlockSearch, Candidate, SearchContext, SearchState};
use crate::mv::MotionVector;

/// Alternating horizontal and vertical three-point refinements.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrthonormalSearch;

impl BlockSearch for OrthonormalSearch {
    fn search(
        &self,
        ctx: &SearchContext<'_>,
        start: Candidate,
        state: &mut SearchState,
    ) -> MotionVector {
        let mut best = start;
        best.consider(ctx, start.offset, state);

        let mut step = ctx.params.orthonormal_step as isize;
        while step > 0 {
            let (row, col) = best.offset;
            best.consider(ctx, (row, col - step), state);
            best.consider(ctx, (row, col + step), state);

            let (row, col) = best.offset;
            best.consider(ctx, (row - step, col), state);
            best.consider(ctx, (row + step, col), state);

            step /= 2;
        }

        ctx.leaf(best)
    }
}
