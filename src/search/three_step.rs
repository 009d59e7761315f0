use super::{BlockSearch, Candidate, SearchContext, SearchState};
use crate::mv::MotionVector;

/// Classic three-step search: the eight points of a square ring, halving the
/// ring's side every round.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreeStepSearch;

impl BlockSearch for ThreeStepSearch {
    fn search(
        &self,
        ctx: &SearchContext<'_>,
        start: Candidate,
        state: &mut SearchState,
    ) -> MotionVector {
        let mut best = start;
        best.consider(ctx, start.offset, state);

        let threshold = ctx.scaled(ctx.params.cross_threshold);
        let mut side = ctx.params.three_step_side.max(1) as isize;
        loop {
            let (row, col) = best.offset;
            for dr in [-side, 0, side] {
                for dc in [-side, 0, side] {
                    if dr != 0 || dc != 0 {
                        best.consider(ctx, (row + dr, col + dc), state);
                    }
                }
            }
            if side <= 1 || best.error < threshold {
                break;
            }
            side /= 2;
        }

        ctx.leaf(best)
    }
}
