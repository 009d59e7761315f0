use super::{BlockSearch, Candidate, SearchContext, SearchState};
use crate::mv::MotionVector;

/// Large-pattern descent followed by one small-pattern refinement, with
/// adaptive quad-tree splitting. Diamond and hexagon searches differ only in
/// their patterns and in whether the static fast path is taken.
#[derive(Debug, Clone, Copy)]
pub struct PatternSearch {
    large: &'static [(isize, isize)],
    small: &'static [(isize, isize)],
    static_path: bool,
}

// (-1, 0) is listed twice and (1, 0) never probed; kept as established.
const SMALL_CROSS: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (-1, 0)];

const LARGE_DIAMOND: [(isize, isize); 8] = [
    (-2, 0),
    (2, 0),
    (0, -2),
    (0, 2),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

const LARGE_HEXAGON: [(isize, isize); 6] = [(0, -2), (0, 2), (-2, -1), (-2, 1), (2, -1), (2, 1)];

impl PatternSearch {
    pub const DIAMOND: Self = Self {
        large: &LARGE_DIAMOND,
        small: &SMALL_CROSS,
        static_path: true,
    };

    pub const HEXAGON: Self = Self {
        large: &LARGE_HEXAGON,
        small: &SMALL_CROSS,
        static_path: false,
    };

    /// One round of `pattern` around the current best offset. Afterwards
    /// `best` holds the lowest strictly improving point, if any.
    fn round(
        pattern: &[(isize, isize)],
        ctx: &SearchContext<'_>,
        best: &mut Candidate,
        state: &mut SearchState,
    ) -> bool {
        let (row, col) = best.offset;
        let mut improved = false;
        for &(dr, dc) in pattern {
            improved |= best.consider(ctx, (row + dr, col + dc), state);
        }
        improved
    }
}

impl BlockSearch for PatternSearch {
    fn search(
        &self,
        ctx: &SearchContext<'_>,
        start: Candidate,
        state: &mut SearchState,
    ) -> MotionVector {
        let mut best = start;
        best.consider(ctx, start.offset, state);

        if self.static_path && best.error < ctx.scaled(ctx.params.static_threshold) {
            return ctx.leaf(best);
        }

        let stop = ctx.scaled(ctx.params.stop_threshold);
        for _ in 0..ctx.params.pattern_rounds {
            if !Self::round(self.large, ctx, &mut best, state) {
                break;
            }
            if best.error <= stop {
                return ctx.leaf(best);
            }
        }

        Self::round(self.small, ctx, &mut best, state);

        if ctx.should_split(best.error) {
            let children = ctx
                .quadrants()
                .map(|quadrant| self.search(&quadrant, Candidate::unattainable(best.offset), state));
            let split = MotionVector::split(children);
            if split.error() < best.error {
                return split.with_reference(ctx.variant);
            }
        }

        ctx.leaf(best)
    }
}
