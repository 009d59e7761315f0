mod brute_force;
mod cross;
mod orthonormal;
mod pattern;
mod rs3d;
mod three_step;


use std::{fmt::Debug, num::NonZeroUsize};

pub use brute_force::BruteForceSearch;
pub use cross::CrossSearch;
pub use orthonormal::OrthonormalSearch;
pub use pattern::PatternSearch;
pub use rs3d::Rs3dSearch;
pub use three_step::ThreeStepSearch;

use crate::{
    frame::FrameView,
    metric::block_ssd,
    mv::{MotionVector, RefVariant, UNATTAINABLE_ERROR, quadrant_offsets},
    params::{BLOCK_SIZE, SearchKind, SearchParams},
};

/// A displacement relative to the block's own position, with its error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub offset: (isize, isize),
    pub error: u64,
}

impl Candidate {
    #[must_use]
    pub fn unattainable(offset: (isize, isize)) -> Self {
        Self {
            offset,
            error: UNATTAINABLE_ERROR,
        }
    }

    /// Evaluates the block at `offset` and adopts it if it strictly improves
    /// on the current error. Returns whether it was adopted.
    pub fn consider(
        &mut self,
        ctx: &SearchContext<'_>,
        offset: (isize, isize),
        state: &mut SearchState,
    ) -> bool {
        let error = ctx.evaluate(offset, self.error, state);
        if error < self.error {
            self.offset = offset;
            self.error = error;
            true
        } else {
            false
        }
    }
}

/// Mutable state of a search session, owned by the estimator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Metric evaluations since the last reset.
    pub evaluations: u64,
    /// Next entry of the 3DRS fluctuation table.
    pub fluctuation: usize,
}

/// Everything a strategy needs to search one block.
#[derive(Debug, Clone, Copy)]
pub struct SearchContext<'a> {
    pub reference: FrameView<'a>,
    pub current: FrameView<'a>,
    pub row: usize,
    pub col: usize,
    pub block_size: NonZeroUsize,
    pub params: &'a SearchParams,
    /// Split threshold for a 16×16 block.
    pub split_threshold: u64,
    pub variant: RefVariant,
}

impl<'a> SearchContext<'a> {
    /// Error of the reference block displaced by `offset`, pruned at `bound`.
    pub fn evaluate(&self, offset: (isize, isize), bound: u64, state: &mut SearchState) -> u64 {
        state.evaluations += 1;
        let row = self.row as isize;
        let col = self.col as isize;
        block_ssd(
            &self.reference,
            row + offset.0,
            col + offset.1,
            &self.current,
            row,
            col,
            self.block_size,
            bound,
        )
    }

    /// Leaf for `candidate`, stamped with this context's variant.
    #[must_use]
    pub fn leaf(&self, candidate: Candidate) -> MotionVector {
        MotionVector::leaf(
            self.row as isize + candidate.offset.0,
            self.col as isize + candidate.offset.1,
            candidate.error,
            self.variant,
        )
    }

    /// `threshold` brought to this block's area.
    #[must_use]
    pub fn scaled(&self, threshold: u64) -> u64 {
        SearchParams::scaled(threshold, self.block_size.get())
    }

    /// Whether an error this high calls for splitting the block.
    #[must_use]
    pub fn should_split(&self, error: u64) -> bool {
        self.block_size.get() >= BLOCK_SIZE && error > self.scaled(self.split_threshold)
    }

    /// Contexts of the four quadrants, in split order.
    #[must_use]
    pub fn quadrants(&self) -> [SearchContext<'a>; 4] {
        let half = self.block_size.get() / 2;
        quadrant_offsets(self.block_size.get()).map(|(dr, dc)| SearchContext {
            row: self.row + dr,
            col: self.col + dc,
            // half of a size of at least BLOCK_SIZE
            block_size: NonZeroUsize::new(half).unwrap_or(NonZeroUsize::MIN),
            ..*self
        })
    }
}

/// Finds the best displacement for one block.
pub trait BlockSearch: Debug {
    /// Searches around `start`. `start.error` is the error already known for
    /// `start.offset`, or [`UNATTAINABLE_ERROR`] when it has not been
    /// evaluated. Only strict improvements are adopted.
    fn search(
        &self,
        ctx: &SearchContext<'_>,
        start: Candidate,
        state: &mut SearchState,
    ) -> MotionVector;
}

impl SearchKind {
    #[must_use]
    pub fn create_search(self) -> Box<dyn BlockSearch + Send> {
        match self {
            SearchKind::BruteForce => Box::new(BruteForceSearch),
            SearchKind::Cross => Box::new(CrossSearch),
            SearchKind::ThreeStep => Box::new(ThreeStepSearch),
            SearchKind::Orthonormal => Box::new(OrthonormalSearch),
            SearchKind::Diamond => Box::new(PatternSearch::DIAMOND),
            SearchKind::Hexagon => Box::new(PatternSearch::HEXAGON),
            SearchKind::Rs3d => Box::new(Rs3dSearch),
        }
    }
}
