
use std::{mem, num::NonZeroUsize};

use anyhow::{Result, bail};
use log::{debug, trace};
use smallvec::SmallVec;

use crate::{
    frame::FrameView,
    mv::{MotionVector, RefVariant, UNATTAINABLE_ERROR, quadrant_offsets},
    params::{BLOCK_SIZE, BLOCK_SIZE_NZ, EstimatorConfig},
    predictor::CandidatePredictor,
    reference::ReferencePlane,
    search::{BlockSearch, Candidate, SearchContext, SearchState},
    util::blit,
};

/// Counters for the most recent [`MotionEstimator::estimate`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EstimateStats {
    pub blocks: usize,
    /// Blocks whose vector is a quad-tree split.
    pub splits: usize,
    /// Blocks settled by a predicted candidate without searching.
    pub candidates_accepted: usize,
    /// Block metric evaluations.
    pub evaluations: u64,
}

/// Block motion estimator for one stream of frames.
///
/// Each [`MotionEstimator::estimate`] call computes a vector per 16×16 block
/// of the current frame, and the previous call's vectors feed the candidate
/// predictor. [`MotionEstimator::remap`] rebuilds a frame from the latest
/// vectors. Calls on one instance must not overlap.
#[derive(Debug)]
pub struct MotionEstimator {
    config: EstimatorConfig,
    search: Box<dyn BlockSearch + Send>,
    /// Vectors the latest call predicted from, empty before the second call.
    previous: Vec<MotionVector>,
    /// Vectors of the latest call, in raster block order. The next call
    /// predicts from these.
    current: Vec<MotionVector>,
    state: SearchState,
    stats: EstimateStats,
}

impl MotionEstimator {
    pub fn new(width: usize, height: usize, quality: i64, use_half_pixel: bool) -> Result<Self> {
        Ok(Self::with_config(EstimatorConfig::new(
            width,
            height,
            quality,
            use_half_pixel,
        )?))
    }

    #[must_use]
    pub fn with_config(config: EstimatorConfig) -> Self {
        Self {
            search: config.search.create_search(),
            config,
            previous: Vec::new(),
            current: Vec::new(),
            state: SearchState::default(),
            stats: EstimateStats::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Vectors of the latest [`MotionEstimator::estimate`] call, one per
    /// block in raster order.
    #[must_use]
    pub fn motion_vectors(&self) -> &[MotionVector] {
        &self.current
    }

    /// Vectors the latest call used for prediction.
    #[must_use]
    pub fn previous_motion_vectors(&self) -> &[MotionVector] {
        &self.previous
    }

    #[must_use]
    pub fn last_stats(&self) -> EstimateStats {
        self.stats
    }

    pub fn set_search_kind(&mut self, kind: i64) -> Result<()> {
        self.config.set_search_kind(kind)?;
        self.search = self.config.search.create_search();
        debug!("search strategy set to {:?}", self.config.search);
        Ok(())
    }

    pub fn set_cross_side(&mut self, side: usize) -> Result<()> {
        self.config.set_cross_side(side)?;
        debug!("cross search side set to {side}");
        Ok(())
    }

    pub fn set_cross_threshold(&mut self, threshold: u64) {
        self.config.set_cross_threshold(threshold);
        debug!("cross search threshold set to {threshold}");
    }

    pub fn set_border_extension(&mut self, enabled: bool) {
        self.config.set_border_extension(enabled);
        debug!("border extension {}", if enabled { "enabled" } else { "disabled" });
    }

    /// Estimates motion from `previous` to `current`, both tightly packed
    /// `width * height` luma buffers.
    ///
    /// On success the vectors of the last call become the prediction history
    /// and the new vectors are available from
    /// [`MotionEstimator::motion_vectors`]. On failure nothing changes.
    pub fn estimate(&mut self, previous: &[u8], current: &[u8]) -> Result<()> {
        let previous = self.frame_view("Estimate", "previous", previous)?;
        let current = self.frame_view("Estimate", "current", current)?;
        let plane = ReferencePlane::build(&previous, self.config.margin(), self.config.half_pixel())?;
        let references = plane
            .variants()
            .iter()
            .map(|&variant| plane.view(variant).map(|view| (variant, view)))
            .collect::<Result<SmallVec<[_; 4]>>>()?;

        let blocks_x = self.config.blocks_x();
        let blocks_y = self.config.blocks_y();
        let mut stats = EstimateStats::default();
        self.state.evaluations = 0;

        let mut next = Vec::with_capacity(blocks_x * blocks_y);
        for block_row in 0..blocks_y {
            for block_col in 0..blocks_x {
                let row = block_row * BLOCK_SIZE;
                let col = block_col * BLOCK_SIZE;
                let predictor = CandidatePredictor::new(&self.current, &next, blocks_x, blocks_y);
                let mv = find_block(
                    self.search.as_ref(),
                    &predictor,
                    &references,
                    current,
                    row,
                    col,
                    &self.config,
                    &mut self.state,
                    &mut stats,
                );
                trace!(
                    "block ({row}, {col}): error {}, split {}",
                    mv.error(),
                    mv.is_split()
                );
                next.push(mv);
            }
        }

        stats.blocks = next.len();
        stats.splits = next.iter().filter(|mv| mv.is_split()).count();
        stats.evaluations = self.state.evaluations;
        debug!(
            "estimated {} blocks: {} split, {} predicted, {} evaluations",
            stats.blocks, stats.splits, stats.candidates_accepted, stats.evaluations
        );

        self.previous = mem::replace(&mut self.current, next);
        self.stats = stats;
        Ok(())
    }

    /// Rebuilds the current frame from `previous` using the latest vectors.
    ///
    /// Pixels outside the block grid are copied from `previous` unchanged.
    pub fn remap(&self, previous: &[u8]) -> Result<Vec<u8>> {
        if self.current.is_empty() {
            bail!("Remap: no motion vectors, call Estimate first");
        }
        let previous_view = self.frame_view("Remap", "previous", previous)?;
        let plane =
            ReferencePlane::build(&previous_view, self.config.margin(), self.config.half_pixel())?;

        let mut output = previous.to_vec();
        let blocks_x = self.config.blocks_x();
        for (index, mv) in self.current.iter().enumerate() {
            let row = index / blocks_x * BLOCK_SIZE;
            let col = index % blocks_x * BLOCK_SIZE;
            assign_block(
                &plane,
                &mut output,
                self.config.width,
                row,
                col,
                BLOCK_SIZE_NZ,
                mv,
            )?;
        }

        Ok(output)
    }

    fn frame_view<'a>(&self, op: &str, name: &str, data: &'a [u8]) -> Result<FrameView<'a>> {
        let expected = self.config.frame_len();
        if data.len() != expected {
            bail!(
                "{op}: {name} frame has {} bytes, expected {expected}",
                data.len()
            );
        }
        FrameView::new(data, self.config.width, self.config.height)
    }
}

/// Best vector for the block at (`row`, `col`) over every reference variant.
fn find_block(
    search: &dyn BlockSearch,
    predictor: &CandidatePredictor<'_>,
    references: &[(RefVariant, FrameView<'_>)],
    current: FrameView<'_>,
    row: usize,
    col: usize,
    config: &EstimatorConfig,
    state: &mut SearchState,
    stats: &mut EstimateStats,
) -> MotionVector {
    let mut best: Option<MotionVector> = None;
    for &(variant, reference) in references {
        let ctx = SearchContext {
            reference,
            current,
            row,
            col,
            block_size: BLOCK_SIZE_NZ,
            params: &config.params,
            split_threshold: config.split_threshold(),
            variant,
        };

        let candidate = predictor.predict(&ctx, state);
        let accepted = candidate.error < config.params.candidate_threshold;
        let mv = if accepted {
            ctx.leaf(candidate)
        } else {
            search.search(&ctx, Candidate::unattainable(candidate.offset), state)
        };

        if best.as_ref().is_none_or(|best| mv.error() < best.error()) {
            best = Some(mv);
        }
        if accepted {
            stats.candidates_accepted += 1;
            break;
        }
    }

    // the original frame is always among the references
    best.unwrap_or_else(|| {
        MotionVector::leaf(row as isize, col as isize, UNATTAINABLE_ERROR, RefVariant::Original)
    })
}

/// Copies the reference blocks `mv` points at into `output` at (`row`, `col`).
fn assign_block(
    plane: &ReferencePlane,
    output: &mut [u8],
    width: NonZeroUsize,
    row: usize,
    col: usize,
    size: NonZeroUsize,
    mv: &MotionVector,
) -> Result<()> {
    match mv {
        MotionVector::Leaf(leaf) => {
            let reference = plane.view(leaf.reference)?;
            if !reference.contains(leaf.row, leaf.col, size.get()) {
                bail!(
                    "Remap: block at ({row}, {col}) points outside of the reference at ({}, {})",
                    leaf.row,
                    leaf.col
                );
            }
            blit(
                &mut output[row * width.get() + col..],
                width,
                reference.tail(leaf.row, leaf.col),
                reference.pitch(),
                size,
                size,
            );
        }
        MotionVector::Split(children, _) => {
            let Some(half) = NonZeroUsize::new(size.get() / 2) else {
                bail!("Remap: block at ({row}, {col}) of size {size} cannot be split");
            };
            for (child, (dr, dc)) in children.iter().zip(quadrant_offsets(size.get())) {
                assign_block(plane, output, width, row + dr, col + dc, half, child)?;
            }
        }
    }
    Ok(())
}
