#![allow(clippy::unwrap_used, reason = "allow in test files")]

use std::num::NonZeroUsize;

use super::CandidatePredictor;
use crate::{
    frame::FrameView,
    mv::{MotionVector, RefVariant, UNATTAINABLE_ERROR},
    params::SearchParams,
    search::{SearchContext, SearchState},
};

const SIZE: usize = 64;
const BLOCKS: usize = SIZE / 16;

fn nz(value: usize) -> NonZeroUsize {
    NonZeroUsize::new(value).unwrap()
}

/// A smooth frame and the same frame moved three columns to the left.
fn frames() -> (Vec<u8>, Vec<u8>) {
    let previous: Vec<u8> = (0..SIZE * SIZE)
        .map(|i| ((i / SIZE) + 3 * (i % SIZE)) as u8)
        .collect();
    let mut current = previous.clone();
    for row in 0..SIZE {
        for col in 0..SIZE - 3 {
            current[row * SIZE + col] = previous[row * SIZE + col + 3];
        }
    }
    (previous, current)
}

/// Leaves for every block, displaced by `offset`.
fn grid(offset: (isize, isize)) -> Vec<MotionVector> {
    (0..BLOCKS * BLOCKS)
        .map(|i| {
            let (row, col) = ((i / BLOCKS * 16) as isize, (i % BLOCKS * 16) as isize);
            MotionVector::leaf(row + offset.0, col + offset.1, 0, RefVariant::Original)
        })
        .collect()
}

fn split_grid() -> Vec<MotionVector> {
    let leaf = MotionVector::leaf(0, 0, 0, RefVariant::Original);
    vec![MotionVector::split([leaf.clone(), leaf.clone(), leaf.clone(), leaf]); BLOCKS * BLOCKS]
}

fn with_context<F>(row: usize, col: usize, f: F)
where
    F: FnOnce(&SearchContext<'_>),
{
    let (previous, current) = frames();
    let params = SearchParams::default();
    let ctx = SearchContext {
        reference: FrameView::new(&previous, nz(SIZE), nz(SIZE)).unwrap(),
        current: FrameView::new(&current, nz(SIZE), nz(SIZE)).unwrap(),
        row,
        col,
        block_size: nz(16),
        params: &params,
        split_threshold: 1024,
        variant: RefVariant::Original,
    };
    f(&ctx);
}

#[test]
fn no_history_is_unattainable() {
    with_context(16, 16, |ctx| {
        let current = grid((0, 3));
        let mut state = SearchState::default();
        let candidate = CandidatePredictor::new(&[], &current[..5], BLOCKS, BLOCKS).predict(ctx, &mut state);
        assert_eq!(candidate.error, UNATTAINABLE_ERROR);
        assert_eq!(candidate.offset, (0, 0));
        assert_eq!(state.evaluations, 0);
    });
}

#[test]
fn previous_neighbours_are_recentred() {
    with_context(16, 16, |ctx| {
        let previous = grid((0, 3));
        let mut state = SearchState::default();
        let candidate = CandidatePredictor::new(&previous, &[], BLOCKS, BLOCKS).predict(ctx, &mut state);
        assert_eq!(candidate.offset, (0, 3));
        assert_eq!(candidate.error, 0);
        // (2, 0), (2, 2), (3, 3); (3, -1) is off the grid
        assert_eq!(state.evaluations, 3);
    });
}

#[test]
fn split_and_out_of_grid_neighbours_are_skipped() {
    with_context(16, 16, |ctx| {
        let previous = split_grid();
        let mut state = SearchState::default();
        let candidate = CandidatePredictor::new(&previous, &[], BLOCKS, BLOCKS).predict(ctx, &mut state);
        assert_eq!(candidate.error, UNATTAINABLE_ERROR);
        assert_eq!(state.evaluations, 0);
    });
}

#[test]
fn current_neighbours_are_used() {
    with_context(16, 16, |ctx| {
        let previous = split_grid();
        // blocks (0, 0) .. (1, 0) are decided
        let current = grid((0, 3));
        let mut state = SearchState::default();
        let candidate =
            CandidatePredictor::new(&previous, &current[..5], BLOCKS, BLOCKS).predict(ctx, &mut state);
        assert_eq!(candidate.offset, (0, 3));
        assert_eq!(candidate.error, 0);
        assert_eq!(state.evaluations, 2);
    });
}

#[test]
fn undecided_current_blocks_are_skipped() {
    with_context(16, 16, |ctx| {
        let previous = split_grid();
        let current = grid((0, 3));
        let mut state = SearchState::default();
        let candidate =
            CandidatePredictor::new(&previous, &current[..1], BLOCKS, BLOCKS).predict(ctx, &mut state);
        assert_eq!(candidate.offset, (0, 3));
        assert_eq!(state.evaluations, 1);
    });
}

#[test]
fn lowest_error_neighbour_wins() {
    with_context(16, 16, |ctx| {
        let mut previous = grid((0, 1));
        // block (2, 2) carries the exact displacement
        previous[2 * BLOCKS + 2] = MotionVector::leaf(32, 35, 0, RefVariant::Up);
        let mut state = SearchState::default();
        let candidate = CandidatePredictor::new(&previous, &[], BLOCKS, BLOCKS).predict(ctx, &mut state);
        assert_eq!(candidate.offset, (0, 3));
        assert_eq!(candidate.error, 0);
    });
}
