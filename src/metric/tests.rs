#![allow(clippy::unwrap_used, reason = "allow in test files")]

use std::num::NonZeroUsize;

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro128StarStar;

use super::block_ssd;
use crate::{frame::FrameView, mv::UNATTAINABLE_ERROR};

fn nz(value: usize) -> NonZeroUsize {
    NonZeroUsize::new(value).unwrap()
}

fn random_frame(width: usize, height: usize, seed: u8) -> Vec<u8> {
    let mut rng = Xoshiro128StarStar::from_seed([seed; 16]);
    (0..width * height).map(|_| rng.random()).collect()
}

#[test]
fn identical_blocks_have_zero_error() {
    let data = random_frame(48, 48, 1);
    let view = FrameView::new(&data, nz(48), nz(48)).unwrap();
    for (row, col) in [(0, 0), (16, 16), (32, 32), (5, 27)] {
        assert_eq!(block_ssd(&view, row, col, &view, row, col, nz(16), UNATTAINABLE_ERROR), 0);
    }
}

#[quickcheck]
fn self_comparison_is_zero_anywhere(row: u8, col: u8, seed: u8) -> TestResult {
    let (row, col) = (row as isize, col as isize);
    let data = random_frame(64, 64, seed);
    let view = FrameView::new(&data, nz(64), nz(64)).unwrap();
    if !view.contains(row, col, 8) {
        return TestResult::discard();
    }
    TestResult::from_bool(block_ssd(&view, row, col, &view, row, col, nz(8), UNATTAINABLE_ERROR) == 0)
}

#[test]
fn exact_ssd_below_bound() {
    let domain = vec![10u8; 16 * 16];
    let rank = vec![13u8; 16 * 16];
    let domain = FrameView::new(&domain, nz(16), nz(16)).unwrap();
    let rank = FrameView::new(&rank, nz(16), nz(16)).unwrap();
    assert_eq!(block_ssd(&domain, 0, 0, &rank, 0, 0, nz(16), UNATTAINABLE_ERROR), 9 * 256);
    assert_eq!(block_ssd(&domain, 0, 0, &rank, 0, 0, nz(16), 9 * 256 + 1), 9 * 256);
}

#[test]
fn reaching_bound_returns_sentinel() {
    let domain = vec![10u8; 16 * 16];
    let rank = vec![13u8; 16 * 16];
    let domain = FrameView::new(&domain, nz(16), nz(16)).unwrap();
    let rank = FrameView::new(&rank, nz(16), nz(16)).unwrap();
    assert_eq!(block_ssd(&domain, 0, 0, &rank, 0, 0, nz(16), 9 * 256), UNATTAINABLE_ERROR);
    assert_eq!(block_ssd(&domain, 0, 0, &rank, 0, 0, nz(16), 1), UNATTAINABLE_ERROR);
}

#[test]
fn out_of_bounds_domain_returns_sentinel() {
    let data = random_frame(32, 32, 7);
    let view = FrameView::new(&data, nz(32), nz(32)).unwrap();
    for (row, col) in [(-1, 0), (0, -1), (17, 0), (0, 17), (-16, -16), (32, 32)] {
        assert_eq!(
            block_ssd(&view, row, col, &view, 0, 0, nz(16), UNATTAINABLE_ERROR),
            UNATTAINABLE_ERROR,
            "({row}, {col})"
        );
    }
}

#[test]
fn margin_makes_outside_positions_reachable() {
    let margin = 16;
    let pitch = 32 + 2 * margin;
    let data = vec![50u8; pitch * pitch];
    let origin = margin * pitch + margin;
    let padded = FrameView::with_margin(&data, origin, nz(pitch), nz(32), nz(32), margin).unwrap();
    let rank = vec![50u8; 32 * 32];
    let rank = FrameView::new(&rank, nz(32), nz(32)).unwrap();

    assert_eq!(block_ssd(&padded, -16, -16, &rank, 0, 0, nz(16), UNATTAINABLE_ERROR), 0);
    assert_eq!(block_ssd(&padded, 32, 32, &rank, 0, 0, nz(16), UNATTAINABLE_ERROR), 0);
    assert_eq!(
        block_ssd(&padded, 33, 0, &rank, 0, 0, nz(16), UNATTAINABLE_ERROR),
        UNATTAINABLE_ERROR
    );
}

#[test]
fn blocks_are_compared_at_their_own_positions() {
    let mut domain = vec![0u8; 32 * 32];
    for row in 8..24 {
        for col in 4..20 {
            domain[row * 32 + col] = 200;
        }
    }
    let mut rank = vec![0u8; 32 * 32];
    for row in 16..32 {
        for col in 16..32 {
            rank[row * 32 + col] = 200;
        }
    }
    let domain = FrameView::new(&domain, nz(32), nz(32)).unwrap();
    let rank = FrameView::new(&rank, nz(32), nz(32)).unwrap();

    assert_eq!(block_ssd(&domain, 8, 4, &rank, 16, 16, nz(16), UNATTAINABLE_ERROR), 0);
    assert!(block_ssd(&domain, 8, 5, &rank, 16, 16, nz(16), UNATTAINABLE_ERROR) > 0);
}
