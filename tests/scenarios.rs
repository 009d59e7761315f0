#![allow(clippy::unwrap_used, reason = "allow in test files")]

use anyhow::Result;
use me_estimator::{MotionEstimator, MotionVector, RefVariant};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro128StarStar;

fn random_frame(width: usize, height: usize) -> Vec<u8> {
    let mut rng = Xoshiro128StarStar::from_seed(*b"deadbeeflolcakes");
    (0..width * height).map(|_| rng.random()).collect()
}

/// `2 * col + 3 * row`, and the same frame moved two columns to the right
/// with the two uncovered columns zeroed.
fn shifted_gradient(width: usize, height: usize) -> (Vec<u8>, Vec<u8>) {
    let previous: Vec<u8> = (0..height)
        .flat_map(|row| (0..width).map(move |col| (2 * col + 3 * row) as u8))
        .collect();
    let mut current = vec![0u8; width * height];
    for row in 0..height {
        for col in 2..width {
            current[row * width + col] = previous[row * width + col - 2];
        }
    }
    (previous, current)
}

/// Calls `f` with the block origin, side and vector of every leaf.
fn leaves(estimator: &MotionEstimator, mut f: impl FnMut(usize, usize, usize, &me_estimator::Leaf)) {
    let blocks_x = estimator.config().blocks_x();
    for (index, mv) in estimator.motion_vectors().iter().enumerate() {
        mv.for_each_leaf(index / blocks_x * 16, index % blocks_x * 16, 16, &mut f);
    }
}

#[test]
fn flat_frames_take_static_path() -> Result<()> {
    let frame = vec![100u8; 32 * 32];
    let mut estimator = MotionEstimator::new(32, 32, 100, false)?;
    estimator.estimate(&frame, &frame)?;

    assert_eq!(estimator.motion_vectors().len(), 4);
    for (index, mv) in estimator.motion_vectors().iter().enumerate() {
        let (row, col) = ((index / 2 * 16) as isize, (index % 2 * 16) as isize);
        assert_eq!(mv, &MotionVector::leaf(row, col, 0, RefVariant::Original));
    }
    // one evaluation per block
    assert_eq!(estimator.last_stats().evaluations, 4);
    assert_eq!(estimator.remap(&frame)?, frame);
    Ok(())
}

#[test]
fn horizontal_pan_is_tracked() -> Result<()> {
    let (width, height) = (64, 32);
    let (previous, current) = shifted_gradient(width, height);
    let mut estimator = MotionEstimator::new(width, height, 100, false)?;
    estimator.estimate(&previous, &current)?;

    leaves(&estimator, |row, col, size, leaf| {
        assert!(leaf.row >= 0 && leaf.col >= 0, "({row}, {col}): {leaf:?}");
        assert!(leaf.row as usize + size <= height && leaf.col as usize + size <= width);
        if col >= 16 {
            assert_eq!(leaf.offset(row, col), (0, -2), "({row}, {col})");
            assert_eq!(leaf.error, 0);
        }
    });

    let remapped = estimator.remap(&previous)?;
    for row in 0..height {
        assert_eq!(remapped[row * width + 16..][..width - 16], current[row * width + 16..][..width - 16]);
    }
    Ok(())
}

#[test]
fn sharp_edge_is_split() -> Result<()> {
    let current: Vec<u8> = (0..256).map(|i| if i % 16 < 8 { 0 } else { 255 }).collect();
    let previous: Vec<u8> = current.iter().map(|&p| 255 - p).collect();
    let mut estimator = MotionEstimator::new(16, 16, 100, false)?;
    estimator.estimate(&previous, &current)?;

    let MotionVector::Split(children, error) = &estimator.motion_vectors()[0] else {
        panic!("expected a split, got {:?}", estimator.motion_vectors()[0]);
    };
    assert_eq!(*error, children.iter().map(MotionVector::error).sum::<u64>());
    assert_eq!(estimator.last_stats().splits, 1);

    let mut covered = vec![0u8; 256];
    leaves(&estimator, |row, col, size, _| {
        assert_eq!(size, 8);
        for r in row..row + size {
            for c in col..col + size {
                covered[r * 16 + c] += 1;
            }
        }
    });
    assert!(covered.iter().all(|&count| count == 1));
    assert_eq!(estimator.remap(&previous)?, current);
    Ok(())
}

#[test]
fn second_estimate_predicts_from_first() -> Result<()> {
    let frame = random_frame(64, 64);
    let mut estimator = MotionEstimator::new(64, 64, 80, false)?;

    estimator.estimate(&frame, &frame)?;
    let first = estimator.motion_vectors().to_vec();
    assert!(estimator.previous_motion_vectors().is_empty());
    assert_eq!(estimator.last_stats().candidates_accepted, 0);

    estimator.estimate(&frame, &frame)?;
    assert_eq!(estimator.previous_motion_vectors(), first.as_slice());
    assert_eq!(estimator.last_stats().candidates_accepted, 16);
    assert_eq!(estimator.motion_vectors(), first.as_slice());

    let second = estimator.motion_vectors().to_vec();
    let other = random_frame(64, 64).iter().map(|p| p.wrapping_add(1)).collect::<Vec<_>>();
    estimator.estimate(&other, &frame)?;
    assert_eq!(estimator.previous_motion_vectors(), second.as_slice());
    Ok(())
}

#[test]
fn remap_is_idempotent() -> Result<()> {
    let (previous, current) = shifted_gradient(64, 48);
    let mut estimator = MotionEstimator::new(64, 48, 60, true)?;
    estimator.estimate(&previous, &current)?;
    let vectors = estimator.motion_vectors().to_vec();

    let first = estimator.remap(&previous)?;
    let second = estimator.remap(&previous)?;
    assert_eq!(first, second);
    assert_eq!(estimator.motion_vectors(), vectors.as_slice());
    Ok(())
}

#[test]
fn every_strategy_stays_in_bounds() -> Result<()> {
    let (width, height) = (64, 48);
    let (previous, current) = shifted_gradient(width, height);

    for kind in 0..=6 {
        let mut estimator = MotionEstimator::new(width, height, 40, kind % 2 == 0)?;
        estimator.set_search_kind(kind)?;
        estimator.estimate(&previous, &current)?;
        estimator.estimate(&previous, &current)?;

        leaves(&estimator, |_, _, size, leaf| {
            assert!(leaf.error < me_estimator::UNATTAINABLE_ERROR, "kind {kind}");
            assert!(leaf.row >= 0 && leaf.col >= 0, "kind {kind}: {leaf:?}");
            assert!(leaf.row as usize + size <= height && leaf.col as usize + size <= width);
        });
        assert_eq!(estimator.remap(&previous)?.len(), width * height);
    }
    Ok(())
}
