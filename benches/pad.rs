use std::{hint::black_box, num::NonZeroUsize};

use criterion::{Criterion, criterion_group, criterion_main};
use me_estimator::pad::{BORDER_MARGIN, pad_reference_frame};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro128StarStar;

pub fn bench_pad_reference_frame(c: &mut Criterion) {
    c.bench_function("pad_reference_frame 256x256", |b| {
        let mut rng = Xoshiro128StarStar::from_seed(*b"deadbeeflolcakes");
        let resolution = NonZeroUsize::new(256).unwrap();
        let alloc_height = resolution.saturating_add(2 * BORDER_MARGIN);
        let pitch = resolution.saturating_add(2 * BORDER_MARGIN);
        let offset = 0;
        let mut plane = vec![0u8; pitch.get() * alloc_height.get()];

        for p in plane.iter_mut() {
            *p = rng.random();
        }

        b.iter(|| {
            pad_reference_frame(
                black_box(offset),
                black_box(pitch),
                black_box(BORDER_MARGIN),
                black_box(resolution),
                black_box(resolution),
                black_box(&mut plane),
            )
        })
    });
}

criterion_group!(bench_pad, bench_pad_reference_frame);
criterion_main!(bench_pad);
