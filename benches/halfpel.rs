use std::{hint::black_box, num::NonZeroUsize};

use criterion::{Criterion, criterion_group, criterion_main};
use me_estimator::halfpel::{HalfPelFn, average_left, average_up, average_up_left};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro128StarStar;

fn bench_halfpel(c: &mut Criterion, name: &str, f: HalfPelFn) {
    c.bench_function(&format!("{name} 640x480"), |b| {
        let mut rng = Xoshiro128StarStar::from_seed(*b"deadbeeflolcakes");
        let width = NonZeroUsize::new(640).unwrap();
        let height = NonZeroUsize::new(480).unwrap();
        let mut src = vec![0u8; width.get() * height.get()];
        let mut dest = vec![0u8; width.get() * height.get()];

        for p in src.iter_mut() {
            *p = rng.random();
        }

        b.iter(|| {
            f(
                black_box(&mut dest),
                black_box(&src),
                black_box(width),
                black_box(width),
                black_box(height),
            )
        })
    });
}

pub fn bench_average_up(c: &mut Criterion) {
    bench_halfpel(c, "average_up", average_up);
}

pub fn bench_average_left(c: &mut Criterion) {
    bench_halfpel(c, "average_left", average_left);
}

pub fn bench_average_up_left(c: &mut Criterion) {
    bench_halfpel(c, "average_up_left", average_up_left);
}

criterion_group!(
    bench_halfpel_averages,
    bench_average_up,
    bench_average_left,
    bench_average_up_left
);
criterion_main!(bench_halfpel_averages);
