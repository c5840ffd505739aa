extern crate bitgame;
extern crate criterion;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bitgame::byte::{notation, Byte, Mask};
use bitgame::solve;

fn bench_canonicalize(c: &mut Criterion) {
    c.bench_function("canonicalize(101)", |b| {
        b.iter(|| notation::canonicalize(black_box("101")))
    });
}

fn bench_shifts(c: &mut Criterion) {
    c.bench_function("arithmetic_shift_right", |b| {
        let byte = Byte::from_bits(0b1011_1000);
        b.iter(|| black_box(byte).arithmetic_shift_right(1))
    });
    c.bench_function("and_mask", |b| {
        let byte = Byte::from_bits(0b1101_1010);
        let mask = Mask::from_bits(0b1011_1001);
        b.iter(|| black_box(byte).and_mask(mask))
    });
}

criterion_group!(byte, bench_canonicalize, bench_shifts);

fn bench_classify_all(c: &mut Criterion) {
    c.bench_function("classify_single_step(all pairs)", |b| {
        b.iter(|| {
            let mut two_step = 0;
            for start in 0..=255u8 {
                for target in 0..=255u8 {
                    let class = solve::classify_single_step(
                        Byte::from_bits(target),
                        Byte::from_bits(start),
                    );
                    if !class.is_single_step() {
                        two_step += 1;
                    }
                }
            }
            black_box(two_step)
        })
    });
}

fn bench_solve(c: &mut Criterion) {
    c.bench_function("solve", |b| {
        let start = Byte::from_bits(0b1011_1000);
        let target = Byte::from_bits(0b1110_0000);
        b.iter(|| solve::solve(black_box(target), black_box(start)))
    });
}

criterion_group!(solver, bench_classify_all, bench_solve);
criterion_main!(byte, solver);
