use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use gammaincinv::special::{erfc_inv, gamma_inc, gamma_star, lgamma};
use gammaincinv::{lower, upper};

// ---------------------------------------------------------------------------
// One representative input per seeding regime
// ---------------------------------------------------------------------------

fn regimes(c: &mut Criterion) {
    let mut g = c.benchmark_group("inverse_regime");

    g.bench_function("deep_upper_tail", |b| {
        b.iter(|| upper(black_box(1e-35), black_box(0.3)))
    });
    g.bench_function("deep_lower_tail", |b| {
        b.iter(|| lower(black_box(1e-200), black_box(3.0)))
    });
    g.bench_function("near_unit_shape", |b| {
        b.iter(|| lower(black_box(1e-4), black_box(1.0001)))
    });
    g.bench_function("small_ratio", |b| {
        b.iter(|| lower(black_box(0.01), black_box(2.0)))
    });
    g.bench_function("small_shape_upper_tail", |b| {
        b.iter(|| upper(black_box(1e-4), black_box(2.0)))
    });
    g.bench_function("near_median", |b| {
        b.iter(|| lower(black_box(0.5), black_box(200.0)))
    });
    g.bench_function("small_shape", |b| {
        b.iter(|| lower(black_box(0.9), black_box(0.5)))
    });
    g.bench_function("asymptotic", |b| {
        b.iter(|| lower(black_box(0.8), black_box(20.0)))
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Inversion cost against shape
// ---------------------------------------------------------------------------

fn shape_sweep(c: &mut Criterion) {
    let mut g = c.benchmark_group("inverse_shape");

    for &a in &[0.5_f64, 5.0, 50.0, 500.0, 5000.0] {
        g.bench_function(format!("lower_a{a}"), |b| {
            b.iter(|| lower(black_box(0.3), black_box(a)))
        });
    }

    g.finish();
}

// ---------------------------------------------------------------------------
// Building blocks
// ---------------------------------------------------------------------------

fn special(c: &mut Criterion) {
    let mut g = c.benchmark_group("special");

    g.bench_function("gamma_inc", |b| {
        b.iter(|| gamma_inc(black_box(20.0_f64), black_box(18.0)))
    });
    g.bench_function("gamma_star", |b| {
        b.iter(|| gamma_star(black_box(7.5_f64)))
    });
    g.bench_function("lgamma", |b| b.iter(|| lgamma(black_box(42.3_f64))));
    g.bench_function("erfc_inv", |b| b.iter(|| erfc_inv(black_box(0.01_f64))));

    g.finish();
}

criterion_group!(benches, regimes, shape_sweep, special);
criterion_main!(benches);
