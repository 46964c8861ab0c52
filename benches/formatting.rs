use criterion::{Criterion, criterion_group, criterion_main};
use sectlog::MAX_MESSAGE_SIZE;
use sectlog::fmt::{FormatArg, render};
use std::hint::black_box;

fn bench_render_plain(c: &mut Criterion) {
    let args = [
        FormatArg::from("input.dat"),
        FormatArg::from(4096),
        FormatArg::from(0.125),
    ];

    c.bench_function("render plain", |b| {
        b.iter(|| {
            render(
                black_box("file %s: %d entries in %f s"),
                black_box(&args),
                MAX_MESSAGE_SIZE,
            )
        });
    });
}

fn bench_render_time_rewrite(c: &mut Criterion) {
    let args = [FormatArg::from(0.125)];

    // The %t path copies the format string before substitution.
    c.bench_function("render with %t rewrite", |b| {
        b.iter(|| render(black_box("elapsed %t s"), black_box(&args), MAX_MESSAGE_SIZE));
    });
}

fn bench_render_no_specs(c: &mut Criterion) {
    c.bench_function("render literal only", |b| {
        b.iter(|| {
            render(
                black_box("connection established, handshake complete"),
                black_box(&[]),
                MAX_MESSAGE_SIZE,
            )
        });
    });
}

criterion_group!(
    benches,
    bench_render_plain,
    bench_render_time_rewrite,
    bench_render_no_specs
);
criterion_main!(benches);
