//! Template parsing benchmarks.
//!
//! Run with: `cargo bench -p pactum-route`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pactum_route::{parse_path, RouteTemplate};

fn bench_static_template(c: &mut Criterion) {
    c.bench_function("static_template", |b| {
        b.iter(|| RouteTemplate::parse(black_box("/api/v1/health/live")));
    });
}

fn bench_converter_template(c: &mut Criterion) {
    let template = "/api/v1/org/<uuid:org>/items/<int(min=1, max=1000):id>/<any(json, xml):fmt>";

    c.bench_function("converter_template", |b| {
        b.iter(|| parse_path(black_box(template), &|_| None));
    });
}

criterion_group!(benches, bench_static_template, bench_converter_template);
criterion_main!(benches);
