//! 工具函数性能基准测试

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use tinylink::utils::url_validator::validate_url;
use tinylink::utils::{generate_random_code, is_valid_slug};

fn bench_generate_random_code(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/generate_random_code");

    for len in [4usize, 6, 8, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter(|| generate_random_code(black_box(len)));
        });
    }

    group.finish();
}

fn bench_is_valid_slug(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/is_valid_slug");

    group.bench_function("valid", |b| {
        b.iter(|| assert!(is_valid_slug(black_box("my-link_01"))));
    });

    group.bench_function("invalid_chars", |b| {
        b.iter(|| assert!(!is_valid_slug(black_box("'; DROP TABLE--"))));
    });

    let too_long = "a".repeat(17);
    group.bench_function("invalid_too_long", |b| {
        b.iter(|| assert!(!is_valid_slug(black_box(&too_long))));
    });

    group.finish();
}

fn bench_validate_url(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/validate_url");

    group.bench_function("simple", |b| {
        b.iter(|| validate_url(black_box("https://example.com")).is_ok());
    });

    group.bench_function("with_query", |b| {
        b.iter(|| {
            validate_url(black_box(
                "https://example.com/a/b/c?utm_source=newsletter&id=42#top",
            ))
            .is_ok()
        });
    });

    group.bench_function("dangerous_scheme", |b| {
        b.iter(|| validate_url(black_box("javascript:alert(1)")).is_err());
    });

    let long_url = format!("https://example.com/{}", "x".repeat(2100));
    group.bench_function("too_long", |b| {
        b.iter(|| validate_url(black_box(&long_url)).is_err());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_generate_random_code,
    bench_is_valid_slug,
    bench_validate_url
);
criterion_main!(benches);
