//! 短码编解码性能基准测试

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use urlshrink::codec::{decode, encode, is_valid_code};

// ============== encode 基准测试 ==============

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec/encode");

    for id in [1i64, 62, 3_844, 1_000_000, i64::MAX] {
        group.bench_with_input(BenchmarkId::new("id", id), &id, |b, &id| {
            b.iter(|| encode(black_box(id)).unwrap());
        });
    }

    group.finish();
}

// ============== decode 基准测试 ==============

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec/decode");

    for code in ["1", "10", "4c92", "aZl8N0y58M7"] {
        group.bench_with_input(BenchmarkId::new("code", code), &code, |b, &code| {
            b.iter(|| decode(black_box(code)).unwrap());
        });
    }

    // 溢出在第 11 位才能发现
    group.bench_function("overflow", |b| {
        b.iter(|| assert!(decode(black_box("zzzzzzzzzzz")).is_err()));
    });

    group.finish();
}

// ============== is_valid_code 基准测试 ==============

fn bench_is_valid_code(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec/is_valid_code");

    group.bench_function("valid", |b| {
        b.iter(|| assert!(is_valid_code(black_box("aZl8N0y58M7"))));
    });

    group.bench_function("invalid_symbol", |b| {
        b.iter(|| assert!(!is_valid_code(black_box("'; DROP TABLE--"))));
    });

    group.bench_function("leading_zero", |b| {
        b.iter(|| assert!(!is_valid_code(black_box("0abc"))));
    });

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_is_valid_code);
criterion_main!(benches);
