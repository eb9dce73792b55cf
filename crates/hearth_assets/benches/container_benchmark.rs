//! Benchmark for the container codec.
//!
//! Run with: cargo bench --package hearth_assets --bench container_benchmark

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hearth_assets::{compress, decompress, ContainerConfig, LevelAsset, TypedAsset};
use hearth_core::{Actor, Sector, Vec2};

/// Semi-repetitive payload, close to what level files look like.
fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| ((i * 31) % 97) as u8).collect()
}

fn benchmark_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("container_compress");

    for len in [4 * 1024, 256 * 1024, 4 * 1024 * 1024] {
        let data = payload(len);
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &data, |b, data| {
            let config = ContainerConfig::default();
            b.iter(|| black_box(compress(black_box(data), 3, &config).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("container_decompress");

    for len in [4 * 1024, 256 * 1024, 4 * 1024 * 1024] {
        let bytes = compress(&payload(len), 3, &ContainerConfig::default()).unwrap();
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &bytes, |b, bytes| {
            b.iter(|| black_box(decompress(black_box(bytes)).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_compression_levels(c: &mut Criterion) {
    let data = payload(1024 * 1024);
    let mut group = c.benchmark_group("compression_level");
    group.throughput(Throughput::Bytes(data.len() as u64));

    for level in [1u32, 6, 9] {
        let config = ContainerConfig {
            compression_level: level,
            ..ContainerConfig::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(level), &config, |b, config| {
            b.iter(|| black_box(compress(&data, 3, config).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_level_roundtrip(c: &mut Criterion) {
    let sectors = (0..256)
        .map(|i| {
            let x = i as f32 * 10.0;
            Sector::from_points(vec![
                Vec2::new(x, 0.0),
                Vec2::new(x + 8.0, 0.0),
                Vec2::new(x + 8.0, 8.0),
                Vec2::new(x, 8.0),
            ])
        })
        .collect();
    let actors = (0..512)
        .map(|i| {
            let mut actor = Actor::new("light", format!("light_{i}"));
            actor.set_param("radius", i as f32);
            actor
        })
        .collect();
    let level = LevelAsset {
        name: "bench".into(),
        sectors,
        actors,
        ..LevelAsset::default()
    };
    let config = ContainerConfig::default();

    c.bench_function("level_encode_decode", |b| {
        b.iter(|| {
            let bytes = level.to_container_bytes(&config).unwrap();
            black_box(LevelAsset::from_container_bytes(&bytes).unwrap())
        });
    });
}

criterion_group!(
    benches,
    benchmark_compress,
    benchmark_decompress,
    benchmark_compression_levels,
    benchmark_level_roundtrip,
);
criterion_main!(benches);
