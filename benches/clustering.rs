use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use image::{Rgb, RgbImage};
use kmeans_color_scan::{ColorPoint, KMeans, PaletteBuilder, ScanConfig};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

fn bench_kmeans(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans");

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let points: Vec<ColorPoint> = (0..5000)
        .map(|_| ColorPoint::from(rng.random::<[u8; 3]>()))
        .collect();

    group.bench_function("cluster_n5000_k8", |b| {
        b.iter(|| {
            KMeans::new(8)
                .with_max_iterations(20)
                .cluster(black_box(&points))
                .unwrap();
        })
    });

    let img = RgbImage::from_fn(512, 512, |x, y| Rgb([(x / 2) as u8, (y / 2) as u8, ((x + y) / 4) as u8]));
    group.bench_function("color_stats_512px_stride10", |b| {
        b.iter(|| {
            PaletteBuilder::new(ScanConfig::default())
                .color_stats(black_box(&img))
                .unwrap();
        })
    });

    group.finish();
}

criterion_group!(benches, bench_kmeans);
criterion_main!(benches);
