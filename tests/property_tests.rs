use image::{Rgb, RgbImage};
use kmeans_color_scan::{ColorPoint, KMeans, PaletteBuilder, ScanConfig, build_palette};
use proptest::prelude::*;

fn image_strategy() -> impl Strategy<Value = RgbImage> {
    (1u32..12, 1u32..12).prop_flat_map(|(w, h)| {
        prop::collection::vec(any::<[u8; 3]>(), (w * h) as usize).prop_map(move |pixels| {
            RgbImage::from_fn(w, h, |x, y| Rgb(pixels[(y * w + x) as usize]))
        })
    })
}

fn points_strategy() -> impl Strategy<Value = Vec<ColorPoint>> {
    prop::collection::vec(any::<[u8; 3]>().prop_map(ColorPoint::from), 1..60)
}

proptest! {
    #[test]
    fn prop_counts_cover_every_sample_in_dominance_order(
        img in image_strategy(),
        k in 1usize..7,
        stride in 1u32..4,
        seed in any::<u64>(),
    ) {
        let config = ScanConfig::default()
            .with_cluster_count(k)
            .with_sampling_stride(stride)
            .with_max_iterations(50)
            .with_random_seed(seed);
        let builder = PaletteBuilder::new(config);
        let sampled = builder.scan(&img).unwrap();
        let palette = builder.color_stats(&img).unwrap();

        prop_assert_eq!(palette.len(), k);
        prop_assert_eq!(palette.iter().map(|e| e.count).sum::<usize>(), sampled.len());
        for w in palette.windows(2) {
            prop_assert!(w[0].count >= w[1].count);
        }
    }

    #[test]
    fn prop_clustering_is_deterministic(
        points in points_strategy(),
        k in 1usize..6,
        seed in any::<u64>(),
    ) {
        let model = KMeans::new(k).with_max_iterations(30).with_seed(seed);
        let a = model.cluster(&points).unwrap();
        let b = model.cluster(&points).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(build_palette(&points, a), build_palette(&points, b));
    }

    #[test]
    fn prop_single_cluster_is_the_mean(points in points_strategy(), seed in any::<u64>()) {
        let clusters = KMeans::new(1).with_seed(seed).cluster(&points).unwrap();
        prop_assert_eq!(clusters.len(), 1);
        prop_assert_eq!(clusters[0].len(), points.len());

        let mean = ColorPoint::mean(&points).unwrap();
        for (got, want) in clusters[0].centroid().channels().iter().zip(mean.channels()) {
            prop_assert!((got - want).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_every_point_assigned_once(
        points in points_strategy(),
        k in 1usize..8,
    ) {
        let clusters = KMeans::new(k).with_max_iterations(20).cluster(&points).unwrap();
        prop_assert_eq!(clusters.len(), k);
        prop_assert_eq!(clusters.iter().map(|c| c.len()).sum::<usize>(), points.len());
    }
}
