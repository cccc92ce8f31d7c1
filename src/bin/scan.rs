use anyhow::{Context, Result};
use clap::Parser;
use kmeans_color_scan::{ScanConfig, color_stats_from_bytes};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Report the dominant colors of images.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Number of colors to cluster into
    #[arg(short = 'k', long, default_value_t = 8)]
    clusters: usize,

    /// Sample every n-th pixel along both axes
    #[arg(short, long, default_value_t = 10)]
    stride: u32,

    /// Upper bound on clustering iterations
    #[arg(long, default_value_t = 1000)]
    max_iterations: usize,

    /// Seed for centroid initialisation
    #[arg(long, default_value_t = 1000)]
    seed: u64,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = ScanConfig::default()
        .with_cluster_count(args.clusters)
        .with_sampling_stride(args.stride)
        .with_max_iterations(args.max_iterations)
        .with_random_seed(args.seed);

    let mut reports = Vec::with_capacity(args.inputs.len());
    for input in &args.inputs {
        info!(path = %input.display(), stride = args.stride, "scanning image");
        let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
        let palette = color_stats_from_bytes(&bytes, &config)
            .with_context(|| format!("extracting palette from {}", input.display()))?;

        if args.json {
            let colors: Vec<_> = palette
                .iter()
                .map(|e| json!({ "color": e.hex(), "count": e.count, "share": e.share }))
                .collect();
            reports.push(json!({ "path": input.display().to_string(), "colors": colors }));
        } else {
            println!("{}", input.display());
            for entry in &palette {
                println!("  #{}  {:>8}  {:>6.2}%", entry.hex(), entry.count, entry.share * 100.0);
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(())
}
