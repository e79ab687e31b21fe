use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use blobscan_core::cluster::{cluster_objects, write_cluster_csv};
use blobscan_core::consts::{DEFAULT_CLUSTER_COUNT, DEFAULT_KMEANS_ITERATIONS};
use blobscan_core::report::{read_object_records, ObjectRecord};
use clap::Args;
use tracing::debug;

use crate::summary::print_cluster_summary;

/// Suffix of the per-image tables written by `detect`.
const BOXES_SUFFIX: &str = "_boxes.csv";

#[derive(Args)]
pub struct ClusterArgs {
    /// Bounding-box CSV files, or `detect` output directories to scan for them
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Number of clusters
    #[arg(short, default_value_t = DEFAULT_CLUSTER_COUNT)]
    pub k: usize,

    /// Maximum k-means iterations
    #[arg(long, default_value_t = DEFAULT_KMEANS_ITERATIONS)]
    pub iterations: usize,

    /// Output CSV with a cluster index and label per object
    #[arg(short, long, default_value = "clusters.csv")]
    pub output: PathBuf,
}

pub fn run(args: &ClusterArgs) -> Result<()> {
    let tables = collect_tables(&args.inputs)?;
    if tables.is_empty() {
        bail!("No {BOXES_SUFFIX} tables found");
    }

    let mut records: Vec<ObjectRecord> = Vec::new();
    for table in &tables {
        let rows = read_object_records(table)
            .with_context(|| format!("Failed to read {}", table.display()))?;
        debug!(table = %table.display(), objects = rows.len(), "Loaded table");
        records.extend(rows);
    }
    if records.is_empty() {
        bail!("The {} table(s) contain no objects", tables.len());
    }

    println!(
        "Clustering {} objects from {} table(s)...",
        records.len(),
        tables.len()
    );
    let report = cluster_objects(&records, args.k, args.iterations)?;

    write_cluster_csv(&args.output, &report.assignments)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    print_cluster_summary(&report);
    println!("Saved to {}", args.output.display());
    Ok(())
}

/// Expand directories into their `*_boxes.csv` files; plain files pass through.
fn collect_tables(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut tables = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = std::fs::read_dir(input)
                .with_context(|| format!("Failed to list {}", input.display()))?
                .filter_map(|e| e.ok().map(|e| e.path()))
                .filter(|p| is_boxes_table(p))
                .collect();
            found.sort();
            tables.extend(found);
        } else {
            tables.push(input.clone());
        }
    }
    Ok(tables)
}

fn is_boxes_table(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(BOXES_SUFFIX))
}
