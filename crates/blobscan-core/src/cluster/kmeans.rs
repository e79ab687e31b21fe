use std::cmp::Ordering;

use linfa::traits::{Fit, Predict};
use linfa::DatasetBase;
use linfa_clustering::{KMeans, KMeansError};
use linfa_ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::consts::{KMEANS_RUNS, KMEANS_SEED, KMEANS_TOLERANCE, PARALLEL_POINT_THRESHOLD};
use crate::error::{BlobscanError, Result};

/// Result of a k-means run.
#[derive(Clone, Debug)]
pub struct KMeansResult {
    pub centroids: Vec<Vec<f64>>,
    /// Cluster index of each input point.
    pub assignments: Vec<usize>,
    /// Sum of squared distances from each point to its centroid.
    pub inertia: f64,
}

/// K-means with k-means++ initialisation from a fixed-seed generator, so
/// repeated runs on the same points give the same clusters.
///
/// `k` is clamped to the number of distinct points.
pub fn kmeans(points: &[Vec<f64>], k: usize, max_iterations: usize) -> Result<KMeansResult> {
    if points.is_empty() {
        return Err(BlobscanError::EmptyInput("no points to cluster".into()));
    }
    if k == 0 {
        return Err(BlobscanError::Clustering("k must be at least 1".into()));
    }
    let dims = points[0].len();
    if points.iter().any(|p| p.len() != dims) {
        return Err(BlobscanError::Clustering(
            "points have inconsistent dimensions".into(),
        ));
    }

    let k = k.min(distinct_count(points));
    let observations = Array2::from_shape_vec((points.len(), dims), points.concat())
        .map_err(|e| BlobscanError::Clustering(e.to_string()))?;
    let dataset = DatasetBase::from(observations);

    let rng = StdRng::seed_from_u64(KMEANS_SEED);
    let model = KMeans::params_with_rng(k, rng)
        .n_runs(KMEANS_RUNS)
        .max_n_iterations(max_iterations.max(1) as u64)
        .tolerance(KMEANS_TOLERANCE)
        .fit(&dataset)
        .map_err(|e: KMeansError| BlobscanError::Clustering(e.to_string()))?;

    let memberships: Array1<usize> = model.predict(dataset.records());
    let centroids: Vec<Vec<f64>> = model
        .centroids()
        .rows()
        .into_iter()
        .map(|row| row.to_vec())
        .collect();
    let assignments = memberships.to_vec();
    let inertia = inertia(points, &assignments, &centroids);

    Ok(KMeansResult {
        centroids,
        assignments,
        inertia,
    })
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

fn inertia(points: &[Vec<f64>], assignments: &[usize], centroids: &[Vec<f64>]) -> f64 {
    if points.len() >= PARALLEL_POINT_THRESHOLD {
        points
            .par_iter()
            .zip(assignments)
            .map(|(p, &c)| squared_distance(p, &centroids[c]))
            .sum()
    } else {
        points
            .iter()
            .zip(assignments)
            .map(|(p, &c)| squared_distance(p, &centroids[c]))
            .sum()
    }
}

fn compare_points(a: &[f64], b: &[f64]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.total_cmp(y))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Seeding needs a nonzero distance to every centroid after the first, so
/// more clusters than distinct points cannot be initialised.
fn distinct_count(points: &[Vec<f64>]) -> usize {
    let mut sorted: Vec<&[f64]> = points.iter().map(Vec::as_slice).collect();
    sorted.sort_by(|a, b| compare_points(*a, *b));
    sorted.dedup_by(|a, b| compare_points(*a, *b).is_eq());
    sorted.len()
}
