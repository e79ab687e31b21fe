use tempfile::TempDir;

use blobscan_core::cluster::features::{shape_features, standardize, FEATURE_NAMES};
use blobscan_core::cluster::kmeans::kmeans;
use blobscan_core::cluster::{cluster_objects, write_cluster_csv, ClusterLabel};
use blobscan_core::error::BlobscanError;
use blobscan_core::report::ObjectRecord;
use blobscan_core::scene::SceneClass;

fn record(image: &str, side: usize, mean_intensity: f32) -> ObjectRecord {
    ObjectRecord {
        image: image.to_string(),
        x1: 0,
        y1: 0,
        x2: side - 1,
        y2: side - 1,
        width: side,
        height: side,
        area: side * side,
        mean_intensity,
        aspect_ratio: 1.0,
        compactness: 0.9,
        scene_class: SceneClass::Mixed,
    }
}

/// Small dark objects and large bright ones.
fn two_groups() -> Vec<ObjectRecord> {
    let mut records = Vec::new();
    for i in 0..5 {
        records.push(record("dark.png", 4 + i % 2, 0.2 + 0.01 * i as f32));
    }
    for i in 0..5 {
        records.push(record("bright.png", 20 + i % 3, 0.9 - 0.01 * i as f32));
    }
    records
}

// ---------------------------------------------------------------------------
// features
// ---------------------------------------------------------------------------

#[test]
fn test_shape_features_order_matches_names() {
    let r = record("a.png", 6, 0.5);
    let f = shape_features(&r);
    assert_eq!(f.len(), FEATURE_NAMES.len());
    assert_eq!(f[0], 6.0);
    assert_eq!(f[1], 6.0);
    assert_eq!(f[2], 36.0);
    approx::assert_abs_diff_eq!(f[5], 0.5, epsilon = 1e-6);
}

#[test]
fn test_standardize_zero_mean_unit_variance() {
    let mut points = vec![vec![1.0, 5.0], vec![3.0, 5.0], vec![5.0, 5.0]];
    let stats = standardize(&mut points);

    approx::assert_abs_diff_eq!(stats[0].0, 3.0, epsilon = 1e-12);
    let col: Vec<f64> = points.iter().map(|p| p[0]).collect();
    approx::assert_abs_diff_eq!(col.iter().sum::<f64>(), 0.0, epsilon = 1e-12);
    let var = col.iter().map(|v| v * v).sum::<f64>() / 3.0;
    approx::assert_abs_diff_eq!(var, 1.0, epsilon = 1e-12);

    // Constant column collapses to zero.
    assert!(points.iter().all(|p| p[1] == 0.0));
}

#[test]
fn test_standardize_empty_is_noop() {
    let mut points: Vec<Vec<f64>> = Vec::new();
    assert!(standardize(&mut points).is_empty());
}

// ---------------------------------------------------------------------------
// kmeans
// ---------------------------------------------------------------------------

#[test]
fn test_kmeans_separates_two_groups() {
    let points = vec![
        vec![0.0, 0.0],
        vec![0.1, 0.2],
        vec![0.2, 0.1],
        vec![10.0, 10.0],
        vec![10.1, 9.9],
        vec![9.8, 10.2],
    ];
    let result = kmeans(&points, 2, 50).unwrap();

    assert_eq!(result.centroids.len(), 2);
    let a = result.assignments[0];
    assert!(result.assignments[..3].iter().all(|&c| c == a));
    assert!(result.assignments[3..].iter().all(|&c| c != a));
    assert!(result.inertia < 1.0);
}

#[test]
fn test_kmeans_is_deterministic() {
    let points: Vec<Vec<f64>> = (0..40)
        .map(|i| vec![(i % 7) as f64, (i * 3 % 11) as f64])
        .collect();
    let a = kmeans(&points, 3, 100).unwrap();
    let b = kmeans(&points, 3, 100).unwrap();
    assert_eq!(a.assignments, b.assignments);
    assert_eq!(a.centroids, b.centroids);
}

#[test]
fn test_kmeans_clamps_k_to_point_count() {
    let points = vec![vec![1.0], vec![2.0]];
    let result = kmeans(&points, 5, 10).unwrap();
    assert_eq!(result.centroids.len(), 2);
    assert_ne!(result.assignments[0], result.assignments[1]);
    approx::assert_abs_diff_eq!(result.inertia, 0.0, epsilon = 1e-12);
}

#[test]
fn test_kmeans_clamps_k_to_distinct_points() {
    let points = vec![vec![1.0, 1.0]; 4];
    let result = kmeans(&points, 3, 10).unwrap();
    assert_eq!(result.centroids.len(), 1);
    assert_eq!(result.assignments, vec![0; 4]);
    approx::assert_abs_diff_eq!(result.inertia, 0.0, epsilon = 1e-12);
}

#[test]
fn test_kmeans_single_cluster_centroid_is_mean() {
    let points = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];
    let result = kmeans(&points, 1, 10).unwrap();
    assert_eq!(result.assignments, vec![0, 0, 0]);
    approx::assert_abs_diff_eq!(result.centroids[0][0], 3.0, epsilon = 1e-12);
    approx::assert_abs_diff_eq!(result.centroids[0][1], 4.0, epsilon = 1e-12);
}

#[test]
fn test_kmeans_errors() {
    assert!(matches!(
        kmeans(&[], 2, 10),
        Err(BlobscanError::EmptyInput(_))
    ));
    assert!(matches!(
        kmeans(&[vec![1.0]], 0, 10),
        Err(BlobscanError::Clustering(_))
    ));
    assert!(matches!(
        kmeans(&[vec![1.0], vec![1.0, 2.0]], 2, 10),
        Err(BlobscanError::Clustering(_))
    ));
}

// ---------------------------------------------------------------------------
// cluster_objects
// ---------------------------------------------------------------------------

#[test]
fn test_cluster_objects_labels_dark_group_water() {
    let records = two_groups();
    let report = cluster_objects(&records, 2, 100).unwrap();

    assert_eq!(report.assignments.len(), records.len());
    assert_eq!(report.clusters.len(), 2);

    for a in &report.assignments {
        let expected = if a.record.image == "dark.png" {
            ClusterLabel::Water
        } else {
            ClusterLabel::Land
        };
        assert_eq!(a.label, expected, "{:?}", a.record);
    }

    let water = report
        .clusters
        .iter()
        .find(|c| c.label == ClusterLabel::Water)
        .unwrap();
    assert_eq!(water.count, 5);
    assert!(water.mean_intensity < 0.3);
    assert!(water.mean_area < 30.0);

    let land = report
        .clusters
        .iter()
        .find(|c| c.label == ClusterLabel::Land)
        .unwrap();
    assert_eq!(land.count, 5);
    assert!(land.mean_width >= 20.0);
}

#[test]
fn test_cluster_objects_single_record() {
    let report = cluster_objects(&[record("a.png", 5, 0.4)], 2, 10).unwrap();
    assert_eq!(report.clusters.len(), 1);
    assert_eq!(report.assignments[0].label, ClusterLabel::Water);
}

#[test]
fn test_cluster_objects_empty_input() {
    assert!(matches!(
        cluster_objects(&[], 2, 10),
        Err(BlobscanError::EmptyInput(_))
    ));
}

#[test]
fn test_write_cluster_csv() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("clusters.csv");
    let report = cluster_objects(&two_groups(), 2, 100).unwrap();
    write_cluster_csv(&path, &report.assignments).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("image,x1,y1"));
    assert!(header.ends_with("scene_class,cluster,label"));
    assert_eq!(lines.clone().count(), 10);
    assert_eq!(lines.filter(|l| l.ends_with(",water")).count(), 5);
}

#[test]
fn test_cluster_label_display() {
    assert_eq!(ClusterLabel::Land.to_string(), "land");
    assert_eq!(ClusterLabel::Water.to_string(), "water");
}
