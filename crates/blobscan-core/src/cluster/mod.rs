pub mod features;
pub mod kmeans;

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::report::ObjectRecord;
use crate::scene::SceneClass;

use features::{shape_features, standardize};
use kmeans::kmeans;

/// Land/water tag given to a cluster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterLabel {
    Land,
    Water,
}

impl fmt::Display for ClusterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Land => write!(f, "land"),
            Self::Water => write!(f, "water"),
        }
    }
}

/// One object with its cluster.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterAssignment {
    pub record: ObjectRecord,
    pub cluster: usize,
    pub label: ClusterLabel,
}

/// Per-cluster aggregate, in raw (unstandardized) units.
#[derive(Clone, Debug)]
pub struct ClusterSummary {
    pub cluster: usize,
    pub label: ClusterLabel,
    pub count: usize,
    pub mean_width: f64,
    pub mean_height: f64,
    pub mean_area: f64,
    pub mean_intensity: f64,
}

#[derive(Clone, Debug)]
pub struct ClusterReport {
    pub assignments: Vec<ClusterAssignment>,
    pub clusters: Vec<ClusterSummary>,
    pub inertia: f64,
}

/// Cluster detected objects on standardized shape features.
///
/// The cluster with the darkest mean intensity is labeled water; every other
/// cluster is land.
pub fn cluster_objects(
    records: &[ObjectRecord],
    k: usize,
    max_iterations: usize,
) -> Result<ClusterReport> {
    let mut points: Vec<Vec<f64>> = records.iter().map(shape_features).collect();
    standardize(&mut points);
    let result = kmeans(&points, k, max_iterations)?;

    let cluster_count = result.centroids.len();
    let mut clusters: Vec<ClusterSummary> = (0..cluster_count)
        .map(|cluster| ClusterSummary {
            cluster,
            label: ClusterLabel::Land,
            count: 0,
            mean_width: 0.0,
            mean_height: 0.0,
            mean_area: 0.0,
            mean_intensity: 0.0,
        })
        .collect();

    for (record, &c) in records.iter().zip(&result.assignments) {
        let s = &mut clusters[c];
        s.count += 1;
        s.mean_width += record.width as f64;
        s.mean_height += record.height as f64;
        s.mean_area += record.area as f64;
        s.mean_intensity += record.mean_intensity as f64;
    }
    for s in clusters.iter_mut().filter(|s| s.count > 0) {
        let n = s.count as f64;
        s.mean_width /= n;
        s.mean_height /= n;
        s.mean_area /= n;
        s.mean_intensity /= n;
    }

    let water = clusters
        .iter()
        .filter(|s| s.count > 0)
        .min_by(|a, b| a.mean_intensity.total_cmp(&b.mean_intensity))
        .map(|s| s.cluster);
    if let Some(w) = water {
        clusters[w].label = ClusterLabel::Water;
    }

    let assignments = records
        .iter()
        .zip(&result.assignments)
        .map(|(record, &c)| ClusterAssignment {
            record: record.clone(),
            cluster: c,
            label: clusters[c].label,
        })
        .collect();

    info!(
        objects = records.len(),
        clusters = cluster_count,
        inertia = result.inertia,
        "Clustering complete"
    );

    Ok(ClusterReport {
        assignments,
        clusters,
        inertia: result.inertia,
    })
}

#[derive(Serialize)]
struct ClusterRow<'a> {
    image: &'a str,
    x1: usize,
    y1: usize,
    x2: usize,
    y2: usize,
    width: usize,
    height: usize,
    area: usize,
    mean_intensity: f32,
    aspect_ratio: f32,
    compactness: f32,
    scene_class: SceneClass,
    cluster: usize,
    label: ClusterLabel,
}

/// Write every object with its cluster index and label.
pub fn write_cluster_csv(path: &Path, assignments: &[ClusterAssignment]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for a in assignments {
        let r = &a.record;
        wtr.serialize(ClusterRow {
            image: &r.image,
            x1: r.x1,
            y1: r.y1,
            x2: r.x2,
            y2: r.y2,
            width: r.width,
            height: r.height,
            area: r.area,
            mean_intensity: r.mean_intensity,
            aspect_ratio: r.aspect_ratio,
            compactness: r.compactness,
            scene_class: r.scene_class,
            cluster: a.cluster,
            label: a.label,
        })?;
    }
    wtr.flush()?;
    Ok(())
}
