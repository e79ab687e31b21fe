use crate::report::ObjectRecord;

/// Column names of the shape feature vector, in order.
pub const FEATURE_NAMES: [&str; 6] = [
    "width",
    "height",
    "area",
    "aspect_ratio",
    "compactness",
    "mean_intensity",
];

/// Simple shape features of one detected object.
pub fn shape_features(record: &ObjectRecord) -> Vec<f64> {
    vec![
        record.width as f64,
        record.height as f64,
        record.area as f64,
        record.aspect_ratio as f64,
        record.compactness as f64,
        record.mean_intensity as f64,
    ]
}

/// Z-score standardize each column in place. Constant columns become zero.
///
/// Returns the per-column (mean, std) used.
pub fn standardize(points: &mut [Vec<f64>]) -> Vec<(f64, f64)> {
    let Some(dims) = points.first().map(Vec::len) else {
        return Vec::new();
    };
    let n = points.len() as f64;

    let mut stats = Vec::with_capacity(dims);
    for d in 0..dims {
        let mean = points.iter().map(|p| p[d]).sum::<f64>() / n;
        let var = points.iter().map(|p| (p[d] - mean).powi(2)).sum::<f64>() / n;
        let std = var.sqrt();
        for p in points.iter_mut() {
            p[d] = if std > 0.0 { (p[d] - mean) / std } else { 0.0 };
        }
        stats.push((mean, std));
    }
    stats
}
