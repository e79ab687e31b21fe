/// Minimum point count to use Rayon parallelism when scoring a clustering.
pub const PARALLEL_POINT_THRESHOLD: usize = 16_384;

/// Seed for the k-means initialisation generator.
pub const KMEANS_SEED: u64 = 42;

/// Independent k-means initialisations; the lowest-inertia run wins.
pub const KMEANS_RUNS: usize = 10;

/// Centroid movement below which k-means stops early.
pub const KMEANS_TOLERANCE: f64 = 1e-4;

/// Small epsilon to avoid division by zero in floating-point comparisons.
pub const EPSILON: f32 = 1e-10;

/// File extensions accepted as input images (compared case-insensitively).
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Largest tile edge (pixels) processed in one piece.
pub const DEFAULT_MAX_TILE_SIZE: usize = 2048;

/// Intensity below which a pixel counts as dark, as a fraction of full scale.
pub const DEFAULT_DARK_LEVEL: f32 = 0.2;

/// Dark ratio below which a tile is classified as urban.
pub const DEFAULT_DARK_LOW: f64 = 0.3;

/// Dark ratio at or above which a tile is classified as water-heavy.
pub const DEFAULT_DARK_MID: f64 = 0.6;

/// Base minimum component area in pixels, scaled per scene class.
pub const DEFAULT_AREA_MIN: usize = 20;

/// Urban tier: (area fraction, intensity ratio).
pub const URBAN_TIER: (f32, f32) = (1.0, 1.4);

/// Mixed tier: (area fraction, intensity ratio).
pub const MIXED_TIER: (f32, f32) = (0.75, 1.25);

/// Water-heavy tier: (area fraction, intensity ratio).
pub const WATER_HEAVY_TIER: (f32, f32) = (0.5, 1.1);

/// Multiplicative brightness gain applied after contrast enhancement.
pub const DEFAULT_BRIGHTNESS_GAIN: f32 = 1.2;

/// Gaussian sigma used for denoising. Zero disables the step.
pub const DEFAULT_DENOISE_STRENGTH: f32 = 1.0;

/// Radius of the local-mean window for adaptive thresholding (block = 2r+1).
pub const DEFAULT_THRESHOLD_BLOCK_RADIUS: u32 = 15;

/// Amount (8-bit levels) a pixel must exceed its local mean to be foreground.
pub const DEFAULT_THRESHOLD_OFFSET: i16 = 10;

/// Largest meaningful threshold offset magnitude on 8-bit data.
pub const MAX_THRESHOLD_OFFSET: i16 = 255;

/// Radius of the square structuring element for open/close.
pub const DEFAULT_MORPH_RADIUS: u8 = 1;

/// Components covering more than this fraction of a tile are background.
pub const DEFAULT_MAX_AREA_FRACTION: f32 = 0.25;

/// Largest accepted bounding-box aspect ratio (long side / short side).
pub const DEFAULT_MAX_ASPECT_RATIO: f32 = 6.0;

/// Smallest accepted compactness (4*pi*area / perimeter^2).
pub const DEFAULT_MIN_COMPACTNESS: f32 = 0.15;

/// Default box color for annotated output (RGB).
pub const DEFAULT_BOX_COLOR: [u8; 3] = [255, 0, 0];

/// Default number of k-means clusters (land / water).
pub const DEFAULT_CLUSTER_COUNT: usize = 2;

/// Default k-means iteration cap.
pub const DEFAULT_KMEANS_ITERATIONS: usize = 100;

/// Name of the aggregate summary table inside the output directory.
pub const SUMMARY_FILE_NAME: &str = "summary.csv";

/// Number of histogram bins for 8-bit median estimation.
pub const HISTOGRAM_BINS: usize = 256;
