use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use blobscan_core::detection::ContrastMethod;
use blobscan_core::pipeline::config::PipelineConfig;
use blobscan_core::pipeline::run_batch_reported;
use clap::{Args, ValueEnum};

use crate::progress::BarReporter;
use crate::summary::{print_batch_summary, print_detect_summary};

#[derive(Clone, ValueEnum)]
pub enum ContrastArg {
    None,
    Stretch,
    Equalize,
}

#[derive(Args)]
pub struct DetectArgs {
    /// Directory of input images (png, jpg, jpeg, bmp)
    #[arg(short, long, default_value = "input")]
    pub input: PathBuf,

    /// Directory for annotated images and CSV tables
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,

    /// Detection config file (TOML); flags below are ignored when given
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Largest tile edge in pixels
    #[arg(long, default_value = "2048")]
    pub tile_size: usize,

    /// Intensity (0-1) below which a pixel counts as dark
    #[arg(long, default_value = "0.2")]
    pub dark_level: f32,

    /// Dark ratio below which a tile is urban
    #[arg(long, default_value = "0.3")]
    pub dark_low: f64,

    /// Dark ratio at or above which a tile is water-heavy
    #[arg(long, default_value = "0.6")]
    pub dark_mid: f64,

    /// Base minimum object area in pixels
    #[arg(long, default_value = "20")]
    pub min_area: usize,

    /// Contrast enhancement before thresholding
    #[arg(long, value_enum, default_value = "stretch")]
    pub contrast: ContrastArg,

    /// Brightness gain applied after contrast enhancement
    #[arg(long, default_value = "1.2")]
    pub gain: f32,

    /// Denoise blur sigma (0 disables)
    #[arg(long, default_value = "1.0")]
    pub denoise: f32,
}

pub fn run(args: &DetectArgs) -> Result<()> {
    let config = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid detection config")?
    } else {
        build_config_from_args(args)
    };
    config.validate()?;

    if !config.input.is_dir() {
        bail!("Input directory {} does not exist", config.input.display());
    }

    print_detect_summary(&config);

    let reporter = BarReporter::new()?;
    let report = run_batch_reported(&config, &reporter)
        .with_context(|| format!("Batch over {} failed", config.input.display()))?;

    print_batch_summary(&report);
    Ok(())
}

fn build_config_from_args(args: &DetectArgs) -> PipelineConfig {
    let mut config = PipelineConfig {
        input: args.input.clone(),
        output: args.output.clone(),
        max_tile_size: args.tile_size,
        dark_level: args.dark_level,
        ..Default::default()
    };

    config.scene.low = args.dark_low;
    config.scene.mid = args.dark_mid;
    config.scene.area_min = args.min_area;

    config.preprocess.contrast = match args.contrast {
        ContrastArg::None => ContrastMethod::None,
        ContrastArg::Stretch => ContrastMethod::default(),
        ContrastArg::Equalize => ContrastMethod::Equalize,
    };
    config.preprocess.brightness_gain = args.gain;
    config.preprocess.denoise_strength = args.denoise;

    config
}
