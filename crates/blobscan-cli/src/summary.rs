use blobscan_core::cluster::{ClusterLabel, ClusterReport};
use blobscan_core::detection::ContrastMethod;
use blobscan_core::pipeline::config::PipelineConfig;
use blobscan_core::pipeline::BatchReport;
use blobscan_core::scene::SceneClass;
use console::Style;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
    error: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
            error: Style::new().red(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!(
        "  {}",
        s.title.apply_to("\u{2550}".repeat(title.chars().count()))
    );
    println!();
}

pub fn print_detect_summary(config: &PipelineConfig) {
    let s = Styles::new();
    print_title(&s, "Blobscan Detect");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(config.input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Tile Size"),
        s.value.apply_to(format!("{} px", config.max_tile_size))
    );
    println!();

    // Scene tuning
    println!("  {}", s.header.apply_to("Scene Tuning"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Dark Level"),
        s.value.apply_to(config.dark_level)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Urban"),
        s.value.apply_to(format!("dark < {:.0}%", config.scene.low * 100.0))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Water"),
        s.value.apply_to(format!("dark >= {:.0}%", config.scene.mid * 100.0))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Min Area"),
        s.value.apply_to(format!("{} px", config.scene.area_min))
    );
    println!();

    // Preprocessing
    println!("  {}", s.header.apply_to("Preprocessing"));
    if config.preprocess.contrast == ContrastMethod::None {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Contrast"),
            s.disabled.apply_to("disabled")
        );
    } else {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Contrast"),
            s.method.apply_to(&config.preprocess.contrast)
        );
    }
    println!(
        "    {:<12}{}",
        s.label.apply_to("Gain"),
        s.value.apply_to(format!("{}x", config.preprocess.brightness_gain))
    );
    if config.preprocess.denoise_strength > 0.0 {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Denoise"),
            s.value
                .apply_to(format!("sigma {}", config.preprocess.denoise_strength))
        );
    } else {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Denoise"),
            s.disabled.apply_to("disabled")
        );
    }
    println!();

    // Detection
    let det = &config.detection;
    println!("  {}", s.header.apply_to("Detection"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Threshold"),
        s.method.apply_to(format!(
            "mean of {0}x{0} + {1}",
            2 * det.block_radius + 1,
            det.threshold_offset
        ))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Morphology"),
        s.value.apply_to(format!("radius {}", det.morph_radius))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Max Area"),
        s.value
            .apply_to(format!("{:.0}% of tile", det.max_area_fraction * 100.0))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Max Aspect"),
        s.value.apply_to(det.max_aspect_ratio)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Compactness"),
        s.value.apply_to(format!(">= {}", det.min_compactness))
    );
    println!();
}

pub fn print_batch_summary(report: &BatchReport) {
    let s = Styles::new();
    print_title(&s, "Results");

    if report.processed.is_empty() && report.failures.is_empty() {
        println!("  {}", s.disabled.apply_to("No supported images found"));
        println!();
        return;
    }

    for row in &report.processed {
        println!(
            "  {:<32}{:>6} objects  {:>6.2}% dark  {}",
            s.value.apply_to(&row.filename),
            row.object_count,
            row.dark_percentage,
            scene_style(&s, row.scene_class).apply_to(row.scene_class)
        );
    }
    for failure in &report.failures {
        println!(
            "  {:<32}{}",
            s.value.apply_to(failure.path.display()),
            s.error.apply_to(&failure.error)
        );
    }
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Processed"),
        s.value.apply_to(report.processed.len())
    );
    if !report.failures.is_empty() {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Skipped"),
            s.error.apply_to(report.failures.len())
        );
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Objects"),
        s.value.apply_to(report.total_objects())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Summary"),
        s.path.apply_to(report.summary_path.display())
    );
    println!();
}

pub fn print_cluster_summary(report: &ClusterReport) {
    let s = Styles::new();
    print_title(&s, "Clusters");

    for c in &report.clusters {
        let label_style = match c.label {
            ClusterLabel::Water => &s.header,
            ClusterLabel::Land => &s.method,
        };
        println!(
            "  {} {}",
            s.label.apply_to(format!("#{}", c.cluster)),
            label_style.apply_to(c.label)
        );
        println!(
            "    {:<12}{}",
            s.label.apply_to("Objects"),
            s.value.apply_to(c.count)
        );
        if c.count == 0 {
            continue;
        }
        println!(
            "    {:<12}{}",
            s.label.apply_to("Mean Size"),
            s.value
                .apply_to(format!("{:.1} x {:.1} px", c.mean_width, c.mean_height))
        );
        println!(
            "    {:<12}{}",
            s.label.apply_to("Mean Area"),
            s.value.apply_to(format!("{:.1} px", c.mean_area))
        );
        println!(
            "    {:<12}{}",
            s.label.apply_to("Intensity"),
            s.value.apply_to(format!("{:.3}", c.mean_intensity))
        );
    }
    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Inertia"),
        s.value.apply_to(format!("{:.3}", report.inertia))
    );
    println!();
}

fn scene_style(s: &Styles, scene: SceneClass) -> &Style {
    match scene {
        SceneClass::Urban => &s.value,
        SceneClass::Mixed => &s.method,
        SceneClass::WaterHeavy => &s.header,
    }
}
